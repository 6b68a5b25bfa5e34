use std::{
    cmp::min,
    time::{Duration, Instant},
};

use {
    cursive::{
        event::{Event, EventResult, Key, MouseButton, MouseEvent},
        theme::Effect,
        view::{Nameable, Resizable},
        CbSink, Cursive, Printer, Vec2, View,
    },
    unicode_segmentation::UnicodeSegmentation,
    unicode_width::UnicodeWidthStr,
};

use crate::{
    browser::{card::BADGE, Card, Selector},
    catalog::{Activity, Catalog, CatalogFilter, PriceBucket, Tour},
    config::ColorStyles,
    debounce::Debouncer,
    track::Analytics,
    utils,
};

// Rows drawn per card: title, meta line, description, separator.
const CARD_ROWS: usize = 4;
// The first list row; rows above hold the header and the filter bar.
const LIST_TOP: usize = 2;
// The quiet period between the last keystroke and a search recompute.
const SEARCH_QUIET: Duration = Duration::from_millis(300);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// The view and state of the catalog browser.
pub struct BrowserView {
    // The working set, installed once by the loader.
    catalog: Catalog,
    // The displayed set: always a filtered, reordered derivative of
    // `catalog`, recomputed in full on every filter change.
    results: Catalog,
    // Card fragments for `results`, rebuilt alongside it.
    cards: Vec<Card>,
    // The activity control. `None` means any category.
    activity: Selector<Option<Activity>>,
    // The price bucket control.
    price: Selector<PriceBucket>,
    // The free-text search control and its cursor column, in bytes.
    query: String,
    cursor: usize,
    // The index of the selected card in `results`.
    selected_index: usize,
    // The first visible card.
    offset: usize,
    // A transient line shown above the query row.
    status: Option<String>,
    // Set while the initial catalog load is pending; drives the spinner.
    loading: Option<Instant>,
    // The dimensions of the view, in cells.
    size: Vec2,
    // A sender for scheduling callbacks on the cursive event loop.
    cb_sink: CbSink,
    // The trailing debounce for search input.
    debouncer: Debouncer,
    analytics: Analytics,
}

impl BrowserView {
    fn new(cb_sink: CbSink, analytics: Analytics) -> Self {
        let mut activities: Vec<Option<Activity>> = vec![None];
        activities.extend(Activity::FIXED.map(Some));

        BrowserView {
            catalog: Catalog::default(),
            results: Catalog::default(),
            cards: Vec::new(),
            activity: Selector::new(activities),
            price: Selector::new(PriceBucket::ALL.to_vec()),
            query: String::new(),
            cursor: 0,
            selected_index: 0,
            offset: 0,
            status: None,
            loading: Some(Instant::now()),
            size: Vec2::zero(),
            cb_sink,
            debouncer: Debouncer::new(SEARCH_QUIET),
            analytics,
        }
    }

    pub fn load(siv: &mut Cursive, analytics: Analytics) {
        let view = BrowserView::new(siv.cb_sink().clone(), analytics);
        siv.add_fullscreen_layer(view.with_name(super::ID).full_screen());
    }

    // Installs the working set delivered by the background loader and
    // triggers the initial, unfiltered render.
    pub fn set_catalog(siv: &mut Cursive, catalog: Catalog) {
        _ = siv.call_on_name(super::ID, |view: &mut BrowserView| {
            view.catalog = catalog;
            view.loading = None;
            view.recompute();
        });
    }

    // The recompute-and-render action every filter trigger funnels into:
    // read the controls fresh, run the pipeline, rebuild the fragments.
    fn recompute(&mut self) {
        let filter = CatalogFilter {
            activity: self.activity.current().clone(),
            price: *self.price.current(),
            query: self.query.clone(),
        };

        self.results = self.catalog.apply_filter(&filter).sorted_by_quality();
        self.cards = self.results.iter().map(Card::from).collect();
        self.selected_index = 0;
        self.offset = 0;
        self.status = None;
    }

    // Search input recomputes only after a quiet period; every keystroke
    // supersedes the previously pending recompute.
    fn schedule_recompute(&self) {
        let cb_sink = self.cb_sink.clone();

        self.debouncer.schedule(move || {
            _ = cb_sink.send(Box::new(|siv: &mut Cursive| {
                _ = siv.call_on_name(super::ID, |view: &mut BrowserView| view.recompute());
            }));
        });
    }

    fn insert(&mut self, ch: char) {
        self.query.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.schedule_recompute();
    }

    fn delete(&mut self) {
        if self.cursor < self.query.len() {
            let len = next_grapheme_len(&self.query[self.cursor..]);
            self.query.drain(self.cursor..self.cursor + len);
            self.schedule_recompute();
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor_left();
            self.delete();
        }
    }

    fn clear_query(&mut self) {
        self.query.clear();
        self.cursor = 0;
        self.schedule_recompute();
    }

    fn cursor_left(&mut self) {
        if self.cursor > 0 {
            let len = prev_grapheme_len(&self.query[..self.cursor]);
            self.cursor -= len;
        }
    }

    fn cursor_right(&mut self) {
        if self.cursor < self.query.len() {
            let len = next_grapheme_len(&self.query[self.cursor..]);
            self.cursor += len;
        }
    }

    fn next(&mut self) {
        if self.selected_index + 1 < self.results.len() {
            self.selected_index += 1;
            self.scroll_to_selected();
        }
    }

    fn previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.scroll_to_selected();
    }

    fn page_down(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_index = min(
            self.selected_index + self.visible_cards(),
            self.results.len() - 1,
        );
        self.scroll_to_selected();
    }

    fn page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(self.visible_cards());
        self.scroll_to_selected();
    }

    fn visible_cards(&self) -> usize {
        (self.size.y.saturating_sub(LIST_TOP + 2) / CARD_ROWS).max(1)
    }

    fn scroll_to_selected(&mut self) {
        let visible = self.visible_cards();

        if self.selected_index < self.offset {
            self.offset = self.selected_index;
        } else if self.selected_index >= self.offset + visible {
            self.offset = self.selected_index + 1 - visible;
        }
    }

    fn selected_tour(&self) -> Option<Tour> {
        self.results.get(self.selected_index).cloned()
    }

    // The call-to-action: report the click, then open the booking link in a
    // detached browser so no referring context leaks.
    fn on_activate(&mut self) -> EventResult {
        let Some(tour) = self.selected_tour() else {
            return EventResult::consumed();
        };

        match tour.booking_link.clone() {
            Some(link) => {
                self.analytics.book_click(&tour);
                self.status = match utils::open_in_browser(&link) {
                    Ok(()) => Some(format!("Opening {link}")),
                    Err(err) => Some(err.to_string()),
                };
            }
            None => self.status = Some("No booking link for this tour".to_string()),
        }

        EventResult::consumed()
    }

    fn mouse_select(&mut self, local: Vec2) -> EventResult {
        if local.y < LIST_TOP {
            return EventResult::consumed();
        }

        let index = self.offset + (local.y - LIST_TOP) / CARD_ROWS;
        if index >= self.results.len() {
            return EventResult::consumed();
        }

        if index == self.selected_index {
            self.on_activate()
        } else {
            self.selected_index = index;
            EventResult::consumed()
        }
    }

    fn spinner_frame(&self) -> Option<&str> {
        self.loading.map(|since| {
            let elapsed = since.elapsed().as_millis() / 100;
            SPINNER_FRAMES[(elapsed % SPINNER_FRAMES.len() as u128) as usize]
        })
    }

    fn count(&self) -> String {
        format!("{}/{} tours", self.results.len(), self.catalog.len())
    }

    fn filter_bar(&self) -> String {
        let activity = match self.activity.current() {
            Some(activity) => activity.to_string(),
            None => "all".to_string(),
        };

        format!(
            "activity: {activity} · price: {}   [Tab] activity · [^P] price · [Enter] book · [Esc] quit",
            self.price.current()
        )
    }

    fn draw_header(&self, p: &Printer) {
        let w = p.size.x;

        p.with_effect(Effect::Bold, |p| {
            p.with_color(ColorStyles::title(), |p| p.print((1, 0), "bayou"));
        });

        let count = self.count();
        let start = w.saturating_sub(count.width() + 1);
        p.with_color(ColorStyles::info(), |p| p.print((start, 0), &count));

        p.with_color(ColorStyles::prompt(), |p| {
            p.print((1, 1), &self.filter_bar());
        });
    }

    fn draw_cards(&self, p: &Printer) {
        let w = p.size.x;
        let last = min(self.offset + self.visible_cards(), self.cards.len());

        for (slot, index) in (self.offset..last).enumerate() {
            let card = &self.cards[index];
            let y = LIST_TOP + slot * CARD_ROWS;
            let selected = index == self.selected_index;

            // Title row, with the selection marker and the badge.
            if selected {
                p.with_color(ColorStyles::title(), |p| p.print((0, y), ">"));
            }

            let title_color = if selected {
                ColorStyles::hl()
            } else {
                ColorStyles::fg()
            };
            let effect = if selected { Effect::Bold } else { Effect::Simple };
            p.with_effect(effect, |p| {
                p.with_color(title_color, |p| p.print((2, y), &card.title));
            });

            if card.free_cancellation {
                let badge = format!("[{BADGE}]");
                let start = w.saturating_sub(badge.width() + 1);
                p.with_color(ColorStyles::badge(), |p| p.print((start, y), &badge));
            }

            // Meta row: price, tag and duration.
            let mut x = 2;
            p.with_color(ColorStyles::price(), |p| {
                p.print((x, y + 1), &card.price_label);
            });
            x += card.price_label.width() + 1;

            for piece in [Some(&card.tag), card.duration.as_ref()].into_iter().flatten() {
                p.with_color(ColorStyles::prompt(), |p| p.print((x, y + 1), "· "));
                x += 2;
                p.with_color(ColorStyles::info(), |p| p.print((x, y + 1), piece));
                x += piece.width() + 1;
            }

            // Description row.
            p.with_color(ColorStyles::fg(), |p| {
                p.print((2, y + 2), &card.description);
            });
        }
    }

    // The fixed block that replaces the card list when nothing matches.
    fn draw_no_results(&self, p: &Printer) {
        p.with_color(ColorStyles::err(), |p| {
            p.print((2, LIST_TOP + 1), super::NO_RESULTS);
        });
        p.with_color(ColorStyles::prompt(), |p| {
            p.print((2, LIST_TOP + 2), super::NO_RESULTS_HINT);
        });
    }

    fn draw_prompt(&self, p: &Printer) {
        let h = p.size.y;
        let status_row = h - 2;
        let query_row = h - 1;

        if let Some(frame) = self.spinner_frame() {
            p.with_color(ColorStyles::info(), |p| {
                p.print((1, status_row), frame);
                p.print((3, status_row), "loading catalog");
            });
        } else if let Some(status) = &self.status {
            p.with_color(ColorStyles::info(), |p| p.print((1, status_row), status));
        }

        // The text input area showing the search query.
        p.with_color(ColorStyles::hl(), |p| {
            p.print_hline((0, query_row), p.size.x, " ");
            p.print((2, query_row), &self.query);
        });

        let cursor_char = if self.cursor == self.query.len() {
            "_"
        } else {
            self.query[self.cursor..]
                .graphemes(true)
                .next()
                .expect("cursor should sit on a grapheme boundary")
        };
        let offset = self.query[..self.cursor].width();
        p.with_effect(Effect::Reverse, |p| {
            p.print((offset + 2, query_row), cursor_char);
        });

        p.with_color(ColorStyles::prompt(), |p| p.print((0, query_row), ">"));
    }
}

impl View for BrowserView {
    fn layout(&mut self, size: Vec2) {
        self.size = size;
    }

    fn draw(&self, p: &Printer) {
        if p.size.y < 4 {
            return;
        }

        self.draw_header(p);

        if self.loading.is_none() && self.results.is_empty() {
            self.draw_no_results(p);
        } else {
            self.draw_cards(p);
        }

        self.draw_prompt(p);
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Char(c) => self.insert(c),
            Event::Key(Key::Backspace) => self.backspace(),
            Event::Key(Key::Del) => self.delete(),
            Event::Key(Key::Left) => self.cursor_left(),
            Event::Key(Key::Right) => self.cursor_right(),
            Event::Key(Key::Home) => self.cursor = 0,
            Event::Key(Key::End) => self.cursor = self.query.len(),
            Event::CtrlChar('u') => self.clear_query(),
            // Selector changes recompute immediately, no debounce.
            Event::Key(Key::Tab) => {
                self.activity.advance();
                self.recompute();
            }
            Event::CtrlChar('p') => {
                self.price.advance();
                self.recompute();
            }
            Event::Key(Key::Down) => self.next(),
            Event::Key(Key::Up) => self.previous(),
            Event::Key(Key::PageDown) => self.page_down(),
            Event::Key(Key::PageUp) => self.page_up(),
            Event::Key(Key::Enter) => return self.on_activate(),
            Event::Key(Key::Esc) => {
                // Drop any pending search recompute before tearing down.
                self.debouncer.cancel();
                return EventResult::with_cb(|siv| siv.quit());
            }
            Event::Mouse {
                event,
                position,
                offset,
            } => match event {
                MouseEvent::WheelDown => self.next(),
                MouseEvent::WheelUp => self.previous(),
                MouseEvent::Press(MouseButton::Left) => {
                    return self.mouse_select(position.saturating_sub(offset));
                }
                _ => (),
            },
            _ => return EventResult::Ignored,
        }

        EventResult::consumed()
    }
}

fn next_grapheme_len(text: &str) -> usize {
    text.graphemes(true).next().map(str::len).unwrap_or(0)
}

fn prev_grapheme_len(text: &str) -> usize {
    text.graphemes(true).last().map(str::len).unwrap_or(0)
}
