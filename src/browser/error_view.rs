use cursive::{
    event::{Event, EventTrigger, MouseEvent},
    utils::markup::StyledString,
    view::Resizable,
    views::{Layer, LinearLayout, OnEventView, PaddedView, TextView},
    Cursive,
};

use crate::{browser::BrowserView, config::ColorStyles, BayouError};

// Replaces the listing area when the catalog cannot be loaded. The browser
// has nothing to show at this point, so any input quits.
pub struct ErrorView;

impl ErrorView {
    pub fn load(siv: &mut Cursive, err: BayouError) {
        // The browser layer is gone for good; the load is one-shot.
        if siv.find_name::<BrowserView>(super::ID).is_some() {
            siv.pop_layer();
        }

        let mut heading = StyledString::styled(" [error]: ", ColorStyles::err().invert());
        heading.append_plain(" ");
        heading.append(StyledString::styled(
            "Unable to load the tour catalog.",
            ColorStyles::err(),
        ));

        // The full context chain, for diagnostics.
        let detail = StyledString::styled(format!("{err:#}"), ColorStyles::fg());
        let hint = StyledString::styled("Press any key to quit.", ColorStyles::prompt());

        let content = LinearLayout::vertical()
            .child(TextView::new(heading))
            .child(TextView::new(detail))
            .child(TextView::new(hint));

        siv.add_fullscreen_layer(
            OnEventView::new(Layer::new(PaddedView::lrtb(2, 2, 1, 1, content)).full_screen())
                .on_event(Self::trigger(), |siv| siv.quit()),
        );
    }

    fn trigger() -> EventTrigger {
        EventTrigger::from_fn(|event| {
            matches!(
                event,
                Event::Char(_)
                    | Event::Key(_)
                    | Event::CtrlChar(_)
                    | Event::Mouse {
                        event: MouseEvent::Press(_),
                        ..
                    }
            )
        })
    }
}
