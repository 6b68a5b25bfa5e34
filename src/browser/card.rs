use {once_cell::sync::Lazy, regex::Regex, unicode_segmentation::UnicodeSegmentation};

use crate::catalog::Tour;

pub const PRICE_PLACEHOLDER: &str = "Check Price";
pub const TAG_PLACEHOLDER: &str = "Tour";
pub const BADGE: &str = "Free Cancellation";

const FALLBACK_DESCRIPTION: &str = "Experience the best of the bayou with this guided tour.";
const DESCRIPTION_LIMIT: usize = 100;
const ELLIPSIS: &str = "...";

// Strips a leading "Duration" label word, with or without a colon.
static DURATION_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*duration:?\s*").expect("duration pattern should compile"));

// Collapses line breaks and runs of whitespace to single spaces.
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern should compile"));

// The display fragments for one tour, computed once per render. All text is
// sanitized for the terminal: the catalog file is operator-supplied, and raw
// control characters would let it inject escape sequences into the view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Card {
    pub title: String,
    pub price_label: String,
    pub tag: String,
    pub description: String,
    pub duration: Option<String>,
    pub free_cancellation: bool,
    pub booking_link: Option<String>,
}

impl From<&Tour> for Card {
    fn from(tour: &Tour) -> Self {
        let description = tour
            .description
            .as_deref()
            .map(|text| sanitize(text))
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

        Card {
            title: sanitize(&tour.name).trim().to_string(),
            price_label: price_label(tour.price),
            tag: tag_label(&tour.tags),
            description: truncate(&description, DESCRIPTION_LIMIT),
            duration: tour.duration_text.as_deref().and_then(clean_duration),
            free_cancellation: tour.free_cancellation.unwrap_or(false),
            booking_link: tour.booking_link.clone(),
        }
    }
}

// "$75" when a price is present; whole amounts drop the cents. No price is
// a distinct state and renders the fixed placeholder.
fn price_label(price: Option<f64>) -> String {
    match price {
        Some(price) if price.fract() == 0.0 => format!("${price:.0}"),
        Some(price) => format!("${price:.2}"),
        None => PRICE_PLACEHOLDER.to_string(),
    }
}

fn tag_label(tags: &[String]) -> String {
    tags.first()
        .map(|tag| sanitize(tag).trim().to_string())
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| TAG_PLACEHOLDER.to_string())
}

// Truncates to `limit` grapheme clusters, trimming trailing whitespace
// before appending the ellipsis marker.
fn truncate(text: &str, limit: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();

    if graphemes.len() <= limit {
        return text.to_string();
    }

    let mut head: String = graphemes[..limit].concat();
    head.truncate(head.trim_end().len());
    head.push_str(ELLIPSIS);
    head
}

// Cleans a raw duration: the leading label word goes, embedded line breaks
// collapse to single spaces, and surrounding whitespace is trimmed. Returns
// `None` when nothing remains to show.
fn clean_duration(raw: &str) -> Option<String> {
    let text = sanitize(raw);
    let text = DURATION_LABEL.replace(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = text.trim().to_string();

    (!text.is_empty()).then_some(text)
}

// Replaces control characters with spaces so listing-provided text cannot
// corrupt the terminal. Follow-up whitespace handling is per-fragment.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_label_formats_whole_and_fractional_amounts() {
        assert_eq!(price_label(Some(75.0)), "$75");
        assert_eq!(price_label(Some(79.5)), "$79.50");
        assert_eq!(price_label(Some(0.0)), "$0");
    }

    #[test]
    fn test_missing_price_renders_the_placeholder() {
        assert_eq!(price_label(None), PRICE_PLACEHOLDER);
    }

    #[test]
    fn test_tag_is_the_first_tag_or_the_placeholder() {
        assert_eq!(tag_label(&["airboat".into(), "sunset".into()]), "airboat");
        assert_eq!(tag_label(&[]), TAG_PLACEHOLDER);
    }

    #[test]
    fn test_description_falls_back_to_the_fixed_sentence() {
        let card = Card::from(&Tour::default());
        assert_eq!(card.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_description_of_101_chars_truncates_to_100_plus_ellipsis() {
        let text = "a".repeat(101);
        let truncated = truncate(&text, DESCRIPTION_LIMIT);

        assert_eq!(truncated, format!("{}{}", "a".repeat(100), ELLIPSIS));
    }

    #[test]
    fn test_description_of_100_chars_is_untouched() {
        let text = "a".repeat(100);
        assert_eq!(truncate(&text, DESCRIPTION_LIMIT), text);
    }

    #[test]
    fn test_truncation_trims_whitespace_before_the_ellipsis() {
        let text = format!("{}   tail", "a".repeat(97));
        let truncated = truncate(&text, DESCRIPTION_LIMIT);

        assert_eq!(truncated, format!("{}{}", "a".repeat(97), ELLIPSIS));
    }

    #[test]
    fn test_truncation_counts_graphemes_not_bytes() {
        let text = "é".repeat(101);
        let truncated = truncate(&text, DESCRIPTION_LIMIT);

        assert_eq!(truncated, format!("{}{}", "é".repeat(100), ELLIPSIS));
    }

    #[test]
    fn test_duration_label_is_stripped_case_insensitively() {
        assert_eq!(clean_duration("Duration: 2 hours").as_deref(), Some("2 hours"));
        assert_eq!(clean_duration("DURATION 3 hours").as_deref(), Some("3 hours"));
        assert_eq!(clean_duration("duration:90 minutes").as_deref(), Some("90 minutes"));
    }

    #[test]
    fn test_duration_line_breaks_collapse_to_single_spaces() {
        assert_eq!(
            clean_duration("2 hours\n(approx)").as_deref(),
            Some("2 hours (approx)")
        );
        assert_eq!(
            clean_duration("  Duration:\n 2\r\nhours  ").as_deref(),
            Some("2 hours")
        );
    }

    #[test]
    fn test_blank_duration_is_omitted() {
        assert_eq!(clean_duration("   "), None);
        assert_eq!(clean_duration("Duration:"), None);

        let tour = Tour::default();
        assert_eq!(Card::from(&tour).duration, None);
    }

    #[test]
    fn test_control_characters_cannot_reach_the_view() {
        let tour = Tour {
            name: "Swamp\x1b[31m Tour".into(),
            description: Some("line one\x07".into()),
            ..Tour::default()
        };

        let card = Card::from(&tour);
        assert!(!card.title.contains('\x1b'));
        assert!(!card.description.contains('\x07'));
        assert_eq!(card.title, "Swamp [31m Tour");
    }

    #[test]
    fn test_cancellation_badge_requires_an_explicit_true() {
        let mut tour = Tour::default();
        assert!(!Card::from(&tour).free_cancellation);

        tour.free_cancellation = Some(false);
        assert!(!Card::from(&tour).free_cancellation);

        tour.free_cancellation = Some(true);
        assert!(Card::from(&tour).free_cancellation);
    }
}
