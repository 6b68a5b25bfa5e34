mod browser_view;
pub mod card;
mod error_view;
mod selector;

pub use self::{browser_view::BrowserView, card::Card, error_view::ErrorView, selector::Selector};

pub const ID: &str = "browser";

pub const NO_RESULTS: &str = "No tours match your filters.";
pub const NO_RESULTS_HINT: &str = "Try clearing a filter or two.";
