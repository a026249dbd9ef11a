//! Product search state for the home page.
//!
//! DESIGN
//! ======
//! Provided as app-level context so the term, category and last results
//! survive a round trip through a product page.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use crate::net::types::{Category, Page, Suggestion};
use crate::state::paging::PageCursor;

/// Server-side ordering for `sort_by`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Default,
    DetailedFirst,
    DetailedLast,
}

impl SortOrder {
    pub const ALL: [Self; 3] = [Self::Default, Self::DetailedFirst, Self::DetailedLast];

    pub fn param(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::DetailedFirst => "-is_detailed",
            Self::DetailedLast => "is_detailed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "Сортувати за",
            Self::DetailedFirst => "Деталізовані спочатку",
            Self::DetailedLast => "Недеталізовані спочатку",
        }
    }

    pub fn from_param(raw: &str) -> Self {
        Self::ALL.into_iter().find(|s| s.param() == raw).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub term: String,
    /// Selected category id; empty means all categories.
    pub category: String,
    pub sort: SortOrder,
    pub categories: Vec<Category>,
    pub results: Vec<Suggestion>,
    pub cursor: PageCursor,
    pub loading: bool,
    pub error: Option<String>,
}

impl SearchState {
    /// Query string pairs for `GET /api/suggestions/`.
    pub fn query_params(&self, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.term.trim().to_owned()),
            ("category_id", self.category.clone()),
            ("page", page.max(1).to_string()),
            ("sort_by", self.sort.param().to_owned()),
        ]
    }

    pub fn apply_results(&mut self, page: u32, response: Page<Suggestion>) {
        self.cursor = PageCursor::from_page(page, &response);
        self.results = response.results;
        self.loading = false;
        self.error = None;
    }

    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}

/// Average rating as shown on a result card.
pub fn rating_label(average: Option<f64>) -> String {
    match average {
        Some(value) if value > 0.0 => format!("{value:.1}"),
        _ => "N/A".to_owned(),
    }
}
