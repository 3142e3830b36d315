use strum_macros::{Display, EnumIter};

use crate::api::ReviewQuery;
use crate::model::ReviewListResponse;

pub const PAGE_SIZE: u32 = 10;
const MAX_PAGE_BUTTONS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum ReviewFilter {
    #[default]
    All,
    Pending,
    Reviewed,
}

impl ReviewFilter {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewFilter::All => "All",
            ReviewFilter::Pending => "Pending",
            ReviewFilter::Reviewed => "Reviewed",
        }
    }

    fn reviewed(&self) -> Option<bool> {
        match self {
            ReviewFilter::All => None,
            ReviewFilter::Pending => Some(false),
            ReviewFilter::Reviewed => Some(true),
        }
    }
}

/// Filter tab and page of the review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListState {
    filter: ReviewFilter,
    page: u32,
}

impl ListState {
    pub fn filter(&self) -> ReviewFilter {
        self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Switching filters always returns to the first page.
    pub fn with_filter(self, filter: ReviewFilter) -> Self {
        Self { filter, page: 0 }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self { page, ..self }
    }

    pub fn previous(self) -> Self {
        self.with_page(self.page.saturating_sub(1))
    }

    pub fn next(self, total: u64) -> Self {
        if self.has_next(total) {
            self.with_page(self.page + 1)
        } else {
            self
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self, total: u64) -> bool {
        (u64::from(self.page) + 1) * u64::from(PAGE_SIZE) < total
    }

    pub fn offset(&self) -> u32 {
        self.page * PAGE_SIZE
    }

    pub fn query(&self) -> ReviewQuery {
        ReviewQuery {
            reviewed: self.filter.reviewed(),
            grade_match: None,
            limit: Some(PAGE_SIZE),
            offset: Some(self.offset()),
        }
    }

    /// Zero-based item indices covered by the current page.
    pub fn item_range(&self, total: u64) -> std::ops::Range<u64> {
        let start = u64::from(self.offset()).min(total);
        let end = (start + u64::from(PAGE_SIZE)).min(total);
        start..end
    }
}

/// Numbered page buttons shown under the table.
pub fn page_button_count(total: u64) -> u64 {
    total.div_ceil(u64::from(PAGE_SIZE)).min(MAX_PAGE_BUTTONS)
}

/// Share of tasks that already carry a verdict, rounded to a whole percent.
pub fn progress_percent(list: &ReviewListResponse) -> u64 {
    if list.total == 0 {
        return 0;
    }
    (list.reviewed_count as f64 / list.total as f64 * 100.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changing_filter_resets_page() {
        let state = ListState::default().with_page(3).with_filter(ReviewFilter::Pending);
        assert_eq!(state.page(), 0);
        assert_eq!(state.query().reviewed, Some(false));
        assert_eq!(ListState::default().query().reviewed, None);
        assert_eq!(state.with_filter(ReviewFilter::Reviewed).query().reviewed, Some(true));
    }

    #[test]
    fn pagination_bounds() {
        let total = 25;
        let first = ListState::default();
        assert!(!first.has_previous());
        assert!(first.has_next(total));
        assert_eq!(first.item_range(total), 0..10);

        let last = first.next(total).next(total);
        assert_eq!(last.page(), 2);
        assert_eq!(last.item_range(total), 20..25);
        assert!(!last.has_next(total));
        assert!(last.has_previous());
        assert_eq!(last.next(total), last);
        assert_eq!(last.query().offset, Some(20));
        assert_eq!(first.previous(), first);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let state = ListState::default().with_page(1);
        assert!(!state.has_next(20));
        assert!(state.has_next(21));
    }

    #[test]
    fn page_buttons_cap_at_five() {
        assert_eq!(page_button_count(0), 0);
        assert_eq!(page_button_count(25), 3);
        assert_eq!(page_button_count(51), 5);
        assert_eq!(page_button_count(500), 5);
    }

    #[test]
    fn progress_rounds_and_handles_empty() {
        let mut list = ReviewListResponse {
            items: Vec::new(),
            total: 0,
            pending_count: 0,
            reviewed_count: 0,
        };
        assert_eq!(progress_percent(&list), 0);
        list.total = 3;
        list.reviewed_count = 2;
        assert_eq!(progress_percent(&list), 67);
    }
}
