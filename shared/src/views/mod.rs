//! UI state that outlives a single render: list filter and page, the tabbed
//! image viewer and the verdict form.

pub mod form;
pub mod list;
pub mod viewer;

pub use form::{FormError, ReviewForm};
pub use list::{ListState, PAGE_SIZE, ReviewFilter};
pub use viewer::{ImageViewerState, InspectionTab};
