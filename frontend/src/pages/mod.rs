pub mod dashboard;
pub mod review_detail;
pub mod reviews;

pub use dashboard::DashboardPage;
pub use review_detail::ReviewDetailPage;
pub use reviews::ReviewsPage;
