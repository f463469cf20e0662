//! Console screens. Each view calls the gateway through the feature clients
//! and renders its state as text via `Display`; rendering never performs I/O.

pub mod dashboard;
pub mod login;
pub mod pagination;
pub mod reviews;
pub mod routes;

use crate::app_lib::AppError;

pub use dashboard::Dashboard;
pub use login::LoginOutcome;
pub use pagination::Pagination;
pub use reviews::ReviewsView;
pub use routes::{RouteDetails, RoutesView};

/// Fetch state of a list view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(AppError),
}

/// Cuts `text` to `width` characters, marking the cut with `~`.
pub(crate) fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}
