//! Dashboard counters. Every figure comes from the backends: the counters are
//! the `totalElements` of one-item pages, the lists are the first page of each
//! collection. The three requests run concurrently.

use crate::{
    app_lib::{AppError, Gateway},
    features::{
        reviews::{self, types::Review},
        routes::{
            self,
            types::{Route, RouteFilters, RouteTab},
        },
    },
    views::clip,
};
use std::fmt;
use tracing::instrument;

/// How many pending routes and recent reviews the dashboard lists.
pub const RECENT_ITEMS: u32 = 5;

#[derive(Debug)]
pub struct Dashboard {
    pub total_routes: u64,
    pub total_reviews: u64,
    pub pending_moderation: u64,
    pub pending_routes: Vec<Route>,
    pub recent_reviews: Vec<Review>,
}

impl Dashboard {
    /// # Errors
    /// Returns the first failing request's error.
    #[instrument(skip_all)]
    pub async fn load(gateway: &Gateway<'_>) -> Result<Self, AppError> {
        let no_route_filters = RouteFilters::default();
        let no_review_filters = reviews::ReviewFilters::default();

        let (all, pending, recent) = tokio::try_join!(
            routes::client::list_routes(gateway, RouteTab::All, 1, 1, &no_route_filters),
            routes::client::list_routes(
                gateway,
                RouteTab::Pending,
                1,
                RECENT_ITEMS,
                &no_route_filters
            ),
            reviews::client::list_reviews(gateway, 1, RECENT_ITEMS, &no_review_filters),
        )?;

        Ok(Self {
            total_routes: all.total_elements(),
            total_reviews: recent.total_elements(),
            pending_moderation: pending.total_elements(),
            pending_routes: pending.content,
            recent_reviews: recent.content,
        })
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard")?;
        writeln!(f, "  Total routes:        {}", self.total_routes)?;
        writeln!(f, "  Total reviews:       {}", self.total_reviews)?;
        writeln!(f, "  Pending moderation:  {}", self.pending_moderation)?;

        writeln!(f)?;
        writeln!(f, "Pending routes")?;
        if self.pending_routes.is_empty() {
            writeln!(f, "  Nothing to moderate.")?;
        }
        for route in &self.pending_routes {
            writeln!(
                f,
                "  {:<10} {:<32} by {}",
                clip(&route.id, 10),
                clip(&route.title, 32),
                route.author.username
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Recent reviews")?;
        if self.recent_reviews.is_empty() {
            writeln!(f, "  No reviews yet.")?;
        }
        for review in &self.recent_reviews {
            writeln!(
                f,
                "  {:<10} {:.1}/5 {}",
                clip(&review.id, 10),
                review.rating,
                clip(&review.comment, 48)
            )?;
        }
        Ok(())
    }
}
