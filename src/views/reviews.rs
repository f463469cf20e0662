//! Review moderation screen. Mutations patch the local list in place: a
//! deleted review disappears, a redacted one keeps its id and rating.

use crate::{
    app_lib::{AppError, Gateway},
    features::reviews::{
        client,
        types::{Review, ReviewFilters},
    },
    views::{clip, pagination::Pagination, LoadState},
};
use std::fmt;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct ReviewsView {
    filters: ReviewFilters,
    pagination: Pagination,
    reviews: Vec<Review>,
    state: LoadState,
}

impl ReviewsView {
    #[must_use]
    pub fn new(filters: ReviewFilters, pagination: Pagination) -> Self {
        Self {
            filters,
            pagination,
            reviews: Vec::new(),
            state: LoadState::Idle,
        }
    }

    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Loads the current page. A page past the end (e.g. `--page 99`) is pulled
    /// back to the last one and fetched again.
    ///
    /// # Errors
    /// Returns the gateway error for the list request.
    #[instrument(skip_all, fields(page = self.pagination.page()))]
    pub async fn load(&mut self, gateway: &Gateway<'_>) -> Result<(), AppError> {
        self.state = LoadState::Loading;
        let mut result = self.fetch(gateway).await;
        if let Ok(true) = result {
            info!("page out of range, showing page {}", self.pagination.page());
            result = self.fetch(gateway).await;
        }
        match result {
            Ok(_) => {
                self.state = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// One list request; returns whether the page had to be clamped.
    async fn fetch(&mut self, gateway: &Gateway<'_>) -> Result<bool, AppError> {
        let page = client::list_reviews(
            gateway,
            self.pagination.page(),
            self.pagination.size(),
            &self.filters,
        )
        .await?;
        let moved = self.pagination.update_from(&page);
        self.reviews = page.content;
        Ok(moved)
    }

    /// Deletes a review and removes exactly that id from the list.
    ///
    /// # Errors
    /// Returns the command error; the list is untouched then.
    pub async fn delete(&mut self, gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
        client::delete_review(gateway, id).await?;
        info!("review {id} deleted");
        let id = id.trim();
        let before = self.reviews.len();
        self.reviews.retain(|review| review.id != id);
        if self.reviews.len() < before {
            self.pagination.forget_one();
        }
        Ok(())
    }

    /// Redacts a review's comment on the server and mirrors it locally.
    ///
    /// # Errors
    /// Returns the command error; the list is untouched then.
    pub async fn redact(&mut self, gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
        client::redact_review_comment(gateway, id).await?;
        info!("review {id} comment redacted");
        let id = id.trim();
        if let Some(review) = self.reviews.iter_mut().find(|review| review.id == id) {
            review.redact();
        }
        Ok(())
    }
}

impl fmt::Display for ReviewsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reviews")?;
        match &self.state {
            LoadState::Idle | LoadState::Loading => return writeln!(f, "Loading reviews..."),
            LoadState::Failed(err) => return writeln!(f, "Error: {err}"),
            LoadState::Ready => {}
        }

        if self.reviews.is_empty() {
            writeln!(f, "No reviews found.")?;
        } else {
            writeln!(
                f,
                "{:<10} {:<10} {:<16} {:<6} {:<40}",
                "ID", "ROUTE", "AUTHOR", "RATING", "COMMENT"
            )?;
            for review in &self.reviews {
                writeln!(
                    f,
                    "{:<10} {:<10} {:<16} {:<6} {:<40}",
                    clip(&review.id, 10),
                    clip(&review.route_id, 10),
                    clip(&review.author.username, 16),
                    stars(review.rating),
                    clip(&review.comment, 40)
                )?;
            }
        }
        writeln!(f, "{}", self.pagination.summary(self.reviews.len()))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
}
