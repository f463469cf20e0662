//! Route moderation screen: a paged, filterable list with approve, reject and
//! delete commands plus a details panel.

use crate::{
    app_lib::{AppError, Gateway},
    features::routes::{
        client,
        types::{Route, RouteFilters, RouteTab},
    },
    views::{clip, pagination::Pagination, LoadState},
};
use std::fmt;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct RoutesView {
    tab: RouteTab,
    filters: RouteFilters,
    pagination: Pagination,
    routes: Vec<Route>,
    state: LoadState,
}

impl RoutesView {
    #[must_use]
    pub fn new(tab: RouteTab, filters: RouteFilters, pagination: Pagination) -> Self {
        Self {
            tab,
            filters,
            pagination,
            routes: Vec::new(),
            state: LoadState::Idle,
        }
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Fetches the current page. A page past the end is pulled back to the last
    /// one and fetched again. A failure is kept in the view state and also
    /// returned.
    ///
    /// # Errors
    /// Returns the gateway error for the list request.
    #[instrument(skip_all, fields(tab = %self.tab, page = self.pagination.page()))]
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

    async fn fetch(&mut self, gateway: &Gateway<'_>) -> Result<bool, AppError> {
        let page = client::list_routes(
            gateway,
            self.tab,
            self.pagination.page(),
            self.pagination.size(),
            &self.filters,
        )
        .await?;
        let moved = self.pagination.update_from(&page);
        self.routes = page.content;
        Ok(moved)
    }

    /// Approves a route, then reloads the page.
    ///
    /// # Errors
    /// Returns the command error, or the error of the refetch.
    pub async fn approve(&mut self, gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
        client::approve_route(gateway, id).await?;
        info!("route {id} approved");
        self.load(gateway).await
    }

    /// Rejects a route, then reloads the page.
    ///
    /// # Errors
    /// Returns the command error, or the error of the refetch.
    pub async fn reject(&mut self, gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
        client::reject_route(gateway, id).await?;
        info!("route {id} rejected");
        self.load(gateway).await
    }

    /// Deletes a route and drops it from the local list without a refetch.
    ///
    /// # Errors
    /// Returns the command error; the list is untouched then.
    pub async fn delete(&mut self, gateway: &Gateway<'_>, id: &str) -> Result<(), AppError> {
        client::delete_route(gateway, id).await?;
        info!("route {id} deleted");
        self.remove_local(id);
        Ok(())
    }

    #[must_use]
    pub fn details(&self, id: &str) -> Option<RouteDetails<'_>> {
        let id = id.trim();
        self.routes
            .iter()
            .find(|route| route.id == id)
            .map(RouteDetails)
    }

    fn remove_local(&mut self, id: &str) {
        let id = id.trim();
        let before = self.routes.len();
        self.routes.retain(|route| route.id != id);
        if self.routes.len() < before {
            self.pagination.forget_one();
        }
    }
}

impl fmt::Display for RoutesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.tab {
            RouteTab::All => "Routes",
            RouteTab::Pending => "Routes pending moderation",
        };
        writeln!(f, "{title}")?;

        match &self.state {
            LoadState::Idle | LoadState::Loading => return writeln!(f, "Loading routes..."),
            LoadState::Failed(err) => return writeln!(f, "Error: {err}"),
            LoadState::Ready => {}
        }

        if self.routes.is_empty() {
            writeln!(f, "No routes found.")?;
        } else {
            writeln!(
                f,
                "{:<10} {:<32} {:<16} {:>5} {:>6} {:<10}",
                "ID", "TITLE", "AUTHOR", "DAYS", "RATING", "STATUS"
            )?;
            for route in &self.routes {
                let status = route
                    .status
                    .map_or_else(|| "-".to_string(), |status| status.to_string());
                writeln!(
                    f,
                    "{:<10} {:<32} {:<16} {:>5} {:>6.1} {:<10}",
                    clip(&route.id, 10),
                    clip(&route.title, 32),
                    clip(&route.author.username, 16),
                    route.duration,
                    route.rating,
                    status
                )?;
            }
        }
        writeln!(f, "{}", self.pagination.summary(self.routes.len()))
    }
}

/// Full record of one route, as shown by `routes show`.
pub struct RouteDetails<'a>(pub &'a Route);

impl fmt::Display for RouteDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let route = self.0;
        let none = || "-".to_string();
        writeln!(f, "{}", route.title)?;
        writeln!(f, "  id:          {}", route.id)?;
        writeln!(
            f,
            "  status:      {}",
            route.status.map_or_else(none, |status| status.to_string())
        )?;
        writeln!(f, "  author:      {} ({})", route.author.username, route.author.id)?;
        if let Some(avatar) = &route.author.avatar_url {
            writeln!(f, "  avatar:      {avatar}")?;
        }
        writeln!(f, "  countries:   {}", join_or_dash(&route.countries))?;
        writeln!(f, "  cities:      {}", join_or_dash(&route.cities))?;
        writeln!(f, "  duration:    {} days", route.duration)?;
        writeln!(
            f,
            "  rating:      {:.1} ({} reviews)",
            route.rating, route.reviews_count
        )?;
        writeln!(f, "  tags:        {}", join_or_dash(&route.tags))?;
        writeln!(
            f,
            "  preview:     {}",
            route.preview_image_url.clone().unwrap_or_else(none)
        )?;
        writeln!(f, "  created:     {}", route.created_at)?;
        if !route.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", route.description)?;
        }
        Ok(())
    }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}
