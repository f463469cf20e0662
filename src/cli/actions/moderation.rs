//! Route and review commands. Each opens the view, loads the requested page,
//! applies the command and prints the view as it stands afterwards.

use crate::{
    cli::globals::GlobalArgs,
    features::{
        reviews::ReviewFilters,
        routes::{RouteFilters, RouteTab},
    },
    views::{Pagination, ReviewsView, RoutesView},
};
use anyhow::{anyhow, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteCommand {
    List,
    Show(String),
    Approve(String),
    Reject(String),
    Delete(String),
}

#[derive(Debug)]
pub struct RoutesArgs {
    pub globals: GlobalArgs,
    pub command: RouteCommand,
    pub tab: RouteTab,
    pub filters: RouteFilters,
    pub pagination: Pagination,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReviewCommand {
    List,
    Delete(String),
    Redact(String),
}

#[derive(Debug)]
pub struct ReviewsArgs {
    pub globals: GlobalArgs,
    pub command: ReviewCommand,
    pub filters: ReviewFilters,
    pub pagination: Pagination,
}

/// # Errors
/// Returns an error if nobody is signed in or a request fails.
pub async fn routes(args: RoutesArgs) -> Result<()> {
    let session = args.globals.authenticated_session().await?;
    let gateway = session.gateway();
    let mut view = RoutesView::new(args.tab, args.filters, args.pagination);

    match args.command {
        RouteCommand::List => view.load(&gateway).await?,
        RouteCommand::Show(id) => {
            view.load(&gateway).await?;
            let details = view
                .details(&id)
                .ok_or_else(|| anyhow!("Route {id} is not on this page"))?;
            print!("{details}");
            return Ok(());
        }
        RouteCommand::Approve(id) => {
            view.approve(&gateway, &id).await?;
            println!("Route {id} approved");
        }
        RouteCommand::Reject(id) => {
            view.reject(&gateway, &id).await?;
            println!("Route {id} rejected");
        }
        RouteCommand::Delete(id) => {
            view.load(&gateway).await?;
            view.delete(&gateway, &id).await?;
            println!("Route {id} deleted");
        }
    }

    print!("{view}");
    Ok(())
}

/// # Errors
/// Returns an error if nobody is signed in or a request fails.
pub async fn reviews(args: ReviewsArgs) -> Result<()> {
    let session = args.globals.authenticated_session().await?;
    let gateway = session.gateway();
    let mut view = ReviewsView::new(args.filters, args.pagination);
    view.load(&gateway).await?;

    match args.command {
        ReviewCommand::List => {}
        ReviewCommand::Delete(id) => {
            view.delete(&gateway, &id).await?;
            println!("Review {id} deleted");
        }
        ReviewCommand::Redact(id) => {
            view.redact(&gateway, &id).await?;
            println!("Review {id} comment redacted");
        }
    }

    print!("{view}");
    Ok(())
}
