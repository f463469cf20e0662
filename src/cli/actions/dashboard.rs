use crate::{cli::globals::GlobalArgs, views::Dashboard};
use anyhow::{Context, Result};

/// # Errors
/// Returns an error if nobody is signed in or a counter request fails.
pub async fn execute(globals: &GlobalArgs) -> Result<()> {
    let session = globals.authenticated_session().await?;
    let dashboard = Dashboard::load(&session.gateway())
        .await
        .context("Failed to load dashboard")?;
    print!("{dashboard}");
    Ok(())
}
