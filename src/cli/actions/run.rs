use crate::cli::actions::{dashboard, moderation, session, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => session::login(args).await,
        Action::Logout(globals) => session::logout(&globals).await,
        Action::Status(globals) => session::status(&globals).await,
        Action::Dashboard(globals) => dashboard::execute(&globals).await,
        Action::Routes(args) => moderation::routes(args).await,
        Action::Reviews(args) => moderation::reviews(args).await,
    }
}
