use crate::{
    cli::globals::GlobalArgs,
    features::auth::SessionStatus,
    views::{login as login_view, LoginOutcome},
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use tracing::info;

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: SecretString,
}

/// Signs in unless a valid session already exists.
/// # Errors
/// Returns an error if the session cannot be opened or the login fails.
pub async fn login(args: LoginArgs) -> Result<()> {
    let (mut session, _) = args.globals.open_session().await?;
    let outcome = login_view::submit(&mut session, &args.username, &args.password).await;
    println!("{}", report(outcome)?);
    Ok(())
}

/// The line to print for a successful outcome. Failures become the error
/// `main` reports, so they are shown once.
fn report(outcome: LoginOutcome) -> Result<String> {
    match outcome {
        LoginOutcome::SignedIn(_) | LoginOutcome::AlreadySignedIn(_) => Ok(outcome.to_string()),
        LoginOutcome::Rejected(message) => Err(anyhow!(message)),
        LoginOutcome::Failed(err) => Err(err.into()),
    }
}

/// # Errors
/// Returns an error if the session file cannot be opened.
pub async fn logout(globals: &GlobalArgs) -> Result<()> {
    let (mut session, _) = globals.open_session().await?;
    session.logout().await;
    info!("cleared session file {}", session.store().path().display());
    println!("Signed out");
    Ok(())
}

/// Runs the startup check and reports its result. An invalid stored session
/// has been cleared by the time this prints.
/// # Errors
/// Returns an error if the session file cannot be opened.
pub async fn status(globals: &GlobalArgs) -> Result<()> {
    let (_, status) = globals.open_session().await?;
    match status {
        SessionStatus::Authenticated(user) => {
            println!("Signed in as {} (id {})", user.username, user.id);
        }
        SessionStatus::Unauthenticated => println!("Not signed in"),
        SessionStatus::Invalid(fault) => {
            println!("Not signed in (stored session discarded: {fault})");
        }
    }
    println!(
        "{} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        crate::GIT_COMMIT_HASH
    );
    Ok(())
}
