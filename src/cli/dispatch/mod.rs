//! Maps validated CLI matches to an [`Action`]. Everything that can be decided
//! without the network happens here: endpoint validation, filter assembly and
//! the password prompt.

use crate::{
    app_lib::{
        config::{normalize_value, EndpointOverrides},
        ServiceEndpoints,
    },
    cli::{
        actions::{
            moderation::{ReviewCommand, ReviewsArgs, RouteCommand, RoutesArgs},
            session::LoginArgs,
            Action,
        },
        commands::{endpoints, moderation as m, session},
        globals::GlobalArgs,
    },
    features::{reviews::ReviewFilters, routes::RouteFilters, routes::RouteTab},
    views::Pagination,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

/// # Errors
/// Returns an error if an endpoint override is invalid or a required value is
/// missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = global_args(matches)?;

    match matches.subcommand() {
        Some(("login", sub)) => Ok(Action::Login(login_args(globals, sub)?)),
        Some(("logout", _)) => Ok(Action::Logout(globals)),
        Some(("status", _)) => Ok(Action::Status(globals)),
        Some(("dashboard", _)) => Ok(Action::Dashboard(globals)),
        Some(("routes", sub)) => Ok(Action::Routes(routes_args(globals, sub)?)),
        Some(("reviews", sub)) => Ok(Action::Reviews(reviews_args(globals, sub)?)),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command; see --help")),
    }
}

fn global_args(matches: &ArgMatches) -> Result<GlobalArgs> {
    let value = |id: &str| matches.get_one::<String>(id).cloned();
    let endpoints = ServiceEndpoints::with_overrides(EndpointOverrides {
        auth: value(endpoints::ARG_AUTH_URL),
        library: value(endpoints::ARG_LIBRARY_URL),
        planner: value(endpoints::ARG_PLANNER_URL),
        external: value(endpoints::ARG_EXTERNAL_URL),
    })?;
    let session_file = value(endpoints::ARG_SESSION_FILE)
        .and_then(|path| normalize_value(&path))
        .map(PathBuf::from);

    Ok(GlobalArgs::new(endpoints, session_file))
}

fn login_args(globals: GlobalArgs, matches: &ArgMatches) -> Result<LoginArgs> {
    let (username, password) = credentials(matches, prompt, |label| {
        rpassword::prompt_password(label).context("failed to read password")
    })?;

    Ok(LoginArgs {
        globals,
        username,
        password,
    })
}

/// Username and password from flags or env, otherwise asked for. The password
/// goes through `read_hidden` so it is never echoed.
fn credentials<L, H>(
    matches: &ArgMatches,
    read_line: L,
    read_hidden: H,
) -> Result<(String, SecretString)>
where
    L: FnOnce(&str) -> Result<String>,
    H: FnOnce(&str) -> Result<String>,
{
    let username = match optional(matches, session::ARG_USERNAME) {
        Some(username) => username,
        None => read_line("Username: ")?,
    };
    let password = match optional(matches, session::ARG_PASSWORD) {
        Some(password) => password,
        None => read_hidden("Password: ")?,
    };
    Ok((username, SecretString::from(password)))
}

fn routes_args(globals: GlobalArgs, matches: &ArgMatches) -> Result<RoutesArgs> {
    let (name, sub) = matches
        .subcommand()
        .context("missing routes command; see `routes --help`")?;

    let command = match name {
        "list" => RouteCommand::List,
        "show" => RouteCommand::Show(required_id(sub)?),
        "approve" => RouteCommand::Approve(required_id(sub)?),
        "reject" => RouteCommand::Reject(required_id(sub)?),
        "delete" => RouteCommand::Delete(required_id(sub)?),
        other => return Err(anyhow!("unknown routes command: {other}")),
    };

    let tab = if sub.get_flag(m::ARG_PENDING) {
        RouteTab::Pending
    } else {
        RouteTab::All
    };
    let filters = RouteFilters {
        search: optional(sub, m::ARG_SEARCH),
        country: optional(sub, m::ARG_COUNTRY),
        city: optional(sub, m::ARG_CITY),
        min_rating: sub.get_one::<u8>(m::ARG_MIN_RATING).map(ToString::to_string),
        max_duration: sub
            .get_one::<u32>(m::ARG_MAX_DURATION)
            .map(ToString::to_string),
    };

    Ok(RoutesArgs {
        globals,
        command,
        tab,
        filters,
        pagination: pagination(sub),
    })
}

fn reviews_args(globals: GlobalArgs, matches: &ArgMatches) -> Result<ReviewsArgs> {
    let (name, sub) = matches
        .subcommand()
        .context("missing reviews command; see `reviews --help`")?;

    let command = match name {
        "list" => ReviewCommand::List,
        "delete" => ReviewCommand::Delete(required_id(sub)?),
        "redact" => ReviewCommand::Redact(required_id(sub)?),
        other => return Err(anyhow!("unknown reviews command: {other}")),
    };

    let filters = ReviewFilters {
        route_id: optional(sub, m::ARG_ROUTE_ID),
        min_rating: sub.get_one::<u8>(m::ARG_MIN_RATING).map(ToString::to_string),
        max_rating: sub.get_one::<u8>(m::ARG_MAX_RATING).map(ToString::to_string),
        search: optional(sub, m::ARG_SEARCH),
    };

    Ok(ReviewsArgs {
        globals,
        command,
        filters,
        pagination: pagination(sub),
    })
}

fn pagination(matches: &ArgMatches) -> Pagination {
    Pagination::new(
        matches.get_one::<u32>(m::ARG_PAGE).copied().unwrap_or(1),
        matches.get_one::<u32>(m::ARG_SIZE).copied().unwrap_or(10),
    )
}

fn optional(matches: &ArgMatches, id: &str) -> Option<String> {
    matches
        .get_one::<String>(id)
        .and_then(|value| normalize_value(value))
}

fn required_id(matches: &ArgMatches) -> Result<String> {
    optional(matches, m::ARG_ID).context("missing required argument: <id>")
}

/// Reads one line from stdin after printing `label` to stderr.
fn prompt(label: &str) -> Result<String> {
    let mut stderr = io::stderr();
    stderr.write_all(label.as_bytes())?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
