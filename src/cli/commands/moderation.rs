use clap::{Arg, ArgAction, Command};

pub const ARG_ID: &str = "id";
pub const ARG_PAGE: &str = "page";
pub const ARG_SIZE: &str = "size";
pub const ARG_PENDING: &str = "pending";
pub const ARG_SEARCH: &str = "search";
pub const ARG_COUNTRY: &str = "country";
pub const ARG_CITY: &str = "city";
pub const ARG_MIN_RATING: &str = "min-rating";
pub const ARG_MAX_RATING: &str = "max-rating";
pub const ARG_MAX_DURATION: &str = "max-duration";
pub const ARG_ROUTE_ID: &str = "route-id";

pub const DEFAULT_PAGE_SIZE: &str = "10";

#[must_use]
pub fn routes() -> Command {
    Command::new("routes")
        .about("List and moderate travel routes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(with_route_list_args(
            Command::new("list").about("List routes"),
        ))
        .subcommand(with_route_list_args(with_id(
            Command::new("show").about("Show every field of a route on the listed page"),
        )))
        .subcommand(with_route_list_args(with_id(
            Command::new("approve").about("Publish a pending route"),
        )))
        .subcommand(with_route_list_args(with_id(
            Command::new("reject").about("Reject a pending route"),
        )))
        .subcommand(with_route_list_args(with_id(
            Command::new("delete").about("Delete a route"),
        )))
}

#[must_use]
pub fn reviews() -> Command {
    Command::new("reviews")
        .about("List and moderate reviews")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(with_review_list_args(
            Command::new("list").about("List reviews"),
        ))
        .subcommand(with_review_list_args(with_id(
            Command::new("delete").about("Delete a review"),
        )))
        .subcommand(with_review_list_args(with_id(
            Command::new("redact").about("Replace a review's comment, keeping its rating"),
        )))
}

fn with_id(command: Command) -> Command {
    command.arg(Arg::new(ARG_ID).help("Record id").required(true))
}

fn with_paging(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_PAGE)
                .long("page")
                .help("Page number, starting at 1")
                .default_value("1")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
        .arg(
            Arg::new(ARG_SIZE)
                .long("size")
                .help("Items per page")
                .default_value(DEFAULT_PAGE_SIZE)
                .value_parser(clap::value_parser!(u32).range(1..=100)),
        )
        .arg(
            Arg::new(ARG_SEARCH)
                .short('s')
                .long("search")
                .help("Free-text search"),
        )
        .arg(
            Arg::new(ARG_MIN_RATING)
                .long("min-rating")
                .help("Minimum rating")
                .value_parser(clap::value_parser!(u8).range(1..=5)),
        )
}

fn with_route_list_args(command: Command) -> Command {
    with_paging(command)
        .arg(
            Arg::new(ARG_PENDING)
                .long("pending")
                .help("Use the pending moderation tab")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new(ARG_COUNTRY).long("country").help("Country filter"))
        .arg(Arg::new(ARG_CITY).long("city").help("City filter"))
        .arg(
            Arg::new(ARG_MAX_DURATION)
                .long("max-duration")
                .help("Maximum duration in days")
                .value_parser(clap::value_parser!(u32)),
        )
}

fn with_review_list_args(command: Command) -> Command {
    with_paging(command)
        .arg(
            Arg::new(ARG_ROUTE_ID)
                .long("route-id")
                .help("Only reviews of this route"),
        )
        .arg(
            Arg::new(ARG_MAX_RATING)
                .long("max-rating")
                .help("Maximum rating")
                .value_parser(clap::value_parser!(u8).range(1..=5)),
        )
}
