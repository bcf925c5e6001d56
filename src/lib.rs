/// Backend service for the Astrophiles astronomy site.
///
/// Three jobs, one crate:
/// - aggregate the space agency news feeds into the JSON list the news
///   grid renders (`feeds`, `ingest`, `news`);
/// - relay newsletter signups: validate, record, and confirm over SMTP
///   (`newsletter`);
/// - compute the moon phase data behind the astronomical calendar
///   (`moon`, `calendar`, `events`).
///
/// `model` holds the shared domain types, `config`/`logging`/`verify`
/// are the operational plumbing, and `main.rs` exposes everything as
/// subcommands.

pub mod calendar;
pub mod config;
pub mod events;
pub mod feeds;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod moon;
pub mod news;
pub mod newsletter;
pub mod verify;
