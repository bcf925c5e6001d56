/// Astrophiles service binary.
///
/// Subcommand dispatch over the library:
///   news                     aggregate the agency feeds, print JSON
///   calendar [YYYY-MM]       print the month sheet (default: current month)
///   today                    print tonight's moon phase
///   subscribe <name> <email> run the newsletter pipeline
///   verify [--json <path>]   check feeds and SMTP config

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{Datelike, Utc};

use astrophiles_service::config::{self, SmtpSettings};
use astrophiles_service::logging::{self, LogLevel, Source};
use astrophiles_service::{calendar, moon, news, newsletter, verify};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    logging::init_logger(LogLevel::Info, None, false);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("news") => cmd_news(),
        Some("calendar") => cmd_calendar(args.get(1).map(String::as_str)),
        Some("today") => cmd_today(),
        Some("subscribe") => cmd_subscribe(&args[1..]),
        Some("verify") => cmd_verify(&args[1..]),
        _ => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!("Usage: astrophiles_service <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  news                     Aggregate agency feeds and print JSON");
    eprintln!("  calendar [YYYY-MM]       Print the astronomical month sheet");
    eprintln!("  today                    Print tonight's moon phase");
    eprintln!("  subscribe <name> <email> Subscribe to the newsletter");
    eprintln!("  verify [--json <path>]   Verify feeds and SMTP configuration");
}

fn http_client() -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_news() -> ExitCode {
    let client = match http_client() {
        Ok(client) => client,
        Err(e) => {
            logging::error(Source::System, None, &format!("failed to build HTTP client: {}", e));
            return ExitCode::FAILURE;
        }
    };

    let extra = match config::extra_feeds_path() {
        Some(path) => match config::load_extra_feeds(&path) {
            Ok(feeds) => feeds,
            Err(e) => {
                logging::warn(
                    Source::System,
                    Some(&path),
                    &format!("ignoring extra feeds file: {}", e),
                );
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let items = news::collect_all(&client, &extra);
    match news::to_json(&items) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            logging::error(Source::System, None, &format!("serialization failed: {}", e));
            ExitCode::FAILURE
        }
    }
}

fn cmd_calendar(month_arg: Option<&str>) -> ExitCode {
    let today = Utc::now().date_naive();

    let (year, month) = match month_arg {
        Some(text) => match parse_year_month(text) {
            Some(pair) => pair,
            None => {
                eprintln!("Expected month as YYYY-MM, got '{}'", text);
                return ExitCode::FAILURE;
            }
        },
        None => (today.year(), today.month()),
    };

    match calendar::build_month(year, month, today) {
        Ok(grid) => {
            print!("{}", calendar::render_text(&grid));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn parse_year_month(text: &str) -> Option<(i32, u32)> {
    let (year, month) = text.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

fn cmd_today() -> ExitCode {
    let obs = moon::observe(Utc::now());
    println!(
        "{} {}  {}% illuminated  ({:.1} days old)",
        obs.phase.glyph(),
        obs.phase.label(),
        obs.illumination_percent,
        obs.age_days
    );
    ExitCode::SUCCESS
}

fn cmd_subscribe(args: &[String]) -> ExitCode {
    let (Some(name), Some(email)) = (args.first(), args.get(1)) else {
        eprintln!("Usage: astrophiles_service subscribe <name> <email>");
        return ExitCode::FAILURE;
    };

    let settings = SmtpSettings::from_env();
    let ledger_path = config::ledger_path();

    match newsletter::process_subscription(
        name,
        email,
        &settings,
        ledger_path.as_deref(),
        Utc::now(),
    ) {
        Ok(outcome) => {
            println!("{}", outcome.message());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Subscription failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_verify(args: &[String]) -> ExitCode {
    let report = match verify::run_full_verification() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Verification failed to run: {}", e);
            return ExitCode::FAILURE;
        }
    };

    verify::print_summary(&report);

    // Optional JSON report for dashboards or diffing across runs.
    if let Some(flag_at) = args.iter().position(|a| a == "--json") {
        let Some(path) = args.get(flag_at + 1) else {
            eprintln!("--json requires a path");
            return ExitCode::FAILURE;
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    eprintln!("Failed to write report to {}: {}", path, e);
                    return ExitCode::FAILURE;
                }
                println!("\n📄 Full report saved to: {}", path);
            }
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if report.summary.feeds_working == 0 {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
