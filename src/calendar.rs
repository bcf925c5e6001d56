//! Month-grid construction for the astronomical calendar.
//!
//! Every day cell carries a moon observation computed at UTC midnight —
//! one fixed time-of-day convention for the whole grid, so a given
//! calendar day always lands in the same phase bucket no matter when or
//! where the grid is built. Mixing conventions between cells is exactly
//! the kind of off-by-one-day bug this module exists to prevent.
//!
//! # Clock injection
//! `build_month` takes `today` as a parameter rather than reading the
//! system clock, which keeps grid construction deterministic in tests.

use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::events::{self, AstroEvent};
use crate::moon::{self, MoonObservation};

// ---------------------------------------------------------------------------
// Grid types
// ---------------------------------------------------------------------------

/// One month of calendar cells, ready for rendering.
pub struct MonthGrid {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
    /// Header label, e.g. "December 2025".
    pub label: String,
    /// Empty cells before day 1 in a Sunday-first week row.
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

/// A single day cell.
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_of_month: u32,
    /// Phase and illumination at this day's UTC midnight.
    pub moon: MoonObservation,
    pub events: Vec<&'static AstroEvent>,
    pub is_today: bool,
}

/// Errors from grid construction. The only failure mode is an impossible
/// year/month pair — everything downstream is total.
#[derive(Debug, PartialEq)]
pub enum CalendarError {
    InvalidMonth { year: i32, month: u32 },
}

impl std::fmt::Display for CalendarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalendarError::InvalidMonth { year, month } => {
                write!(f, "Invalid month: {}-{:02}", year, month)
            }
        }
    }
}

impl std::error::Error for CalendarError {}

// ---------------------------------------------------------------------------
// Grid construction
// ---------------------------------------------------------------------------

/// Builds the grid for one month. `today` controls the current-day
/// highlight and nothing else.
pub fn build_month(year: i32, month: u32, today: NaiveDate) -> Result<MonthGrid, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;
    let day_count = days_in_month(year, month)?;

    let mut days = Vec::with_capacity(day_count as usize);
    for day_of_month in 1..=day_count {
        let date = first + chrono::Duration::days((day_of_month - 1) as i64);
        days.push(CalendarDay {
            date,
            day_of_month,
            moon: observe_at_utc_midnight(date),
            events: events::events_on(date),
            is_today: date == today,
        });
    }

    Ok(MonthGrid {
        year,
        month,
        label: first.format("%B %Y").to_string(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}

/// Number of days in the month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;
    let (next_year, next_month) = next_month(year, month);
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;
    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

/// Month navigation with year carry.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 { (year + 1, 1) } else { (year, month + 1) }
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// The single time-of-day convention used for every cell in every grid.
fn observe_at_utc_midnight(date: NaiveDate) -> MoonObservation {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    moon::observe(midnight)
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Plain-text month sheet for the CLI: a Sunday-first week grid with a
/// phase glyph per day, followed by the month's event list.
pub fn render_text(grid: &MonthGrid) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:^35}\n", grid.label));
    out.push_str(" Sun  Mon  Tue  Wed  Thu  Fri  Sat\n");

    let mut column = 0u32;
    for _ in 0..grid.leading_blanks {
        out.push_str("     ");
        column += 1;
    }
    for day in &grid.days {
        let marker = if day.is_today { '*' } else { ' ' };
        out.push_str(&format!("{:>2}{}{} ", day.day_of_month, day.moon.phase.glyph(), marker));
        column += 1;
        if column % 7 == 0 {
            out.push('\n');
        }
    }
    if column % 7 != 0 {
        out.push('\n');
    }

    if let Some(today) = grid.days.iter().find(|d| d.is_today) {
        out.push_str(&format!(
            "\nToday: {}, {}% illuminated\n",
            today.moon.phase.label(),
            today.moon.illumination_percent
        ));
    }

    let month_events = events::events_in_month(grid.year, grid.month);
    if !month_events.is_empty() {
        out.push_str("\nEvents:\n");
        for event in month_events {
            out.push_str(&format!("  {}: {}\n", event.date, event.name));
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
