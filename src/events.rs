/// Curated astronomical event registry for the calendar.
///
/// Defines the sky events highlighted on the astronomical calendar, with
/// their dates and categories. This is the single source of truth for
/// event data — the calendar should reference events from here rather
/// than hardcoding dates.
///
/// Entries are curated by hand from the usual almanac sources; the list
/// grows month by month as new viewing windows are published.

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Event metadata
// ---------------------------------------------------------------------------

/// Category of a sky event. Drives the marker styling on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Moon,
    MeteorShower,
    Solstice,
    Conjunction,
}

impl EventKind {
    /// Stable lowercase tag, used as the marker class on the calendar.
    pub fn slug(self) -> &'static str {
        match self {
            EventKind::Moon => "moon",
            EventKind::MeteorShower => "meteor_shower",
            EventKind::Solstice => "solstice",
            EventKind::Conjunction => "conjunction",
        }
    }
}

/// A single calendar-worthy sky event.
pub struct AstroEvent {
    /// ISO date, `YYYY-MM-DD`. Kept as text so the registry stays a plain
    /// static table; parsed on lookup.
    pub date: &'static str,
    /// Display name as shown in the month's event list.
    pub name: &'static str,
    pub kind: EventKind,
}

/// All curated events, in date order.
pub static EVENT_REGISTRY: &[AstroEvent] = &[
    AstroEvent {
        date: "2025-12-04",
        name: "Super Cold Moon (Full Moon)",
        kind: EventKind::Moon,
    },
    AstroEvent {
        date: "2025-12-13",
        name: "Geminid Meteor Shower Peak",
        kind: EventKind::MeteorShower,
    },
    AstroEvent {
        date: "2025-12-14",
        name: "Geminid Meteor Shower (continuation)",
        kind: EventKind::MeteorShower,
    },
    AstroEvent {
        date: "2025-12-21",
        name: "December Solstice",
        kind: EventKind::Solstice,
    },
    AstroEvent {
        date: "2025-12-22",
        name: "Ursid Meteor Shower Peak",
        kind: EventKind::MeteorShower,
    },
    AstroEvent {
        date: "2025-12-23",
        name: "Ursid Meteor Shower (continuation)",
        kind: EventKind::MeteorShower,
    },
    AstroEvent {
        date: "2025-12-27",
        name: "Moon-Saturn Conjunction",
        kind: EventKind::Conjunction,
    },
];

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Events falling on a specific day. Registry entries with unparseable
/// dates are skipped rather than surfaced — the integrity test below
/// keeps them out of the table in the first place.
pub fn events_on(date: NaiveDate) -> Vec<&'static AstroEvent> {
    EVENT_REGISTRY
        .iter()
        .filter(|event| parse_date(event.date) == Some(date))
        .collect()
}

/// Events falling anywhere inside the given month.
pub fn events_in_month(year: i32, month: u32) -> Vec<&'static AstroEvent> {
    EVENT_REGISTRY
        .iter()
        .filter(|event| {
            parse_date(event.date)
                .map(|d| d.year() == year && d.month() == month)
                .unwrap_or(false)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_event_dates_are_valid_iso_format() {
        // An unparseable date would make the event silently vanish from
        // the calendar, so the registry must only ever hold valid ISO days.
        for event in EVENT_REGISTRY {
            assert!(
                parse_date(event.date).is_some(),
                "event '{}' has unparseable date '{}'",
                event.name,
                event.date
            );
        }
    }

    #[test]
    fn test_no_duplicate_events() {
        let mut seen = std::collections::HashSet::new();
        for event in EVENT_REGISTRY {
            assert!(
                seen.insert((event.date, event.name)),
                "duplicate event '{}' on {}",
                event.name,
                event.date
            );
        }
    }

    #[test]
    fn test_registry_is_in_date_order() {
        let dates: Vec<_> = EVENT_REGISTRY.iter().map(|e| e.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted, "EVENT_REGISTRY should be kept in date order");
    }

    #[test]
    fn test_events_on_full_moon_day() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 4).unwrap();
        let events = events_on(day);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Moon);
        assert!(events[0].name.contains("Full Moon"));
    }

    #[test]
    fn test_events_on_quiet_day_is_empty() {
        let day = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        assert!(events_on(day).is_empty());
    }

    #[test]
    fn test_december_2025_has_the_curated_seven() {
        assert_eq!(events_in_month(2025, 12).len(), 7);
        assert!(events_in_month(2025, 11).is_empty());
    }

    #[test]
    fn test_kind_slugs_are_distinct() {
        let kinds = [
            EventKind::Moon,
            EventKind::MeteorShower,
            EventKind::Solstice,
            EventKind::Conjunction,
        ];
        let mut seen = std::collections::HashSet::new();
        for kind in kinds {
            assert!(seen.insert(kind.slug()), "duplicate slug {}", kind.slug());
        }
    }
}
