/// Moon phase engine for the calendar and the "tonight" widget.
///
/// The model is the classic mean-cycle approximation: a fixed historical
/// new moon anchors the cycle, and the moon's age at any instant is the
/// elapsed time since that anchor reduced modulo the mean synodic month.
/// There are no perturbation terms, so the computed phase drifts slowly
/// for dates far from the anchor — acceptable for picking a display icon
/// and an illumination badge, not for ephemeris work.
///
/// The whole module is pure arithmetic over its input instant: no clock
/// reads, no state, safe to call from any number of threads.

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Calibration constants
// ---------------------------------------------------------------------------

/// Reference new moon, 2000-01-06T18:38:00 UTC, as Unix milliseconds.
/// Every computed phase is relative to this instant; changing it shifts
/// all outputs uniformly.
pub const NEW_MOON_EPOCH_MILLIS: i64 = 947_183_880_000;

/// Mean length of the synodic month (new moon to new moon), in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.53058867;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Exclusive upper bounds of the phase buckets, in days of moon age,
/// ascending. Ages at or beyond the last bound wrap to a new moon.
///
/// These are hand-tuned calibration values, not an even month/8 split —
/// the new moon bucket in particular is narrower than the rest. Treat
/// them as data; do not re-derive.
const PHASE_TABLE: [(f64, MoonPhase); 8] = [
    (1.84566, MoonPhase::New),
    (5.53699, MoonPhase::WaxingCrescent),
    (9.22831, MoonPhase::FirstQuarter),
    (12.91963, MoonPhase::WaxingGibbous),
    (16.61096, MoonPhase::Full),
    (20.30228, MoonPhase::WaningGibbous),
    (23.99361, MoonPhase::LastQuarter),
    (27.68493, MoonPhase::WaningCrescent),
];

// ---------------------------------------------------------------------------
// Phase types
// ---------------------------------------------------------------------------

/// The eight named phases of the lunar cycle, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// Display label as rendered on calendar cells.
    pub fn label(self) -> &'static str {
        match self {
            MoonPhase::New => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::Full => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Stable identifier for selecting a display asset. The front end maps
    /// these to image paths; the mapping can change without touching the
    /// engine.
    pub fn asset_id(self) -> &'static str {
        match self {
            MoonPhase::New => "moon-new",
            MoonPhase::WaxingCrescent => "moon-waxing-crescent",
            MoonPhase::FirstQuarter => "moon-first-quarter",
            MoonPhase::WaxingGibbous => "moon-waxing-gibbous",
            MoonPhase::Full => "moon-full",
            MoonPhase::WaningGibbous => "moon-waning-gibbous",
            MoonPhase::LastQuarter => "moon-last-quarter",
            MoonPhase::WaningCrescent => "moon-waning-crescent",
        }
    }

    /// Single-glyph rendering for the text calendar.
    pub fn glyph(self) -> char {
        match self {
            MoonPhase::New => '🌑',
            MoonPhase::WaxingCrescent => '🌒',
            MoonPhase::FirstQuarter => '🌓',
            MoonPhase::WaxingGibbous => '🌔',
            MoonPhase::Full => '🌕',
            MoonPhase::WaningGibbous => '🌖',
            MoonPhase::LastQuarter => '🌗',
            MoonPhase::WaningCrescent => '🌘',
        }
    }
}

/// The engine's output for one instant. A value, not an entity — computed
/// on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonObservation {
    /// The instant the phase was computed for.
    pub instant: DateTime<Utc>,
    /// Days since the most recent reference new moon, in
    /// `[0, SYNODIC_MONTH_DAYS)`.
    pub age_days: f64,
    pub phase: MoonPhase,
    /// Lit fraction of the visible disc, 0–100.
    pub illumination_percent: u8,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Computes the moon's phase and illumination at `instant`.
///
/// Total over all representable instants — dates before the reference
/// epoch and far-future dates both work, the approximation just degrades
/// gradually with distance from the anchor.
pub fn observe(instant: DateTime<Utc>) -> MoonObservation {
    // Fractional days matter here: the bucket bounds fall at
    // fractional-day offsets, so the division stays in f64.
    let elapsed_days =
        (instant.timestamp_millis() - NEW_MOON_EPOCH_MILLIS) as f64 / MILLIS_PER_DAY;

    // Wrap into one cycle. The raw remainder is negative for instants
    // before the reference new moon; a single correction suffices.
    let mut age_days = elapsed_days % SYNODIC_MONTH_DAYS;
    if age_days < 0.0 {
        age_days += SYNODIC_MONTH_DAYS;
    }

    MoonObservation {
        instant,
        age_days,
        phase: classify(age_days),
        illumination_percent: illumination(age_days),
    }
}

/// First bucket whose bound exceeds the age wins (strict `<`, so an age
/// exactly on a bound belongs to the next bucket). Ages past the last
/// bound close the cycle back at a new moon.
fn classify(age_days: f64) -> MoonPhase {
    for (bound, phase) in PHASE_TABLE {
        if age_days < bound {
            return phase;
        }
    }
    MoonPhase::New
}

/// Lit fraction of the disc as an integer percentage, from the cosine
/// model: 0 at a new moon, 100 at a full moon.
///
/// Computed from the age directly and continuously — it is unrelated to
/// the bucket bounds above, so a reading of 3% inside the "New Moon"
/// bucket is normal, not a disagreement.
fn illumination(age_days: f64) -> u8 {
    let fraction =
        0.5 * (1.0 - (std::f64::consts::TAU * age_days / SYNODIC_MONTH_DAYS).cos());
    (fraction * 100.0).round() as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
