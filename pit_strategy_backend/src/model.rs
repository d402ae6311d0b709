//! Tire degradation and stop-count estimation.
//!
//! Pure functions of the track profile, weather and red flag; the single
//! random draw (unplanned safety car stop) goes through [`RandomSource`] so a
//! fixed source makes the whole estimate deterministic.

use rand::{rngs::StdRng, Rng};

use crate::reference::{ReferenceData, TrackProfile};
use crate::types::Weather;

/// Stint length (laps) for an idealized zero-wear tire.
pub const BASE_STINT_LAPS: f64 = 35.0;
/// Races at or under this many laps favor a one-stop in the dry.
pub const SHORT_RACE_LAPS: u32 = 50;
/// Floor probability for an unplanned extra stop.
pub const MIN_EXTRA_STOP_PROB: f64 = 0.3;

pub trait RandomSource {
    /// Uniform value in [0, 1).
    fn draw(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn draw(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Always returns the same value. Used to pin the safety car branch.
#[derive(Debug, Clone, Copy)]
pub struct FixedDraw(pub f64);

impl RandomSource for FixedDraw {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RedFlag {
    pub flagged: bool,
    pub lap: u32,
}

impl RedFlag {
    pub fn new(flagged: bool, lap: i32) -> Self {
        Self {
            flagged,
            lap: u32::try_from(lap).unwrap_or(0),
        }
    }

    /// Lap of the stoppage when it actually interrupts the race (0 < lap < total).
    pub fn effective_lap(&self, total_laps: u32) -> Option<u32> {
        (self.flagged && self.lap > 0 && self.lap < total_laps).then_some(self.lap)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopEstimate {
    pub tire_wear_factor: f64,
    pub max_stint_laps: u32,
    pub base_stops: u32,
    pub adjusted_stops: u32,
    /// Count after the historical floor and short-race clamp, before any extra stop.
    pub planned_stops: u32,
    pub safety_car_lap: u32,
    pub safety_car_likelihood: f64,
    pub extra_stops: u32,
    pub stop_count: u32,
}

pub fn tire_wear_factor(difficulty: f64, weather_multiplier: f64) -> f64 {
    1.0 + difficulty * 0.1 + (weather_multiplier - 1.0) * 0.3
}

pub fn max_stint_laps(wear: f64) -> u32 {
    ((BASE_STINT_LAPS / wear) as u32).max(1)
}

pub fn estimate_stops(
    reference: &ReferenceData,
    profile: &TrackProfile,
    weather: Weather,
    weather_multiplier: f64,
    red_flag: RedFlag,
    rng: &mut dyn RandomSource,
) -> StopEstimate {
    let laps = profile.lap_count;
    let hist = profile.historical_avg_pit_stops;
    let difficulty = profile.difficulty_factor;

    let wear = tire_wear_factor(difficulty, weather_multiplier);
    let max_stint = max_stint_laps(wear);

    let base_stops = (laps as f64 / max_stint as f64).ceil() as u32;
    let adjusted_stops = (hist as f64 * (1.0 + 0.1 * difficulty) * weather_multiplier) as u32;
    let mut planned = hist.max(base_stops).max(adjusted_stops);
    if laps <= SHORT_RACE_LAPS && !red_flag.flagged && weather == Weather::Sunny {
        planned = planned.min(1);
    }

    let safety_car_lap = if red_flag.lap > 0 { red_flag.lap } else { laps / 2 };
    let likelihood = reference.safety_car_likelihood(safety_car_lap);

    let extra_stops = if red_flag.effective_lap(laps).is_some() {
        1
    } else if rng.draw() < likelihood.max(MIN_EXTRA_STOP_PROB) {
        1
    } else {
        0
    };

    let cap = hist.saturating_add(if red_flag.flagged { 2 } else { 1 });
    let stop_count = planned.saturating_add(extra_stops).min(cap);

    tracing::debug!(
        "estimate track={} wear={:.3} max_stint={} base={} adjusted={} planned={} sc_lap={} sc={:.2} extra={} final={}",
        profile.name, wear, max_stint, base_stops, adjusted_stops, planned,
        safety_car_lap, likelihood, extra_stops, stop_count
    );

    StopEstimate {
        tire_wear_factor: wear,
        max_stint_laps: max_stint,
        base_stops,
        adjusted_stops,
        planned_stops: planned,
        safety_car_lap,
        safety_car_likelihood: likelihood,
        extra_stops,
        stop_count,
    }
}
