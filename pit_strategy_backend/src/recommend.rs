//! Tire choice and the human-readable strategy text.

use crate::model::{RedFlag, StopEstimate};
use crate::reference::TrackProfile;
use crate::types::Weather;

pub const INTERMEDIATES: &str = "Intermediates";

/// Overcast stints shorter than this lean toward the crossover tire.
const SHORT_STINT_LAPS: u32 = 25;

/// First matching rule wins: rain, short overcast stints, then long remaining runs.
pub fn recommend_tire(
    menu: &[String],
    weather: Weather,
    max_stint_laps: u32,
    total_laps: u32,
    red_flag: RedFlag,
) -> String {
    let primary = menu.first().map(String::as_str).unwrap_or("Medium");
    let secondary = menu.get(1).map(String::as_str);

    let red_lap = if red_flag.flagged { red_flag.lap } else { 0 };
    let remaining = total_laps.saturating_sub(red_lap);

    let tire = match weather {
        Weather::Rain => INTERMEDIATES,
        Weather::Overcast if max_stint_laps < SHORT_STINT_LAPS => {
            if menu.iter().any(|t| t == INTERMEDIATES) {
                INTERMEDIATES
            } else {
                secondary.unwrap_or(primary)
            }
        }
        _ => match secondary {
            Some(next) if remaining as f64 > max_stint_laps as f64 * 0.8 => next,
            _ => primary,
        },
    };
    tire.to_string()
}

pub struct Narrative<'a> {
    pub track: &'a str,
    pub profile: &'a TrackProfile,
    pub weather: Weather,
    pub weather_multiplier: f64,
    pub red_flag: RedFlag,
    pub estimate: &'a StopEstimate,
    pub pit_laps: &'a [u32],
    pub tire: &'a str,
    pub menu: &'a [String],
}

impl Narrative<'_> {
    pub fn reasoning(&self) -> String {
        let p = self.profile;
        let e = self.estimate;
        let interruption = if self.red_flag.flagged {
            format!("red flag at lap {}", self.red_flag.lap)
        } else {
            format!(
                "safety car likelihood {:.0}% at lap {}",
                e.safety_car_likelihood * 100.0,
                e.safety_car_lap
            )
        };
        format!(
            "Reasoning: Based on {}'s 2021-2024 data ({} avg pit stops, difficulty x{}, \
             safety car likelihood {:.0}%), adjusted for {} laps. Tire wear factor {:.1} \
             limits stints to {} laps. {} weather (x{}) and {} influenced {} stops. \
             Tire: {} from {} due to wear.",
            self.track,
            p.historical_avg_pit_stops,
            p.difficulty_factor,
            p.baseline_safety_car_likelihood * 100.0,
            p.lap_count,
            e.tire_wear_factor,
            e.max_stint_laps,
            self.weather,
            self.weather_multiplier,
            interruption,
            e.stop_count,
            self.tire,
            self.menu.join(", "),
        )
    }

    /// Headline counts the laps actually scheduled; the reasoning keeps the estimate.
    pub fn summary(&self, reasoning: &str) -> String {
        let laps: Vec<String> = self.pit_laps.iter().map(|l| l.to_string()).collect();
        format!(
            "Strategy for {}: {} pit stop(s) at laps {}. Recommended tire: {}. {}",
            self.track,
            self.pit_laps.len(),
            laps.join(", "),
            self.tire,
            reasoning
        )
    }
}
