use crate::error::Result;
use crate::model::{estimate_stops, RandomSource, RedFlag};
use crate::recommend::{recommend_tire, Narrative};
use crate::reference::ReferenceData;
use crate::schedule::schedule_pit_laps;
use crate::types::{StrategyRequest, StrategyResult, Weather};

/// Runs the full pipeline for one request: lookup, stop estimate, lap
/// schedule, tire and text. Fails only on an unsupported weather label.
pub fn compute_strategy(
    reference: &ReferenceData,
    req: &StrategyRequest,
    rng: &mut dyn RandomSource,
) -> Result<StrategyResult> {
    let weather: Weather = req.weather.parse()?;
    let multiplier = reference.weather_multiplier(weather)?;

    if !reference.knows_track(&req.track) {
        tracing::warn!("unknown track '{}', using default profile", req.track);
    }
    let profile = reference.track(&req.track);
    let red_flag = RedFlag::new(req.red_flag, req.red_flag_lap);
    let total_laps = profile.lap_count;

    let estimate = estimate_stops(reference, profile, weather, multiplier, red_flag, rng);
    let pit_laps = schedule_pit_laps(estimate.stop_count, total_laps, red_flag);

    let menu = reference.tire_menu(&req.track);
    let tire = recommend_tire(menu, weather, estimate.max_stint_laps, total_laps, red_flag);

    let narrative = Narrative {
        track: &req.track,
        profile,
        weather,
        weather_multiplier: multiplier,
        red_flag,
        estimate: &estimate,
        pit_laps: &pit_laps,
        tire: &tire,
        menu,
    };
    let reasoning = narrative.reasoning();
    let strategy = narrative.summary(&reasoning);

    tracing::info!(
        "strategy track={} weather={} red_flag={} stops={} pit_laps={:?} tire={}",
        req.track, weather, req.red_flag, estimate.stop_count, pit_laps, tire
    );

    // a late red flag can leave fewer distinct laps than the estimate asked for
    let scheduled = pit_laps.len() as u32;
    if scheduled < estimate.stop_count {
        tracing::debug!(
            "only {} of {} stops fit after red flag at lap {}",
            scheduled, estimate.stop_count, red_flag.lap
        );
    }

    Ok(StrategyResult {
        strategy,
        total_laps,
        stop_count: scheduled,
        tire_wear_factor: estimate.tire_wear_factor,
        max_stint_laps: estimate.max_stint_laps,
        total_pit_time_seconds: scheduled as f64 * profile.avg_pit_duration_seconds,
        pit_laps,
        recommended_tire: tire,
        reasoning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;
    use crate::model::FixedDraw;

    #[test]
    fn unsupported_weather_is_rejected() {
        let r = ReferenceData::builtin();
        let err = compute_strategy(&r, &StrategyRequest::new("Bahrain", "Xyz"), &mut FixedDraw(0.5))
            .unwrap_err();
        assert!(matches!(err, StrategyError::InvalidInput(ref m) if m.contains("Xyz")));
    }

    #[test]
    fn pit_time_scales_with_stops() {
        let r = ReferenceData::builtin();
        let out = compute_strategy(&r, &StrategyRequest::new("Monaco", "Sunny"), &mut FixedDraw(0.99)).unwrap();
        assert_eq!(out.total_pit_time_seconds, out.stop_count as f64 * 24.0);
    }

    #[test]
    fn late_red_flag_reports_scheduled_stops() {
        let r = ReferenceData::builtin();
        let req = StrategyRequest::new("Singapore", "Sunny").with_red_flag(50);
        let out = compute_strategy(&r, &req, &mut FixedDraw(0.99)).unwrap();

        assert_eq!(out.pit_laps, vec![50, 62]);
        assert_eq!(out.stop_count, 2);
        assert_eq!(out.total_pit_time_seconds, 2.0 * 24.5);
        assert!(out.strategy.starts_with("Strategy for Singapore: 2 pit stop(s) at laps 50, 62."));
        // the estimate behind it still shows in the reasoning
        assert!(out.reasoning.contains("influenced 4 stops"));
    }

    #[test]
    fn unknown_track_uses_requested_name_in_text() {
        let r = ReferenceData::builtin();
        let out = compute_strategy(&r, &StrategyRequest::new("Unknown-Track-X", "Sunny"), &mut FixedDraw(0.99))
            .unwrap();
        assert_eq!(out.total_laps, 57);
        assert!(out.strategy.starts_with("Strategy for Unknown-Track-X: "));
        assert!(out.reasoning.contains("from Medium, Hard"));
    }
}
