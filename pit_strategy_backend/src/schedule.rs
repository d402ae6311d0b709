use crate::model::RedFlag;

/// Share of a stint by which every stop but the last is pulled earlier.
const PULL_FORWARD: f64 = 0.3;

/// Turns a stop count into concrete pit laps.
///
/// Laps come back in construction order: the red flag lap (if it interrupts
/// the race) first, then the evenly spaced stops. They are not re-sorted.
pub fn schedule_pit_laps(stop_count: u32, total_laps: u32, red_flag: RedFlag) -> Vec<u32> {
    let red_lap = red_flag.effective_lap(total_laps);

    // the red flag stop is placed directly, only the rest get spaced
    let spaced = match red_lap {
        Some(_) => stop_count.saturating_sub(1),
        None => stop_count,
    };
    let laps_per_stint = total_laps / spaced.max(1);
    let pull = (laps_per_stint as f64 * PULL_FORWARD) as u32;
    let offset = red_lap.unwrap_or(0);
    let earliest = red_lap.map_or(1, |l| l + 1);

    let mut pit_laps = Vec::with_capacity(stop_count as usize);
    if let Some(lap) = red_lap {
        pit_laps.push(lap);
    }

    for i in 1..=spaced {
        let mut lap = offset + i * laps_per_stint;
        if i != spaced {
            lap -= pull;
        }
        let lap = lap.min(total_laps).max(earliest);
        if !pit_laps.contains(&lap) {
            pit_laps.push(lap);
        }
    }

    if (pit_laps.len() as u32) < stop_count && !pit_laps.contains(&total_laps) {
        pit_laps.push(total_laps);
    }
    pit_laps
}
