//! Static reference tables: per-track history, weather multipliers, tire menus
//! and the lap -> safety car likelihood curve.
//!
//! Built once at startup (either [`ReferenceData::builtin`] or a JSON file via
//! [`ReferenceData::load`]) and shared read-only behind an `Arc`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

use crate::error::StrategyError;
use crate::types::Weather;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TrackProfile {
    pub name: String,
    pub lap_count: u32,
    pub historical_avg_pit_stops: u32,
    pub difficulty_factor: f64,
    pub baseline_safety_car_likelihood: f64,
    pub avg_pit_duration_seconds: f64,
}

impl TrackProfile {
    fn new(name: &str, laps: u32, stops: u32, difficulty: f64, sc: f64, pit_s: f64) -> Self {
        Self {
            name: name.to_string(),
            lap_count: laps,
            historical_avg_pit_stops: stops,
            difficulty_factor: difficulty,
            baseline_safety_car_likelihood: sc,
            avg_pit_duration_seconds: pit_s,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    pub lap: u32,
    pub likelihood: f64,
}

// On-disk shape; tracks are a list so the file stays readable.
#[derive(Deserialize)]
struct ReferenceFile {
    default_profile: TrackProfile,
    tracks: Vec<TrackProfile>,
    weather: HashMap<String, f64>,
    default_tire_menu: Vec<String>,
    tire_menus: HashMap<String, Vec<String>>,
    safety_car_curve: Vec<CurveSample>,
}

#[derive(Debug, Clone)]
pub struct ReferenceData {
    default_profile: TrackProfile,
    tracks: HashMap<String, TrackProfile>,
    weather: HashMap<String, f64>,
    default_tire_menu: Vec<String>,
    tire_menus: HashMap<String, Vec<String>>,
    safety_car_curve: Vec<CurveSample>,
}

impl ReferenceData {
    /// 2021-2024 season history shipped with the service.
    pub fn builtin() -> Self {
        let tracks = vec![
            TrackProfile::new("Bahrain", 57, 1, 1.0, 0.2, 22.0),
            TrackProfile::new("Saudi Arabia", 50, 1, 1.1, 0.3, 21.5),
            TrackProfile::new("Australia", 58, 1, 1.2, 0.4, 23.0),
            TrackProfile::new("Japan", 53, 2, 1.3, 0.3, 22.5),
            TrackProfile::new("China", 56, 1, 1.1, 0.2, 22.0),
            TrackProfile::new("Miami", 57, 1, 1.0, 0.3, 21.8),
            TrackProfile::new("Emilia-Romagna", 63, 1, 1.2, 0.4, 22.2),
            TrackProfile::new("Monaco", 78, 2, 1.5, 0.6, 24.0),
            TrackProfile::new("Spain", 66, 1, 1.1, 0.3, 22.0),
            TrackProfile::new("Canada", 70, 2, 1.3, 0.5, 23.5),
            TrackProfile::new("Austria", 71, 1, 1.2, 0.4, 22.3),
            TrackProfile::new("Great Britain", 52, 2, 1.3, 0.4, 22.8),
            TrackProfile::new("Hungary", 70, 2, 1.4, 0.3, 23.0),
            TrackProfile::new("Belgium", 44, 1, 1.2, 0.5, 22.5),
            TrackProfile::new("Netherlands", 72, 1, 1.1, 0.3, 21.9),
            TrackProfile::new("Italy", 53, 1, 1.0, 0.2, 22.0),
            TrackProfile::new("Azerbaijan", 51, 2, 1.4, 0.5, 23.2),
            TrackProfile::new("Singapore", 62, 2, 1.5, 0.6, 24.5),
            TrackProfile::new("United States", 56, 1, 1.1, 0.3, 22.1),
            TrackProfile::new("Mexico", 71, 1, 1.2, 0.4, 22.4),
            TrackProfile::new("Brazil", 71, 2, 1.3, 0.5, 23.3),
            TrackProfile::new("Las Vegas", 50, 1, 1.1, 0.3, 21.7),
            TrackProfile::new("Qatar", 57, 1, 1.2, 0.4, 22.3),
            TrackProfile::new("Abu Dhabi", 58, 1, 1.0, 0.2, 22.0),
        ];

        let menus: [(&str, &[&str]); 11] = [
            ("Bahrain", &["Medium", "Hard"]),
            ("Monaco", &["Soft", "Medium"]),
            ("Singapore", &["Soft", "Intermediates"]),
            ("Great Britain", &["Medium", "Intermediates"]),
            ("Canada", &["Soft", "Intermediates"]),
            ("China", &["Medium", "Intermediates"]),
            ("Emilia-Romagna", &["Medium", "Hard"]),
            ("United States", &["Medium", "Hard"]),
            ("Belgium", &["Medium", "Hard", "Intermediates"]),
            ("Brazil", &["Medium", "Intermediates"]),
            ("Abu Dhabi", &["Medium", "Hard"]),
        ];

        let curve = [(5, 0.1), (10, 0.15), (20, 0.2), (30, 0.25), (40, 0.2), (50, 0.15), (60, 0.1)];

        Self {
            default_profile: TrackProfile::new("Default", 57, 1, 1.0, 0.2, 22.0),
            tracks: tracks.into_iter().map(|t| (t.name.clone(), t)).collect(),
            weather: [("Sunny", 1.0), ("Overcast", 1.2), ("Rain", 1.5)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            default_tire_menu: vec!["Medium".to_string(), "Hard".to_string()],
            tire_menus: menus
                .iter()
                .map(|(track, tires)| {
                    (track.to_string(), tires.iter().map(|t| t.to_string()).collect())
                })
                .collect(),
            safety_car_curve: curve
                .into_iter()
                .map(|(lap, likelihood)| CurveSample { lap, likelihood })
                .collect(),
        }
    }

    pub fn load(path: &str) -> Result<Self> {
        let txt = fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read reference data at {}", path))?;
        Self::from_json(&txt).with_context(|| format!("invalid reference data in {}", path))
    }

    pub fn from_json(txt: &str) -> Result<Self> {
        let raw: ReferenceFile = serde_json::from_str(txt).context("failed to parse reference json")?;
        let mut tracks = HashMap::with_capacity(raw.tracks.len());
        for t in raw.tracks {
            if tracks.contains_key(&t.name) {
                bail!("track '{}' is listed more than once", t.name);
            }
            tracks.insert(t.name.clone(), t);
        }
        let data = Self {
            default_profile: raw.default_profile,
            tracks,
            weather: raw.weather,
            default_tire_menu: raw.default_tire_menu,
            tire_menus: raw.tire_menus,
            safety_car_curve: raw.safety_car_curve,
        };
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        for p in std::iter::once(&self.default_profile).chain(self.tracks.values()) {
            if p.lap_count == 0 {
                bail!("track '{}' has zero laps", p.name);
            }
            if !(p.difficulty_factor > 0.0) {
                bail!("track '{}' difficulty must be > 0, got {}", p.name, p.difficulty_factor);
            }
            if !(0.0..=1.0).contains(&p.baseline_safety_car_likelihood) {
                bail!("track '{}' safety car likelihood outside [0,1]", p.name);
            }
            if !(p.avg_pit_duration_seconds > 0.0) {
                bail!("track '{}' pit duration must be > 0", p.name);
            }
            if p.historical_avg_pit_stops > p.lap_count {
                bail!(
                    "track '{}' averages {} pit stops over only {} laps",
                    p.name, p.historical_avg_pit_stops, p.lap_count
                );
            }
        }
        for w in [Weather::Sunny, Weather::Overcast, Weather::Rain] {
            if !self.weather.contains_key(w.label()) {
                bail!("weather table has no multiplier for '{}'", w);
            }
        }
        for (label, m) in &self.weather {
            if !(*m > 0.0) {
                bail!("weather '{}' multiplier must be > 0, got {}", label, m);
            }
        }
        if self.default_tire_menu.is_empty() {
            bail!("default tire menu is empty");
        }
        if let Some((track, _)) = self.tire_menus.iter().find(|(_, m)| m.is_empty()) {
            bail!("tire menu for '{}' is empty", track);
        }
        if self.safety_car_curve.is_empty() {
            bail!("safety car curve has no samples");
        }
        if let Some(s) = self
            .safety_car_curve
            .iter()
            .find(|s| !(0.0..=1.0).contains(&s.likelihood))
        {
            bail!("safety car likelihood at lap {} outside [0,1]", s.lap);
        }
        Ok(())
    }

    pub fn track_names(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    pub fn knows_track(&self, name: &str) -> bool {
        self.tracks.contains_key(name)
    }

    /// Never fails: unknown circuits get the default profile.
    pub fn track(&self, name: &str) -> &TrackProfile {
        self.tracks.get(name).unwrap_or(&self.default_profile)
    }

    pub fn weather_multiplier(&self, weather: Weather) -> Result<f64, StrategyError> {
        self.weather.get(weather.label()).copied().ok_or_else(|| {
            StrategyError::InvalidInput(format!("no weather multiplier for '{}'", weather))
        })
    }

    pub fn tire_menu(&self, track: &str) -> &[String] {
        self.tire_menus
            .get(track)
            .map(Vec::as_slice)
            .unwrap_or(&self.default_tire_menu)
    }

    /// Likelihood of the sample nearest to `lap`; ties go to the earlier sample.
    pub fn safety_car_likelihood(&self, lap: u32) -> f64 {
        self.safety_car_curve
            .iter()
            .min_by_key(|s| s.lap.abs_diff(lap))
            .map_or(0.0, |s| s.likelihood)
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}
