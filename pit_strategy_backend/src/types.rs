use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::StrategyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Overcast,
    Rain,
}

impl Weather {
    pub fn label(self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Overcast => "Overcast",
            Weather::Rain => "Rain",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Weather {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sunny" => Ok(Weather::Sunny),
            "Overcast" => Ok(Weather::Overcast),
            "Rain" => Ok(Weather::Rain),
            other => Err(StrategyError::InvalidInput(format!(
                "unsupported weather '{}' (expected Sunny, Overcast or Rain)",
                other
            ))),
        }
    }
}

// ---------- Request/Response types ----------

// Query params arrive camelCase: ?track=Monaco&weather=Rain&redFlag=true&redFlagLap=30
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyRequest {
    pub track: String,
    pub weather: String,
    pub red_flag: bool,
    pub red_flag_lap: i32,
}

impl Default for StrategyRequest {
    fn default() -> Self {
        Self {
            track: "Bahrain".to_string(),
            weather: "Sunny".to_string(),
            red_flag: false,
            red_flag_lap: 0,
        }
    }
}

impl StrategyRequest {
    pub fn new(track: &str, weather: &str) -> Self {
        Self {
            track: track.to_string(),
            weather: weather.to_string(),
            ..Self::default()
        }
    }

    pub fn with_red_flag(mut self, lap: i32) -> Self {
        self.red_flag = true;
        self.red_flag_lap = lap;
        self
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub strategy: String,
    pub total_laps: u32,
    pub pit_laps: Vec<u32>,
    pub recommended_tire: String,
    pub reasoning: String,
    pub stop_count: u32,
    pub tire_wear_factor: f64,
    pub max_stint_laps: u32,
    pub total_pit_time_seconds: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_labels_parse_exactly() {
        assert_eq!("Rain".parse::<Weather>().unwrap(), Weather::Rain);
        assert_eq!("Overcast".parse::<Weather>().unwrap(), Weather::Overcast);
        assert!(matches!(
            "rain".parse::<Weather>(),
            Err(StrategyError::InvalidInput(_))
        ));
        assert!("Xyz".parse::<Weather>().is_err());
    }

    #[test]
    fn request_defaults_fill_missing_params() {
        let req: StrategyRequest = serde_json::from_str(r#"{"track":"Monaco"}"#).unwrap();
        assert_eq!(req.track, "Monaco");
        assert_eq!(req.weather, "Sunny");
        assert!(!req.red_flag);
        assert_eq!(req.red_flag_lap, 0);

        let req: StrategyRequest =
            serde_json::from_str(r#"{"redFlag":true,"redFlagLap":12}"#).unwrap();
        assert_eq!(req.track, "Bahrain");
        assert!(req.red_flag);
        assert_eq!(req.red_flag_lap, 12);
    }

    #[test]
    fn result_serializes_camel_case() {
        let out = StrategyResult {
            strategy: "s".into(),
            total_laps: 57,
            pit_laps: vec![20, 40],
            recommended_tire: "Hard".into(),
            reasoning: "r".into(),
            stop_count: 2,
            tire_wear_factor: 1.1,
            max_stint_laps: 31,
            total_pit_time_seconds: 44.0,
        };
        let v = serde_json::to_value(&out).unwrap();
        assert_eq!(v["totalLaps"], 57);
        assert_eq!(v["pitLaps"], serde_json::json!([20, 40]));
        assert_eq!(v["recommendedTire"], "Hard");
        assert!(v.get("reasoning").is_some());
        assert!(v.get("strategy").is_some());
    }
}
