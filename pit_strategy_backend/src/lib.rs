pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod recommend;
pub mod reference;
pub mod schedule;
pub mod strategy;
pub mod types;

pub use error::StrategyError;
pub use model::{FixedDraw, RandomSource, RedFlag};
pub use reference::{ReferenceData, TrackProfile};
pub use strategy::compute_strategy;
pub use types::{StrategyRequest, StrategyResult, Weather};
