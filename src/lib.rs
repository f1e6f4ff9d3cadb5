//! Resume matcher library

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod processing;

pub use config::Config;
pub use engine::{ConfidenceLevel, MatchEngine, MatchResult, Recommendation, ScoreVector};
pub use error::{MatcherError, Result};
pub use processing::skills::{SkillCollection, SkillExtractor};
