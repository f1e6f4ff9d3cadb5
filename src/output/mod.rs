//! Rendering of match results for the CLI

pub mod formatter;

pub use formatter::{OutputFormat, ReportFormatter};
