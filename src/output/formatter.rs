//! Console and JSON formatting of match results

use crate::engine::{ConfidenceLevel, MatchResult, Recommendation};
use crate::error::Result;
use colored::Colorize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl OutputFormat {
    pub fn parse(format: &str) -> std::result::Result<Self, String> {
        match format.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid output format: {}. Supported: console, json",
                format
            )),
        }
    }
}

pub struct ReportFormatter {
    detailed: bool,
}

impl ReportFormatter {
    pub fn new(detailed: bool) -> Self {
        Self { detailed }
    }

    pub fn render(&self, result: &MatchResult, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.render_console(result)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        }
    }

    fn render_console(&self, result: &MatchResult) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", "Match Report".bold().underline());
        let _ = writeln!(out);

        let score_text = format!("{:.2} / 100", result.overall_score);
        let colored_score = match result.recommendation {
            Recommendation::StrongRecommend => score_text.green().bold(),
            Recommendation::Recommend => score_text.green(),
            Recommendation::Consider => score_text.yellow(),
            Recommendation::NotRecommended => score_text.red(),
        };
        let _ = writeln!(out, "Overall score:   {}", colored_score);

        let confidence = match result.confidence_level {
            ConfidenceLevel::High => "High".green(),
            ConfidenceLevel::Medium => "Medium".yellow(),
            ConfidenceLevel::Low => "Low".red(),
        };
        let _ = writeln!(out, "Confidence:      {}", confidence);
        let _ = writeln!(out, "Recommendation:  {}", result.recommendation.to_string().bold());
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", "Signal scores".bold());
        let _ = writeln!(out, "  Lexical similarity:   {:6.2}", result.scores.lexical);
        let _ = writeln!(out, "  Semantic similarity:  {:6.2}", result.scores.semantic);
        let _ = writeln!(out, "  Skill match:          {:6.2}", result.scores.skill_match);
        let _ = writeln!(out, "  Keyword coverage:     {:6.2}", result.scores.keyword_coverage);
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", "Insights".bold());
        for insight in &result.insights {
            let _ = writeln!(out, "  - {}", insight);
        }

        if self.detailed {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", "Skill analysis".bold());
            let _ = writeln!(
                out,
                "  Matched ({}): {}",
                result.skill_analysis.matched_skills.len(),
                result.skill_analysis.matched_skills.join(", ")
            );
            let _ = writeln!(
                out,
                "  Missing ({}): {}",
                result.skill_analysis.missing_skills.len(),
                result.skill_analysis.missing_skills.join(", ")
            );
            let _ = writeln!(
                out,
                "  Extra ({}): {}",
                result.skill_analysis.extra_skills.len(),
                result.skill_analysis.extra_skills.join(", ")
            );

            let _ = writeln!(out);
            let _ = writeln!(out, "{}", "Top job keywords".bold());
            for keyword in &result.keyword_analysis.job_keywords {
                let marker = if keyword.in_resume {
                    "present".green()
                } else {
                    "missing".red()
                };
                let _ = writeln!(
                    out,
                    "  {:<24} {:.3}  [{}]",
                    keyword.term, keyword.importance, marker
                );
            }
        }

        out
    }
}
