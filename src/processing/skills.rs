//! Skill collections, dictionary-based extraction, and set-based matching

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Categorized set of lower-cased skill tokens.
///
/// Categories exist for input organization only; matching flattens across
/// them. Within a category tokens are unique, and the sorted-set storage
/// keeps iteration order deterministic for downstream insight text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCollection {
    categories: BTreeMap<String, BTreeSet<String>>,
}

impl SkillCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: &str, skill: &str) {
        let token = skill.trim().to_lowercase();
        if token.is_empty() {
            return;
        }
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(token);
    }

    pub fn insert_all<I, S>(&mut self, category: &str, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for skill in skills {
            self.insert(category, skill.as_ref());
        }
    }

    /// All skills across categories as one lower-cased set
    pub fn flatten(&self) -> BTreeSet<String> {
        self.categories.values().flatten().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.values().all(|skills| skills.is_empty())
    }

    pub fn total_skills(&self) -> usize {
        self.flatten().len()
    }
}

/// Outcome of comparing resume skills against job skills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillMatchDetail {
    /// Skills present on both sides, sorted
    pub matched_skills: Vec<String>,
    /// Job skills absent from the resume, sorted
    pub missing_skills: Vec<String>,
    /// Resume skills the job does not ask for, sorted
    pub extra_skills: Vec<String>,
    pub skill_match_percentage: f32,
    pub total_job_skills: usize,
    pub total_resume_skills: usize,
}

/// Set comparison between two skill collections
pub struct SkillMatcher;

impl SkillMatcher {
    pub fn match_skills(resume_skills: &SkillCollection, job_skills: &SkillCollection) -> SkillMatchDetail {
        let resume_set = resume_skills.flatten();
        let job_set = job_skills.flatten();

        let matched_skills: Vec<String> = job_set.intersection(&resume_set).cloned().collect();
        let missing_skills: Vec<String> = job_set.difference(&resume_set).cloned().collect();
        let extra_skills: Vec<String> = resume_set.difference(&job_set).cloned().collect();

        // Guarded division: an empty job skill set scores 0, never faults.
        let skill_match_percentage =
            matched_skills.len() as f32 / job_set.len().max(1) as f32 * 100.0;

        SkillMatchDetail {
            matched_skills,
            missing_skills,
            extra_skills,
            skill_match_percentage,
            total_job_skills: job_set.len(),
            total_resume_skills: resume_set.len(),
        }
    }
}

/// Dictionary-based technical skill extractor.
///
/// Scans lowered text for a fixed catalogue of known skills per category, the
/// collaborator pass that supplies both sides' skill collections to the CLI.
pub struct SkillExtractor {
    catalogue: Vec<(&'static str, Vec<&'static str>)>,
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillExtractor {
    pub fn new() -> Self {
        let catalogue = vec![
            (
                "programming_languages",
                vec![
                    "python", "java", "c++", "javascript", "c#", "ruby", "swift", "php", "go",
                    "rust", "kotlin", "typescript", "scala",
                ],
            ),
            (
                "frameworks",
                vec![
                    "react", "angular", "vue", "django", "flask", "spring", "express",
                    "ruby on rails", "node.js", "laravel", "actix", "axum",
                ],
            ),
            (
                "databases",
                vec![
                    "mysql", "mongodb", "postgresql", "sqlite", "oracle", "redis",
                    "elasticsearch",
                ],
            ),
            (
                "cloud_platforms",
                vec![
                    "aws", "azure", "google cloud", "gcp", "docker", "kubernetes", "heroku",
                    "terraform",
                ],
            ),
            ("operating_systems", vec!["windows", "linux", "macos", "unix"]),
            (
                "tools",
                vec![
                    "git", "github", "jira", "jenkins", "maven", "gradle", "npm", "yarn",
                    "ansible", "kafka", "grafana",
                ],
            ),
        ];

        Self { catalogue }
    }

    /// Build a skill collection from raw text by substring containment
    pub fn extract(&self, text: &str) -> SkillCollection {
        let text_lower = text.to_lowercase();
        let mut collection = SkillCollection::new();

        for (category, skills) in &self.catalogue {
            for skill in skills {
                if text_lower.contains(skill) {
                    collection.insert(category, skill);
                }
            }
        }

        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_matching_scenario() {
        let mut resume = SkillCollection::new();
        resume.insert_all("frameworks", ["django", "react"]);

        let mut job = SkillCollection::new();
        job.insert_all("frameworks", ["django", "react"]);
        job.insert_all("cloud_platforms", ["aws"]);

        let detail = SkillMatcher::match_skills(&resume, &job);

        assert_eq!(detail.matched_skills, vec!["django", "react"]);
        assert_eq!(detail.missing_skills, vec!["aws"]);
        assert!(detail.extra_skills.is_empty());
        assert!((detail.skill_match_percentage - 66.6667).abs() < 0.01);
        assert_eq!(detail.total_job_skills, 3);
        assert_eq!(detail.total_resume_skills, 2);
    }

    #[test]
    fn test_empty_job_skills_score_zero() {
        let mut resume = SkillCollection::new();
        resume.insert("tools", "git");
        let job = SkillCollection::new();

        let detail = SkillMatcher::match_skills(&resume, &job);

        assert_eq!(detail.skill_match_percentage, 0.0);
        assert_eq!(detail.total_job_skills, 0);
        assert_eq!(detail.extra_skills, vec!["git"]);
    }

    #[test]
    fn test_empty_resume_skills_still_computes() {
        let resume = SkillCollection::new();
        let mut job = SkillCollection::new();
        job.insert_all("programming_languages", ["rust", "python"]);

        let detail = SkillMatcher::match_skills(&resume, &job);

        assert_eq!(detail.skill_match_percentage, 0.0);
        assert_eq!(detail.missing_skills, vec!["python", "rust"]);
    }

    #[test]
    fn test_percentage_bounds() {
        let mut resume = SkillCollection::new();
        resume.insert_all("tools", ["git", "jenkins", "jira"]);
        let mut job = SkillCollection::new();
        job.insert_all("tools", ["git", "jenkins", "jira"]);

        let detail = SkillMatcher::match_skills(&resume, &job);
        assert_eq!(detail.skill_match_percentage, 100.0);
    }

    #[test]
    fn test_skills_are_lowercased_and_deduplicated() {
        let mut collection = SkillCollection::new();
        collection.insert("tools", "Git");
        collection.insert("tools", "git");
        collection.insert("tools", " GIT ");

        assert_eq!(collection.total_skills(), 1);
        assert!(collection.flatten().contains("git"));
    }

    #[test]
    fn test_extractor_finds_categorized_skills() {
        let extractor = SkillExtractor::new();
        let text = "Senior engineer with Rust and PostgreSQL experience, deployed on AWS with Docker.";

        let skills = extractor.extract(text);
        let flat = skills.flatten();

        assert!(flat.contains("rust"));
        assert!(flat.contains("postgresql"));
        assert!(flat.contains("aws"));
        assert!(flat.contains("docker"));
    }

    #[test]
    fn test_extractor_empty_text() {
        let extractor = SkillExtractor::new();
        assert!(extractor.extract("").is_empty());
    }
}
