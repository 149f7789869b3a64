//! Skills extraction — dictionary lookup against a fixed catalog.
//!
//! Each catalog entry compiles once into a whole-word matcher over lowercased text. Entry
//! text is regex-escaped, so "C++", "Node.js" and "CI/CD" match literally. Word boundaries
//! are only asserted on sides where the entry starts or ends with a word character.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

const BUILTIN_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "Java", "JavaScript", "TypeScript", "C++", "C#", "C", "Ruby", "PHP",
    "Swift", "Kotlin", "Go", "Rust", "Scala", "R", "MATLAB", "Perl",
    // Web technologies
    "HTML", "CSS", "React", "Angular", "Vue.js", "Node.js", "Django", "Flask",
    "FastAPI", "Spring", "Express.js", "Next.js", "Bootstrap", "Tailwind CSS",
    // Databases
    "SQL", "MySQL", "PostgreSQL", "MongoDB", "Oracle", "Redis", "SQLite",
    "Cassandra", "DynamoDB", "Firebase",
    // DevOps and tooling
    "Git", "Docker", "Kubernetes", "Jenkins", "AWS", "Azure", "GCP",
    "Linux", "CI/CD", "Terraform", "Ansible",
    // Data science and ML
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Keras",
    "Pandas", "NumPy", "Scikit-learn", "NLP", "Computer Vision",
    // Other
    "REST API", "GraphQL", "Microservices", "Agile", "Scrum", "JIRA",
    "Excel", "Power BI", "Tableau", "Figma", "Photoshop",
];

static BUILTIN_CATALOG: Lazy<Arc<SkillsCatalog>> = Lazy::new(|| {
    Arc::new(
        SkillsCatalog::from_entries(BUILTIN_SKILLS.iter().copied())
            .expect("built-in skills compile to valid patterns"),
    )
});

#[derive(Debug)]
struct CatalogSkill {
    name: String,
    matcher: Regex,
}

/// Immutable set of known skill names. Built once at startup and shared read-only.
#[derive(Debug)]
pub struct SkillsCatalog {
    skills: Vec<CatalogSkill>,
}

impl SkillsCatalog {
    /// The process-wide default catalog.
    pub fn builtin() -> Arc<SkillsCatalog> {
        Arc::clone(&BUILTIN_CATALOG)
    }

    /// Compiles a catalog from canonical skill names. Blank and repeated names are skipped.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut skills = Vec::new();

        for entry in entries {
            let name = entry.trim();
            if name.is_empty() || !seen.insert(name.to_string()) {
                continue;
            }
            let matcher = Regex::new(&whole_word_pattern(name))
                .with_context(|| format!("Skill '{name}' does not compile to a pattern"))?;
            skills.push(CatalogSkill {
                name: name.to_string(),
                matcher,
            });
        }

        Ok(Self { skills })
    }

    /// Loads a newline-delimited catalog file. `#` lines are comments.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skills catalog {}", path.display()))?;

        let catalog = Self::from_entries(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )?;
        if catalog.is_empty() {
            bail!("Skills catalog {} has no entries", path.display());
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

fn whole_word_pattern(name: &str) -> String {
    let lowered = name.to_lowercase();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let mut pattern = String::new();
    if lowered.starts_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(&lowered));
    if lowered.ends_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Returns every catalog skill mentioned in `text`, alphabetically sorted, without duplicates.
pub fn extract_skills(text: &str, catalog: &SkillsCatalog) -> Vec<String> {
    let lowered = text.to_lowercase();

    let mut found: Vec<String> = catalog
        .skills
        .iter()
        .filter(|skill| skill.matcher.is_match(&lowered))
        .map(|skill| skill.name.clone())
        .collect();

    found.sort();
    found.dedup();
    found
}
