//! Skill vocabulary and extraction.
//!
//! The vocabulary is an ordered set of canonical skill terms. Each term is compiled
//! into a case-insensitive, word-bounded pattern once, when the vocabulary is built.
//! `extract` never recompiles anything and never fails.

use std::path::Path;

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Built-in vocabulary. Order here is the display order of every derived skill list.
pub const DEFAULT_SKILLS: &[&str] = &[
    "react",
    "node",
    "node.js",
    "typescript",
    "javascript",
    "python",
    "java",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "graphql",
    "sql",
    "nosql",
    "mongodb",
    "postgres",
    "mysql",
    "rest",
    "api",
    "microservices",
    "cicd",
    "ci/cd",
    "git",
    "agile",
    "scrum",
    "html",
    "css",
    "sass",
    "tailwind",
    "redux",
    "vue",
    "angular",
    "next.js",
    "express",
    "redis",
    "elasticsearch",
    "kafka",
    "machine learning",
    "ml",
    "ai",
    "data science",
    "testing",
    "jest",
    "cypress",
    "selenium",
];

/// Vocabulary terms found in a text, deduplicated, in vocabulary order.
pub type SkillSet = Vec<String>;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("invalid pattern for skill term '{term}': {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
struct SkillPattern {
    term: String,
    regex: Regex,
}

/// Immutable, ordered skill vocabulary with precompiled term patterns.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    patterns: Vec<SkillPattern>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from raw terms.
    ///
    /// Terms are trimmed and lowercased. Blank terms and repeats of an earlier term
    /// are dropped, so the first occurrence fixes a term's position.
    pub fn new<I, S>(terms: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut patterns: Vec<SkillPattern> = Vec::new();

        for raw in terms {
            let term = raw.as_ref().trim().to_lowercase();
            if term.is_empty() || patterns.iter().any(|p| p.term == term) {
                continue;
            }
            let regex = compile_term(&term)?;
            patterns.push(SkillPattern { term, regex });
        }

        Ok(Self { patterns })
    }

    pub fn builtin() -> Result<Self, VocabularyError> {
        Self::new(DEFAULT_SKILLS)
    }

    /// Loads a vocabulary file: one term per line, `#` comments and blank lines ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill vocabulary at {}", path.display()))?;

        let vocabulary = Self::new(parse_vocabulary_lines(&contents))
            .with_context(|| format!("Invalid skill vocabulary at {}", path.display()))?;

        Ok(vocabulary)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.term.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns every vocabulary term present in `text`, in vocabulary order.
    pub fn extract(&self, text: &str) -> SkillSet {
        if text.trim().is_empty() {
            return SkillSet::new();
        }

        self.patterns
            .iter()
            .filter(|p| p.regex.is_match(text))
            .map(|p| p.term.clone())
            .collect()
    }
}

fn parse_vocabulary_lines(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

const ASCII_BOUNDARY: &str = r"(?-u:\b)";

/// Compiles a literal term into a word-bounded, case-insensitive pattern.
///
/// Boundaries are ASCII word boundaries, so a term written flush against non-ASCII
/// letters (e.g. CJK text with no spaces) still matches. An anchor is only placed on
/// an edge whose character is an ASCII word character; next to punctuation it would
/// demand a word character on the far side.
fn compile_term(term: &str) -> Result<Regex, VocabularyError> {
    let starts_with_word = term.chars().next().is_some_and(is_word_char);
    let ends_with_word = term.chars().last().is_some_and(is_word_char);

    let pattern = format!(
        "{}{}{}",
        if starts_with_word { ASCII_BOUNDARY } else { "" },
        regex::escape(term),
        if ends_with_word { ASCII_BOUNDARY } else { "" },
    );

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| VocabularyError::Pattern {
            term: term.to_string(),
            source,
        })
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
