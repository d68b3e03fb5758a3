//! Skill vocabulary — the fixed table of recognized technical terms plus the
//! stopword list applied during tokenization.
//!
//! Built once at startup and shared read-only through `AppState`.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// Built-in technical skills, grouped the way they are usually listed on a resume.
const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "python",
    "java",
    "javascript",
    "c++",
    "c#",
    "ruby",
    "php",
    "swift",
    "kotlin",
    // Web
    "html",
    "css",
    "react",
    "angular",
    "vue",
    "django",
    "flask",
    "node.js",
    // Databases
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "redis",
    "oracle",
    // Data science
    "machine learning",
    "deep learning",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "pandas",
    "numpy",
    "matplotlib",
    "seaborn",
    // DevOps
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "terraform",
    "jenkins",
    // Other
    "git",
    "linux",
    "rest api",
    "graphql",
];

/// Standard English stopwords (NLTK `english` corpus).
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Resume filler words that never carry a skill on their own.
const CUSTOM_STOPWORDS: &[&str] = &[
    "experience",
    "work",
    "project",
    "using",
    "skill",
    "skills",
    "ability",
    "strong",
];

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read skills file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("skills file {0} contains no skills")]
    Empty(PathBuf),
}

/// Immutable skill vocabulary with its stopword list.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    skills: BTreeSet<String>,
    stopwords: HashSet<&'static str>,
    max_phrase_words: usize,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::from_skills(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    /// Builds a vocabulary from arbitrary terms. Terms are lower-cased with
    /// runs of whitespace collapsed; blanks are ignored. Terms the tokenizer
    /// can never produce are kept but logged.
    pub fn from_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills: BTreeSet<String> = skills
            .into_iter()
            .map(|s| normalize_term(s.as_ref()))
            .filter(|s| !s.is_empty())
            .inspect(|s| {
                if !is_matchable(s) {
                    warn!("Skill '{s}' contains characters outside a-z 0-9 + # . _ - and will never match");
                }
            })
            .collect();

        let max_phrase_words = skills
            .iter()
            .map(|s| s.split_whitespace().count())
            .max()
            .unwrap_or(1);

        let stopwords = ENGLISH_STOPWORDS
            .iter()
            .chain(CUSTOM_STOPWORDS)
            .copied()
            .collect();

        Self {
            skills,
            stopwords,
            max_phrase_words,
        }
    }

    /// Loads a newline-delimited skills file. `#` starts a comment line.
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let vocabulary = Self::from_skills(
            raw.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );

        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty(path.to_path_buf()));
        }
        Ok(vocabulary)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.skills.contains(term)
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Word count of the longest entry (1 when every entry is a single word).
    pub fn max_phrase_words(&self) -> usize {
        self.max_phrase_words
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }
}

/// Lower-cases a term and collapses internal whitespace to single spaces.
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when every word of a normalized term is something the tokenizer emits:
/// starts with a letter or digit, uses only `a-z 0-9 + # . _ -`, and does not
/// end in `.`, `_` or `-`.
pub fn is_matchable(term: &str) -> bool {
    term.split(' ').all(|word| {
        let starts_ok = word
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        let body_ok = word.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '#' | '.' | '_' | '-')
        });
        starts_ok && body_ok && !word.ends_with(['.', '_', '-'])
    })
}
