//! Skill extraction — tokenizes resume text and keeps the tokens (and short
//! phrases) that appear in the skill vocabulary.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::analysis::vocabulary::{normalize_term, SkillVocabulary};

/// Deduplicated, alphabetically ordered set of canonical skill names.
pub type SkillSet = BTreeSet<String>;

/// Tokens shorter than this never count as a single-word skill.
const MIN_TOKEN_CHARS: usize = 3;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // A word may carry in-word symbols: c++, c#, node.js, scikit-learn.
    PATTERN.get_or_init(|| Regex::new(r"[a-z0-9][a-z0-9+#._-]*").expect("valid token regex"))
}

/// Punctuation between two words that ends a phrase.
const PHRASE_BREAKS: &[char] = &['.', ',', ';', ':', '!', '?', '\n'];

/// Lower-cases `text` and splits it into word tokens, trimming trailing
/// sentence punctuation.
pub fn tokenize(text: &str) -> Vec<String> {
    phrase_segments(text).into_iter().flatten().collect()
}

/// Tokens grouped into runs that contain no sentence or clause break, so a
/// phrase never spans "machine. Learning".
pub fn phrase_segments(text: &str) -> Vec<Vec<String>> {
    let lowered = text.to_lowercase();
    let mut segments = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut last_end = 0;

    for m in token_pattern().find_iter(&lowered) {
        if lowered[last_end..m.start()].contains(PHRASE_BREAKS) && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
        last_end = m.end();

        let raw = m.as_str();
        let token = raw.trim_end_matches(['.', '_', '-']);
        if !token.is_empty() {
            current.push(token.to_string());
        }
        // "python." closes the sentence it ends
        if raw.ends_with('.') && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Extracts the vocabulary skills mentioned in `text`.
///
/// Single tokens must contain a letter, must not be a stopword and must be
/// longer than two characters. Multi-word vocabulary entries are matched on
/// consecutive tokens of the unfiltered stream, never across punctuation.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    let segments = phrase_segments(text);
    let mut skills = SkillSet::new();

    for token in segments.iter().flatten() {
        if is_candidate(token, vocabulary) && vocabulary.contains(token) {
            skills.insert(token.clone());
        }
    }

    for segment in &segments {
        for width in 2..=vocabulary.max_phrase_words() {
            for window in segment.windows(width) {
                let phrase = window.join(" ");
                if vocabulary.contains(&phrase) {
                    skills.insert(phrase);
                }
            }
        }
    }

    skills
}

/// Normalizes caller-supplied skill names against the vocabulary, dropping
/// anything it does not recognize.
pub fn normalize_skills<I, S>(skills: I, vocabulary: &SkillVocabulary) -> SkillSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|s| normalize_term(s.as_ref()))
        .filter(|s| vocabulary.contains(s))
        .collect()
}

fn is_candidate(token: &str, vocabulary: &SkillVocabulary) -> bool {
    token.chars().any(char::is_alphabetic)
        && token.chars().count() >= MIN_TOKEN_CHARS
        && !vocabulary.is_stopword(token)
}
