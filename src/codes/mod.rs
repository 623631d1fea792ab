//! Code-list matching
//!
//! Three matcher kinds back every clinical lookup: exact code sets, prefix
//! pattern families and medication name fragments. Pattern families are
//! compiled once and indexed by their leading literal byte so a code is only
//! tested against patterns that could match it.

pub mod book;
pub mod tables;

pub use book::{CodeBook, CodeOverrides};

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::error::{FeatureError, Result};

/// Anything that can decide whether a code (or name) belongs to a category
pub trait CodeMatcher {
    /// Whether `code` belongs to the category
    fn matches(&self, code: &str) -> bool;

    /// Whether any of `codes` belongs to the category
    fn matches_any<'a, I>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
        Self: Sized,
    {
        codes.into_iter().any(|code| self.matches(code))
    }
}

/// Exact-membership code list
#[derive(Debug, Clone, Default)]
pub struct CodeSet {
    codes: FxHashSet<String>,
}

impl CodeSet {
    #[must_use]
    pub fn new<S: AsRef<str>>(codes: &[S]) -> Self {
        Self {
            codes: codes.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl CodeMatcher for CodeSet {
    fn matches(&self, code: &str) -> bool {
        self.contains(code)
    }
}

/// Family of regular expressions matched at the start of a code
///
/// A pattern matches when it matches a prefix of the code; the rest of the
/// code is unconstrained. Several families may match the same code.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<Regex>,
    by_lead: FxHashMap<u8, SmallVec<[usize; 8]>>,
    any_lead: SmallVec<[usize; 4]>,
}

impl PatternSet {
    /// Compile a pattern family
    ///
    /// # Errors
    /// Returns `InvalidPattern` naming the list and pattern when a pattern fails to compile
    pub fn compile<S: AsRef<str>>(list: &str, patterns: &[S]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        let mut by_lead: FxHashMap<u8, SmallVec<[usize; 8]>> = FxHashMap::default();
        let mut any_lead = SmallVec::new();

        for (idx, pattern) in patterns.iter().enumerate() {
            let pattern = pattern.as_ref();
            let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|e| {
                FeatureError::InvalidPattern {
                    list: list.to_string(),
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                }
            })?;
            compiled.push(regex);

            match literal_lead(pattern) {
                Some(lead) => by_lead.entry(lead).or_default().push(idx),
                None => any_lead.push(idx),
            }
        }

        Ok(Self {
            patterns: compiled,
            by_lead,
            any_lead,
        })
    }

    /// Indices of every pattern matching the start of `code`
    #[must_use]
    pub fn matching_patterns(&self, code: &str) -> Vec<usize> {
        let mut hits: Vec<usize> = self
            .candidates(code)
            .filter(|&idx| self.patterns[idx].is_match(code))
            .collect();
        hits.sort_unstable();
        hits
    }

    fn candidates<'a>(&'a self, code: &str) -> impl Iterator<Item = usize> + 'a {
        let keyed = code
            .as_bytes()
            .first()
            .and_then(|lead| self.by_lead.get(lead))
            .map(|indices| indices.as_slice())
            .unwrap_or_default();
        keyed.iter().chain(self.any_lead.iter()).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl CodeMatcher for PatternSet {
    fn matches(&self, code: &str) -> bool {
        self.candidates(code)
            .any(|idx| self.patterns[idx].is_match(code))
    }
}

/// First byte every match of `pattern` must start with, if it is a plain literal
fn literal_lead(pattern: &str) -> Option<u8> {
    const META: &[u8] = b".[]()\\^$|?*+{}";
    let bytes = pattern.as_bytes();
    let lead = *bytes.first()?;
    if META.contains(&lead) || pattern.contains('|') {
        return None;
    }
    // a quantifier on the first literal makes it optional
    if matches!(bytes.get(1), Some(b'?' | b'*' | b'{')) {
        return None;
    }
    Some(lead)
}

/// Case-sensitive name fragments matched anywhere in free text
#[derive(Debug, Clone, Default)]
pub struct NameList {
    names: Vec<String>,
}

impl NameList {
    #[must_use]
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
        }
    }
}

impl CodeMatcher for NameList {
    fn matches(&self, text: &str) -> bool {
        self.names.iter().any(|name| text.contains(name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_set_is_exact() {
        let set = CodeSet::new(&["410.71", "I21.4"]);
        assert!(set.matches("I21.4"));
        assert!(!set.matches("I21.41"));
        assert!(!set.matches("i21.4"));
    }

    #[test]
    fn test_patterns_match_prefix_only() {
        let set = PatternSet::compile("renal", tables::RENAL_PATTERNS).unwrap();
        assert!(set.matches("585.9"));
        assert!(set.matches("N17.0"));
        assert!(set.matches("N17"));
        assert!(!set.matches("X585.9"));
        assert!(!set.matches("N18"));
    }

    #[test]
    fn test_pattern_without_wildcard_still_prefix_matches() {
        let set = PatternSet::compile("hemiplegia", tables::HEMIPLEGIA_PATTERNS).unwrap();
        assert!(set.matches("344.1"));
        assert!(set.matches("344.10"));
        assert!(!set.matches("344.2"));
    }

    #[test]
    fn test_several_patterns_may_match() {
        let set = PatternSet::compile("test", &[r"I2.\..*", r"I21\..*", r"410\..*"]).unwrap();
        assert_eq!(set.matching_patterns("I21.4"), vec![0, 1]);
        assert!(set.matching_patterns("I50.1").is_empty());
    }

    #[test]
    fn test_alternation_is_not_indexed_by_lead() {
        let set = PatternSet::compile("alt", &["A1|B2"]).unwrap();
        assert!(set.matches("A1"));
        assert!(set.matches("B2.3"));
    }

    #[test]
    fn test_invalid_pattern_names_list() {
        let err = PatternSet::compile("broken", &["(unclosed"]).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_name_list_matches_substrings() {
        let names = NameList::new(&["Metoprolol", "aspirin"]);
        assert!(names.matches("Metoprolol Tartrate 25 MG PO TABS"));
        assert!(names.matches("aspirin 81 mg chewable"));
        assert!(!names.matches("ASPIRIN 81 MG"));
    }
}
