use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;

use crate::normalize::normalize;

lazy_static! {
    /// Misspellings and brand-name variants observed in real rental queries.
    /// Loaded once at startup, read-only afterwards.
    pub static ref DEFAULT_CORRECTIONS: CorrectionTable = CorrectionTable::from_pairs(&[
        ("betoneria", "betoneira"),
        ("betonera", "betoneira"),
        ("bitoneira", "betoneira"),
        ("andame", "andaime"),
        ("fachadero", "fachadeiro"),
        ("jerador", "gerador"),
        ("guerador", "gerador"),
        ("compactadeira", "compactador"),
        ("esmerilhadera", "esmerilhadeira"),
        ("maquita", "makita"),
        ("bosh", "bosch"),
        ("karsher", "karcher"),
        ("carcher", "karcher"),
        ("bob cat", "bobcat"),
        ("vibrador concreto", "vibrador de concreto"),
    ])
    .expect("default table is valid");
}

/// Ordered mapping from a known misspelling (normalized) to its canonical
/// form (normalized). Lookup is total: tokens absent from the table pass
/// through unchanged. A canonical form is never itself a key.
#[derive(Debug, Clone, Default)]
pub struct CorrectionTable {
    // Multi-word keys, applied on token boundaries in insertion order,
    // before single-token substitution.
    phrases: Vec<(String, String)>,
    singles: HashMap<String, String>,
}

impl CorrectionTable {
    /// Build a table from (misspelling, canonical) pairs. Both sides are
    /// normalized. Fails on empty keys, duplicate keys, or any canonical
    /// form that is itself a key (the table must not chain).
    pub fn from_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> Result<Self> {
        let mut table = Self::default();
        let mut keys: Vec<(String, String)> = Vec::with_capacity(pairs.len());
        for (k, v) in pairs {
            let key = normalize(k.as_ref());
            let value = normalize(v.as_ref());
            if key.is_empty() {
                bail!("correction key {:?} normalizes to nothing", k.as_ref());
            }
            if keys.iter().any(|(existing, _)| *existing == key) {
                bail!("duplicate correction key {key:?}");
            }
            keys.push((key, value));
        }
        for (key, value) in &keys {
            if keys.iter().any(|(k, _)| k == value) {
                bail!("canonical form {value:?} is itself corrected; corrections must not chain");
            }
            if key.contains(' ') {
                table.phrases.push((key.clone(), value.clone()));
            } else {
                table.singles.insert(key.clone(), value.clone());
            }
        }
        Ok(table)
    }

    /// Load a table from a JSON object of misspelling -> canonical entries.
    /// Keys are applied in sorted order for determinism.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, String> =
            serde_json::from_str(json).context("parsing corrections JSON")?;
        let mut pairs: Vec<(String, String)> = raw.into_iter().collect();
        pairs.sort();
        Self::from_pairs(&pairs)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading corrections table {}", path.as_ref().display()))?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.phrases.len() + self.singles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalize the input, then substitute known misspellings: multi-word
    /// phrases first, then exact whole-token matches. Token order is
    /// preserved and unknown tokens pass through.
    pub fn correct(&self, text: &str) -> String {
        let mut s = normalize(text);
        for (phrase, canonical) in &self.phrases {
            s = replace_phrase(&s, phrase, canonical);
        }
        if self.singles.is_empty() || s.is_empty() {
            return s;
        }
        s.split(' ')
            .map(|t| self.singles.get(t).map(String::as_str).unwrap_or(t))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// Replace `phrase` with `canonical` wherever it occurs on token boundaries.
// Both arguments and `text` are normalized, so a boundary is the string edge
// or a single ASCII space.
fn replace_phrase(text: &str, phrase: &str, canonical: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(phrase) {
        let end = pos + phrase.len();
        let at_start = pos == 0 || rest.as_bytes()[pos - 1] == b' ';
        let at_end = end == rest.len() || rest.as_bytes()[end] == b' ';
        out.push_str(&rest[..pos]);
        if at_start && at_end {
            out.push_str(canonical);
        } else {
            out.push_str(phrase);
        }
        rest = &rest[end..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tokens_pass_through() {
        let table = CorrectionTable::from_pairs(&[("betoneria", "betoneira")]).unwrap();
        assert_eq!(table.correct("furadeira de impacto"), "furadeira de impacto");
    }

    #[test]
    fn corrects_case_and_accent_variants_of_keys() {
        let table = CorrectionTable::from_pairs(&[("betoneria", "betoneira")]).unwrap();
        assert_eq!(table.correct("Betonéria 400L"), "betoneira 400l");
    }

    #[test]
    fn preserves_token_order() {
        let table = DEFAULT_CORRECTIONS.clone();
        assert_eq!(table.correct("alugar jerador barato"), "alugar gerador barato");
    }

    #[test]
    fn applies_multi_word_phrases_on_boundaries() {
        let table = DEFAULT_CORRECTIONS.clone();
        assert_eq!(table.correct("mini Bob Cat usada"), "mini bobcat usada");
        // "concreto" inside a longer token must not trigger the phrase.
        assert_eq!(table.correct("vibrador concretova"), "vibrador concretova");
    }

    #[test]
    fn rejects_chained_corrections() {
        assert!(CorrectionTable::from_pairs(&[("a", "b"), ("b", "c")]).is_err());
        assert!(CorrectionTable::from_pairs(&[("a", "a")]).is_err());
    }

    #[test]
    fn rejects_empty_and_duplicate_keys() {
        assert!(CorrectionTable::from_pairs(&[("  ", "x")]).is_err());
        assert!(CorrectionTable::from_pairs(&[("a", "x"), ("A", "y")]).is_err());
    }

    #[test]
    fn loads_from_json() {
        let table = CorrectionTable::from_json_str(r#"{"betoneria": "betoneira"}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.correct("betoneria"), "betoneira");
        assert!(CorrectionTable::from_json_str("not json").is_err());
    }

    #[test]
    fn default_table_is_valid() {
        assert!(!DEFAULT_CORRECTIONS.is_empty());
    }
}
