//! Symbol normalization
//!
//! Rewrites characters the external converter leaves untouched (Greek
//! letters, a handful of accented Latin letters) and the converter artifacts
//! it gets wrong into LaTeX sequences that typeset correctly.
//!
//! The table is built once at startup and only read afterwards. Keys are
//! replaced as literal substrings, never as patterns.

use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

// ============================================================
// Built-in Table
// ============================================================

/// Greek letters, rendered in inline math
const GREEK: &[(&str, &str)] = &[
    ("α", r"$\alpha$"),
    ("β", r"$\beta$"),
    ("γ", r"$\gamma$"),
    ("δ", r"$\delta$"),
    ("ε", r"$\epsilon$"),
    ("ζ", r"$\zeta$"),
    ("η", r"$\eta$"),
    ("θ", r"$\theta$"),
    ("ι", r"$\iota$"),
    ("κ", r"$\kappa$"),
    ("λ", r"$\lambda$"),
    // MICRO SIGN (U+00B5), which Word inserts for "µm"
    ("µ", r"$\mu$"),
    ("μ", r"$\mu$"),
    ("ν", r"$\nu$"),
    ("ξ", r"$\xi$"),
    ("π", r"$\pi$"),
    ("ρ", r"$\rho$"),
    ("σ", r"$\sigma$"),
    ("τ", r"$\tau$"),
    ("υ", r"$\upsilon$"),
    ("φ", r"$\phi$"),
    ("χ", r"$\chi$"),
    ("ψ", r"$\psi$"),
    ("ω", r"$\omega$"),
];

/// Accented Latin letters
const LATIN_WITH_ACCENTS: &[(&str, &str)] = &[
    ("é", r"\'{e}"),
    ("è", r"\`{e}"),
    ("ü", r#"\"{u}"#),
    ("ä", r#"\"{a}"#),
    ("ö", r#"\"{o}"#),
];

/// Converter output that typesets wrongly.
///
/// `\textasciitilde{}` is the raised accent tilde; abstracts mean the
/// "approximately" sign.
const CONVERTER_FIXES: &[(&str, &str)] = &[(r"\textasciitilde{}", r"$\sim$")];

static BUILTIN: LazyLock<SymbolTable> = LazyLock::new(|| {
    let entries = GREEK
        .iter()
        .chain(LATIN_WITH_ACCENTS)
        .chain(CONVERTER_FIXES)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SymbolTable { entries }
});

// ============================================================
// Error Types
// ============================================================

/// Rejected symbol table entries
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolTableError {
    #[error("Symbol key must not be empty")]
    EmptyKey,

    #[error("Replacement for {key:?} contains the key {inner:?} and would be substituted twice")]
    Overlapping { key: String, inner: String },

    #[error("Key {inner:?} is part of the key {outer:?}")]
    NestedKey { inner: String, outer: String },

    #[error("Replacement for {key:?} can combine with adjacent text into the key {formed:?}")]
    Chained { key: String, formed: String },
}

// ============================================================
// Symbol Table
// ============================================================

/// Literal substring rewrites applied after the external converter ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    entries: BTreeMap<String, String>,
}

impl SymbolTable {
    /// The built-in table
    pub fn builtin() -> &'static SymbolTable {
        &BUILTIN
    }

    /// Built-in table extended with user entries (user entries win).
    ///
    /// Fails if applying the table twice could rewrite its own output: a
    /// replacement contains a key, starts or ends with part of a key, or one
    /// key contains another.
    pub fn with_extra<I, K, V>(extra: I) -> Result<Self, SymbolTableError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut entries = BUILTIN.entries.clone();
        for (key, value) in extra {
            let key = key.into();
            if key.is_empty() {
                return Err(SymbolTableError::EmptyKey);
            }
            entries.insert(key, value.into());
        }

        let table = SymbolTable { entries };
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), SymbolTableError> {
        for (key, value) in &self.entries {
            if let Some(inner) = self.entries.keys().find(|k| value.contains(k.as_str())) {
                return Err(SymbolTableError::Overlapping {
                    key: key.clone(),
                    inner: inner.clone(),
                });
            }
            if let Some(formed) = self.entries.keys().find(|k| borders(value, k)) {
                return Err(SymbolTableError::Chained {
                    key: key.clone(),
                    formed: formed.clone(),
                });
            }
        }

        for inner in self.entries.keys() {
            if let Some(outer) = self
                .entries
                .keys()
                .find(|outer| *outer != inner && outer.contains(inner.as_str()))
            {
                return Err(SymbolTableError::NestedKey {
                    inner: inner.clone(),
                    outer: outer.clone(),
                });
            }
        }
        Ok(())
    }

    /// Apply every entry as a literal replacement
    pub fn normalize(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (key, value) in &self.entries {
            if out.contains(key.as_str()) {
                out = out.replace(key.as_str(), value);
            }
        }
        out
    }

    /// Replacement for a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// `value` ends with a proper prefix of `key` or starts with a proper suffix
fn borders(value: &str, key: &str) -> bool {
    key.char_indices()
        .skip(1)
        .any(|(i, _)| value.ends_with(&key[..i]) || value.starts_with(&key[i..]))
}

impl Default for SymbolTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let table = SymbolTable::builtin();
        assert!(table.validate().is_ok());
        assert_eq!(table.len(), GREEK.len() + LATIN_WITH_ACCENTS.len() + CONVERTER_FIXES.len());
    }

    #[test]
    fn test_every_symbol_is_replaced() {
        let table = SymbolTable::builtin();
        for (key, value) in table.iter() {
            let text = format!("before {} after", key);
            let normalized = table.normalize(&text);
            assert!(normalized.contains(value), "{key} -> {normalized}");
            assert!(!normalized.contains(key), "{key} survived in {normalized}");
        }
    }

    #[test]
    fn test_normalize_mixed_text() {
        let table = SymbolTable::builtin();
        assert_eq!(
            table.normalize("5 µm of β-amyloid in Zürich, Müller"),
            r#"5 $\mu$m of $\beta$-amyloid in Z\"{u}rich, M\"{u}ller"#
        );
        assert_eq!(table.normalize(r"\textasciitilde{}40 nm"), r"$\sim$40 nm");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let table = SymbolTable::builtin();
        let once = table.normalize("α é \\textasciitilde{} ω plain");
        assert_eq!(table.normalize(&once), once);
    }

    #[test]
    fn test_normalize_leaves_plain_text() {
        let table = SymbolTable::builtin();
        assert_eq!(table.normalize("Plain ASCII & friends"), "Plain ASCII & friends");
        assert_eq!(table.normalize(""), "");
    }

    #[test]
    fn test_with_extra_adds_entries() {
        let table = SymbolTable::with_extra([("ℓ", r"$\ell$")]).unwrap();
        assert_eq!(table.get("ℓ"), Some(r"$\ell$"));
        assert_eq!(table.normalize("ℓ and α"), r"$\ell$ and $\alpha$");
    }

    #[test]
    fn test_with_extra_overrides_builtin() {
        let table = SymbolTable::with_extra([("é", "e")]).unwrap();
        assert_eq!(table.normalize("café"), "cafe");
    }

    #[test]
    fn test_with_extra_rejects_overlap() {
        let err = SymbolTable::with_extra([("x", "xx")]).unwrap_err();
        assert_eq!(
            err,
            SymbolTableError::Overlapping {
                key: "x".to_string(),
                inner: "x".to_string()
            }
        );

        // replacement would re-trigger a built-in key
        assert!(SymbolTable::with_extra([("~", "α")]).is_err());
    }

    #[test]
    fn test_with_extra_rejects_chained_keys() {
        // "xb" -> "ab" -> "Y" would need two passes
        assert_eq!(
            SymbolTable::with_extra([("x", "a"), ("ab", "Y")]).unwrap_err(),
            SymbolTableError::Chained {
                key: "x".to_string(),
                formed: "ab".to_string()
            }
        );
        // "bx" -> "ba" -> "Y"
        assert!(matches!(
            SymbolTable::with_extra([("x", "a"), ("ba", "Y")]),
            Err(SymbolTableError::Chained { .. })
        ));
        // replacement ending in the start of a built-in key
        assert!(matches!(
            SymbolTable::with_extra([("ℓ", r"	ext")]),
            Err(SymbolTableError::Chained { .. })
        ));
    }

    #[test]
    fn test_with_extra_rejects_nested_keys() {
        assert_eq!(
            SymbolTable::with_extra([("Q", "X"), ("ZQZ", "Y")]).unwrap_err(),
            SymbolTableError::NestedKey {
                inner: "Q".to_string(),
                outer: "ZQZ".to_string()
            }
        );
    }

    #[test]
    fn test_with_extra_rejects_empty_key() {
        assert_eq!(
            SymbolTable::with_extra([("", "x")]).unwrap_err(),
            SymbolTableError::EmptyKey
        );
    }
}
