//! Deterministic cache keys.
//!
//! A key is the SHA-256 of a request kind tag plus a sorted map of
//! `field name -> canonical bytes`. Field order in code does not matter,
//! every value is length-prefixed and type-tagged, and floats are hashed by
//! their IEEE bits (with `-0.0` folded into `0.0`), so equal requests always
//! agree and unequal ones practically never collide.

use press_core::CmykColor;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Hex digest naming a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    /// Uses a caller-chosen name instead of a digest.
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key as a file stem.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Collects request fields and hashes them into a [`CacheKey`].
///
/// ```rust
/// use press_assets::KeyBuilder;
///
/// let a = KeyBuilder::new("gradient").u32("width", 10).u32("height", 20).finish();
/// let b = KeyBuilder::new("gradient").u32("height", 20).u32("width", 10).finish();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 64);
/// ```
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    kind: &'static str,
    fields: BTreeMap<&'static str, Vec<u8>>,
}

impl KeyBuilder {
    /// Starts a key for a request of `kind`.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
        }
    }

    fn field(mut self, name: &'static str, tag: u8, bytes: &[u8]) -> Self {
        let mut value = Vec::with_capacity(bytes.len() + 1);
        value.push(tag);
        value.extend_from_slice(bytes);
        self.fields.insert(name, value);
        self
    }

    /// Adds an unsigned integer field.
    pub fn u32(self, name: &'static str, value: u32) -> Self {
        self.field(name, b'u', &value.to_le_bytes())
    }

    /// Adds a float field.
    pub fn f64(self, name: &'static str, value: f64) -> Self {
        self.field(name, b'f', &canonical_f64(value).to_le_bytes())
    }

    /// Adds a boolean field.
    pub fn bool(self, name: &'static str, value: bool) -> Self {
        self.field(name, b'b', &[value as u8])
    }

    /// Adds a string field.
    pub fn str(self, name: &'static str, value: &str) -> Self {
        self.field(name, b's', value.as_bytes())
    }

    /// Adds a path field (hashed as its string form, not its contents).
    pub fn path(self, name: &'static str, value: &Path) -> Self {
        self.field(name, b'p', value.to_string_lossy().as_bytes())
    }

    /// Adds an optional path field; `None` differs from every path.
    pub fn opt_path(self, name: &'static str, value: Option<&Path>) -> Self {
        match value {
            Some(p) => self.path(name, p),
            None => self.field(name, b'n', &[]),
        }
    }

    /// Adds a CMYK color field.
    pub fn color(self, name: &'static str, value: &CmykColor) -> Self {
        let bytes: Vec<u8> = value
            .channels()
            .iter()
            .flat_map(|&v| canonical_f64(v).to_le_bytes())
            .collect();
        self.field(name, b'c', &bytes)
    }

    /// Hashes everything into a lowercase hex key.
    pub fn finish(self) -> CacheKey {
        let mut hasher = Sha256::new();
        update_prefixed(&mut hasher, self.kind.as_bytes());
        for (name, value) in &self.fields {
            update_prefixed(&mut hasher, name.as_bytes());
            update_prefixed(&mut hasher, value);
        }
        CacheKey(format!("{:x}", hasher.finalize()))
    }
}

fn update_prefixed(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// IEEE bits with negative zero folded into positive zero.
fn canonical_f64(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = KeyBuilder::new("qr").str("payload", "hello").u32("size", 400).finish();
        let b = KeyBuilder::new("qr").str("payload", "hello").u32("size", 400).finish();
        assert_eq!(a, b);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_kind_and_values_matter() {
        let base = KeyBuilder::new("a").u32("x", 1).finish();
        assert_ne!(base, KeyBuilder::new("b").u32("x", 1).finish());
        assert_ne!(base, KeyBuilder::new("a").u32("x", 2).finish());
        assert_ne!(base, KeyBuilder::new("a").u32("y", 1).finish());
        // same bytes, different type
        assert_ne!(
            KeyBuilder::new("a").str("s", "1").finish(),
            KeyBuilder::new("a").path("s", Path::new("1")).finish()
        );
    }

    #[test]
    fn test_no_concatenation_ambiguity() {
        let a = KeyBuilder::new("a").str("x", "ab").str("y", "c").finish();
        let b = KeyBuilder::new("a").str("x", "a").str("y", "bc").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn test_negative_zero() {
        let a = KeyBuilder::new("v").f64("fade", 0.0).finish();
        let b = KeyBuilder::new("v").f64("fade", -0.0).finish();
        assert_eq!(a, b);
        assert_ne!(a, KeyBuilder::new("v").f64("fade", 0.1).finish());
    }

    #[test]
    fn test_optional_path() {
        let none = KeyBuilder::new("c").opt_path("profile", None).finish();
        let empty = KeyBuilder::new("c").opt_path("profile", Some(Path::new(""))).finish();
        assert_ne!(none, empty);
    }
}
