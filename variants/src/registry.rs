//! Variant registry for front-end discovery.
//!
//! Each concrete yan85 variant self-registers via [`inventory::submit!`]
//! with a [`VariantEntry`] naming it and providing a factory function. The
//! `frontend` crate discovers available variants at runtime without a
//! central list it has to keep in sync.

use yan85_core::config::EncodingConfig;

/// Describes one named, ready-to-use [`EncodingConfig`].
pub struct VariantEntry {
    /// CLI/TOML name used to select this variant (e.g. `"default"`).
    pub name: &'static str,
    /// One-line description shown by `yan85 variants` listings.
    pub description: &'static str,
    /// Factory: build a fresh config. Variants are cheap to construct and
    /// have no shared state, so there's no reason to cache the result.
    pub build: fn() -> EncodingConfig,
}

impl VariantEntry {
    pub const fn new(name: &'static str, description: &'static str, build: fn() -> EncodingConfig) -> Self {
        Self { name, description, build }
    }
}

inventory::collect!(VariantEntry);

/// Return all registered variants, sorted by name.
pub fn all() -> Vec<&'static VariantEntry> {
    let mut entries: Vec<_> = inventory::iter::<VariantEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Look up a variant by its CLI/TOML name.
pub fn find(name: &str) -> Option<&'static VariantEntry> {
    inventory::iter::<VariantEntry>.into_iter().find(|e| e.name == name)
}
