use std::collections::BTreeSet;

/// Normalize a raw identifier to its canonical string form.
///
/// Missing or blank values normalize to `None`, never to the empty string,
/// so two records without an identifier never spuriously match each other.
pub fn normalize_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The set of all normalized identifier strings that can refer to one record.
///
/// A pilgrim may be referred to by its store ID, its legacy store ID, or its
/// business customer code; a relation entry may carry the target under any of
/// the historical field names. Equality between two records for duplicate and
/// self checks is defined as: their alias sets intersect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasSet(BTreeSet<String>);

impl AliasSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias set containing exactly one raw identifier (if non-blank)
    pub fn from_raw(raw: &str) -> Self {
        let mut set = Self::new();
        set.insert_raw(raw);
        set
    }

    /// Insert a raw identifier, normalizing first; blanks are dropped
    pub fn insert_raw(&mut self, raw: &str) {
        if let Some(id) = normalize_id(raw) {
            self.0.insert(id);
        }
    }

    /// Insert an optional raw identifier
    pub fn insert_opt(&mut self, raw: Option<&str>) {
        if let Some(raw) = raw {
            self.insert_raw(raw);
        }
    }

    /// Merge all aliases of another set into this one
    pub fn extend(&mut self, other: &AliasSet) {
        for alias in &other.0 {
            self.0.insert(alias.clone());
        }
    }

    /// Whether the normalized form of `raw` is one of the aliases
    pub fn contains(&self, raw: &str) -> bool {
        match normalize_id(raw) {
            Some(id) => self.0.contains(&id),
            None => false,
        }
    }

    /// Whether the two sets share at least one alias
    pub fn intersects(&self, other: &AliasSet) -> bool {
        self.0.iter().any(|alias| other.0.contains(alias))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.as_str())
    }
}
