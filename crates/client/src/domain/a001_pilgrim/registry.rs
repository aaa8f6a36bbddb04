use async_trait::async_trait;
use contracts::domain::a001_pilgrim::identity::AliasSet;
use contracts::domain::a001_pilgrim::relation::{Relation, RelationEntry, RelationTarget};
use contracts::domain::a001_pilgrim::summary::PilgrimSummary;
use contracts::enums::RelationType;
use serde::Serialize;
use thiserror::Error;

use super::resolver::IdentityResolver;

// ============================================================================
// Remote store seam
// ============================================================================

/// The two operations the registry consumes from the remote relation store
#[async_trait]
pub trait RelationStore {
    async fn add_relation(
        &self,
        primary_id: &str,
        related_id: &str,
        relation_type: RelationType,
    ) -> anyhow::Result<()>;

    async fn remove_relation(&self, primary_id: &str, related_id: &str) -> anyhow::Result<()>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rejections raised locally, before any network call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a pilgrim cannot be linked to themselves")]
    SelfReference,
    #[error("this pilgrim is already linked")]
    AlreadyLinked,
    #[error("a pilgrim cannot be unlinked from themselves")]
    SelfRemoval,
    #[error("record has no usable identifier")]
    MissingIdentifier,
}

/// Failures surfaced by registry operations. Remote failures are reported
/// verbatim and never retried; a repeat requires an explicit user action.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("remote relation store failed: {0}")]
    Remote(#[source] anyhow::Error),
}

// ============================================================================
// Display projection
// ============================================================================

/// One relation entry annotated for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationView {
    #[serde(rename = "targetId")]
    pub target_id: Option<String>,
    pub name: String,
    pub mobile: Option<String>,
    #[serde(rename = "relationType")]
    pub relation_type: RelationType,
}

/// Placeholder name when a relation target cannot be resolved and the record
/// carries no denormalized snapshot either
pub const UNKNOWN_PILGRIM: &str = "unknown pilgrim";

// ============================================================================
// Relation Registry
// ============================================================================

/// In-memory relation list of one pilgrim detail view.
///
/// The list mirrors the server state as of the last fetch. `reseed` replaces
/// the working set wholesale on every reload of the owning record; successful
/// `add`/`remove` calls patch it optimistically until the next reload. There
/// is exactly one logical writer per view, and the mutating operations take
/// `&mut self`, so no further locking is involved.
pub struct RelationRegistry<S> {
    owner: PilgrimSummary,
    relations: Vec<Relation>,
    store: S,
}

impl<S: RelationStore> RelationRegistry<S> {
    /// Registry for one owning pilgrim, with an empty working set
    pub fn new(owner: PilgrimSummary, store: S) -> Self {
        Self {
            owner,
            relations: Vec::new(),
            store,
        }
    }

    /// Replace the working set with the authoritative server list.
    ///
    /// Full replacement, never a merge: anything added or removed since the
    /// previous reload only lived in memory and is overwritten here.
    pub fn reseed(&mut self, entries: Vec<RelationEntry>) {
        self.relations = entries.into_iter().map(RelationEntry::into_record).collect();
    }

    pub fn owner(&self) -> &PilgrimSummary {
        &self.owner
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Aliases of one entry's target, widened by resolution: an edge stored
    /// under a customer code must still collide with the same pilgrim queried
    /// by store ID.
    fn target_aliases(resolver: &IdentityResolver<'_>, relation: &Relation) -> AliasSet {
        let mut aliases = relation.target.alias_set();
        if let Some(hit) = resolver.resolve_aliases(&aliases) {
            aliases.extend(&hit.alias_set());
        }
        aliases
    }

    /// Current working set, each entry annotated with a resolved display name
    /// and contact number
    pub fn list(&self, resolver: &IdentityResolver<'_>) -> Vec<RelationView> {
        self.relations
            .iter()
            .map(|relation| {
                let resolved = resolver.resolve_target(&relation.target);
                let name = resolved
                    .and_then(|hit| hit.name.clone())
                    .or_else(|| relation.name.clone())
                    .unwrap_or_else(|| UNKNOWN_PILGRIM.to_string());
                let mobile = resolved
                    .and_then(|hit| hit.mobile.clone())
                    .or_else(|| relation.mobile.clone());
                RelationView {
                    target_id: relation.target.canonical_id().map(str::to_string),
                    name,
                    mobile,
                    relation_type: relation.relation_type,
                }
            })
            .collect()
    }

    /// Pre-check for enabling/disabling the add control per candidate.
    ///
    /// False when the candidate aliases the owner (self link) or aliases the
    /// resolved target of any existing entry (duplicate link). Evaluated
    /// before every remote add as well, so a duplicate slipping past an
    /// undebounced control is still rejected here.
    pub fn can_add(&self, resolver: &IdentityResolver<'_>, candidate: &PilgrimSummary) -> bool {
        self.check_add(resolver, candidate).is_ok()
    }

    fn check_add(
        &self,
        resolver: &IdentityResolver<'_>,
        candidate: &PilgrimSummary,
    ) -> Result<(), ValidationError> {
        let candidate_aliases = candidate.alias_set();
        if candidate_aliases.is_empty() {
            return Err(ValidationError::MissingIdentifier);
        }
        if candidate_aliases.intersects(&self.owner.alias_set()) {
            return Err(ValidationError::SelfReference);
        }
        let duplicate = self.relations.iter().any(|relation| {
            Self::target_aliases(resolver, relation).intersects(&candidate_aliases)
        });
        if duplicate {
            return Err(ValidationError::AlreadyLinked);
        }
        Ok(())
    }

    /// Link a candidate pilgrim to the owner.
    ///
    /// Validates first, then calls the remote store, then appends a locally
    /// synthesized record mirroring what the server now holds. On remote
    /// failure the working set is left untouched and the error is surfaced.
    pub async fn add(
        &mut self,
        resolver: &IdentityResolver<'_>,
        candidate: &PilgrimSummary,
        relation_type: RelationType,
    ) -> Result<(), RegistryError> {
        self.check_add(resolver, candidate)?;

        let primary_id = self
            .owner
            .canonical_id()
            .ok_or(ValidationError::MissingIdentifier)?
            .to_string();
        let related_id = candidate
            .canonical_id()
            .ok_or(ValidationError::MissingIdentifier)?
            .to_string();

        self.store
            .add_relation(&primary_id, &related_id, relation_type)
            .await
            .map_err(RegistryError::Remote)?;

        self.relations.push(Relation {
            target: RelationTarget::from_id(&related_id),
            name: candidate.name.clone(),
            mobile: candidate.mobile.clone(),
            relation_type,
        });
        Ok(())
    }

    /// Unlink a target from the owner.
    ///
    /// On success every entry aliasing the target is dropped; removing all
    /// matches (rather than the first) guarantees no orphaned duplicate
    /// survives a prior inconsistency. A target not present in the list is a
    /// successful no-op, not an error.
    pub async fn remove(
        &mut self,
        resolver: &IdentityResolver<'_>,
        target_id: &str,
    ) -> Result<(), RegistryError> {
        let mut removal_aliases = AliasSet::from_raw(target_id);
        if removal_aliases.is_empty() {
            return Err(ValidationError::MissingIdentifier.into());
        }
        if let Some(hit) = resolver.resolve_aliases(&removal_aliases) {
            removal_aliases.extend(&hit.alias_set());
        }
        if removal_aliases.intersects(&self.owner.alias_set()) {
            return Err(ValidationError::SelfRemoval.into());
        }

        let primary_id = self
            .owner
            .canonical_id()
            .ok_or(ValidationError::MissingIdentifier)?
            .to_string();

        self.store
            .remove_relation(&primary_id, target_id.trim())
            .await
            .map_err(RegistryError::Remote)?;

        self.relations
            .retain(|relation| !Self::target_aliases(resolver, relation).intersects(&removal_aliases));
        Ok(())
    }
}
