use super::identity::{normalize_id, AliasSet};
use crate::enums::RelationType;
use serde::{Deserialize, Serialize};

/// Target reference of a relation, as stored by the legacy back office.
///
/// Over the years the same concept was written under several field names;
/// every one of them is accepted on input and counts as an alias of the
/// target.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RelationTarget {
    #[serde(rename = "relatedHajiId", default, skip_serializing_if = "Option::is_none")]
    pub related_haji_id: Option<String>,

    #[serde(rename = "relatedUmrahId", default, skip_serializing_if = "Option::is_none")]
    pub related_umrah_id: Option<String>,

    #[serde(rename = "hajiId", default, skip_serializing_if = "Option::is_none")]
    pub haji_id: Option<String>,

    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,

    #[serde(rename = "customerId", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl RelationTarget {
    /// Target reference carrying a single store identifier
    pub fn from_id(id: &str) -> Self {
        Self {
            record_id: normalize_id(id),
            ..Default::default()
        }
    }

    /// All normalized identifiers under which this target is known
    pub fn alias_set(&self) -> AliasSet {
        let mut aliases = AliasSet::new();
        aliases.insert_opt(self.related_haji_id.as_deref());
        aliases.insert_opt(self.related_umrah_id.as_deref());
        aliases.insert_opt(self.haji_id.as_deref());
        aliases.insert_opt(self.record_id.as_deref());
        aliases.insert_opt(self.customer_id.as_deref());
        aliases
    }

    /// Preferred single identifier, in legacy field priority
    pub fn canonical_id(&self) -> Option<&str> {
        fn nonblank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }
        nonblank(self.related_haji_id.as_deref())
            .or_else(|| nonblank(self.related_umrah_id.as_deref()))
            .or_else(|| nonblank(self.haji_id.as_deref()))
            .or_else(|| nonblank(self.record_id.as_deref()))
            .or_else(|| nonblank(self.customer_id.as_deref()))
    }
}

/// One relation edge of a pilgrim record
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Relation {
    #[serde(flatten)]
    pub target: RelationTarget,

    /// Denormalized name snapshot taken when the relation was created
    #[serde(default, alias = "relatedName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Denormalized contact snapshot
    #[serde(default, alias = "phone", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    #[serde(rename = "relationType", default)]
    pub relation_type: RelationType,
}

/// A relation list entry as it arrives from the server.
///
/// Legacy lists mix bare target IDs with partial and full relation records;
/// normalization to [`Relation`] happens once at this boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RelationEntry {
    Id(String),
    Record(Relation),
}

impl RelationEntry {
    /// Normalize the entry into a full relation record
    pub fn into_record(self) -> Relation {
        match self {
            RelationEntry::Id(id) => Relation {
                target: RelationTarget::from_id(&id),
                ..Default::default()
            },
            RelationEntry::Record(relation) => relation,
        }
    }
}

/// Body of `POST /api/pilgrim/:id/relations`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRelationRequest {
    #[serde(rename = "relatedId")]
    pub related_id: String,
    #[serde(rename = "relationType")]
    pub relation_type: RelationType,
}
