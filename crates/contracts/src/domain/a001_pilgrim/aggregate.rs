use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::PilgrimType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::AliasSet;
use super::relation::{Relation, RelationEntry};
use super::summary::PilgrimSummary;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PilgrimId(pub Uuid);

impl PilgrimId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for PilgrimId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PilgrimId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pilgrim {
    #[serde(flatten)]
    pub base: BaseAggregate<PilgrimId>,

    #[serde(rename = "pilgrimType", default)]
    pub pilgrim_type: PilgrimType,

    #[serde(default)]
    pub mobile: String,

    #[serde(rename = "passportNo", default)]
    pub passport_no: String,

    /// Identifier assigned by the legacy back office, kept on imported records
    #[serde(rename = "legacyId", default)]
    pub legacy_id: Option<String>,

    /// Family relation edges owned by this record
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Pilgrim {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        description: String,
        pilgrim_type: PilgrimType,
        mobile: String,
        passport_no: String,
        legacy_id: Option<String>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(PilgrimId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            pilgrim_type,
            mobile,
            passport_no,
            legacy_id,
            relations: Vec::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn update(&mut self, dto: &PilgrimDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.pilgrim_type = dto.pilgrim_type;
        self.mobile = dto.mobile.clone().unwrap_or_default();
        self.passport_no = dto.passport_no.clone().unwrap_or_default();
        self.legacy_id = dto.legacy_id.clone();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Name must not be empty".into());
        }
        if self.base.code.trim().is_empty() {
            return Err("Customer code must not be empty".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }

    /// All normalized identifiers that refer to this pilgrim
    pub fn alias_set(&self) -> AliasSet {
        let mut aliases = AliasSet::new();
        aliases.insert_raw(&self.base.id.as_string());
        aliases.insert_opt(self.legacy_id.as_deref());
        aliases.insert_raw(&self.base.code);
        aliases
    }

    /// Legacy wire shape for pickers and candidate lists
    pub fn to_summary(&self) -> PilgrimSummary {
        PilgrimSummary {
            id: Some(self.base.id.as_string()),
            legacy_id: self.legacy_id.clone(),
            customer_id: Some(self.base.code.clone()),
            name: Some(self.base.description.clone()),
            mobile: if self.mobile.trim().is_empty() {
                None
            } else {
                Some(self.mobile.clone())
            },
        }
    }

    /// Legacy wire shape of the detail record, relation list included
    pub fn to_details(&self) -> PilgrimDetails {
        PilgrimDetails {
            summary: self.to_summary(),
            pilgrim_type: self.pilgrim_type,
            passport_no: self.passport_no.clone(),
            relations: self
                .relations
                .iter()
                .cloned()
                .map(RelationEntry::Record)
                .collect(),
        }
    }
}

impl AggregateRoot for Pilgrim {
    type Id = PilgrimId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PilgrimDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    #[serde(rename = "pilgrimType", default)]
    pub pilgrim_type: PilgrimType,
    pub mobile: Option<String>,
    #[serde(rename = "passportNo")]
    pub passport_no: Option<String>,
    #[serde(rename = "legacyId")]
    pub legacy_id: Option<String>,
    pub comment: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Detail record as served to the client: the authoritative relation list a
/// detail view reseeds its registry from on every load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilgrimDetails {
    #[serde(flatten)]
    pub summary: PilgrimSummary,

    #[serde(rename = "pilgrimType", default)]
    pub pilgrim_type: PilgrimType,

    #[serde(rename = "passportNo", default)]
    pub passport_no: String,

    #[serde(default)]
    pub relations: Vec<RelationEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_set_spans_all_identifiers() {
        let mut pilgrim = Pilgrim::new_for_insert(
            "C100".into(),
            "Karim".into(),
            PilgrimType::Hajj,
            "01712".into(),
            "BA123".into(),
            Some("H-55".into()),
            None,
        );
        pilgrim.before_write();

        let aliases = pilgrim.alias_set();
        assert!(aliases.contains(&pilgrim.to_string_id()));
        assert!(aliases.contains("H-55"));
        assert!(aliases.contains("C100"));
    }

    #[test]
    fn test_summary_round_trips_through_legacy_wire_shape() {
        let pilgrim = Pilgrim::new_for_insert(
            "C100".into(),
            "Karim".into(),
            PilgrimType::Umrah,
            "01712".into(),
            String::new(),
            None,
            None,
        );
        let json = serde_json::to_string(&pilgrim.to_summary()).unwrap();
        let parsed: PilgrimSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id.as_deref(), Some(pilgrim.to_string_id().as_str()));
        assert_eq!(parsed.customer_id.as_deref(), Some("C100"));
        assert_eq!(parsed.name.as_deref(), Some("Karim"));
    }
}
