use super::identity::AliasSet;
use serde::{Deserialize, Serialize};

/// Wire/picker shape of a pilgrim record.
///
/// This is the heterogeneous form the legacy back office exchanged: every
/// identifier field is optional and may arrive under one of several historical
/// spellings. The resolver and the relation registry operate on this shape.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PilgrimSummary {
    /// Store identifier
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Identifier assigned by the legacy back office, kept on imported records
    #[serde(rename = "hajiId", alias = "legacyId", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<String>,

    /// Business-facing customer code
    #[serde(rename = "customerId", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, alias = "phone", skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl PilgrimSummary {
    /// All normalized identifiers that refer to this pilgrim
    pub fn alias_set(&self) -> AliasSet {
        let mut aliases = AliasSet::new();
        aliases.insert_opt(self.id.as_deref());
        aliases.insert_opt(self.legacy_id.as_deref());
        aliases.insert_opt(self.customer_id.as_deref());
        aliases
    }

    /// Preferred single identifier: store ID, then legacy ID, then customer code.
    /// Blank fields are skipped, not returned as empty matches.
    pub fn canonical_id(&self) -> Option<&str> {
        fn nonblank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }
        nonblank(self.id.as_deref())
            .or_else(|| nonblank(self.legacy_id.as_deref()))
            .or_else(|| nonblank(self.customer_id.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_legacy_field_names() {
        let json = r#"{"_id":"64fa0c","hajiId":"H-55","customerId":"C100","name":"Karim","phone":"01712"}"#;
        let summary: PilgrimSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id.as_deref(), Some("64fa0c"));
        assert_eq!(summary.legacy_id.as_deref(), Some("H-55"));
        assert_eq!(summary.customer_id.as_deref(), Some("C100"));
        assert_eq!(summary.mobile.as_deref(), Some("01712"));
    }

    #[test]
    fn test_canonical_id_precedence() {
        let summary = PilgrimSummary {
            id: Some("64fa0c".into()),
            legacy_id: Some("H-55".into()),
            customer_id: Some("C100".into()),
            ..Default::default()
        };
        assert_eq!(summary.canonical_id(), Some("64fa0c"));

        let code_only = PilgrimSummary {
            customer_id: Some("C100".into()),
            ..Default::default()
        };
        assert_eq!(code_only.canonical_id(), Some("C100"));

        let blank = PilgrimSummary {
            id: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(blank.canonical_id(), None);
    }
}
