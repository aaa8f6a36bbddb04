use serde::{Deserialize, Serialize};

/// Kinds of family relations between two pilgrims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Mother,
    Father,
    Wife,
    Husband,
    Brother,
    Sister,
    Son,
    Daughter,
    Relative,
    #[default]
    Other,
}

impl RelationType {
    /// Wire code of the relation type
    pub fn code(&self) -> &'static str {
        match self {
            RelationType::Mother => "mother",
            RelationType::Father => "father",
            RelationType::Wife => "wife",
            RelationType::Husband => "husband",
            RelationType::Brother => "brother",
            RelationType::Sister => "sister",
            RelationType::Son => "son",
            RelationType::Daughter => "daughter",
            RelationType::Relative => "relative",
            RelationType::Other => "other",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationType::Mother => "Mother",
            RelationType::Father => "Father",
            RelationType::Wife => "Wife",
            RelationType::Husband => "Husband",
            RelationType::Brother => "Brother",
            RelationType::Sister => "Sister",
            RelationType::Son => "Son",
            RelationType::Daughter => "Daughter",
            RelationType::Relative => "Relative",
            RelationType::Other => "Other",
        }
    }

    /// All relation types, in picker order
    pub fn all() -> Vec<RelationType> {
        vec![
            RelationType::Mother,
            RelationType::Father,
            RelationType::Wife,
            RelationType::Husband,
            RelationType::Brother,
            RelationType::Sister,
            RelationType::Son,
            RelationType::Daughter,
            RelationType::Relative,
            RelationType::Other,
        ]
    }

    /// Parse from a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "mother" => Some(RelationType::Mother),
            "father" => Some(RelationType::Father),
            "wife" => Some(RelationType::Wife),
            "husband" => Some(RelationType::Husband),
            "brother" => Some(RelationType::Brother),
            "sister" => Some(RelationType::Sister),
            "son" => Some(RelationType::Son),
            "daughter" => Some(RelationType::Daughter),
            "relative" => Some(RelationType::Relative),
            "other" => Some(RelationType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
