use serde::{Deserialize, Serialize};

/// Kind of pilgrimage a traveler record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PilgrimType {
    #[default]
    Hajj,
    Umrah,
}

impl PilgrimType {
    pub fn code(&self) -> &'static str {
        match self {
            PilgrimType::Hajj => "hajj",
            PilgrimType::Umrah => "umrah",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PilgrimType::Hajj => "Hajj",
            PilgrimType::Umrah => "Umrah",
        }
    }

    pub fn all() -> Vec<PilgrimType> {
        vec![PilgrimType::Hajj, PilgrimType::Umrah]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "hajj" => Some(PilgrimType::Hajj),
            "umrah" => Some(PilgrimType::Umrah),
            _ => None,
        }
    }
}

impl std::fmt::Display for PilgrimType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
