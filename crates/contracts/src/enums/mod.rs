pub mod pilgrim_type;
pub mod relation_type;

pub use pilgrim_type::PilgrimType;
pub use relation_type::RelationType;
