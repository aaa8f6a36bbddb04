pub mod aggregate;
pub mod identity;
pub mod relation;
pub mod summary;
