use super::EntityMetadata;

/// Trait for aggregate roots
///
/// Defines the accessors every aggregate in the system exposes.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    /// Record ID
    fn id(&self) -> Self::Id;

    /// Business code of the record (e.g. "PIL-2026-001")
    fn code(&self) -> &str;

    /// Description / display name of the record
    fn description(&self) -> &str;

    /// Lifecycle metadata
    fn metadata(&self) -> &EntityMetadata;
}
