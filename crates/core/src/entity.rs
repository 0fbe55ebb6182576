//! Entity traits: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// An entity whose persisted state carries an optimistic concurrency token.
///
/// The version is owned by the store: it is `0` for an entity that was never
/// saved and is bumped by the store on every successful save. Domain code
/// reads it but never changes it.
pub trait Versioned: Entity {
    /// Version of the state this instance was loaded from.
    fn version(&self) -> u64;

    /// Record the version assigned by the store after a successful save.
    fn set_version(&mut self, version: u64);
}

/// Optimistic concurrency expectation for a save.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (seeding, migrations).
    Any,
    /// Require the stored entity to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }
}
