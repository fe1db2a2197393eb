//! Server-assigned resource identifier.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Validation errors returned by [`EntityId::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    #[error("identifier must not be empty")]
    Empty,
    #[error("identifier must be a valid UUID")]
    Invalid,
}

/// Stable resource identifier stored as a UUID.
///
/// Identifiers are generated by the service on create; any identifier a
/// client sends with a new resource is discarded.
///
/// # Examples
/// ```
/// use pantry::domain::EntityId;
///
/// let id = EntityId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero identifier carried by payloads that have not been stored.
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an identifier from its textual form.
    pub fn parse(raw: &str) -> Result<Self, EntityIdError> {
        if raw.trim().is_empty() {
            return Err(EntityIdError::Empty);
        }
        if raw.trim() != raw {
            return Err(EntityIdError::Invalid);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| EntityIdError::Invalid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", EntityIdError::Empty)]
    #[case("   ", EntityIdError::Empty)]
    #[case("not-a-uuid", EntityIdError::Invalid)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", EntityIdError::Invalid)]
    fn parse_rejects_malformed_input(#[case] raw: &str, #[case] expected: EntityIdError) {
        assert_eq!(EntityId::parse(raw), Err(expected));
    }

    #[rstest]
    #[case(EntityIdError::Empty, "identifier must not be empty")]
    #[case(EntityIdError::Invalid, "identifier must be a valid UUID")]
    fn errors_render_their_message(#[case] error: EntityIdError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
        let boxed: Box<dyn std::error::Error> = Box::new(error);
        assert_eq!(boxed.to_string(), expected);
    }

    #[rstest]
    fn random_ids_are_distinct_and_not_nil() {
        let first = EntityId::random();
        let second = EntityId::random();
        assert_ne!(first, second);
        assert_ne!(first, EntityId::nil());
    }
}
