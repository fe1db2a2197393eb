//! User account resource.
//!
//! Passwords are stored exactly as supplied; there is no hashing layer.

use super::{EntityId, FieldDescriptor, FieldValue, Resource};

/// A user account keyed by e-mail address.
///
/// ## Invariants
/// - `email` is non-blank and unique across users, ignoring case.
/// - `password` is non-blank.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: EntityId,
    email: String,
    password: String,
}

impl User {
    /// Assemble a user from its parts.
    pub fn new(id: EntityId, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Resource for User {
    const NAME: &'static str = "user";
    const UNIQUE_FIELD: &'static str = "email";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::required_text("email"),
        FieldDescriptor::required_text("password"),
    ];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    fn unique_key(&self) -> &str {
        self.email.as_str()
    }

    fn overwrite_from(&mut self, source: &Self) {
        self.email.clone_from(&source.email);
        self.password.clone_from(&source.password);
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "email" => Some(FieldValue::Text(self.email.clone())),
            "password" => Some(FieldValue::Text(self.password.clone())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        let FieldValue::Text(text) = value else {
            return false;
        };
        match name {
            "email" => self.email = text,
            "password" => self.password = text,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_are_required() {
        let user = User::new(EntityId::random(), "", " ");
        let fields: Vec<String> = user
            .validate()
            .iter()
            .map(|violation| violation.field().to_owned())
            .collect();
        assert_eq!(fields, vec!["email".to_owned(), "password".to_owned()]);
    }

    #[test]
    fn debug_output_redacts_password() {
        let user = User::new(EntityId::nil(), "ada@example.com", "hunter2");
        let rendered = format!("{user:?}");
        assert!(rendered.contains("ada@example.com"));
        assert!(!rendered.contains("hunter2"));
    }
}
