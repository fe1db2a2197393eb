//! Recipe resource.

use super::{EntityId, FieldDescriptor, FieldValue, Resource};

/// A recipe with a description and a reference to its picture.
///
/// ## Invariants
/// - `name` is non-blank and unique across recipes, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: EntityId,
    name: String,
    description: String,
    image_url: String,
}

impl Recipe {
    /// Assemble a recipe from its parts.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            image_url: image_url.into(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn image_url(&self) -> &str {
        self.image_url.as_str()
    }
}

impl Resource for Recipe {
    const NAME: &'static str = "recipe";
    const UNIQUE_FIELD: &'static str = "name";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::required_text("name"),
        FieldDescriptor::text("description"),
        FieldDescriptor::text("imageURL"),
    ];

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    fn unique_key(&self) -> &str {
        self.name.as_str()
    }

    fn overwrite_from(&mut self, source: &Self) {
        self.name.clone_from(&source.name);
        self.description.clone_from(&source.description);
        self.image_url.clone_from(&source.image_url);
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "description" => Some(FieldValue::Text(self.description.clone())),
            "imageURL" => Some(FieldValue::Text(self.image_url.clone())),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        let FieldValue::Text(text) = value else {
            return false;
        };
        match name {
            "name" => self.name = text,
            "description" => self.description = text,
            "imageURL" => self.image_url = text,
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_is_addressed_by_wire_name() {
        let mut recipe = Recipe::new(EntityId::random(), "Shakshuka", "", "");
        assert!(recipe.set_field("imageURL", FieldValue::Text("/img/s.png".to_owned())));
        assert_eq!(recipe.image_url(), "/img/s.png");
        assert!(!recipe.set_field("image_url", FieldValue::Text("x".to_owned())));
    }

    #[test]
    fn descriptor_lookup_ignores_case() {
        let descriptor = Recipe::descriptor("imageurl").expect("descriptor exists");
        assert_eq!(descriptor.name, "imageURL");
    }
}
