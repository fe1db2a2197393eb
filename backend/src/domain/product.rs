//! Product resource.

use super::{EntityId, FieldDescriptor, FieldValue, Resource};

/// A food product with its calorie count.
///
/// ## Invariants
/// - `name` is non-blank and unique across products, ignoring case.
///
/// # Examples
/// ```
/// use pantry::domain::{EntityId, Product, Resource};
///
/// let eggs = Product::new(EntityId::random(), "Eggs", "Free range", 70);
/// assert_eq!(eggs.unique_key(), "Eggs");
/// assert!(eggs.validate().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: EntityId,
    name: String,
    description: String,
    kcal: i32,
}

impl Product {
    /// Assemble a product from its parts.
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        description: impl Into<String>,
        kcal: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            kcal,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn kcal(&self) -> i32 {
        self.kcal
    }
}

impl Resource for Product {
    const NAME: &'static str = "product";
    const UNIQUE_FIELD: &'static str = "name";
    const FIELDS: &'static [FieldDescriptor] = &[
        FieldDescriptor::required_text("name"),
        FieldDescriptor::text("description"),
        FieldDescriptor::integer("kcal"),
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
        self.kcal = source.kcal;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "description" => Some(FieldValue::Text(self.description.clone())),
            "kcal" => Some(FieldValue::Integer(self.kcal)),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        match (name, value) {
            ("name", FieldValue::Text(text)) => self.name = text,
            ("description", FieldValue::Text(text)) => self.description = text,
            ("kcal", FieldValue::Integer(kcal)) => self.kcal = kcal,
            _ => return false,
        }
        true
    }
}
