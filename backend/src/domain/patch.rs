//! Partial updates expressed as JSON Patch style operations.
//!
//! Operations address top-level fields by their wire name (`/name`,
//! `/imageURL`), matched case-insensitively. They are applied in order to a
//! working copy of the stored resource. Every problem is collected rather
//! than stopping at the first, and the resulting state is re-validated before
//! the caller may persist it.

use serde_json::Value;

use super::{FieldDescriptor, FieldValue, FieldViolation, Resource};

/// One field-level patch operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOperation {
    /// Set `path` to `value`; fields always exist, so this behaves as replace.
    Add { path: String, value: Value },
    /// Reset `path` to its default value.
    Remove { path: String },
    /// Set `path` to `value`.
    Replace { path: String, value: Value },
    /// Copy the value at `from` into `path`.
    Copy { from: String, path: String },
    /// Copy the value at `from` into `path`, then reset `from`.
    Move { from: String, path: String },
    /// Require `path` to currently equal `value`.
    Test { path: String, value: Value },
}

impl PatchOperation {
    /// Build an operation from its wire members.
    ///
    /// `op` is matched case-insensitively. A missing `path` is reported
    /// against `path`; a missing `value` or `from` for an operation that needs
    /// one is reported against the addressed field.
    pub fn from_parts(
        op: &str,
        path: Option<String>,
        value: Option<Value>,
        from: Option<String>,
    ) -> Result<Self, FieldViolation> {
        let op = op.to_ascii_lowercase();
        if !matches!(
            op.as_str(),
            "add" | "replace" | "test" | "remove" | "copy" | "move"
        ) {
            return Err(FieldViolation::new(
                "op",
                format!("unsupported patch operation '{op}'"),
            ));
        }
        let path =
            path.ok_or_else(|| FieldViolation::new("path", format!("{op} requires a path member")))?;
        let field = path.trim_start_matches('/').to_owned();
        let missing = |member: &str| {
            FieldViolation::new(field.as_str(), format!("{op} requires a {member} member"))
        };
        match op.as_str() {
            "add" => Ok(Self::Add {
                value: value.ok_or_else(|| missing("value"))?,
                path,
            }),
            "replace" => Ok(Self::Replace {
                value: value.ok_or_else(|| missing("value"))?,
                path,
            }),
            "test" => Ok(Self::Test {
                value: value.ok_or_else(|| missing("value"))?,
                path,
            }),
            "copy" => Ok(Self::Copy {
                from: from.ok_or_else(|| missing("from"))?,
                path,
            }),
            "move" => Ok(Self::Move {
                from: from.ok_or_else(|| missing("from"))?,
                path,
            }),
            _ => Ok(Self::Remove { path }),
        }
    }
}

/// Ordered sequence of patch operations.
///
/// # Examples
/// ```
/// use pantry::domain::{EntityId, PatchDocument, PatchOperation, Product, apply_patch};
/// use serde_json::json;
///
/// let eggs = Product::new(EntityId::random(), "Eggs", "", 70);
/// let patch = PatchDocument::new(vec![PatchOperation::Replace {
///     path: "/kcal".to_owned(),
///     value: json!(80),
/// }]);
/// let patched = apply_patch(&eggs, &patch).expect("patch applies");
/// assert_eq!(patched.kcal(), 80);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchDocument(Vec<PatchOperation>);

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    pub fn operations(&self) -> &[PatchOperation] {
        self.0.as_slice()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collect operations, reporting every malformed one.
    pub fn try_from_operations<I>(operations: I) -> Result<Self, Vec<FieldViolation>>
    where
        I: IntoIterator<Item = Result<PatchOperation, FieldViolation>>,
    {
        let mut parsed = Vec::new();
        let mut violations = Vec::new();
        for operation in operations {
            match operation {
                Ok(operation) => parsed.push(operation),
                Err(violation) => violations.push(violation),
            }
        }
        if violations.is_empty() {
            Ok(Self(parsed))
        } else {
            Err(violations)
        }
    }
}

/// Apply `document` to a copy of `entity` and validate the outcome.
///
/// Returns the patched copy, or every violation encountered while applying
/// the operations and validating the result. The input is never modified.
pub fn apply_patch<R: Resource>(
    entity: &R,
    document: &PatchDocument,
) -> Result<R, Vec<FieldViolation>> {
    let mut working = entity.clone();
    let mut violations = Vec::new();

    for operation in document.operations() {
        if let Err(violation) = apply_operation(&mut working, operation) {
            violations.push(violation);
        }
    }

    if violations.is_empty() {
        violations = working.validate();
    }

    if violations.is_empty() {
        Ok(working)
    } else {
        Err(violations)
    }
}

fn apply_operation<R: Resource>(
    working: &mut R,
    operation: &PatchOperation,
) -> Result<(), FieldViolation> {
    match operation {
        PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
            let target = resolve::<R>(path)?;
            let parsed = FieldValue::from_json(target.kind, value)
                .ok_or_else(|| target.type_mismatch())?;
            write(working, target, parsed)
        }
        PatchOperation::Remove { path } => {
            let target = resolve::<R>(path)?;
            write(working, target, FieldValue::default_for(target.kind))
        }
        PatchOperation::Copy { from, path } => {
            let source = resolve::<R>(from)?;
            let target = resolve::<R>(path)?;
            copy(working, source, target)
        }
        PatchOperation::Move { from, path } => {
            let source = resolve::<R>(from)?;
            let target = resolve::<R>(path)?;
            copy(working, source, target)?;
            if source.name == target.name {
                return Ok(());
            }
            write(working, source, FieldValue::default_for(source.kind))
        }
        PatchOperation::Test { path, value } => {
            let target = resolve::<R>(path)?;
            let expected = FieldValue::from_json(target.kind, value)
                .ok_or_else(|| target.type_mismatch())?;
            if working.field(target.name) == Some(expected) {
                Ok(())
            } else {
                Err(FieldViolation::new(
                    target.name,
                    format!("test failed: {} does not match the expected value", target.name),
                ))
            }
        }
    }
}

fn resolve<R: Resource>(path: &str) -> Result<&'static FieldDescriptor, FieldViolation> {
    let Some(name) = path.strip_prefix('/') else {
        return Err(FieldViolation::new(path, "path must start with '/'"));
    };
    if name.contains('/') {
        return Err(FieldViolation::new(name, "nested paths are not supported"));
    }
    if name.eq_ignore_ascii_case("id") {
        return Err(FieldViolation::new("id", "id cannot be modified"));
    }
    R::descriptor(name)
        .ok_or_else(|| FieldViolation::new(name, format!("{} has no field {name}", R::NAME)))
}

fn copy<R: Resource>(
    working: &mut R,
    source: &FieldDescriptor,
    target: &FieldDescriptor,
) -> Result<(), FieldViolation> {
    if source.kind != target.kind {
        return Err(target.type_mismatch());
    }
    let value = working
        .field(source.name)
        .ok_or_else(|| FieldViolation::new(source.name, "field cannot be read"))?;
    write(working, target, value)
}

fn write<R: Resource>(
    working: &mut R,
    target: &FieldDescriptor,
    value: FieldValue,
) -> Result<(), FieldViolation> {
    if working.set_field(target.name, value) {
        Ok(())
    } else {
        Err(target.type_mismatch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityId, Product, Recipe, User};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn eggs() -> Product {
        Product::new(EntityId::random(), "Eggs", "Free range", 70)
    }

    fn replace(path: &str, value: Value) -> PatchOperation {
        PatchOperation::Replace {
            path: path.to_owned(),
            value,
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(FieldViolation::field).collect()
    }

    #[rstest]
    fn replace_updates_named_fields(eggs: Product) {
        let patch = PatchDocument::new(vec![
            replace("/name", json!("Duck eggs")),
            replace("/KCAL", json!(130)),
        ]);

        let patched = apply_patch(&eggs, &patch).expect("patch applies");

        assert_eq!(patched.id(), eggs.id());
        assert_eq!(patched.name(), "Duck eggs");
        assert_eq!(patched.kcal(), 130);
        assert_eq!(patched.description(), "Free range");
    }

    #[rstest]
    fn removing_required_field_fails_validation(eggs: Product) {
        let patch = PatchDocument::new(vec![PatchOperation::Remove {
            path: "/name".to_owned(),
        }]);

        let violations = apply_patch(&eggs, &patch).expect_err("name is required");

        assert_eq!(fields(&violations), vec!["name"]);
    }

    #[rstest]
    fn removing_optional_field_resets_it(eggs: Product) {
        let patch = PatchDocument::new(vec![
            PatchOperation::Remove {
                path: "/description".to_owned(),
            },
            PatchOperation::Remove {
                path: "/kcal".to_owned(),
            },
        ]);

        let patched = apply_patch(&eggs, &patch).expect("patch applies");

        assert_eq!(patched.description(), "");
        assert_eq!(patched.kcal(), 0);
    }

    #[rstest]
    fn every_problem_is_reported(eggs: Product) {
        let patch = PatchDocument::new(vec![
            replace("/kcal", json!("many")),
            replace("/id", json!(EntityId::random().to_string())),
            replace("/colour", json!("brown")),
            replace("/name/first", json!("E")),
            replace("name", json!("E")),
        ]);

        let violations = apply_patch(&eggs, &patch).expect_err("patch is invalid");

        assert_eq!(
            fields(&violations),
            vec!["kcal", "id", "colour", "name/first", "name"]
        );
    }

    #[rstest]
    fn later_operations_see_earlier_ones(eggs: Product) {
        let patch = PatchDocument::new(vec![
            replace("/kcal", json!(90)),
            PatchOperation::Test {
                path: "/kcal".to_owned(),
                value: json!(90),
            },
        ]);

        let patched = apply_patch(&eggs, &patch).expect("test sees replaced value");
        assert_eq!(patched.kcal(), 90);
    }

    #[rstest]
    fn failed_test_rejects_the_whole_patch(eggs: Product) {
        let patch = PatchDocument::new(vec![
            replace("/description", json!("Barn")),
            PatchOperation::Test {
                path: "/name".to_owned(),
                value: json!("Bacon"),
            },
        ]);

        let violations = apply_patch(&eggs, &patch).expect_err("test fails");

        assert_eq!(fields(&violations), vec!["name"]);
    }

    #[rstest]
    fn copy_and_move_between_text_fields() {
        let recipe = Recipe::new(EntityId::random(), "Soup", "Tomato", "/img/soup.png");
        let patch = PatchDocument::new(vec![
            PatchOperation::Copy {
                from: "/name".to_owned(),
                path: "/description".to_owned(),
            },
            PatchOperation::Move {
                from: "/imageURL".to_owned(),
                path: "/description".to_owned(),
            },
        ]);

        let patched = apply_patch(&recipe, &patch).expect("patch applies");

        assert_eq!(patched.name(), "Soup");
        assert_eq!(patched.description(), "/img/soup.png");
        assert_eq!(patched.image_url(), "");
    }

    #[rstest]
    fn copy_between_kinds_is_rejected(eggs: Product) {
        let patch = PatchDocument::new(vec![PatchOperation::Copy {
            from: "/name".to_owned(),
            path: "/kcal".to_owned(),
        }]);

        let violations = apply_patch(&eggs, &patch).expect_err("kinds differ");
        assert_eq!(fields(&violations), vec!["kcal"]);
    }

    #[rstest]
    fn moving_a_required_field_away_fails_validation() {
        let user = User::new(EntityId::random(), "ada@example.com", "secret");
        let patch = PatchDocument::new(vec![PatchOperation::Move {
            from: "/email".to_owned(),
            path: "/password".to_owned(),
        }]);

        let violations = apply_patch(&user, &patch).expect_err("email emptied");
        assert_eq!(fields(&violations), vec!["email"]);
    }

    #[rstest]
    #[case("replace", Some(json!(1)), None, true)]
    #[case("REPLACE", Some(json!(1)), None, true)]
    #[case("add", None, None, false)]
    #[case("test", None, None, false)]
    #[case("remove", None, None, true)]
    #[case("copy", None, Some("/name"), true)]
    #[case("move", None, None, false)]
    #[case("increment", Some(json!(1)), None, false)]
    fn from_parts_requires_operation_members(
        #[case] op: &str,
        #[case] value: Option<Value>,
        #[case] from: Option<&str>,
        #[case] accepted: bool,
    ) {
        let result = PatchOperation::from_parts(
            op,
            Some("/kcal".to_owned()),
            value,
            from.map(str::to_owned),
        );
        assert_eq!(result.is_ok(), accepted, "{op}: {result:?}");
    }

    #[rstest]
    fn malformed_operations_are_all_reported() {
        let outcome = PatchDocument::try_from_operations([
            PatchOperation::from_parts("replace", Some("/name".to_owned()), None, None),
            PatchOperation::from_parts("remove", Some("/description".to_owned()), None, None),
            PatchOperation::from_parts("frobnicate", Some("/kcal".to_owned()), None, None),
            PatchOperation::from_parts("replace", None, Some(json!(1)), None),
        ]);

        let violations = outcome.expect_err("three malformed operations");
        assert_eq!(fields(&violations), vec!["name", "op", "path"]);
    }

    #[rstest]
    fn empty_patch_returns_an_equal_copy(eggs: Product) {
        let patched = apply_patch(&eggs, &PatchDocument::default()).expect("no-op patch");
        assert_eq!(patched, eggs);
    }
}
