//! Attribute declarations for concrete record types.
//!
//! # Responsibility
//! - Hold the ordered set of permitted attribute names per model type.
//! - Reject every reference to an undeclared attribute, naming all
//!   offenders.
//!
//! # Invariants
//! - Declaration order is the deterministic column order used by SQL
//!   assembly.
//! - Every model type declares `id`, `created_at` and `updated_at`; the
//!   check runs once at registration.

use crate::db::{StoreError, StoreResult};

/// Attribute names every model type must declare for persistence.
pub const ID: &str = "id";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

const REQUIRED_ATTRIBUTES: [&str; 3] = [ID, CREATED_AT, UPDATED_AT];

/// Ordered set of permitted attribute names for one model type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSchema {
    names: Vec<String>,
}

impl AttributeSchema {
    /// Builds a schema from attribute names in declaration order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the declared names in declaration order.
    pub fn attribute_names(&self) -> &[String] {
        &self.names
    }

    /// Returns whether `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|declared| declared == name)
    }

    /// Returns every name in `names` that is not declared, in input order.
    pub fn offenders<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|name| !self.contains(name))
            .map(str::to_string)
            .collect()
    }
}

/// Per-type registration bundle: diagnostic name, table name, schema.
///
/// Created once at setup time and shared by reference between records and
/// repositories. The table name is an external collaborator input and is
/// interpolated verbatim into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelType {
    name: String,
    table_name: String,
    schema: AttributeSchema,
}

impl ModelType {
    /// Registers a model type with its declared attribute set.
    ///
    /// # Errors
    /// - `MissingRequiredAttribute` when the set lacks `id`, `created_at`
    ///   or `updated_at`.
    pub fn new<I, S>(name: impl Into<String>, table_name: impl Into<String>, attribute_names: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let schema = AttributeSchema::new(attribute_names);

        for required in REQUIRED_ATTRIBUTES {
            if !schema.contains(required) {
                return Err(StoreError::MissingRequiredAttribute {
                    model: name,
                    name: required,
                });
            }
        }

        Ok(Self {
            name,
            table_name: table_name.into(),
            schema,
        })
    }

    /// Returns the diagnostic type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the backing table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Returns the declared attribute schema.
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    /// Validates one or many attribute names against the declared set.
    ///
    /// # Errors
    /// - `InvalidAttributes` naming every offending attribute.
    pub fn validate<'a, I>(&self, names: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let offenders = self.schema.offenders(names);
        if offenders.is_empty() {
            return Ok(());
        }

        Err(StoreError::InvalidAttributes {
            model: self.name.clone(),
            names: offenders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeSchema, ModelType};
    use crate::db::StoreError;

    #[test]
    fn schema_preserves_declaration_order() {
        let schema = AttributeSchema::new(["id", "name", "created_at", "updated_at"]);
        assert_eq!(
            schema.attribute_names(),
            ["id", "name", "created_at", "updated_at"]
        );
    }

    #[test]
    fn offenders_reports_every_unknown_name_in_input_order() {
        let schema = AttributeSchema::new(["id", "name"]);
        let offenders = schema.offenders(["zzz", "name", "aaa"]);
        assert_eq!(offenders, ["zzz", "aaa"]);
    }

    #[test]
    fn validate_accepts_single_and_many_names() {
        let model = ModelType::new(
            "Post",
            "posts",
            ["id", "title", "created_at", "updated_at"],
        )
        .unwrap();

        model.validate(["title"]).unwrap();
        model.validate(["id", "title", "updated_at"]).unwrap();

        let err = model.validate(["title", "author"]).unwrap_err();
        match err {
            StoreError::InvalidAttributes { model, names } => {
                assert_eq!(model, "Post");
                assert_eq!(names, ["author"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn registration_requires_persistence_attributes() {
        let err = ModelType::new("Post", "posts", ["id", "title"]).unwrap_err();
        match err {
            StoreError::MissingRequiredAttribute { model, name } => {
                assert_eq!(model, "Post");
                assert_eq!(name, "created_at");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
