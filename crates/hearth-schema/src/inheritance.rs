//! Schema extension and merge logic
//!
//! Subtype schemas are built by extending the base schema: a field in the
//! child replaces the same-named parent field in place, new fields are appended.

use crate::model::{FieldDefinition, ObjectSchema};
use std::collections::HashSet;

/// Extend `parent` with `child`; child fields take precedence
#[must_use]
pub fn extend_schema(parent: &ObjectSchema, child: &ObjectSchema) -> ObjectSchema {
    let mut result = parent.clone();
    for (name, definition) in child.fields() {
        result.insert(name, definition.clone());
    }
    result
}

/// Apply a chain of schemas from most general to most specific
#[must_use]
pub fn apply_extension_chain(chain: &[&ObjectSchema]) -> Option<ObjectSchema> {
    let (first, rest) = chain.split_first()?;
    Some(
        rest.iter()
            .fold((*first).clone(), |acc, child| extend_schema(&acc, child)),
    )
}

/// Names the child redefines from the parent
#[must_use]
pub fn overridden_fields<'a>(parent: &ObjectSchema, child: &'a ObjectSchema) -> Vec<&'a str> {
    let parent_names: HashSet<&str> = parent.names().into_iter().collect();
    child
        .names()
        .into_iter()
        .filter(|name| parent_names.contains(name))
        .collect()
}

impl ObjectSchema {
    /// Extend this schema with the fields of `child`
    #[must_use]
    pub fn extend(&self, child: &ObjectSchema) -> ObjectSchema {
        extend_schema(self, child)
    }

    /// Copy of this schema with one field replaced or appended
    #[must_use]
    pub fn with_field(&self, name: &str, definition: FieldDefinition) -> ObjectSchema {
        let mut result = self.clone();
        result.insert(name, definition);
        result
    }
}
