//! Subtype registry
//!
//! A load-once catalog from subtype name to [`SubtypeSchemaEntry`]. The first
//! registration of a name wins; later ones are logged and discarded. There is
//! no removal or update.
//!
//! Tests and tools build their own [`SubtypeRegistry`]. Code that just needs
//! the built-in catalog uses [`global`], initialized on first access.

use crate::base::base_schema;
use crate::inheritance::{apply_extension_chain, overridden_fields};
use crate::model::{FieldDefinition, ObjectSchema};
use crate::subtypes::builtin_entries;
use crate::{Error, Result};
use hearth_model::MaintainableType;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::{debug, info, trace, warn};

/// Registry record for one subtype
#[derive(Debug, Clone)]
pub struct SubtypeSchemaEntry {
    maintainable_type: MaintainableType,
    subtype: String,
    metadata_schema: ObjectSchema,
    schema: ObjectSchema,
}

impl SubtypeSchemaEntry {
    /// Compose the full schema: base, with `type` and `subtype` locked to
    /// literals and `metadata` narrowed to `metadata_schema` (still optional).
    pub fn new(
        maintainable_type: MaintainableType,
        subtype: impl Into<String>,
        metadata_schema: ObjectSchema,
    ) -> Self {
        let subtype = subtype.into();
        let narrowed = ObjectSchema::new()
            .field("type", FieldDefinition::literal(maintainable_type.as_str()))
            .field("subtype", FieldDefinition::literal(subtype.as_str()))
            .field(
                "metadata",
                FieldDefinition::object(metadata_schema.clone()).optional(),
            );
        let schema = apply_extension_chain(&[base_schema(), &narrowed])
            .unwrap_or_else(|| narrowed.clone());

        Self {
            maintainable_type,
            subtype,
            metadata_schema,
            schema,
        }
    }

    /// Replace top-level fields of the composed schema, e.g. with annotated
    /// copies of the base fields. `metadata` is not overridable here.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ObjectSchema) -> Self {
        trace!(
            "Subtype '{}' overrides {:?}",
            self.subtype,
            overridden_fields(&self.schema, overrides)
        );
        for (name, definition) in overrides.fields() {
            if name != "metadata" {
                self.schema.insert(name, definition.clone());
            }
        }
        self
    }

    #[must_use]
    pub fn maintainable_type(&self) -> MaintainableType {
        self.maintainable_type
    }

    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Fields legal inside `metadata`
    #[must_use]
    pub fn metadata_schema(&self) -> &ObjectSchema {
        &self.metadata_schema
    }

    /// Full narrowed schema
    #[must_use]
    pub fn schema(&self) -> &ObjectSchema {
        &self.schema
    }
}

/// Catalog of subtype schemas, in registration order
#[derive(Debug, Default)]
pub struct SubtypeRegistry {
    entries: Vec<SubtypeSchemaEntry>,
    index: HashMap<String, usize>,
    initialized: bool,
}

impl SubtypeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in subtypes
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in subtype module is malformed.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.initialize()?;
        Ok(registry)
    }

    /// Register the built-in subtypes. Only the first call does anything.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in subtype module is malformed; the
    /// registry is left uninitialized so the failure is not masked.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            trace!("Subtype registry already initialized");
            return Ok(());
        }
        let added = self.register_all(builtin_entries()?.iter().cloned());
        self.initialized = true;
        info!("Initialized subtype registry with {} built-in subtypes", added);
        Ok(())
    }

    /// Add an entry unless its subtype is already registered.
    ///
    /// Returns whether the entry was added.
    pub fn register(&mut self, entry: SubtypeSchemaEntry) -> bool {
        if self.index.contains_key(entry.subtype()) {
            warn!(
                "Subtype '{}' is already registered, ignoring duplicate",
                entry.subtype()
            );
            return false;
        }
        debug!(
            "Registering subtype '{}' ({})",
            entry.subtype(),
            entry.maintainable_type()
        );
        self.index.insert(entry.subtype().to_string(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Register several entries, returning how many were added
    pub fn register_all(&mut self, entries: impl IntoIterator<Item = SubtypeSchemaEntry>) -> usize {
        entries
            .into_iter()
            .map(|entry| self.register(entry))
            .filter(|added| *added)
            .count()
    }

    #[must_use]
    pub fn get(&self, subtype: &str) -> Option<&SubtypeSchemaEntry> {
        self.index.get(subtype).map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn contains(&self, subtype: &str) -> bool {
        self.index.contains_key(subtype)
    }

    /// Full narrowed schema for a subtype
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSubtype`] if the subtype is not registered.
    pub fn resolve(&self, subtype: &str) -> Result<&ObjectSchema> {
        self.get(subtype)
            .map(SubtypeSchemaEntry::schema)
            .ok_or_else(|| Error::UnknownSubtype(subtype.to_string()))
    }

    /// All entries in registration order
    #[must_use]
    pub fn list_all(&self) -> &[SubtypeSchemaEntry] {
        &self.entries
    }

    #[must_use]
    pub fn list_by_type(&self, maintainable_type: MaintainableType) -> Vec<&SubtypeSchemaEntry> {
        self.entries
            .iter()
            .filter(|e| e.maintainable_type() == maintainable_type)
            .collect()
    }

    /// Subtype names, optionally restricted to one category
    #[must_use]
    pub fn list_subtype_names(&self, maintainable_type: Option<MaintainableType>) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| maintainable_type.is_none_or(|t| e.maintainable_type() == t))
            .map(SubtypeSchemaEntry::subtype)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL: LazyLock<SubtypeRegistry> = LazyLock::new(|| match SubtypeRegistry::builtin() {
    Ok(registry) => registry,
    Err(e) => panic!("built-in subtype catalog is malformed: {e}"),
});

/// The process-wide registry of built-in subtypes
///
/// # Panics
///
/// Panics on first access if a built-in subtype module is malformed. That is
/// an authoring error caught by this crate's tests.
#[must_use]
pub fn global() -> &'static SubtypeRegistry {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SchemaKind;

    fn entry(t: MaintainableType, subtype: &str) -> SubtypeSchemaEntry {
        SubtypeSchemaEntry::new(
            t,
            subtype,
            ObjectSchema::new().field("brand", FieldDefinition::string().optional()),
        )
    }

    #[test]
    fn test_entry_composes_narrowed_schema() {
        let e = entry(MaintainableType::Appliance, "freezer");
        let schema = e.schema();
        assert!(matches!(
            schema.get("type").unwrap().kind(),
            SchemaKind::Literal(v) if v == "appliance"
        ));
        assert!(matches!(
            schema.get("subtype").unwrap().kind(),
            SchemaKind::Literal(v) if v == "freezer"
        ));
        let metadata = schema.get("metadata").unwrap();
        assert!(metadata.is_optional());
        assert!(metadata.as_object().unwrap().contains("brand"));
        assert!(schema.contains("tags"));
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = SubtypeRegistry::new();
        let first = entry(MaintainableType::Appliance, "freezer");
        let first_type_id = first.schema().get("type").unwrap().id();

        assert!(registry.register(first));
        assert!(!registry.register(entry(MaintainableType::Other, "freezer")));

        assert_eq!(registry.len(), 1);
        let kept = registry.get("freezer").unwrap();
        assert_eq!(kept.maintainable_type(), MaintainableType::Appliance);
        assert_eq!(kept.schema().get("type").unwrap().id(), first_type_id);
    }

    #[test]
    fn test_resolve_unknown_subtype() {
        let registry = SubtypeRegistry::new();
        let err = registry.resolve("not-a-real-subtype").unwrap_err();
        assert!(matches!(err, Error::UnknownSubtype(ref s) if s == "not-a-real-subtype"));
    }

    #[test]
    fn test_listing_preserves_registration_order() {
        let mut registry = SubtypeRegistry::new();
        registry.register_all([
            entry(MaintainableType::System, "boiler"),
            entry(MaintainableType::Appliance, "freezer"),
            entry(MaintainableType::System, "furnace"),
        ]);

        assert_eq!(
            registry.list_subtype_names(None),
            vec!["boiler", "freezer", "furnace"]
        );
        assert_eq!(
            registry.list_subtype_names(Some(MaintainableType::System)),
            vec!["boiler", "furnace"]
        );
        assert_eq!(registry.list_by_type(MaintainableType::Vehicle).len(), 0);
        assert_eq!(registry.list_all()[1].subtype(), "freezer");
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut registry = SubtypeRegistry::new();
        registry.initialize().unwrap();
        let count = registry.len();
        let ids: Vec<_> = registry
            .list_all()
            .iter()
            .map(|e| e.schema().get("subtype").unwrap().id())
            .collect();

        registry.initialize().unwrap();

        assert_eq!(registry.len(), count);
        let again: Vec<_> = registry
            .list_all()
            .iter()
            .map(|e| e.schema().get("subtype").unwrap().id())
            .collect();
        assert_eq!(ids, again);
    }

    #[test]
    fn test_custom_entry_registered_first_shadows_builtin() {
        let mut registry = SubtypeRegistry::new();
        registry.register(entry(MaintainableType::Other, "dishwasher"));
        registry.initialize().unwrap();
        assert_eq!(
            registry.get("dishwasher").unwrap().maintainable_type(),
            MaintainableType::Other
        );
    }

    #[test]
    fn test_builtin_registries_share_annotations() {
        let table = crate::onboarding::annotations();
        let first = SubtypeRegistry::builtin().unwrap();
        let before = table.len();
        let others: Vec<_> = (0..3).map(|_| SubtypeRegistry::builtin().unwrap()).collect();

        // Other tests attach a handful of fields concurrently; one rebuild of
        // the catalog would add over a hundred.
        assert!(table.len() < before + 100);
        for registry in others.iter().chain([global()]) {
            for (a, b) in first.list_all().iter().zip(registry.list_all()) {
                assert_eq!(
                    a.schema().get("label").unwrap().id(),
                    b.schema().get("label").unwrap().id()
                );
            }
        }
    }

    #[test]
    fn test_global_is_populated() {
        assert!(global().contains("dishwasher"));
        assert!(global().contains("heat"));
        assert!(std::ptr::eq(global(), global()));
    }
}
