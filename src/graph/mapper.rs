use std::collections::HashMap;

use super::classify::Classification;
use crate::model::TypeId;

/// Universal fallback for shapes that are not modelled structurally.
pub const OPAQUE_TYPE: &str = "any";

/// Turns classifications into target-language type expressions.
///
/// Models are named by their simple name unless a name table supplies a
/// de-duplicated output name for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeMapper<'n> {
    names: Option<&'n HashMap<TypeId, String>>,
}

impl<'n> TypeMapper<'n> {
    pub fn new() -> Self {
        TypeMapper { names: None }
    }

    pub fn with_names(names: &'n HashMap<TypeId, String>) -> Self {
        TypeMapper { names: Some(names) }
    }

    /// Target type expression, or `None` for ignored types, which must not be rendered.
    pub fn map(&self, classification: &Classification) -> Option<String> {
        match classification {
            Classification::Primitive(name) => Some((*name).to_string()),
            Classification::Model(id) | Classification::Constructed { model: id, .. } => {
                Some(self.model_name(id).to_string())
            }
            Classification::CollectionOf(inner) => self.map(inner).map(|name| name + "[]"),
            Classification::Opaque(_) => Some(OPAQUE_TYPE.to_string()),
            Classification::Ignored => None,
        }
    }

    /// Output name of a model type.
    pub fn model_name<'a>(&'a self, id: &'a TypeId) -> &'a str {
        self.names
            .and_then(|names| names.get(id))
            .map_or_else(|| id.simple_name(), String::as_str)
    }
}
