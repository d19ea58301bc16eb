//! Serialized module metadata
//!
//! A module file is the on-disk description of one compiled module: the types
//! it declares, their base types, properties and methods. Type references are
//! kept as raw strings and parsed on demand (see [`super::type_ref`]), so a
//! malformed reference only affects the type that carries it.

use serde::{Deserialize, Serialize};

/// Fully-qualified name of the marker that excludes a type from generation.
pub const IGNORE_MARKER: &str = "Dtogen.GenerationIgnore";

/// One loaded module and the types it declares
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModuleDef {
    /// Module name, used for reference resolution (`Acme.Contracts`)
    pub name: String,
    /// Names of modules this module depends on
    #[serde(default)]
    pub references: Vec<String>,
    /// Declared types
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// Kind of a declared type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
}

/// A type declared by a module
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeDef {
    /// Fully-qualified name (`Acme.Contracts.Order`)
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    /// Declared base type reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Implemented interface references
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Enum members; empty for every other kind
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// A declared property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A declared method
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MethodDef {
    pub name: String,
    /// Return type reference; absent means `void`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDef>,
    /// Explicit HTTP verb, overriding the name-prefix convention
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verb: Option<HttpVerb>,
    /// Route segment relative to the endpoint, defaults to the method name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

/// A method parameter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// An enum member
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// HTTP verb of an endpoint method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    /// Verb implied by a conventional method-name prefix (`GetOrder` -> GET).
    ///
    /// The prefix must end at a word boundary.
    pub fn from_method_name(name: &str) -> Option<Self> {
        const PREFIXES: [(&str, HttpVerb); 5] = [
            ("get", HttpVerb::Get),
            ("post", HttpVerb::Post),
            ("put", HttpVerb::Put),
            ("delete", HttpVerb::Delete),
            ("patch", HttpVerb::Patch),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| {
                let (Some(head), Some(rest)) = (name.get(..prefix.len()), name.get(prefix.len()..))
                else {
                    return false;
                };
                // `GetOrder`, `get_order`, `Put2`; not `Getaway`
                head.eq_ignore_ascii_case(prefix) && !rest.starts_with(char::is_lowercase)
            })
            .map(|(_, verb)| *verb)
    }

    /// Whether requests with this verb carry a body.
    pub fn has_body(self) -> bool {
        matches!(self, HttpVerb::Post | HttpVerb::Put | HttpVerb::Patch)
    }

    /// Lowercase method name on an Angular http client (`get`, `post`, ...).
    pub fn as_client_method(self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Delete => "delete",
            HttpVerb::Patch => "patch",
        }
    }
}

/// A declared annotation.
///
/// Only the exact [`IGNORE_MARKER`] name becomes [`Annotation::GenerationIgnore`];
/// an unrelated annotation that happens to share its simple name stays `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Annotation {
    GenerationIgnore,
    Other(String),
}

impl From<String> for Annotation {
    fn from(name: String) -> Self {
        if name == IGNORE_MARKER {
            Annotation::GenerationIgnore
        } else {
            Annotation::Other(name)
        }
    }
}

impl From<Annotation> for String {
    fn from(annotation: Annotation) -> Self {
        match annotation {
            Annotation::GenerationIgnore => IGNORE_MARKER.to_string(),
            Annotation::Other(name) => name,
        }
    }
}

impl TypeDef {
    /// Whether this type carries the generation-ignore marker.
    pub fn is_ignored(&self) -> bool {
        self.annotations.contains(&Annotation::GenerationIgnore)
    }
}
