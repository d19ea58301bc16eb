use std::fmt;

use tracing::warn;

use crate::model::type_ref::simple_name;
use crate::model::{ObjectModel, Primitive, TypeDescriptor, TypeId};

/// Single-argument generics treated as a sequence of their argument.
const SEQUENCE_GENERICS: [&str; 25] = [
    "List",
    "IList",
    "IEnumerable",
    "ICollection",
    "IReadOnlyList",
    "IReadOnlyCollection",
    "Collection",
    "ReadOnlyCollection",
    "ObservableCollection",
    "HashSet",
    "ISet",
    "Queue",
    "Stack",
    "LinkedList",
    "SortedSet",
    "IQueryable",
    "IOrderedQueryable",
    "IOrderedEnumerable",
    "IAsyncEnumerable",
    "ImmutableArray",
    "ImmutableList",
    "IImmutableList",
    "ConcurrentBag",
    "ConcurrentQueue",
    "BlockingCollection",
];

/// Key-value generics, kept untyped.
const MAP_GENERICS: [&str; 7] = [
    "Dictionary",
    "IDictionary",
    "IReadOnlyDictionary",
    "SortedDictionary",
    "SortedList",
    "ConcurrentDictionary",
    "KeyValuePair",
];

/// Why a type is left untyped in the target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OpaqueReason {
    /// `object` / `dynamic`
    Untyped,
    /// Key-value generic such as `Dictionary<K, V>`
    KeyValueMap(String),
    /// Multi-argument generic that is neither a map nor declared; its
    /// arguments still name models
    UnsupportedGeneric {
        definition: String,
        args: Vec<Classification>,
    },
    /// Named type that no loaded module declares
    Unresolved(String),
}

impl fmt::Display for OpaqueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpaqueReason::Untyped => write!(f, "untyped object"),
            OpaqueReason::KeyValueMap(name) => write!(f, "key-value map '{name}'"),
            OpaqueReason::UnsupportedGeneric { definition, .. } => {
                write!(f, "unsupported generic '{definition}'")
            }
            OpaqueReason::Unresolved(name) => write!(f, "unresolved type '{name}'"),
        }
    }
}

/// Outcome of classifying one type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Built-in type with its target-language name
    Primitive(&'static str),
    /// Declared type that needs its own generated definition
    Model(TypeId),
    /// Instantiation of a declared generic definition; the definition is the
    /// generated model and the arguments name further models
    Constructed {
        model: TypeId,
        args: Vec<Classification>,
    },
    /// Sequence of the inner classification
    CollectionOf(Box<Classification>),
    /// Untyped passthrough (`any`)
    Opaque(OpaqueReason),
    /// Excluded by the generation-ignore marker
    Ignored,
}

impl Classification {
    /// Model types named anywhere inside this classification, generic
    /// arguments included.
    pub fn models(&self) -> Vec<&TypeId> {
        match self {
            Classification::Model(id) => vec![id],
            Classification::Constructed { model, args } => std::iter::once(model)
                .chain(args.iter().flat_map(Classification::models))
                .collect(),
            Classification::CollectionOf(inner) => inner.models(),
            Classification::Opaque(OpaqueReason::UnsupportedGeneric { args, .. }) => {
                args.iter().flat_map(Classification::models).collect()
            }
            Classification::Primitive(_) | Classification::Opaque(_) | Classification::Ignored => {
                Vec::new()
            }
        }
    }

    /// Model types that appear by name in the rendered type expression.
    pub fn rendered_models(&self) -> Vec<&TypeId> {
        match self {
            Classification::Model(model) | Classification::Constructed { model, .. } => vec![model],
            Classification::CollectionOf(inner) => inner.rendered_models(),
            _ => Vec::new(),
        }
    }

    /// Whether this is a model or a collection of one.
    pub fn is_structured(&self) -> bool {
        match self {
            Classification::Model(_) | Classification::Constructed { .. } => true,
            Classification::CollectionOf(inner) => inner.is_structured(),
            _ => false,
        }
    }
}

/// Pure classification of type descriptors against a loaded object model
pub struct Classifier<'m, M: ObjectModel + ?Sized> {
    model: &'m M,
}

impl<'m, M: ObjectModel + ?Sized> Classifier<'m, M> {
    pub fn new(model: &'m M) -> Self {
        Classifier { model }
    }

    /// Classify one descriptor. Deterministic and side-effect free.
    pub fn classify(&self, t: &TypeDescriptor) -> Classification {
        match t {
            TypeDescriptor::Declared(id) => {
                if self.model.has_ignore_marker(id) {
                    Classification::Ignored
                } else {
                    Classification::Model(id.clone())
                }
            }
            TypeDescriptor::Constructed { definition, args } => {
                if self.model.has_ignore_marker(definition) {
                    Classification::Ignored
                } else {
                    Classification::Constructed {
                        model: definition.clone(),
                        args: args.iter().map(|a| self.classify(a)).collect(),
                    }
                }
            }
            TypeDescriptor::Primitive(p) => match p.target_name() {
                Some(name) => Classification::Primitive(name),
                None => Classification::Opaque(OpaqueReason::Untyped),
            },
            TypeDescriptor::Array(element) => {
                if **element == TypeDescriptor::Primitive(Primitive::Byte) {
                    // byte sequences travel as base64 strings
                    return Classification::Primitive("string");
                }
                self.collection_of(element)
            }
            TypeDescriptor::Generic { definition, args } => {
                let simple = simple_name(definition);
                match args.as_slice() {
                    _ if MAP_GENERICS.contains(&simple) => {
                        Classification::Opaque(OpaqueReason::KeyValueMap(definition.clone()))
                    }
                    [arg] if SEQUENCE_GENERICS.contains(&simple) => self.collection_of(arg),
                    // Nullable, Task, ActionResult, Lazy and the like stand for their argument
                    [arg] => self.classify(arg),
                    _ => Classification::Opaque(OpaqueReason::UnsupportedGeneric {
                        definition: definition.clone(),
                        args: args.iter().map(|a| self.classify(a)).collect(),
                    }),
                }
            }
            TypeDescriptor::Unresolved(name) => {
                Classification::Opaque(OpaqueReason::Unresolved(name.clone()))
            }
        }
    }

    fn collection_of(&self, element: &TypeDescriptor) -> Classification {
        match self.classify(element) {
            Classification::Ignored => Classification::Ignored,
            inner => Classification::CollectionOf(Box::new(inner)),
        }
    }

    fn base_classification(&self, id: &TypeId) -> Option<Classification> {
        match self.model.base_type(id) {
            Ok(base) => base.map(|base| self.classify(&base)),
            Err(e) => {
                warn!(type_name = %id, error = %e, "Base type could not be read");
                None
            }
        }
    }

    /// Base type of a declared type, when that base is itself a model (or an
    /// instantiation of a declared generic model).
    pub fn base_model(&self, id: &TypeId) -> Option<TypeId> {
        match self.base_classification(id)? {
            Classification::Model(base) | Classification::Constructed { model: base, .. } => {
                Some(base)
            }
            _ => None,
        }
    }

    /// Every model named by the base type of `id`, generic arguments included.
    pub fn base_models(&self, id: &TypeId) -> Vec<TypeId> {
        self.base_classification(id)
            .map(|base| base.models().into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every model type a descriptor contributes to a closure: the models
    /// inside its classification and, for a model, the models of its base.
    pub fn discover(&self, t: &TypeDescriptor) -> Vec<TypeId> {
        let classification = self.classify(t);
        let mut found: Vec<TypeId> = classification.models().into_iter().cloned().collect();
        if let Classification::Model(id) | Classification::Constructed { model: id, .. } =
            &classification
        {
            found.extend(self.base_models(id));
        }
        found
    }
}
