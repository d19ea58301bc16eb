use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, warn};

use super::descriptor::{
    MethodDescriptor, ParameterDescriptor, Primitive, PropertyDescriptor, TypeDescriptor, TypeId,
};
use super::error::ModelError;
use super::metadata::{ModuleDef, TypeDef};
use super::type_ref::{simple_name, TypeRef};

/// Read-only capability the resolution core is written against.
///
/// Implementors provide module enumeration, type lookup and reference
/// resolution; everything else the core needs (bases, properties, methods,
/// ancestors, the ignore marker) is derived by the provided methods.
pub trait ObjectModel {
    /// Names of every loaded module, in load order.
    fn module_names(&self) -> Vec<&str>;

    /// Every type declared by `module`.
    ///
    /// # Errors
    ///
    /// Fails when the module is unknown or cannot be enumerated (for example
    /// because one of its dependencies is not loaded).
    fn types_in(&self, module: &str) -> Result<Vec<TypeId>, ModelError>;

    /// Metadata of a declared type.
    fn type_def(&self, id: &TypeId) -> Option<&TypeDef>;

    /// Resolve a parsed reference appearing inside the declaration of `context`.
    fn resolve(&self, type_ref: &TypeRef, context: &TypeId) -> TypeDescriptor;

    /// Parse and resolve a raw reference string.
    fn resolve_str(&self, raw: &str, context: &TypeId) -> Result<TypeDescriptor, ModelError> {
        let parsed = TypeRef::parse(raw)?;
        Ok(self.resolve(&parsed, context))
    }

    /// Whether the type carries the generation-ignore marker.
    fn has_ignore_marker(&self, id: &TypeId) -> bool {
        self.type_def(id).is_some_and(TypeDef::is_ignored)
    }

    /// Resolved declared base type, if any.
    fn base_type(&self, id: &TypeId) -> Result<Option<TypeDescriptor>, ModelError> {
        let def = self
            .type_def(id)
            .ok_or_else(|| ModelError::UnknownType(id.clone()))?;
        def.base
            .as_deref()
            .map(|raw| self.resolve_str(raw, id))
            .transpose()
    }

    /// Declared properties with resolved types.
    fn properties(&self, id: &TypeId) -> Result<Vec<PropertyDescriptor>, ModelError> {
        let def = self
            .type_def(id)
            .ok_or_else(|| ModelError::UnknownType(id.clone()))?;
        def.properties
            .iter()
            .map(|p| {
                Ok(PropertyDescriptor {
                    name: p.name.clone(),
                    ty: self.resolve_str(&p.ty, id)?,
                })
            })
            .collect()
    }

    /// Declared methods with resolved return and parameter types.
    fn methods(&self, id: &TypeId) -> Result<Vec<MethodDescriptor>, ModelError> {
        let def = self
            .type_def(id)
            .ok_or_else(|| ModelError::UnknownType(id.clone()))?;
        def.methods
            .iter()
            .map(|m| {
                let returns = match m.returns.as_deref() {
                    Some(raw) => self.resolve_str(raw, id)?,
                    None => TypeDescriptor::Primitive(Primitive::Void),
                };
                let parameters = m
                    .parameters
                    .iter()
                    .map(|p| {
                        Ok(ParameterDescriptor {
                            name: p.name.clone(),
                            ty: self.resolve_str(&p.ty, id)?,
                        })
                    })
                    .collect::<Result<Vec<_>, ModelError>>()?;
                Ok(MethodDescriptor {
                    name: m.name.clone(),
                    returns,
                    parameters,
                    verb: m.verb,
                    route: m.route.clone(),
                })
            })
            .collect()
    }

    /// Every declared type `id` derives from or implements, transitively.
    ///
    /// A constructed generic base counts as its declared definition. References
    /// that fail to parse, or that resolve to anything other than a declared
    /// type, end that branch of the walk. Cyclic inheritance in
    /// malformed metadata terminates because each ancestor is visited once.
    fn ancestors(&self, id: &TypeId) -> Vec<TypeId> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        let mut pending = VecDeque::from([id.clone()]);

        while let Some(current) = pending.pop_front() {
            let Some(def) = self.type_def(&current) else {
                continue;
            };
            for raw in def.base.iter().chain(def.interfaces.iter()) {
                match self.resolve_str(raw, &current) {
                    Ok(
                        TypeDescriptor::Declared(parent)
                        | TypeDescriptor::Constructed {
                            definition: parent, ..
                        },
                    ) => {
                        if parent != *id && seen.insert(parent.clone()) {
                            found.push(parent.clone());
                            pending.push_back(parent);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => debug!(type_name = %current, error = %e, "Skipping unreadable ancestor"),
                }
            }
        }
        found
    }
}

#[derive(Debug, Clone)]
struct LoadedModule {
    def: ModuleDef,
    /// Full type name -> index into `def.types`
    types: HashMap<String, usize>,
    /// Declared references that are not loaded
    missing: Vec<String>,
}

/// Object model backed by deserialized module metadata
#[derive(Debug, Clone, Default)]
pub struct MetadataModel {
    modules: Vec<LoadedModule>,
    by_name: HashMap<String, usize>,
}

impl MetadataModel {
    /// Build a model from already parsed modules.
    ///
    /// A module whose name is already present is skipped. Declared references
    /// that are not among `modules` are recorded as missing.
    pub fn from_modules(modules: impl IntoIterator<Item = ModuleDef>) -> Self {
        let mut model = MetadataModel::default();
        for def in modules {
            model.insert(def);
        }
        model.refresh_missing();
        model
    }

    /// Add one module; returns `false` if a module of that name is already loaded.
    pub(crate) fn insert(&mut self, def: ModuleDef) -> bool {
        if self.by_name.contains_key(&def.name) {
            warn!(module = %def.name, "Module already loaded, skipping duplicate");
            return false;
        }
        let mut types = HashMap::with_capacity(def.types.len());
        for (i, t) in def.types.iter().enumerate() {
            if types.insert(t.name.clone(), i).is_some() {
                warn!(module = %def.name, type_name = %t.name, "Duplicate type declaration, keeping the last one");
            }
        }
        self.by_name.insert(def.name.clone(), self.modules.len());
        self.modules.push(LoadedModule {
            def,
            types,
            missing: Vec::new(),
        });
        true
    }

    pub(crate) fn refresh_missing(&mut self) {
        let loaded: HashSet<String> = self.by_name.keys().cloned().collect();
        for module in &mut self.modules {
            module.missing = module
                .def
                .references
                .iter()
                .filter(|r| !loaded.contains(*r))
                .cloned()
                .collect();
        }
    }

    /// Whether a module of this name is loaded.
    pub fn contains_module(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Declared references of `module` that are not loaded.
    pub fn missing_references(&self, module: &str) -> &[String] {
        self.module(module).map_or(&[], |m| m.missing.as_slice())
    }

    /// Declared references of every loaded module that are not themselves loaded.
    pub(crate) fn unresolved_references(&self) -> Vec<String> {
        let mut refs: Vec<String> = self
            .modules
            .iter()
            .flat_map(|m| m.def.references.iter())
            .filter(|r| !self.by_name.contains_key(*r))
            .cloned()
            .collect();
        refs.sort();
        refs.dedup();
        refs
    }

    fn module(&self, name: &str) -> Option<&LoadedModule> {
        self.by_name.get(name).map(|&i| &self.modules[i])
    }

    fn find_in(&self, module: &str, full_name: &str) -> Option<TypeId> {
        let m = self.module(module)?;
        m.types
            .contains_key(full_name)
            .then(|| TypeId::new(module, full_name))
    }

    fn resolve_named(&self, name: &str, context_module: &str) -> TypeDescriptor {
        if let Some(id) = self.find_in(context_module, name) {
            return TypeDescriptor::Declared(id);
        }
        if let Some(p) = Primitive::from_name(name) {
            return TypeDescriptor::Primitive(p);
        }

        let context = self.module(context_module);
        let referenced = context
            .map(|m| m.def.references.as_slice())
            .unwrap_or_default();
        for r in referenced {
            if let Some(id) = self.find_in(r, name) {
                return TypeDescriptor::Declared(id);
            }
        }
        for m in &self.modules {
            if m.def.name == context_module || referenced.contains(&m.def.name) {
                continue;
            }
            if let Some(id) = self.find_in(&m.def.name, name) {
                return TypeDescriptor::Declared(id);
            }
        }

        if !name.contains(['.', '+']) {
            if let Some(m) = context {
                let mut hits = m.def.types.iter().filter(|t| simple_name(&t.name) == name);
                if let (Some(hit), None) = (hits.next(), hits.next()) {
                    return TypeDescriptor::Declared(TypeId::new(context_module, &hit.name));
                }
            }
        }

        TypeDescriptor::Unresolved(name.to_string())
    }

    /// Declared generic definition for `name` with `arity` arguments, looked
    /// up as ``name`arity`` first and then by its plain name.
    fn resolve_definition(&self, name: &str, arity: usize, context_module: &str) -> Option<TypeId> {
        [format!("{name}`{arity}"), name.to_string()]
            .iter()
            .find_map(|candidate| match self.resolve_named(candidate, context_module) {
                TypeDescriptor::Declared(id) => Some(id),
                _ => None,
            })
    }
}

impl ObjectModel for MetadataModel {
    fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.def.name.as_str()).collect()
    }

    fn types_in(&self, module: &str) -> Result<Vec<TypeId>, ModelError> {
        let m = self
            .module(module)
            .ok_or_else(|| ModelError::UnknownModule(module.to_string()))?;
        if let Some(dependency) = m.missing.first() {
            return Err(ModelError::MissingDependency {
                module: module.to_string(),
                dependency: dependency.clone(),
            });
        }
        Ok(m.def
            .types
            .iter()
            .map(|t| TypeId::new(module, &t.name))
            .collect())
    }

    fn type_def(&self, id: &TypeId) -> Option<&TypeDef> {
        let m = self.module(&id.module)?;
        m.types.get(&id.name).map(|&i| &m.def.types[i])
    }

    fn resolve(&self, type_ref: &TypeRef, context: &TypeId) -> TypeDescriptor {
        match type_ref {
            TypeRef::Named(name) => self.resolve_named(name, &context.module),
            TypeRef::Array(element) => {
                TypeDescriptor::Array(Box::new(self.resolve(element, context)))
            }
            TypeRef::Generic { name, args } => {
                let arity = args.len();
                let args = args.iter().map(|a| self.resolve(a, context)).collect();
                match self.resolve_definition(name, arity, &context.module) {
                    Some(definition) => TypeDescriptor::Constructed { definition, args },
                    None => TypeDescriptor::Generic {
                        definition: name.clone(),
                        args,
                    },
                }
            }
        }
    }
}
