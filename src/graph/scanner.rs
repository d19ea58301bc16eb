use tracing::{debug, info, warn};

use super::classify::{Classification, Classifier};
use super::model_set::ModelSet;
use crate::model::{HttpVerb, MethodDescriptor, ObjectModel, TypeId, TypeRef};

/// Base type name that marks an endpoint when nothing else is configured.
pub const DEFAULT_ENDPOINT_BASE: &str = "ApiController";

/// A type whose direct base is on the endpoint allow-list, with its methods
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub id: TypeId,
    pub methods: Vec<MethodDescriptor>,
}

/// A parameter with its type classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameter {
    pub name: String,
    pub ty: Classification,
}

/// An endpoint method with return and parameter types classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub name: String,
    pub verb: Option<HttpVerb>,
    pub route: Option<String>,
    pub returns: Classification,
    pub parameters: Vec<ResolvedParameter>,
}

/// An endpoint ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    pub id: TypeId,
    pub methods: Vec<ResolvedMethod>,
}

/// Locates endpoint types and the models their signatures use
pub struct EndpointScanner<'m, M: ObjectModel + ?Sized> {
    model: &'m M,
    classifier: Classifier<'m, M>,
    base_names: Vec<String>,
}

impl<'m, M: ObjectModel + ?Sized> EndpointScanner<'m, M> {
    /// Scanner matching the given base type simple names; an empty list means
    /// [`DEFAULT_ENDPOINT_BASE`].
    pub fn new(model: &'m M, base_names: &[String]) -> Self {
        let base_names = if base_names.is_empty() {
            vec![DEFAULT_ENDPOINT_BASE.to_string()]
        } else {
            base_names.to_vec()
        };
        EndpointScanner {
            model,
            classifier: Classifier::new(model),
            base_names,
        }
    }

    fn is_endpoint_base(&self, raw_base: &str) -> bool {
        match TypeRef::parse(raw_base) {
            Ok(base) => self.base_names.iter().any(|n| n == base.simple_name()),
            Err(e) => {
                debug!(base = raw_base, error = %e, "Ignoring unparsable base type");
                false
            }
        }
    }

    /// Every endpoint across all loaded modules.
    ///
    /// Only the immediate base is checked. A module whose types cannot be
    /// enumerated is skipped, as is an endpoint whose methods cannot be read.
    pub fn find_endpoints(&self) -> Vec<EndpointDescriptor> {
        let mut endpoints = Vec::new();
        for module in self.model.module_names() {
            let ids = match self.model.types_in(module) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(module, error = %e, "Skipping module while scanning for endpoints");
                    continue;
                }
            };
            for id in ids {
                let Some(base) = self.model.type_def(&id).and_then(|d| d.base.as_deref()) else {
                    continue;
                };
                if !self.is_endpoint_base(base) {
                    continue;
                }
                match self.model.methods(&id) {
                    Ok(methods) => endpoints.push(EndpointDescriptor { id, methods }),
                    Err(e) => warn!(endpoint = %id, error = %e, "Skipping endpoint with unreadable methods"),
                }
            }
        }
        endpoints.sort_by(|a, b| a.id.cmp(&b.id));
        endpoints.dedup_by(|a, b| a.id == b.id);
        info!(count = endpoints.len(), "Endpoints found");
        endpoints
    }

    /// Models used directly as a return or parameter type by any endpoint method.
    pub fn collect_seed_models(&self, endpoints: &[EndpointDescriptor]) -> ModelSet {
        let mut seeds = ModelSet::new();
        for method in endpoints.iter().flat_map(|e| &e.methods) {
            let signature = std::iter::once(&method.returns).chain(method.parameters.iter().map(|p| &p.ty));
            for ty in signature {
                seeds.extend(self.classifier.classify(ty).models().into_iter().cloned());
            }
        }
        debug!(count = seeds.len(), "Seed models collected");
        seeds
    }

    /// Classify every return and parameter type of every endpoint method.
    pub fn resolve_endpoints(&self, endpoints: &[EndpointDescriptor]) -> Vec<ResolvedEndpoint> {
        endpoints
            .iter()
            .map(|endpoint| ResolvedEndpoint {
                id: endpoint.id.clone(),
                methods: endpoint
                    .methods
                    .iter()
                    .map(|m| ResolvedMethod {
                        name: m.name.clone(),
                        verb: m.verb,
                        route: m.route.clone(),
                        returns: self.classifier.classify(&m.returns),
                        parameters: m
                            .parameters
                            .iter()
                            .map(|p| ResolvedParameter {
                                name: p.name.clone(),
                                ty: self.classifier.classify(&p.ty),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}
