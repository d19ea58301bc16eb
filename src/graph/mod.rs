//! # Type Graph
//!
//! Resolution and mapping engine: finds the data-transfer types reachable from
//! endpoint signatures and decides how each one is expressed in TypeScript.
//!
//! ## Pipeline
//!
//! 1. [`EndpointScanner::find_endpoints`] - types whose direct base is on the allow-list
//! 2. [`EndpointScanner::collect_seed_models`] - models used by endpoint signatures
//! 3. [`GraphExpander::expand`] - closure over derived types, properties and bases
//! 4. [`TypeMapper::map`] - target type expression of a [`Classification`]
//!
//! Everything here works against the [`ObjectModel`](crate::model::ObjectModel)
//! trait, performs no I/O and never fails: unreadable metadata is logged and
//! the affected type contributes nothing.

mod classify;
mod expander;
mod mapper;
mod model_set;
mod scanner;


pub use classify::{Classification, Classifier, OpaqueReason};
pub use expander::GraphExpander;
pub use mapper::{TypeMapper, OPAQUE_TYPE};
pub use model_set::ModelSet;
pub use scanner::{
    EndpointDescriptor, EndpointScanner, ResolvedEndpoint, ResolvedMethod, ResolvedParameter,
    DEFAULT_ENDPOINT_BASE,
};

use crate::model::ObjectModel;

/// Everything the renderers need from one object model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeGraph {
    pub endpoints: Vec<ResolvedEndpoint>,
    /// Models used directly by endpoint signatures
    pub seeds: ModelSet,
    /// Closed model set
    pub models: ModelSet,
}

impl TypeGraph {
    /// Scan `model` for endpoints with the given base names and close over their models.
    pub fn build<M: ObjectModel + ?Sized>(model: &M, endpoint_base_names: &[String]) -> Self {
        let scanner = EndpointScanner::new(model, endpoint_base_names);
        let endpoints = scanner.find_endpoints();
        let seeds = scanner.collect_seed_models(&endpoints);
        let models = GraphExpander::new(model).expand(&seeds);
        TypeGraph {
            endpoints: scanner.resolve_endpoints(&endpoints),
            seeds,
            models,
        }
    }
}
