use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use super::classify::Classifier;
use super::model_set::ModelSet;
use crate::model::{ObjectModel, TypeId};

/// Non-ignored types of one module, keyed by each of their ancestors.
type DerivedIndex = HashMap<TypeId, Vec<TypeId>>;

/// Computes the closure of a seed set of models.
pub struct GraphExpander<'m, M: ObjectModel + ?Sized> {
    model: &'m M,
    classifier: Classifier<'m, M>,
}

impl<'m, M: ObjectModel + ?Sized> GraphExpander<'m, M> {
    pub fn new(model: &'m M) -> Self {
        GraphExpander {
            model,
            classifier: Classifier::new(model),
        }
    }

    /// Smallest set containing the (non-ignored) seeds that is closed under
    /// assignable types of the same module and under model types reachable
    /// through properties and base types.
    ///
    /// A type is marked visited before it is expanded, so cyclic graphs
    /// terminate. A type whose metadata cannot be read contributes nothing.
    pub fn expand(&self, seed: &ModelSet) -> ModelSet {
        let mut visited = ModelSet::new();
        let mut pending = VecDeque::new();
        let mut derived: HashMap<String, Option<DerivedIndex>> = HashMap::new();

        for id in seed {
            if self.model.has_ignore_marker(id) {
                debug!(type_name = %id, "Ignored type dropped from seed");
                continue;
            }
            if visited.insert(id.clone()) {
                pending.push_back(id.clone());
            }
        }

        while let Some(current) = pending.pop_front() {
            let index = derived
                .entry(current.module.clone())
                .or_insert_with(|| self.derived_index(&current.module));
            let subtypes = index
                .as_ref()
                .and_then(|index| index.get(&current))
                .cloned()
                .unwrap_or_default();

            for found in subtypes.into_iter().chain(self.references(&current)) {
                if visited.insert(found.clone()) {
                    pending.push_back(found);
                }
            }
        }

        debug!(seeds = seed.len(), models = visited.len(), "Model closure computed");
        visited
    }

    /// Models named by the properties of `id`, plus its model base.
    fn references(&self, id: &TypeId) -> Vec<TypeId> {
        let mut found = Vec::new();
        match self.model.properties(id) {
            Ok(properties) => {
                for property in &properties {
                    found.extend(self.classifier.discover(&property.ty));
                }
            }
            Err(e) => warn!(type_name = %id, error = %e, "Properties could not be read"),
        }
        found.extend(self.classifier.base_models(id));
        found
    }

    /// Map every ancestor to the non-ignored types of `module` assignable to it.
    ///
    /// `None` when the module's types cannot be enumerated.
    fn derived_index(&self, module: &str) -> Option<DerivedIndex> {
        let candidates = match self.model.types_in(module) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(module, error = %e, "Derived types could not be enumerated");
                return None;
            }
        };
        let mut index = DerivedIndex::new();
        for candidate in candidates {
            if self.model.has_ignore_marker(&candidate) {
                continue;
            }
            for ancestor in self.model.ancestors(&candidate) {
                let entry = index.entry(ancestor).or_default();
                if !entry.contains(&candidate) {
                    entry.push(candidate.clone());
                }
            }
        }
        Some(index)
    }
}
