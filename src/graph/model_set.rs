use std::collections::btree_set;
use std::collections::BTreeSet;

use crate::model::TypeId;

/// Grow-only set of model types, unique by [`TypeId`].
///
/// There is no removal API: closure computation only ever adds. Iteration is
/// ordered by module then full name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSet {
    ids: BTreeSet<TypeId>,
}

impl ModelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type; returns `true` if it was not already present.
    pub fn insert(&mut self, id: TypeId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &TypeId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> btree_set::Iter<'_, TypeId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<TypeId> for ModelSet {
    fn from_iter<I: IntoIterator<Item = TypeId>>(iter: I) -> Self {
        ModelSet {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<TypeId> for ModelSet {
    fn extend<I: IntoIterator<Item = TypeId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

impl IntoIterator for ModelSet {
    type Item = TypeId;
    type IntoIter = btree_set::IntoIter<TypeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a ModelSet {
    type Item = &'a TypeId;
    type IntoIter = btree_set::Iter<'a, TypeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
