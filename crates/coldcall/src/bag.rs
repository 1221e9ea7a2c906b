//! Bags: caller-held supersets of candidate named values.

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use indexmap::IndexMap;

use crate::{bind::cold_call, error::CallResult, function::Callable};

/// A source of candidate named values.
///
/// Anything that can produce a name-to-value mapping of its contents can act
/// as a bag; a struct listing its own fields this way stands in for the
/// inheritance-based "instance as bag" pattern. Implementations hand out a
/// copy of the mapping, so the binder never mutates the source.
pub trait Bag<V> {
    /// A copy of the candidate values.
    ///
    /// Names must be unique. Order only decides the arrival order of
    /// leftover values inside a `**kwargs` sink; which parameters resolve
    /// never depends on it.
    fn entries(&self) -> IndexMap<String, V>;

    /// Calls `callable` with arguments resolved from this bag alone.
    ///
    /// Shorthand for [`cold_call`] with no positionals and no overrides.
    ///
    /// # Errors
    /// Any [`CallError`](crate::CallError) the strict bind raises.
    fn call<R, C>(&self, callable: &C) -> CallResult<R>
    where
        Self: Sized,
        V: Clone,
        C: Callable<V, R> + ?Sized,
    {
        cold_call(callable, Vec::new(), self, IndexMap::new())
    }

    /// Calls `callable` with explicit positionals and overrides layered on
    /// top of this bag, at the usual precedence.
    ///
    /// # Errors
    /// Any [`CallError`](crate::CallError) the strict bind raises.
    fn call_with<R, C>(
        &self,
        callable: &C,
        positionals: Vec<V>,
        overrides: IndexMap<String, V>,
    ) -> CallResult<R>
    where
        Self: Sized,
        V: Clone,
        C: Callable<V, R> + ?Sized,
    {
        cold_call(callable, positionals, self, overrides)
    }
}

impl<V: Clone> Bag<V> for IndexMap<String, V> {
    fn entries(&self) -> IndexMap<String, V> {
        self.clone()
    }
}

impl<V: Clone, S: BuildHasher> Bag<V> for HashMap<String, V, S> {
    /// Iteration order of the std map is unspecified, so the copy is sorted
    /// by name to keep leftover order deterministic.
    fn entries(&self) -> IndexMap<String, V> {
        let mut entries: IndexMap<String, V> = self.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.sort_unstable_keys();
        entries
    }
}

impl<V: Clone> Bag<V> for BTreeMap<String, V> {
    fn entries(&self) -> IndexMap<String, V> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<V: Clone> Bag<V> for [(String, V)] {
    /// Later pairs replace earlier ones sharing a name.
    fn entries(&self) -> IndexMap<String, V> {
        self.iter().cloned().collect()
    }
}

impl<V: Clone> Bag<V> for Vec<(String, V)> {
    fn entries(&self) -> IndexMap<String, V> {
        self.as_slice().entries()
    }
}
