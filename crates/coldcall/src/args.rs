//! Argument containers for call attempts and their bound results.

use indexmap::IndexMap;

/// Arguments for a single call attempt: a positional list plus keyword
/// values in insertion order.
///
/// This is what the cold binder produces and what [`Signature::bind`]
/// consumes. The split mirrors a Python call site, `f(*positional,
/// **keyword)`.
///
/// [`Signature::bind`]: crate::Signature::bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArgs<V> {
    positional: Vec<V>,
    keyword: IndexMap<String, V>,
}

impl<V> CallArgs<V> {
    /// Creates call arguments from a positional list and keyword map.
    #[must_use]
    pub fn new(positional: Vec<V>, keyword: IndexMap<String, V>) -> Self {
        Self { positional, keyword }
    }

    /// A call with no arguments at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            positional: Vec::new(),
            keyword: IndexMap::new(),
        }
    }

    /// The positional values, in call order.
    #[must_use]
    pub fn positional(&self) -> &[V] {
        &self.positional
    }

    /// The keyword values, in insertion order.
    #[must_use]
    pub fn keyword(&self) -> &IndexMap<String, V> {
        &self.keyword
    }

    /// Total number of values the call supplies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.keyword.len()
    }

    /// Whether the call supplies no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }

    /// Splits into the positional list and keyword map.
    #[must_use]
    pub fn into_parts(self) -> (Vec<V>, IndexMap<String, V>) {
        (self.positional, self.keyword)
    }
}

impl<V> Default for CallArgs<V> {
    fn default() -> Self {
        Self::empty()
    }
}

/// A fully bound argument namespace, ready for a callable body.
///
/// Produced by [`Signature::bind`] once a call attempt has been accepted.
/// `slots` holds one value per named parameter in declaration order
/// (positional-only first, then positional-or-keyword, then keyword-only);
/// the catch-all values ride alongside.
///
/// [`Signature::bind`]: crate::Signature::bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundArgs<V> {
    slots: Vec<V>,
    varargs: Vec<V>,
    varkwargs: IndexMap<String, V>,
}

impl<V> BoundArgs<V> {
    pub(crate) fn new(slots: Vec<V>, varargs: Vec<V>, varkwargs: IndexMap<String, V>) -> Self {
        Self {
            slots,
            varargs,
            varkwargs,
        }
    }

    /// One value per named parameter, in declaration order.
    #[must_use]
    pub fn slots(&self) -> &[V] {
        &self.slots
    }

    /// Values absorbed by `*args`. Empty when none was declared.
    #[must_use]
    pub fn varargs(&self) -> &[V] {
        &self.varargs
    }

    /// Values absorbed by `**kwargs`, in arrival order. Empty when none was
    /// declared.
    #[must_use]
    pub fn varkwargs(&self) -> &IndexMap<String, V> {
        &self.varkwargs
    }

    /// Splits into slot values, `*args` values and `**kwargs` values.
    #[must_use]
    pub fn into_parts(self) -> (Vec<V>, Vec<V>, IndexMap<String, V>) {
        (self.slots, self.varargs, self.varkwargs)
    }
}
