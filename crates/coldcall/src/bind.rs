//! Cold binding: resolving a bag of named values into a concrete call.
//!
//! A caller holds a bag, a superset of candidate values keyed by name, and
//! wants to invoke some callable against it. [`bind`] selects the subset the
//! callable's signature declares, applies precedence (explicit overrides win
//! over the bag, the bag wins over the callable's own defaults) and produces
//! the positional list and keyword map a direct call would use. The shape is
//! then checked by the strict layer in [`Signature::bind`], so acceptance,
//! rejection and error wording are exactly those of a native call.
//!
//! [`Signature::bind`]: crate::Signature::bind

use indexmap::IndexMap;
use tracing::debug;

use crate::{
    args::CallArgs,
    bag::Bag,
    error::CallResult,
    function::Callable,
    signature::{ParamKind, Signature},
};

/// Working state for one resolution: explicit positional values plus the
/// names selected from the bag and overrides. Built and consumed within a
/// single [`bind`] call.
struct BindingPlan<V> {
    positional: Vec<V>,
    resolved: IndexMap<String, V>,
}

impl<V> BindingPlan<V> {
    /// Moves resolved values into positional slots.
    ///
    /// Explicit positional values claim the leading slots. After them,
    /// declared positional parameters keep consuming same-named resolved
    /// values in declaration order until one has no resolved value; whatever
    /// remains stays keyword-form. This is what lets a bag satisfy a
    /// positional-only parameter by name: its value arrives at the call as a
    /// positional, never as a keyword.
    fn promote(mut self, signature: &Signature) -> CallArgs<V> {
        let claimed = self.positional.len();
        for param in signature.positional_params().get(claimed..).unwrap_or_default() {
            match self.resolved.shift_remove(param.name()) {
                Some(value) => self.positional.push(value),
                None => break,
            }
        }
        CallArgs::new(self.positional, self.resolved)
    }
}

/// Resolves a bag against a signature into concrete call arguments.
///
/// Precedence is `overrides` over `bag` over the callable's defaults; the
/// defaults are not touched here, they fill in at call time. Bag keys no
/// declared parameter matches are kept only when the signature has a
/// `**kwargs` sink, and are dropped silently otherwise. The caller's bag is
/// read through a shallow copy and never mutated.
///
/// Resolution itself always succeeds; whether the produced shape is callable
/// is the strict layer's verdict.
#[must_use]
pub fn bind<V, B>(
    signature: &Signature,
    positionals: Vec<V>,
    bag: &B,
    overrides: IndexMap<String, V>,
) -> CallArgs<V>
where
    V: Clone,
    B: Bag<V> + ?Sized,
{
    resolve(signature, positionals, bag.entries(), overrides)
}

/// [`bind`] over an already-copied bag.
fn resolve<V>(
    signature: &Signature,
    positionals: Vec<V>,
    mut working: IndexMap<String, V>,
    overrides: IndexMap<String, V>,
) -> CallArgs<V> {
    // 1. Merge bag and overrides, overrides winning on shared names.
    working.extend(overrides);

    // 2. Select declared names in declaration order. The `**kwargs`
    // parameter is a sink, not a bindable name; a bag entry under its name
    // stays a leftover. The `*args` name does resolve, and the strict layer
    // then treats it exactly as a direct `f(args=...)` call would.
    let mut resolved: IndexMap<String, V> = IndexMap::new();
    for param in signature.params() {
        if param.kind() == ParamKind::VarKeyword {
            continue;
        }
        if let Some(value) = working.shift_remove(param.name()) {
            resolved.insert(param.name().to_string(), value);
        }
    }

    // 3. Leftovers feed a declared sink and are dropped otherwise. Bags are
    // allowed to hold more than any one callable needs.
    if signature.has_var_keyword() {
        resolved.extend(working);
    }

    // 4. Promote resolved values into positional slots where declaration
    // order allows it.
    let plan = BindingPlan {
        positional: positionals,
        resolved,
    };
    plan.promote(signature)
}

/// Resolves a bag against a callable's signature and invokes it.
///
/// The single entry point for callers holding a bag: resolution per [`bind`],
/// then a strict call. The callable's body runs only when the resolved shape
/// would be accepted by a direct call; its result, including any error value
/// it returns, comes back unchanged.
///
/// # Errors
/// Any [`CallError`](crate::CallError) the strict bind raises for the
/// resolved shape.
pub fn cold_call<V, R, C, B>(
    callable: &C,
    positionals: Vec<V>,
    bag: &B,
    overrides: IndexMap<String, V>,
) -> CallResult<R>
where
    V: Clone,
    C: Callable<V, R> + ?Sized,
    B: Bag<V> + ?Sized,
{
    let working = bag.entries();
    debug!(
        func = callable.name(),
        positionals = positionals.len(),
        candidates = ?working.keys().collect::<Vec<_>>(),
        overrides = overrides.len(),
        "Attempting cold bind"
    );
    let args = resolve(callable.signature(), positionals, working, overrides);
    debug!(
        func = callable.name(),
        positional = args.positional().len(),
        keyword = ?args.keyword().keys().collect::<Vec<_>>(),
        "Cold bind resolved, invoking"
    );
    callable.call(args)
}

/// Wraps a callable so invocations go through cold binding.
///
/// Call sites hand over a bag instead of exact arguments, the wrapper
/// resolving each call against the target's signature.
#[derive(Debug)]
pub struct ColdCallable<C> {
    inner: C,
}

impl<C> ColdCallable<C> {
    /// Wraps a callable.
    #[must_use]
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The wrapped callable.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Unwraps the callable.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Calls the target with arguments resolved from `bag` alone.
    ///
    /// # Errors
    /// Any [`CallError`](crate::CallError) the strict bind raises.
    pub fn call<V, R, B>(&self, bag: &B) -> CallResult<R>
    where
        V: Clone,
        C: Callable<V, R>,
        B: Bag<V> + ?Sized,
    {
        cold_call(&self.inner, Vec::new(), bag, IndexMap::new())
    }

    /// Calls the target with explicit positionals and overrides on top of
    /// the bag, at the usual precedence.
    ///
    /// # Errors
    /// Any [`CallError`](crate::CallError) the strict bind raises.
    pub fn call_with<V, R, B>(
        &self,
        positionals: Vec<V>,
        bag: &B,
        overrides: IndexMap<String, V>,
    ) -> CallResult<R>
    where
        V: Clone,
        C: Callable<V, R>,
        B: Bag<V> + ?Sized,
    {
        cold_call(&self.inner, positionals, bag, overrides)
    }
}
