//! Callables: the trait the binding layers target, and a boxed-closure
//! implementation of it.

use std::fmt;

use crate::{
    args::{BoundArgs, CallArgs},
    error::{CallResult, SignatureError},
    signature::Signature,
};

/// Something that can be called through a [`Signature`].
///
/// The binding layers only need four things from a target: a name for error
/// messages, the declared signature, the default values backing its
/// defaulted parameters, and a way to run the body once a call shape has
/// been accepted.
pub trait Callable<V, R> {
    /// Name used in rejection messages, as in `connect() missing 1 required
    /// positional argument: 'host'`.
    fn name(&self) -> &str;

    /// The declared parameters.
    fn signature(&self) -> &Signature;

    /// Default values, one per defaulted parameter in declaration order.
    fn defaults(&self) -> &[V];

    /// Runs the body over a bound argument namespace.
    fn invoke(&self, args: BoundArgs<V>) -> R;

    /// Binds `args` strictly and runs the body.
    ///
    /// The shape is accepted or rejected exactly as a native call against
    /// [`Self::signature`] would be; the body runs only on acceptance and
    /// its result comes back unchanged.
    ///
    /// # Errors
    /// Any [`CallError`](crate::CallError) the strict bind raises.
    fn call(&self, args: CallArgs<V>) -> CallResult<R>
    where
        V: Clone,
    {
        let (positional, keyword) = args.into_parts();
        let bound = self.signature().bind(self.name(), self.defaults(), positional, keyword)?;
        Ok(self.invoke(bound))
    }
}

/// A named callable backed by a closure.
///
/// Holds the signature alongside the default values for its defaulted
/// parameters, keeping [`Signature`] itself purely descriptive. The body
/// receives the bound namespace and may return whatever the caller needs,
/// including its own `Result` for fallible bodies.
pub struct Function<V, R> {
    /// Name reported in rejection messages.
    name: String,
    /// The declared parameters.
    signature: Signature,
    /// One value per defaulted parameter, in declaration order.
    defaults: Vec<V>,
    body: Box<dyn Fn(BoundArgs<V>) -> R>,
}

impl<V, R> Function<V, R> {
    /// Creates a callable from its parts.
    ///
    /// # Arguments
    /// * `name` - Name used in rejection messages
    /// * `signature` - The declared parameters
    /// * `defaults` - One value per defaulted parameter, in declaration order
    /// * `body` - The code to run over a bound namespace
    ///
    /// # Errors
    /// [`SignatureError::DefaultsMismatch`] when `defaults` does not hold
    /// exactly one value per defaulted parameter.
    pub fn new(
        name: impl Into<String>,
        signature: Signature,
        defaults: Vec<V>,
        body: impl Fn(BoundArgs<V>) -> R + 'static,
    ) -> Result<Self, SignatureError> {
        if defaults.len() != signature.defaults_count() {
            return Err(SignatureError::DefaultsMismatch {
                expected: signature.defaults_count(),
                given: defaults.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            signature,
            defaults,
            body: Box::new(body),
        })
    }

    /// The callable's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameters.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Default values, one per defaulted parameter in declaration order.
    #[must_use]
    pub fn defaults(&self) -> &[V] {
        &self.defaults
    }
}

impl<V, R> Callable<V, R> for Function<V, R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn defaults(&self) -> &[V] {
        &self.defaults
    }

    fn invoke(&self, args: BoundArgs<V>) -> R {
        (self.body)(args)
    }
}

impl<V: fmt::Debug, R> fmt::Debug for Function<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
