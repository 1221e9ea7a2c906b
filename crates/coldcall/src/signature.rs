//! Signature models and strict argument binding.
//!
//! A [`Signature`] describes a callable's formal parameters the way Python
//! declares them: positional-only parameters, positional-or-keyword
//! parameters, `*args`, keyword-only parameters and `**kwargs`, with
//! default-value presence tracked per parameter. [`Signature::bind`] maps an
//! explicit positional list and keyword map onto those parameters with the
//! acceptance, rejection and message behavior of the native Python call
//! machinery.

use ahash::AHashSet;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
    args::BoundArgs,
    error::{CallError, SignatureError},
};

/// How a single parameter may be supplied.
///
/// Variants are declared in the only order kinds may appear within a
/// signature; the derived ordering is what [`Signature::new`] validates
/// against. `Display` renders the descriptions used in Python tracebacks
/// ("positional-only", "variadic keyword", and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ParamKind {
    /// Declared before `/`. Supplied by position only.
    #[strum(serialize = "positional-only")]
    PositionalOnly,
    /// A plain parameter. Supplied by position or by name.
    #[strum(serialize = "positional or keyword")]
    PositionalOrKeyword,
    /// `*args`. Absorbs positional values beyond the declared slots.
    #[strum(serialize = "variadic positional")]
    VarPositional,
    /// Declared after `*` or `*args`. Supplied by name only.
    #[strum(serialize = "keyword-only")]
    KeywordOnly,
    /// `**kwargs`. Absorbs keyword values no declared parameter matched.
    #[strum(serialize = "variadic keyword")]
    VarKeyword,
}

impl ParamKind {
    /// Whether this is one of the two catch-all kinds.
    #[must_use]
    pub fn is_variadic(self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }

    /// Whether a parameter of this kind occupies a positional slot.
    #[must_use]
    pub fn is_positional(self) -> bool {
        matches!(self, Self::PositionalOnly | Self::PositionalOrKeyword)
    }
}

/// One formal parameter of a callable.
///
/// Built with the kind constructors and handed to [`Signature::new`], which
/// validates ordering and assigns declaration positions. `has_default` only
/// records presence; default values themselves live with the callable (see
/// [`Function`](crate::Function)), keeping the model purely descriptive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    name: String,
    kind: ParamKind,
    has_default: bool,
    #[serde(default)]
    position: usize,
}

impl Param {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            has_default: false,
            position: 0,
        }
    }

    /// A positional-or-keyword parameter, the plain `def f(a)` kind.
    #[must_use]
    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOrKeyword)
    }

    /// A positional-only parameter, declared before `/`.
    #[must_use]
    pub fn positional_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOnly)
    }

    /// A keyword-only parameter, declared after `*` or `*args`.
    #[must_use]
    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::KeywordOnly)
    }

    /// The `*args` catch-all.
    #[must_use]
    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarPositional)
    }

    /// The `**kwargs` catch-all.
    #[must_use]
    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarKeyword)
    }

    /// Marks the parameter as having a default value supplied by the callable.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the parameter may be supplied.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Whether the callable supplies a default value for this parameter.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// Index within the full declaration, assigned by [`Signature::new`].
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

/// An ordered description of a callable's formal parameters.
///
/// A complete signature can include, in declaration order:
/// - Positional-only parameters (before `/`)
/// - Positional-or-keyword parameters (regular parameters)
/// - One variable positional parameter (`*args`)
/// - Keyword-only parameters (after `*` or `*args`)
/// - One variable keyword parameter (`**kwargs`)
///
/// # Default Values
///
/// `has_default` flags which parameters are defaulted; the default values
/// are stored with the callable, one per flagged parameter in declaration
/// order. The model itself never holds values.
///
/// # Slot Layout
///
/// Strict binding produces one slot per named parameter (everything except
/// the catch-alls), in declaration order:
/// ```text
/// [positional-only][positional-or-keyword][keyword-only]
/// ```
/// The `*args` and `**kwargs` values are carried separately; see
/// [`BoundArgs`].
///
/// Serialized form is the plain parameter list; deserializing re-validates
/// the declaration rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Param>", into = "Vec<Param>")]
pub struct Signature {
    params: Vec<Param>,
    pos_only_count: usize,
    pos_or_kw_count: usize,
    kw_only_count: usize,
    var_positional: Option<usize>,
    var_keyword: Option<usize>,
    defaults_count: usize,
}

impl Signature {
    /// Creates a signature from parameters in declaration order.
    ///
    /// # Errors
    /// Returns a [`SignatureError`] when the list could not belong to a real
    /// callable: duplicate names, kinds out of declaration order, more than
    /// one catch-all of a kind, a defaulted catch-all, or a required
    /// positional parameter after a defaulted one.
    pub fn new(mut params: Vec<Param>) -> Result<Self, SignatureError> {
        for (position, param) in params.iter_mut().enumerate() {
            param.position = position;
        }

        let mut names: AHashSet<&str> = AHashSet::with_capacity(params.len());
        let mut highest = ParamKind::PositionalOnly;
        let mut pos_only_count = 0;
        let mut pos_or_kw_count = 0;
        let mut kw_only_count = 0;
        let mut var_positional = None;
        let mut var_keyword = None;
        let mut defaults_count = 0;
        let mut seen_positional_default = false;

        for param in &params {
            if !names.insert(&param.name) {
                return Err(SignatureError::DuplicateName { name: param.name.clone() });
            }
            if param.kind < highest {
                return Err(SignatureError::WrongKindOrder {
                    param: param.name.clone(),
                    kind: param.kind,
                    previous: highest,
                });
            }
            highest = param.kind;
            if param.has_default {
                if param.kind.is_variadic() {
                    return Err(SignatureError::VariadicDefault { name: param.name.clone() });
                }
                defaults_count += 1;
            }
            match param.kind {
                ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword => {
                    if param.has_default {
                        seen_positional_default = true;
                    } else if seen_positional_default {
                        return Err(SignatureError::NonDefaultAfterDefault { param: param.name.clone() });
                    }
                    if param.kind == ParamKind::PositionalOnly {
                        pos_only_count += 1;
                    } else {
                        pos_or_kw_count += 1;
                    }
                }
                ParamKind::VarPositional => {
                    if var_positional.is_some() {
                        return Err(SignatureError::MultipleVarPositional { name: param.name.clone() });
                    }
                    var_positional = Some(param.position);
                }
                ParamKind::KeywordOnly => kw_only_count += 1,
                ParamKind::VarKeyword => {
                    if var_keyword.is_some() {
                        return Err(SignatureError::MultipleVarKeyword { name: param.name.clone() });
                    }
                    var_keyword = Some(param.position);
                }
            }
        }

        Ok(Self {
            params,
            pos_only_count,
            pos_or_kw_count,
            kw_only_count,
            var_positional,
            var_keyword,
            defaults_count,
        })
    }

    /// All parameters in declaration order, catch-alls included.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// The parameters occupying positional slots, in declaration order.
    #[must_use]
    pub fn positional_params(&self) -> &[Param] {
        &self.params[..self.positional_param_count()]
    }

    /// Number of positional slots (positional-only plus positional-or-keyword).
    #[must_use]
    pub fn positional_param_count(&self) -> usize {
        self.pos_only_count + self.pos_or_kw_count
    }

    /// Number of named parameters, which excludes the catch-alls.
    #[must_use]
    pub fn named_param_count(&self) -> usize {
        self.pos_only_count + self.pos_or_kw_count + self.kw_only_count
    }

    /// Number of positional slots that must receive a value.
    #[must_use]
    pub fn required_positional_count(&self) -> usize {
        self.positional_params().iter().filter(|p| !p.has_default).count()
    }

    /// Number of parameters flagged as defaulted, catch-alls never counted.
    #[must_use]
    pub fn defaults_count(&self) -> usize {
        self.defaults_count
    }

    /// Whether a `*args` parameter is declared.
    #[must_use]
    pub fn has_var_positional(&self) -> bool {
        self.var_positional.is_some()
    }

    /// Whether a `**kwargs` parameter is declared.
    #[must_use]
    pub fn has_var_keyword(&self) -> bool {
        self.var_keyword.is_some()
    }

    /// Whether the signature declares no parameters at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Named parameters in slot order (declaration order minus catch-alls).
    pub(crate) fn named_params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().filter(|p| !p.kind.is_variadic())
    }

    fn positional_only_param(&self, name: &str) -> Option<&Param> {
        self.params[..self.pos_only_count].iter().find(|p| p.name == name)
    }

    /// Binds explicit positional and keyword values to this signature.
    ///
    /// This is the strict layer: the same shape is accepted or rejected, and
    /// with the same message, as a direct Python call against the declared
    /// parameters. `defaults` holds one value per defaulted parameter in
    /// declaration order; a too-short list leaves the affected parameters
    /// unbound, which reports them as missing.
    ///
    /// # Errors
    /// - [`CallError::DuplicateBinding`] when a keyword targets a slot a
    ///   positional value already filled.
    /// - [`CallError::UnexpectedKeyword`] and
    ///   [`CallError::PositionalOnlyAsKeyword`] when a keyword matches no
    ///   bindable parameter and there is no `**kwargs` sink.
    /// - [`CallError::TooManyPositional`] on positional overflow without
    ///   `*args`.
    /// - [`CallError::MissingRequired`] when required parameters stay
    ///   unbound after defaults.
    pub fn bind<V: Clone>(
        &self,
        func: &str,
        defaults: &[V],
        args: Vec<V>,
        kwargs: IndexMap<String, V>,
    ) -> Result<BoundArgs<V>, CallError> {
        let positional_count = self.positional_param_count();
        let named_count = self.named_param_count();
        let given_positional = args.len();

        let mut slots: Vec<Option<V>> = Vec::with_capacity(named_count);
        slots.resize_with(named_count, || None);

        // 1. Bind positional values to positional slots, in declaration order.
        let mut args = args.into_iter();
        for slot in slots.iter_mut().take(positional_count) {
            match args.next() {
                Some(value) => *slot = Some(value),
                None => break,
            }
        }
        // Excess positionals belong to *args. Whether one exists is checked
        // after keyword distribution so the rejection order matches native
        // calls, where an unknown keyword wins over an overflow.
        let extra_positional: Vec<V> = args.collect();

        // 2. Distribute keywords over positional-or-keyword and keyword-only
        // slots. Positional-only names never match here.
        let mut varkwargs: IndexMap<String, V> = IndexMap::new();
        let mut kwargs = kwargs.into_iter();
        while let Some((key, value)) = kwargs.next() {
            let matched = self
                .named_params()
                .enumerate()
                .find(|(_, p)| p.kind != ParamKind::PositionalOnly && p.name == key);
            if let Some((slot, param)) = matched {
                if slots[slot].is_some() {
                    return Err(CallError::duplicate_binding(func, param));
                }
                slots[slot] = Some(value);
            } else if self.var_keyword.is_some() {
                varkwargs.insert(key, value);
            } else {
                // No sink. When any keyword names a positional-only
                // parameter the native machinery reports those names
                // together; otherwise the first unknown keyword is the
                // offender. Keys bound so far cannot be positional-only
                // names, so scanning from the current key covers them all.
                let mut offenders: SmallVec<[&Param; 4]> = SmallVec::new();
                if let Some(param) = self.positional_only_param(&key) {
                    offenders.push(param);
                }
                for (rest_key, _) in kwargs.by_ref() {
                    if let Some(param) = self.positional_only_param(&rest_key) {
                        offenders.push(param);
                    }
                }
                if offenders.is_empty() {
                    return Err(CallError::unexpected_keyword(func, &key));
                }
                return Err(CallError::positional_only_as_keyword(func, &offenders));
            }
        }

        // 3. Reject positional overflow now that keyword-only bindings are
        // known, since the message counts them.
        if !extra_positional.is_empty() && self.var_positional.is_none() {
            let keyword_only_given = slots[positional_count..].iter().filter(|s| s.is_some()).count();
            return Err(CallError::too_many_positional(
                func,
                positional_count,
                given_positional,
                keyword_only_given,
            ));
        }

        // 4. Fill remaining defaulted slots from the callable's values.
        let mut defaults = defaults.iter();
        for (slot, param) in self.named_params().enumerate() {
            if !param.has_default {
                continue;
            }
            let value = defaults.next();
            if slots[slot].is_none()
                && let Some(value) = value
            {
                slots[slot] = Some(value.clone());
            }
        }

        // 5. Anything still unbound is missing. Positional names are
        // reported first, keyword-only names second, each group in
        // declaration order.
        let mut missing: SmallVec<[&Param; 4]> = SmallVec::new();
        for (slot, param) in self.named_params().enumerate().take(positional_count) {
            if slots[slot].is_none() {
                missing.push(param);
            }
        }
        if !missing.is_empty() {
            return Err(CallError::missing_positional(func, &missing));
        }
        for (slot, param) in self.named_params().enumerate().skip(positional_count) {
            if slots[slot].is_none() {
                missing.push(param);
            }
        }
        if !missing.is_empty() {
            return Err(CallError::missing_keyword_only(func, &missing));
        }

        // 6. Assemble the bound namespace. Every slot is Some at this point;
        // flatten drops nothing.
        let values: Vec<V> = slots.into_iter().flatten().collect();
        Ok(BoundArgs::new(values, extra_positional, varkwargs))
    }
}

impl TryFrom<Vec<Param>> for Signature {
    type Error = SignatureError;

    fn try_from(params: Vec<Param>) -> Result<Self, Self::Error> {
        Self::new(params)
    }
}

impl From<Signature> for Vec<Param> {
    fn from(signature: Signature) -> Self {
        signature.params
    }
}
