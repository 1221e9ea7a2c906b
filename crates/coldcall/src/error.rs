//! Error types for signature construction and call binding.
//!
//! Call rejections reproduce CPython's message wording exactly, so a failed
//! bind reads the same as the equivalent failed Python call. Every variant
//! keeps the function name plus the parameter names and declaration
//! positions involved; `Display` renders the native text.

use std::{error::Error, fmt};

use crate::signature::{Param, ParamKind};

/// Result alias for call attempts.
pub type CallResult<T> = Result<T, CallError>;

/// A parameter list that cannot describe a real callable.
///
/// Produced by [`Signature::new`](crate::Signature::new) when declaration
/// rules are violated, and by [`Function::new`](crate::Function::new) when
/// the supplied default values do not line up with the signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    /// Two parameters share a name.
    DuplicateName { name: String },
    /// A parameter kind appears after a kind it must precede.
    WrongKindOrder {
        param: String,
        kind: ParamKind,
        previous: ParamKind,
    },
    /// More than one `*args`-style parameter.
    MultipleVarPositional { name: String },
    /// More than one `**kwargs`-style parameter.
    MultipleVarKeyword { name: String },
    /// A required positional parameter follows a defaulted one.
    NonDefaultAfterDefault { param: String },
    /// A catch-all parameter is marked as having a default.
    VariadicDefault { name: String },
    /// The default values handed to a callable do not match its signature.
    DefaultsMismatch { expected: usize, given: usize },
}

impl fmt::Display for SignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => write!(f, "duplicate parameter name: '{name}'"),
            Self::WrongKindOrder { param, kind, previous } => {
                write!(f, "wrong parameter order: {kind} parameter '{param}' after {previous} parameter")
            }
            Self::MultipleVarPositional { name } => {
                write!(f, "more than one variadic positional parameter: '{name}'")
            }
            Self::MultipleVarKeyword { name } => {
                write!(f, "more than one variadic keyword parameter: '{name}'")
            }
            Self::NonDefaultAfterDefault { param } => {
                write!(f, "non-default parameter follows default parameter: '{param}'")
            }
            Self::VariadicDefault { name } => {
                write!(f, "variadic parameter cannot have a default: '{name}'")
            }
            Self::DefaultsMismatch { expected, given } => {
                write!(f, "signature declares {expected} default values but {given} were supplied")
            }
        }
    }
}

impl Error for SignatureError {}

/// A rejected call attempt.
///
/// Raised by the strict binding layer when an argument shape does not
/// satisfy the target signature. The body of the callable never runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Required parameters were left unbound after positional values,
    /// keyword values and defaults were applied.
    ///
    /// `names` and `positions` are parallel, in declaration order.
    MissingRequired {
        func: String,
        names: Vec<String>,
        positions: Vec<usize>,
        keyword_only: bool,
    },
    /// A parameter received both a positional and a keyword value.
    DuplicateBinding {
        func: String,
        param: String,
        position: usize,
    },
    /// A keyword matched no parameter and there is no `**kwargs` sink.
    UnexpectedKeyword { func: String, keyword: String },
    /// Keywords named positional-only parameters and there is no `**kwargs`
    /// sink to absorb them. `names` and `positions` are parallel.
    PositionalOnlyAsKeyword {
        func: String,
        names: Vec<String>,
        positions: Vec<usize>,
    },
    /// More positional values than positional slots and no `*args`.
    TooManyPositional {
        func: String,
        max_positional: usize,
        given: usize,
        keyword_only_given: usize,
    },
}

impl CallError {
    /// Creates the missing-required error for positional parameters.
    ///
    /// Matches CPython's format: `{func}() missing {count} required positional argument(s): 'a' and 'b'`
    #[must_use]
    pub(crate) fn missing_positional(func: &str, params: &[&Param]) -> Self {
        Self::MissingRequired {
            func: func.to_string(),
            names: params.iter().map(|p| p.name().to_string()).collect(),
            positions: params.iter().map(|p| p.position()).collect(),
            keyword_only: false,
        }
    }

    /// Creates the missing-required error for keyword-only parameters.
    ///
    /// Matches CPython's format: `{func}() missing {count} required keyword-only argument(s): 'a' and 'b'`
    #[must_use]
    pub(crate) fn missing_keyword_only(func: &str, params: &[&Param]) -> Self {
        Self::MissingRequired {
            func: func.to_string(),
            names: params.iter().map(|p| p.name().to_string()).collect(),
            positions: params.iter().map(|p| p.position()).collect(),
            keyword_only: true,
        }
    }

    /// Creates the error for a parameter bound both positionally and by name.
    ///
    /// Matches CPython's format: `{func}() got multiple values for argument '{param}'`
    #[must_use]
    pub(crate) fn duplicate_binding(func: &str, param: &Param) -> Self {
        Self::DuplicateBinding {
            func: func.to_string(),
            param: param.name().to_string(),
            position: param.position(),
        }
    }

    /// Creates the error for a keyword with no matching parameter and no sink.
    ///
    /// Matches CPython's format: `{func}() got an unexpected keyword argument '{keyword}'`
    #[must_use]
    pub(crate) fn unexpected_keyword(func: &str, keyword: &str) -> Self {
        Self::UnexpectedKeyword {
            func: func.to_string(),
            keyword: keyword.to_string(),
        }
    }

    /// Creates the error for keywords naming positional-only parameters.
    ///
    /// Matches CPython's format:
    /// `{func}() got some positional-only arguments passed as keyword arguments: 'a', 'b'`
    #[must_use]
    pub(crate) fn positional_only_as_keyword(func: &str, params: &[&Param]) -> Self {
        Self::PositionalOnlyAsKeyword {
            func: func.to_string(),
            names: params.iter().map(|p| p.name().to_string()).collect(),
            positions: params.iter().map(|p| p.position()).collect(),
        }
    }

    /// Creates the error for positional overflow without a `*args` parameter.
    ///
    /// Matches CPython's format:
    /// - Simple: `{func}() takes {max} positional argument(s) but {given} was/were given`
    /// - With keyword-only arguments bound:
    ///   `{func}() takes {max} positional argument(s) but {given} positional argument(s) (and N keyword-only argument(s)) were given`
    #[must_use]
    pub(crate) fn too_many_positional(func: &str, max_positional: usize, given: usize, keyword_only_given: usize) -> Self {
        Self::TooManyPositional {
            func: func.to_string(),
            max_positional,
            given,
            keyword_only_given,
        }
    }

    /// The function the rejected call targeted.
    #[must_use]
    pub fn func(&self) -> &str {
        match self {
            Self::MissingRequired { func, .. }
            | Self::DuplicateBinding { func, .. }
            | Self::UnexpectedKeyword { func, .. }
            | Self::PositionalOnlyAsKeyword { func, .. }
            | Self::TooManyPositional { func, .. } => func,
        }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired {
                func,
                names,
                keyword_only,
                ..
            } => {
                let what = if *keyword_only { "keyword-only" } else { "positional" };
                let names_str = format_param_names(names);
                match names.len() {
                    1 => write!(f, "{func}() missing 1 required {what} argument: {names_str}"),
                    count => write!(f, "{func}() missing {count} required {what} arguments: {names_str}"),
                }
            }
            Self::DuplicateBinding { func, param, .. } => {
                write!(f, "{func}() got multiple values for argument '{param}'")
            }
            Self::UnexpectedKeyword { func, keyword } => {
                write!(f, "{func}() got an unexpected keyword argument '{keyword}'")
            }
            Self::PositionalOnlyAsKeyword { func, names, .. } => {
                write!(
                    f,
                    "{func}() got some positional-only arguments passed as keyword arguments: {}",
                    quote_join(names)
                )
            }
            Self::TooManyPositional {
                func,
                max_positional,
                given,
                keyword_only_given,
            } => {
                let takes_word = if *max_positional == 1 { "argument" } else { "arguments" };
                if *keyword_only_given > 0 {
                    let given_word = if *given == 1 { "argument" } else { "arguments" };
                    let kwonly_word = if *keyword_only_given == 1 { "argument" } else { "arguments" };
                    write!(
                        f,
                        "{func}() takes {max_positional} positional {takes_word} but {given} positional {given_word} (and {keyword_only_given} keyword-only {kwonly_word}) were given"
                    )
                } else {
                    let given_verb = if *given == 1 { "was" } else { "were" };
                    write!(
                        f,
                        "{func}() takes {max_positional} positional {takes_word} but {given} {given_verb} given"
                    )
                }
            }
        }
    }
}

impl Error for CallError {}

/// Formats parameter names for missing-argument messages.
///
/// - `["a"]` -> `'a'`
/// - `["a", "b"]` -> `'a' and 'b'`
/// - `["a", "b", "c"]` -> `'a', 'b' and 'c'`
fn format_param_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => format!("'{only}'"),
        [first, second] => format!("'{first}' and '{second}'"),
        [rest @ .., last] => {
            let quoted: Vec<String> = rest.iter().map(|n| format!("'{n}'")).collect();
            format!("{} and '{last}'", quoted.join(", "))
        }
    }
}

/// Comma-joins quoted names, the format used for positional-only offenders.
fn quote_join(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    quoted.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{Param, Signature};

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn param_name_list_formats() {
        assert_eq!(format_param_names(&strings(&[])), "");
        assert_eq!(format_param_names(&strings(&["a"])), "'a'");
        assert_eq!(format_param_names(&strings(&["a", "b"])), "'a' and 'b'");
        assert_eq!(format_param_names(&strings(&["a", "b", "c"])), "'a', 'b' and 'c'");
    }

    #[test]
    fn missing_positional_message_singular_and_plural() {
        let sig = Signature::new(vec![Param::positional("a"), Param::positional("b")]).unwrap();
        let params: Vec<&Param> = sig.params().iter().collect();

        let one = CallError::missing_positional("f", &params[1..]);
        assert_eq!(one.to_string(), "f() missing 1 required positional argument: 'b'");

        let two = CallError::missing_positional("f", &params);
        assert_eq!(two.to_string(), "f() missing 2 required positional arguments: 'a' and 'b'");
    }

    #[test]
    fn missing_keyword_only_message() {
        let sig = Signature::new(vec![Param::keyword_only("flag")]).unwrap();
        let params: Vec<&Param> = sig.params().iter().collect();
        let err = CallError::missing_keyword_only("f", &params);
        assert_eq!(err.to_string(), "f() missing 1 required keyword-only argument: 'flag'");
    }

    #[test]
    fn too_many_positional_messages() {
        assert_eq!(
            CallError::too_many_positional("f", 1, 2, 0).to_string(),
            "f() takes 1 positional argument but 2 were given"
        );
        assert_eq!(
            CallError::too_many_positional("f", 0, 1, 0).to_string(),
            "f() takes 0 positional arguments but 1 was given"
        );
        assert_eq!(
            CallError::too_many_positional("f", 0, 3, 0).to_string(),
            "f() takes 0 positional arguments but 3 were given"
        );
        assert_eq!(
            CallError::too_many_positional("f", 2, 3, 1).to_string(),
            "f() takes 2 positional arguments but 3 positional arguments (and 1 keyword-only argument) were given"
        );
    }

    #[test]
    fn positional_only_message_lists_all_offenders() {
        let sig = Signature::new(vec![Param::positional_only("x"), Param::positional_only("y")]).unwrap();
        let params: Vec<&Param> = sig.params().iter().collect();
        let err = CallError::positional_only_as_keyword("f", &params);
        assert_eq!(
            err.to_string(),
            "f() got some positional-only arguments passed as keyword arguments: 'x', 'y'"
        );
    }

    #[test]
    fn error_keeps_parameter_positions() {
        let sig = Signature::new(vec![Param::positional("a"), Param::positional("b")]).unwrap();
        let params: Vec<&Param> = sig.params().iter().collect();
        let err = CallError::missing_positional("f", &params[1..]);
        match err {
            CallError::MissingRequired { positions, .. } => assert_eq!(positions, vec![1]),
            other => panic!("expected MissingRequired, got {other:?}"),
        }
    }
}
