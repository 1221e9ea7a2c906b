//! Signature construction rules and the serialized parameter-list form.

use coldcall::{Param, ParamKind, Signature, SignatureError};
use pretty_assertions::assert_eq;

#[test]
fn construction_assigns_positions_and_counts() {
    let signature = Signature::new(vec![
        Param::positional_only("a"),
        Param::positional("b").with_default(),
        Param::var_positional("rest"),
        Param::keyword_only("c"),
        Param::var_keyword("extra"),
    ])
    .unwrap();

    let positions: Vec<usize> = signature.params().iter().map(Param::position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    assert_eq!(signature.positional_param_count(), 2);
    assert_eq!(signature.named_param_count(), 3);
    assert_eq!(signature.required_positional_count(), 1);
    assert_eq!(signature.defaults_count(), 1);
    assert!(signature.has_var_positional());
    assert!(signature.has_var_keyword());
    assert!(!signature.is_empty());
}

#[test]
fn params_report_their_details() {
    let param = Param::keyword_only("flag").with_default();
    assert_eq!(param.name(), "flag");
    assert_eq!(param.kind(), ParamKind::KeywordOnly);
    assert!(param.has_default());
}

#[test]
fn param_names_follow_declaration_order() {
    let signature = Signature::new(vec![
        Param::positional("first"),
        Param::var_positional("rest"),
        Param::keyword_only("last"),
    ])
    .unwrap();
    let names: Vec<&str> = signature.param_names().collect();
    assert_eq!(names, vec!["first", "rest", "last"]);
}

#[test]
fn kind_descriptions_parse_back() {
    assert_eq!("positional-only".parse::<ParamKind>().unwrap(), ParamKind::PositionalOnly);
    assert_eq!("keyword-only".parse::<ParamKind>().unwrap(), ParamKind::KeywordOnly);
    assert_eq!("variadic keyword".parse::<ParamKind>().unwrap(), ParamKind::VarKeyword);
}

#[test]
fn empty_signature_is_the_default() {
    let empty = Signature::new(vec![]).unwrap();
    assert_eq!(empty, Signature::default());
    assert!(empty.is_empty());
}

// =============================================================================
// Declaration Rules
// =============================================================================

#[test]
fn duplicate_name_rejected() {
    let err = Signature::new(vec![Param::positional("a"), Param::keyword_only("a")]).unwrap_err();
    assert_eq!(err, SignatureError::DuplicateName { name: "a".to_string() });
    assert_eq!(err.to_string(), "duplicate parameter name: 'a'");
}

#[test]
fn kind_order_enforced() {
    let err = Signature::new(vec![Param::keyword_only("a"), Param::positional("b")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "wrong parameter order: positional or keyword parameter 'b' after keyword-only parameter"
    );
}

#[test]
fn positional_only_cannot_follow_plain_positional() {
    let err = Signature::new(vec![Param::positional("a"), Param::positional_only("b")]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "wrong parameter order: positional-only parameter 'b' after positional or keyword parameter"
    );
}

#[test]
fn second_var_positional_rejected() {
    let err =
        Signature::new(vec![Param::var_positional("rest"), Param::var_positional("more")]).unwrap_err();
    assert_eq!(err, SignatureError::MultipleVarPositional { name: "more".to_string() });
}

#[test]
fn second_var_keyword_rejected() {
    let err = Signature::new(vec![Param::var_keyword("kw"), Param::var_keyword("more")]).unwrap_err();
    assert_eq!(err, SignatureError::MultipleVarKeyword { name: "more".to_string() });
}

#[test]
fn non_default_after_default_rejected() {
    let err =
        Signature::new(vec![Param::positional("a").with_default(), Param::positional("b")]).unwrap_err();
    assert_eq!(err, SignatureError::NonDefaultAfterDefault { param: "b".to_string() });
    assert_eq!(err.to_string(), "non-default parameter follows default parameter: 'b'");
}

/// The default-ordering rule binds positional parameters only; a required
/// keyword-only parameter may follow a defaulted positional one.
#[test]
fn required_keyword_only_may_follow_defaulted_positional() {
    let signature =
        Signature::new(vec![Param::positional("a").with_default(), Param::keyword_only("b")]).unwrap();
    assert_eq!(signature.defaults_count(), 1);
}

#[test]
fn variadic_default_rejected() {
    let err = Signature::new(vec![Param::var_positional("rest").with_default()]).unwrap_err();
    assert_eq!(err, SignatureError::VariadicDefault { name: "rest".to_string() });
    assert_eq!(err.to_string(), "variadic parameter cannot have a default: 'rest'");
}

// =============================================================================
// Serialized Form
// =============================================================================

#[test]
fn serde_round_trip_preserves_the_signature() {
    let signature = Signature::new(vec![
        Param::positional_only("a"),
        Param::positional("b").with_default(),
        Param::keyword_only("c"),
    ])
    .unwrap();
    let json = serde_json::to_string(&signature).unwrap();
    let back: Signature = serde_json::from_str(&json).unwrap();
    assert_eq!(back, signature);
}

/// Deserialization goes through the same validation as construction.
#[test]
fn deserialization_revalidates_declaration_rules() {
    let json = r#"[
        {"name": "a", "kind": "PositionalOrKeyword", "has_default": false},
        {"name": "a", "kind": "PositionalOrKeyword", "has_default": false}
    ]"#;
    let err = serde_json::from_str::<Signature>(json).unwrap_err();
    assert!(
        err.to_string().contains("duplicate parameter name: 'a'"),
        "unexpected error: {err}"
    );
}

/// Positions in the input are ignored and recomputed from list order.
#[test]
fn positions_are_recomputed_on_deserialization() {
    let json = r#"[
        {"name": "a", "kind": "PositionalOrKeyword", "has_default": false, "position": 9},
        {"name": "b", "kind": "KeywordOnly", "has_default": true}
    ]"#;
    let signature: Signature = serde_json::from_str(json).unwrap();
    let positions: Vec<usize> = signature.params().iter().map(Param::position).collect();
    assert_eq!(positions, vec![0, 1]);
}
