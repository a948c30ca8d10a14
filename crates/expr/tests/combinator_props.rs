//! Property tests for expression composition.

use ghgen_expr::{Expr, and, contains, not, or, starts_with};
use proptest::prelude::*;

fn operand() -> impl Strategy<Value = Expr> {
    prop_oneof![
        "[a-z][a-z_]{0,8}(\\.[a-z][a-z_]{0,8}){0,3}".prop_map(Expr::new),
        "[ -z]{0,12}".prop_map(Expr::string),
        any::<bool>().prop_map(Expr::bool),
        any::<i32>().prop_map(Expr::from),
    ]
}

fn expr() -> impl Strategy<Value = Expr> {
    operand().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| and(a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| or(a, b)),
            inner.clone().prop_map(not),
            (inner.clone(), inner).prop_map(|(a, b)| contains(a, b)),
        ]
    })
}

proptest! {
    #[test]
    fn and_contains_both_children(a in expr(), b in expr()) {
        let composed = and(a.clone(), b.clone());
        prop_assert!(composed.raw().contains(a.raw()));
        prop_assert!(composed.raw().contains(b.raw()));
        prop_assert!(composed.raw().contains(" && "));
    }

    #[test]
    fn or_contains_both_children(a in expr(), b in expr()) {
        let composed = or(a.clone(), b.clone());
        prop_assert!(composed.raw().contains(a.raw()));
        prop_assert!(composed.raw().contains(b.raw()));
        prop_assert!(composed.raw().contains(" || "));
    }

    #[test]
    fn not_wraps_child(a in expr()) {
        let negated = not(a.clone());
        prop_assert_eq!(negated.raw(), format!("!({})", a.raw()));
    }

    #[test]
    fn display_is_raw_wrapped_once(a in expr()) {
        prop_assert_eq!(a.to_string(), format!("${{{{ {} }}}}", a.raw()));
        prop_assert_eq!(a.wrapped(), a.to_string());
    }

    #[test]
    fn rewrapping_is_idempotent(a in expr()) {
        let reparsed = Expr::new(a.to_string());
        prop_assert_eq!(reparsed.raw(), a.raw());
    }

    #[test]
    fn function_args_are_raw(a in expr(), b in expr()) {
        let call = starts_with(a.clone(), b.clone());
        prop_assert_eq!(call.raw(), format!("startsWith({}, {})", a.raw(), b.raw()));
        prop_assert!(!call.raw().contains("${{"));
    }
}
