//! Property-based tests for the parametric name grammar and case-insensitive lookup

use proptest::prelude::*;
use runvars::error::VarError;
use runvars::external::fixed;
use runvars::vars::{BuiltinOptions, ParametricName, VariableRegistry, DOMAIN_PREFIX};

/// Randomly flip the ASCII case of each character
fn mixed_case(name: &str, mask: &[bool]) -> String {
    name.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn test_positive_indexes_parse(index in 1usize..100_000, zeros in 0usize..4, mask in prop::collection::vec(any::<bool>(), 1..8)) {
        let name = mixed_case(
            &format!("{}{}{}", DOMAIN_PREFIX, "0".repeat(zeros), index),
            &mask,
        );
        let parsed = ParametricName::parse(&name).unwrap().unwrap();
        prop_assert_eq!(parsed.index, index);
        prop_assert_eq!(parsed.position(), index - 1);
    }

    #[test]
    fn test_non_digit_suffix_is_malformed(suffix in "[0-9]*[^0-9][ -~]*") {
        let name = format!("{}{}", DOMAIN_PREFIX, suffix);
        let result = ParametricName::parse(&name);
        let is_malformed = matches!(result, Err(VarError::MalformedIndex { .. }));
        prop_assert!(is_malformed);
    }

    #[test]
    fn test_names_without_prefix_are_not_parametric(name in "[A-Z_]{0,20}") {
        prop_assume!(!name.starts_with(DOMAIN_PREFIX));
        prop_assert!(ParametricName::parse(&name).unwrap().is_none());
    }

    #[test]
    fn test_static_lookup_ignores_case(mask in prop::collection::vec(any::<bool>(), 1..24)) {
        let mut registry =
            VariableRegistry::with_builtins(fixed::providers(), &BuiltinOptions::default());
        registry.resolve_all(None).unwrap();

        for name in ["DEVSPACE_RANDOM", "DEVSPACE_TIMESTAMP"] {
            let expected = registry.lookup(name, None).unwrap();
            let actual = registry.lookup(&mixed_case(name, &mask), None).unwrap();
            prop_assert!(expected.is_some());
            prop_assert_eq!(actual, expected);
        }
    }
}
