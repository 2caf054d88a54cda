//! Integration tests for variable lookup: cached statics and on-demand space domains

use crate::integration::fixture;
use runvars::error::VarError;
use runvars::external::fixed::{FixedCloudConfig, FixedContexts};
use runvars::external::CloudConfig;
use runvars::vars::{BuiltinOptions, VariableRegistry};
use std::sync::Arc;

fn resolved_registry() -> VariableRegistry {
    let mut registry =
        VariableRegistry::with_builtins(fixture::providers(), &BuiltinOptions::default());
    registry.resolve_all(None).unwrap();
    registry
}

#[test]
fn test_lookup_is_case_insensitive() {
    let registry = resolved_registry();
    for name in ["DEVSPACE_SPACE", "devspace_space", "DevSpace_Space"] {
        assert_eq!(registry.lookup(name, None).unwrap().as_deref(), Some("frontend"));
    }
    assert_eq!(
        registry
            .lookup("devspace_space_domain2", None)
            .unwrap()
            .as_deref(),
        Some("b.example.com")
    );
}

#[test]
fn test_unknown_names_are_not_predefined() {
    let registry = resolved_registry();
    assert_eq!(registry.lookup("NOT_A_VAR", None).unwrap(), None);
    // the prefix claims the name, so a bad suffix is an error rather than "unknown"
    assert!(!registry
        .lookup("DEVSPACE_SPACE_DOMAINS", None)
        .unwrap_err()
        .is_recognized());
    assert_eq!(registry.lookup("DEVSPACE_DOMAIN1", None).unwrap(), None);
}

#[test]
fn test_domain_index_bounds() {
    let registry = resolved_registry();
    assert_eq!(
        registry
            .lookup("DEVSPACE_SPACE_DOMAIN1", None)
            .unwrap()
            .as_deref(),
        Some("a.example.com")
    );
    assert_eq!(
        registry
            .lookup("DEVSPACE_SPACE_DOMAIN002", None)
            .unwrap()
            .as_deref(),
        Some("b.example.com")
    );

    let err = registry.lookup("DEVSPACE_SPACE_DOMAIN3", None).unwrap_err();
    match &err {
        VarError::DomainOutOfRange {
            requested,
            available,
            ..
        } => {
            assert_eq!(*requested, 3);
            assert_eq!(*available, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_recognized());
    assert!(err.to_string().contains("requested 3, available 2"));
}

#[test]
fn test_malformed_domain_index() {
    let registry = resolved_registry();
    for name in [
        "DEVSPACE_SPACE_DOMAIN",
        "DEVSPACE_SPACE_DOMAIN0",
        "DEVSPACE_SPACE_DOMAIN1X",
        "DEVSPACE_SPACE_DOMAIN-1",
        "DEVSPACE_SPACE_DOMAIN99999999999999999999999",
    ] {
        let err = registry.lookup(name, None).unwrap_err();
        assert!(matches!(err, VarError::MalformedIndex { .. }), "{name}");
        assert!(!err.is_recognized());
    }
}

#[test]
fn test_domain_override_uses_other_space() {
    let registry = resolved_registry();
    assert_eq!(
        registry
            .lookup("DEVSPACE_SPACE_DOMAIN1", Some("space-backend"))
            .unwrap()
            .as_deref(),
        Some("api.example.com")
    );
    // the static cache still reflects the pass, not the lookup override
    assert_eq!(
        registry.lookup("DEVSPACE_SPACE", Some("space-backend")).unwrap().as_deref(),
        Some("frontend")
    );
}

#[test]
fn test_domain_lookup_errors() {
    let registry = resolved_registry();
    assert!(matches!(
        registry.lookup("DEVSPACE_SPACE_DOMAIN1", Some("minikube")),
        Err(VarError::NoSpace { .. })
    ));

    let mut providers = fixture::providers();
    providers.contexts = Arc::new(FixedContexts::without_current());
    let registry = VariableRegistry::with_builtins(providers.clone(), &BuiltinOptions::default());
    let err = registry.lookup("DEVSPACE_SPACE_DOMAIN1", None).unwrap_err();
    assert!(matches!(err, VarError::NoSpace { .. }));
    assert!(err.to_string().contains("devspace create space"));

    providers.contexts = Arc::new(fixture::contexts());
    providers.cloud = Arc::new(FixedCloudConfig::new(CloudConfig::default()));
    let registry = VariableRegistry::with_builtins(providers.clone(), &BuiltinOptions::default());
    assert!(matches!(
        registry.lookup("DEVSPACE_SPACE_DOMAIN1", None),
        Err(VarError::ProviderNotFound { .. })
    ));

    providers.cloud = Arc::new(FixedCloudConfig::broken());
    let registry = VariableRegistry::with_builtins(providers, &BuiltinOptions::default());
    assert!(matches!(
        registry.lookup("DEVSPACE_SPACE_DOMAIN1", None),
        Err(VarError::ProviderConfig(_))
    ));
}

#[test]
fn test_unresolved_static_reports_message() {
    let registry =
        VariableRegistry::with_builtins(fixture::providers(), &BuiltinOptions::default());
    let err = registry.lookup("devspace_random", None).unwrap_err();
    match err {
        VarError::Unavailable { name, message } => {
            assert_eq!(name, "DEVSPACE_RANDOM");
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lookup_is_idempotent() {
    let registry = resolved_registry();
    let first = registry.lookup("DEVSPACE_RANDOM", None).unwrap();
    let second = registry.lookup("DEVSPACE_RANDOM", None).unwrap();
    assert_eq!(first, second);

    let domain_a = registry.lookup("DEVSPACE_SPACE_DOMAIN1", None).unwrap();
    let domain_b = registry.lookup("DEVSPACE_SPACE_DOMAIN1", None).unwrap();
    assert_eq!(domain_a, domain_b);
}
