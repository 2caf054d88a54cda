//! Integration tests over file-backed kube-config, cloud config and account tokens

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use runvars::error::{ProviderError, VarError};
use runvars::external::fixed::FixedRepository;
use runvars::external::{CloudConfigFile, KubeConfigFile, Providers};
use runvars::vars::builtin::{SPACE, SPACE_NAMESPACE, USERNAME};
use runvars::vars::{BuiltinOptions, Slot, VariableRegistry};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const KUBECONFIG: &str = r#"
apiVersion: v1
kind: Config
current-context: devspace-shop
contexts:
- name: devspace-shop
  context:
    cluster: devspace
    extensions:
    - name: devspace-space-id
      extension: 7
    - name: devspace-space-provider
      extension: app.devspace.cloud
- name: devspace-corrupt
  context:
    cluster: devspace
    extensions:
    - name: devspace-space-id
      extension: seven
- name: docker-desktop
  context:
    cluster: docker-desktop
"#;

fn token_for(name: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"name":"{}","sub":"42"}}"#, name));
    format!("{}.{}.signature", header, payload)
}

fn clouds_yaml(token: &str) -> String {
    format!(
        r#"
providers:
- name: app.devspace.cloud
  host: https://app.devspace.cloud
  token: {token}
  spaces:
    7:
      space:
        name: shop
        domains:
        - url: shop.devspace.host
        - url: admin.shop.devspace.host
      serviceAccount:
        namespace: shop-ns
"#
    )
}

fn write_sources(dir: &Path, kubeconfig: &str, clouds: &str) -> Providers {
    let kube_path = dir.join("kubeconfig");
    let cloud_path = dir.join("clouds.yaml");
    std::fs::write(&kube_path, kubeconfig).unwrap();
    std::fs::write(&cloud_path, clouds).unwrap();

    let mut providers = Providers::from_files(
        KubeConfigFile::new(kube_path),
        CloudConfigFile::new(cloud_path),
    );
    providers.repository = Arc::new(FixedRepository::new("feedfacecafebeef"));
    providers
}

fn registry(providers: Providers) -> VariableRegistry {
    VariableRegistry::with_builtins(providers, &BuiltinOptions::default())
}

#[test]
fn test_space_and_account_from_files() {
    let temp = TempDir::new().unwrap();
    let providers = write_sources(temp.path(), KUBECONFIG, &clouds_yaml(&token_for("bob")));
    let mut registry = registry(providers);
    registry.resolve_all(None).unwrap();

    assert_eq!(registry.lookup(SPACE, None).unwrap().as_deref(), Some("shop"));
    assert_eq!(
        registry.lookup(SPACE_NAMESPACE, None).unwrap().as_deref(),
        Some("shop-ns")
    );
    assert_eq!(registry.lookup(USERNAME, None).unwrap().as_deref(), Some("bob"));
    assert_eq!(
        registry
            .lookup("devspace_space_domain2", None)
            .unwrap()
            .as_deref(),
        Some("admin.shop.devspace.host")
    );
    // system clock and rand backed values
    let random = registry.lookup("DEVSPACE_RANDOM", None).unwrap().unwrap();
    assert_eq!(random.len(), 6);
    assert!(random
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    let timestamp: i64 = registry
        .lookup("DEVSPACE_TIMESTAMP", None)
        .unwrap()
        .unwrap()
        .parse()
        .unwrap();
    assert!(timestamp > 0);
}

#[test]
fn test_malformed_space_id_aborts_pass() {
    let temp = TempDir::new().unwrap();
    let providers = write_sources(temp.path(), KUBECONFIG, &clouds_yaml(&token_for("bob")));
    let mut registry = registry(providers);

    let err = registry.resolve_all(Some("devspace-corrupt")).unwrap_err();
    match err {
        VarError::Fill { name, source } => {
            assert_eq!(name, SPACE);
            assert!(matches!(source, ProviderError::InvalidSpaceId { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_plain_context_and_unknown_context() {
    let temp = TempDir::new().unwrap();
    let providers = write_sources(temp.path(), KUBECONFIG, &clouds_yaml(&token_for("bob")));
    let mut registry = registry(providers);

    registry.resolve_all(Some("docker-desktop")).unwrap();
    assert_eq!(registry.get(SPACE), Some(&Slot::Unavailable));
    assert_eq!(registry.lookup(USERNAME, None).unwrap().as_deref(), Some("bob"));

    // an unknown context is suppressed for the space variables
    registry.resolve_all(Some("does-not-exist")).unwrap();
    assert_eq!(registry.get(SPACE), Some(&Slot::Unavailable));
    assert!(matches!(
        registry.lookup("DEVSPACE_SPACE_DOMAIN1", Some("does-not-exist")),
        Err(VarError::NoSpace { .. })
    ));
}

#[test]
fn test_missing_files_leave_variables_unavailable() {
    let temp = TempDir::new().unwrap();
    let mut providers = Providers::from_files(
        KubeConfigFile::new(temp.path().join("no-kubeconfig")),
        CloudConfigFile::new(temp.path().join("no-clouds.yaml")),
    );
    providers.repository = Arc::new(FixedRepository::default());
    let mut registry = registry(providers);

    registry.resolve_all(None).unwrap();
    assert_eq!(registry.get(SPACE), Some(&Slot::Unavailable));
    assert_eq!(registry.get(USERNAME), Some(&Slot::Unavailable));
    assert!(matches!(
        registry.lookup("DEVSPACE_SPACE_DOMAIN1", None),
        Err(VarError::NoSpace { .. })
    ));
}

#[test]
fn test_unparsable_kubeconfig_fails_domain_lookup() {
    let temp = TempDir::new().unwrap();
    let providers = write_sources(
        temp.path(),
        "contexts: [unterminated",
        &clouds_yaml(&token_for("bob")),
    );
    let registry = registry(providers);

    assert!(matches!(
        registry.lookup("DEVSPACE_SPACE_DOMAIN1", None),
        Err(VarError::CurrentContext(ProviderError::Parse { .. }))
    ));
}

#[test]
fn test_invalid_token_leaves_username_unavailable() {
    let temp = TempDir::new().unwrap();
    let providers = write_sources(temp.path(), KUBECONFIG, &clouds_yaml("not-a-jwt"));
    let mut registry = registry(providers);

    registry.resolve_all(None).unwrap();
    assert_eq!(registry.get(USERNAME), Some(&Slot::Unavailable));
    let err = registry.lookup(USERNAME, None).unwrap_err();
    assert!(err.to_string().contains("devspace login"));
}

#[test]
fn test_unparsable_cloud_config_is_hard_for_username() {
    let temp = TempDir::new().unwrap();
    let providers = write_sources(temp.path(), KUBECONFIG, "providers: [unterminated");
    let mut registry = registry(providers);

    let err = registry.resolve_all(None).unwrap_err();
    assert!(matches!(
        err,
        VarError::Fill { ref name, source: ProviderError::Parse { .. } } if name == USERNAME
    ));
}
