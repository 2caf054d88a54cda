//! CLI route: single route table and run context. Drives the variable registry and presentation.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{format_get_result, format_list_result, LookupView, VariableView};
use crate::config::ConfigLoader;
use crate::error::AppError;
use crate::vars::VariableRegistry;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info_span};

/// Runtime context for CLI execution: the variable registry and the context override.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    registry: VariableRegistry,
    kube_context: Option<String>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, AppError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        config.ensure_valid()?;

        let providers = config.providers(&workspace_root)?;
        let options = config.builtin_options(&workspace_root);
        let registry = VariableRegistry::with_builtins(providers, &options);

        Ok(Self::with_registry(registry))
    }

    /// Run context around an already built registry.
    pub fn with_registry(registry: VariableRegistry) -> Self {
        Self {
            registry,
            kube_context: None,
        }
    }

    /// Resolve space variables against `context` instead of the current kube-context.
    pub fn with_kube_context(mut self, context: Option<String>) -> Self {
        self.kube_context = context;
        self
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&mut self, command: &Commands) -> Result<String, AppError> {
        let span = info_span!("command", name = command_name(command));
        let _guard = span.enter();
        let started = Instant::now();

        let result = match command {
            Commands::List { format } => self.handle_list(format),
            Commands::Get { names, format } => self.handle_get(names, format),
        };

        debug!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_list(&mut self, format: &str) -> Result<String, AppError> {
        self.registry.resolve_all(self.kube_context.as_deref())?;

        let variables: Vec<VariableView> = self
            .registry
            .definitions()
            .map(|definition| VariableView {
                name: definition.name().to_string(),
                value: definition.slot().value().map(str::to_string),
            })
            .collect();
        format_list_result(&variables, format)
    }

    fn handle_get(&mut self, names: &[String], format: &str) -> Result<String, AppError> {
        let context = self.kube_context.as_deref();
        self.registry.resolve_all(context)?;

        let mut lookups = Vec::with_capacity(names.len());
        for name in names {
            lookups.push(LookupView {
                name: name.clone(),
                value: self.registry.lookup(name, context)?,
            });
        }
        format_get_result(&lookups, format)
    }
}
