//! Predefined Variables
//!
//! Registry of named runtime values (commit hash, random token, timestamp, space and account
//! identifiers) available to configuration templating. Static variables are resolved eagerly
//! by [`VariableRegistry::resolve_all`] and cached; the indexed `DEVSPACE_SPACE_DOMAIN<n>`
//! family is resolved on every [`VariableRegistry::lookup`] and never cached.

use crate::error::{ProviderError, VarError};
use crate::external::Providers;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub mod builtin;
mod domain;
mod messages;
pub mod pattern;

pub use builtin::BuiltinOptions;
pub use pattern::{ParametricName, DOMAIN_PREFIX};

/// Result of a successful resolver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved(String),
    /// Nothing to resolve (no git repository, not logged in, ...); not an error.
    Unavailable,
}

/// Cache state of a static variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    /// No resolution pass has run yet
    #[default]
    Pending,
    Resolved(String),
    Unavailable,
}

impl Slot {
    pub fn value(&self) -> Option<&str> {
        match self {
            Slot::Resolved(value) => Some(value),
            Slot::Pending | Slot::Unavailable => None,
        }
    }
}

impl From<Outcome> for Slot {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Resolved(value) => Slot::Resolved(value),
            Outcome::Unavailable => Slot::Unavailable,
        }
    }
}

/// Resolver of a static variable.
///
/// Errors are hard failures (malformed external state) and abort the resolution pass.
pub trait Resolve: Send + Sync {
    fn resolve(
        &self,
        providers: &Providers,
        context_override: Option<&str>,
    ) -> Result<Outcome, ProviderError>;
}

impl<F> Resolve for F
where
    F: Fn(&Providers, Option<&str>) -> Result<Outcome, ProviderError> + Send + Sync,
{
    fn resolve(
        &self,
        providers: &Providers,
        context_override: Option<&str>,
    ) -> Result<Outcome, ProviderError> {
        self(providers, context_override)
    }
}

/// A static variable with its cache slot.
pub struct VariableDefinition {
    name: String,
    resolver: Box<dyn Resolve>,
    unavailable_message: String,
    slot: Slot,
}

impl VariableDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unavailable_message(&self) -> &str {
        &self.unavailable_message
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }
}

impl std::fmt::Debug for VariableDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableDefinition")
            .field("name", &self.name)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Catalogue of static variables over a set of injected providers.
pub struct VariableRegistry {
    providers: Providers,
    definitions: BTreeMap<String, VariableDefinition>,
}

fn canonical(name: &str) -> String {
    name.to_ascii_uppercase()
}

impl VariableRegistry {
    /// Empty registry
    pub fn new(providers: Providers) -> Self {
        Self {
            providers,
            definitions: BTreeMap::new(),
        }
    }

    /// Registry holding the built-in catalogue
    pub fn with_builtins(providers: Providers, options: &BuiltinOptions) -> Self {
        let mut registry = Self::new(providers);
        for (name, resolver, message) in builtin::catalogue(options) {
            registry.insert(name.to_string(), resolver, message);
        }
        registry
    }

    /// Add a static variable. Names are case-insensitive and must be unique.
    pub fn define(
        &mut self,
        name: &str,
        resolver: impl Resolve + 'static,
        unavailable_message: impl Into<String>,
    ) -> Result<(), VarError> {
        let name = canonical(name);
        if self.definitions.contains_key(&name) {
            return Err(VarError::Duplicate(name));
        }
        self.insert(name, Box::new(resolver), unavailable_message.into());
        Ok(())
    }

    fn insert(&mut self, name: String, resolver: Box<dyn Resolve>, unavailable_message: String) {
        self.definitions.insert(
            name.clone(),
            VariableDefinition {
                name,
                resolver,
                unavailable_message,
                slot: Slot::Pending,
            },
        );
    }

    /// Cache slot of a static variable; `None` for unknown names.
    pub fn get(&self, name: &str) -> Option<&Slot> {
        self.definitions.get(&canonical(name)).map(|d| &d.slot)
    }

    /// Static variable names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &VariableDefinition> {
        self.definitions.values()
    }

    /// Run every resolver and replace the cache.
    ///
    /// The first hard error aborts the pass and is returned with the variable name; the cache
    /// then keeps the contents of the previous successful pass. An empty override is ignored.
    pub fn resolve_all(&mut self, context_override: Option<&str>) -> Result<(), VarError> {
        let context_override = context_override.filter(|c| !c.is_empty());
        debug!(
            variables = self.definitions.len(),
            context_override = context_override.unwrap_or_default(),
            "Resolving predefined variables"
        );

        let mut staged = Vec::with_capacity(self.definitions.len());
        for (name, definition) in &self.definitions {
            match definition.resolver.resolve(&self.providers, context_override) {
                Ok(outcome) => {
                    debug!(
                        variable = %name,
                        available = matches!(outcome, Outcome::Resolved(_)),
                        "Resolved predefined variable"
                    );
                    staged.push(Slot::from(outcome));
                }
                Err(source) => {
                    warn!(variable = %name, error = %source, "Predefined variable resolution aborted");
                    return Err(VarError::Fill {
                        name: name.clone(),
                        source,
                    });
                }
            }
        }

        let mut available = 0;
        for (definition, slot) in self.definitions.values_mut().zip(staged) {
            if slot.value().is_some() {
                available += 1;
            }
            definition.slot = slot;
        }
        info!(
            available,
            total = self.definitions.len(),
            "Predefined variables resolved"
        );
        Ok(())
    }

    /// Look a variable up by name (case-insensitive).
    ///
    /// - `Ok(Some(value))`: resolved
    /// - `Ok(None)`: not a predefined variable
    /// - `Err(VarError::Unavailable)`: known static variable without a value
    /// - other errors: malformed or unresolvable `DEVSPACE_SPACE_DOMAIN<n>`
    pub fn lookup(
        &self,
        name: &str,
        context_override: Option<&str>,
    ) -> Result<Option<String>, VarError> {
        if let Some(definition) = self.definitions.get(&canonical(name)) {
            return match &definition.slot {
                Slot::Resolved(value) => Ok(Some(value.clone())),
                Slot::Pending | Slot::Unavailable => Err(VarError::Unavailable {
                    name: definition.name.clone(),
                    message: definition.unavailable_message.clone(),
                }),
            };
        }

        match ParametricName::parse(name)? {
            Some(request) => {
                let context_override = context_override.filter(|c| !c.is_empty());
                domain::resolve_domain(&self.providers, name, &request, context_override)
                    .map(Some)
            }
            None => Ok(None),
        }
    }
}
