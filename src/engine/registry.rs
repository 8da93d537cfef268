//! Explicit handler registry and the step dispatcher.
//!
//! Recipes declare `(metastep, step)` pairs in data; a concrete recipe type
//! registers one handler per pair plus optional per-metastep hooks. The
//! dispatcher is a plain map lookup, so a recipe/code mismatch surfaces as a
//! single named miss.
use super::kitchen::Kitchen;
use super::RecipeError;
use std::collections::HashMap;

pub type StepHandler<C> = fn(&mut C, &mut Kitchen<'_>, &str) -> Result<(), RecipeError>;
pub type LifecycleHook<C> = fn(&mut C, &mut Kitchen<'_>) -> Result<(), RecipeError>;
pub type RepeatHook<C> = fn(&mut C, &mut Kitchen<'_>) -> Result<usize, RecipeError>;

/// Optional lifecycle hooks for one metastep.
///
/// Absent `initialize`/`finalize` hooks are no-ops; an absent `repeat` hook
/// means a repeatable metastep runs zero times.
pub struct MetastepHooks<C> {
    pub initialize: Option<LifecycleHook<C>>,
    pub finalize: Option<LifecycleHook<C>>,
    pub repeat: Option<RepeatHook<C>>,
}

impl<C> Default for MetastepHooks<C> {
    fn default() -> Self {
        Self {
            initialize: None,
            finalize: None,
            repeat: None,
        }
    }
}

impl<C> Clone for MetastepHooks<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for MetastepHooks<C> {}

/// Name reported when no handler exists for a step.
pub fn handler_name(metastep: &str, step: &str) -> String {
    format!("{metastep}_step_{step}")
}

pub struct HandlerRegistry<C> {
    steps: HashMap<(String, String), StepHandler<C>>,
    hooks: HashMap<String, MetastepHooks<C>>,
}

impl<C> Default for HandlerRegistry<C> {
    fn default() -> Self {
        Self {
            steps: HashMap::new(),
            hooks: HashMap::new(),
        }
    }
}

impl<C> HandlerRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, metastep: &str, step: &str, handler: StepHandler<C>) -> Self {
        self.steps
            .insert((metastep.to_string(), step.to_string()), handler);
        self
    }

    pub fn initialize(mut self, metastep: &str, hook: LifecycleHook<C>) -> Self {
        self.hooks_mut(metastep).initialize = Some(hook);
        self
    }

    pub fn finalize(mut self, metastep: &str, hook: LifecycleHook<C>) -> Self {
        self.hooks_mut(metastep).finalize = Some(hook);
        self
    }

    pub fn repeat(mut self, metastep: &str, hook: RepeatHook<C>) -> Self {
        self.hooks_mut(metastep).repeat = Some(hook);
        self
    }

    fn hooks_mut(&mut self, metastep: &str) -> &mut MetastepHooks<C> {
        self.hooks.entry(metastep.to_string()).or_default()
    }

    pub fn handler(&self, metastep: &str, step: &str) -> Option<StepHandler<C>> {
        self.steps
            .get(&(metastep.to_string(), step.to_string()))
            .copied()
    }

    pub fn hooks(&self, metastep: &str) -> MetastepHooks<C> {
        self.hooks.get(metastep).copied().unwrap_or_default()
    }

    /// Invoke the handler registered for `(metastep, step)` with the step ref.
    pub fn dispatch(
        &self,
        cook: &mut C,
        kitchen: &mut Kitchen<'_>,
        metastep: &str,
        step: &str,
        reference: &str,
    ) -> Result<(), RecipeError> {
        let Some(handler) = self.handler(metastep, step) else {
            return Err(RecipeError::MissingHandler {
                name: handler_name(metastep, step),
            });
        };
        tracing::debug!(metastep, step, reference, "dispatch step");
        handler(cook, kitchen, reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::annotation::AnnotationSink;
    use crate::engine::operator::Console;
    use std::io::Cursor;

    #[derive(Default)]
    struct Trace {
        calls: Vec<String>,
    }

    fn record(
        trace: &mut Trace,
        _kitchen: &mut Kitchen<'_>,
        reference: &str,
    ) -> Result<(), RecipeError> {
        trace.calls.push(format!("name:{reference}"));
        Ok(())
    }

    #[test]
    fn dispatch_invokes_registered_handler_with_ref() {
        let registry = HandlerRegistry::new().step("root", "name", record);
        let mut console = Console::new(Cursor::new(""), Vec::new());
        let mut sink = AnnotationSink::new(false);
        let mut kitchen = Kitchen::new(&mut console, &mut sink);
        let mut trace = Trace::default();
        registry
            .dispatch(&mut trace, &mut kitchen, "root", "name", "CCS.1")
            .expect("dispatch");
        assert_eq!(trace.calls, vec!["name:CCS.1".to_string()]);
    }

    #[test]
    fn dispatch_miss_names_the_handler() {
        let registry = HandlerRegistry::new().step("root", "name", record);
        let mut console = Console::new(Cursor::new(""), Vec::new());
        let mut sink = AnnotationSink::new(false);
        let mut kitchen = Kitchen::new(&mut console, &mut sink);
        let mut trace = Trace::default();
        let err = registry
            .dispatch(&mut trace, &mut kitchen, "root", "missing", "")
            .expect_err("missing handler");
        assert!(
            matches!(&err, RecipeError::MissingHandler { name } if name == "root_step_missing")
        );
        assert_eq!(err.to_string(), "root_step_missing step is not implemented");
        assert!(trace.calls.is_empty());
    }

    #[test]
    fn absent_hooks_default_to_none() {
        let registry: HandlerRegistry<Trace> = HandlerRegistry::new();
        let hooks = registry.hooks("anything");
        assert!(hooks.initialize.is_none());
        assert!(hooks.finalize.is_none());
        assert!(hooks.repeat.is_none());
    }
}
