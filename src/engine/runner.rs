//! Recipe runner: binds a concrete recipe type to its registry and runs it.
use super::annotation::{Annotation, AnnotationSink};
use super::kitchen::Kitchen;
use super::lifecycle::cook_metastep;
use super::model::Recipe;
use super::operator::Operator;
use super::registry::HandlerRegistry;
use super::serve::{Dish, TemplateRenderer};
use super::RecipeError;

/// Capability surface of a concrete recipe type.
///
/// The implementing value is the run's session state; it is reset to
/// `Default` at the start of every run.
pub trait Cook: Default + Sized {
    /// Handlers and hooks for every step the recipe data may declare.
    fn registry() -> HandlerRegistry<Self>;

    /// Build the final dish from session state and buffered annotations.
    fn plate(
        &self,
        annotations: &[Annotation],
        templates: &dyn TemplateRenderer,
    ) -> Result<Dish, RecipeError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub metasteps: usize,
    pub iterations: usize,
}

pub struct Chef<C> {
    cook: C,
    registry: HandlerRegistry<C>,
    annotations: AnnotationSink,
}

impl<C: Cook> Chef<C> {
    pub fn new(live_annotations: bool) -> Self {
        Self {
            cook: C::default(),
            registry: C::registry(),
            annotations: AnnotationSink::new(live_annotations),
        }
    }

    /// Run every metastep of `recipe` in order; the first error aborts the run.
    pub fn cook(
        &mut self,
        recipe: &Recipe,
        operator: &mut dyn Operator,
    ) -> Result<RunReport, RecipeError> {
        self.cook = C::default();
        self.annotations.reset();
        let mut report = RunReport::default();
        let mut kitchen = Kitchen::new(operator, &mut self.annotations);
        for metastep in &recipe.metasteps {
            tracing::info!(metastep = metastep.id.as_str(), "cook metastep");
            report.iterations +=
                cook_metastep(&mut self.cook, &self.registry, &mut kitchen, metastep)?;
            report.metasteps += 1;
        }
        tracing::debug!(
            metasteps = report.metasteps,
            iterations = report.iterations,
            "recipe cooked"
        );
        Ok(report)
    }

    #[cfg(test)]
    pub fn session(&self) -> &C {
        &self.cook
    }

    #[cfg(test)]
    pub fn annotations(&self) -> &[Annotation] {
        self.annotations.buffered()
    }

    pub fn plate(&self, templates: &dyn TemplateRenderer) -> Result<Dish, RecipeError> {
        self.cook.plate(self.annotations.buffered(), templates)
    }
}
