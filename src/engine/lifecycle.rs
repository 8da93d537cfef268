//! Metastep lifecycle: annotate, then per iteration initialize → steps → finalize.
use super::kitchen::Kitchen;
use super::model::Metastep;
use super::registry::HandlerRegistry;
use super::RecipeError;

/// Number of iterations a metastep will run.
///
/// A repeatable metastep without a repeat hook runs zero times.
pub fn iteration_count<C>(
    cook: &mut C,
    registry: &HandlerRegistry<C>,
    kitchen: &mut Kitchen<'_>,
    metastep: &Metastep,
) -> Result<usize, RecipeError> {
    if !metastep.repeatable {
        return Ok(1);
    }
    match registry.hooks(&metastep.id).repeat {
        Some(repeat) => repeat(cook, kitchen),
        None => {
            tracing::debug!(metastep = metastep.id.as_str(), "no repeat hook, skipping");
            Ok(0)
        }
    }
}

/// Drive one metastep and return the number of iterations executed.
pub fn cook_metastep<C>(
    cook: &mut C,
    registry: &HandlerRegistry<C>,
    kitchen: &mut Kitchen<'_>,
    metastep: &Metastep,
) -> Result<usize, RecipeError> {
    kitchen.say("")?;
    kitchen.say(&format!("~~~ Recipe step - {} ~~~", metastep.desc))?;
    kitchen.say("")?;
    kitchen.handle_annotations(&metastep.annotations)?;

    let count = iteration_count(cook, registry, kitchen, metastep)?;
    let hooks = registry.hooks(&metastep.id);
    for idx in 0..count {
        if count > 1 {
            kitchen.say("")?;
            kitchen.say(&format!("~~~ Repeat count - {} ~~~", idx + 1))?;
            kitchen.say("")?;
        }
        if let Some(initialize) = hooks.initialize {
            initialize(cook, kitchen)?;
        }
        for step in &metastep.steps {
            registry.dispatch(cook, kitchen, &metastep.id, &step.id, &step.reference)?;
        }
        if let Some(finalize) = hooks.finalize {
            finalize(cook, kitchen)?;
        }
    }
    Ok(count)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
