//! Advisory annotations and the live/buffered sink that routes them.
use super::operator::Operator;
use super::RecipeError;
use serde::{Deserialize, Serialize};

/// Advisory message tagged with a category and a citation ref.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "ref", default)]
    pub reference: String,
    pub msg: String,
}

impl Annotation {
    pub fn new(kind: &str, reference: &str, msg: &str) -> Self {
        Self {
            kind: kind.to_string(),
            reference: reference.to_string(),
            msg: msg.to_string(),
        }
    }
}

pub fn format_live(kind: &str, reference: &str, msg: &str) -> String {
    format!("(!) {kind} [{reference}]: {msg}")
}

/// Print a batch of annotations, followed by a blank line when non-empty.
pub fn print_batch(
    operator: &mut dyn Operator,
    annotations: &[Annotation],
) -> Result<(), RecipeError> {
    for annotation in annotations {
        operator.say(&format_live(
            &annotation.kind,
            &annotation.reference,
            &annotation.msg,
        ))?;
    }
    if !annotations.is_empty() {
        operator.say("")?;
    }
    Ok(())
}

/// Run-scoped annotation sink.
///
/// In live mode annotations are printed as they arrive and never stored; in
/// buffered mode they accumulate in arrival order until the dish is served.
#[derive(Debug, Default)]
pub struct AnnotationSink {
    live: bool,
    buffered: Vec<Annotation>,
}

impl AnnotationSink {
    pub fn new(live: bool) -> Self {
        Self {
            live,
            buffered: Vec::new(),
        }
    }

    /// Drop everything buffered by a previous run.
    pub fn reset(&mut self) {
        self.buffered.clear();
    }

    pub fn handle(
        &mut self,
        operator: &mut dyn Operator,
        annotations: &[Annotation],
    ) -> Result<(), RecipeError> {
        if self.live {
            print_batch(operator, annotations)
        } else {
            self.buffered.extend(annotations.iter().cloned());
            Ok(())
        }
    }

    pub fn buffered(&self) -> &[Annotation] {
        &self.buffered
    }
}
