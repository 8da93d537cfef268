//! Per-run context handed to every step handler and lifecycle hook.
use super::annotation::{format_live, Annotation, AnnotationSink};
use super::input::{prompt_until_valid, Answer, InputContract};
use super::operator::{format_query, Level, Operator};
use super::RecipeError;

pub struct Kitchen<'a> {
    operator: &'a mut dyn Operator,
    annotations: &'a mut AnnotationSink,
}

impl<'a> Kitchen<'a> {
    pub fn new(operator: &'a mut dyn Operator, annotations: &'a mut AnnotationSink) -> Self {
        Self {
            operator,
            annotations,
        }
    }

    pub fn say(&mut self, line: &str) -> Result<(), RecipeError> {
        self.operator.say(line)
    }

    /// Route annotations through the run's live/buffered sink.
    pub fn handle_annotations(&mut self, annotations: &[Annotation]) -> Result<(), RecipeError> {
        self.annotations.handle(&mut *self.operator, annotations)
    }

    /// Attach a runtime annotation produced by a handler.
    pub fn annotate(&mut self, kind: &str, reference: &str, msg: &str) -> Result<(), RecipeError> {
        self.handle_annotations(&[Annotation::new(kind, reference, msg)])
    }

    /// Show a tip the operator is about to react to; always printed immediately.
    pub fn tip(&mut self, reference: &str, msg: &str) -> Result<(), RecipeError> {
        self.operator.say(&format_live(&Level::Tips.to_string(), reference, msg))
    }

    /// Ask without any contract; the raw answer is returned as typed.
    pub fn ask_free(&mut self, query: &str, reference: &str) -> Result<String, RecipeError> {
        self.operator.ask(&format_query(query, reference))
    }

    pub fn ask(
        &mut self,
        contract: &InputContract<'_>,
        query: &str,
        reference: &str,
    ) -> Result<Answer, RecipeError> {
        prompt_until_valid(&mut *self.operator, contract, &format_query(query, reference))
    }

    pub fn ask_flag(&mut self, query: &str, reference: &str) -> Result<bool, RecipeError> {
        let answer = self.ask(&InputContract::Flag, &format!("{query} (y/n)"), reference)?;
        Ok(matches!(answer, Answer::Flag(true)))
    }

    pub fn ask_identifier(&mut self, query: &str, reference: &str) -> Result<String, RecipeError> {
        Ok(self
            .ask(&InputContract::Identifier, query, reference)?
            .into_text())
    }

    pub fn ask_type(&mut self, query: &str, reference: &str) -> Result<String, RecipeError> {
        Ok(self
            .ask(
                &InputContract::TypeOrDefault,
                &format!("{query} (default: auto)"),
                reference,
            )?
            .into_text())
    }

    pub fn ask_text(&mut self, query: &str, reference: &str) -> Result<String, RecipeError> {
        Ok(self.ask(&InputContract::NonEmpty, query, reference)?.into_text())
    }

    pub fn ask_choice(
        &mut self,
        query: &str,
        options: &[&str],
        default: &str,
        reference: &str,
    ) -> Result<String, RecipeError> {
        let contract = InputContract::Choice { options, default };
        Ok(self.ask(&contract, query, reference)?.into_text())
    }

    /// Ask for a repeat count; negative answers mean no iterations.
    pub fn ask_count(&mut self, query: &str) -> Result<usize, RecipeError> {
        match self.ask(&InputContract::Integer, query, "")? {
            Answer::Integer(value) => Ok(usize::try_from(value).unwrap_or(0)),
            _ => Ok(0),
        }
    }
}
