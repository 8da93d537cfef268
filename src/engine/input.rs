//! Typed input contracts and the retry-until-valid prompt loop.
use super::operator::{Level, Operator};
use super::RecipeError;
use regex::Regex;
use std::sync::OnceLock;

/// Answers accepted by [`InputContract::Flag`]; the first three mean yes.
pub const FLAG_VOCABULARY: [&str; 6] = ["1", "y", "yes", "0", "n", "no"];

/// Token substituted for an empty answer to a type question.
pub const AUTO_TYPE: &str = "auto";

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("regex for cpp identifiers")
    })
}

pub fn is_identifier(text: &str) -> bool {
    identifier_regex().is_match(text)
}

/// Semantic type an answer must satisfy before the engine accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContract<'a> {
    Integer,
    Choice {
        options: &'a [&'a str],
        default: &'a str,
    },
    Identifier,
    Flag,
    TypeOrDefault,
    NonEmpty,
}

/// Coerced answer returned by [`prompt_until_valid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Integer(i64),
    Text(String),
    Flag(bool),
}

impl Answer {
    pub fn into_text(self) -> String {
        match self {
            Answer::Text(text) => text,
            Answer::Integer(value) => value.to_string(),
            Answer::Flag(value) => value.to_string(),
        }
    }
}

impl InputContract<'_> {
    /// Check a trimmed answer, returning the diagnostic to show on rejection.
    pub fn accept(&self, input: &str) -> Result<Answer, String> {
        match self {
            InputContract::Integer => input
                .parse::<i64>()
                .map(Answer::Integer)
                .map_err(|_| "expecting an integer".to_string()),
            InputContract::Choice { options, default } => {
                let item = if input.is_empty() { *default } else { input };
                if options.contains(&item) {
                    Ok(Answer::Text(item.to_string()))
                } else {
                    Err(format!("expecting one of {}", options.join("/")))
                }
            }
            InputContract::Identifier => {
                if is_identifier(input) {
                    Ok(Answer::Text(input.to_string()))
                } else {
                    Err("expecting cpp identifier".to_string())
                }
            }
            InputContract::Flag => match FLAG_VOCABULARY.iter().position(|token| *token == input) {
                Some(idx) => Ok(Answer::Flag(idx < 3)),
                None => Err(format!("expecting one of {}", FLAG_VOCABULARY.join("/"))),
            },
            InputContract::TypeOrDefault => {
                let text = if input.is_empty() { AUTO_TYPE } else { input };
                Ok(Answer::Text(text.to_string()))
            }
            InputContract::NonEmpty => {
                if input.is_empty() {
                    Err("expecting a non-empty answer".to_string())
                } else {
                    Ok(Answer::Text(input.to_string()))
                }
            }
        }
    }
}

/// Ask `question` until the answer satisfies `contract`.
///
/// Every rejection is reported immediately as an `ERROR:` line and the
/// question is asked again. There is no retry bound; the loop only ends on a
/// valid answer or when the operator channel closes.
pub fn prompt_until_valid(
    operator: &mut dyn Operator,
    contract: &InputContract<'_>,
    question: &str,
) -> Result<Answer, RecipeError> {
    loop {
        let raw = operator.ask(question)?;
        match contract.accept(raw.trim()) {
            Ok(answer) => return Ok(answer),
            Err(diagnostic) => {
                tracing::debug!(question, answer = raw.as_str(), "rejected answer");
                operator.report(Level::Error, &diagnostic)?;
            }
        }
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
