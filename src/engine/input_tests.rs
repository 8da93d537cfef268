use super::*;
use crate::engine::operator::Console;
use std::io::Cursor;

fn run(contract: InputContract<'_>, script: &str) -> (Answer, Vec<String>) {
    let mut console = Console::new(Cursor::new(script.to_string()), Vec::new());
    let answer = prompt_until_valid(&mut console, &contract, "Question").expect("valid answer");
    let shown = String::from_utf8(console.into_output()).expect("utf8");
    let errors = shown
        .split("Question: ")
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.trim_end().to_string())
        .filter(|chunk| !chunk.is_empty())
        .collect();
    (answer, errors)
}

#[test]
fn integer_retries_once_after_garbage() {
    let (answer, errors) = run(InputContract::Integer, "three\n 3 \n");
    assert_eq!(answer, Answer::Integer(3));
    assert_eq!(errors, vec!["ERROR: expecting an integer".to_string()]);
}

#[test]
fn choice_blank_maps_to_default() {
    let options = ["y", "n"];
    let contract = InputContract::Choice {
        options: &options,
        default: "n",
    };
    let (answer, errors) = run(contract, "\n");
    assert_eq!(answer, Answer::Text("n".to_string()));
    assert!(errors.is_empty());
}

#[test]
fn choice_rejects_non_member_then_accepts() {
    let options = ["unit", "system"];
    let contract = InputContract::Choice {
        options: &options,
        default: "unit",
    };
    let (answer, errors) = run(contract, "galaxy\nsystem\n");
    assert_eq!(answer, Answer::Text("system".to_string()));
    assert_eq!(errors, vec!["ERROR: expecting one of unit/system".to_string()]);
}

#[test]
fn choice_default_may_be_empty_member() {
    let options = ["lookup", ""];
    let contract = InputContract::Choice {
        options: &options,
        default: "",
    };
    let (answer, _) = run(contract, "   \n");
    assert_eq!(answer, Answer::Text(String::new()));
}

#[test]
fn flag_maps_vocabulary_to_booleans() {
    for token in ["1", "y", "yes"] {
        let (answer, errors) = run(InputContract::Flag, &format!("{token}\n"));
        assert_eq!(answer, Answer::Flag(true), "{token}");
        assert!(errors.is_empty());
    }
    for token in ["0", "n", "no"] {
        let (answer, errors) = run(InputContract::Flag, &format!("{token}\n"));
        assert_eq!(answer, Answer::Flag(false), "{token}");
        assert!(errors.is_empty());
    }
}

#[test]
fn flag_rejects_other_tokens_and_reprompts() {
    let (answer, errors) = run(InputContract::Flag, "maybe\nYES\nyes\n");
    assert_eq!(answer, Answer::Flag(true));
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "ERROR: expecting one of 1/y/yes/0/n/no");
}

#[test]
fn identifier_requires_full_match() {
    let (answer, errors) = run(InputContract::Identifier, "9lives\nmy class\n_widget2\n");
    assert_eq!(answer, Answer::Text("_widget2".to_string()));
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e == "ERROR: expecting cpp identifier"));
}

#[test]
fn type_or_default_terminates_on_first_answer() {
    let (answer, errors) = run(InputContract::TypeOrDefault, "\nint\n");
    assert_eq!(answer, Answer::Text(AUTO_TYPE.to_string()));
    assert!(errors.is_empty());

    let (answer, _) = run(InputContract::TypeOrDefault, "  const Obj&  \n");
    assert_eq!(answer, Answer::Text("const Obj&".to_string()));
}

#[test]
fn non_empty_retries_on_blank() {
    let (answer, errors) = run(InputContract::NonEmpty, "   \ntypename T\n");
    assert_eq!(answer, Answer::Text("typename T".to_string()));
    assert_eq!(errors, vec!["ERROR: expecting a non-empty answer".to_string()]);
}

#[test]
fn closed_input_ends_the_loop() {
    let mut console = Console::new(Cursor::new("nope\n"), Vec::new());
    let err = prompt_until_valid(&mut console, &InputContract::Integer, "Count")
        .expect_err("input closes before a valid answer");
    assert!(matches!(err, RecipeError::InputClosed));
}
