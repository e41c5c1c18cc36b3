use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::ValidationError;
use crate::quiz::{Question, ANSWERS_PER_QUESTION};

/// A record as it appears in the bank file, before validation.
#[derive(Debug, Default, serde::Deserialize)]
struct RawQuestion {
    situation: Option<String>,
    answers: Option<Vec<Value>>,
    correct_idx: Option<Value>,
}

pub fn load_questions_from_path(path: impl AsRef<Path>) -> Result<Vec<Question>, ValidationError> {
    let file = File::open(path)?;
    load_questions(BufReader::new(file))
}

/// Parses a JSON array of questions. Any bad record rejects the whole bank.
pub fn load_questions<R: Read>(reader: R) -> Result<Vec<Question>, ValidationError> {
    let records: Vec<RawQuestion> = serde_json::from_reader(reader)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, raw)| validate(index, raw))
        .collect()
}

fn validate(index: usize, raw: RawQuestion) -> Result<Question, ValidationError> {
    let situation = raw
        .situation
        .ok_or(ValidationError::MissingField { index, field: "situation" })?;
    let answers = raw
        .answers
        .ok_or(ValidationError::MissingField { index, field: "answers" })?;
    let correct_idx = raw
        .correct_idx
        .ok_or(ValidationError::MissingField { index, field: "correct_idx" })?;

    if situation.trim().is_empty() {
        return Err(ValidationError::EmptySituation { index });
    }

    let answers: [String; ANSWERS_PER_QUESTION] = answers
        .into_iter()
        .map(|answer| match answer {
            Value::String(text) => Ok(text),
            _ => Err(ValidationError::AnswerNotText { index }),
        })
        .collect::<Result<Vec<_>, _>>()?
        .try_into()
        .map_err(|answers: Vec<String>| ValidationError::AnswerCount {
            index,
            count: answers.len(),
        })?;

    let mut seen = HashSet::new();
    for answer in &answers {
        if !seen.insert(answer.as_str()) {
            return Err(ValidationError::DuplicateAnswer {
                index,
                answer: answer.clone(),
            });
        }
    }

    let correct_idx = coerce_index(&correct_idx).ok_or_else(|| ValidationError::CorrectIdx {
        index,
        value: correct_idx.to_string(),
    })?;

    Ok(Question {
        situation,
        answers,
        correct_idx,
    })
}

// Integers and integer strings ("2") are accepted; anything else is not an index.
fn coerce_index(value: &Value) -> Option<usize> {
    let number = match value {
        Value::Number(number) => number.as_i64()?,
        Value::String(text) => text.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    usize::try_from(number)
        .ok()
        .filter(|idx| *idx < ANSWERS_PER_QUESTION)
}
