use std::collections::HashSet;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::model::Person;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read person document: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse person document: {0}")]
    Parse(String),
    #[error("duplicate person id: {0}")]
    DuplicateId(String),
}

/// Accepts both `{ "people": [...] }` and a bare person array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PersonDocument {
    Wrapped { people: Vec<Person> },
    Bare(Vec<Person>),
}

pub fn parse_people(input: &str) -> Result<Vec<Person>, DatasetError> {
    let document: PersonDocument = match serde_json::from_str(input) {
        Ok(document) => document,
        // Lenient fallback for hand-edited documents with comments or
        // trailing commas; the strict error is the one worth reporting.
        Err(strict_err) => {
            json5::from_str(input).map_err(|_| DatasetError::Parse(strict_err.to_string()))?
        }
    };
    let people = match document {
        PersonDocument::Wrapped { people } => people,
        PersonDocument::Bare(people) => people,
    };

    let mut seen: HashSet<&str> = HashSet::new();
    for person in &people {
        if !seen.insert(person.id.as_str()) {
            return Err(DatasetError::DuplicateId(person.id.clone()));
        }
    }
    Ok(people)
}

pub fn load_people(path: &Path) -> Result<Vec<Person>, DatasetError> {
    let contents = std::fs::read_to_string(path)?;
    parse_people(&contents)
}
