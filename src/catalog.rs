// src/catalog.rs

use std::{fmt, fs, path::Path};

use crate::models::question::Question;

/// The AWS RDS/Aurora question bank shipped with the binary.
const BUILTIN_CATALOG: &str = include_str!("../data/questions.json");

/// Reasons a question catalog is refused at startup.
#[derive(Debug)]
pub enum CatalogError {
    Io(String),
    Parse(String),
    InvalidQuestion { id: u32, reason: String },
    DuplicateId(u32),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(msg) => write!(f, "failed to read catalog: {msg}"),
            CatalogError::Parse(msg) => write!(f, "failed to parse catalog: {msg}"),
            CatalogError::InvalidQuestion { id, reason } => {
                write!(f, "question {id} is invalid: {reason}")
            }
            CatalogError::DuplicateId(id) => write!(f, "question id {id} appears more than once"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Parses a JSON array of questions.
pub fn parse(json: &str) -> Result<Vec<Question>, CatalogError> {
    serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))
}

pub fn builtin() -> Result<Vec<Question>, CatalogError> {
    parse(BUILTIN_CATALOG)
}

pub fn from_file(path: impl AsRef<Path>) -> Result<Vec<Question>, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
    parse(&raw)
}

/// Loads the catalog from `path` when given, otherwise the built-in bank.
pub fn load(path: Option<&str>) -> Result<Vec<Question>, CatalogError> {
    match path {
        Some(path) => {
            tracing::info!("Loading question catalog from {}", path);
            from_file(path)
        }
        None => builtin(),
    }
}
