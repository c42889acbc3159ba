use crate::error::CliError;
use model::graph::EntityKind;
use planner::query::{CompiledPredicate, MatchQuery, Parameters};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CompileReport {
    pub kind: EntityKind,
    pub fragment: Option<String>,
    pub query: String,
    pub parameters: Parameters,
}

impl CompileReport {
    pub fn new(predicate: CompiledPredicate, query: MatchQuery) -> Self {
        Self {
            kind: query.kind,
            fragment: predicate.fragment,
            query: query.text,
            parameters: query.parameters,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::JsonSerialize)
}

pub async fn write_json<T: Serialize>(value: &T, path: String) -> Result<(), CliError> {
    let json = to_json(value)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = to_json(value)?;
    println!("{json}");
    Ok(())
}

pub async fn emit<T: Serialize>(value: &T, output: Option<String>) -> Result<(), CliError> {
    match output {
        Some(path) => write_json(value, path).await,
        None => print_json(value),
    }
}
