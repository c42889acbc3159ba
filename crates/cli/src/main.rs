use crate::{commands::Commands, error::CliError, output::CompileReport};
use clap::Parser;
use condition::Condition;
use engine_config::settings::{EngineSettings, SettingsLoader};
use engine_core::{
    consolidate::consolidate,
    service::{FilterRequest, FilterService},
    store::memory::MemoryStore,
};
use model::graph::{EntityKind, QueryResult};
use planner::query::{IdentifierStrategy, PredicateBuilder, render_match};
use serde_json::Value as JsonValue;
use std::{str::FromStr, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(name = "sieve", version = "0.1.0", about = "Graph filter-condition engine")]
struct Cli {
    #[arg(long, global = true, help = "Settings file (TOML)")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut loader = SettingsLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    let settings = loader.load()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { condition } => {
            let condition = read_condition(&condition).await?;
            info!(
                "Condition is valid: '{}' with {} node(s)",
                condition.rule(),
                condition.size()
            );
            output::print_json(&condition)?;
        }
        Commands::Compile {
            condition,
            target,
            strategy,
        } => {
            let kind = EntityKind::from_str(&target).map_err(CliError::InvalidArgument)?;
            let strategy = match strategy {
                Some(name) => {
                    IdentifierStrategy::from_str(&name).map_err(CliError::InvalidArgument)?
                }
                None => settings.identifier_strategy,
            };
            let condition = read_condition(&condition).await?;
            let report = compile(&settings, kind, strategy, &condition)?;
            output::print_json(&report)?;
        }
        Commands::Filter {
            graph,
            nodes,
            edges,
            include_subsidiary,
            output,
        } => {
            let store = MemoryStore::load(&graph).await?;
            let service = FilterService::new(Arc::new(store), settings.filter_options());

            let request = FilterRequest {
                nodes: read_optional_json(nodes.as_deref()).await?,
                edges: read_optional_json(edges.as_deref()).await?,
                include_subsidiary: include_subsidiary.then_some(true),
            };
            let result = service.filter_graph(&request).await?;
            output::emit(&result, output).await?;
        }
        Commands::Consolidate {
            result,
            include_subsidiary,
            output,
        } => {
            let source = tokio::fs::read_to_string(&result).await?;
            let raw: QueryResult = serde_json::from_str(&source)?;
            let include_subsidiary = include_subsidiary || settings.include_subsidiary;
            output::emit(&consolidate(raw, include_subsidiary), output).await?;
        }
    }

    Ok(())
}

fn compile(
    settings: &EngineSettings,
    kind: EntityKind,
    strategy: IdentifierStrategy,
    condition: &Condition,
) -> Result<CompileReport, CliError> {
    let builder = PredicateBuilder::new(kind)
        .with_variable(settings.entity_variable.as_str())
        .with_strategy(strategy);
    let predicate = builder.build(condition)?;
    let query = render_match(kind, builder.variable(), builder.dialect(), &predicate);
    Ok(CompileReport::new(predicate, query))
}

async fn read_condition(path: &str) -> Result<Condition, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    let payload: JsonValue = serde_json::from_str(&source)?;
    Ok(condition::decode(&payload)?)
}

async fn read_optional_json(path: Option<&str>) -> Result<Option<JsonValue>, CliError> {
    match path {
        Some(path) => {
            let source = tokio::fs::read_to_string(path).await?;
            Ok(Some(serde_json::from_str(&source)?))
        }
        None => Ok(None),
    }
}
