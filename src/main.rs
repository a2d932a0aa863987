// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use openflow::config::{load_config, validate_workflow, BehaviorRegistry, RuntimeBuilder};
use openflow::context::NodeStatus;
use openflow::engine::{load_memory, RunResult, RunSnapshot, TraversalOrder};
use openflow::observability::logging::{init_tracing, LogFormat};

/// Run and inspect node/edge workflows.
#[derive(Debug, Parser)]
#[command(name = "openflow", version, about)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,

    /// Log filter directives, e.g. `openflow=debug` (defaults to RUST_LOG)
    #[arg(long, global = true)]
    log_filter: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Execute a workflow once
    Run(RunArgs),
    /// Validate a workflow without running it
    Validate { workflow: PathBuf },
    /// List the built-in node types
    Types,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format, cli.log_filter.as_deref())?;

    match cli.command {
        Command::Run(args) => run_workflow(args).await,
        Command::Validate { workflow } => validate(&workflow),
        Command::Types => {
            list_types();
            Ok(())
        }
    }
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Workflow file (.yaml, .yml or .toml)
    workflow: PathBuf,

    /// Trigger payload as JSON; plain text is passed as a string
    #[arg(long)]
    trigger: Option<String>,

    /// Seed memory from a JSON object or a previous snapshot
    #[arg(long)]
    memory_in: Option<PathBuf>,

    /// Write the run snapshot here
    #[arg(long)]
    memory_out: Option<PathBuf>,

    /// Override the file's traversal order
    #[arg(long, value_enum)]
    traversal: Option<TraversalOrder>,

    /// Per-node timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Wait for each behaviour's nominal latency
    #[arg(long)]
    simulate_latency: bool,
}

async fn run_workflow(args: RunArgs) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args.workflow)
        .with_context(|| format!("Failed to load workflow '{}'", args.workflow.display()))?;
    if let Some(traversal) = args.traversal {
        config.executor_options.traversal = traversal;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.executor_options.timeout_ms = Some(timeout_ms);
    }
    if args.simulate_latency {
        config.executor_options.simulate_latency = true;
    }

    let (graph, executor, mut options) = RuntimeBuilder::from_config(&config)?;

    if let Some(path) = &args.memory_in {
        let memory = load_memory(path).with_context(|| format!("Failed to read memory from '{}'", path.display()))?;
        options.initial_memory.extend(memory);
    }

    let cancellation = CancellationToken::new();
    options = options.with_cancellation(cancellation.clone());
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling run");
            cancellation.cancel();
        }
    });

    let trigger = parse_trigger(args.trigger.as_deref());

    println!("Workflow: {}", args.workflow.display());
    println!("Strategy: {}", executor.strategy_name());
    println!("Nodes: {}  Edges: {}", graph.len(), graph.edges().len());

    let result = executor.execute(&graph, trigger, options).await;
    ctrl_c.abort();
    let result = result?;

    print_result(&result);

    if let Some(path) = &args.memory_out {
        RunSnapshot::from_result(&result)
            .save(path)
            .with_context(|| format!("Failed to write snapshot to '{}'", path.display()))?;
        println!("Snapshot written to {}", path.display());
    }

    println!("Total time (including load): {:?}", start_time.elapsed());
    Ok(())
}

/// JSON if it parses, otherwise the raw text as a string. No trigger is `null`.
fn parse_trigger(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Null,
        Some(text) => serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())),
    }
}

fn print_result(result: &RunResult) {
    println!();
    println!("Run {} {} in {:?}", result.run_id, result.status, result.duration);
    for state in &result.nodes {
        let detail = match state.status {
            NodeStatus::Success => state
                .output()
                .map(|output| output.to_string())
                .unwrap_or_default(),
            NodeStatus::Error => state.error_message.clone().unwrap_or_default(),
            _ => String::new(),
        };
        println!("  {:<12} {:<12} {:<8} {}", state.node_id, state.node_type, state.status, detail);
    }

    if !result.log.is_empty() {
        println!();
        println!("Log:");
        for entry in result.log.entries() {
            println!("  {}", entry);
        }
    }
}

fn validate(workflow: &Path) -> Result<()> {
    let config = load_config(workflow)
        .with_context(|| format!("Failed to load workflow '{}'", workflow.display()))?;

    match validate_workflow(&config, &BehaviorRegistry::with_builtins()) {
        Ok(warnings) => {
            println!("{} is valid ({} nodes, {} edges)", workflow.display(), config.nodes.len(), config.edges.len());
            for warning in warnings {
                println!("  warning: {}", warning);
            }
            Ok(())
        }
        Err(errors) => {
            for error in &errors {
                eprintln!("  error: {}", error);
            }
            bail!("{} has {} validation error(s)", workflow.display(), errors.len())
        }
    }
}

fn list_types() {
    let registry = BehaviorRegistry::with_builtins();
    for node_type in registry.types() {
        if let Some(behavior) = registry.get(node_type) {
            println!("{:<12} {:<14} {:?}", node_type, behavior.name(), behavior.nominal_latency());
        }
    }
}
