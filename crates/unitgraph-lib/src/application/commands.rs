//! Command execution handlers
//!
//! Every handler writes its result to an injected writer so the same code
//! serves the binary (stdout) and tests (a byte buffer). Diagnostics go
//! through tracing, never through the result stream.

use crate::application::{AppConfig, CliConfig, Commands};
use crate::closure::DependencyClosureGraph;
use crate::manifest::load_manifest;
use crate::metadata::{Project, UnitKind};
use crate::primitives::OutputFormat;
use anyhow::{Context, Result, anyhow, bail};
use console::style;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, warn};

/// Execute CLI commands, printing results to stdout
pub fn execute_command(config: CliConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute_command_with_output(config, &mut out)
}

/// Execute a command against an explicit output stream (for testing)
pub fn execute_command_with_output(config: CliConfig, out: &mut dyn Write) -> Result<()> {
    let command = match config.command {
        Some(cmd) => cmd,
        None => {
            writeln!(out, "unitgraph - cross-project dependency closure")?;
            writeln!(out, "Run 'unitgraph --help' for usage information")?;
            return Ok(());
        }
    };

    if !command.requires_manifest() {
        return handle_version(out);
    }

    let graph = load_graph(&config.app_config)?;
    match command {
        Commands::Version => handle_version(out),
        Commands::Deps {
            project,
            exclude,
            format,
        } => handle_deps(&graph, out, &project, &exclude, format),
        Commands::Projects { format } => handle_projects(&graph, out, format),
        Commands::Cycles { format } => handle_cycles(&graph, out, format),
        Commands::Unsatisfied { format } => handle_unsatisfied(&graph, out, format),
        Commands::Dump { out: path } => handle_dump(&graph, out, path.as_deref()),
    }
}

/// Load the manifest named by the config and build its closure graph.
///
/// Writes the DOT dump as well when `--dump` is configured.
pub fn load_graph(config: &AppConfig) -> Result<DependencyClosureGraph> {
    let path = config.manifest.as_deref().ok_or_else(|| {
        anyhow!("No build manifest found; pass --manifest or create unitgraph.toml")
    })?;

    let projects = load_manifest(path)
        .and_then(|manifest| manifest.into_projects())
        .with_context(|| format!("Failed to load build manifest {}", path.display()))?;

    let graph = DependencyClosureGraph::build_with(projects, &config.build_options())
        .context("Failed to build dependency graph")?;
    info!(
        projects = graph.project_count(),
        units = graph.unit_count(),
        edges = graph.edge_count(),
        "Dependency graph ready"
    );

    if let Some(dump) = &config.dump {
        graph
            .dump(dump)
            .with_context(|| format!("Failed to write graph dump {}", dump.display()))?;
        info!(path = %dump.display(), "Graph dump written");
    }

    Ok(graph)
}

fn handle_version(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "unitgraph {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Cross-project dependency closure resolver")?;
    Ok(())
}

#[derive(Serialize)]
struct DependencyEntry<'a> {
    id: &'a str,
    version: String,
    kind: UnitKind,
    project: Option<&'a str>,
}

fn handle_deps(
    graph: &DependencyClosureGraph,
    out: &mut dyn Write,
    key: &str,
    exclude: &[UnitKind],
    format: OutputFormat,
) -> Result<()> {
    let project = Project::new(key);
    if graph.project_units(&project).is_empty() {
        bail!("Unknown project '{}'", key);
    }

    let entries: Vec<DependencyEntry<'_>> = graph
        .project_dependencies(&project)
        .dependencies(exclude)
        .into_iter()
        .map(|unit| DependencyEntry {
            id: unit.id(),
            version: unit.version().to_string(),
            kind: unit.kind(),
            project: graph.project(unit).map(Project::key),
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &entries),
        OutputFormat::Text => {
            if entries.is_empty() {
                writeln!(out, "{} has no dependencies on other projects", key)?;
            }
            for entry in &entries {
                writeln!(
                    out,
                    "{} {} ({}) from {}",
                    entry.id,
                    entry.version,
                    entry.kind,
                    entry.project.unwrap_or("?")
                )?;
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ProjectEntry<'a> {
    project: &'a str,
    fragment: bool,
    dependencies: Vec<&'a str>,
}

fn handle_projects(
    graph: &DependencyClosureGraph,
    out: &mut dyn Write,
    format: OutputFormat,
) -> Result<()> {
    let entries: Vec<ProjectEntry<'_>> = graph
        .dependencies()
        .map(|(project, deps)| ProjectEntry {
            project: project.key(),
            fragment: graph.is_fragment(project),
            dependencies: deps.projects().into_iter().map(Project::key).collect(),
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &entries),
        OutputFormat::Text => {
            for entry in &entries {
                let marker = if entry.fragment { " [fragment]" } else { "" };
                if entry.dependencies.is_empty() {
                    writeln!(out, "{}{}", entry.project, marker)?;
                } else {
                    writeln!(
                        out,
                        "{}{} -> {}",
                        entry.project,
                        marker,
                        entry.dependencies.join(", ")
                    )?;
                }
            }
            Ok(())
        }
    }
}

fn handle_cycles(
    graph: &DependencyClosureGraph,
    out: &mut dyn Write,
    format: OutputFormat,
) -> Result<()> {
    let cycles: Vec<Vec<&str>> = graph
        .cycles()
        .into_iter()
        .map(|members| members.into_iter().map(Project::key).collect())
        .collect();

    if !cycles.is_empty() {
        warn!(count = cycles.len(), "Build contains project cycles");
    }

    match format {
        OutputFormat::Json => write_json(out, &cycles),
        OutputFormat::Text => {
            if cycles.is_empty() {
                writeln!(out, "No cycles")?;
            }
            for (number, members) in cycles.iter().enumerate() {
                writeln!(
                    out,
                    "{} {}",
                    style(format!("cycle {}:", number + 1)).red().bold(),
                    members.join(", ")
                )?;
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct UnsatisfiedEntry<'a> {
    project: &'a str,
    unit: String,
    requirement: String,
    optional: bool,
}

fn handle_unsatisfied(
    graph: &DependencyClosureGraph,
    out: &mut dyn Write,
    format: OutputFormat,
) -> Result<()> {
    let entries: Vec<UnsatisfiedEntry<'_>> = graph
        .unsatisfied_requirements()
        .into_iter()
        .map(|req| UnsatisfiedEntry {
            project: req.project.key(),
            unit: req.unit.to_string(),
            requirement: req.requirement.to_string(),
            optional: req.requirement.optional,
        })
        .collect();

    match format {
        OutputFormat::Json => write_json(out, &entries),
        OutputFormat::Text => {
            if entries.is_empty() {
                writeln!(out, "All requirements satisfied")?;
            }
            for entry in &entries {
                let optional = if entry.optional { " (optional)" } else { "" };
                writeln!(
                    out,
                    "{}: {} requires {}{}",
                    entry.project, entry.unit, entry.requirement, optional
                )?;
            }
            Ok(())
        }
    }
}

fn handle_dump(
    graph: &DependencyClosureGraph,
    out: &mut dyn Write,
    path: Option<&Path>,
) -> Result<()> {
    match path {
        Some(path) => {
            graph
                .dump(path)
                .with_context(|| format!("Failed to write graph dump {}", path.display()))?;
            info!(path = %path.display(), "Graph dump written");
            Ok(())
        }
        None => {
            crate::closure::write_dot(graph, out).context("Failed to write graph")?;
            Ok(())
        }
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}
