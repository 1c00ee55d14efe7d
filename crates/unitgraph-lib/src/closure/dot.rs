//! Graphviz rendering of the project dependency graph
//!
//! One node per project, one statement per (source, target) pair. Edges on a
//! transitive cycle are red, self-references gray and dashed, everything else
//! black. Labels list the requirements behind each edge: optional ones in
//! italics, mandatory compile requirements in bold, greedy ones underlined.

use crate::metadata::Requirement;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use super::cycles::EdgeKind;
use super::graph::DependencyClosureGraph;

/// Render the graph as a DOT document
pub fn render_dot(graph: &DependencyClosureGraph) -> String {
    let mut out = String::new();
    out.push_str("digraph ProjectDependencies {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  node [shape=box];\n");
    out.push('\n');

    for (id, project) in graph.projects().enumerate() {
        out.push_str(&format!("  p{} [label=\"{}\"];\n", id, escape_label(project.key())));
    }
    out.push('\n');

    for edge in graph.edges() {
        let (Some(source), Some(target)) = (graph.project_id(edge.source), graph.project_id(edge.target))
        else {
            continue;
        };
        let style = match edge.kind {
            EdgeKind::Dependency => "color=black",
            EdgeKind::Cycle => "color=red",
            EdgeKind::SelfReference => "color=gray, style=dashed",
        };
        out.push_str(&format!(
            "  p{} -> p{} [{}, label={}];\n",
            source,
            target,
            style,
            edge_label(&edge.requirements)
        ));
    }

    out.push_str("}\n");
    out
}

/// Write the DOT document to any writer
pub fn write_dot<W: Write>(graph: &DependencyClosureGraph, mut writer: W) -> io::Result<()> {
    writer.write_all(render_dot(graph).as_bytes())?;
    writer.flush()
}

impl DependencyClosureGraph {
    pub fn to_dot(&self) -> String {
        render_dot(self)
    }

    /// Write the DOT rendering to `path`.
    ///
    /// The document goes to a temporary file next to the destination that is
    /// renamed into place once complete. I/O errors are returned unchanged.
    pub fn dump(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        write_dot(self, file.as_file_mut())?;
        file.persist(path).map_err(|e| e.error)?;

        debug!(path = %path.display(), "Dependency graph written");
        Ok(())
    }
}

/// Quoted label, or an HTML-like label when any requirement needs styling
fn edge_label(requirements: &[&Requirement]) -> String {
    let styled = requirements
        .iter()
        .any(|req| req.optional || req.is_mandatory_compile() || req.greedy);

    if !styled {
        let lines: Vec<String> = requirements
            .iter()
            .map(|req| escape_label(&req.to_string()))
            .collect();
        return format!("\"{}\"", lines.join("\\n"));
    }

    let lines: Vec<String> = requirements.iter().map(|req| format_requirement(req)).collect();
    format!("<{}>", lines.join("<BR/>"))
}

fn format_requirement(requirement: &Requirement) -> String {
    let text = html_escape::encode_double_quoted_attribute(&requirement.to_string()).into_owned();
    let italic = requirement.optional;
    let bold = requirement.is_mandatory_compile();
    let underline = requirement.greedy;

    let mut formatted = String::new();
    if italic {
        formatted.push_str("<I>");
    }
    if bold {
        formatted.push_str("<B>");
    }
    if underline {
        formatted.push_str("<U>");
    }
    formatted.push_str(&text);
    if underline {
        formatted.push_str("</U>");
    }
    if bold {
        formatted.push_str("</B>");
    }
    if italic {
        formatted.push_str("</I>");
    }
    formatted
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    include!("dot.test.rs");
}
