use crate::areas::repository::Repository;
use crate::artifacts::graph::builder::{Graph, GraphSummary};
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

/// How `graph` reports its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    /// `{"nodes": [...], "edges": [...]}` document
    #[default]
    Json,
    /// Counts per kind plus every failure with its reason
    Summary,
}

#[derive(Debug, Clone)]
pub struct GraphOptions<'o> {
    pub format: GraphFormat,
    pub output: Option<&'o Path>,
    pub jobs: usize,
}

impl Repository {
    /// Load every object, build the graph and write it out.
    ///
    /// Unreadable objects never fail the command; they are reported as nodes and in the summary.
    pub async fn graph(&self, opts: &GraphOptions<'_>) -> anyhow::Result<Graph> {
        let store = self.load_objects(opts.jobs).await?;
        let graph = Graph::build(&store);

        let summary = graph.summary();
        tracing::info!(
            nodes = summary.nodes,
            edges = summary.edges,
            failures = summary.failures.len(),
            "object graph complete"
        );

        match (opts.format, opts.output) {
            (GraphFormat::Json, Some(path)) => {
                let file = std::fs::File::create(path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                let mut file = std::io::BufWriter::new(file);
                serde_json::to_writer_pretty(&mut file, &graph)
                    .with_context(|| format!("Unable to write graph to {}", path.display()))?;
                file.flush()?;
                self.write_summary(&summary)?;
            }
            (GraphFormat::Json, None) => {
                serde_json::to_writer_pretty(&mut *self.writer(), &graph)
                    .context("Unable to write graph")?;
                writeln!(self.writer())?;
            }
            (GraphFormat::Summary, _) => self.write_summary(&summary)?,
        }

        Ok(graph)
    }

    fn write_summary(&self, summary: &GraphSummary<'_>) -> anyhow::Result<()> {
        let kinds = summary
            .kinds
            .iter()
            .map(|(kind, count)| format!("{kind} {count}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut writer = self.writer();
        writeln!(writer, "{} {} ({})", "objects:".bold(), summary.nodes, kinds)?;
        writeln!(
            writer,
            "{} {} ({} dangling)",
            "edges:".bold(),
            summary.edges,
            summary.dangling_edges
        )?;

        if summary.failures.is_empty() {
            writeln!(writer, "{} {}", "failures:".bold(), "0".green())?;
        } else {
            writeln!(
                writer,
                "{} {}",
                "failures:".bold(),
                summary.failures.len().to_string().red()
            )?;
            for failure in summary.failures {
                let name = failure
                    .id
                    .as_ref()
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| failure.path.display().to_string());
                writeln!(
                    writer,
                    "  {} {} {}",
                    name,
                    failure.kind.yellow(),
                    failure.reason
                )?;
            }
        }

        Ok(())
    }
}
