//! Argument parsing and the generate-and-render pipeline.

use std::path::PathBuf;

use clap::Parser;
use knows_core::{
    EDGE_PROPERTIES, GenerationError, GraphGenerator, NODE_PROPERTIES, SchemaError, TypeRegistry,
    load_schema, max_edges,
};
use knows_export::{DEFAULT_DISPLAY_LIMIT, DrawOptions, ExportError, OutputFormat, Payload, export_with};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Smallest node count drawn when `--nodes` is omitted.
pub(super) const MIN_RANDOM_NODES: usize = 2;
/// Largest node count drawn when `--nodes` is omitted.
pub(super) const MAX_RANDOM_NODES: usize = 100;

/// Options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "knows",
    version,
    about = "Generate synthetic property graphs and export them in multiple formats."
)]
pub struct Cli {
    /// File to write; standard output when omitted. CSV writes
    /// `<stem>_nodes.csv` and `<stem>_edges.csv` next to it.
    pub output: Option<PathBuf>,

    /// Number of nodes; drawn from [2, 100] when omitted.
    #[arg(short = 'n', long = "nodes", value_parser = clap::value_parser!(usize))]
    pub nodes: Option<usize>,

    /// Number of edges; drawn from [nodes/2, nodes] when omitted.
    #[arg(short = 'e', long = "edges", value_parser = clap::value_parser!(usize))]
    pub edges: Option<usize>,

    /// Output format.
    #[arg(short = 'f', long = "format", default_value_t = OutputFormat::YarsPg)]
    pub format: OutputFormat,

    /// Built-in node properties to generate, comma separated or repeated.
    #[arg(
        long = "node-props",
        value_name = "PROPERTY",
        value_delimiter = ',',
        conflicts_with_all = ["all_props", "schema"],
    )]
    pub node_props: Option<Vec<String>>,

    /// Built-in edge properties to generate, comma separated or repeated.
    #[arg(
        long = "edge-props",
        value_name = "PROPERTY",
        value_delimiter = ',',
        conflicts_with_all = ["all_props", "schema"],
    )]
    pub edge_props: Option<Vec<String>>,

    /// Generate every built-in node and edge property.
    #[arg(short = 'a', long = "all-props", conflicts_with = "schema")]
    pub all_props: bool,

    /// Seed for reproducible output.
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// JSON schema describing labels and properties.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Maximum number of nodes drawn in SVG, PNG, JPG and PDF output.
    #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_DISPLAY_LIMIT)]
    pub limit: usize,

    /// Draw every node regardless of `--limit`.
    #[arg(long = "no-limit", conflicts_with = "limit")]
    pub no_limit: bool,

    /// Omit the `Showing X of Y nodes` caption from drawings.
    #[arg(long = "hide-info")]
    pub hide_info: bool,
}

impl Cli {
    /// Drawing options implied by `--limit`, `--no-limit` and `--hide-info`.
    #[must_use]
    pub const fn draw_options(&self) -> DrawOptions {
        DrawOptions {
            limit: if self.no_limit { 0 } else { self.limit },
            show_info: !self.hide_info,
        }
    }
}

/// Errors surfaced while executing the command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing an output file failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: std::io::Error,
    },
    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Stream(#[source] std::io::Error),
    /// The schema file could not be loaded.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// Generation parameters were rejected.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// Rendering the graph failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    /// Stable machine-readable code of the underlying library error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Schema(err) => Some(err.code().as_str()),
            Self::Generation(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::Stream(_) | Self::Export(_) => None,
        }
    }
}

/// Outcome of a run, ready to be written out.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Nodes generated.
    pub nodes: usize,
    /// Edges generated.
    pub edges: usize,
    /// Format the payload was rendered in.
    pub format: OutputFormat,
    /// Rendered graph.
    pub payload: Payload,
    /// Destination file, or `None` for standard output.
    pub output: Option<PathBuf>,
}

/// Generates and renders the graph described by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the schema cannot be loaded, the counts or
/// property names are rejected, or rendering fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use knows_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["knows", "-n", "4", "-e", "3", "-s", "1", "-f", "cypher"]);
/// let summary = run_cli(cli)?;
/// assert_eq!((summary.nodes, summary.edges), (4, 3));
/// # Ok::<(), knows_cli::cli::CliError>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(format = %cli.format, nodes = field::Empty, edges = field::Empty, seeded = cli.seed.is_some()),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let mut rng = cli
        .seed
        .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
    let (nodes, edges) = resolve_counts(cli.nodes, cli.edges, &mut rng);
    let span = Span::current();
    span.record("nodes", nodes);
    span.record("edges", edges);

    let mut builder = GraphGenerator::builder(nodes, edges);
    if let Some(path) = &cli.schema {
        builder = builder.with_schema(load_schema(path, TypeRegistry::standard())?);
    } else if cli.all_props {
        builder = builder
            .with_node_properties(NODE_PROPERTIES)
            .with_edge_properties(EDGE_PROPERTIES);
    } else {
        if let Some(names) = &cli.node_props {
            builder = builder.with_node_properties(names);
        }
        if let Some(names) = &cli.edge_props {
            builder = builder.with_edge_properties(names);
        }
    }
    if let Some(seed) = cli.seed {
        builder = builder.with_seed(seed);
    }

    let graph = builder.build()?.generate();
    let payload = export_with(&graph, cli.format, &cli.draw_options())?;
    info!(nodes, edges, format = %cli.format, "graph rendered");

    Ok(ExecutionSummary {
        nodes,
        edges,
        format: cli.format,
        payload,
        output: cli.output,
    })
}

/// Fills in missing counts: nodes uniformly from
/// [`MIN_RANDOM_NODES`, `MAX_RANDOM_NODES`], edges uniformly from
/// `[nodes / 2, min(nodes, max_edges(nodes))]`.
pub(super) fn resolve_counts(
    requested_nodes: Option<usize>,
    requested_edges: Option<usize>,
    rng: &mut impl Rng,
) -> (usize, usize) {
    let nodes = requested_nodes
        .unwrap_or_else(|| rng.gen_range(MIN_RANDOM_NODES..=MAX_RANDOM_NODES));
    let edges = requested_edges.unwrap_or_else(|| {
        let upper = max_edges(nodes).map_or(nodes, |max| max.min(nodes));
        let lower = half(nodes).min(upper);
        rng.gen_range(lower..=upper)
    });
    (nodes, edges)
}

#[expect(clippy::integer_division, reason = "the lower edge bound rounds down")]
const fn half(value: usize) -> usize {
    value / 2
}
