//! Serialisation and drawing for generated property graphs.
//!
//! Every format is a pure function of a [`knows_core::PropertyGraph`]:
//! [`export`] dispatches on [`OutputFormat`] and returns a [`Payload`]
//! holding the rendered text. CSV is the one format that yields two
//! documents (nodes and edges). Drawings go through the display limit in
//! [`draw`] before rendering; PNG, JPG and PDF come back as bytes.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod adjacency;
mod attributes;
mod csv;
mod cypher;
pub mod draw;
mod error;
mod format;
mod gexf;
mod gml;
mod graphml;
mod json;
mod text;
mod yarspg;

use knows_core::PropertyGraph;
use tracing::{debug, instrument};

pub use crate::{
    draw::{
        DEFAULT_DISPLAY_LIMIT, DrawOptions, LimitedGraph, limit_graph, render_jpg, render_pdf,
        render_png, render_svg,
    },
    error::ExportError,
    format::OutputFormat,
};

/// Rendered output of a single export.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Payload {
    /// A single text document.
    Text(String),
    /// Separate node and edge tables.
    Csv {
        /// Node table including the header row.
        nodes: String,
        /// Edge table including the header row.
        edges: String,
    },
    /// An image or PDF document.
    Binary(Vec<u8>),
}

impl Payload {
    /// Returns the document when the payload is a single text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Csv { .. } | Self::Binary(_) => None,
        }
    }

    /// Returns the bytes when the payload is an image or PDF.
    #[must_use]
    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(bytes) => Some(bytes),
            Self::Text(_) | Self::Csv { .. } => None,
        }
    }
}

/// Renders `graph` in `format` with the default drawing options.
///
/// # Errors
/// Returns [`ExportError::InvalidGmlKey`] when a property name cannot be
/// written as a GML key, and [`ExportError::Render`] when a drawing cannot
/// be converted to an image or PDF.
///
/// # Examples
/// ```
/// use knows_core::GraphGenerator;
/// use knows_export::{OutputFormat, export};
///
/// let graph = GraphGenerator::builder(3, 2).with_seed(7).build()?.generate();
/// let payload = export(&graph, OutputFormat::YarsPg)?;
/// assert_eq!(payload.as_text().map(|text| text.lines().count()), Some(5));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn export(graph: &PropertyGraph, format: OutputFormat) -> Result<Payload, ExportError> {
    export_with(graph, format, &DrawOptions::default())
}

/// Renders `graph` in `format`, applying `options` to drawn formats.
///
/// # Errors
/// See [`export`].
#[instrument(
    name = "export.render",
    err,
    skip(graph, options),
    fields(format = %format, nodes = graph.node_count(), edges = graph.edge_count()),
)]
pub fn export_with(
    graph: &PropertyGraph,
    format: OutputFormat,
    options: &DrawOptions,
) -> Result<Payload, ExportError> {
    let payload = match format {
        OutputFormat::YarsPg => Payload::Text(yarspg::render(graph)),
        OutputFormat::Csv => {
            let (nodes, edges) = csv::render(graph);
            Payload::Csv { nodes, edges }
        }
        OutputFormat::Cypher => Payload::Text(cypher::render(graph)),
        OutputFormat::Json => Payload::Text(json::render(graph)),
        OutputFormat::GraphMl => Payload::Text(graphml::render(graph)),
        OutputFormat::Gexf => Payload::Text(gexf::render(graph)),
        OutputFormat::Gml => Payload::Text(gml::render(graph)?),
        OutputFormat::AdjacencyList => Payload::Text(adjacency::render_adjacency_list(graph)),
        OutputFormat::MultilineAdjacencyList => {
            Payload::Text(adjacency::render_multiline_adjacency_list(graph))
        }
        OutputFormat::EdgeList => Payload::Text(adjacency::render_edge_list(graph)),
        OutputFormat::Svg => Payload::Text(draw_svg(graph, options)),
        OutputFormat::Png => Payload::Binary(render_png(&draw_svg(graph, options))?),
        OutputFormat::Jpg => Payload::Binary(render_jpg(&draw_svg(graph, options))?),
        OutputFormat::Pdf => Payload::Binary(render_pdf(&draw_svg(graph, options))?),
    };
    debug!("graph rendered");
    Ok(payload)
}

fn draw_svg(graph: &PropertyGraph, options: &DrawOptions) -> String {
    render_svg(&limit_graph(graph, options.limit), options)
}
