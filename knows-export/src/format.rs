//! Output format names as accepted on the command line.

use std::{fmt, str::FromStr};

use crate::error::ExportError;

/// A supported serialisation or drawing format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OutputFormat {
    /// YARS-PG node and edge statements.
    YarsPg,
    /// Node and edge tables.
    Csv,
    /// Cypher `CREATE` statements.
    Cypher,
    /// Node-link JSON document.
    Json,
    /// GraphML markup.
    GraphMl,
    /// GEXF markup.
    Gexf,
    /// GML markup.
    Gml,
    /// One line per node listing its successors.
    AdjacencyList,
    /// Node lines followed by one line per successor.
    MultilineAdjacencyList,
    /// One line per edge with its attributes.
    EdgeList,
    /// Circle-layout drawing.
    Svg,
    /// The drawing rasterised to PNG.
    Png,
    /// The drawing rasterised to JPEG.
    Jpg,
    /// The drawing as a single-page PDF.
    Pdf,
}

impl OutputFormat {
    /// Every format, in the order they are listed to users.
    pub const ALL: [Self; 14] = [
        Self::YarsPg,
        Self::Csv,
        Self::Cypher,
        Self::Json,
        Self::GraphMl,
        Self::Gexf,
        Self::Gml,
        Self::AdjacencyList,
        Self::MultilineAdjacencyList,
        Self::EdgeList,
        Self::Svg,
        Self::Png,
        Self::Jpg,
        Self::Pdf,
    ];

    /// Name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YarsPg => "yarspg",
            Self::Csv => "csv",
            Self::Cypher => "cypher",
            Self::Json => "json",
            Self::GraphMl => "graphml",
            Self::Gexf => "gexf",
            Self::Gml => "gml",
            Self::AdjacencyList => "adjacency_list",
            Self::MultilineAdjacencyList => "multiline_adjacency_list",
            Self::EdgeList => "edge_list",
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Pdf => "pdf",
        }
    }

    /// Whether the format is a drawing subject to the display limit.
    #[must_use]
    pub const fn is_drawing(self) -> bool {
        matches!(self, Self::Svg | Self::Png | Self::Jpg | Self::Pdf)
    }

    /// Whether the format produces bytes rather than text.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Png | Self::Jpg | Self::Pdf)
    }

    fn available() -> String {
        Self::ALL
            .iter()
            .map(|format| format.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let name = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == name)
            .ok_or_else(|| ExportError::UnknownFormat {
                name: raw.to_owned(),
                available: Self::available(),
            })
    }
}
