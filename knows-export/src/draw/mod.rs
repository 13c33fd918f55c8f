//! Display-limited drawing.
//!
//! Large graphs are cut down to a connected-first sample of at most
//! [`DrawOptions::limit`] nodes before being laid out, so drawings stay
//! legible. The SVG document is the master drawing; PNG, JPG and PDF are
//! converted from it.

mod limit;
mod raster;
mod svg;

pub use self::{
    limit::{LimitedGraph, limit_graph},
    raster::{render_jpg, render_pdf, render_png},
    svg::render_svg,
};

/// Default number of nodes shown in a drawing.
pub const DEFAULT_DISPLAY_LIMIT: usize = 50;

/// Options controlling drawn output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DrawOptions {
    /// Maximum number of nodes drawn; `0` draws every node.
    pub limit: usize,
    /// Whether truncated drawings carry a `Showing X of Y nodes` caption.
    pub show_info: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_DISPLAY_LIMIT,
            show_info: true,
        }
    }
}
