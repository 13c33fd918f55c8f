//! SVG rendering on a circular layout.

use std::{
    collections::HashMap,
    f64::consts::{FRAC_PI_2, TAU},
};

use knows_core::PropertyGraph;

use super::{DrawOptions, LimitedGraph};
use crate::text::xml_escape;

const CANVAS: f64 = 800.0;
const MARGIN: f64 = 60.0;
const NODE_RADIUS: f64 = 16.0;
const NODE_COLOUR: &str = "#38b4b6";
const EDGE_COLOUR: &str = "#284d5c";
const FONT_COLOUR: &str = "#203445";

#[derive(Clone, Copy, Debug, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

/// Draws `limited` as a standalone SVG document.
///
/// Nodes sit on a circle in creation order and edges are arrows that stop
/// at the target's rim. When `options.show_info` is set and the view is
/// truncated, a `Showing X of Y nodes` caption is added.
#[must_use]
pub fn render_svg(limited: &LimitedGraph<'_>, options: &DrawOptions) -> String {
    let graph = limited.graph();
    let positions = layout(graph.node_count());

    let mut lines = vec![
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS}\" height=\"{CANVAS}\" viewBox=\"0 0 {CANVAS} {CANVAS}\">"
        ),
        "  <defs>".to_owned(),
        format!(
            "    <marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"8\" markerHeight=\"8\" orient=\"auto\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{EDGE_COLOUR}\" /></marker>"
        ),
        "  </defs>".to_owned(),
        "  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\" />".to_owned(),
    ];

    lines.push("  <g class=\"edges\">".to_owned());
    lines.extend(edge_lines(graph, &positions));
    lines.push("  </g>".to_owned());

    lines.push("  <g class=\"nodes\">".to_owned());
    for (node, point) in graph.nodes().zip(&positions) {
        lines.push(format!(
            "    <circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{NODE_RADIUS}\" fill=\"{NODE_COLOUR}\"><title>{}</title></circle>",
            point.x,
            point.y,
            xml_escape(node.label())
        ));
        lines.push(format!(
            "    <text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-size=\"10\" fill=\"{FONT_COLOUR}\">{}</text>",
            point.x,
            point.y,
            xml_escape(node.id())
        ));
    }
    lines.push("  </g>".to_owned());

    if options.show_info
        && let Some(caption) = limited.caption()
    {
        lines.push(format!(
            "  <text x=\"{MARGIN}\" y=\"{}\" font-size=\"14\" fill=\"{FONT_COLOUR}\">{caption}</text>",
            caption_baseline()
        ));
    }
    lines.push("</svg>".to_owned());
    lines.join("\n")
}

fn edge_lines(graph: &PropertyGraph, positions: &[Point]) -> Vec<String> {
    let index: HashMap<&str, Point> = graph
        .nodes()
        .zip(positions.iter().copied())
        .map(|(node, point)| (node.id(), point))
        .collect();
    graph
        .edges()
        .filter_map(|edge| {
            let from = index.get(edge.source.id())?;
            let to = index.get(edge.target.id())?;
            let tip = shorten(*from, *to);
            Some(format!(
                "    <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{EDGE_COLOUR}\" stroke-width=\"1.5\" marker-end=\"url(#arrow)\"><title>{}</title></line>",
                from.x,
                from.y,
                tip.x,
                tip.y,
                xml_escape(edge.edge.label())
            ))
        })
        .collect()
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "layout coordinates are floating point"
)]
fn layout(count: usize) -> Vec<Point> {
    let centre = CANVAS / 2.0;
    if count == 1 {
        return vec![Point {
            x: centre,
            y: centre,
        }];
    }
    let radius = centre - MARGIN;
    (0..count)
        .map(|position| {
            let angle = TAU * position as f64 / count as f64 - FRAC_PI_2;
            Point {
                x: centre + radius * angle.cos(),
                y: centre + radius * angle.sin(),
            }
        })
        .collect()
}

/// End point of the segment `from -> to` pulled back to the target's rim.
#[expect(
    clippy::float_arithmetic,
    reason = "layout coordinates are floating point"
)]
fn shorten(from: Point, to: Point) -> Point {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let length = dx.hypot(dy);
    if length <= NODE_RADIUS {
        return to;
    }
    let scale = (length - NODE_RADIUS) / length;
    Point {
        x: from.x + dx * scale,
        y: from.y + dy * scale,
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "layout coordinates are floating point"
)]
fn caption_baseline() -> f64 {
    CANVAS - MARGIN / 3.0
}
