use svg::Document;
use svg::node::element::{Circle, Definitions, Group, Path, Pattern, Rectangle, Text};

use crate::muster::tools::layout::{Diagram, DiagramEdge, DiagramNode, Position};

/// Height assigned to every node card.
pub const NODE_HEIGHT: f64 = 60.0;

/// Whitespace kept around the chart content.
const CANVAS_MARGIN: f64 = 40.0;

// Dotted background grid.
const GRID_GAP: f64 = 12.0;
const GRID_DOT_RADIUS: f64 = 1.0;
const GRID_DOT_COLOR: &str = "#91919a";
const GRID_PATTERN_ID: &str = "grid-dots";

// Node cards.
const CARD_FILL: &str = "#f0f0f0";
const CARD_STROKE: &str = "#cccccc";
const CARD_RADIUS: f64 = 5.0;

// Edges.
const EDGE_STROKE: &str = "#b1b1b7";
const EDGE_BEND_RADIUS: f64 = 5.0;

// Card text. Baselines are offsets from the card top.
const FONT_FAMILY: &str = "Arial";
const TEXT_COLOR: &str = "#222222";
const TITLE_FONT_SIZE: f64 = 14.0;
const TITLE_BASELINE: f64 = 24.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const LABEL_BASELINE: f64 = 44.0;

/// Renders the diagram as a standalone SVG document.
///
/// Cards sit on a white canvas with a dotted grid. Edges are drawn first so
/// they pass beneath the cards, each running from the bottom centre of its
/// source to the top centre of its target with rounded step bends. An empty
/// diagram renders a blank one-unit canvas.
pub fn render_svg(diagram: &Diagram) -> String {
    document(diagram).to_string()
}

fn document(diagram: &Diagram) -> Document {
    if diagram.is_empty() {
        return Document::new()
            .set("viewBox", "0 0 1 1")
            .set("width", 1)
            .set("height", 1);
    }

    let (min_x, min_y, max_x, max_y) = content_bounds(diagram);
    let origin_x = min_x - CANVAS_MARGIN;
    let origin_y = min_y - CANVAS_MARGIN;
    let width = max_x - min_x + 2.0 * CANVAS_MARGIN;
    let height = max_y - min_y + 2.0 * CANVAS_MARGIN;

    let dots = Pattern::new()
        .set("id", GRID_PATTERN_ID)
        .set("width", GRID_GAP)
        .set("height", GRID_GAP)
        .set("patternUnits", "userSpaceOnUse")
        .add(
            Circle::new()
                .set("cx", GRID_GAP / 2.0)
                .set("cy", GRID_GAP / 2.0)
                .set("r", GRID_DOT_RADIUS)
                .set("fill", GRID_DOT_COLOR),
        );

    let mut edges = Group::new()
        .set("fill", "none")
        .set("stroke", EDGE_STROKE)
        .set("stroke-width", 1);
    for edge in &diagram.edges {
        if let Some(path) = edge_path(diagram, edge) {
            edges = edges.add(path);
        }
    }

    let mut cards = Group::new();
    for node in &diagram.nodes {
        cards = cards.add(node_card(node));
    }

    Document::new()
        .set(
            "viewBox",
            format!("{origin_x} {origin_y} {width} {height}"),
        )
        .set("width", width)
        .set("height", height)
        .add(Definitions::new().add(dots))
        .add(canvas_rect(origin_x, origin_y, width, height, "white"))
        .add(canvas_rect(
            origin_x,
            origin_y,
            width,
            height,
            format!("url(#{GRID_PATTERN_ID})"),
        ))
        .add(edges)
        .add(cards)
}

fn content_bounds(diagram: &Diagram) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for node in &diagram.nodes {
        min_x = min_x.min(node.position.x);
        min_y = min_y.min(node.position.y);
        max_x = max_x.max(node.position.x + node.width);
        max_y = max_y.max(node.position.y + NODE_HEIGHT);
    }
    (min_x, min_y, max_x, max_y)
}

fn canvas_rect(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    fill: impl Into<svg::node::Value>,
) -> Rectangle {
    Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", width)
        .set("height", height)
        .set("fill", fill)
}

fn node_card(node: &DiagramNode) -> Group {
    let center_x = node.position.x + node.width / 2.0;
    Group::new()
        .add(
            Rectangle::new()
                .set("x", node.position.x)
                .set("y", node.position.y)
                .set("width", node.width)
                .set("height", NODE_HEIGHT)
                .set("rx", CARD_RADIUS)
                .set("fill", CARD_FILL)
                .set("stroke", CARD_STROKE)
                .set("stroke-width", 1),
        )
        .add(
            Text::new(escape_text(&node.id))
                .set("x", center_x)
                .set("y", node.position.y + TITLE_BASELINE)
                .set("text-anchor", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", TITLE_FONT_SIZE)
                .set("font-weight", "bold")
                .set("fill", TEXT_COLOR),
        )
        .add(
            Text::new(escape_text(&node.label))
                .set("x", center_x)
                .set("y", node.position.y + LABEL_BASELINE)
                .set("text-anchor", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", LABEL_FONT_SIZE)
                .set("fill", TEXT_COLOR),
        )
}

fn edge_path(diagram: &Diagram, edge: &DiagramEdge) -> Option<Path> {
    let source = diagram.node(&edge.source)?;
    let target = diagram.node(&edge.target)?;
    let from = Position {
        x: source.position.x + source.width / 2.0,
        y: source.position.y + NODE_HEIGHT,
    };
    let to = Position {
        x: target.position.x + target.width / 2.0,
        y: target.position.y,
    };
    Some(Path::new().set("d", step_path_data(from, to)))
}

/// Builds a vertical-first step path with rounded bends. Collinear anchors
/// collapse to a straight segment.
fn step_path_data(from: Position, to: Position) -> String {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 || dy == 0.0 {
        return format!("M {} {} L {} {}", from.x, from.y, to.x, to.y);
    }

    let mid_y = from.y + dy / 2.0;
    let radius = EDGE_BEND_RADIUS.min(dx.abs() / 2.0).min(dy.abs() / 2.0);
    let hdir = dx.signum();
    let vdir = dy.signum();
    let bend_in_y = mid_y - radius * vdir;
    let bend_in_x = from.x + radius * hdir;
    let bend_out_x = to.x - radius * hdir;
    let bend_out_y = mid_y + radius * vdir;
    format!(
        "M {} {} L {} {} Q {} {} {} {} L {} {} Q {} {} {} {} L {} {}",
        from.x,
        from.y,
        from.x,
        bend_in_y,
        from.x,
        mid_y,
        bend_in_x,
        mid_y,
        bend_out_x,
        mid_y,
        to.x,
        mid_y,
        to.x,
        bend_out_y,
        to.x,
        to.y,
    )
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
