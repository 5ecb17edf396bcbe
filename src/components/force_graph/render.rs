//! Canvas rendering for the force graph.
//!
//! Drawing happens in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges with their end symbols, then edge labels (graph space)
//! 3. Nodes, emphasized nodes last, then node labels (graph space)
//! 4. Tooltip box at the pointer (screen space)

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::geometry::{Curve, Point};
use super::label_layout::{LabelRect, place_labels};
use super::scale::ScaledValues;
use super::state::{EdgeShape, ForceGraphState, Frame, HoverTarget, NodeView};
use super::theme::Color;
use crate::chart::option::{EdgeSymbol, LabelPosition};
use crate::chart::tooltip::{TooltipDatum, format_tooltip};
use crate::model::Edge;

/// Gap between a node and its label, in graph units at zoom 1.
const LABEL_GAP: f64 = 4.0;
const TOOLTIP_OFFSET: f64 = 14.0;

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete chart.
pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let frame = state.frame();
	let scale = state.scaled();

	draw_background(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	draw_edges(state, ctx, &frame, &scale);
	draw_nodes(state, ctx, &frame, &scale);
	if state.style().label.show {
		draw_labels(state, ctx, &frame, &scale);
	}

	ctx.restore();

	if let (Some(text), Some(pointer)) = (state.tooltip_text(), state.pointer) {
		draw_tooltip(state, ctx, &text, pointer);
	}
}

fn draw_background(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.theme().background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Alpha multiplier for an item with emphasis `t` while the strongest emphasis
/// anywhere is `max_t`.
fn blur(state: &ForceGraphState, t: f64, max_t: f64) -> f64 {
	let blur_alpha = state.theme().blur_alpha;
	let dimmed = 1.0 - (1.0 - blur_alpha) * max_t;
	dimmed + (1.0 - dimmed) * t
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	frame: &Frame,
	scale: &ScaledValues,
) {
	let style = state.style();
	let fade = state.edge_progress();
	let max_t = smooth_step(state.emphasis.max());

	for (i, edge) in state.edges().iter().enumerate() {
		let Some(shape) = state.edge_shape(frame, edge, scale) else {
			continue;
		};
		let edge_t = smooth_step(state.emphasis.edge(edge.source, edge.target));
		let hovered = state.hover == Some(HoverTarget::Edge(i));
		let alpha = style.line_style.opacity * fade * blur(state, edge_t, max_t);
		let color = state.edge_color(frame, edge).with_alpha(alpha.min(1.0));
		let width = if hovered {
			scale.line_width * 2.0
		} else {
			scale.line_width * (1.0 + edge_t)
		};

		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_fill_style_str(&color.to_css());
		ctx.set_line_width(width);

		match shape {
			EdgeShape::Loop(self_loop) => {
				ctx.begin_path();
				let _ = ctx.arc(
					self_loop.center.0,
					self_loop.center.1,
					self_loop.radius,
					0.0,
					2.0 * PI,
				);
				ctx.stroke();
			}
			EdgeShape::Curve(curve) => draw_curved_edge(ctx, &curve, style.edge_symbol, scale),
		}

		if style.edge_label.show {
			draw_edge_label(ctx, &shape, edge, scale, color);
		}
	}
}

/// Stroke the curve and place the end symbols on the node borders. The line
/// stops at the base of an arrow so the tip stays sharp.
fn draw_curved_edge(
	ctx: &CanvasRenderingContext2d,
	curve: &Curve,
	symbols: [EdgeSymbol; 2],
	scale: &ScaledValues,
) {
	let inset = |symbol: EdgeSymbol, size: f64| match symbol {
		EdgeSymbol::Arrow => size,
		_ => 0.0,
	};
	let [source_size, target_size] = scale.edge_symbol_size;
	let line = curve.trimmed(
		inset(symbols[0], source_size),
		inset(symbols[1], target_size),
	);

	if let Some(line) = line {
		ctx.begin_path();
		ctx.move_to(line.start.0, line.start.1);
		let _ = ctx.quadratic_curve_to(line.control.0, line.control.1, line.end.0, line.end.1);
		ctx.stroke();
	}

	let (sx, sy) = curve.direction(0.0);
	draw_symbol(ctx, symbols[0], curve.start, (-sx, -sy), source_size);
	draw_symbol(ctx, symbols[1], curve.end, curve.direction(1.0), target_size);
}

/// Draw an edge symbol with its tip at `at`, pointing along `dir`.
fn draw_symbol(
	ctx: &CanvasRenderingContext2d,
	symbol: EdgeSymbol,
	at: Point,
	dir: Point,
	size: f64,
) {
	match symbol {
		EdgeSymbol::None => {}
		EdgeSymbol::Circle => {
			ctx.begin_path();
			let _ = ctx.arc(at.0, at.1, size / 2.0, 0.0, 2.0 * PI);
			ctx.fill();
		}
		EdgeSymbol::Arrow => {
			let (ux, uy) = dir;
			let (back_x, back_y) = (at.0 - ux * size, at.1 - uy * size);
			let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
			ctx.begin_path();
			ctx.move_to(at.0, at.1);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
}

fn draw_edge_label(
	ctx: &CanvasRenderingContext2d,
	shape: &EdgeShape,
	edge: &Edge,
	scale: &ScaledValues,
	color: Color,
) {
	let (x, y) = match shape {
		EdgeShape::Curve(curve) => curve.point(0.5),
		EdgeShape::Loop(self_loop) => (
			self_loop.center.0,
			self_loop.center.1 - self_loop.radius,
		),
	};
	let text = format_tooltip(&TooltipDatum::Edge {
		source: edge.source,
		target: edge.target,
	});
	ctx.set_font(&scale.edge_label_font());
	ctx.set_text_align("center");
	ctx.set_text_baseline("bottom");
	ctx.set_fill_style_str(&color.with_alpha(color.a.max(0.6)).to_css());
	let _ = ctx.fill_text(&text, x, y);
}

/// Node radius for this frame, including the grow-in after configuration.
fn drawn_radius(state: &ForceGraphState, node: &NodeView, scale: &ScaledValues) -> f64 {
	scale.node_radius(node.info.symbol_size) * state.appear_progress()
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	frame: &Frame,
	scale: &ScaledValues,
) {
	let max_t = smooth_step(state.emphasis.max());
	let emphasized = |node: &NodeView| {
		state.emphasis.is_focused(node.info.id) || state.emphasis.node(node.info.id) > 0.001
	};

	// Plain nodes first, emphasized ones on top.
	for pass_emphasized in [false, true] {
		for node in frame.nodes.iter().filter(|n| emphasized(*n) == pass_emphasized) {
			let t = smooth_step(state.emphasis.node(node.info.id));
			let radius = drawn_radius(state, node, scale) * (1.0 + 0.15 * t);
			if radius <= 0.0 {
				continue;
			}

			ctx.set_global_alpha(blur(state, t, max_t));
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&node.info.color.lighten(0.2 * t).to_css());
			ctx.fill();

			if state.hover == Some(HoverTarget::Node(node.info.id)) {
				ctx.set_stroke_style_str(&node.info.color.to_css());
				ctx.set_line_width(scale.line_width * 2.0);
				ctx.stroke();
			}
		}
	}
	ctx.set_global_alpha(1.0);
}

/// Label box for a node, in graph space.
fn label_rect(
	node: &NodeView,
	radius: f64,
	position: LabelPosition,
	width: f64,
	height: f64,
	gap: f64,
) -> LabelRect {
	match position {
		LabelPosition::Bottom => LabelRect::centered(node.x, node.y + radius + gap, width, height),
		LabelPosition::Top => {
			LabelRect::centered(node.x, node.y - radius - gap - height, width, height)
		}
		LabelPosition::Right => LabelRect {
			x: node.x + radius + gap,
			y: node.y - height / 2.0,
			width,
			height,
		},
		LabelPosition::Inside => LabelRect::centered(node.x, node.y - height / 2.0, width, height),
	}
}

fn draw_labels(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	frame: &Frame,
	scale: &ScaledValues,
) {
	let style = state.style();
	let max_t = smooth_step(state.emphasis.max());
	let gap = LABEL_GAP / scale.k;

	ctx.set_font(&scale.label_font());
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");

	let rects: Vec<LabelRect> = frame
		.nodes
		.iter()
		.map(|node| {
			let width = ctx
				.measure_text(&node.info.label)
				.map(|m| m.width())
				.unwrap_or(0.0);
			label_rect(
				node,
				drawn_radius(state, node, scale),
				style.label.position,
				width,
				scale.label_font_size,
				gap,
			)
		})
		.collect();

	let hovered = match state.hover {
		Some(HoverTarget::Node(id)) => frame.nodes.iter().position(|n| n.info.id == id),
		_ => None,
	};
	let visible = place_labels(&rects, hovered, style.label_layout.hide_overlap);

	let text_color = state.theme().label_color;
	for ((node, rect), shown) in frame.nodes.iter().zip(&rects).zip(visible) {
		if !shown {
			continue;
		}
		let t = smooth_step(state.emphasis.node(node.info.id));
		let alpha = blur(state, t, max_t) * state.appear_progress();
		ctx.set_fill_style_str(&text_color.with_alpha(alpha).to_css());
		let _ = ctx.fill_text(&node.info.label, rect.x, rect.y);
	}
}

fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, text: &str, at: Point) {
	let style = &state.theme().tooltip;
	ctx.set_font(&format!("{}px sans-serif", style.font_size));
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");

	let text_width = ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0);
	let width = text_width + style.padding * 2.0;
	let height = style.font_size + style.padding * 2.0;

	// Flip to the other side of the pointer rather than leave the canvas.
	let mut x = at.0 + TOOLTIP_OFFSET;
	let mut y = at.1 + TOOLTIP_OFFSET;
	if x + width > state.width {
		x = at.0 - TOOLTIP_OFFSET - width;
	}
	if y + height > state.height {
		y = at.1 - TOOLTIP_OFFSET - height;
	}
	let (x, y) = (x.max(0.0), y.max(0.0));

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(x, y, width, height);
	ctx.set_stroke_style_str(&style.border.to_css());
	ctx.set_line_width(1.0);
	ctx.stroke_rect(x, y, width, height);

	ctx.set_fill_style_str(&style.text.to_css());
	let _ = ctx.fill_text(text, x + style.padding, y + style.padding);
}
