use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::canvas_surface::CanvasSurface;
use super::model::DiagramModel;
use super::shapes::{Edge, Node, REMOVE_BUTTON_RADIUS};
use super::types::Point;

pub const GRID_SIZE: f64 = 10.0;
const BACKGROUND: &str = "rgb(255, 255, 255)";
const GRID_COLOR: &str = "#aaaaaa";
const BOUNDARY_STROKE: &str = "#33334F";
const REMOVE_FILL: &str = "#FF1D00";

pub fn render(surface: &CanvasSurface, model: &DiagramModel, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, surface.width, surface.height);
	ctx.save();
	let view = surface.transform;
	let _ = ctx.translate(view.pan.x, view.pan.y);
	let _ = ctx.scale(view.scale, view.scale);
	draw_grid(surface, ctx);
	for (_, edge) in model.edges() {
		draw_edge(model, edge, ctx);
	}
	for (_, node) in model.nodes() {
		draw_node(node, ctx);
	}
	if let Some(node) = surface.tools.and_then(|id| model.node(id)) {
		draw_tools(node, view.scale, ctx);
	}
	ctx.restore();
}

fn draw_grid(surface: &CanvasSurface, ctx: &CanvasRenderingContext2d) {
	let view = surface.transform;
	// too dense to be useful when zoomed far out
	if GRID_SIZE * view.scale < 5.0 {
		return;
	}
	let min = view.screen_to_model(Point::ORIGIN);
	let max = view.screen_to_model(Point::new(surface.width, surface.height));
	let dot = 1.0 / view.scale;

	ctx.set_fill_style_str(GRID_COLOR);
	let mut x = (min.x / GRID_SIZE).floor() * GRID_SIZE;
	while x <= max.x {
		let mut y = (min.y / GRID_SIZE).floor() * GRID_SIZE;
		while y <= max.y {
			ctx.fill_rect(x, y, dot, dot);
			y += GRID_SIZE;
		}
		x += GRID_SIZE;
	}
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_node(node: &Node, ctx: &CanvasRenderingContext2d) {
	let b = node.bounds();
	let style = &node.style;
	rounded_rect(ctx, b.x, b.y, b.width, b.height, style.corner_radius);
	ctx.set_fill_style_str(&style.fill);
	ctx.fill();
	ctx.set_stroke_style_str(&style.stroke);
	ctx.set_line_width(style.stroke_width);
	ctx.stroke();

	// the overlay input stands in for the label while editing
	if node.is_editing() || node.label.is_empty() {
		return;
	}
	let variant = if style.small_caps { "small-caps " } else { "" };
	ctx.set_font(&format!("{variant}{}px sans-serif", style.font_size));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(&style.label_color);
	let c = b.center();
	let _ = ctx.fill_text(&node.label, c.x, c.y);
}

fn draw_edge(model: &DiagramModel, edge: &Edge, ctx: &CanvasRenderingContext2d) {
	let (Some(source), Some(target)) = (model.node(edge.source), model.node(edge.target)) else {
		return;
	};
	let from = source.boundary_point(target.center());
	let to = target.boundary_point(source.center());
	let (dx, dy) = (to.x - from.x, to.y - from.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}

	let style = &edge.style;
	let (ux, uy) = (dx / dist, dy / dist);
	let arrow = style.marker_size;
	ctx.set_stroke_style_str(&style.stroke);
	ctx.set_line_width(style.stroke_width);
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x - ux * arrow, to.y - uy * arrow);
	ctx.stroke();

	ctx.set_fill_style_str(&style.stroke);
	let (back_x, back_y) = (to.x - ux * arrow, to.y - uy * arrow);
	let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);
	ctx.begin_path();
	ctx.move_to(to.x, to.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();

	if edge.label.is_empty() {
		return;
	}
	let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
	ctx.set_font(&format!("{}px sans-serif", style.font_size));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let width = ctx
		.measure_text(&edge.label)
		.map(|m| m.width())
		.unwrap_or(style.font_size * edge.label.len() as f64 * 0.6);
	let pad = 4.0;
	ctx.set_fill_style_str(&style.label_background);
	ctx.fill_rect(
		mid.x - width / 2.0 - pad,
		mid.y - style.font_size / 2.0 - pad,
		width + 2.0 * pad,
		style.font_size + 2.0 * pad,
	);
	ctx.set_fill_style_str(&style.stroke);
	let _ = ctx.fill_text(&edge.label, mid.x, mid.y);
}

/// Dashed boundary plus the remove button. Line widths stay constant on
/// screen regardless of zoom.
fn draw_tools(node: &Node, k: f64, ctx: &CanvasRenderingContext2d) {
	let b = node.boundary();
	ctx.set_stroke_style_str(BOUNDARY_STROKE);
	ctx.set_line_width(1.0 / k);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(5.0 / k),
		&JsValue::from_f64(5.0 / k),
	));
	ctx.stroke_rect(b.x, b.y, b.width, b.height);
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	let c = node.remove_button();
	ctx.begin_path();
	let _ = ctx.arc(c.x, c.y, REMOVE_BUTTON_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(REMOVE_FILL);
	ctx.fill();

	let arm = REMOVE_BUTTON_RADIUS * 0.45;
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(2.0);
	ctx.begin_path();
	ctx.move_to(c.x - arm, c.y - arm);
	ctx.line_to(c.x + arm, c.y + arm);
	ctx.move_to(c.x + arm, c.y - arm);
	ctx.line_to(c.x - arm, c.y + arm);
	ctx.stroke();
}
