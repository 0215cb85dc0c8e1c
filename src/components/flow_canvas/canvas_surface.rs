//! Browser implementation of [`Surface`]: a 2d canvas plus one text input
//! laid over the node under edit.

use log::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement};

use super::error::{MountError, MountResult};
use super::model::DiagramModel;
use super::render;
use super::surface::Surface;
use super::types::{Cursor, Point, ShapeId, Target};
use super::viewport::Viewport;

/// A `<canvas>` and its label `<input>`, plus the last transform, tools and
/// edit target the engine pushed.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	overlay: HtmlInputElement,
	pub(super) transform: Viewport,
	pub(super) tools: Option<ShapeId>,
	pub(super) editing: Option<ShapeId>,
	pub(super) width: f64,
	pub(super) height: f64,
}

impl CanvasSurface {
	/// Takes the 2d context of `canvas`, sizes it and hides `overlay`.
	pub fn new(
		canvas: HtmlCanvasElement,
		overlay: HtmlInputElement,
		width: f64,
		height: f64,
	) -> MountResult<Self> {
		let ctx = canvas
			.get_context("2d")
			.map_err(|e| MountError::NoContext(format!("{e:?}")))?
			.ok_or_else(|| MountError::NoContext("getContext returned null".into()))?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| MountError::NoContext("not a CanvasRenderingContext2d".into()))?;

		let mut surface = Self {
			canvas,
			ctx,
			overlay,
			transform: Viewport::default(),
			tools: None,
			editing: None,
			width,
			height,
		};
		surface.resize(width, height);
		surface.set_overlay_style("display", "none");
		Ok(surface)
	}

	/// Sets the backing store size in pixels.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.canvas.set_width(width as u32);
		self.canvas.set_height(height as u32);
	}

	/// Resolves what sits under a canvas-relative screen point.
	pub fn classify(&self, model: &DiagramModel, p: Point) -> Target {
		let at = self.transform.screen_to_model(p);
		if let Some(id) = self.tools {
			if model.node(id).is_some_and(|node| node.remove_button_contains(at)) {
				return Target::RemoveTool(id);
			}
		}
		model.node_at(at).map_or(Target::Blank, Target::Shape)
	}

	/// Draws one frame and keeps the overlay glued to its node.
	pub fn draw(&self, model: &DiagramModel) {
		render::render(self, model, &self.ctx);
		self.place_overlay(model);
	}

	fn place_overlay(&self, model: &DiagramModel) {
		let Some(node) = self.editing.and_then(|id| model.node(id)) else {
			return;
		};
		let k = self.transform.scale;
		let corner = self.transform.model_to_screen(node.position);
		self.set_overlay_style("left", &format!("{}px", corner.x));
		self.set_overlay_style("top", &format!("{}px", corner.y));
		self.set_overlay_style("width", &format!("{}px", node.width * k));
		self.set_overlay_style("height", &format!("{}px", node.height * k));
		self.set_overlay_style("font-size", &format!("{}px", node.style.font_size * k));
	}

	fn set_overlay_style(&self, name: &str, value: &str) {
		if let Err(e) = self.overlay.style().set_property(name, value) {
			warn!("overlay style {name}: {e:?}");
		}
	}
}

impl Surface for CanvasSurface {
	fn set_transform(&mut self, scale: f64, pan: Point) {
		self.transform = Viewport { scale, pan };
	}

	fn attach_tools(&mut self, shape: ShapeId) {
		self.tools = Some(shape);
	}

	fn detach_tools(&mut self, shape: ShapeId) {
		if self.tools == Some(shape) {
			self.tools = None;
		}
	}

	fn show_overlay(&mut self, node: ShapeId, seed: &str) {
		self.editing = Some(node);
		self.overlay.set_value(seed);
		self.set_overlay_style("display", "block");
		if let Err(e) = self.overlay.focus() {
			warn!("overlay focus for {node}: {e:?}");
		}
	}

	fn overlay_value(&self, node: ShapeId) -> Option<String> {
		(self.editing == Some(node)).then(|| self.overlay.value())
	}

	fn hide_overlay(&mut self, node: ShapeId) {
		if self.editing != Some(node) {
			debug!("hide overlay for {node}: not showing");
			return;
		}
		self.editing = None;
		self.set_overlay_style("display", "none");
	}

	fn set_cursor(&mut self, cursor: Cursor) {
		if let Err(e) = self.canvas.style().set_property("cursor", cursor.css()) {
			warn!("cursor: {e:?}");
		}
	}
}
