//! Node and edge records with their fixed presentation defaults.

use super::types::{Point, Rect, ShapeId};

pub const NODE_WIDTH: f64 = 150.0;
pub const NODE_HEIGHT: f64 = 65.0;
pub const NODE_FILL: &str = "rgb(191, 177, 223)";
pub const NODE_STROKE: &str = "#000000";
pub const LABEL_COLOR: &str = "#333333";
pub const LABEL_FONT_SIZE: f64 = 14.0;
pub const EDGE_STROKE: &str = "#333333";

/// Padding between a node and its boundary highlight.
pub const BOUNDARY_PADDING: f64 = 10.0;
pub const REMOVE_BUTTON_RADIUS: f64 = 7.0;

/// Whether a node's label is shown or being edited in the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
	/// Label drawn on the canvas.
	#[default]
	Display,
	/// Label hidden; the overlay input holds the text.
	Editing,
}

/// Presentation of a node body and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
	/// Body fill colour.
	pub fill: String,
	/// Outline colour.
	pub stroke: String,
	/// Outline width in model units.
	pub stroke_width: f64,
	/// Radius of the rounded corners.
	pub corner_radius: f64,
	/// Label size in pixels.
	pub font_size: f64,
	/// Render the label in small caps.
	pub small_caps: bool,
	/// Label colour.
	pub label_color: String,
}

impl Default for NodeStyle {
	fn default() -> Self {
		Self {
			fill: NODE_FILL.into(),
			stroke: NODE_STROKE.into(),
			stroke_width: 2.0,
			corner_radius: 5.0,
			font_size: LABEL_FONT_SIZE,
			small_caps: false,
			label_color: LABEL_COLOR.into(),
		}
	}
}

/// Caller-supplied values merged over the node defaults.
#[derive(Clone, Debug, Default)]
pub struct NodeOverrides {
	/// Initial label; empty when absent.
	pub label: Option<String>,
	/// Replaces [`NodeStyle::fill`].
	pub fill: Option<String>,
	/// Replaces [`NodeStyle::font_size`].
	pub font_size: Option<f64>,
	/// Replaces [`NodeStyle::small_caps`].
	pub small_caps: Option<bool>,
}

/// A labelled rectangle on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Top-left corner in model space.
	pub position: Point,
	/// Width in model units.
	pub width: f64,
	/// Height in model units.
	pub height: f64,
	/// How the node is drawn.
	pub style: NodeStyle,
	/// Committed label text.
	pub label: String,
	/// Display or editing.
	pub mode: EditMode,
}

impl Node {
	/// Body rectangle in model space.
	pub fn bounds(&self) -> Rect {
		Rect {
			x: self.position.x,
			y: self.position.y,
			width: self.width,
			height: self.height,
		}
	}

	/// Center of the body.
	pub fn center(&self) -> Point {
		self.bounds().center()
	}

	/// True while the overlay owns the label.
	pub fn is_editing(&self) -> bool {
		self.mode == EditMode::Editing
	}

	/// The boundary highlight drawn while tools are attached.
	pub fn boundary(&self) -> Rect {
		self.bounds().inflate(BOUNDARY_PADDING)
	}

	/// Center of the remove affordance, pinned to the top-left corner.
	pub fn remove_button(&self) -> Point {
		self.position
	}

	/// Hit test for the remove affordance.
	pub fn remove_button_contains(&self, p: Point) -> bool {
		let d = p - self.remove_button();
		(d.x * d.x + d.y * d.y).sqrt() <= REMOVE_BUTTON_RADIUS
	}

	/// Where the ray from the center towards `toward` leaves the box.
	pub fn boundary_point(&self, toward: Point) -> Point {
		let c = self.center();
		let (dx, dy) = (toward.x - c.x, toward.y - c.y);
		if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
			return c;
		}
		let tx = if dx.abs() < f64::EPSILON { f64::INFINITY } else { (self.width / 2.0) / dx.abs() };
		let ty = if dy.abs() < f64::EPSILON { f64::INFINITY } else { (self.height / 2.0) / dy.abs() };
		let t = tx.min(ty);
		Point::new(c.x + dx * t, c.y + dy * t)
	}
}

/// Presentation of a connector and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeStyle {
	/// Line and arrowhead colour.
	pub stroke: String,
	/// Line width in model units.
	pub stroke_width: f64,
	/// Arrowhead length.
	pub marker_size: f64,
	/// Label size in pixels.
	pub font_size: f64,
	/// Fill behind the label text.
	pub label_background: String,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			stroke: EDGE_STROKE.into(),
			stroke_width: 2.0,
			marker_size: 10.0,
			font_size: LABEL_FONT_SIZE,
			label_background: "#ffffff".into(),
		}
	}
}

/// A directed, labelled connector between two nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Node the arrow starts from.
	pub source: ShapeId,
	/// Node the arrow points at.
	pub target: ShapeId,
	/// Text drawn at the midpoint.
	pub label: String,
	/// How the edge is drawn.
	pub style: EdgeStyle,
}

impl Edge {
	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: ShapeId) -> bool {
		self.source == id || self.target == id
	}
}

/// Anything stored in a [`DiagramModel`](super::DiagramModel).
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	/// A rectangle.
	Node(Node),
	/// A connector.
	Edge(Edge),
}

impl Shape {
	/// The node, if this is one.
	pub fn as_node(&self) -> Option<&Node> {
		match self {
			Shape::Node(node) => Some(node),
			Shape::Edge(_) => None,
		}
	}

	/// Mutable access to the node, if this is one.
	pub fn as_node_mut(&mut self) -> Option<&mut Node> {
		match self {
			Shape::Node(node) => Some(node),
			Shape::Edge(_) => None,
		}
	}

	/// The edge, if this is one.
	pub fn as_edge(&self) -> Option<&Edge> {
		match self {
			Shape::Edge(edge) => Some(edge),
			Shape::Node(_) => None,
		}
	}
}

/// Builds a node of the default size at `position`, in display mode.
pub fn create_node(position: Point, overrides: NodeOverrides) -> Node {
	let mut style = NodeStyle::default();
	if let Some(fill) = overrides.fill {
		style.fill = fill;
	}
	if let Some(size) = overrides.font_size {
		style.font_size = size;
	}
	if let Some(small_caps) = overrides.small_caps {
		style.small_caps = small_caps;
	}

	Node {
		position,
		width: NODE_WIDTH,
		height: NODE_HEIGHT,
		style,
		label: overrides.label.unwrap_or_default(),
		mode: EditMode::Display,
	}
}

/// Builds an edge with the default style. Self-loops are structurally
/// allowed here.
pub fn create_edge(label: impl Into<String>, source: ShapeId, target: ShapeId) -> Edge {
	Edge {
		source,
		target,
		label: label.into(),
		style: EdgeStyle::default(),
	}
}
