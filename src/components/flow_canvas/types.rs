use std::fmt;
use std::ops::{Add, Sub};

/// A 2d position or offset. Which space it lives in depends on the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// `(0, 0)`.
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	/// Builds a point from its coordinates.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Multiplies both coordinates by `k`.
	pub fn scaled(self, k: f64) -> Self {
		Self::new(self.x * k, self.y * k)
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

/// Axis-aligned rectangle in model coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	/// Left edge.
	pub x: f64,
	/// Top edge.
	pub y: f64,
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Rect {
	/// Edges count as inside.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
	}

	/// Midpoint of the rectangle.
	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	/// Grows the rectangle by `padding` on every side.
	pub fn inflate(&self, padding: f64) -> Rect {
		Rect {
			x: self.x - padding,
			y: self.y - padding,
			width: self.width + 2.0 * padding,
			height: self.height + 2.0 * padding,
		}
	}
}

/// Identifier of a shape in a [`DiagramModel`](super::DiagramModel). Never reused within one model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// One zoom step, either towards or away from the diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
	/// Scale up by one step.
	In,
	/// Scale down by one step.
	Out,
}

impl ZoomDirection {
	/// Wheel convention: positive delta zooms in. Zero has no direction.
	pub fn from_delta(delta: f64) -> Option<Self> {
		if delta > 0.0 {
			Some(Self::In)
		} else if delta < 0.0 {
			Some(Self::Out)
		} else {
			None
		}
	}
}

/// Mouse button as reported by the DOM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
	/// Usually the left button.
	Primary,
	/// Wheel button.
	Middle,
	/// Usually the right button.
	Secondary,
	/// Back, forward and anything else.
	Other,
}

impl MouseButton {
	/// Maps `MouseEvent.button` values.
	pub fn from_dom(button: i16) -> Self {
		match button {
			0 => Self::Primary,
			1 => Self::Middle,
			2 => Self::Secondary,
			_ => Self::Other,
		}
	}
}

/// What the pointer is over, as resolved by the surface's hit test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
	/// Empty canvas.
	Blank,
	/// The body of a node.
	Shape(ShapeId),
	/// The remove affordance of the tools decoration on a shape.
	RemoveTool(ShapeId),
}

/// Pointer cursor the surface shows over the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
	/// The platform arrow.
	#[default]
	Default,
	/// Shown while panning.
	AllScroll,
}

impl Cursor {
	/// CSS `cursor` value.
	pub fn css(self) -> &'static str {
		match self {
			Cursor::Default => "default",
			Cursor::AllScroll => "all-scroll",
		}
	}
}

/// Input delivered to the gesture router. Positions are in canvas-relative
/// screen pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
	/// A mouse button went down over `target`.
	PointerDown {
		/// Which button.
		button: MouseButton,
		/// What was under the pointer.
		target: Target,
		/// Where the pointer was.
		position: Point,
	},
	/// The pointer moved over the canvas.
	PointerMove {
		/// New pointer position.
		position: Point,
	},
	/// A mouse button was released.
	PointerUp {
		/// Which button.
		button: MouseButton,
		/// Where the pointer was.
		position: Point,
	},
	/// The pointer left the canvas.
	PointerLeave,
	/// Wheel scrolled; positive `delta` zooms in.
	Wheel {
		/// Signed scroll amount.
		delta: f64,
		/// Pointer position, used as the zoom anchor.
		position: Point,
	},
	/// The context menu was requested.
	ContextMenu {
		/// What was under the pointer.
		target: Target,
		/// Where the pointer was.
		position: Point,
	},
	/// Double click over `target`.
	DoubleClick {
		/// What was under the pointer.
		target: Target,
	},
	/// The label overlay lost focus.
	OverlayBlur {
		/// Text in the overlay when it blurred.
		value: String,
	},
}
