//! Input dispatch for the canvas.
//!
//! ```text
//! Idle -> Panning        (middle button down on blank canvas)
//! Panning -> Idle        (middle button up, pointer leaves canvas)
//! Idle -> DraggingNode   (primary button down on a node)
//! DraggingNode -> Idle   (primary button up, pointer leaves canvas)
//! ```
//!
//! Move events only do something outside `Idle`, so the pan and drag
//! handlers are live exactly while their state is.

use log::debug;

use super::editor;
use super::model::DiagramModel;
use super::selection::Selection;
use super::shapes::{NodeOverrides, create_node};
use super::surface::Surface;
use super::types::{Cursor, InputEvent, MouseButton, Point, ShapeId, Target, ZoomDirection};
use super::viewport::Viewport;

/// The pointer gesture in progress, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
	/// Nothing held down.
	#[default]
	Idle,
	/// Middle button held on blank canvas.
	Panning {
		/// Last pointer sample, screen space.
		last: Point,
	},
	/// Primary button held on a node.
	DraggingNode {
		/// The node being moved.
		node: ShapeId,
		/// Last pointer sample, screen space.
		last: Point,
	},
}

/// Per-canvas view state shared by the controllers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
	/// Pan and zoom.
	pub viewport: Viewport,
	/// The one shape carrying tools.
	pub selection: Selection,
	/// Pointer gesture in progress.
	pub gesture: GestureState,
}

impl ViewState {
	/// Pointer position of the active pan, if panning.
	pub fn drag_origin(&self) -> Option<Point> {
		match self.gesture {
			GestureState::Panning { last } => Some(last),
			_ => None,
		}
	}

	/// Sends one event to the controller that owns it. Runs to completion.
	pub fn dispatch(&mut self, model: &mut DiagramModel, surface: &mut impl Surface, event: InputEvent) {
		match event {
			InputEvent::PointerDown {
				button,
				target,
				position,
			} => self.pointer_down(model, surface, button, target, position),
			InputEvent::PointerMove { position } => self.pointer_move(model, position),
			InputEvent::PointerUp { button, .. } => match (button, self.gesture) {
				(MouseButton::Middle, GestureState::Panning { .. }) => {
					self.end_gesture(surface);
				}
				(MouseButton::Primary, GestureState::DraggingNode { .. }) => {
					self.end_gesture(surface);
				}
				_ => {}
			},
			InputEvent::PointerLeave => {
				if self.gesture != GestureState::Idle {
					debug!("pointer left canvas, cancelling {:?}", self.gesture);
					self.end_gesture(surface);
				}
			}
			InputEvent::Wheel { delta, position } => {
				if let Some(direction) = ZoomDirection::from_delta(delta) {
					let anchor = self.viewport.screen_to_model(position);
					self.viewport.zoom_by(direction, anchor);
				}
			}
			InputEvent::ContextMenu {
				target: Target::Blank,
				position,
			} => {
				let at = self.viewport.screen_to_model(position);
				model.add_node(create_node(at, NodeOverrides::default()));
			}
			InputEvent::ContextMenu { .. } => {}
			InputEvent::DoubleClick {
				target: Target::Shape(id),
			} => editor::begin(model, surface, id),
			InputEvent::DoubleClick { .. } => {}
			InputEvent::OverlayBlur { value } => {
				if let Some(id) = model.editing_node() {
					editor::commit(model, surface, id, value);
				}
			}
		}
	}

	fn pointer_down(
		&mut self,
		model: &mut DiagramModel,
		surface: &mut impl Surface,
		button: MouseButton,
		target: Target,
		position: Point,
	) {
		match (button, target) {
			(MouseButton::Middle, Target::Blank) => {
				if self.gesture == GestureState::Idle {
					self.gesture = GestureState::Panning { last: position };
					surface.set_cursor(Cursor::AllScroll);
					debug!("pan started at ({}, {})", position.x, position.y);
				}
			}
			(MouseButton::Primary, Target::Shape(id)) => {
				if !model.contains(id) {
					return;
				}
				self.selection.select_or_toggle(id, surface);
				if self.gesture == GestureState::Idle && model.node(id).is_some() {
					self.gesture = GestureState::DraggingNode { node: id, last: position };
				}
			}
			(MouseButton::Primary, Target::RemoveTool(id)) => self.remove(model, surface, id),
			(MouseButton::Primary, Target::Blank) => self.selection.clear(surface),
			_ => {}
		}
	}

	fn pointer_move(&mut self, model: &mut DiagramModel, position: Point) {
		match &mut self.gesture {
			GestureState::Idle => {}
			GestureState::Panning { last } => {
				let delta = position - *last;
				*last = position;
				self.viewport.pan_by(delta.x, delta.y);
			}
			GestureState::DraggingNode { node, last } => {
				let delta = self.viewport.delta_to_model(position - *last);
				*last = position;
				match model.node_mut(*node) {
					Some(n) => n.position = n.position + delta,
					None => self.gesture = GestureState::Idle,
				}
			}
		}
	}

	fn end_gesture(&mut self, surface: &mut impl Surface) {
		if matches!(self.gesture, GestureState::Panning { .. }) {
			surface.set_cursor(Cursor::Default);
		}
		debug!("gesture {:?} ended", self.gesture);
		self.gesture = GestureState::Idle;
	}

	fn remove(&mut self, model: &mut DiagramModel, surface: &mut impl Surface, id: ShapeId) {
		if model.editing_node() == Some(id) {
			editor::commit_open(model, surface);
		}
		if self.selection.selected() == Some(id) {
			self.selection.clear(surface);
		}
		for gone in model.remove(id) {
			self.selection.forget(gone);
			if matches!(self.gesture, GestureState::DraggingNode { node, .. } if node == gone) {
				self.gesture = GestureState::Idle;
			}
		}
	}

	/// Ends whatever is in progress and lets go of the surface. Used when
	/// the canvas goes away.
	pub fn release(&mut self, model: &mut DiagramModel, surface: &mut impl Surface) {
		editor::commit_open(model, surface);
		if self.gesture != GestureState::Idle {
			self.end_gesture(surface);
		}
		self.selection.clear(surface);
	}
}
