//! The rendering host as seen by the interaction engine.

use super::types::{Cursor, Point, ShapeId};

/// Operations the engine performs on whatever draws the diagram.
///
/// Implementations must treat requests about shapes they no longer know
/// (removed, never drawn) as no-ops. Detaching tools from a shape that has
/// none is not an error.
pub trait Surface {
	/// Mirrors the viewport: screen = model * scale + pan.
	fn set_transform(&mut self, scale: f64, pan: Point);

	/// Adds the boundary highlight and remove affordance to `shape`.
	fn attach_tools(&mut self, shape: ShapeId);

	/// Removes the decoration added by [`Surface::attach_tools`].
	fn detach_tools(&mut self, shape: ShapeId);

	/// Shows the text overlay over `node`, seeded with `seed`, and gives it
	/// input focus.
	fn show_overlay(&mut self, node: ShapeId, seed: &str);

	/// Current text of the overlay for `node`, if it is showing.
	fn overlay_value(&self, node: ShapeId) -> Option<String>;

	/// Hides the overlay if it is showing for `node`.
	fn hide_overlay(&mut self, node: ShapeId);

	/// Changes the pointer cursor over the canvas.
	fn set_cursor(&mut self, cursor: Cursor);
}

#[cfg(test)]
pub(crate) mod recording {
	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Call {
		Transform(f64, Point),
		Attach(ShapeId),
		Detach(ShapeId),
		Show(ShapeId, String),
		Hide(ShapeId),
		Cursor(Cursor),
	}

	/// Records every call in order and keeps a fake overlay the tests can
	/// type into.
	#[derive(Debug, Default)]
	pub struct RecordingSurface {
		pub calls: Vec<Call>,
		pub overlay: Option<(ShapeId, String)>,
		pub focused: Option<ShapeId>,
	}

	impl RecordingSurface {
		pub fn type_text(&mut self, text: &str) {
			if let Some((_, value)) = self.overlay.as_mut() {
				*value = text.to_string();
			}
		}

		pub fn take_calls(&mut self) -> Vec<Call> {
			std::mem::take(&mut self.calls)
		}

		pub fn tools_on(&self) -> Vec<ShapeId> {
			let mut on = Vec::new();
			for call in &self.calls {
				match call {
					Call::Attach(id) if !on.contains(id) => on.push(*id),
					Call::Detach(id) => on.retain(|x| x != id),
					_ => {}
				}
			}
			on
		}
	}

	impl Surface for RecordingSurface {
		fn set_transform(&mut self, scale: f64, pan: Point) {
			self.calls.push(Call::Transform(scale, pan));
		}

		fn attach_tools(&mut self, shape: ShapeId) {
			self.calls.push(Call::Attach(shape));
		}

		fn detach_tools(&mut self, shape: ShapeId) {
			self.calls.push(Call::Detach(shape));
		}

		fn show_overlay(&mut self, node: ShapeId, seed: &str) {
			self.calls.push(Call::Show(node, seed.to_string()));
			self.overlay = Some((node, seed.to_string()));
			self.focused = Some(node);
		}

		fn overlay_value(&self, node: ShapeId) -> Option<String> {
			self.overlay
				.as_ref()
				.filter(|(id, _)| *id == node)
				.map(|(_, value)| value.clone())
		}

		fn hide_overlay(&mut self, node: ShapeId) {
			self.calls.push(Call::Hide(node));
			if self.overlay.as_ref().is_some_and(|(id, _)| *id == node) {
				self.overlay = None;
				self.focused = None;
			}
		}

		fn set_cursor(&mut self, cursor: Cursor) {
			self.calls.push(Call::Cursor(cursor));
		}
	}
}
