use log::debug;

use super::surface::Surface;
use super::types::ShapeId;

/// At most one selected shape; the selected shape is the only one carrying
/// tools on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
	selected: Option<ShapeId>,
}

impl Selection {
	/// The selected shape, if any.
	pub fn selected(&self) -> Option<ShapeId> {
		self.selected
	}

	/// Selects `shape`, or clears the selection when `shape` is already the
	/// selected one. Tools come off the old shape before going on the new.
	pub fn select_or_toggle(&mut self, shape: ShapeId, surface: &mut impl Surface) {
		let previous = self.selected.take();
		if let Some(prev) = previous {
			surface.detach_tools(prev);
		}
		if previous == Some(shape) {
			debug!("selection cleared by toggling {shape}");
			return;
		}
		self.selected = Some(shape);
		surface.attach_tools(shape);
		debug!("selected {shape}");
	}

	/// Deselects, detaching tools from the previous selection.
	pub fn clear(&mut self, surface: &mut impl Surface) {
		if let Some(prev) = self.selected.take() {
			surface.detach_tools(prev);
			debug!("selection cleared");
		}
	}

	/// Drops `shape` from the selection without touching the surface. For
	/// shapes that are already gone from the model.
	pub fn forget(&mut self, shape: ShapeId) {
		if self.selected == Some(shape) {
			self.selected = None;
		}
	}
}
