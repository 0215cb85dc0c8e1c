//! In-place label editing for nodes.
//!
//! A node is either in `Display` (label drawn) or `Editing` (label hidden,
//! overlay showing and focused). Only blur commits. At most one node edits
//! at a time: starting a second edit commits the first with whatever its
//! overlay holds.

use log::debug;

use super::model::DiagramModel;
use super::shapes::EditMode;
use super::surface::Surface;
use super::types::ShapeId;

/// `Display -> Editing`. Edges and unknown ids are ignored.
pub fn begin(model: &mut DiagramModel, surface: &mut impl Surface, id: ShapeId) {
	if model.node(id).is_none_or(|node| node.is_editing()) {
		return;
	}
	if let Some(open) = model.editing_node() {
		commit_node(model, surface, open);
	}
	let Some(node) = model.node_mut(id) else {
		return;
	};
	node.mode = EditMode::Editing;
	surface.show_overlay(id, &node.label);
	debug!("editing {id}");
}

/// `Editing -> Display`, storing `value` as the label verbatim.
pub fn commit(model: &mut DiagramModel, surface: &mut impl Surface, id: ShapeId, value: String) {
	let Some(node) = model.node_mut(id).filter(|node| node.is_editing()) else {
		debug!("blur on {id} ignored: not editing");
		return;
	};
	node.label = value;
	node.mode = EditMode::Display;
	surface.hide_overlay(id);
	debug!("committed label of {id}");
}

/// Commits `id` with the overlay's current text, or its existing label when
/// the overlay is already gone.
fn commit_node(model: &mut DiagramModel, surface: &mut impl Surface, id: ShapeId) {
	let value = surface
		.overlay_value(id)
		.or_else(|| model.node(id).map(|node| node.label.clone()))
		.unwrap_or_default();
	commit(model, surface, id, value);
}

/// Force-commits whichever node is editing. Returns the node that was
/// committed.
pub fn commit_open(model: &mut DiagramModel, surface: &mut impl Surface) -> Option<ShapeId> {
	let open = model.editing_node()?;
	commit_node(model, surface, open);
	Some(open)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::super::shapes::{NodeOverrides, create_edge, create_node};
	use super::super::surface::recording::{Call, RecordingSurface};
	use super::super::types::Point;
	use super::*;

	fn labeled(model: &mut DiagramModel, label: &str) -> ShapeId {
		model.add_node(create_node(
			Point::ORIGIN,
			NodeOverrides {
				label: Some(label.into()),
				..Default::default()
			},
		))
	}

	#[test]
	fn begin_seeds_overlay_with_exact_label_and_focuses() {
		let mut model = DiagramModel::new();
		let mut surface = RecordingSurface::default();
		let id = labeled(&mut model, "  Step 1 ");
		begin(&mut model, &mut surface, id);
		assert_eq!(model.node(id).unwrap().mode, EditMode::Editing);
		assert_eq!(surface.calls, vec![Call::Show(id, "  Step 1 ".into())]);
		assert_eq!(surface.focused, Some(id));
	}

	#[test]
	fn blur_commits_value() {
		let mut model = DiagramModel::new();
		let mut surface = RecordingSurface::default();
		let id = labeled(&mut model, "Step 1");
		begin(&mut model, &mut surface, id);
		commit(&mut model, &mut surface, id, "Step 2".into());
		let node = model.node(id).unwrap();
		assert_eq!(node.label, "Step 2");
		assert_eq!(node.mode, EditMode::Display);
		assert_eq!(surface.overlay, None);
	}

	#[test]
	fn empty_label_is_accepted() {
		let mut model = DiagramModel::new();
		let mut surface = RecordingSurface::default();
		let id = labeled(&mut model, "Step 1");
		begin(&mut model, &mut surface, id);
		commit(&mut model, &mut surface, id, String::new());
		assert_eq!(model.node(id).unwrap().label, "");
	}

	#[test]
	fn blur_without_edit_is_ignored() {
		let mut model = DiagramModel::new();
		let mut surface = RecordingSurface::default();
		let id = labeled(&mut model, "keep");
		commit(&mut model, &mut surface, id, "lost".into());
		commit(&mut model, &mut surface, ShapeId(77), "lost".into());
		assert_eq!(model.node(id).unwrap().label, "keep");
		assert!(surface.calls.is_empty());
	}

	#[test]
	fn edges_cannot_be_edited() {
		let mut model = DiagramModel::new();
		let mut surface = RecordingSurface::default();
		let a = labeled(&mut model, "a");
		let link = model.add_edge(create_edge("l", a, a)).unwrap();
		begin(&mut model, &mut surface, link);
		assert!(surface.calls.is_empty());
		assert_eq!(model.editing_node(), None);
	}

	#[test]
	fn second_edit_commits_the_first() {
		let mut model = DiagramModel::new();
		let mut surface = RecordingSurface::default();
		let a = labeled(&mut model, "a");
		let b = labeled(&mut model, "b");
		begin(&mut model, &mut surface, a);
		surface.type_text("a, edited");
		begin(&mut model, &mut surface, b);

		assert_eq!(model.node(a).unwrap().label, "a, edited");
		assert_eq!(model.node(a).unwrap().mode, EditMode::Display);
		assert_eq!(model.editing_node(), Some(b));
		assert_eq!(
			surface.calls,
			vec![Call::Show(a, "a".into()), Call::Hide(a), Call::Show(b, "b".into())]
		);
	}

	#[test]
	fn double_begin_does_not_reseed() {
		let mut model = DiagramModel::new();
		let mut surface = RecordingSurface::default();
		let a = labeled(&mut model, "a");
		begin(&mut model, &mut surface, a);
		surface.type_text("typing");
		begin(&mut model, &mut surface, a);
		assert_eq!(surface.overlay_value(a), Some("typing".into()));
	}

	#[test]
	fn commit_open_uses_overlay_text() {
		let mut model = DiagramModel::new();
		let mut surface = RecordingSurface::default();
		let a = labeled(&mut model, "a");
		assert_eq!(commit_open(&mut model, &mut surface), None);
		begin(&mut model, &mut surface, a);
		surface.type_text("pending");
		assert_eq!(commit_open(&mut model, &mut surface), Some(a));
		assert_eq!(model.node(a).unwrap().label, "pending");
	}
}
