use log::info;

use super::gesture::ViewState;
use super::model::DiagramModel;
use super::surface::Surface;
use super::types::{InputEvent, ZoomDirection};

/// Zoom and reset controls offered to whatever hosts the canvas.
pub trait CanvasCommands {
	/// Steps the zoom, anchored at the current pan offset.
	fn on_zoom(&mut self, direction: ZoomDirection);

	/// Back to scale 1 with no pan.
	fn on_reset(&mut self);
}

/// Everything one mounted canvas owns: the diagram, the view state and the
/// surface that draws them.
pub struct CanvasSession<S: Surface> {
	model: DiagramModel,
	view: ViewState,
	surface: S,
}

impl<S: Surface> CanvasSession<S> {
	/// Starts a session on the demonstration diagram.
	pub fn mount(surface: S) -> Self {
		Self::with_model(DiagramModel::seeded(), surface)
	}

	/// Starts a session on `model`, pushing the initial transform to the
	/// surface.
	pub fn with_model(model: DiagramModel, surface: S) -> Self {
		let mut session = Self {
			model,
			view: ViewState::default(),
			surface,
		};
		session.sync_transform();
		info!("canvas session mounted with {} shapes", session.model.len());
		session
	}

	/// The diagram as it stands.
	pub fn model(&self) -> &DiagramModel {
		&self.model
	}

	/// Viewport, selection and gesture.
	pub fn view(&self) -> &ViewState {
		&self.view
	}

	/// The surface this session draws on.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// Mutable access to the surface, for host-side changes such as a resize.
	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	/// Routes one input event, then mirrors any viewport change onto the
	/// surface.
	pub fn dispatch(&mut self, event: InputEvent) {
		let before = self.view.viewport;
		self.view.dispatch(&mut self.model, &mut self.surface, event);
		if self.view.viewport != before {
			self.sync_transform();
		}
	}

	fn sync_transform(&mut self) {
		let viewport = self.view.viewport;
		self.surface.set_transform(viewport.scale, viewport.pan);
	}

	/// Commits any open edit, drops the gesture and tools, and hands back
	/// the final diagram.
	pub fn teardown(mut self) -> DiagramModel {
		self.view.release(&mut self.model, &mut self.surface);
		info!("canvas session torn down");
		self.model
	}
}

impl<S: Surface> CanvasCommands for CanvasSession<S> {
	fn on_zoom(&mut self, direction: ZoomDirection) {
		let viewport = &mut self.view.viewport;
		let anchor = viewport.pan;
		viewport.zoom_by(direction, anchor);
		self.sync_transform();
	}

	fn on_reset(&mut self) {
		self.view.viewport.reset();
		self.sync_transform();
		info!("view reset");
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::super::surface::recording::{Call, RecordingSurface};
	use super::super::types::Point;
	use super::*;

	#[test]
	fn mount_pushes_identity_transform() {
		let session = CanvasSession::mount(RecordingSurface::default());
		assert_eq!(session.surface().calls, vec![Call::Transform(1.0, Point::ORIGIN)]);
		assert_eq!(session.model().len(), 3);
	}

	#[test]
	fn button_zoom_anchors_at_pan() {
		let mut session = CanvasSession::mount(RecordingSurface::default());
		session.view.viewport.pan_by(100.0, 40.0);
		session.on_zoom(ZoomDirection::In);
		let viewport = session.view().viewport;
		assert!((viewport.scale - 1.1).abs() < 1e-9);
		// pan' = pan - pan * (1.1 - 1.0)
		assert!((viewport.pan.x - 90.0).abs() < 1e-9);
		assert!((viewport.pan.y - 36.0).abs() < 1e-9);
	}

	#[test]
	fn button_zoom_at_origin_keeps_pan_zero() {
		let mut session = CanvasSession::mount(RecordingSurface::default());
		session.on_zoom(ZoomDirection::Out);
		assert_eq!(session.view().viewport.pan, Point::ORIGIN);
		assert!((session.view().viewport.scale - 0.9).abs() < 1e-9);
	}

	#[test]
	fn dispatch_only_syncs_when_viewport_changes() {
		let mut session = CanvasSession::mount(RecordingSurface::default());
		session.surface_mut().take_calls();
		session.dispatch(InputEvent::PointerMove {
			position: Point::new(3.0, 3.0),
		});
		assert!(session.surface().calls.is_empty());
		session.dispatch(InputEvent::Wheel {
			delta: -1.0,
			position: Point::ORIGIN,
		});
		assert_eq!(session.surface().calls.len(), 1);
	}
}
