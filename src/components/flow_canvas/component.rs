use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use log::{debug, error, info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{FocusEvent, HtmlCanvasElement, HtmlInputElement, MouseEvent, WheelEvent, Window};

use super::canvas_surface::CanvasSurface;
use super::error::{MountError, MountResult};
use super::session::{CanvasCommands, CanvasSession};
use super::types::{InputEvent, MouseButton, Point, Target, ZoomDirection};

type Session = CanvasSession<CanvasSurface>;

/// Shared access to a mounted canvas. Cloned into the page so the toolbar
/// can zoom and reset; empty until the canvas mounts and after it unmounts.
#[derive(Clone, Default)]
pub struct CanvasHandle {
	session: Rc<RefCell<Option<Session>>>,
}

impl CanvasHandle {
	/// A handle with no canvas behind it yet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs `f` on the live session. Skipped when nothing is mounted or the
	/// session is already borrowed further up the stack (a DOM event fired
	/// from inside another handler).
	fn with<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
		let Ok(mut slot) = self.session.try_borrow_mut() else {
			debug!("canvas session busy, event dropped");
			return None;
		};
		slot.as_mut().map(f)
	}

	fn is_mounted(&self) -> bool {
		self.session.try_borrow().map_or(true, |slot| slot.is_some())
	}

	fn install(&self, session: Session) {
		if let Ok(mut slot) = self.session.try_borrow_mut() {
			*slot = Some(session);
		}
	}

	fn take(&self) -> Option<Session> {
		self.session.try_borrow_mut().ok().and_then(|mut slot| slot.take())
	}

	fn dispatch(&self, event: InputEvent) {
		self.with(|s| s.dispatch(event));
	}

	/// Hit-tests `position` and dispatches the event built for that target.
	fn dispatch_at(&self, position: Point, event: impl FnOnce(Target) -> InputEvent) {
		self.with(|s| {
			let target = s.surface().classify(s.model(), position);
			s.dispatch(event(target));
		});
	}
}

impl CanvasCommands for &CanvasHandle {
	fn on_zoom(&mut self, direction: ZoomDirection) {
		self.with(|s| s.on_zoom(direction));
	}

	fn on_reset(&mut self) {
		self.with(|s| s.on_reset());
	}
}

/// The animation-frame loop and window resize listener of one canvas.
#[derive(Clone, Default)]
struct FrameLoop {
	animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	resize: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
	pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
	fn request(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.animate.borrow() {
			match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				Ok(id) => self.pending.set(Some(id)),
				Err(e) => warn!("requestAnimationFrame failed: {e:?}"),
			}
		}
	}

	fn stop(&self) {
		if let Some(window) = web_sys::window() {
			if let Some(id) = self.pending.take() {
				let _ = window.cancel_animation_frame(id);
			}
			if let Some(ref cb) = *self.resize.borrow() {
				let _ = window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.animate.borrow_mut().take();
		self.resize.borrow_mut().take();
	}
}

#[derive(Clone, Copy, Debug)]
struct CanvasSize {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
}

impl CanvasSize {
	fn resolve(&self, window: &Window, canvas: &HtmlCanvasElement) -> (f64, f64) {
		if self.fullscreen {
			return window_size(window);
		}
		let parent = canvas.parent_element();
		(
			self.width.unwrap_or_else(|| {
				parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)
			}),
			self.height.unwrap_or_else(|| {
				parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)
			}),
		)
	}
}

fn window_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>, fallback: f64| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
	(read(window.inner_width(), 800.0), read(window.inner_height(), 600.0))
}

fn mount(
	canvas: HtmlCanvasElement,
	overlay: HtmlInputElement,
	handle: &CanvasHandle,
	frames: &FrameLoop,
	size: CanvasSize,
) -> MountResult<()> {
	let window = web_sys::window().ok_or(MountError::NoWindow)?;
	let (w, h) = size.resolve(&window, &canvas);
	let surface = CanvasSurface::new(canvas, overlay, w, h)?;
	handle.install(CanvasSession::mount(surface));

	if size.fullscreen {
		let handle_resize = handle.clone();
		*frames.resize.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = window_size(&win);
			handle_resize.with(|s| s.surface_mut().resize(nw, nh));
		}));
		if let Some(ref cb) = *frames.resize.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
	}

	let (handle_anim, frames_anim) = (handle.clone(), frames.clone());
	*frames.animate.borrow_mut() = Some(Closure::new(move || {
		frames_anim.pending.set(None);
		if !handle_anim.is_mounted() {
			return;
		}
		handle_anim.with(|s| s.surface().draw(s.model()));
		frames_anim.request();
	}));
	frames.request();
	info!("flow canvas mounted at {w}x{h}");
	Ok(())
}

/// Logs a failed mount and hands the error to the view.
fn report(failure: RwSignal<Option<MountError>>, result: MountResult<()>) {
	if let Err(e) = result {
		error!("flow canvas failed to mount: {e}");
		failure.set(Some(e));
	}
}

/// Canvas-relative position of a mouse event.
fn pointer(canvas_ref: NodeRef<html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// The diagram canvas with its label overlay.
///
/// A mount failure renders as an error, so an enclosing `ErrorBoundary`
/// shows it in place of the canvas.
#[component]
pub fn FlowCanvas(
	/// Filled with the session once the canvas mounts.
	handle: CanvasHandle,
	/// Track the window size instead of the parent's.
	#[prop(default = false)]
	fullscreen: bool,
	/// Fixed width in pixels; defaults to the parent's.
	#[prop(default = None)]
	width: Option<f64>,
	/// Fixed height in pixels; defaults to the parent's.
	#[prop(default = None)]
	height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<html::Canvas>::new();
	let overlay_ref = NodeRef::<html::Input>::new();
	let frames = FrameLoop::default();
	let failure = RwSignal::new(None::<MountError>);
	let size = CanvasSize {
		fullscreen,
		width,
		height,
	};

	let (handle_init, frames_init) = (handle.clone(), frames.clone());
	Effect::new(move |_| {
		let (Some(canvas), Some(overlay)) = (canvas_ref.get(), overlay_ref.get()) else {
			return;
		};
		if handle_init.is_mounted() {
			return;
		}
		report(failure, mount(canvas, overlay, &handle_init, &frames_init, size));
	});

	let (handle_cleanup, frames_cleanup) = (handle.clone(), frames.clone());
	let cleanup = SendWrapper::new(move || {
		frames_cleanup.stop();
		if let Some(session) = handle_cleanup.take() {
			let model = session.teardown();
			info!("flow canvas unmounted with {} shapes", model.len());
		}
	});
	on_cleanup(move || cleanup.take()());

	let handle_md = handle.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(position) = pointer(canvas_ref, &ev) else {
			return;
		};
		let button = MouseButton::from_dom(ev.button());
		if button == MouseButton::Middle {
			// suppress the browser's autoscroll
			ev.prevent_default();
		}
		handle_md.dispatch_at(position, |target| InputEvent::PointerDown {
			button,
			target,
			position,
		});
	};

	let handle_mm = handle.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(position) = pointer(canvas_ref, &ev) {
			handle_mm.dispatch(InputEvent::PointerMove { position });
		}
	};

	let handle_mu = handle.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some(position) = pointer(canvas_ref, &ev) {
			handle_mu.dispatch(InputEvent::PointerUp {
				button: MouseButton::from_dom(ev.button()),
				position,
			});
		}
	};

	let handle_ml = handle.clone();
	let on_mouseleave = move |_: MouseEvent| {
		handle_ml.dispatch(InputEvent::PointerLeave);
	};

	let handle_wh = handle.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(position) = pointer(canvas_ref, &ev) {
			// DOM deltaY is negative when scrolling up, which zooms in
			handle_wh.dispatch(InputEvent::Wheel {
				delta: -ev.delta_y(),
				position,
			});
		}
	};

	let handle_cm = handle.clone();
	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		if let Some(position) = pointer(canvas_ref, &ev) {
			handle_cm.dispatch_at(position, |target| InputEvent::ContextMenu { target, position });
		}
	};

	let handle_dc = handle.clone();
	let on_dblclick = move |ev: MouseEvent| {
		if let Some(position) = pointer(canvas_ref, &ev) {
			handle_dc.dispatch_at(position, |target| InputEvent::DoubleClick { target });
		}
	};

	let handle_bl = handle;
	let on_blur = move |_: FocusEvent| {
		if let Some(input) = overlay_ref.get() {
			handle_bl.dispatch(InputEvent::OverlayBlur { value: input.value() });
		}
	};

	view! {
		<div class="flow-canvas" style="position: relative; flex: 1; width: 100%; overflow: hidden;">
			{move || failure.get().map_or(Ok(()), Err)}
			<canvas
				node_ref=canvas_ref
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				on:contextmenu=on_contextmenu
				on:dblclick=on_dblclick
				style="display: block; cursor: default;"
			/>
			<input
				node_ref=overlay_ref
				type="text"
				class="flow-canvas-overlay"
				on:blur=on_blur
				style="position: absolute; display: none; box-sizing: border-box; margin: 0; padding: 0 4px; text-align: center; font-family: sans-serif; border: 1px solid #33334F; border-radius: 5px; background: rgba(255, 255, 255, 0.85);"
			/>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn mount_failure_is_kept_for_the_view() {
		let owner = Owner::new();
		owner.set();
		let failure = RwSignal::new(None);

		report(failure, Ok(()));
		assert_eq!(failure.get_untracked(), None);

		report(failure, Err(MountError::NoContext("getContext returned null".into())));
		assert_eq!(
			failure.get_untracked(),
			Some(MountError::NoContext("getContext returned null".into()))
		);
	}

	#[test]
	fn commands_on_an_unmounted_handle_are_skipped() {
		let handle = CanvasHandle::new();
		(&handle).on_zoom(ZoomDirection::In);
		(&handle).on_reset();
		assert!(!handle.is_mounted());
	}

	#[test]
	fn commands_while_the_session_is_borrowed_are_dropped() {
		let handle = CanvasHandle::new();
		let _busy = handle.session.borrow_mut();
		let mut commands = &handle;
		commands.on_zoom(ZoomDirection::Out);
		commands.on_reset();
	}
}
