use log::debug;

use super::types::{Point, ZoomDirection};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 2.0;
pub const SCALE_STEP: f64 = 0.1;

/// Pan offset and zoom scale of the canvas.
///
/// Screen = model * scale + pan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Uniform zoom factor, within `[MIN_SCALE, MAX_SCALE]`.
	pub scale: f64,
	/// Screen offset of the model origin.
	pub pan: Point,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			scale: 1.0,
			pan: Point::ORIGIN,
		}
	}
}

/// Rounds onto the step grid so repeated steps do not drift.
fn snap(scale: f64) -> f64 {
	let inv = 1.0 / SCALE_STEP;
	(scale * inv).round() / inv
}

impl Viewport {
	/// Steps the scale by one increment, keeping the model point `anchor`
	/// at the same screen position.
	pub fn zoom_by(&mut self, direction: ZoomDirection, anchor: Point) {
		let target = match direction {
			ZoomDirection::In => self.scale + SCALE_STEP,
			ZoomDirection::Out => self.scale - SCALE_STEP,
		};
		let next = snap(target).clamp(MIN_SCALE, MAX_SCALE);
		self.pan = self.pan - anchor.scaled(next - self.scale);
		self.scale = next;
		debug!("zoom {direction:?} at ({}, {}) -> {}", anchor.x, anchor.y, self.scale);
	}

	/// Shifts the view by a screen-space delta.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.pan = self.pan + Point::new(dx, dy);
	}

	/// Back to scale 1 and no pan.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	/// Inverse of [`Viewport::model_to_screen`].
	pub fn screen_to_model(&self, p: Point) -> Point {
		(p - self.pan).scaled(1.0 / self.scale)
	}

	/// Where a model point appears on screen.
	pub fn model_to_screen(&self, p: Point) -> Point {
		p.scaled(self.scale) + self.pan
	}

	/// Converts a screen-space movement into model space.
	pub fn delta_to_model(&self, d: Point) -> Point {
		d.scaled(1.0 / self.scale)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
	}

	#[test]
	fn zoom_in_saturates_at_max() {
		let mut view = Viewport::default();
		for _ in 0..30 {
			view.zoom_by(ZoomDirection::In, Point::ORIGIN);
			assert!(view.scale <= MAX_SCALE);
		}
		assert_eq!(view.scale, 2.0);
	}

	#[test]
	fn zoom_out_saturates_at_min() {
		let mut view = Viewport::default();
		for _ in 0..30 {
			view.zoom_by(ZoomDirection::Out, Point::new(40.0, -3.0));
			assert!(view.scale >= MIN_SCALE);
		}
		assert_eq!(view.scale, 0.1);
	}

	#[test]
	fn in_then_out_at_same_anchor_restores_view() {
		let mut view = Viewport {
			scale: 1.3,
			pan: Point::new(-25.0, 80.0),
		};
		let before = view;
		let anchor = Point::new(317.0, 122.5);
		view.zoom_by(ZoomDirection::In, anchor);
		view.zoom_by(ZoomDirection::Out, anchor);
		assert!((view.scale - before.scale).abs() < EPS);
		assert!(close(view.pan, before.pan));
	}

	#[test]
	fn anchor_stays_under_the_same_screen_point() {
		let mut view = Viewport {
			scale: 0.8,
			pan: Point::new(12.0, 30.0),
		};
		let anchor = Point::new(200.0, 150.0);
		let screen_before = view.model_to_screen(anchor);
		view.zoom_by(ZoomDirection::In, anchor);
		assert!(close(view.model_to_screen(anchor), screen_before));
	}

	#[test]
	fn clamped_zoom_leaves_pan_alone() {
		let mut view = Viewport {
			scale: MAX_SCALE,
			pan: Point::new(5.0, 5.0),
		};
		view.zoom_by(ZoomDirection::In, Point::new(100.0, 100.0));
		assert_eq!(view.scale, MAX_SCALE);
		assert_eq!(view.pan, Point::new(5.0, 5.0));
	}

	#[test]
	fn pan_is_additive() {
		let mut split = Viewport::default();
		split.pan_by(3.5, -2.0);
		split.pan_by(-10.0, 7.25);
		let mut once = Viewport::default();
		once.pan_by(3.5 - 10.0, -2.0 + 7.25);
		assert!(close(split.pan, once.pan));
	}

	#[test]
	fn reset_is_unconditional() {
		let mut view = Viewport::default();
		view.pan_by(300.0, -40.0);
		view.zoom_by(ZoomDirection::Out, Point::new(9.0, 9.0));
		view.zoom_by(ZoomDirection::Out, Point::new(1.0, 2.0));
		view.reset();
		assert_eq!(view, Viewport::default());
		assert_eq!(view.scale, 1.0);
		assert_eq!(view.pan, Point::ORIGIN);
	}

	#[test]
	fn screen_model_round_trip() {
		let view = Viewport {
			scale: 1.5,
			pan: Point::new(-40.0, 10.0),
		};
		let p = Point::new(77.0, 13.0);
		assert!(close(view.screen_to_model(view.model_to_screen(p)), p));
		assert!(close(view.delta_to_model(Point::new(15.0, 3.0)), Point::new(10.0, 2.0)));
	}
}
