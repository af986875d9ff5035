//! Drawing targets for the engine.
//!
//! [`Surface`] is the small slice of the 2D canvas API the routines need, and
//! [`Backdrop`] is the image layer composited above the canvas for wallpaper
//! themes. Both are implemented for the `web-sys` types the component mounts.

use web_sys::{CanvasRenderingContext2d, HtmlElement};

use super::particles::Viewport;

/// Radial gradient between two circles, with CSS color stops.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
	pub x0: f64,
	pub y0: f64,
	pub r0: f64,
	pub x1: f64,
	pub y1: f64,
	pub r1: f64,
	pub stops: Vec<(f64, String)>,
}

impl RadialGradient {
	/// Concentric gradient around a single center.
	pub fn centered(x: f64, y: f64, radius: f64) -> Self {
		Self::new(x, y, 0.0, x, y, radius)
	}

	pub fn new(x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64) -> Self {
		Self {
			x0,
			y0,
			r0,
			x1,
			y1,
			r1,
			stops: Vec::new(),
		}
	}

	pub fn stop(mut self, offset: f64, color: impl Into<String>) -> Self {
		self.stops.push((offset, color.into()));
		self
	}
}

/// How a shape is filled.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
	/// Any CSS color string.
	Solid(String),
	Radial(RadialGradient),
}

impl Fill {
	pub fn solid(css: impl Into<String>) -> Self {
		Fill::Solid(css.into())
	}
}

/// A 2D drawing surface in logical (CSS pixel) coordinates.
pub trait Surface {
	/// Sizes the backing store for the viewport and installs the pixel-ratio
	/// scale transform.
	fn resize(&mut self, viewport: &Viewport);
	fn set_global_alpha(&mut self, alpha: f64);
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &Fill);
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &Fill);
}

/// Image layer shown above the canvas for wallpaper themes.
pub trait Backdrop {
	/// Sets the layer's image, or clears it with `None`.
	fn set_image(&mut self, url: Option<&str>);
	/// Sets the blend strength in `[0, 1]`.
	fn set_tint(&mut self, strength: f64);
}

/// `None` means no backdrop layer; wallpaper themes then only show their
/// ambient canvas.
impl<B: Backdrop> Backdrop for Option<B> {
	fn set_image(&mut self, url: Option<&str>) {
		if let Some(backdrop) = self {
			backdrop.set_image(url);
		}
	}

	fn set_tint(&mut self, strength: f64) {
		if let Some(backdrop) = self {
			backdrop.set_tint(strength);
		}
	}
}

impl Backdrop for HtmlElement {
	fn set_image(&mut self, url: Option<&str>) {
		let value = match url {
			Some(url) => format!("url(\"{}\")", url),
			None => "none".to_string(),
		};
		let _ = self.style().set_property("background-image", &value);
	}

	fn set_tint(&mut self, strength: f64) {
		let _ = self
			.style()
			.set_property("--wallpaper-tint", &strength.to_string());
	}
}

fn apply_fill(ctx: &CanvasRenderingContext2d, fill: &Fill) -> bool {
	match fill {
		Fill::Solid(css) => {
			ctx.set_fill_style_str(css);
			true
		}
		Fill::Radial(g) => {
			let Ok(gradient) = ctx.create_radial_gradient(g.x0, g.y0, g.r0, g.x1, g.y1, g.r1)
			else {
				return false;
			};
			for (offset, color) in &g.stops {
				let _ = gradient.add_color_stop(*offset as f32, color);
			}
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			true
		}
	}
}

impl Surface for CanvasRenderingContext2d {
	fn resize(&mut self, viewport: &Viewport) {
		if let Some(canvas) = self.canvas() {
			canvas.set_width((viewport.width * viewport.pixel_ratio) as u32);
			canvas.set_height((viewport.height * viewport.pixel_ratio) as u32);
		}
		let ratio = viewport.pixel_ratio;
		let _ = self.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &Fill) {
		if apply_fill(self, fill) {
			CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
		}
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &Fill) {
		if radius < 0.0 || !apply_fill(self, fill) {
			return;
		}
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, std::f64::consts::TAU);
		self.fill();
	}
}

#[cfg(test)]
pub(crate) mod recording {
	//! In-memory surface and backdrop for driving the engine in tests.

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Call {
		Resize(Viewport),
		Alpha(f64),
		Rect {
			x: f64,
			y: f64,
			w: f64,
			h: f64,
			fill: Fill,
		},
		Circle {
			x: f64,
			y: f64,
			r: f64,
			fill: Fill,
		},
	}

	#[derive(Debug, Default)]
	pub struct RecordingSurface {
		pub calls: Vec<Call>,
	}

	impl RecordingSurface {
		pub fn take(&mut self) -> Vec<Call> {
			std::mem::take(&mut self.calls)
		}
	}

	impl Surface for RecordingSurface {
		fn resize(&mut self, viewport: &Viewport) {
			self.calls.push(Call::Resize(*viewport));
		}

		fn set_global_alpha(&mut self, alpha: f64) {
			self.calls.push(Call::Alpha(alpha));
		}

		fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &Fill) {
			self.calls.push(Call::Rect {
				x,
				y,
				w,
				h,
				fill: fill.clone(),
			});
		}

		fn fill_circle(&mut self, x: f64, y: f64, r: f64, fill: &Fill) {
			self.calls.push(Call::Circle {
				x,
				y,
				r,
				fill: fill.clone(),
			});
		}
	}

	#[derive(Debug, Default)]
	pub struct RecordingBackdrop {
		pub image: Option<String>,
		pub tint: Option<f64>,
	}

	impl Backdrop for RecordingBackdrop {
		fn set_image(&mut self, url: Option<&str>) {
			self.image = url.map(str::to_string);
		}

		fn set_tint(&mut self, strength: f64) {
			self.tint = Some(strength);
		}
	}
}
