//! The eight generative drawing routines.
//!
//! Each routine paints one complete frame: a background pass (a translucent
//! fade for trailing themes, an opaque fill otherwise), optional gradient
//! layers, then its particles. Animation phase comes from the frame timestamp
//! in milliseconds rather than accumulated deltas, so a frame is fully
//! determined by its inputs.

use rand::Rng;

use super::params::Factors;
use super::particles::{Firefly, Mote, Star, Viewport};
use super::surface::{Fill, RadialGradient, Surface};
use super::theme::{Color, Hsla, WrapPolicy};

/// Translucent black laid over every frame when extra darkening is on.
pub const DARKEN_OVERLAY: Color = Color::rgba(0, 0, 0, 0.26);

/// Inputs shared by every routine for one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
	pub viewport: Viewport,
	pub factors: Factors,
	/// Frame timestamp in milliseconds.
	pub time_ms: f64,
	pub wrap: WrapPolicy,
}

impl Frame {
	fn cover<S: Surface + ?Sized>(&self, surface: &mut S, fill: &Fill) {
		surface.fill_rect(0.0, 0.0, self.viewport.width, self.viewport.height, fill);
	}

	fn longest_side(&self) -> f64 {
		self.viewport.width.max(self.viewport.height)
	}
}

pub fn draw_space<S: Surface + ?Sized, R: Rng + ?Sized>(
	surface: &mut S,
	frame: &Frame,
	stars: &mut [Star],
	rng: &mut R,
) {
	let f = frame.factors.speed();
	frame.cover(surface, &Fill::solid(Color::rgba(0, 0, 0, 0.32).to_css()));

	for s in stars.iter_mut() {
		s.x += (0.35 + s.size * 0.65) * f;
		frame.wrap.apply(&mut s.x, &mut s.y, &frame.viewport, rng);
		let side = s.size * 1.8;
		surface.fill_rect(
			s.x,
			s.y,
			side,
			side,
			&Fill::solid(Color::rgba(255, 255, 255, s.opacity).to_css_rgba()),
		);
	}
}

pub fn draw_nebula<S: Surface + ?Sized, R: Rng + ?Sized>(
	surface: &mut S,
	frame: &Frame,
	stars: &mut [Star],
	rng: &mut R,
) {
	let t = frame.time_ms * 0.00035 * frame.factors.motion;
	let (w, h) = (frame.viewport.width, frame.viewport.height);
	frame.cover(surface, &Fill::solid(Color::rgb(2, 0, 11).to_css()));

	// Cloud blobs drifting between teal and magenta
	for i in 0..4 {
		let fi = i as f64;
		let cx = w * (0.2 + 0.2 * fi) + (t + fi).sin() * 60.0;
		let cy = h * (0.3 + 0.1 * fi) + (t * 0.8 + fi).cos() * 50.0;
		let radius = frame.longest_side() * (0.35 + fi * 0.08);
		let hue = 190.0 + (t + fi).sin() * 60.0;

		let gradient = RadialGradient::centered(cx, cy, radius)
			.stop(0.0, Hsla::new(hue, 80.0, 65.0, 0.36).to_css())
			.stop(0.6, Hsla::new((hue + 60.0) % 360.0, 70.0, 50.0, 0.16).to_css())
			.stop(1.0, Color::rgba(0, 0, 0, 0.95).to_css());
		surface.fill_circle(cx, cy, radius, &Fill::Radial(gradient));
	}

	// Velocity drift ignores motion so the stars stay calm over fast clouds
	let f = frame.factors.mood;
	for s in stars.iter_mut() {
		s.x += s.vx * f;
		s.y += s.vy * f;
		frame.wrap.apply(&mut s.x, &mut s.y, &frame.viewport, rng);
		let side = s.size * 1.4;
		surface.fill_rect(
			s.x,
			s.y,
			side,
			side,
			&Fill::solid(Color::rgba(255, 255, 255, s.opacity).to_css_rgba()),
		);
	}
}

/// Ambient void. Also runs beneath wallpaper themes.
pub fn draw_void<S: Surface + ?Sized>(surface: &mut S, frame: &Frame) {
	let t = frame.time_ms * 0.00018 * frame.factors.motion;
	let (cx, cy) = (frame.viewport.width / 2.0, frame.viewport.height / 2.0);
	frame.cover(surface, &Fill::solid(Color::rgb(0, 0, 7).to_css()));

	for i in 0..3 {
		let fi = i as f64;
		let r = frame.longest_side() * 0.9 + fi * 70.0;
		let angle = t + fi * 1.3;
		let (gx, gy) = (cx + angle.cos() * 40.0, cy + angle.sin() * 32.0);

		let gradient = RadialGradient::new(gx, gy, 0.0, cx, cy, r)
			.stop(0.0, Color::rgba(10, 10, 30, 0.86).to_css())
			.stop(1.0, Color::rgb(0, 0, 0).to_css_rgba());
		frame.cover(surface, &Fill::Radial(gradient));
	}
}

pub fn draw_dust<S: Surface + ?Sized, R: Rng + ?Sized>(
	surface: &mut S,
	frame: &Frame,
	motes: &[Mote],
	rng: &mut R,
) {
	frame.cover(surface, &Fill::solid(Color::rgba(0, 0, 0, 0.4).to_css()));
	let jitter = 0.3 * frame.factors.motion;
	let fill = Fill::solid(Color::rgba(255, 255, 255, 0.96).to_css());

	for p in motes {
		let jx = (rng.random::<f64>() - 0.5) * jitter;
		let jy = (rng.random::<f64>() - 0.5) * jitter;
		surface.set_global_alpha(p.alpha);
		surface.fill_circle(p.x + jx, p.y + jy, p.radius, &fill);
	}
	surface.set_global_alpha(1.0);
}

pub fn draw_aurora<S: Surface + ?Sized>(surface: &mut S, frame: &Frame) {
	let t = frame.time_ms * 0.0004 * frame.factors.speed();
	let (w, h) = (frame.viewport.width, frame.viewport.height);
	frame.cover(surface, &Fill::solid(Color::rgb(2, 2, 15).to_css()));

	for i in 0..4 {
		let fi = i as f64;
		let x = w / 2.0 + (t + fi).sin() * 260.0;
		let y = h / 2.0 + (t * 0.7 + fi).cos() * 190.0;
		let hue = 150.0 + (t + fi * 0.4).sin() * 65.0;
		surface.fill_circle(
			x,
			y,
			h * 0.95,
			&Fill::solid(Hsla::new(hue, 78.0, 58.0, 0.19).to_css()),
		);
	}
}

pub fn draw_ocean<S: Surface + ?Sized>(surface: &mut S, frame: &Frame) {
	let t = frame.time_ms * 0.00075 * frame.factors.speed();
	let (w, h) = (frame.viewport.width, frame.viewport.height);
	frame.cover(surface, &Fill::solid(Color::rgb(0, 5, 13).to_css()));

	let swell = Fill::solid(Hsla::new(200.0, 80.0, 60.0, 0.19).to_css());
	for i in 0..6 {
		let fi = i as f64;
		surface.fill_circle(
			w / 2.0 + (t + fi).sin() * 160.0,
			h * 0.7 + (t * 0.8 + fi * 1.3).sin() * 70.0,
			h * 0.55 + fi * 32.0,
			&swell,
		);
	}
}

pub fn draw_fireflies<S: Surface + ?Sized, R: Rng + ?Sized>(
	surface: &mut S,
	frame: &Frame,
	fireflies: &mut [Firefly],
	rng: &mut R,
) {
	let t = frame.time_ms * 0.001 * frame.factors.speed();
	frame.cover(surface, &Fill::solid(Color::rgba(0, 0, 10, 0.3).to_css()));

	for fly in fireflies.iter_mut() {
		fly.x += (t + fly.x * 0.01).sin() * 0.5;
		fly.y += (t * 0.8 + fly.y * 0.01).cos() * 0.4;
		frame.wrap.apply(&mut fly.x, &mut fly.y, &frame.viewport, rng);
		let brightness = ((t * 4.0 + fly.x * 0.02).sin() * 0.5 + 0.8).min(1.0);
		surface.fill_circle(
			fly.x,
			fly.y,
			3.0,
			&Fill::solid(Color::rgba(255, 250, 190, brightness).to_css_rgba()),
		);
	}
}

pub fn draw_sakura<S: Surface + ?Sized, R: Rng + ?Sized>(
	surface: &mut S,
	frame: &Frame,
	petals: &mut [Star],
	rng: &mut R,
) {
	let f = frame.factors.speed();
	frame.cover(surface, &Fill::solid(Color::rgb(5, 0, 17).to_css()));

	for p in petals.iter_mut() {
		p.y += p.size * 0.55 * f;
		frame.wrap.apply(&mut p.x, &mut p.y, &frame.viewport, rng);
		surface.fill_circle(
			p.x,
			p.y,
			3.3,
			&Fill::solid(Color::rgba(255, 182, 193, p.opacity).to_css_rgba()),
		);
	}
}

/// Extra darkening pass applied after the theme routine.
pub fn draw_darken<S: Surface + ?Sized>(surface: &mut S, frame: &Frame) {
	frame.cover(surface, &Fill::solid(DARKEN_OVERLAY.to_css()));
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::screensaver::settings::{Configuration, Level};
	use crate::components::screensaver::surface::recording::{Call, RecordingSurface};

	fn frame(wrap: WrapPolicy, time_ms: f64) -> Frame {
		Frame {
			viewport: Viewport::new(200.0, 100.0, 1.0),
			factors: Factors::new(&Configuration::default()),
			time_ms,
			wrap,
		}
	}

	fn star(x: f64, y: f64) -> Star {
		Star {
			x,
			y,
			size: 1.0,
			opacity: 0.5,
			vx: 0.1,
			vy: -0.1,
		}
	}

	#[test]
	fn space_drifts_right_and_wraps() {
		let mut surface = RecordingSurface::default();
		let mut rng = StdRng::seed_from_u64(0);
		let frame = frame(WrapPolicy::Horizontal, 0.0);
		let mut stars = vec![star(10.0, 40.0), star(199.9, 20.0)];

		draw_space(&mut surface, &frame, &mut stars, &mut rng);

		// calm mood at medium motion: (0.35 + 0.65) * 0.55
		assert!((stars[0].x - 10.55).abs() < 1e-9);
		assert_eq!(stars[1].x, 0.0);
		assert_eq!(stars[0].y, 40.0);
		assert_eq!(surface.calls.len(), 3);
		assert_eq!(
			surface.calls[0],
			Call::Rect {
				x: 0.0,
				y: 0.0,
				w: 200.0,
				h: 100.0,
				fill: Fill::solid("rgba(0, 0, 0, 0.32)"),
			}
		);
	}

	#[test]
	fn nebula_paints_four_clouds_then_stars() {
		let mut surface = RecordingSurface::default();
		let mut rng = StdRng::seed_from_u64(0);
		let frame = frame(WrapPolicy::Both, 1234.0);
		let mut stars = vec![star(0.01, 0.01)];
		stars[0].vx = -0.5;
		stars[0].vy = -0.5;

		draw_nebula(&mut surface, &frame, &mut stars, &mut rng);

		let clouds = surface
			.calls
			.iter()
			.filter(|c| matches!(c, Call::Circle { fill: Fill::Radial(_), .. }))
			.count();
		assert_eq!(clouds, 4);
		assert_eq!((stars[0].x, stars[0].y), (200.0, 100.0));
		assert!(matches!(surface.calls.last(), Some(Call::Rect { .. })));
	}

	#[test]
	fn void_orbits_with_time() {
		let mut surface = RecordingSurface::default();
		draw_void(&mut surface, &frame(WrapPolicy::None, 0.0));
		let first = surface.take();
		draw_void(&mut surface, &frame(WrapPolicy::None, 5000.0));
		let later = surface.take();

		assert_eq!(first.len(), 4);
		assert_eq!(later.len(), 4);
		assert_ne!(first[1], later[1]);
		let Call::Rect { fill: Fill::Radial(g), .. } = &first[1] else {
			panic!("expected gradient fill, got {:?}", first[1]);
		};
		assert_eq!((g.x0, g.y0), (140.0, 50.0));
		assert_eq!((g.x1, g.y1, g.r1), (100.0, 50.0, 180.0));
	}

	#[test]
	fn dust_jitter_does_not_move_motes() {
		let mut surface = RecordingSurface::default();
		let mut rng = StdRng::seed_from_u64(9);
		let motes = vec![Mote {
			x: 50.0,
			y: 50.0,
			radius: 1.0,
			alpha: 0.3,
		}];

		draw_dust(&mut surface, &frame(WrapPolicy::None, 0.0), &motes, &mut rng);

		assert_eq!(motes[0].x, 50.0);
		assert_eq!(surface.calls[1], Call::Alpha(0.3));
		let Call::Circle { x, y, .. } = surface.calls[2] else {
			panic!("expected mote circle");
		};
		assert!((x - 50.0).abs() <= 0.15 && (y - 50.0).abs() <= 0.15);
		assert_eq!(surface.calls.last(), Some(&Call::Alpha(1.0)));
	}

	#[test]
	fn aurora_and_ocean_layer_counts() {
		let mut surface = RecordingSurface::default();
		draw_aurora(&mut surface, &frame(WrapPolicy::None, 42.0));
		assert_eq!(surface.take().len(), 5);
		draw_ocean(&mut surface, &frame(WrapPolicy::None, 42.0));
		let calls = surface.take();
		assert_eq!(calls.len(), 7);
		let Call::Circle { r, .. } = calls[6] else {
			panic!("expected swell circle");
		};
		assert_eq!(r, 100.0 * 0.55 + 5.0 * 32.0);
	}

	#[test]
	fn fireflies_respawn_inside() {
		let mut surface = RecordingSurface::default();
		let mut rng = StdRng::seed_from_u64(4);
		let mut flies = vec![Firefly {
			x: -50.0,
			y: 500.0,
			opacity: 0.6,
		}];

		draw_fireflies(&mut surface, &frame(WrapPolicy::RespawnRandom, 0.0), &mut flies, &mut rng);

		let viewport = Viewport::new(200.0, 100.0, 1.0);
		assert!(viewport.contains(flies[0].x, flies[0].y));
	}

	#[test]
	fn sakura_petals_fall_faster_when_lively() {
		let mut rng = StdRng::seed_from_u64(4);
		let mut surface = RecordingSurface::default();
		let mut calm = vec![star(10.0, 10.0)];
		let mut fast = vec![star(10.0, 10.0)];
		let lively = Frame {
			factors: Factors::new(&Configuration {
				motion: Level::High,
				..Configuration::default()
			}),
			..frame(WrapPolicy::RespawnTop, 0.0)
		};

		draw_sakura(&mut surface, &frame(WrapPolicy::RespawnTop, 0.0), &mut calm, &mut rng);
		draw_sakura(&mut surface, &lively, &mut fast, &mut rng);

		assert!(fast[0].y > calm[0].y);
		assert_eq!(calm[0].x, 10.0);

		let mut falling = vec![star(10.0, 99.9)];
		draw_sakura(&mut surface, &lively, &mut falling, &mut rng);
		assert_eq!(falling[0].y, 0.0);
	}
}
