//! Particle populations and their edge behavior.

use rand::Rng;

use super::params::Factors;
use super::theme::WrapPolicy;

/// Logical drawing area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	/// Device pixels per CSS pixel.
	pub pixel_ratio: f64,
}

impl Viewport {
	pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
			pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
		}
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
	}
}

/// A drifting point. Space and nebula draw it as a square star, sakura as a
/// falling petal.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub opacity: f64,
	pub vx: f64,
	pub vy: f64,
}

impl Star {
	/// Random star anywhere in the viewport. Velocity spans
	/// `±0.175 * mood` on each axis.
	pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport, mood: f64) -> Self {
		Self {
			x: rng.random::<f64>() * viewport.width,
			y: rng.random::<f64>() * viewport.height,
			size: rng.random::<f64>() * 1.2 + 0.4,
			opacity: rng.random::<f64>() * 0.5 + 0.4,
			vx: (rng.random::<f64>() - 0.5) * mood * 0.35,
			vy: (rng.random::<f64>() - 0.5) * mood * 0.35,
		}
	}
}

/// A wandering firefly. Starts where its star was generated.
#[derive(Clone, Debug, PartialEq)]
pub struct Firefly {
	pub x: f64,
	pub y: f64,
	pub opacity: f64,
}

impl From<&Star> for Firefly {
	fn from(star: &Star) -> Self {
		Self {
			x: star.x,
			y: star.y,
			opacity: star.opacity,
		}
	}
}

/// A dust mote. Never moves; the dust routine jitters it per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Mote {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub alpha: f64,
}

impl Mote {
	pub fn random<R: Rng + ?Sized>(rng: &mut R, viewport: &Viewport) -> Self {
		Self {
			x: rng.random::<f64>() * viewport.width,
			y: rng.random::<f64>() * viewport.height,
			radius: rng.random::<f64>() * 1.4 + 0.4,
			alpha: rng.random::<f64>() * 0.6 + 0.18,
		}
	}
}

/// All particle sets owned by the engine. At most one family is populated at a
/// time.
#[derive(Clone, Debug, Default)]
pub struct Populations {
	pub stars: Vec<Star>,
	pub fireflies: Vec<Firefly>,
	pub motes: Vec<Mote>,
}

impl Populations {
	/// Discards everything and builds `count` stars plus their firefly copies.
	pub fn regenerate_stars<R: Rng + ?Sized>(
		&mut self,
		rng: &mut R,
		viewport: &Viewport,
		factors: &Factors,
		count: usize,
	) {
		self.clear();
		self.stars = (0..count)
			.map(|_| Star::random(rng, viewport, factors.mood))
			.collect();
		self.fireflies = self.stars.iter().map(Firefly::from).collect();
	}

	/// Discards everything and builds `count` dust motes.
	pub fn regenerate_motes<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: &Viewport, count: usize) {
		self.clear();
		self.motes = (0..count).map(|_| Mote::random(rng, viewport)).collect();
	}

	pub fn clear(&mut self) {
		self.stars.clear();
		self.fireflies.clear();
		self.motes.clear();
	}
}

impl WrapPolicy {
	/// Brings a point that left the viewport back inside it.
	pub fn apply<R: Rng + ?Sized>(self, x: &mut f64, y: &mut f64, viewport: &Viewport, rng: &mut R) {
		let (w, h) = (viewport.width, viewport.height);
		match self {
			WrapPolicy::None => {}
			WrapPolicy::Horizontal => {
				if *x > w {
					*x = 0.0;
				}
			}
			WrapPolicy::Both => {
				if *x < 0.0 {
					*x = w;
				} else if *x > w {
					*x = 0.0;
				}
				if *y < 0.0 {
					*y = h;
				} else if *y > h {
					*y = 0.0;
				}
			}
			WrapPolicy::RespawnTop => {
				if *y > h {
					*y = 0.0;
					*x = rng.random::<f64>() * w;
				}
			}
			WrapPolicy::RespawnRandom => {
				if *x < 0.0 || *x > w {
					*x = rng.random::<f64>() * w;
				}
				if *y < 0.0 || *y > h {
					*y = rng.random::<f64>() * h;
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::screensaver::settings::{Configuration, Mood};

	fn alive() -> Factors {
		Factors::new(&Configuration {
			mood: Mood::Alive,
			..Configuration::default()
		})
	}

	#[test]
	fn stars_respect_generation_ranges() {
		let mut rng = StdRng::seed_from_u64(7);
		let viewport = Viewport::new(640.0, 480.0, 2.0);
		let mut pops = Populations::default();
		pops.regenerate_stars(&mut rng, &viewport, &alive(), 500);

		assert_eq!(pops.stars.len(), 500);
		let max_v = 0.175 * 1.55;
		for s in &pops.stars {
			assert!(viewport.contains(s.x, s.y));
			assert!((0.4..=1.6).contains(&s.size));
			assert!((0.4..=0.9).contains(&s.opacity));
			assert!(s.vx.abs() <= max_v && s.vy.abs() <= max_v);
		}
	}

	#[test]
	fn fireflies_copy_star_positions() {
		let mut rng = StdRng::seed_from_u64(3);
		let viewport = Viewport::new(300.0, 200.0, 1.0);
		let mut pops = Populations::default();
		pops.regenerate_stars(&mut rng, &viewport, &alive(), 40);

		assert_eq!(pops.fireflies.len(), pops.stars.len());
		for (f, s) in pops.fireflies.iter().zip(&pops.stars) {
			assert_eq!((f.x, f.y, f.opacity), (s.x, s.y, s.opacity));
		}
	}

	#[test]
	fn motes_replace_stars() {
		let mut rng = StdRng::seed_from_u64(11);
		let viewport = Viewport::new(300.0, 200.0, 1.0);
		let mut pops = Populations::default();
		pops.regenerate_stars(&mut rng, &viewport, &alive(), 40);
		pops.regenerate_motes(&mut rng, &viewport, 25);

		assert!(pops.stars.is_empty());
		assert!(pops.fireflies.is_empty());
		assert_eq!(pops.motes.len(), 25);
		for m in &pops.motes {
			assert!((0.4..=1.8).contains(&m.radius));
			assert!((0.18..=0.78).contains(&m.alpha));
		}
	}

	#[test]
	fn zero_sized_viewport_collapses_to_origin() {
		let mut rng = StdRng::seed_from_u64(1);
		let viewport = Viewport::new(0.0, 0.0, 0.0);
		let mut pops = Populations::default();
		pops.regenerate_motes(&mut rng, &viewport, 10);

		assert_eq!(viewport.pixel_ratio, 1.0);
		assert!(pops.motes.iter().all(|m| m.x == 0.0 && m.y == 0.0));
	}

	#[test]
	fn wrap_policies_land_inside_viewport() {
		let mut rng = StdRng::seed_from_u64(5);
		let viewport = Viewport::new(100.0, 50.0, 1.0);
		let cases = [
			(WrapPolicy::Horizontal, 120.0, 10.0),
			(WrapPolicy::Both, -3.0, 70.0),
			(WrapPolicy::Both, 101.0, -1.0),
			(WrapPolicy::RespawnTop, 40.0, 55.0),
			(WrapPolicy::RespawnRandom, -5.0, 80.0),
		];
		for (policy, mut x, mut y) in cases {
			policy.apply(&mut x, &mut y, &viewport, &mut rng);
			assert!(viewport.contains(x, y), "{policy:?} left ({x}, {y})");
		}
	}

	#[test]
	fn specific_wrap_targets() {
		let mut rng = StdRng::seed_from_u64(5);
		let viewport = Viewport::new(100.0, 50.0, 1.0);

		let (mut x, mut y) = (100.5, 20.0);
		WrapPolicy::Horizontal.apply(&mut x, &mut y, &viewport, &mut rng);
		assert_eq!((x, y), (0.0, 20.0));

		let (mut x, mut y) = (-0.5, 51.0);
		WrapPolicy::Both.apply(&mut x, &mut y, &viewport, &mut rng);
		assert_eq!((x, y), (100.0, 0.0));

		let (mut x, mut y) = (30.0, 50.5);
		WrapPolicy::RespawnTop.apply(&mut x, &mut y, &viewport, &mut rng);
		assert_eq!(y, 0.0);
	}
}
