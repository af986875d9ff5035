//! Mood, motion and density multipliers.
//!
//! Every drawing routine scales its speed, population size or amplitude by
//! these factors. They always combine multiplicatively. Settings that did not
//! parse have already collapsed to the neutral variant, so every lookup here is
//! total.

use super::settings::{Configuration, Level, Mood};

/// Speed/opacity multiplier for a mood.
pub fn mood_factor(mood: Mood) -> f64 {
	match mood {
		Mood::Calm => 0.55,
		Mood::Flow => 1.0,
		Mood::Alive => 1.55,
	}
}

/// Animation speed multiplier, independent of mood.
pub fn motion_factor(motion: Level) -> f64 {
	match motion {
		Level::Low => 0.6,
		Level::Medium => 1.0,
		Level::High => 1.4,
	}
}

/// Particle population multiplier.
pub fn density_factor(density: Level) -> f64 {
	match density {
		Level::Low => 0.7,
		Level::Medium => 1.0,
		Level::High => 1.35,
	}
}

/// Wallpaper blend strength in `[0, 1]`, clamping out-of-range tint.
pub fn tint_strength(tint: i32) -> f64 {
	tint.clamp(0, 100) as f64 / 100.0
}

/// Factors for one configuration snapshot.
///
/// Compute this once per frame (or per regeneration) and hand it to the
/// drawing routines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Factors {
	pub mood: f64,
	pub motion: f64,
	pub density: f64,
}

impl Factors {
	pub fn new(config: &Configuration) -> Self {
		Self {
			mood: mood_factor(config.mood),
			motion: motion_factor(config.motion),
			density: density_factor(config.density),
		}
	}

	/// Combined mood and motion multiplier.
	pub fn speed(&self) -> f64 {
		self.mood * self.motion
	}

	/// Population size for a star-family theme.
	pub fn star_count(&self, base_count: usize) -> usize {
		(base_count as f64 * (0.6 + self.mood * 0.4) * self.density).floor() as usize
	}

	/// Population size for the dust theme.
	pub fn dust_count(&self, base_count: usize) -> usize {
		(base_count as f64 * (0.7 + self.mood * 0.45) * self.density).floor() as usize
	}
}
