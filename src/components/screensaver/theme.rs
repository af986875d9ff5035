//! Visual theming for the screensaver.
//!
//! Holds the color helpers used by the drawing routines and the theme
//! capability table: which routine draws a theme, which particle population it
//! owns, and how its particles wrap at the viewport edges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Always emits functional notation, even for opaque colors.
	pub fn to_css_rgba(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// HSLA color, used by the routines whose hue drifts over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	/// Hue in degrees.
	pub h: f64,
	/// Saturation percentage (0..100).
	pub s: f64,
	/// Lightness percentage (0..100).
	pub l: f64,
	pub a: f64,
}

impl Hsla {
	pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
		Self { h, s, l, a }
	}

	pub fn to_css(self) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
	}
}

/// Identifier of a selectable theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "&'static str")]
pub enum ThemeId {
	#[default]
	Space,
	Nebula,
	Void,
	Dust,
	Aurora,
	Ocean,
	Fireflies,
	Sakura,
	Forest,
}

impl ThemeId {
	/// Every theme, in the order the theme shortcut cycles through them.
	pub const ALL: [ThemeId; 9] = [
		ThemeId::Space,
		ThemeId::Nebula,
		ThemeId::Void,
		ThemeId::Dust,
		ThemeId::Aurora,
		ThemeId::Ocean,
		ThemeId::Fireflies,
		ThemeId::Sakura,
		ThemeId::Forest,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			ThemeId::Space => "space",
			ThemeId::Nebula => "nebula",
			ThemeId::Void => "void",
			ThemeId::Dust => "dust",
			ThemeId::Aurora => "aurora",
			ThemeId::Ocean => "ocean",
			ThemeId::Fireflies => "fireflies",
			ThemeId::Sakura => "sakura",
			ThemeId::Forest => "forest",
		}
	}

	/// Parses a theme key, returning `None` for anything unrecognized.
	pub fn parse(key: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|id| id.as_str() == key)
	}

	/// The theme after this one in [`ThemeId::ALL`], wrapping at the end.
	pub fn next(self) -> Self {
		let idx = Self::ALL.iter().position(|&id| id == self).unwrap_or(0);
		Self::ALL[(idx + 1) % Self::ALL.len()]
	}
}

impl fmt::Display for ThemeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<ThemeId> for &'static str {
	fn from(id: ThemeId) -> Self {
		id.as_str()
	}
}

impl From<serde_json::Value> for ThemeId {
	fn from(value: serde_json::Value) -> Self {
		value
			.as_str()
			.and_then(ThemeId::parse)
			.unwrap_or_default()
	}
}

/// One of the eight generative drawing routines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routine {
	Space,
	Nebula,
	Void,
	Dust,
	Aurora,
	Ocean,
	Fireflies,
	Sakura,
}

/// Particle population owned by a theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Population {
	/// Star-shaped particles (also reused as fireflies and petals).
	Stars { base_count: usize },
	/// Dust motes.
	Dust { base_count: usize },
}

/// What a particle does when it leaves the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapPolicy {
	/// Particles never move persistently.
	None,
	/// Past the right edge, reappear at the left edge.
	Horizontal,
	/// Wrap to the opposite edge on both axes.
	Both,
	/// Past the bottom edge, reappear at the top with a random x.
	RespawnTop,
	/// Outside on either axis, jump to a random coordinate on that axis.
	RespawnRandom,
}

/// How a theme paints the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderStyle {
	/// Full generative rendering.
	Procedural(Routine),
	/// A static image composited above the canvas. The canvas only keeps an
	/// ambient void backdrop running underneath.
	Wallpaper { image: &'static str },
}

/// Capabilities of a single theme.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeSpec {
	pub id: ThemeId,
	/// Human-readable name shown in the page title.
	pub name: &'static str,
	pub style: RenderStyle,
	pub population: Option<Population>,
	pub wrap: WrapPolicy,
}

impl ThemeSpec {
	/// Image composited above the canvas, for wallpaper themes.
	pub fn wallpaper_image(&self) -> Option<&'static str> {
		match self.style {
			RenderStyle::Wallpaper { image } => Some(image),
			RenderStyle::Procedural(_) => None,
		}
	}
}

pub const AURORA_WALLPAPER: &str = "https://images.pexels.com/photos/1933320/pexels-photo-1933320.jpeg?auto=compress&cs=tinysrgb&w=1600";
pub const NEBULA_WALLPAPER: &str =
	"https://images.pexels.com/photos/2150/sky-space-dark-galaxy.jpg?auto=compress&cs=tinysrgb&w=1600";
pub const FOREST_WALLPAPER: &str = "https://images.pexels.com/photos/240040/pexels-photo-240040.jpeg?auto=compress&cs=tinysrgb&w=1600";

/// Lookup table from theme id to its capabilities.
///
/// The mapping is data rather than branches in the engine, so a host can pick
/// which themes are procedural and which are wallpapers.
#[derive(Clone, Debug)]
pub struct ThemeTable {
	entries: Vec<ThemeSpec>,
}

impl ThemeTable {
	/// Creates a table from explicit entries. Later entries for the same id are
	/// ignored by [`ThemeTable::get`].
	pub fn new(entries: Vec<ThemeSpec>) -> Self {
		Self { entries }
	}

	/// All eight generative themes plus the forest wallpaper (default).
	pub fn procedural() -> Self {
		Self::new(vec![
			stars(ThemeId::Space, "Space Drift", Routine::Space, 220, WrapPolicy::Horizontal),
			stars(ThemeId::Nebula, "Nebula Drift", Routine::Nebula, 200, WrapPolicy::Both),
			bare(ThemeId::Void, "Deep Void", Routine::Void),
			ThemeSpec {
				id: ThemeId::Dust,
				name: "Cosmic Dust",
				style: RenderStyle::Procedural(Routine::Dust),
				population: Some(Population::Dust { base_count: 260 }),
				wrap: WrapPolicy::None,
			},
			bare(ThemeId::Aurora, "Aurora", Routine::Aurora),
			bare(ThemeId::Ocean, "Night Ocean", Routine::Ocean),
			stars(
				ThemeId::Fireflies,
				"Fireflies",
				Routine::Fireflies,
				160,
				WrapPolicy::RespawnRandom,
			),
			stars(ThemeId::Sakura, "Sakura", Routine::Sakura, 140, WrapPolicy::RespawnTop),
			wallpaper(ThemeId::Forest, "Zen Forest", FOREST_WALLPAPER),
		])
	}

	/// Variant that shows aurora and nebula as photographic wallpapers.
	pub fn wallpapers() -> Self {
		let mut table = Self::procedural();
		for spec in &mut table.entries {
			match spec.id {
				ThemeId::Aurora => *spec = wallpaper(ThemeId::Aurora, "Aurora Borealis", AURORA_WALLPAPER),
				ThemeId::Nebula => *spec = wallpaper(ThemeId::Nebula, "Crimson Nebula", NEBULA_WALLPAPER),
				_ => {}
			}
		}
		table
	}

	pub fn get(&self, id: ThemeId) -> Option<&ThemeSpec> {
		self.entries.iter().find(|spec| spec.id == id)
	}
}

impl Default for ThemeTable {
	fn default() -> Self {
		Self::procedural()
	}
}

fn stars(
	id: ThemeId,
	name: &'static str,
	routine: Routine,
	base_count: usize,
	wrap: WrapPolicy,
) -> ThemeSpec {
	ThemeSpec {
		id,
		name,
		style: RenderStyle::Procedural(routine),
		population: Some(Population::Stars { base_count }),
		wrap,
	}
}

fn bare(id: ThemeId, name: &'static str, routine: Routine) -> ThemeSpec {
	ThemeSpec {
		id,
		name,
		style: RenderStyle::Procedural(routine),
		population: None,
		wrap: WrapPolicy::None,
	}
}

fn wallpaper(id: ThemeId, name: &'static str, image: &'static str) -> ThemeSpec {
	ThemeSpec {
		id,
		name,
		style: RenderStyle::Wallpaper { image },
		population: None,
		wrap: WrapPolicy::None,
	}
}
