//! User settings: the configuration snapshot read by the engine, profile
//! presets, and `localStorage` persistence.
//!
//! Parsing is deliberately forgiving. A stored value the current build does not
//! recognize becomes the neutral variant instead of discarding the whole
//! configuration.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::theme::ThemeId;

/// `localStorage` key holding the serialized [`Configuration`].
pub const STORAGE_KEY: &str = "ambient-saver.settings";

/// Animation intensity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "&'static str")]
pub enum Mood {
	#[default]
	Calm,
	Flow,
	Alive,
}

impl Mood {
	pub fn as_str(self) -> &'static str {
		match self {
			Mood::Calm => "calm",
			Mood::Flow => "flow",
			Mood::Alive => "alive",
		}
	}

	pub fn parse(key: &str) -> Option<Self> {
		match key {
			"calm" => Some(Mood::Calm),
			"flow" => Some(Mood::Flow),
			"alive" => Some(Mood::Alive),
			_ => None,
		}
	}

	/// calm → flow → alive → calm.
	pub fn next(self) -> Self {
		match self {
			Mood::Calm => Mood::Flow,
			Mood::Flow => Mood::Alive,
			Mood::Alive => Mood::Calm,
		}
	}
}

impl From<Mood> for &'static str {
	fn from(mood: Mood) -> Self {
		mood.as_str()
	}
}

impl From<serde_json::Value> for Mood {
	fn from(value: serde_json::Value) -> Self {
		value.as_str().and_then(Mood::parse).unwrap_or(Mood::Flow)
	}
}

/// Three-step slider value used for both motion and density.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "u8")]
pub enum Level {
	Low,
	#[default]
	Medium,
	High,
}

impl Level {
	pub fn from_index(index: u64) -> Option<Self> {
		match index {
			0 => Some(Level::Low),
			1 => Some(Level::Medium),
			2 => Some(Level::High),
			_ => None,
		}
	}

	pub fn parse(key: &str) -> Option<Self> {
		match key {
			"low" => Some(Level::Low),
			"medium" => Some(Level::Medium),
			"high" => Some(Level::High),
			_ => None,
		}
	}
}

impl From<Level> for u8 {
	fn from(level: Level) -> Self {
		match level {
			Level::Low => 0,
			Level::Medium => 1,
			Level::High => 2,
		}
	}
}

impl From<serde_json::Value> for Level {
	fn from(value: serde_json::Value) -> Self {
		value
			.as_u64()
			.and_then(Level::from_index)
			.or_else(|| value.as_str().and_then(Level::parse))
			.unwrap_or_default()
	}
}

/// Snapshot of everything the engine reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
	pub theme: ThemeId,
	pub mood: Mood,
	pub motion: Level,
	pub density: Level,
	/// Show the clock overlay.
	pub show_clock: bool,
	/// Show the rotating quote overlay.
	pub show_quotes: bool,
	/// Darken every frame with an extra translucent overlay.
	pub extra_dark: bool,
	/// Wallpaper blend strength in 0..=100.
	#[serde(deserialize_with = "lenient_tint")]
	pub tint: i32,
}

/// Rounds and clamps any stored number; anything else reads as 0.
fn tint_from_value(value: &serde_json::Value) -> i32 {
	value
		.as_f64()
		.or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
		.filter(|v| v.is_finite())
		.map(|v| v.round().clamp(0.0, 100.0) as i32)
		.unwrap_or(0)
}

fn lenient_tint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
	let value = serde_json::Value::deserialize(deserializer)?;
	Ok(tint_from_value(&value))
}

impl Default for Configuration {
	fn default() -> Self {
		Self {
			theme: ThemeId::Space,
			mood: Mood::Calm,
			motion: Level::Medium,
			density: Level::Medium,
			show_clock: true,
			show_quotes: true,
			extra_dark: false,
			tint: 0,
		}
	}
}

impl Configuration {
	/// Parses a stored configuration.
	pub fn from_json(json: &str) -> Result<Self, SettingsError> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn to_json(&self) -> Result<String, SettingsError> {
		Ok(serde_json::to_string(self)?)
	}

	/// Overwrites every engine-visible field with the preset's values.
	pub fn apply_profile(&mut self, profile: Profile) {
		*self = profile.configuration();
	}
}

/// Named presets for common setups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
	/// Dim forest wallpaper, minimal motion.
	Deep,
	/// Nebula with a strong tint, for falling asleep.
	Sleep,
	/// The default star drift.
	Space,
}

impl Profile {
	pub fn name(self) -> &'static str {
		match self {
			Profile::Deep => "deep",
			Profile::Sleep => "sleep",
			Profile::Space => "space",
		}
	}

	pub fn configuration(self) -> Configuration {
		match self {
			Profile::Deep => Configuration {
				theme: ThemeId::Forest,
				mood: Mood::Calm,
				motion: Level::Low,
				density: Level::Low,
				show_clock: false,
				show_quotes: false,
				extra_dark: true,
				tint: 50,
			},
			Profile::Sleep => Configuration {
				theme: ThemeId::Nebula,
				mood: Mood::Calm,
				motion: Level::Low,
				density: Level::Low,
				show_clock: false,
				show_quotes: true,
				extra_dark: true,
				tint: 70,
			},
			Profile::Space => Configuration {
				theme: ThemeId::Space,
				mood: Mood::Flow,
				motion: Level::Medium,
				density: Level::Medium,
				show_clock: true,
				show_quotes: false,
				extra_dark: false,
				tint: 0,
			},
		}
	}
}

/// Read access to the live configuration. The engine never writes through it.
pub trait SettingsSource {
	fn get_state(&self) -> Configuration;
}

impl<F> SettingsSource for F
where
	F: Fn() -> Configuration,
{
	fn get_state(&self) -> Configuration {
		self()
	}
}

/// Failures while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("no browser window available")]
	NoWindow,
	#[error("local storage is unavailable")]
	NoStorage,
	#[error("storage call failed: {0}")]
	Js(String),
	#[error("invalid settings json: {0}")]
	Json(#[from] serde_json::Error),
}

fn local_storage() -> Result<web_sys::Storage, SettingsError> {
	let window = web_sys::window().ok_or(SettingsError::NoWindow)?;
	window
		.local_storage()
		.map_err(|e| SettingsError::Js(format!("{e:?}")))?
		.ok_or(SettingsError::NoStorage)
}

/// Loads the stored configuration. `Ok(None)` means nothing was saved yet.
pub fn load() -> Result<Option<Configuration>, SettingsError> {
	let storage = local_storage()?;
	let raw = storage
		.get_item(STORAGE_KEY)
		.map_err(|e| SettingsError::Js(format!("{e:?}")))?;
	raw.as_deref().map(Configuration::from_json).transpose()
}

/// Persists the configuration.
pub fn save(config: &Configuration) -> Result<(), SettingsError> {
	let storage = local_storage()?;
	storage
		.set_item(STORAGE_KEY, &config.to_json()?)
		.map_err(|e| SettingsError::Js(format!("{e:?}")))
}
