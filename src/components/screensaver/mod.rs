//! Ambient screensaver backdrop.
//!
//! Draws one of nine themes onto a full-window canvas:
//! - Star fields, nebula glow, drifting dust and fireflies from seeded particle
//!   populations
//! - Aurora, ocean and void from time-driven gradient bands
//! - Photographic wallpapers composited over a slowly breathing base
//!
//! Settings (theme, mood, motion, density, darkening, wallpaper tint, clock
//! and quote toggles) live in a single signal owned by the host and are
//! persisted to local storage. [`Overlay`] draws the clock and quotes above
//! the canvas.
//!
//! # Example
//!
//! ```ignore
//! use ambient_saver::{Configuration, ScreensaverCanvas};
//!
//! let settings = RwSignal::new(Configuration::default());
//! view! { <ScreensaverCanvas settings=settings /> }
//! ```

mod component;
mod engine;
mod overlay;
pub mod params;
mod particles;
mod render;
pub mod settings;
pub mod surface;
pub mod theme;

pub use component::ScreensaverCanvas;
pub use engine::ThemeEngine;
pub use overlay::Overlay;
pub use particles::Viewport;
pub use settings::{Configuration, Level, Mood, Profile, SettingsSource};
pub use surface::{Backdrop, Fill, RadialGradient, Surface};
pub use theme::{ThemeId, ThemeSpec, ThemeTable};
