//! ambient-saver: Full-window ambient screensaver rendered on an HTML canvas.
//!
//! This crate provides a WASM-based screensaver component that draws
//! procedural star fields, nebulae, aurorae and other gentle backdrops, tuned
//! by a handful of persisted settings and keyboard shortcuts.

// Only referenced for its `wasm_js` backend, which seeds the RNG in browsers.
use getrandom as _;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};

pub mod components;

pub use components::screensaver::{
	Configuration, Overlay, Profile, ScreensaverCanvas, ThemeId, ThemeTable,
};

use components::screensaver::settings;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-saver: logging initialized");
}

/// Settings saved by a previous visit, or the defaults.
fn load_settings() -> Configuration {
	match settings::load() {
		Ok(Some(config)) => {
			info!(
				"ambient-saver: restored settings ({}, {})",
				config.theme,
				config.mood.as_str()
			);
			config
		}
		Ok(None) => Configuration::default(),
		Err(e) => {
			warn!("ambient-saver: failed to restore settings: {}", e);
			Configuration::default()
		}
	}
}

/// Main application component.
/// Restores the saved settings and renders the screensaver full-window.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let settings = RwSignal::new(load_settings());
	let themes = ThemeTable::procedural();
	let title = move || {
		let id = settings.with(|c| c.theme);
		let name = themes.get(id).map(|s| s.name).unwrap_or(id.as_str());
		format!("Ambient · {}", name)
	};
	let profiles = [Profile::Deep, Profile::Sleep, Profile::Space]
		.iter()
		.enumerate()
		.map(|(i, p)| format!("{} {}", i + 1, p.name()))
		.collect::<Vec<_>>()
		.join(" · ");

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-saver">
			<ScreensaverCanvas settings=settings />
			<Overlay settings=settings>
				<p>"T theme · M mood · D darken · C clock · Q quotes · F fullscreen"</p>
				<p>{profiles}</p>
			</Overlay>
		</div>
	}
}
