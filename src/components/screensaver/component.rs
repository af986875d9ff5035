//! Leptos component hosting the screensaver canvas.
//!
//! The component creates the canvas and the wallpaper layer, builds the
//! [`ThemeEngine`] once both are mounted, and owns the frame loop: every
//! `requestAnimationFrame` tick calls `render_frame` with the current wall
//! clock. Window resizes and settings changes regenerate the particles;
//! keyboard shortcuts edit the settings signal.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, Window};

use super::engine::ThemeEngine;
use super::particles::Viewport;
use super::settings::{Configuration, Profile, save as save_settings};
use super::theme::ThemeTable;

type CanvasEngine =
	ThemeEngine<CanvasRenderingContext2d, Option<HtmlElement>, Box<dyn Fn() -> Configuration>>;

/// Current window size and device pixel ratio.
fn window_viewport(window: &Window) -> Viewport {
	let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	Viewport::new(
		dimension(window.inner_width()),
		dimension(window.inner_height()),
		window.device_pixel_ratio(),
	)
}

/// A keyboard shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shortcut {
	NextTheme,
	NextMood,
	ToggleDark,
	ToggleClock,
	ToggleQuotes,
	Fullscreen,
	Profile(Profile),
}

impl Shortcut {
	/// Resolves a `KeyboardEvent.key`. Chords with Ctrl, Meta or Alt belong to
	/// the browser and never resolve.
	fn from_key(key: &str, chord: bool) -> Option<Self> {
		if chord {
			return None;
		}
		Some(match key {
			"t" | "T" => Shortcut::NextTheme,
			"m" | "M" => Shortcut::NextMood,
			"d" | "D" => Shortcut::ToggleDark,
			"c" | "C" => Shortcut::ToggleClock,
			"q" | "Q" => Shortcut::ToggleQuotes,
			"f" | "F" => Shortcut::Fullscreen,
			"1" => Shortcut::Profile(Profile::Deep),
			"2" => Shortcut::Profile(Profile::Sleep),
			"3" => Shortcut::Profile(Profile::Space),
			_ => return None,
		})
	}

	/// Applies the settings edit, if this shortcut makes one.
	fn apply(self, config: &mut Configuration) -> bool {
		match self {
			Shortcut::NextTheme => config.theme = config.theme.next(),
			Shortcut::NextMood => config.mood = config.mood.next(),
			Shortcut::ToggleDark => config.extra_dark = !config.extra_dark,
			Shortcut::ToggleClock => config.show_clock = !config.show_clock,
			Shortcut::ToggleQuotes => config.show_quotes = !config.show_quotes,
			Shortcut::Profile(profile) => config.apply_profile(profile),
			Shortcut::Fullscreen => return false,
		}
		true
	}
}

fn toggle_fullscreen() {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	if document.fullscreen_element().is_some() {
		document.exit_fullscreen();
	} else if let Some(root) = document.document_element() {
		if let Err(e) = root.request_fullscreen() {
			warn!("ambient-saver: fullscreen request refused: {:?}", e);
		}
	}
}

/// How much engine work a settings edit needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Change {
	/// Only overlay toggles changed; the canvas is unaffected.
	Display,
	/// Only the wallpaper tint changed.
	Backdrop,
	/// Anything that shapes the particles or the routine.
	Scene,
}

fn classify_change(previous: &Configuration, next: &Configuration) -> Change {
	let mut candidate = Configuration {
		show_clock: next.show_clock,
		show_quotes: next.show_quotes,
		..previous.clone()
	};
	if candidate == *next {
		return Change::Display;
	}
	candidate.tint = next.tint;
	if candidate == *next {
		Change::Backdrop
	} else {
		Change::Scene
	}
}

/// Full-window animated backdrop driven by `settings`.
///
/// Any write to `settings` is persisted to local storage. Edits that shape
/// the scene regenerate the particles; a tint-only change just re-blends the
/// wallpaper and overlay toggles leave the canvas alone. Set
/// `wallpapers = true` to show aurora and nebula as photographic wallpapers
/// instead of generating them.
#[component]
pub fn ScreensaverCanvas(
	settings: RwSignal<Configuration>,
	#[prop(default = false)] wallpapers: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let backdrop_ref = NodeRef::<leptos::html::Div>::new();
	let engine: Rc<RefCell<Option<CanvasEngine>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));
	let (engine_init, animate_init) = (engine.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas): Option<HtmlCanvasElement> = canvas_ref.get() else {
			return;
		};
		if engine_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("ambient-saver: 2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("ambient-saver: canvas 2d context unavailable");
				return;
			}
		};
		let backdrop: Option<HtmlElement> = backdrop_ref.get_untracked().map(Into::into);
		let source: Box<dyn Fn() -> Configuration> = Box::new(move || settings.get_untracked());
		let themes = if wallpapers {
			ThemeTable::wallpapers()
		} else {
			ThemeTable::procedural()
		};

		let viewport = window_viewport(&window);
		*engine_init.borrow_mut() = Some(ThemeEngine::with_parts(
			ctx,
			backdrop,
			source,
			viewport,
			themes,
			StdRng::from_os_rng(),
		));
		info!(
			"ambient-saver: engine ready at {}x{} (x{})",
			viewport.width, viewport.height, viewport.pixel_ratio
		);

		let engine_resize = engine_init.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if let Some(ref mut e) = *engine_resize.borrow_mut() {
				e.resize(window_viewport(&win));
			}
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		*keydown_cb.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			let chord = ev.ctrl_key() || ev.meta_key() || ev.alt_key();
			let Some(shortcut) = Shortcut::from_key(&ev.key(), chord) else {
				return;
			};
			ev.prevent_default();
			if shortcut == Shortcut::Fullscreen {
				toggle_fullscreen();
				return;
			}
			if let Shortcut::Profile(profile) = shortcut {
				info!("ambient-saver: applied {} profile", profile.name());
			}
			settings.update(|config| {
				shortcut.apply(config);
			});
		}));
		if let Some(ref cb) = *keydown_cb.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (engine_anim, animate_inner) = (engine_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |_frame_time: f64| {
			if let Some(ref mut e) = *engine_anim.borrow_mut() {
				e.render_frame(js_sys::Date::now());
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let engine_settings = engine.clone();
	Effect::new(move |previous: Option<Configuration>| {
		let config = settings.get();
		let change = previous
			.as_ref()
			.map_or(Change::Scene, |p| classify_change(p, &config));
		if let Some(ref mut e) = *engine_settings.borrow_mut() {
			match change {
				Change::Display => {}
				Change::Backdrop => e.update_backdrop(),
				Change::Scene => e.refresh(),
			}
		}
		if previous.as_ref().is_some_and(|p| p.theme != config.theme) {
			info!("ambient-saver: theme changed to {}", config.theme);
		}
		if let Err(e) = save_settings(&config) {
			warn!("ambient-saver: failed to persist settings: {}", e);
		}
		config
	});

	view! {
		<div class="screensaver-stage" style="position: fixed; inset: 0;">
			<canvas
				node_ref=canvas_ref
				class="screensaver-canvas"
				style="display: block; width: 100%; height: 100%;"
			/>
			<div
				node_ref=backdrop_ref
				class="media-background"
				style="position: absolute; inset: 0; background-size: cover; background-position: center; opacity: var(--wallpaper-tint, 0); pointer-events: none;"
			/>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::screensaver::settings::{Level, Mood};
	use crate::components::screensaver::theme::ThemeId;

	fn press(key: &str, config: &mut Configuration) -> bool {
		Shortcut::from_key(key, false).is_some_and(|s| s.apply(config))
	}

	#[test]
	fn shortcuts_edit_configuration() {
		let mut config = Configuration::default();
		assert!(press("t", &mut config));
		assert_eq!(config.theme, ThemeId::Nebula);
		assert!(press("M", &mut config));
		assert_eq!(config.mood, Mood::Flow);
		assert!(press("d", &mut config));
		assert!(config.extra_dark);
		assert!(press("2", &mut config));
		assert_eq!(config.theme, ThemeId::Nebula);
		assert_eq!(config.density, Level::Low);
		assert_eq!(config.tint, 70);
	}

	#[test]
	fn clock_and_quote_keys_toggle_overlays() {
		let mut config = Configuration::default();
		assert!(press("c", &mut config));
		assert!(!config.show_clock);
		assert!(config.show_quotes);
		assert!(press("Q", &mut config));
		assert!(!config.show_quotes);
		assert!(press("C", &mut config));
		assert!(config.show_clock);
		assert_eq!(config.theme, ThemeId::Space);
	}

	#[test]
	fn profile_keys_set_overlay_toggles() {
		let mut config = Configuration::default();
		assert!(press("1", &mut config));
		assert!(!config.show_clock && !config.show_quotes);
		assert!(press("3", &mut config));
		assert!(config.show_clock && !config.show_quotes);
	}

	#[test]
	fn browser_chords_are_not_shortcuts() {
		for key in ["t", "1", "d", "c", "f"] {
			assert_eq!(Shortcut::from_key(key, true), None, "{key}");
		}
		assert_eq!(Shortcut::from_key("f", false), Some(Shortcut::Fullscreen));
	}

	#[test]
	fn fullscreen_does_not_touch_settings() {
		let mut config = Configuration::default();
		assert!(!press("f", &mut config));
		assert_eq!(config, Configuration::default());
	}

	#[test]
	fn unbound_keys_leave_configuration_alone() {
		let mut config = Configuration::default();
		assert!(!press("x", &mut config));
		assert!(!press("Enter", &mut config));
		assert_eq!(config, Configuration::default());
	}

	#[test]
	fn settings_edits_are_classified() {
		let base = Configuration::default();
		let with = |edit: fn(&mut Configuration)| {
			let mut next = base.clone();
			edit(&mut next);
			classify_change(&base, &next)
		};
		assert_eq!(with(|c| c.show_clock = false), Change::Display);
		assert_eq!(with(|_| {}), Change::Display);
		assert_eq!(with(|c| c.tint = 40), Change::Backdrop);
		assert_eq!(with(|c| c.theme = ThemeId::Dust), Change::Scene);
		assert_eq!(
			with(|c| {
				c.tint = 40;
				c.mood = Mood::Alive;
			}),
			Change::Scene
		);
	}
}
