//! Theme render engine.
//!
//! Owns the particle populations, the viewport and the drawing surface. The
//! host calls [`ThemeEngine::render_frame`] once per display refresh and
//! [`ThemeEngine::refresh`] after any settings change. The engine never writes
//! settings back.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::params::{Factors, tint_strength};
use super::particles::{Populations, Viewport};
use super::render::{self, Frame};
use super::settings::{Configuration, SettingsSource};
use super::surface::{Backdrop, Surface};
use super::theme::{Population, RenderStyle, Routine, ThemeSpec, ThemeTable, WrapPolicy};

/// Single owner of all rendering state.
///
/// Created once when the canvas mounts, then driven by the host's frame loop.
/// Regeneration discards every particle and rebuilds the population the
/// current theme needs, so population sizes always match the current
/// settings exactly.
pub struct ThemeEngine<S, B, C> {
	surface: S,
	backdrop: B,
	settings: C,
	themes: ThemeTable,
	viewport: Viewport,
	populations: Populations,
	rng: StdRng,
}

impl<S, B, C> ThemeEngine<S, B, C>
where
	S: Surface,
	B: Backdrop,
	C: SettingsSource,
{
	/// Builds an engine with the default theme table and an OS-seeded RNG, sizes
	/// the surface and generates the first population.
	pub fn initialize(surface: S, backdrop: B, settings: C, viewport: Viewport) -> Self {
		Self::with_parts(
			surface,
			backdrop,
			settings,
			viewport,
			ThemeTable::default(),
			StdRng::from_os_rng(),
		)
	}

	/// Like [`ThemeEngine::initialize`] with an explicit table and RNG.
	pub fn with_parts(
		surface: S,
		backdrop: B,
		settings: C,
		viewport: Viewport,
		themes: ThemeTable,
		rng: StdRng,
	) -> Self {
		let mut engine = Self {
			surface,
			backdrop,
			settings,
			themes,
			viewport,
			populations: Populations::default(),
			rng,
		};
		engine.surface.resize(&engine.viewport);
		engine.refresh();
		engine
	}

	/// Applies a new viewport and regenerates.
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.surface.resize(&self.viewport);
		self.refresh();
	}

	/// Regenerates populations and the backdrop from the current settings.
	pub fn refresh(&mut self) {
		let config = self.settings.get_state();
		let factors = Factors::new(&config);
		let spec = self.themes.get(config.theme).cloned();

		match spec.as_ref().and_then(|s| s.population) {
			Some(Population::Stars { base_count }) => {
				let count = factors.star_count(base_count);
				self.populations
					.regenerate_stars(&mut self.rng, &self.viewport, &factors, count);
			}
			Some(Population::Dust { base_count }) => {
				let count = factors.dust_count(base_count);
				self.populations
					.regenerate_motes(&mut self.rng, &self.viewport, count);
			}
			None if spec.is_some() => self.populations.clear(),
			None => {}
		}

		self.sync_backdrop(&config, spec.as_ref());

		debug!(
			"ambient-saver: regenerated {} ({} particles, {}x{})",
			config.theme,
			self.particle_count(),
			self.viewport.width,
			self.viewport.height
		);
	}

	/// Pushes the wallpaper image and blend strength for the current theme.
	/// Cheaper than [`ThemeEngine::refresh`] when only the tint changed.
	pub fn update_backdrop(&mut self) {
		let config = self.settings.get_state();
		let spec = self.themes.get(config.theme).cloned();
		self.sync_backdrop(&config, spec.as_ref());
	}

	fn sync_backdrop(&mut self, config: &Configuration, spec: Option<&ThemeSpec>) {
		match spec.and_then(ThemeSpec::wallpaper_image) {
			Some(image) => {
				self.backdrop.set_image(Some(image));
				self.backdrop.set_tint(tint_strength(config.tint));
			}
			None => {
				self.backdrop.set_image(None);
				self.backdrop.set_tint(0.0);
			}
		}
	}

	/// Draws one frame for `timestamp_ms`.
	pub fn render_frame(&mut self, timestamp_ms: f64) {
		let config = self.settings.get_state();
		let spec = self.themes.get(config.theme);
		let frame = Frame {
			viewport: self.viewport,
			factors: Factors::new(&config),
			time_ms: timestamp_ms,
			wrap: spec.map(|s| s.wrap).unwrap_or(WrapPolicy::None),
		};

		let surface = &mut self.surface;
		let rng = &mut self.rng;
		let pops = &mut self.populations;
		match spec.map(|s| s.style) {
			Some(RenderStyle::Procedural(routine)) => match routine {
				Routine::Space => render::draw_space(surface, &frame, &mut pops.stars, rng),
				Routine::Nebula => render::draw_nebula(surface, &frame, &mut pops.stars, rng),
				Routine::Void => render::draw_void(surface, &frame),
				Routine::Dust => render::draw_dust(surface, &frame, &pops.motes, rng),
				Routine::Aurora => render::draw_aurora(surface, &frame),
				Routine::Ocean => render::draw_ocean(surface, &frame),
				Routine::Fireflies => {
					render::draw_fireflies(surface, &frame, &mut pops.fireflies, rng)
				}
				Routine::Sakura => render::draw_sakura(surface, &frame, &mut pops.stars, rng),
			},
			// Keep an ambient base moving under the composited image
			Some(RenderStyle::Wallpaper { .. }) => render::draw_void(surface, &frame),
			None => {}
		}

		if config.extra_dark {
			render::draw_darken(surface, &frame);
		}
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn populations(&self) -> &Populations {
		&self.populations
	}

	/// Size of the population the current theme draws.
	pub fn particle_count(&self) -> usize {
		let p = &self.populations;
		p.stars.len().max(p.motes.len())
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	pub fn backdrop(&self) -> &B {
		&self.backdrop
	}
}
