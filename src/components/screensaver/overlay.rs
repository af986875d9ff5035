//! Clock and quote overlay shown above the canvas.
//!
//! The clock ticks once a second and the quote rotates every 25 seconds.
//! Visibility follows `show_clock` / `show_quotes`. After 30 seconds without
//! pointer, touch or keyboard input the hint fades out until the next input.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use rand::Rng;
use wasm_bindgen::prelude::*;

use super::settings::Configuration;

const CLOCK_TICK_MS: i32 = 1_000;
const QUOTE_ROTATE_MS: i32 = 25_000;
const IDLE_MS: i32 = 30_000;

/// Events that count as user activity.
const ACTIVITY_EVENTS: [&str; 4] = ["mousemove", "mousedown", "keydown", "touchstart"];

pub const QUOTES: [&str; 6] = [
	"Simplicity is the place where complexity goes to rest.",
	"Attention is a quiet form of love.",
	"In the darkness, every small light is a universe.",
	"You are not behind; you are mid-chapter.",
	"The quieter the room, the louder your inner life.",
	"Tonight belongs to one honest intention.",
];

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
	"Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 24-hour `HH:MM:SS`.
fn format_clock(hours: u32, minutes: u32, seconds: u32) -> String {
	format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// `Fri, Oct 16, 2026`. `weekday` and `month` are zero-based, as `Date`
/// returns them.
fn format_date(weekday: u32, month: u32, day: u32, year: u32) -> String {
	let weekday = WEEKDAYS.get(weekday as usize).copied().unwrap_or("");
	let month = MONTHS.get(month as usize).copied().unwrap_or("");
	format!("{}, {} {}, {}", weekday, month, day, year)
}

fn now_strings() -> (String, String) {
	let now = js_sys::Date::new_0();
	(
		format_clock(now.get_hours(), now.get_minutes(), now.get_seconds()),
		format_date(now.get_day(), now.get_month(), now.get_date(), now.get_full_year()),
	)
}

/// A random quote index other than `current`.
fn next_quote<R: Rng + ?Sized>(rng: &mut R, current: usize) -> usize {
	let len = QUOTES.len();
	(current % len + 1 + rng.random_range(0..len - 1)) % len
}

/// Clock, quote and hint layer. `children` is the hint content, which fades
/// out while the user is idle.
#[component]
pub fn Overlay(settings: RwSignal<Configuration>, children: Children) -> impl IntoView {
	let clock = RwSignal::new(now_strings());
	let quote = RwSignal::new(rand::rng().random_range(0..QUOTES.len()));
	let idle = RwSignal::new(false);

	let tick_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let quote_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let activity_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		if tick_cb.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};

		*tick_cb.borrow_mut() = Some(Closure::new(move || clock.set(now_strings())));
		if let Some(ref cb) = *tick_cb.borrow() {
			let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				CLOCK_TICK_MS,
			);
		}

		*quote_cb.borrow_mut() = Some(Closure::new(move || {
			quote.update(|i| *i = next_quote(&mut rand::rng(), *i));
		}));
		if let Some(ref cb) = *quote_cb.borrow() {
			let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
				cb.as_ref().unchecked_ref(),
				QUOTE_ROTATE_MS,
			);
		}

		let go_idle: Rc<Closure<dyn FnMut()>> = Rc::new(Closure::new(move || idle.set(true)));
		let first = window.set_timeout_with_callback_and_timeout_and_arguments_0(
			(*go_idle).as_ref().unchecked_ref(),
			IDLE_MS,
		);
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(first.ok()));
		*activity_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if idle.get_untracked() {
				idle.set(false);
			}
			if let Some(handle) = pending.take() {
				win.clear_timeout_with_handle(handle);
			}
			let handle = win.set_timeout_with_callback_and_timeout_and_arguments_0(
				(*go_idle).as_ref().unchecked_ref(),
				IDLE_MS,
			);
			pending.set(handle.ok());
		}));
		if let Some(ref cb) = *activity_cb.borrow() {
			for event in ACTIVITY_EVENTS {
				let _ = window.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
			}
		}
	});

	let visible = |shown: bool| if shown { "" } else { "display: none;" };

	view! {
		<div class="saver-overlay" style="position: fixed; inset: 0; pointer-events: none;">
			<div
				class="clock-overlay"
				style=move || visible(settings.with(|c| c.show_clock))
			>
				<div class="clock-time">{move || clock.with(|(time, _)| time.clone())}</div>
				<div class="clock-date">{move || clock.with(|(_, date)| date.clone())}</div>
			</div>
			<div
				class="quote-overlay"
				style=move || visible(settings.with(|c| c.show_quotes))
			>
				<p class="quote-text">{move || format!("\u{201c}{}\u{201d}", QUOTES[quote.get() % QUOTES.len()])}</p>
			</div>
			<div
				class="hint"
				style=move || if idle.get() { "opacity: 0; transition: opacity 1.2s;" } else { "opacity: 1; transition: opacity 0.3s;" }
			>
				{children()}
			</div>
		</div>
	}
}
