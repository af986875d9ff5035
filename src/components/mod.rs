//! UI components.

pub mod screensaver;
