// State management module
// Immutable, per-process state shared by all request handlers

pub mod app_state;

pub use app_state::AppState;
