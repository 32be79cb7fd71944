//! Terminal UI for the price projection dashboard.

mod app;
mod chart_view;
mod events;
mod state;
mod theme;

pub use app::{run_tui, Action, App};
pub use state::{LogBuffer, LogMakeWriter};
pub use theme::Theme;
