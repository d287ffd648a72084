//! The components module contains all shared components for our app.

mod app;
mod icons;
mod join;
mod queue;
mod search_panel;

pub use app::*;
pub use icons::*;
pub use join::*;
pub use queue::*;
pub use search_panel::*;
