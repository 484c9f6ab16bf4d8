//! Terminal presentation layer split across logical submodules.

mod app;
mod terminal;

pub use app::App;
pub use terminal::run_app;
