//! The reading flow split across logical submodules: the collection manager,
//! the per-page loader, the grouping transform, and the recovery policy.

mod grouping;
mod loader;
mod manager;
mod recovery;

pub use grouping::group_verses;
pub use manager::PageReader;
pub use recovery::PLACEHOLDER_TITLE;
