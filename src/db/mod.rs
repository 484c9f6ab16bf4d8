//! Translation store access split across logical submodules.

mod handle;
mod registry;

pub use handle::TranslationHandle;
pub use registry::TranslationRegistry;
