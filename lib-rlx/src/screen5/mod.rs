pub mod emitter;
pub mod loader;

pub use emitter::{emit, EmitError};
pub use loader::LoaderScript;
