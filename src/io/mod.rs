//! Model weight persistence
//!
//! Networks are flattened into a [`Model`] (metadata plus named
//! parameters) and written as JSON or YAML, chosen by file extension.

mod format;
mod load;
mod model;
mod save;

pub use format::{ModelFormat, SaveConfig};
pub use load::load_model;
pub use model::{Model, ModelMetadata, ModelState, ParameterInfo};
pub use save::save_model;
