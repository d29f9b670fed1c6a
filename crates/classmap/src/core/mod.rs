//! Core abstractions for class extraction
//!
//! The traits here are the seams between pipeline stages: member
//! extraction strategies, layout algorithms and output renderers. Shared
//! vocabulary types, configuration and errors live alongside them.

mod config;
mod error;
mod extractor;
mod layout;
pub mod logging;
mod renderer;
mod types;

pub use config::*;
pub use error::*;
pub use extractor::*;
pub use layout::*;
pub use logging::*;
pub use renderer::*;
pub use types::*;
