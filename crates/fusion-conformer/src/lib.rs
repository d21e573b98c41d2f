//! Rewrites Fusion page scripts into Page Contract classes.
//!
//! This crate provides:
//! - `Conformer` - Parses a page fragment, runs the pass pipeline and prints
//!   the resulting PHP source
//! - `passes` - The rewriting passes and the traversal that drives them
//! - `ConformOptions` - Class, trait and attribute names plus printer settings
//! - `FunctionRegistry` - Names of the Fusion helper functions
//! - `DestinationIdentity` - Namespace and class name derived from a path
//! - `init_tracing` - Logging setup driven by `FUSION_LOG`

pub mod config;
pub mod conformer;
pub mod error;
pub mod identity;
pub mod passes;
pub mod registry;
pub mod tracing_config;

pub use config::ConformOptions;
pub use conformer::{Conformer, conform};
pub use error::{
    ConformError, ConformResult, OptionsError, SemanticError, SyntaxError,
    UnsupportedLiteralError,
};
pub use identity::DestinationIdentity;
pub use passes::{PassKind, default_pipeline};
pub use registry::FunctionRegistry;
pub use tracing_config::init_tracing;
