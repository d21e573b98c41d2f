//! Pretty printer for Fusion syntax trees.
//!
//! This crate provides:
//! - `Printer` - Walks a `SyntaxTree` and writes normalized PHP source
//! - `PrintOptions` - Indentation settings
//! - `SourceWriter` - Indentation-aware output buffer
//! - `print_file` / `print_node` - Convenience entry points

pub mod emitter;
pub mod printer;
pub mod source_writer;

pub use emitter::Printer;
pub use printer::{PrintOptions, print_file, print_node};
pub use source_writer::SourceWriter;
