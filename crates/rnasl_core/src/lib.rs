//! rnasl_core: Core utilities for the rnasl NASL toolchain.
//!
//! Provides text positions and ranges, the precomputed line map, and the
//! shared immutable source buffer used by the scanner and by diagnostics
//! rendering.

pub mod source;
pub mod text;

// Re-export commonly used types
pub use source::SourceFile;
pub use text::{LineAndColumn, LineMap, TextPos, TextRange};
