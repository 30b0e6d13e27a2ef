//! The semantic taxonomy of scene quantities and the reflected shader variables
//! that carry them.

/// Error types.
pub mod error;
/// Shader variable reflection and semantics.
pub mod reflect;
