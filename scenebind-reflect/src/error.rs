use crate::reflect::semantics::{IndexedSemantics, VariableSemantic};
use crate::reflect::UniformType;
use scenebind_common::map::ShortString;
use thiserror::Error;

/// Error type for semantic resolution and validation.
///
/// None of these are fatal while drawing. Binders report them through the log and
/// carry on with whatever value the uniform last held.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticsError {
    /// The raw value does not fit in a 16-bit semantic tag.
    #[error("tag {0:#x} is outside of the semantic range")]
    UnrecognizedSemantic(u32),
    /// The unit index is beyond the units reserved by the family.
    #[error("index {index} is out of range for {family:?}")]
    IndexOutOfRange {
        family: IndexedSemantics,
        index: usize,
    },
    /// The type of the uniform was not compatible with the semantic assigned to it.
    #[error("uniform `{name}` of type {ty} is invalid for semantic {semantic}")]
    InvalidTypeForSemantic {
        name: ShortString,
        semantic: VariableSemantic,
        ty: UniformType,
    },
}
