//! Binds live scene state to the variables of linked shader programs.
//!
//! A [`SemanticsDelegate`](binding::SemanticsDelegate) configures each active variable of a
//! program with the [semantic](scenebind_reflect::reflect::semantics::VariableSemantic) it
//! stands for once after link, and populates each uniform from a
//! [`DrawingVisitor`](visitor::DrawingVisitor) on every draw.

/// Semantic binding delegates and the base populator.
pub mod binding;

/// Environment matrices with cached inverses.
pub mod matrix;

/// Options for populating uniforms.
pub mod options;

/// Program-level configuration and population.
pub mod program;

/// Scene state snapshots.
pub mod scene;

/// Name-directed semantics and the shared default registry.
pub mod semantics;

/// Diffing uniform and attribute descriptors.
pub mod uniforms;

/// Access to the state of the draw in progress.
pub mod visitor;
