#![forbid(missing_docs)]
//! Binds live 3D scene state to the variables of GLSL shader programs.
//!
//! Hand-written shaders refer to engine quantities such as the model-view-projection
//! matrix, the lights of the scene, or the state of the fixed-function texture units
//! through a closed taxonomy of *semantics*. scenebind answers two questions for a
//! linked program:
//!
//! 1. Which scene quantity does each active variable stand for? This is answered once
//!    after link by [configuring](runtime::SemanticsDelegate::configure_variable) the
//!    variable, usually by looking up its name.
//! 2. What is the value of that quantity for the current draw? This is answered for
//!    every draw by [populating](runtime::SemanticsDelegate::populate_uniform) each
//!    uniform from a [`DrawingVisitor`](runtime::visitor::DrawingVisitor).
//!
//! ## Usage
//! Most programs can be bound with the [shared default registry](runtime::shared_default),
//! which knows every default variable name such as `u_cc3Matrices.modelViewProj` or
//! `u_cc3Lights[0].position`.
//!
//! ```rust
//! use scenebind::reflect::UniformType;
//! use scenebind::runtime::uniforms::{GlslAttribute, GlslUniform};
//! use scenebind::runtime::visitor::DrawingState;
//! use scenebind::runtime::{shared_default, ProgramSemantics};
//!
//! let mut program: ProgramSemantics<_> = ProgramSemantics::new(
//!     shared_default(),
//!     vec![GlslAttribute::new("a_cc3Position", 0)],
//!     vec![GlslUniform::new("u_cc3Matrices.modelViewProj", 0, UniformType::mat(4))],
//! );
//!
//! assert!(program.configure().is_empty());
//! assert_eq!(program.populate(&DrawingState::default()), 1);
//! ```
//!
//! Application-specific semantics live in the tag range starting at
//! [`SEMANTIC_APP_BASE`](reflect::semantics::SEMANTIC_APP_BASE), and are populated by
//! chaining a custom delegate in front of the engine delegate.

pub use scenebind_common::{Color, Mat3, Mat4, Vec2, Vec3, Vec4};

/// Fixed-function state types and small collections.
pub mod common {
    pub use scenebind_common::*;
}

#[cfg(feature = "reflect")]
/// The semantic taxonomy and reflected shader variables.
pub mod reflect {
    pub use scenebind_reflect::error::*;
    pub use scenebind_reflect::reflect::*;
}

#[cfg(feature = "runtime")]
/// Configuration and population of shader variables from scene state.
pub mod runtime {
    pub use scenebind_runtime::binding::{BaseSemantics, SemanticsDelegate};
    pub use scenebind_runtime::options::SemanticsOptions;
    pub use scenebind_runtime::program::ProgramSemantics;
    pub use scenebind_runtime::semantics::{
        shared_default, SharedSemantics, VarNameSemantics, VariableConfiguration,
    };

    /// Environment matrices.
    pub mod matrix {
        pub use scenebind_runtime::matrix::*;
    }

    /// Scene state snapshots.
    pub mod scene {
        pub use scenebind_runtime::scene::*;
    }

    /// Uniform and attribute descriptors.
    pub mod uniforms {
        pub use scenebind_runtime::uniforms::*;
    }

    /// Access to the state of the draw in progress.
    pub mod visitor {
        pub use scenebind_runtime::visitor::*;
    }
}
