use crate::reflect::semantics::VariableSemantic;
use crate::reflect::UniformType;
use scenebind_common::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// An active attribute or uniform variable of a linked shader program.
pub trait ShaderVariable {
    /// The name of the variable as reported by the linked program.
    fn name(&self) -> &str;

    /// The semantic this variable has been configured with.
    fn semantic(&self) -> VariableSemantic;

    /// Set the semantic of this variable.
    fn set_semantic(&mut self, semantic: VariableSemantic);

    /// The per-semantic index of this variable.
    fn index(&self) -> usize;

    /// Set the per-semantic index of this variable.
    fn set_index(&mut self, index: usize);
}

/// An active uniform variable.
///
/// Implementations own the last value that was written and are expected to skip
/// uploads when a setter is called with the value the uniform already holds.
pub trait ShaderUniform: ShaderVariable {
    /// The reflected type of the uniform.
    fn uniform_type(&self) -> UniformType;

    fn set_float(&mut self, value: f32);
    fn set_vec2(&mut self, value: Vec2);
    fn set_vec3(&mut self, value: Vec3);
    fn set_vec4(&mut self, value: Vec4);
    fn set_mat3(&mut self, value: &Mat3);
    fn set_mat4(&mut self, value: &Mat4);
    fn set_int(&mut self, value: i32);
    fn set_bool(&mut self, value: bool);

    fn set_float_array(&mut self, values: &[f32]);
    fn set_vec2_array(&mut self, values: &[Vec2]);
    fn set_vec3_array(&mut self, values: &[Vec3]);
    fn set_vec4_array(&mut self, values: &[Vec4]);
    fn set_mat3_array(&mut self, values: &[Mat3]);
    fn set_mat4_array(&mut self, values: &[Mat4]);
    fn set_int_array(&mut self, values: &[i32]);
    fn set_bool_array(&mut self, values: &[bool]);

    /// Record that the type of this uniform did not match its semantic.
    ///
    /// Returns `true` only the first time, so the mismatch is reported once.
    fn mark_type_mismatch(&mut self) -> bool;
}
