use bytemuck::Pod;
use scenebind_common::map::ShortString;
use scenebind_common::{Mat3, Mat4, Vec2, Vec3, Vec4};
use scenebind_reflect::reflect::semantics::VariableSemantic;
use scenebind_reflect::reflect::{ShaderUniform, ShaderVariable, UniformType};
use std::marker::PhantomData;

/// Hook to upload a changed uniform value to the graphics driver.
pub trait UploadUniform<T: ?Sized> {
    fn upload_uniform(location: i32, value: &T);
}

/// An upload hook that does nothing, for uniforms whose values are only tracked.
pub struct NoUniformUpload;
impl<T: ?Sized> UploadUniform<T> for NoUniformUpload {
    fn upload_uniform(_: i32, _: &T) {}
}

/// Upload hooks for every value type a uniform can hold.
///
/// Booleans are uploaded as integers.
pub trait UniformUploader:
    UploadUniform<f32>
    + UploadUniform<i32>
    + UploadUniform<Vec2>
    + UploadUniform<Vec3>
    + UploadUniform<Vec4>
    + UploadUniform<Mat3>
    + UploadUniform<Mat4>
    + UploadUniform<[f32]>
    + UploadUniform<[i32]>
    + UploadUniform<[Vec2]>
    + UploadUniform<[Vec3]>
    + UploadUniform<[Vec4]>
    + UploadUniform<[Mat3]>
    + UploadUniform<[Mat4]>
{
}

impl<H> UniformUploader for H where
    H: UploadUniform<f32>
        + UploadUniform<i32>
        + UploadUniform<Vec2>
        + UploadUniform<Vec3>
        + UploadUniform<Vec4>
        + UploadUniform<Mat3>
        + UploadUniform<Mat4>
        + UploadUniform<[f32]>
        + UploadUniform<[i32]>
        + UploadUniform<[Vec2]>
        + UploadUniform<[Vec3]>
        + UploadUniform<[Vec4]>
        + UploadUniform<[Mat3]>
        + UploadUniform<[Mat4]>
{
}

/// An active vertex attribute of a linked program.
#[derive(Debug, Clone)]
pub struct GlslAttribute {
    name: ShortString,
    location: i32,
    semantic: VariableSemantic,
    index: usize,
}

impl GlslAttribute {
    pub fn new(name: impl Into<ShortString>, location: i32) -> Self {
        GlslAttribute {
            name: name.into(),
            location,
            semantic: VariableSemantic::NONE,
            index: 0,
        }
    }

    pub fn location(&self) -> i32 {
        self.location
    }
}

impl ShaderVariable for GlslAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn semantic(&self) -> VariableSemantic {
        self.semantic
    }

    fn set_semantic(&mut self, semantic: VariableSemantic) {
        self.semantic = semantic;
    }

    fn index(&self) -> usize {
        self.index
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

/// An active uniform of a linked program.
///
/// The uniform keeps the last value written to it as raw 32-bit words, and only
/// forwards a write to the upload hook `H` when the value differs.
pub struct GlslUniform<H = NoUniformUpload> {
    name: ShortString,
    location: i32,
    ty: UniformType,
    semantic: VariableSemantic,
    index: usize,
    value: Box<[u32]>,
    changed: bool,
    mismatch_reported: bool,
    _h: PhantomData<H>,
}

impl<H> GlslUniform<H> {
    pub fn new(name: impl Into<ShortString>, location: i32, ty: UniformType) -> Self {
        GlslUniform {
            name: name.into(),
            location,
            ty,
            semantic: VariableSemantic::NONE,
            index: 0,
            value: vec![0u32; ty.components()].into_boxed_slice(),
            changed: false,
            mismatch_reported: false,
            _h: PhantomData,
        }
    }

    pub fn location(&self) -> i32 {
        self.location
    }

    /// Whether the most recent write changed the value of this uniform.
    pub fn was_changed(&self) -> bool {
        self.changed
    }

    /// The current value as float components.
    pub fn floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.value)
    }

    /// The current value as integer components.
    pub fn ints(&self) -> &[i32] {
        bytemuck::cast_slice(&self.value)
    }

    fn store(&mut self, words: impl ExactSizeIterator<Item = u32>) -> bool {
        let len = words.len();
        if self.value.len() < len {
            let mut grown = vec![0u32; len];
            grown[..self.value.len()].copy_from_slice(&self.value);
            self.value = grown.into_boxed_slice();
        }

        let mut changed = false;
        for (slot, word) in self.value[..len].iter_mut().zip(words) {
            changed |= *slot != word;
            *slot = word;
        }

        self.changed = changed;
        changed
    }
}

impl<H: UniformUploader> GlslUniform<H> {
    #[inline(always)]
    fn write<T: Pod>(&mut self, value: &T)
    where
        H: UploadUniform<T>,
    {
        let words: &[u32] = bytemuck::cast_slice(std::slice::from_ref(value));
        if self.store(words.iter().copied()) {
            H::upload_uniform(self.location, value);
        }
    }

    #[inline(always)]
    fn write_array<T: Pod>(&mut self, values: &[T])
    where
        H: UploadUniform<[T]>,
    {
        let words: &[u32] = bytemuck::cast_slice(values);
        if self.store(words.iter().copied()) {
            H::upload_uniform(self.location, values);
        }
    }
}

impl<H> ShaderVariable for GlslUniform<H> {
    fn name(&self) -> &str {
        &self.name
    }

    fn semantic(&self) -> VariableSemantic {
        self.semantic
    }

    fn set_semantic(&mut self, semantic: VariableSemantic) {
        self.semantic = semantic;
    }

    fn index(&self) -> usize {
        self.index
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }
}

impl<H: UniformUploader> ShaderUniform for GlslUniform<H> {
    fn uniform_type(&self) -> UniformType {
        self.ty
    }

    fn set_float(&mut self, value: f32) {
        self.write(&value)
    }

    fn set_vec2(&mut self, value: Vec2) {
        self.write(&value)
    }

    fn set_vec3(&mut self, value: Vec3) {
        self.write(&value)
    }

    fn set_vec4(&mut self, value: Vec4) {
        self.write(&value)
    }

    fn set_mat3(&mut self, value: &Mat3) {
        self.write(value)
    }

    fn set_mat4(&mut self, value: &Mat4) {
        self.write(value)
    }

    fn set_int(&mut self, value: i32) {
        self.write(&value)
    }

    fn set_bool(&mut self, value: bool) {
        self.write(&(value as i32))
    }

    fn set_float_array(&mut self, values: &[f32]) {
        self.write_array(values)
    }

    fn set_vec2_array(&mut self, values: &[Vec2]) {
        self.write_array(values)
    }

    fn set_vec3_array(&mut self, values: &[Vec3]) {
        self.write_array(values)
    }

    fn set_vec4_array(&mut self, values: &[Vec4]) {
        self.write_array(values)
    }

    fn set_mat3_array(&mut self, values: &[Mat3]) {
        self.write_array(values)
    }

    fn set_mat4_array(&mut self, values: &[Mat4]) {
        self.write_array(values)
    }

    fn set_int_array(&mut self, values: &[i32]) {
        self.write_array(values)
    }

    fn set_bool_array(&mut self, values: &[bool]) {
        if self.store(values.iter().map(|value| *value as u32)) {
            let words: &[i32] = bytemuck::cast_slice(&self.value[..values.len()]);
            H::upload_uniform(self.location, words);
        }
    }

    fn mark_type_mismatch(&mut self) -> bool {
        !std::mem::replace(&mut self.mismatch_reported, true)
    }
}
