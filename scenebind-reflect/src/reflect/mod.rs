use std::fmt::{Display, Formatter};

/// Semantic taxonomy of scene quantities.
pub mod semantics;

/// Shader variable capabilities.
pub mod variable;

pub use variable::{ShaderUniform, ShaderVariable};

/// The scalar component type of a reflected uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum UniformBaseType {
    Float,
    Int,
    Bool,
    /// An opaque sampler, set through integer texture unit indices.
    Sampler,
}

/// The reflected type of an active uniform.
///
/// `vecsize` is the number of rows and `columns` the number of columns, so a `mat3`
/// has a `vecsize` and `columns` of 3. `array` is the number of elements as reported
/// by the driver, which is 1 for a uniform that is not an array.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct UniformType {
    pub base: UniformBaseType,
    pub vecsize: u32,
    pub columns: u32,
    pub array: u32,
}

impl UniformType {
    pub const fn float() -> Self {
        Self::new(UniformBaseType::Float, 1, 1)
    }

    pub const fn int() -> Self {
        Self::new(UniformBaseType::Int, 1, 1)
    }

    pub const fn bool() -> Self {
        Self::new(UniformBaseType::Bool, 1, 1)
    }

    pub const fn sampler() -> Self {
        Self::new(UniformBaseType::Sampler, 1, 1)
    }

    /// A float vector of the given size.
    pub const fn vec(size: u32) -> Self {
        Self::new(UniformBaseType::Float, size, 1)
    }

    /// A square float matrix of the given size.
    pub const fn mat(size: u32) -> Self {
        Self::new(UniformBaseType::Float, size, size)
    }

    /// This type as an array of the given length.
    pub const fn array(mut self, len: u32) -> Self {
        self.array = len;
        self
    }

    const fn new(base: UniformBaseType, vecsize: u32, columns: u32) -> Self {
        UniformType {
            base,
            vecsize,
            columns,
            array: 1,
        }
    }

    /// Whether a single element of this type is a single component.
    pub const fn is_scalar(&self) -> bool {
        self.vecsize == 1 && self.columns == 1
    }

    /// The number of 32-bit components in the whole uniform, including every array element.
    pub const fn components(&self) -> usize {
        let array = if self.array == 0 { 1 } else { self.array };
        (self.vecsize * self.columns * array) as usize
    }
}

impl Display for UniformType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.base, self.vecsize, self.columns) {
            (UniformBaseType::Sampler, ..) => f.write_str("sampler")?,
            (UniformBaseType::Int, 1, 1) => f.write_str("int")?,
            (UniformBaseType::Bool, 1, 1) => f.write_str("bool")?,
            (UniformBaseType::Float, 1, 1) => f.write_str("float")?,
            (UniformBaseType::Int, rows, 1) => write!(f, "ivec{rows}")?,
            (UniformBaseType::Bool, rows, 1) => write!(f, "bvec{rows}")?,
            (_, rows, 1) => write!(f, "vec{rows}")?,
            (_, rows, columns) if rows == columns => write!(f, "mat{rows}")?,
            (_, rows, columns) => write!(f, "mat{columns}x{rows}")?,
        }

        if self.array > 1 {
            write!(f, "[{}]", self.array)?;
        }
        Ok(())
    }
}

/// Validated type information for a semantic bound to a uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TypeInfo {
    /// The number of rows of each element.
    pub size: u32,
    /// The number of columns of each element.
    pub columns: u32,
    /// The number of array elements, at least 1.
    pub elements: usize,
}

/// Trait for semantics that can be validated against a reflected uniform type.
pub trait ValidateTypeSemantics<T> {
    /// Validate the type with the given semantic.
    fn validate_type(&self, ty: &T) -> Option<TypeInfo>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn displays_glsl_names() {
        assert_eq!(UniformType::mat(4).to_string(), "mat4");
        assert_eq!(UniformType::vec(3).to_string(), "vec3");
        assert_eq!(UniformType::bool().to_string(), "bool");
        assert_eq!(UniformType::sampler().array(8).to_string(), "sampler[8]");
        assert_eq!(UniformType::float().to_string(), "float");
    }

    #[test]
    fn counts_components() {
        assert_eq!(UniformType::mat(3).components(), 9);
        assert_eq!(UniformType::mat(4).array(2).components(), 32);
        assert_eq!(UniformType::int().array(0).components(), 1);
    }
}
