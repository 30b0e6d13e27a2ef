//! Common types shared between the scenebind crates.

pub mod map;

use bitflags::bitflags;

pub use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// An RGBA color with floating point components.
pub type Color = Vec4;

/// Opaque black, the color of anything that emits or reflects nothing.
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Fully transparent black.
pub const CLEAR: Color = Color::ZERO;

bitflags! {
    /// The kinds of per-vertex content available in a mesh.
    #[derive(Default)]
    pub struct VertexContent: u16 {
        const LOCATION = 0b0000_0001;
        const NORMAL = 0b0000_0010;
        const COLOR = 0b0000_0100;
        const POINT_SIZE = 0b0000_1000;
        const TEXTURE_COORDINATES = 0b0001_0000;
    }
}

/// The primitive topology a mesh is drawn with.
#[repr(u32)]
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub enum DrawMode {
    Points = 0x0000,
    Lines = 0x0001,
    LineLoop = 0x0002,
    LineStrip = 0x0003,
    #[default]
    Triangles = 0x0004,
    TriangleStrip = 0x0005,
    TriangleFan = 0x0006,
}

/// The fixed-function texture environment mode of a texture unit.
#[repr(i32)]
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub enum TextureEnvMode {
    Add = 0x0104,
    Blend = 0x0BE2,
    Combine = 0x8570,
    Decal = 0x2101,
    #[default]
    Modulate = 0x2100,
    Replace = 0x1E01,
}

/// The function used to combine sources when a texture unit is in combine mode.
#[repr(i32)]
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub enum CombineFunction {
    Replace = 0x1E01,
    #[default]
    Modulate = 0x2100,
    Add = 0x0104,
    AddSigned = 0x8574,
    Interpolate = 0x8575,
    Subtract = 0x84E7,
    Dot3Rgb = 0x86AE,
    Dot3Rgba = 0x86AF,
}

/// An input to a texture unit combiner.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CombineSource {
    Texture = 0x1702,
    Constant = 0x8576,
    PrimaryColor = 0x8577,
    Previous = 0x8578,
}

/// Which part of a combiner source is fed into the combiner function.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CombineOperand {
    SrcColor = 0x0300,
    OneMinusSrcColor = 0x0301,
    SrcAlpha = 0x0302,
    OneMinusSrcAlpha = 0x0303,
}

macro_rules! impl_gl_enum {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for i32 {
                fn from(value: $ty) -> Self {
                    value as i32
                }
            }
        )*
    };
}

impl_gl_enum!(TextureEnvMode, CombineFunction, CombineSource, CombineOperand);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gl_enum_values() {
        assert_eq!(i32::from(TextureEnvMode::Modulate), 0x2100);
        assert_eq!(i32::from(CombineSource::Previous), 0x8578);
        assert_eq!(i32::from(CombineOperand::SrcAlpha), 0x0302);
        assert_eq!(DrawMode::default(), DrawMode::Triangles);
    }

    #[test]
    fn vertex_content_defaults_empty() {
        let content = VertexContent::default();
        assert!(content.is_empty());
        assert!((VertexContent::LOCATION | VertexContent::NORMAL).contains(VertexContent::NORMAL));
    }
}
