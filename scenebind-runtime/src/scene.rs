//! Snapshots of the scene state a drawing visitor exposes for the current draw.

use scenebind_common::{
    Color, CombineFunction, CombineOperand, CombineSource, DrawMode, Mat4, TextureEnvMode, Vec3,
    Vec4, VertexContent, BLACK, CLEAR,
};

/// The mesh node currently being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshNodeState {
    /// The per-vertex content present in the mesh.
    pub vertex_content: VertexContent,
    /// Whether vertex normals must be normalized after transformation.
    pub should_normalize_normals: bool,
    /// Whether vertex normals must be rescaled after transformation.
    pub should_rescale_normals: bool,
    /// The topology the mesh is drawn with.
    pub draw_mode: DrawMode,
    /// The color of the node when lighting or materials are not in use.
    pub color: Color,
    /// The bone matrices used to skin this mesh, if it is skinned.
    pub skin_matrices: Vec<Mat4>,
}

impl Default for MeshNodeState {
    fn default() -> Self {
        MeshNodeState {
            vertex_content: VertexContent::LOCATION,
            should_normalize_normals: false,
            should_rescale_normals: false,
            draw_mode: DrawMode::Triangles,
            color: Color::ONE,
            skin_matrices: Vec::new(),
        }
    }
}

impl MeshNodeState {
    pub fn is_drawing_points(&self) -> bool {
        self.draw_mode == DrawMode::Points
    }
}

/// The material of the mesh node currently being drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MaterialState {
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub emission: Color,
    pub opacity: f32,
    pub shininess: f32,
    /// Fragments with an alpha at or below this value are discarded.
    pub minimum_drawn_alpha: f32,
}

impl Default for MaterialState {
    fn default() -> Self {
        MaterialState {
            ambient: Color::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Color::new(0.8, 0.8, 0.8, 1.0),
            specular: BLACK,
            emission: BLACK,
            opacity: 1.0,
            shininess: 0.0,
            minimum_drawn_alpha: 0.0,
        }
    }
}

/// A light in the scene.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightState {
    pub enabled: bool,
    /// Homogeneous global position. A `w` of zero marks a directional light.
    pub position: Vec4,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    /// Constant, linear, and quadratic distance attenuation coefficients.
    pub attenuation: Vec3,
    pub spot_direction: Vec3,
    pub spot_exponent: f32,
    /// The spotlight cutoff angle in degrees. 180 is not a spotlight.
    pub spot_cutoff_angle: f32,
}

impl LightState {
    /// The values reported for a light that does not exist.
    pub const MISSING: LightState = LightState {
        enabled: false,
        position: Vec4::ZERO,
        ambient: BLACK,
        diffuse: BLACK,
        specular: BLACK,
        attenuation: Vec3::new(1.0, 0.0, 0.0),
        spot_direction: Vec3::Z,
        spot_exponent: 0.0,
        spot_cutoff_angle: 180.0,
    };

    /// The cosine of the spotlight cutoff angle.
    pub fn spot_cutoff_angle_cosine(&self) -> f32 {
        self.spot_cutoff_angle.to_radians().cos()
    }
}

impl Default for LightState {
    fn default() -> Self {
        LightState::MISSING
    }
}

/// The fixed-function combiner configuration of a texture unit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextureUnitState {
    pub mode: TextureEnvMode,
    pub constant_color: Color,
    pub combine_rgb: CombineFunction,
    pub combine_alpha: CombineFunction,
    pub rgb_sources: [CombineSource; 3],
    pub alpha_sources: [CombineSource; 3],
    pub rgb_operands: [CombineOperand; 3],
    pub alpha_operands: [CombineOperand; 3],
}

impl TextureUnitState {
    /// The initial state of a texture unit.
    pub const DEFAULT: TextureUnitState = TextureUnitState {
        mode: TextureEnvMode::Modulate,
        constant_color: CLEAR,
        combine_rgb: CombineFunction::Modulate,
        combine_alpha: CombineFunction::Modulate,
        rgb_sources: [
            CombineSource::Texture,
            CombineSource::Previous,
            CombineSource::Constant,
        ],
        alpha_sources: [
            CombineSource::Texture,
            CombineSource::Previous,
            CombineSource::Constant,
        ],
        rgb_operands: [
            CombineOperand::SrcColor,
            CombineOperand::SrcColor,
            CombineOperand::SrcAlpha,
        ],
        alpha_operands: [
            CombineOperand::SrcAlpha,
            CombineOperand::SrcAlpha,
            CombineOperand::SrcAlpha,
        ],
    };
}

impl Default for TextureUnitState {
    fn default() -> Self {
        TextureUnitState::DEFAULT
    }
}

/// The camera the scene is viewed through.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CameraState {
    pub global_position: Vec3,
}

/// How points and point particles are sized and drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointParameters {
    /// The size of points that do not carry a per-vertex size.
    pub size: f32,
    /// Constant, linear, and quadratic distance attenuation coefficients.
    pub size_attenuation: Vec3,
    pub minimum_size: f32,
    pub maximum_size: f32,
    pub size_fade_threshold: f32,
    /// Whether points are drawn as textured sprites.
    pub sprites_enabled: bool,
}

impl Default for PointParameters {
    fn default() -> Self {
        PointParameters {
            size: 1.0,
            size_attenuation: Vec3::new(1.0, 0.0, 0.0),
            minimum_size: 0.0,
            maximum_size: f32::MAX,
            size_fade_threshold: 1.0,
            sprites_enabled: false,
        }
    }
}

/// Scene-wide state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneState {
    pub is_using_lighting: bool,
    pub ambient_light: Color,
    pub points: PointParameters,
}

impl Default for SceneState {
    fn default() -> Self {
        SceneState {
            is_using_lighting: true,
            ambient_light: Color::new(0.2, 0.2, 0.2, 1.0),
            points: PointParameters::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_light_defaults() {
        let light = LightState::default();
        assert!(!light.enabled);
        assert_eq!(light.position, Vec4::ZERO);
        assert_eq!(light.attenuation, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(light.spot_direction, Vec3::Z);
        assert!((light.spot_cutoff_angle_cosine() + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cutoff_cosine() {
        let light = LightState {
            spot_cutoff_angle: 60.0,
            ..LightState::MISSING
        };
        assert!((light.spot_cutoff_angle_cosine() - 0.5).abs() < 1e-6);
    }
}
