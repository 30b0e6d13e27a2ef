use crate::matrix::MatrixKind;
use crate::options::SemanticsOptions;
use crate::scene::{LightState, TextureUnitState};
use crate::visitor::DrawingVisitor;
use scenebind_common::{Color, Vec3, VertexContent, BLACK};
use scenebind_reflect::error::SemanticsError;
use scenebind_reflect::reflect::semantics::{
    ExpectedType, IndexedSemantics, Semantic, UniqueSemantics, VariableSemantic,
    APP_SEMANTIC_NAME, MAX_TEXTURE_UNITS,
};
use scenebind_reflect::reflect::{ShaderUniform, ShaderVariable, TypeInfo};
use std::borrow::Cow;
use std::sync::Arc;

/// Trait that abstracts binding of scene semantics to shader variables.
///
/// A delegate first configures each active variable of a linked program with the
/// semantic it stands for, then populates each uniform from the scene for every draw.
pub trait SemanticsDelegate {
    /// Assign a semantic to the variable if this delegate recognizes it.
    ///
    /// Returns `false` and leaves the variable untouched otherwise.
    fn configure_variable(&self, variable: &mut dyn ShaderVariable) -> bool;

    /// Write the current value of the semantic of the uniform.
    ///
    /// Returns `true` only if a value was written to the uniform.
    fn populate_uniform(
        &self,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool;

    /// A human-readable name for the semantic.
    fn name_of_semantic(&self, semantic: VariableSemantic) -> Cow<'static, str> {
        semantic.name()
    }
}

impl<D: SemanticsDelegate + ?Sized> SemanticsDelegate for &D {
    fn configure_variable(&self, variable: &mut dyn ShaderVariable) -> bool {
        (**self).configure_variable(variable)
    }

    fn populate_uniform(
        &self,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool {
        (**self).populate_uniform(uniform, visitor)
    }

    fn name_of_semantic(&self, semantic: VariableSemantic) -> Cow<'static, str> {
        (**self).name_of_semantic(semantic)
    }
}

impl<D: SemanticsDelegate + ?Sized> SemanticsDelegate for Arc<D> {
    fn configure_variable(&self, variable: &mut dyn ShaderVariable) -> bool {
        (**self).configure_variable(variable)
    }

    fn populate_uniform(
        &self,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool {
        (**self).populate_uniform(uniform, visitor)
    }

    fn name_of_semantic(&self, semantic: VariableSemantic) -> Cow<'static, str> {
        (**self).name_of_semantic(semantic)
    }
}

/// Chains two delegates. The first delegate that handles a variable wins.
impl<A: SemanticsDelegate, B: SemanticsDelegate> SemanticsDelegate for (A, B) {
    fn configure_variable(&self, variable: &mut dyn ShaderVariable) -> bool {
        self.0.configure_variable(variable) || self.1.configure_variable(variable)
    }

    fn populate_uniform(
        &self,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool {
        self.0.populate_uniform(uniform, visitor) || self.1.populate_uniform(uniform, visitor)
    }

    fn name_of_semantic(&self, semantic: VariableSemantic) -> Cow<'static, str> {
        let name = self.0.name_of_semantic(semantic);
        if name == APP_SEMANTIC_NAME {
            return self.1.name_of_semantic(semantic);
        }
        name
    }
}

/// Populates every engine-defined semantic from the drawing visitor.
///
/// `BaseSemantics` does not recognize any variable by itself, and leaves
/// application-specific semantics to other delegates.
#[derive(Debug, Copy, Clone, Default)]
pub struct BaseSemantics {
    options: SemanticsOptions,
}

impl BaseSemantics {
    pub fn new(options: SemanticsOptions) -> Self {
        BaseSemantics { options }
    }

    pub fn options(&self) -> &SemanticsOptions {
        &self.options
    }

    fn validate(&self, expected: ExpectedType, uniform: &dyn ShaderUniform) -> Option<TypeInfo> {
        let info = expected.validate(&uniform.uniform_type())?;
        if expected == ExpectedType::Color && info.size == 3 && !self.options.allow_vec3_colors {
            return None;
        }
        Some(info)
    }

    fn report_type_mismatch(&self, uniform: &mut dyn ShaderUniform, semantic: VariableSemantic) {
        if !self.options.log_type_mismatches || !uniform.mark_type_mismatch() {
            return;
        }

        let error = SemanticsError::InvalidTypeForSemantic {
            name: uniform.name().into(),
            semantic,
            ty: uniform.uniform_type(),
        };
        log::warn!("{error}");
    }

    fn populate_unique(
        &self,
        semantic: UniqueSemantics,
        info: TypeInfo,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool {
        use UniqueSemantics as U;

        let node = visitor.current_mesh_node();
        let has_content = |content: VertexContent| {
            node.is_some_and(|node| node.vertex_content.contains(content))
        };
        let node_color = node.map_or(Color::ONE, |node| node.color);
        let material = visitor.current_material();
        let matrices = visitor.matrices();
        let scene = visitor.scene();

        match semantic {
            U::None
            | U::VertexLocations
            | U::VertexNormals
            | U::VertexColors
            | U::VertexPointSizes
            | U::VertexWeights => return false,

            U::VertexMatrices => {
                let Some(node) = node else {
                    return false;
                };
                let count = node.skin_matrices.len().min(info.elements);
                if count == 0 {
                    return false;
                }
                uniform.set_mat4_array(&node.skin_matrices[..count]);
            }

            U::HasVertexNormal => uniform.set_bool(has_content(VertexContent::NORMAL)),
            U::ShouldNormalizeVertexNormal => {
                uniform.set_bool(node.is_some_and(|node| node.should_normalize_normals))
            }
            U::ShouldRescaleVertexNormal => {
                uniform.set_bool(node.is_some_and(|node| node.should_rescale_normals))
            }
            U::HasVertexColor => uniform.set_bool(has_content(VertexContent::COLOR)),
            U::HasVertexTextureCoordinate => {
                uniform.set_bool(has_content(VertexContent::TEXTURE_COORDINATES))
            }
            U::HasVertexPointSize => uniform.set_bool(has_content(VertexContent::POINT_SIZE)),
            U::IsDrawingPoints => {
                uniform.set_bool(node.is_some_and(|node| node.is_drawing_points()))
            }

            U::ModelMatrix => uniform.set_mat4(&matrices.matrix(MatrixKind::Model)),
            U::ModelMatrixInv => uniform.set_mat4(&matrices.inverse(MatrixKind::Model)),
            U::ModelMatrixInvTran => {
                uniform.set_mat3(&matrices.inverse_transpose(MatrixKind::Model))
            }
            U::ViewMatrix => uniform.set_mat4(&matrices.matrix(MatrixKind::View)),
            U::ViewMatrixInv => uniform.set_mat4(&matrices.inverse(MatrixKind::View)),
            U::ViewMatrixInvTran => uniform.set_mat3(&matrices.inverse_transpose(MatrixKind::View)),
            U::ModelViewMatrix => uniform.set_mat4(&matrices.matrix(MatrixKind::ModelView)),
            U::ModelViewMatrixInv => uniform.set_mat4(&matrices.inverse(MatrixKind::ModelView)),
            U::ModelViewMatrixInvTran => {
                uniform.set_mat3(&matrices.inverse_transpose(MatrixKind::ModelView))
            }
            U::ProjMatrix => uniform.set_mat4(&matrices.matrix(MatrixKind::Proj)),
            U::ProjMatrixInv => uniform.set_mat4(&matrices.inverse(MatrixKind::Proj)),
            U::ProjMatrixInvTran => uniform.set_mat3(&matrices.inverse_transpose(MatrixKind::Proj)),
            U::ModelViewProjMatrix => {
                uniform.set_mat4(&matrices.matrix(MatrixKind::ModelViewProj))
            }
            U::ModelViewProjMatrixInv => {
                uniform.set_mat4(&matrices.inverse(MatrixKind::ModelViewProj))
            }
            U::ModelViewProjMatrixInvTran => {
                uniform.set_mat3(&matrices.inverse_transpose(MatrixKind::ModelViewProj))
            }

            U::CameraPosition => uniform.set_vec3(
                visitor
                    .camera()
                    .map_or(Vec3::ZERO, |camera| camera.global_position),
            ),

            U::Color => {
                let color = match material {
                    Some(material) if scene.is_using_lighting => material.diffuse,
                    _ => node_color,
                };
                set_color(uniform, info, color)
            }
            U::MaterialColorAmbient => {
                set_color(uniform, info, material.map_or(node_color, |m| m.ambient))
            }
            U::MaterialColorDiffuse => {
                set_color(uniform, info, material.map_or(node_color, |m| m.diffuse))
            }
            U::MaterialColorSpecular => {
                set_color(uniform, info, material.map_or(BLACK, |m| m.specular))
            }
            U::MaterialColorEmission => {
                set_color(uniform, info, material.map_or(BLACK, |m| m.emission))
            }
            U::MaterialOpacity => uniform.set_float(material.map_or(node_color.w, |m| m.opacity)),
            U::MaterialShininess => uniform.set_float(material.map_or(0.0, |m| m.shininess)),
            U::MinimumDrawnAlpha => {
                uniform.set_float(material.map_or(0.0, |m| m.minimum_drawn_alpha))
            }

            U::IsUsingLighting => uniform.set_bool(scene.is_using_lighting),
            U::SceneLightColorAmbient => set_color(uniform, info, scene.ambient_light),

            U::TextureCount => {
                uniform.set_int(visitor.texture_unit_count().min(MAX_TEXTURE_UNITS) as i32)
            }
            U::TextureSamplers => {
                let mut samplers = [0i32; MAX_TEXTURE_UNITS];
                for (unit, sampler) in samplers
                    .iter_mut()
                    .take(visitor.texture_unit_count())
                    .enumerate()
                {
                    *sampler = unit as i32;
                }
                uniform.set_int_array(&samplers[..info.elements.min(MAX_TEXTURE_UNITS)]);
            }

            U::PointSize => uniform.set_float(scene.points.size),
            U::PointSizeAttenuation => uniform.set_vec3(scene.points.size_attenuation),
            U::PointSizeMinimum => uniform.set_float(scene.points.minimum_size),
            U::PointSizeMaximum => uniform.set_float(scene.points.maximum_size),
            U::PointSizeFadeThreshold => uniform.set_float(scene.points.size_fade_threshold),
            U::PointSpritesIsEnabled => uniform.set_bool(
                scene.points.sprites_enabled && node.is_some_and(|node| node.is_drawing_points()),
            ),
        }

        true
    }

    fn populate_indexed(
        &self,
        semantic: Semantic<IndexedSemantics>,
        info: TypeInfo,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool {
        use IndexedSemantics as I;

        // the unit comes from the tag, never from the variable index
        let index = semantic.index;
        let light = || visitor.light_at(index).unwrap_or(&LightState::MISSING);
        let unit = || {
            visitor
                .texture_unit(index)
                .filter(|_| index < visitor.texture_unit_count())
                .unwrap_or(&TextureUnitState::DEFAULT)
        };

        match semantic.semantics {
            I::VertexTexture => return false,

            I::LightIsEnabled => uniform.set_bool(light().enabled),
            I::LightPosition => uniform.set_vec4(light().position),
            I::LightColorAmbient => set_color(uniform, info, light().ambient),
            I::LightColorDiffuse => set_color(uniform, info, light().diffuse),
            I::LightColorSpecular => set_color(uniform, info, light().specular),
            I::LightAttenuation => uniform.set_vec3(light().attenuation),
            I::LightSpotDirection => uniform.set_vec3(light().spot_direction),
            I::LightSpotExponent => uniform.set_float(light().spot_exponent),
            I::LightSpotCutoffAngle => uniform.set_float(light().spot_cutoff_angle),
            I::LightSpotCutoffAngleCosine => uniform.set_float(light().spot_cutoff_angle_cosine()),

            I::TexUnitMode => uniform.set_int(unit().mode.into()),
            I::TexUnitConstantColor => set_color(uniform, info, unit().constant_color),
            I::TexUnitCombineRgbFunction => uniform.set_int(unit().combine_rgb.into()),
            I::TexUnitSource0Rgb => uniform.set_int(unit().rgb_sources[0].into()),
            I::TexUnitSource1Rgb => uniform.set_int(unit().rgb_sources[1].into()),
            I::TexUnitSource2Rgb => uniform.set_int(unit().rgb_sources[2].into()),
            I::TexUnitOperand0Rgb => uniform.set_int(unit().rgb_operands[0].into()),
            I::TexUnitOperand1Rgb => uniform.set_int(unit().rgb_operands[1].into()),
            I::TexUnitOperand2Rgb => uniform.set_int(unit().rgb_operands[2].into()),
            I::TexUnitCombineAlphaFunction => uniform.set_int(unit().combine_alpha.into()),
            I::TexUnitSource0Alpha => uniform.set_int(unit().alpha_sources[0].into()),
            I::TexUnitSource1Alpha => uniform.set_int(unit().alpha_sources[1].into()),
            I::TexUnitSource2Alpha => uniform.set_int(unit().alpha_sources[2].into()),
            I::TexUnitOperand0Alpha => uniform.set_int(unit().alpha_operands[0].into()),
            I::TexUnitOperand1Alpha => uniform.set_int(unit().alpha_operands[1].into()),
            I::TexUnitOperand2Alpha => uniform.set_int(unit().alpha_operands[2].into()),
        }

        true
    }
}

impl SemanticsDelegate for BaseSemantics {
    fn configure_variable(&self, _variable: &mut dyn ShaderVariable) -> bool {
        false
    }

    fn populate_uniform(
        &self,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool {
        let semantic = uniform.semantic();

        // attributes and application semantics are never populated here
        let Some(expected) = semantic.expected_type() else {
            return false;
        };

        let Some(info) = self.validate(expected, uniform) else {
            self.report_type_mismatch(uniform, semantic);
            return false;
        };

        match semantic {
            VariableSemantic::Unique(semantic) => {
                self.populate_unique(semantic, info, uniform, visitor)
            }
            VariableSemantic::Indexed(semantic) => {
                self.populate_indexed(semantic, info, uniform, visitor)
            }
            VariableSemantic::App(_) => false,
        }
    }
}

fn set_color(uniform: &mut dyn ShaderUniform, info: TypeInfo, color: Color) {
    if info.size == 3 {
        uniform.set_vec3(color.truncate());
    } else {
        uniform.set_vec4(color);
    }
}
