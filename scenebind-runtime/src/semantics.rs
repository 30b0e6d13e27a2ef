use crate::binding::{BaseSemantics, SemanticsDelegate};
use crate::options::SemanticsOptions;
use crate::visitor::DrawingVisitor;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use scenebind_common::map::{FastHashMap, ShortString};
use scenebind_reflect::reflect::semantics::{
    IndexedSemantics, UniqueSemantics, VariableSemantic, MAX_LIGHTS, MAX_TEXTURE_UNITS,
};
use scenebind_reflect::reflect::{ShaderUniform, ShaderVariable};
use std::borrow::Cow;
use std::sync::Arc;

/// The semantic and index a shader variable of a given name is configured with.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VariableConfiguration {
    pub name: ShortString,
    pub semantic: VariableSemantic,
    /// Stamped on the variable. Does not select the unit of an indexed semantic.
    pub index: usize,
}

impl VariableConfiguration {
    pub fn new(name: impl Into<ShortString>, semantic: impl Into<VariableSemantic>) -> Self {
        let semantic = semantic.into();
        let index = match semantic {
            VariableSemantic::Indexed(semantic) => semantic.index,
            _ => 0,
        };

        VariableConfiguration {
            name: name.into(),
            semantic,
            index,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

/// Configures shader variables by looking up their name.
///
/// Uniforms are populated by the contained [`BaseSemantics`].
#[derive(Debug, Clone, Default)]
pub struct VarNameSemantics {
    base: BaseSemantics,
    configurations: FastHashMap<ShortString, VariableConfiguration>,
}

impl VarNameSemantics {
    /// Create an empty name registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a name registry holding every default variable name.
    pub fn with_defaults() -> Self {
        let mut semantics = Self::new();
        semantics.populate_defaults();
        semantics
    }

    pub fn with_options(mut self, options: SemanticsOptions) -> Self {
        self.base = BaseSemantics::new(options);
        self
    }

    /// The populator uniforms are forwarded to.
    pub fn base(&self) -> &BaseSemantics {
        &self.base
    }

    /// Insert a configuration, replacing any previous configuration of the same name.
    pub fn add_configuration(&mut self, configuration: VariableConfiguration) {
        self.configurations
            .insert(configuration.name.clone(), configuration);
    }

    /// Map a variable name to a semantic.
    pub fn map_name(&mut self, name: impl Into<ShortString>, semantic: impl Into<VariableSemantic>) {
        self.add_configuration(VariableConfiguration::new(name, semantic));
    }

    /// Map a variable name to a semantic with an explicit per-semantic index.
    ///
    /// The index is stamped on configured variables for the application to read.
    /// Indexed semantics are always populated from the unit their tag encodes.
    pub fn map_name_indexed(
        &mut self,
        name: impl Into<ShortString>,
        semantic: impl Into<VariableSemantic>,
        index: usize,
    ) {
        self.add_configuration(VariableConfiguration::new(name, semantic).with_index(index));
    }

    /// Get the configuration of the given variable name.
    pub fn configuration(&self, name: &str) -> Option<&VariableConfiguration> {
        self.configurations.get(name)
    }

    /// Iterate over every configuration in no particular order.
    pub fn configurations(&self) -> impl Iterator<Item = &VariableConfiguration> {
        self.configurations.values()
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Add the default variable names shader authors can rely on.
    pub fn populate_defaults(&mut self) {
        use IndexedSemantics as I;
        use UniqueSemantics as U;

        // attributes
        self.map_name("a_cc3Position", U::VertexLocations);
        self.map_name("a_cc3Normal", U::VertexNormals);
        self.map_name("a_cc3Color", U::VertexColors);
        self.map_name("a_cc3PointSize", U::VertexPointSizes);
        self.map_name("a_cc3Weight", U::VertexWeights);
        self.map_name("a_cc3Matrix", U::VertexMatrices);
        self.map_name("a_cc3TexCoord", I::VertexTexture.semantics(0));
        for unit in 0..MAX_TEXTURE_UNITS {
            self.map_name(
                format!("a_cc3TexCoord{unit}"),
                I::VertexTexture.semantics(unit),
            );
        }

        // vertex content
        self.map_name("u_cc3VertexHasNormal", U::HasVertexNormal);
        self.map_name("u_cc3VertexShouldNormalizeNormal", U::ShouldNormalizeVertexNormal);
        self.map_name("u_cc3VertexShouldRescaleNormal", U::ShouldRescaleVertexNormal);
        self.map_name("u_cc3VertexHasColor", U::HasVertexColor);
        self.map_name("u_cc3VertexHasTexCoord", U::HasVertexTextureCoordinate);
        self.map_name("u_cc3VertexHasPointSize", U::HasVertexPointSize);
        self.map_name("u_cc3IsDrawingPoints", U::IsDrawingPoints);
        self.map_name("u_cc3VertexMatrices", U::VertexMatrices);
        self.map_name("u_cc3VertexMatrices[0]", U::VertexMatrices);

        // environment matrices
        for (name, semantic) in [
            ("model", U::ModelMatrix),
            ("modelInv", U::ModelMatrixInv),
            ("modelInvTran", U::ModelMatrixInvTran),
            ("view", U::ViewMatrix),
            ("viewInv", U::ViewMatrixInv),
            ("viewInvTran", U::ViewMatrixInvTran),
            ("modelView", U::ModelViewMatrix),
            ("modelViewInv", U::ModelViewMatrixInv),
            ("modelViewInvTran", U::ModelViewMatrixInvTran),
            ("proj", U::ProjMatrix),
            ("projInv", U::ProjMatrixInv),
            ("projInvTran", U::ProjMatrixInvTran),
            ("modelViewProj", U::ModelViewProjMatrix),
            ("modelViewProjInv", U::ModelViewProjMatrixInv),
            ("modelViewProjInvTran", U::ModelViewProjMatrixInvTran),
        ] {
            self.map_name(format!("u_cc3Matrices.{name}"), semantic);
        }

        self.map_name("u_cc3CameraPosition", U::CameraPosition);

        // material
        self.map_name("u_cc3Color", U::Color);
        for (name, semantic) in [
            ("ambientColor", U::MaterialColorAmbient),
            ("diffuseColor", U::MaterialColorDiffuse),
            ("specularColor", U::MaterialColorSpecular),
            ("emissionColor", U::MaterialColorEmission),
            ("opacity", U::MaterialOpacity),
            ("shininess", U::MaterialShininess),
            ("minimumDrawnAlpha", U::MinimumDrawnAlpha),
        ] {
            self.map_name(format!("u_cc3Material.{name}"), semantic);
        }

        // lighting
        self.map_name("u_cc3IsUsingLighting", U::IsUsingLighting);
        self.map_name("u_cc3SceneLightColorAmbient", U::SceneLightColorAmbient);
        for light in 0..MAX_LIGHTS {
            for (name, family) in [
                ("isEnabled", I::LightIsEnabled),
                ("position", I::LightPosition),
                ("ambientColor", I::LightColorAmbient),
                ("diffuseColor", I::LightColorDiffuse),
                ("specularColor", I::LightColorSpecular),
                ("attenuation", I::LightAttenuation),
                ("spotDirection", I::LightSpotDirection),
                ("spotExponent", I::LightSpotExponent),
                ("spotCutoffAngle", I::LightSpotCutoffAngle),
                ("spotCutoffAngleCosine", I::LightSpotCutoffAngleCosine),
            ] {
                self.map_name(
                    format!("u_cc3Lights[{light}].{name}"),
                    family.semantics(light),
                );
            }
        }

        // textures
        self.map_name("u_cc3TextureCount", U::TextureCount);
        self.map_name("s_cc3Textures", U::TextureSamplers);
        self.map_name("s_cc3Textures[0]", U::TextureSamplers);
        for unit in 0..MAX_TEXTURE_UNITS {
            for (name, family) in [
                ("mode", I::TexUnitMode),
                ("constantColor", I::TexUnitConstantColor),
                ("combineRGBFunction", I::TexUnitCombineRgbFunction),
                ("rgbSource0", I::TexUnitSource0Rgb),
                ("rgbSource1", I::TexUnitSource1Rgb),
                ("rgbSource2", I::TexUnitSource2Rgb),
                ("rgbOperand0", I::TexUnitOperand0Rgb),
                ("rgbOperand1", I::TexUnitOperand1Rgb),
                ("rgbOperand2", I::TexUnitOperand2Rgb),
                ("combineAlphaFunction", I::TexUnitCombineAlphaFunction),
                ("alphaSource0", I::TexUnitSource0Alpha),
                ("alphaSource1", I::TexUnitSource1Alpha),
                ("alphaSource2", I::TexUnitSource2Alpha),
                ("alphaOperand0", I::TexUnitOperand0Alpha),
                ("alphaOperand1", I::TexUnitOperand1Alpha),
                ("alphaOperand2", I::TexUnitOperand2Alpha),
            ] {
                self.map_name(
                    format!("u_cc3TextureUnits[{unit}].{name}"),
                    family.semantics(unit),
                );
            }
        }

        // points
        for (name, semantic) in [
            ("size", U::PointSize),
            ("sizeAttenuation", U::PointSizeAttenuation),
            ("minimumSize", U::PointSizeMinimum),
            ("maximumSize", U::PointSizeMaximum),
            ("sizeFadeThreshold", U::PointSizeFadeThreshold),
            ("isSpriteEnabled", U::PointSpritesIsEnabled),
        ] {
            self.map_name(format!("u_cc3Points.{name}"), semantic);
        }

        log::debug!("{} default semantic names registered", self.len());
    }
}

impl SemanticsDelegate for VarNameSemantics {
    fn configure_variable(&self, variable: &mut dyn ShaderVariable) -> bool {
        let Some(configuration) = self.configurations.get(variable.name()) else {
            return false;
        };

        variable.set_semantic(configuration.semantic);
        variable.set_index(configuration.index);
        true
    }

    fn populate_uniform(
        &self,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool {
        self.base.populate_uniform(uniform, visitor)
    }
}

/// A name registry that can be shared between programs and mutated in place.
///
/// Reads never block. A mutation clones the registry and publishes the modified
/// copy, so it is visible to every program configured afterwards. Mutating a registry
/// while programs are being configured or drawn gives no guarantee which registry
/// each program observes.
pub struct SharedSemantics {
    semantics: ArcSwap<VarNameSemantics>,
}

impl SharedSemantics {
    pub fn new(semantics: VarNameSemantics) -> Self {
        SharedSemantics {
            semantics: ArcSwap::new(Arc::new(semantics)),
        }
    }

    /// Get a snapshot of the current registry.
    pub fn load(&self) -> Arc<VarNameSemantics> {
        self.semantics.load_full()
    }

    /// Modify the registry.
    ///
    /// This is a relatively slow operation as the whole registry is copied.
    pub fn update(&self, f: impl FnOnce(&mut VarNameSemantics)) {
        let mut updated = VarNameSemantics::clone(&self.semantics.load());
        f(&mut updated);
        self.semantics.store(Arc::new(updated));
    }

    pub fn add_configuration(&self, configuration: VariableConfiguration) {
        self.update(|semantics| semantics.add_configuration(configuration))
    }

    pub fn map_name(&self, name: impl Into<ShortString>, semantic: impl Into<VariableSemantic>) {
        let configuration = VariableConfiguration::new(name, semantic);
        self.add_configuration(configuration)
    }

    pub fn map_name_indexed(
        &self,
        name: impl Into<ShortString>,
        semantic: impl Into<VariableSemantic>,
        index: usize,
    ) {
        let configuration = VariableConfiguration::new(name, semantic).with_index(index);
        self.add_configuration(configuration)
    }

    pub fn populate_defaults(&self) {
        self.update(VarNameSemantics::populate_defaults)
    }
}

impl Default for SharedSemantics {
    fn default() -> Self {
        SharedSemantics::new(VarNameSemantics::default())
    }
}

impl SemanticsDelegate for SharedSemantics {
    fn configure_variable(&self, variable: &mut dyn ShaderVariable) -> bool {
        self.semantics.load().configure_variable(variable)
    }

    fn populate_uniform(
        &self,
        uniform: &mut dyn ShaderUniform,
        visitor: &dyn DrawingVisitor,
    ) -> bool {
        self.semantics.load().populate_uniform(uniform, visitor)
    }

    fn name_of_semantic(&self, semantic: VariableSemantic) -> Cow<'static, str> {
        self.semantics.load().name_of_semantic(semantic)
    }
}

static SHARED_DEFAULT: Lazy<SharedSemantics> =
    Lazy::new(|| SharedSemantics::new(VarNameSemantics::with_defaults()));

/// The process-wide registry of default variable names.
///
/// It is created with the default names on first access. Changes made through
/// [`SharedSemantics::update`] affect every program configured with it afterwards.
pub fn shared_default() -> &'static SharedSemantics {
    &SHARED_DEFAULT
}
