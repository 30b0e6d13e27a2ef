use crate::error::SemanticsError;
use crate::reflect::{TypeInfo, UniformBaseType, UniformType, ValidateTypeSemantics};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// The maximum number of texture units an indexed texture semantic can address.
pub const MAX_TEXTURE_UNITS: usize = 8;

/// The maximum number of lights an indexed light semantic can address.
pub const MAX_LIGHTS: usize = 8;

/// The first tag of the range reserved for application-specific semantics.
///
/// The engine never assigns a tag at or above this value.
pub const SEMANTIC_APP_BASE: u16 = 264;

/// The last tag of the range reserved for application-specific semantics.
pub const SEMANTIC_MAX: u16 = 0xFFFF;

/// The name returned for any tag within the application-specific range.
pub const APP_SEMANTIC_NAME: &str = "AppSpecificSemantic";

/// The name returned for a raw tag that does not fit in the semantic range.
pub const UNRECOGNIZED_SEMANTIC_NAME: &str = "UnrecognizedSemantic";

/// Semantics that identify a single scene quantity.
///
/// The discriminant of each variant is its tag as seen by shader authors.
#[repr(u16)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum UniqueSemantics {
    /// No semantic meaning assigned.
    None = 0,

    // attribute, vec3/vec4
    VertexLocations = 1,
    // attribute, vec3
    VertexNormals = 2,
    // attribute, vec4
    VertexColors = 3,
    // attribute, float
    VertexPointSizes = 4,
    // attribute, vecN
    VertexWeights = 5,
    // mat4[], skinning palette
    VertexMatrices = 6,

    // bool
    HasVertexNormal = 15,
    ShouldNormalizeVertexNormal = 16,
    ShouldRescaleVertexNormal = 17,
    HasVertexColor = 18,
    HasVertexTextureCoordinate = 19,
    HasVertexPointSize = 20,
    IsDrawingPoints = 21,

    // mat4, except inverse-transposes which are mat3
    ModelMatrix = 22,
    ModelMatrixInv = 23,
    ModelMatrixInvTran = 24,
    ViewMatrix = 25,
    ViewMatrixInv = 26,
    ViewMatrixInvTran = 27,
    ModelViewMatrix = 28,
    ModelViewMatrixInv = 29,
    ModelViewMatrixInvTran = 30,
    ProjMatrix = 31,
    ProjMatrixInv = 32,
    ProjMatrixInvTran = 33,
    ModelViewProjMatrix = 34,
    ModelViewProjMatrixInv = 35,
    ModelViewProjMatrixInvTran = 36,

    // vec3
    CameraPosition = 37,

    /// Color of the node when lighting or materials are not in use.
    Color = 38,
    MaterialColorAmbient = 39,
    MaterialColorDiffuse = 40,
    MaterialColorSpecular = 41,
    MaterialColorEmission = 42,
    // float
    MaterialOpacity = 43,
    MaterialShininess = 44,
    MinimumDrawnAlpha = 45,

    // bool
    IsUsingLighting = 46,
    SceneLightColorAmbient = 47,

    // int
    TextureCount = 128,
    // sampler[MAX_TEXTURE_UNITS]
    TextureSamplers = 129,

    // float
    PointSize = 258,
    // vec3
    PointSizeAttenuation = 259,
    PointSizeMinimum = 260,
    PointSizeMaximum = 261,
    PointSizeFadeThreshold = 262,
    // bool
    PointSpritesIsEnabled = 263,
}

/// Families of semantics that are addressed by a unit index.
///
/// The discriminant of each family is the tag of its unit 0. Every family reserves
/// a run of consecutive tags, so that the tag minus the family base is the unit index.
#[repr(u16)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum IndexedSemantics {
    /// Vertex texture coordinates for a texture unit.
    VertexTexture = 7,

    LightIsEnabled = 48,
    LightPosition = 56,
    LightColorAmbient = 64,
    LightColorDiffuse = 72,
    LightColorSpecular = 80,
    LightAttenuation = 88,
    LightSpotDirection = 96,
    LightSpotExponent = 104,
    LightSpotCutoffAngle = 112,
    LightSpotCutoffAngleCosine = 120,

    TexUnitMode = 130,
    TexUnitConstantColor = 138,
    TexUnitCombineRgbFunction = 146,
    TexUnitSource0Rgb = 154,
    TexUnitSource1Rgb = 162,
    TexUnitSource2Rgb = 170,
    TexUnitOperand0Rgb = 178,
    TexUnitOperand1Rgb = 186,
    TexUnitOperand2Rgb = 194,
    TexUnitCombineAlphaFunction = 202,
    TexUnitSource0Alpha = 210,
    TexUnitSource1Alpha = 218,
    TexUnitSource2Alpha = 226,
    TexUnitOperand0Alpha = 234,
    TexUnitOperand1Alpha = 242,
    TexUnitOperand2Alpha = 250,
}

/// The kind of scene object an indexed semantic family addresses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SemanticFamily {
    VertexTexture,
    Light,
    TextureUnit,
}

/// A semantic paired with the index of the unit it refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Semantic<T, I = usize> {
    /// The semantic family.
    pub semantics: T,
    /// The index of the unit.
    pub index: I,
}

/// The meaning a shader variable has been given.
///
/// This is a closed set of engine-defined meanings, with an escape hatch for tags that
/// fall in the application-reserved range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VariableSemantic {
    /// A non-indexed engine semantic.
    Unique(UniqueSemantics),
    /// A semantic from an indexed family.
    Indexed(Semantic<IndexedSemantics>),
    /// An application-specific tag in `[SEMANTIC_APP_BASE, SEMANTIC_MAX]`.
    App(u16),
}

/// The shape of uniform a semantic is populated into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExpectedType {
    Bool,
    Int,
    Float,
    Vec3,
    Vec4,
    /// A vec4 color, or its rgb part as a vec3.
    Color,
    Mat3,
    Mat4,
    /// An int or sampler array, one entry per texture unit.
    SamplerArray,
    /// An array of mat4.
    Mat4Array,
}

impl UniqueSemantics {
    /// Every unique semantic, in ascending tag order.
    pub const ALL: [UniqueSemantics; 48] = [
        UniqueSemantics::None,
        UniqueSemantics::VertexLocations,
        UniqueSemantics::VertexNormals,
        UniqueSemantics::VertexColors,
        UniqueSemantics::VertexPointSizes,
        UniqueSemantics::VertexWeights,
        UniqueSemantics::VertexMatrices,
        UniqueSemantics::HasVertexNormal,
        UniqueSemantics::ShouldNormalizeVertexNormal,
        UniqueSemantics::ShouldRescaleVertexNormal,
        UniqueSemantics::HasVertexColor,
        UniqueSemantics::HasVertexTextureCoordinate,
        UniqueSemantics::HasVertexPointSize,
        UniqueSemantics::IsDrawingPoints,
        UniqueSemantics::ModelMatrix,
        UniqueSemantics::ModelMatrixInv,
        UniqueSemantics::ModelMatrixInvTran,
        UniqueSemantics::ViewMatrix,
        UniqueSemantics::ViewMatrixInv,
        UniqueSemantics::ViewMatrixInvTran,
        UniqueSemantics::ModelViewMatrix,
        UniqueSemantics::ModelViewMatrixInv,
        UniqueSemantics::ModelViewMatrixInvTran,
        UniqueSemantics::ProjMatrix,
        UniqueSemantics::ProjMatrixInv,
        UniqueSemantics::ProjMatrixInvTran,
        UniqueSemantics::ModelViewProjMatrix,
        UniqueSemantics::ModelViewProjMatrixInv,
        UniqueSemantics::ModelViewProjMatrixInvTran,
        UniqueSemantics::CameraPosition,
        UniqueSemantics::Color,
        UniqueSemantics::MaterialColorAmbient,
        UniqueSemantics::MaterialColorDiffuse,
        UniqueSemantics::MaterialColorSpecular,
        UniqueSemantics::MaterialColorEmission,
        UniqueSemantics::MaterialOpacity,
        UniqueSemantics::MaterialShininess,
        UniqueSemantics::MinimumDrawnAlpha,
        UniqueSemantics::IsUsingLighting,
        UniqueSemantics::SceneLightColorAmbient,
        UniqueSemantics::TextureCount,
        UniqueSemantics::TextureSamplers,
        UniqueSemantics::PointSize,
        UniqueSemantics::PointSizeAttenuation,
        UniqueSemantics::PointSizeMinimum,
        UniqueSemantics::PointSizeMaximum,
        UniqueSemantics::PointSizeFadeThreshold,
        UniqueSemantics::PointSpritesIsEnabled,
    ];

    /// The number of unique semantics.
    pub const COUNT: usize = Self::ALL.len();

    /// Iterate over every unique semantic in ascending tag order.
    pub fn iter() -> impl Iterator<Item = UniqueSemantics> {
        Self::ALL.iter().copied()
    }

    /// Look up the unique semantic with the given tag.
    pub fn from_tag(tag: u16) -> Option<UniqueSemantics> {
        Self::ALL
            .binary_search_by_key(&tag, |s| *s as u16)
            .ok()
            .map(|index| Self::ALL[index])
    }

    /// The tag of this semantic.
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// The uniform shape this semantic is populated into, if it is populated at all.
    pub const fn expected_type(self) -> Option<ExpectedType> {
        use UniqueSemantics as U;
        Some(match self {
            U::None
            | U::VertexLocations
            | U::VertexNormals
            | U::VertexColors
            | U::VertexPointSizes
            | U::VertexWeights => return None,
            U::VertexMatrices => ExpectedType::Mat4Array,
            U::HasVertexNormal
            | U::ShouldNormalizeVertexNormal
            | U::ShouldRescaleVertexNormal
            | U::HasVertexColor
            | U::HasVertexTextureCoordinate
            | U::HasVertexPointSize
            | U::IsDrawingPoints
            | U::IsUsingLighting
            | U::PointSpritesIsEnabled => ExpectedType::Bool,
            U::ModelMatrix
            | U::ModelMatrixInv
            | U::ViewMatrix
            | U::ViewMatrixInv
            | U::ModelViewMatrix
            | U::ModelViewMatrixInv
            | U::ProjMatrix
            | U::ProjMatrixInv
            | U::ModelViewProjMatrix
            | U::ModelViewProjMatrixInv => ExpectedType::Mat4,
            U::ModelMatrixInvTran
            | U::ViewMatrixInvTran
            | U::ModelViewMatrixInvTran
            | U::ProjMatrixInvTran
            | U::ModelViewProjMatrixInvTran => ExpectedType::Mat3,
            U::CameraPosition | U::PointSizeAttenuation => ExpectedType::Vec3,
            U::Color
            | U::MaterialColorAmbient
            | U::MaterialColorDiffuse
            | U::MaterialColorSpecular
            | U::MaterialColorEmission
            | U::SceneLightColorAmbient => ExpectedType::Color,
            U::MaterialOpacity
            | U::MaterialShininess
            | U::MinimumDrawnAlpha
            | U::PointSize
            | U::PointSizeMinimum
            | U::PointSizeMaximum
            | U::PointSizeFadeThreshold => ExpectedType::Float,
            U::TextureCount => ExpectedType::Int,
            U::TextureSamplers => ExpectedType::SamplerArray,
        })
    }

    /// A stable human-readable name for this semantic.
    pub const fn name(self) -> &'static str {
        use UniqueSemantics as U;
        match self {
            U::None => "None",
            U::VertexLocations => "VertexLocations",
            U::VertexNormals => "VertexNormals",
            U::VertexColors => "VertexColors",
            U::VertexPointSizes => "VertexPointSizes",
            U::VertexWeights => "VertexWeights",
            U::VertexMatrices => "VertexMatrices",
            U::HasVertexNormal => "HasVertexNormal",
            U::ShouldNormalizeVertexNormal => "ShouldNormalizeVertexNormal",
            U::ShouldRescaleVertexNormal => "ShouldRescaleVertexNormal",
            U::HasVertexColor => "HasVertexColor",
            U::HasVertexTextureCoordinate => "HasVertexTextureCoordinate",
            U::HasVertexPointSize => "HasVertexPointSize",
            U::IsDrawingPoints => "IsDrawingPoints",
            U::ModelMatrix => "ModelMatrix",
            U::ModelMatrixInv => "ModelMatrixInv",
            U::ModelMatrixInvTran => "ModelMatrixInvTran",
            U::ViewMatrix => "ViewMatrix",
            U::ViewMatrixInv => "ViewMatrixInv",
            U::ViewMatrixInvTran => "ViewMatrixInvTran",
            U::ModelViewMatrix => "ModelViewMatrix",
            U::ModelViewMatrixInv => "ModelViewMatrixInv",
            U::ModelViewMatrixInvTran => "ModelViewMatrixInvTran",
            U::ProjMatrix => "ProjMatrix",
            U::ProjMatrixInv => "ProjMatrixInv",
            U::ProjMatrixInvTran => "ProjMatrixInvTran",
            U::ModelViewProjMatrix => "ModelViewProjMatrix",
            U::ModelViewProjMatrixInv => "ModelViewProjMatrixInv",
            U::ModelViewProjMatrixInvTran => "ModelViewProjMatrixInvTran",
            U::CameraPosition => "CameraPosition",
            U::Color => "Color",
            U::MaterialColorAmbient => "MaterialColorAmbient",
            U::MaterialColorDiffuse => "MaterialColorDiffuse",
            U::MaterialColorSpecular => "MaterialColorSpecular",
            U::MaterialColorEmission => "MaterialColorEmission",
            U::MaterialOpacity => "MaterialOpacity",
            U::MaterialShininess => "MaterialShininess",
            U::MinimumDrawnAlpha => "MinimumDrawnAlpha",
            U::IsUsingLighting => "IsUsingLighting",
            U::SceneLightColorAmbient => "SceneLightColorAmbient",
            U::TextureCount => "TextureCount",
            U::TextureSamplers => "TextureSamplers",
            U::PointSize => "PointSize",
            U::PointSizeAttenuation => "PointSizeAttenuation",
            U::PointSizeMinimum => "PointSizeMinimum",
            U::PointSizeMaximum => "PointSizeMaximum",
            U::PointSizeFadeThreshold => "PointSizeFadeThreshold",
            U::PointSpritesIsEnabled => "PointSpritesIsEnabled",
        }
    }
}

impl IndexedSemantics {
    /// Every indexed semantic family, in ascending tag order.
    pub const ALL: [IndexedSemantics; 27] = [
        IndexedSemantics::VertexTexture,
        IndexedSemantics::LightIsEnabled,
        IndexedSemantics::LightPosition,
        IndexedSemantics::LightColorAmbient,
        IndexedSemantics::LightColorDiffuse,
        IndexedSemantics::LightColorSpecular,
        IndexedSemantics::LightAttenuation,
        IndexedSemantics::LightSpotDirection,
        IndexedSemantics::LightSpotExponent,
        IndexedSemantics::LightSpotCutoffAngle,
        IndexedSemantics::LightSpotCutoffAngleCosine,
        IndexedSemantics::TexUnitMode,
        IndexedSemantics::TexUnitConstantColor,
        IndexedSemantics::TexUnitCombineRgbFunction,
        IndexedSemantics::TexUnitSource0Rgb,
        IndexedSemantics::TexUnitSource1Rgb,
        IndexedSemantics::TexUnitSource2Rgb,
        IndexedSemantics::TexUnitOperand0Rgb,
        IndexedSemantics::TexUnitOperand1Rgb,
        IndexedSemantics::TexUnitOperand2Rgb,
        IndexedSemantics::TexUnitCombineAlphaFunction,
        IndexedSemantics::TexUnitSource0Alpha,
        IndexedSemantics::TexUnitSource1Alpha,
        IndexedSemantics::TexUnitSource2Alpha,
        IndexedSemantics::TexUnitOperand0Alpha,
        IndexedSemantics::TexUnitOperand1Alpha,
        IndexedSemantics::TexUnitOperand2Alpha,
    ];

    /// The tag of unit 0 of this family.
    pub const fn base(self) -> u16 {
        self as u16
    }

    /// The number of consecutive tags reserved by this family.
    pub const fn count(self) -> usize {
        match self.family() {
            SemanticFamily::Light => MAX_LIGHTS,
            SemanticFamily::VertexTexture | SemanticFamily::TextureUnit => MAX_TEXTURE_UNITS,
        }
    }

    /// The kind of scene object this family addresses.
    pub const fn family(self) -> SemanticFamily {
        use IndexedSemantics as I;
        match self {
            I::VertexTexture => SemanticFamily::VertexTexture,
            I::LightIsEnabled
            | I::LightPosition
            | I::LightColorAmbient
            | I::LightColorDiffuse
            | I::LightColorSpecular
            | I::LightAttenuation
            | I::LightSpotDirection
            | I::LightSpotExponent
            | I::LightSpotCutoffAngle
            | I::LightSpotCutoffAngleCosine => SemanticFamily::Light,
            _ => SemanticFamily::TextureUnit,
        }
    }

    /// Get the semantic for the given unit of this family.
    ///
    /// # Panics
    /// Panics if `index` is not below [`IndexedSemantics::count`].
    pub const fn semantics(self, index: usize) -> Semantic<IndexedSemantics> {
        assert!(index < self.count(), "semantic index out of range");
        Semantic {
            semantics: self,
            index,
        }
    }

    /// Get the semantic for the given unit of this family, if the unit exists.
    pub fn try_semantics(self, index: usize) -> Result<Semantic<IndexedSemantics>, SemanticsError> {
        if index < self.count() {
            Ok(Semantic {
                semantics: self,
                index,
            })
        } else {
            Err(SemanticsError::IndexOutOfRange {
                family: self,
                index,
            })
        }
    }

    /// Find the family and unit index a tag belongs to.
    pub fn from_tag(tag: u16) -> Option<Semantic<IndexedSemantics>> {
        Self::ALL.iter().find_map(|family| {
            let offset = tag.checked_sub(family.base())? as usize;
            (offset < family.count()).then_some(Semantic {
                semantics: *family,
                index: offset,
            })
        })
    }

    /// The uniform shape this family is populated into, if it is populated at all.
    pub const fn expected_type(self) -> Option<ExpectedType> {
        use IndexedSemantics as I;
        Some(match self {
            I::VertexTexture => return None,
            I::LightIsEnabled => ExpectedType::Bool,
            I::LightPosition => ExpectedType::Vec4,
            I::LightColorAmbient
            | I::LightColorDiffuse
            | I::LightColorSpecular
            | I::TexUnitConstantColor => ExpectedType::Color,
            I::LightAttenuation | I::LightSpotDirection => ExpectedType::Vec3,
            I::LightSpotExponent | I::LightSpotCutoffAngle | I::LightSpotCutoffAngleCosine => {
                ExpectedType::Float
            }
            I::TexUnitMode
            | I::TexUnitCombineRgbFunction
            | I::TexUnitSource0Rgb
            | I::TexUnitSource1Rgb
            | I::TexUnitSource2Rgb
            | I::TexUnitOperand0Rgb
            | I::TexUnitOperand1Rgb
            | I::TexUnitOperand2Rgb
            | I::TexUnitCombineAlphaFunction
            | I::TexUnitSource0Alpha
            | I::TexUnitSource1Alpha
            | I::TexUnitSource2Alpha
            | I::TexUnitOperand0Alpha
            | I::TexUnitOperand1Alpha
            | I::TexUnitOperand2Alpha => ExpectedType::Int,
        })
    }

    /// A stable name for this family. Unit names append the index to it.
    pub const fn name(self) -> &'static str {
        use IndexedSemantics as I;
        match self {
            I::VertexTexture => "VertexTexture",
            I::LightIsEnabled => "LightIsEnabled",
            I::LightPosition => "LightPosition",
            I::LightColorAmbient => "LightColorAmbient",
            I::LightColorDiffuse => "LightColorDiffuse",
            I::LightColorSpecular => "LightColorSpecular",
            I::LightAttenuation => "LightAttenuation",
            I::LightSpotDirection => "LightSpotDirection",
            I::LightSpotExponent => "LightSpotExponent",
            I::LightSpotCutoffAngle => "LightSpotCutoffAngle",
            I::LightSpotCutoffAngleCosine => "LightSpotCutoffAngleCosine",
            I::TexUnitMode => "TexUnitMode",
            I::TexUnitConstantColor => "TexUnitConstantColor",
            I::TexUnitCombineRgbFunction => "TexUnitCombineRGBFunction",
            I::TexUnitSource0Rgb => "TexUnitSource0RGB",
            I::TexUnitSource1Rgb => "TexUnitSource1RGB",
            I::TexUnitSource2Rgb => "TexUnitSource2RGB",
            I::TexUnitOperand0Rgb => "TexUnitOperand0RGB",
            I::TexUnitOperand1Rgb => "TexUnitOperand1RGB",
            I::TexUnitOperand2Rgb => "TexUnitOperand2RGB",
            I::TexUnitCombineAlphaFunction => "TexUnitCombineAlphaFunction",
            I::TexUnitSource0Alpha => "TexUnitSource0Alpha",
            I::TexUnitSource1Alpha => "TexUnitSource1Alpha",
            I::TexUnitSource2Alpha => "TexUnitSource2Alpha",
            I::TexUnitOperand0Alpha => "TexUnitOperand0Alpha",
            I::TexUnitOperand1Alpha => "TexUnitOperand1Alpha",
            I::TexUnitOperand2Alpha => "TexUnitOperand2Alpha",
        }
    }
}

impl Semantic<IndexedSemantics> {
    /// The flattened tag of this unit.
    pub const fn tag(&self) -> u16 {
        self.semantics.base() + self.index as u16
    }
}

impl VariableSemantic {
    /// The semantic that carries no meaning.
    pub const NONE: VariableSemantic = VariableSemantic::Unique(UniqueSemantics::None);

    /// Create an application-specific semantic at the given offset from
    /// [`SEMANTIC_APP_BASE`].
    pub fn app(offset: u16) -> Result<VariableSemantic, SemanticsError> {
        SEMANTIC_APP_BASE
            .checked_add(offset)
            .map(VariableSemantic::App)
            .ok_or(SemanticsError::UnrecognizedSemantic(
                SEMANTIC_APP_BASE as u32 + offset as u32,
            ))
    }

    /// The flattened 16-bit tag of this semantic.
    pub const fn tag(&self) -> u16 {
        match self {
            VariableSemantic::Unique(semantic) => semantic.tag(),
            VariableSemantic::Indexed(semantic) => semantic.tag(),
            VariableSemantic::App(tag) => *tag,
        }
    }

    /// Whether this semantic carries no meaning.
    pub const fn is_none(&self) -> bool {
        matches!(self, VariableSemantic::Unique(UniqueSemantics::None))
    }

    /// The uniform shape this semantic is populated into, if the engine populates it.
    pub const fn expected_type(&self) -> Option<ExpectedType> {
        match self {
            VariableSemantic::Unique(semantic) => semantic.expected_type(),
            VariableSemantic::Indexed(semantic) => semantic.semantics.expected_type(),
            VariableSemantic::App(_) => None,
        }
    }

    /// A stable human-readable name for this semantic.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            VariableSemantic::Unique(semantic) => Cow::Borrowed(semantic.name()),
            VariableSemantic::Indexed(semantic) => {
                Cow::Owned(format!("{}{}", semantic.semantics.name(), semantic.index))
            }
            VariableSemantic::App(_) => Cow::Borrowed(APP_SEMANTIC_NAME),
        }
    }
}

/// Get the name of a raw semantic tag.
///
/// Tags in the application range return [`APP_SEMANTIC_NAME`], and values that do not
/// fit in a semantic tag return [`UNRECOGNIZED_SEMANTIC_NAME`].
pub fn name_of(tag: u32) -> Cow<'static, str> {
    match VariableSemantic::try_from(tag) {
        Ok(semantic) => semantic.name(),
        Err(_) => Cow::Borrowed(UNRECOGNIZED_SEMANTIC_NAME),
    }
}

impl Default for VariableSemantic {
    fn default() -> Self {
        VariableSemantic::NONE
    }
}

impl Display for VariableSemantic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableSemantic::Unique(semantic) => f.write_str(semantic.name()),
            VariableSemantic::Indexed(semantic) => {
                write!(f, "{}{}", semantic.semantics.name(), semantic.index)
            }
            VariableSemantic::App(tag) => write!(f, "{APP_SEMANTIC_NAME}({tag})"),
        }
    }
}

impl From<UniqueSemantics> for VariableSemantic {
    fn from(value: UniqueSemantics) -> Self {
        VariableSemantic::Unique(value)
    }
}

impl From<Semantic<IndexedSemantics>> for VariableSemantic {
    fn from(value: Semantic<IndexedSemantics>) -> Self {
        VariableSemantic::Indexed(value)
    }
}

impl From<u16> for VariableSemantic {
    fn from(tag: u16) -> Self {
        if tag >= SEMANTIC_APP_BASE {
            return VariableSemantic::App(tag);
        }

        if let Some(semantic) = UniqueSemantics::from_tag(tag) {
            return VariableSemantic::Unique(semantic);
        }

        match IndexedSemantics::from_tag(tag) {
            Some(semantic) => VariableSemantic::Indexed(semantic),
            // every tag below the app base is assigned
            None => VariableSemantic::NONE,
        }
    }
}

impl TryFrom<u32> for VariableSemantic {
    type Error = SemanticsError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        u16::try_from(tag)
            .map(VariableSemantic::from)
            .map_err(|_| SemanticsError::UnrecognizedSemantic(tag))
    }
}

impl From<VariableSemantic> for u16 {
    fn from(value: VariableSemantic) -> Self {
        value.tag()
    }
}

impl ExpectedType {
    /// Check a reflected uniform type against this shape.
    pub fn validate(&self, ty: &UniformType) -> Option<TypeInfo> {
        let is_float = ty.base == UniformBaseType::Float;
        let single = ty.array <= 1;
        let valid = match self {
            ExpectedType::Bool => ty.is_scalar() && single && ty.base == UniformBaseType::Bool,
            ExpectedType::Int => ty.is_scalar() && single && ty.base == UniformBaseType::Int,
            ExpectedType::Float => ty.is_scalar() && single && is_float,
            ExpectedType::Vec3 => is_float && single && ty.vecsize == 3 && ty.columns == 1,
            ExpectedType::Vec4 => is_float && single && ty.vecsize == 4 && ty.columns == 1,
            ExpectedType::Color => {
                is_float && single && matches!(ty.vecsize, 3 | 4) && ty.columns == 1
            }
            ExpectedType::Mat3 => is_float && single && ty.vecsize == 3 && ty.columns == 3,
            ExpectedType::Mat4 => is_float && single && ty.vecsize == 4 && ty.columns == 4,
            ExpectedType::SamplerArray => {
                ty.is_scalar()
                    && matches!(ty.base, UniformBaseType::Int | UniformBaseType::Sampler)
            }
            ExpectedType::Mat4Array => is_float && ty.vecsize == 4 && ty.columns == 4,
        };

        valid.then_some(TypeInfo {
            size: ty.vecsize,
            columns: ty.columns,
            elements: ty.array.max(1) as usize,
        })
    }
}

impl ValidateTypeSemantics<UniformType> for VariableSemantic {
    fn validate_type(&self, ty: &UniformType) -> Option<TypeInfo> {
        self.expected_type()?.validate(ty)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unique_semantics_are_sorted() {
        let tags: Vec<u16> = UniqueSemantics::iter().map(UniqueSemantics::tag).collect();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(tags, sorted);
        assert_eq!(tags.len(), UniqueSemantics::COUNT);
    }

    #[test]
    fn every_tag_below_app_base_is_assigned_once() {
        let mut seen = vec![0u8; SEMANTIC_APP_BASE as usize];
        for semantic in UniqueSemantics::iter() {
            seen[semantic.tag() as usize] += 1;
        }
        for family in IndexedSemantics::ALL {
            for index in 0..family.count() {
                seen[family.semantics(index).tag() as usize] += 1;
            }
        }
        assert!(seen.iter().all(|count| *count == 1), "{seen:?}");
    }

    #[test]
    fn app_base_is_above_engine_tags() {
        let highest_unique = UniqueSemantics::iter().map(UniqueSemantics::tag).max();
        let highest_indexed = IndexedSemantics::ALL
            .iter()
            .map(|family| family.base() + family.count() as u16 - 1)
            .max();
        assert!(highest_unique < Some(SEMANTIC_APP_BASE));
        assert!(highest_indexed < Some(SEMANTIC_APP_BASE));
    }

    #[test]
    fn family_index_algebra() {
        for family in IndexedSemantics::ALL {
            for index in 0..family.count() {
                let tag = family.base() + index as u16;
                let VariableSemantic::Indexed(semantic) = VariableSemantic::from(tag) else {
                    panic!("tag {tag} is not indexed");
                };
                assert_eq!(semantic.semantics, family);
                assert_eq!((tag - family.base()) as usize, semantic.index);
            }
        }
    }

    #[test]
    fn tags_round_trip() {
        for tag in 0..=SEMANTIC_MAX {
            assert_eq!(VariableSemantic::from(tag).tag(), tag);
        }
    }

    #[test]
    fn names() {
        assert_eq!(name_of(UniqueSemantics::ModelViewProjMatrix as u32), "ModelViewProjMatrix");
        assert_eq!(
            name_of(IndexedSemantics::LightPosition.semantics(3).tag() as u32),
            "LightPosition3"
        );
        assert_eq!(name_of(SEMANTIC_APP_BASE as u32 + 12), APP_SEMANTIC_NAME);
        assert_eq!(name_of(0x1_0000), UNRECOGNIZED_SEMANTIC_NAME);

        for tag in 0..SEMANTIC_APP_BASE {
            let name = name_of(tag as u32);
            assert!(!name.is_empty());
            assert_ne!(name, APP_SEMANTIC_NAME);
            assert_ne!(name, UNRECOGNIZED_SEMANTIC_NAME);
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(IndexedSemantics::LightPosition.try_semantics(7).is_ok());
        assert!(matches!(
            IndexedSemantics::LightPosition.try_semantics(8),
            Err(SemanticsError::IndexOutOfRange { index: 8, .. })
        ));
    }

    #[test]
    fn validates_types() {
        let mvp = VariableSemantic::from(UniqueSemantics::ModelViewProjMatrix);
        assert!(mvp.validate_type(&UniformType::mat(4)).is_some());
        assert!(mvp.validate_type(&UniformType::mat(3)).is_none());
        assert!(mvp.validate_type(&UniformType::vec(4)).is_none());

        let color = VariableSemantic::from(UniqueSemantics::MaterialColorDiffuse);
        assert_eq!(color.validate_type(&UniformType::vec(3)).map(|t| t.size), Some(3));
        assert_eq!(color.validate_type(&UniformType::vec(4)).map(|t| t.size), Some(4));

        let samplers = VariableSemantic::from(UniqueSemantics::TextureSamplers);
        let info = samplers
            .validate_type(&UniformType::sampler().array(MAX_TEXTURE_UNITS as u32))
            .unwrap();
        assert_eq!(info.elements, MAX_TEXTURE_UNITS);

        assert!(VariableSemantic::NONE.validate_type(&UniformType::float()).is_none());
        assert!(VariableSemantic::App(SEMANTIC_APP_BASE)
            .validate_type(&UniformType::float())
            .is_none());
    }

    #[test]
    fn app_semantics_stay_in_range() {
        assert_eq!(
            VariableSemantic::app(0),
            Ok(VariableSemantic::App(SEMANTIC_APP_BASE))
        );
        assert_eq!(
            VariableSemantic::app(SEMANTIC_MAX - SEMANTIC_APP_BASE),
            Ok(VariableSemantic::App(SEMANTIC_MAX))
        );
        assert_eq!(
            VariableSemantic::app(u16::MAX),
            Err(SemanticsError::UnrecognizedSemantic(
                SEMANTIC_APP_BASE as u32 + u16::MAX as u32
            ))
        );
    }
}
