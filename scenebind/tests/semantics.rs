use scenebind::reflect::semantics::{
    name_of, ExpectedType, IndexedSemantics, UniqueSemantics, VariableSemantic,
    APP_SEMANTIC_NAME, MAX_TEXTURE_UNITS, SEMANTIC_APP_BASE, SEMANTIC_MAX,
    UNRECOGNIZED_SEMANTIC_NAME,
};
use scenebind::reflect::{ShaderUniform, ShaderVariable, UniformType};
use scenebind::runtime::matrix::MatrixStack;
use scenebind::runtime::scene::{
    CameraState, LightState, MaterialState, MeshNodeState, SceneState, TextureUnitState,
};
use scenebind::runtime::uniforms::GlslAttribute;
use scenebind::runtime::visitor::DrawingVisitor;
use scenebind::runtime::{
    shared_default, BaseSemantics, SemanticsDelegate, VarNameSemantics, VariableConfiguration,
};
use scenebind::{Mat3, Mat4, Vec2, Vec3, Vec4};
use std::borrow::Cow;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A setter call made on a [`RecordingUniform`].
#[derive(Debug, Clone, PartialEq)]
enum Set {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
    Int(i32),
    Bool(bool),
    Floats(Vec<f32>),
    Vec2s(Vec<Vec2>),
    Vec3s(Vec<Vec3>),
    Vec4s(Vec<Vec4>),
    Mat3s(Vec<Mat3>),
    Mat4s(Vec<Mat4>),
    Ints(Vec<i32>),
    Bools(Vec<bool>),
}

/// A uniform that records every setter call made on it.
#[derive(Debug)]
struct RecordingUniform {
    name: String,
    ty: UniformType,
    semantic: VariableSemantic,
    index: usize,
    calls: Vec<Set>,
    mismatches: usize,
}

impl RecordingUniform {
    fn new(name: &str, ty: UniformType) -> Self {
        RecordingUniform {
            name: name.to_string(),
            ty,
            semantic: VariableSemantic::NONE,
            index: 0,
            calls: Vec::new(),
            mismatches: 0,
        }
    }

    fn with_semantic(name: &str, ty: UniformType, semantic: impl Into<VariableSemantic>) -> Self {
        let mut uniform = Self::new(name, ty);
        uniform.semantic = semantic.into();
        uniform
    }
}

impl ShaderVariable for RecordingUniform {
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

impl ShaderUniform for RecordingUniform {
    fn uniform_type(&self) -> UniformType {
        self.ty
    }

    fn set_float(&mut self, value: f32) {
        self.calls.push(Set::Float(value))
    }

    fn set_vec2(&mut self, value: Vec2) {
        self.calls.push(Set::Vec2(value))
    }

    fn set_vec3(&mut self, value: Vec3) {
        self.calls.push(Set::Vec3(value))
    }

    fn set_vec4(&mut self, value: Vec4) {
        self.calls.push(Set::Vec4(value))
    }

    fn set_mat3(&mut self, value: &Mat3) {
        self.calls.push(Set::Mat3(*value))
    }

    fn set_mat4(&mut self, value: &Mat4) {
        self.calls.push(Set::Mat4(*value))
    }

    fn set_int(&mut self, value: i32) {
        self.calls.push(Set::Int(value))
    }

    fn set_bool(&mut self, value: bool) {
        self.calls.push(Set::Bool(value))
    }

    fn set_float_array(&mut self, values: &[f32]) {
        self.calls.push(Set::Floats(values.to_vec()))
    }

    fn set_vec2_array(&mut self, values: &[Vec2]) {
        self.calls.push(Set::Vec2s(values.to_vec()))
    }

    fn set_vec3_array(&mut self, values: &[Vec3]) {
        self.calls.push(Set::Vec3s(values.to_vec()))
    }

    fn set_vec4_array(&mut self, values: &[Vec4]) {
        self.calls.push(Set::Vec4s(values.to_vec()))
    }

    fn set_mat3_array(&mut self, values: &[Mat3]) {
        self.calls.push(Set::Mat3s(values.to_vec()))
    }

    fn set_mat4_array(&mut self, values: &[Mat4]) {
        self.calls.push(Set::Mat4s(values.to_vec()))
    }

    fn set_int_array(&mut self, values: &[i32]) {
        self.calls.push(Set::Ints(values.to_vec()))
    }

    fn set_bool_array(&mut self, values: &[bool]) {
        self.calls.push(Set::Bools(values.to_vec()))
    }

    fn mark_type_mismatch(&mut self) -> bool {
        self.mismatches += 1;
        self.mismatches == 1
    }
}

/// A visitor that reports a fixed scene.
#[derive(Default)]
struct FixedVisitor {
    node: Option<MeshNodeState>,
    material: Option<MaterialState>,
    unit_count: usize,
    units: Vec<TextureUnitState>,
    camera: Option<CameraState>,
    scene: SceneState,
    lights: Vec<LightState>,
    matrices: MatrixStack,
}

impl DrawingVisitor for FixedVisitor {
    fn current_mesh_node(&self) -> Option<&MeshNodeState> {
        self.node.as_ref()
    }

    fn current_material(&self) -> Option<&MaterialState> {
        self.material.as_ref()
    }

    fn texture_unit_count(&self) -> usize {
        self.unit_count
    }

    fn texture_unit(&self, index: usize) -> Option<&TextureUnitState> {
        self.units.get(index)
    }

    fn camera(&self) -> Option<&CameraState> {
        self.camera.as_ref()
    }

    fn scene(&self) -> &SceneState {
        &self.scene
    }

    fn light_at(&self, index: usize) -> Option<&LightState> {
        self.lights.get(index)
    }

    fn matrices(&self) -> &MatrixStack {
        &self.matrices
    }
}

fn uniform_type_for(expected: ExpectedType) -> UniformType {
    match expected {
        ExpectedType::Bool => UniformType::bool(),
        ExpectedType::Int => UniformType::int(),
        ExpectedType::Float => UniformType::float(),
        ExpectedType::Vec3 => UniformType::vec(3),
        ExpectedType::Vec4 | ExpectedType::Color => UniformType::vec(4),
        ExpectedType::Mat3 => UniformType::mat(3),
        ExpectedType::Mat4 => UniformType::mat(4),
        ExpectedType::SamplerArray => UniformType::sampler().array(MAX_TEXTURE_UNITS as u32),
        ExpectedType::Mat4Array => UniformType::mat(4).array(4),
    }
}

fn busy_scene() -> FixedVisitor {
    let mut matrices = MatrixStack::new(
        Mat4::look_at_rh(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO, Vec3::Y),
        Mat4::perspective_rh_gl(1.0, 1.5, 0.1, 100.0),
    );
    matrices.set_model(Mat4::from_rotation_y(0.5));

    FixedVisitor {
        node: Some(MeshNodeState {
            skin_matrices: vec![Mat4::IDENTITY; 2],
            ..Default::default()
        }),
        material: Some(MaterialState::default()),
        unit_count: 2,
        units: vec![TextureUnitState::DEFAULT; 2],
        camera: Some(CameraState {
            global_position: Vec3::new(0.0, 2.0, 10.0),
        }),
        scene: SceneState::default(),
        lights: vec![LightState {
            enabled: true,
            position: Vec4::new(1.0, 1.0, 1.0, 0.0),
            ..Default::default()
        }],
        matrices,
    }
}

#[test]
fn configures_registered_attribute() {
    let mut semantics = VarNameSemantics::new();
    semantics.add_configuration(VariableConfiguration::new(
        "a_position",
        UniqueSemantics::VertexLocations,
    ));

    let mut attribute = GlslAttribute::new("a_position", 0);
    assert!(attribute.semantic().is_none());
    assert!(semantics.configure_variable(&mut attribute));
    assert_eq!(attribute.semantic(), UniqueSemantics::VertexLocations.into());
    assert_eq!(attribute.index(), 0);
}

#[test]
fn populates_model_view_projection() {
    let mut semantics = VarNameSemantics::new();
    semantics.map_name("u_mvp", UniqueSemantics::ModelViewProjMatrix);

    let mut uniform = RecordingUniform::new("u_mvp", UniformType::mat(4));
    assert!(semantics.configure_variable(&mut uniform));

    let visitor = FixedVisitor::default();
    assert!(semantics.populate_uniform(&mut uniform, &visitor));
    assert_eq!(uniform.calls, vec![Set::Mat4(Mat4::IDENTITY)]);
}

#[test]
fn missing_light_position_is_origin() {
    let mut uniform = RecordingUniform::with_semantic(
        "u_light",
        UniformType::vec(4),
        IndexedSemantics::LightPosition.semantics(3),
    );

    let visitor = FixedVisitor {
        lights: vec![LightState::default(); 2],
        ..Default::default()
    };
    assert!(BaseSemantics::default().populate_uniform(&mut uniform, &visitor));
    assert_eq!(uniform.calls, vec![Set::Vec4(Vec4::ZERO)]);
}

#[test]
fn enabled_light_flag() {
    let mut uniform = RecordingUniform::with_semantic(
        "u_enabled",
        UniformType::bool(),
        IndexedSemantics::LightIsEnabled.semantics(5),
    );

    let mut lights = vec![LightState::default(); 6];
    lights[5].enabled = true;
    let visitor = FixedVisitor {
        lights,
        ..Default::default()
    };

    assert!(BaseSemantics::default().populate_uniform(&mut uniform, &visitor));
    assert_eq!(uniform.calls, vec![Set::Bool(true)]);
}

#[test]
fn texture_samplers_fill_every_unit() {
    let mut uniform = RecordingUniform::with_semantic(
        "s_textures",
        UniformType::sampler().array(MAX_TEXTURE_UNITS as u32),
        UniqueSemantics::TextureSamplers,
    );

    let visitor = FixedVisitor {
        unit_count: 3,
        ..Default::default()
    };

    assert!(BaseSemantics::default().populate_uniform(&mut uniform, &visitor));
    assert_eq!(uniform.calls, vec![Set::Ints(vec![0, 1, 2, 0, 0, 0, 0, 0])]);
}

#[test]
fn unknown_name_is_left_untouched() {
    let semantics = VarNameSemantics::with_defaults();

    let mut uniform = RecordingUniform::new("u_unknown", UniformType::float());
    uniform.set_index(7);
    assert!(!semantics.configure_variable(&mut uniform));
    assert!(uniform.semantic().is_none());
    assert_eq!(uniform.index(), 7);

    let mut uniform =
        RecordingUniform::with_semantic("u_unknown", UniformType::float(), UniqueSemantics::PointSize);
    assert!(!semantics.configure_variable(&mut uniform));
    assert_eq!(uniform.semantic(), UniqueSemantics::PointSize.into());
}

#[test]
fn every_engine_tag_is_named() {
    for tag in 0..SEMANTIC_APP_BASE {
        let name = name_of(tag as u32);
        assert!(!name.is_empty(), "tag {tag} has no name");
        assert_ne!(name, APP_SEMANTIC_NAME, "tag {tag}");
        assert_ne!(name, UNRECOGNIZED_SEMANTIC_NAME, "tag {tag}");
    }

    for tag in SEMANTIC_APP_BASE..=SEMANTIC_MAX {
        assert_eq!(name_of(tag as u32), APP_SEMANTIC_NAME);
    }

    assert_eq!(name_of(SEMANTIC_MAX as u32 + 1), UNRECOGNIZED_SEMANTIC_NAME);
}

#[test]
fn indexed_families_are_consecutive() {
    for family in IndexedSemantics::ALL {
        for index in 0..family.count() {
            let tag = family.base() + index as u16;
            assert_eq!(
                VariableSemantic::from(tag),
                VariableSemantic::Indexed(family.semantics(index))
            );
            assert_eq!((tag - family.base()) as usize, index);
        }
    }
}

#[test]
fn configure_is_idempotent() {
    let semantics = shared_default();

    for name in ["u_cc3Lights[2].diffuseColor", "u_cc3Points.size", "u_nothing"] {
        let mut uniform = RecordingUniform::new(name, UniformType::vec(4));
        let first = semantics.configure_variable(&mut uniform);
        let configured = (uniform.semantic(), uniform.index());

        let second = semantics.configure_variable(&mut uniform);
        assert_eq!(first, second, "{name}");
        assert_eq!(configured, (uniform.semantic(), uniform.index()), "{name}");
    }
}

#[test]
fn every_default_semantic_populates_deterministically() {
    init_logger();

    let semantics = VarNameSemantics::with_defaults();
    let visitor = busy_scene();

    for configuration in semantics.configurations() {
        let Some(expected) = configuration.semantic.expected_type() else {
            continue;
        };

        let mut uniform = RecordingUniform::new(&configuration.name, uniform_type_for(expected));
        assert!(semantics.configure_variable(&mut uniform));

        assert!(
            semantics.populate_uniform(&mut uniform, &visitor),
            "{} was not populated",
            configuration.name
        );
        assert!(semantics.populate_uniform(&mut uniform, &visitor));

        assert_eq!(uniform.calls.len(), 2, "{}", configuration.name);
        assert_eq!(uniform.calls[0], uniform.calls[1], "{}", configuration.name);
        assert_eq!(uniform.mismatches, 0);
    }
}

#[test]
fn last_mapping_wins() {
    let mut semantics = VarNameSemantics::new();
    semantics.map_name("u_value", UniqueSemantics::MaterialShininess);
    semantics.map_name("u_value", UniqueSemantics::MaterialOpacity);

    let mut uniform = RecordingUniform::new("u_value", UniformType::float());
    assert!(semantics.configure_variable(&mut uniform));
    assert_eq!(uniform.semantic(), UniqueSemantics::MaterialOpacity.into());
}

#[test]
fn type_mismatch_is_not_populated() {
    init_logger();

    let mut uniform = RecordingUniform::with_semantic(
        "u_normalMatrix",
        UniformType::mat(4),
        UniqueSemantics::ModelViewMatrixInvTran,
    );
    let visitor = FixedVisitor::default();
    let base = BaseSemantics::default();

    assert!(!base.populate_uniform(&mut uniform, &visitor));
    assert!(!base.populate_uniform(&mut uniform, &visitor));
    assert!(uniform.calls.is_empty());
    assert_eq!(uniform.mismatches, 2);
}

/// Populates the application semantic at the start of the application range
/// with the elapsed time.
struct ClockSemantics {
    seconds: f32,
}

const CLOCK: VariableSemantic = VariableSemantic::App(SEMANTIC_APP_BASE);

impl SemanticsDelegate for ClockSemantics {
    fn configure_variable(&self, variable: &mut dyn ShaderVariable) -> bool {
        if variable.name() != "u_time" {
            return false;
        }
        variable.set_semantic(CLOCK);
        true
    }

    fn populate_uniform(
        &self,
        uniform: &mut dyn ShaderUniform,
        _visitor: &dyn DrawingVisitor,
    ) -> bool {
        if uniform.semantic() != CLOCK {
            return false;
        }
        uniform.set_float(self.seconds);
        true
    }

    fn name_of_semantic(&self, semantic: VariableSemantic) -> Cow<'static, str> {
        if semantic == CLOCK {
            return Cow::Borrowed("Clock");
        }
        semantic.name()
    }
}

#[test]
fn chained_delegates_handle_app_semantics() {
    let delegate = (shared_default(), ClockSemantics { seconds: 2.5 });
    let visitor = FixedVisitor::default();

    let mut time = RecordingUniform::new("u_time", UniformType::float());
    assert!(delegate.configure_variable(&mut time));
    assert!(delegate.populate_uniform(&mut time, &visitor));
    assert_eq!(time.calls, vec![Set::Float(2.5)]);

    let mut mvp = RecordingUniform::new("u_cc3Matrices.modelViewProj", UniformType::mat(4));
    assert!(delegate.configure_variable(&mut mvp));
    assert!(delegate.populate_uniform(&mut mvp, &visitor));

    assert_eq!(delegate.name_of_semantic(CLOCK), "Clock");
    assert_eq!(
        delegate.name_of_semantic(UniqueSemantics::CameraPosition.into()),
        "CameraPosition"
    );
}

#[test]
fn shared_default_mutation_is_visible() {
    let mut uniform = RecordingUniform::new("u_integrationFogColor", UniformType::vec(4));
    assert!(!shared_default().configure_variable(&mut uniform));

    shared_default().map_name("u_integrationFogColor", UniqueSemantics::SceneLightColorAmbient);
    assert!(shared_default().configure_variable(&mut uniform));
    assert_eq!(
        uniform.semantic(),
        UniqueSemantics::SceneLightColorAmbient.into()
    );
}
