use crate::matrix::MatrixStack;
use crate::scene::{
    CameraState, LightState, MaterialState, MeshNodeState, SceneState, TextureUnitState,
};

/// Read access to the scene state of the draw in progress.
///
/// Populating uniforms only ever reads through a visitor, so an implementation
/// must not change what it reports while uniforms are being populated.
pub trait DrawingVisitor {
    /// The mesh node being drawn, if any.
    fn current_mesh_node(&self) -> Option<&MeshNodeState>;

    /// The material of the mesh node being drawn, if it has one.
    fn current_material(&self) -> Option<&MaterialState>;

    /// The number of texture units in use by the current draw.
    fn texture_unit_count(&self) -> usize;

    /// The state of the texture unit at the given index.
    fn texture_unit(&self, index: usize) -> Option<&TextureUnitState>;

    /// The camera the scene is viewed through.
    fn camera(&self) -> Option<&CameraState>;

    /// Scene-wide lighting and point state.
    fn scene(&self) -> &SceneState;

    /// The light at the given index, if the scene has that many lights.
    fn light_at(&self, index: usize) -> Option<&LightState>;

    /// The environment matrices of the draw.
    fn matrices(&self) -> &MatrixStack;
}

/// A [`DrawingVisitor`] over owned scene state.
#[derive(Debug, Clone, Default)]
pub struct DrawingState {
    pub mesh_node: Option<MeshNodeState>,
    pub material: Option<MaterialState>,
    pub texture_units: Vec<TextureUnitState>,
    pub camera: Option<CameraState>,
    pub scene: SceneState,
    pub lights: Vec<LightState>,
    pub matrices: MatrixStack,
}

impl DrawingVisitor for DrawingState {
    fn current_mesh_node(&self) -> Option<&MeshNodeState> {
        self.mesh_node.as_ref()
    }

    fn current_material(&self) -> Option<&MaterialState> {
        self.material.as_ref()
    }

    fn texture_unit_count(&self) -> usize {
        self.texture_units.len()
    }

    fn texture_unit(&self, index: usize) -> Option<&TextureUnitState> {
        self.texture_units.get(index)
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
