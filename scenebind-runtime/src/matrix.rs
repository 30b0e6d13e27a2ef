use once_cell::unsync::OnceCell;
use scenebind_common::{Mat3, Mat4};

/// The environment matrices a shader can ask for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MatrixKind {
    Model,
    View,
    ModelView,
    Proj,
    ModelViewProj,
}

impl MatrixKind {
    const COUNT: usize = 5;

    /// The derived matrices that depend on this one.
    const fn dependents(self) -> &'static [MatrixKind] {
        match self {
            MatrixKind::Model | MatrixKind::View => &[
                MatrixKind::ModelView,
                MatrixKind::ModelViewProj,
            ],
            MatrixKind::Proj => &[MatrixKind::ModelViewProj],
            MatrixKind::ModelView | MatrixKind::ModelViewProj => &[],
        }
    }
}

#[derive(Debug, Default)]
struct DerivedCache {
    matrix: [OnceCell<Mat4>; MatrixKind::COUNT],
    inverse: [OnceCell<Mat4>; MatrixKind::COUNT],
    inverse_transpose: [OnceCell<Mat3>; MatrixKind::COUNT],
}

impl DerivedCache {
    fn reset(&mut self, kind: MatrixKind) {
        let slot = kind as usize;
        self.matrix[slot] = OnceCell::new();
        self.inverse[slot] = OnceCell::new();
        self.inverse_transpose[slot] = OnceCell::new();
    }
}

/// The model, view and projection matrices of the current draw.
///
/// Products, inverses and inverse-transposes are computed on first use and kept
/// until a matrix they depend on changes.
#[derive(Debug)]
pub struct MatrixStack {
    model: Vec<Mat4>,
    view: Mat4,
    proj: Mat4,
    cache: DerivedCache,
}

impl Default for MatrixStack {
    fn default() -> Self {
        MatrixStack {
            model: vec![Mat4::IDENTITY],
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            cache: DerivedCache::default(),
        }
    }
}

impl Clone for MatrixStack {
    fn clone(&self) -> Self {
        MatrixStack {
            model: self.model.clone(),
            view: self.view,
            proj: self.proj,
            cache: DerivedCache::default(),
        }
    }
}

impl MatrixStack {
    pub fn new(view: Mat4, proj: Mat4) -> Self {
        MatrixStack {
            view,
            proj,
            ..Default::default()
        }
    }

    /// The number of model matrices on the stack. The stack always holds at least one.
    pub fn depth(&self) -> usize {
        self.model.len()
    }

    /// Push a copy of the current model matrix.
    pub fn push_model(&mut self) {
        let top = self.model_top();
        self.model.push(top);
    }

    /// Pop the current model matrix, restoring the one below it.
    ///
    /// Returns `false` without changing anything if only the base matrix remains.
    pub fn pop_model(&mut self) -> bool {
        if self.model.len() <= 1 {
            return false;
        }
        self.model.pop();
        self.invalidate(MatrixKind::Model);
        true
    }

    /// Replace the current model matrix.
    pub fn set_model(&mut self, model: Mat4) {
        if let Some(top) = self.model.last_mut() {
            *top = model;
        }
        self.invalidate(MatrixKind::Model);
    }

    /// Post-multiply the current model matrix.
    pub fn multiply_model(&mut self, transform: &Mat4) {
        let model = self.model_top() * *transform;
        self.set_model(model);
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.invalidate(MatrixKind::View);
    }

    pub fn set_projection(&mut self, proj: Mat4) {
        self.proj = proj;
        self.invalidate(MatrixKind::Proj);
    }

    /// Get the requested matrix.
    pub fn matrix(&self, kind: MatrixKind) -> Mat4 {
        match kind {
            MatrixKind::Model => self.model_top(),
            MatrixKind::View => self.view,
            MatrixKind::Proj => self.proj,
            MatrixKind::ModelView => *self.cache.matrix[kind as usize]
                .get_or_init(|| self.view * self.model_top()),
            MatrixKind::ModelViewProj => *self.cache.matrix[kind as usize]
                .get_or_init(|| self.proj * self.matrix(MatrixKind::ModelView)),
        }
    }

    /// Get the inverse of the requested matrix.
    pub fn inverse(&self, kind: MatrixKind) -> Mat4 {
        *self.cache.inverse[kind as usize].get_or_init(|| self.matrix(kind).inverse())
    }

    /// Get the inverse-transpose of the upper-left 3x3 of the requested matrix.
    ///
    /// This is the matrix that carries normals into the space of `kind`.
    pub fn inverse_transpose(&self, kind: MatrixKind) -> Mat3 {
        *self.cache.inverse_transpose[kind as usize]
            .get_or_init(|| Mat3::from_mat4(self.inverse(kind)).transpose())
    }

    fn model_top(&self) -> Mat4 {
        self.model.last().copied().unwrap_or(Mat4::IDENTITY)
    }

    fn invalidate(&mut self, kind: MatrixKind) {
        self.cache.reset(kind);
        for dependent in kind.dependents() {
            self.cache.reset(*dependent);
        }
    }
}
