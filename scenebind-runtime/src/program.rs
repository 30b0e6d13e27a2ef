use crate::binding::SemanticsDelegate;
use crate::uniforms::{GlslAttribute, GlslUniform, NoUniformUpload, UniformUploader};
use crate::visitor::DrawingVisitor;
use scenebind_common::map::ShortString;
use scenebind_reflect::reflect::semantics::VariableSemantic;
use scenebind_reflect::reflect::ShaderVariable;

/// The active variables of a linked program, bound to scene semantics by a delegate.
pub struct ProgramSemantics<D, H = NoUniformUpload> {
    delegate: D,
    attributes: Vec<GlslAttribute>,
    uniforms: Vec<GlslUniform<H>>,
}

impl<D, H> ProgramSemantics<D, H>
where
    D: SemanticsDelegate,
    H: UniformUploader,
{
    pub fn new(delegate: D, attributes: Vec<GlslAttribute>, uniforms: Vec<GlslUniform<H>>) -> Self {
        ProgramSemantics {
            delegate,
            attributes,
            uniforms,
        }
    }

    /// Configure every variable of the program with the delegate.
    ///
    /// This should be called once after the program is linked. Returns the names of
    /// the variables the delegate did not recognize.
    pub fn configure(&mut self) -> Vec<ShortString> {
        let mut unconfigured = Vec::new();

        for attribute in &mut self.attributes {
            if !self.delegate.configure_variable(attribute) {
                unconfigured.push(ShortString::from(attribute.name()));
            }
        }

        for uniform in &mut self.uniforms {
            if !self.delegate.configure_variable(uniform) {
                unconfigured.push(ShortString::from(uniform.name()));
            }
        }

        for name in &unconfigured {
            log::debug!("variable `{name}` was not configured with a semantic");
        }

        unconfigured
    }

    /// Populate every uniform that has a semantic from the scene state of the current draw.
    ///
    /// Returns the number of uniforms a value was written to.
    pub fn populate(&mut self, visitor: &dyn DrawingVisitor) -> usize {
        let mut written = 0;
        for uniform in &mut self.uniforms {
            if uniform.semantic().is_none() {
                continue;
            }

            if self.delegate.populate_uniform(uniform, visitor) {
                written += 1;
            }
        }
        written
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn attributes(&self) -> &[GlslAttribute] {
        &self.attributes
    }

    pub fn uniforms(&self) -> &[GlslUniform<H>] {
        &self.uniforms
    }

    pub fn attribute(&self, name: &str) -> Option<&GlslAttribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name() == name)
    }

    pub fn uniform(&self, name: &str) -> Option<&GlslUniform<H>> {
        self.uniforms.iter().find(|uniform| uniform.name() == name)
    }

    /// Find the uniform configured with the given semantic.
    pub fn uniform_for_semantic(
        &self,
        semantic: impl Into<VariableSemantic>,
    ) -> Option<&GlslUniform<H>> {
        let semantic = semantic.into();
        self.uniforms
            .iter()
            .find(|uniform| uniform.semantic() == semantic)
    }
}
