/// Options for populating uniforms from scene state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SemanticsOptions {
    /// Accept `vec3` uniforms for color semantics, which receive the rgb part.
    pub allow_vec3_colors: bool,
    /// Log the first type mismatch between a uniform and its semantic.
    pub log_type_mismatches: bool,
}

impl Default for SemanticsOptions {
    fn default() -> Self {
        SemanticsOptions {
            allow_vec3_colors: true,
            log_type_mismatches: true,
        }
    }
}
