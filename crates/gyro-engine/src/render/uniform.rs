use bytemuck::{Pod, Zeroable};

use crate::paint::Color;

/// Per-program uniform block, bound at `@group(0) @binding(0)`.
///
/// WGSL counterpart, declared by every stage that reads it:
///
/// ```wgsl
/// struct Scene {
///     transform: mat4x4<f32>,
///     light_pos: vec4<f32>,
///     view_pos: vec4<f32>,
///     object_color: vec4<f32>,
///     light_color: vec4<f32>,
/// };
/// ```
///
/// Flat-shaded programs only read `transform` (and sometimes `object_color`).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniform {
    /// Column-major model transform.
    pub transform: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
    pub view_pos: [f32; 4],
    pub object_color: [f32; 4],
    pub light_color: [f32; 4],
}

impl SceneUniform {
    pub(crate) fn min_binding_size() -> std::num::NonZeroU64 {
        std::num::NonZeroU64::new(std::mem::size_of::<SceneUniform>() as u64)
            .expect("SceneUniform has non-zero size by construction")
    }
}

impl Default for SceneUniform {
    fn default() -> Self {
        Self {
            transform: glam::Mat4::IDENTITY.to_cols_array_2d(),
            light_pos: [0.0; 4],
            view_pos: [0.0; 4],
            object_color: Color::WHITE.to_array(),
            light_color: Color::WHITE.to_array(),
        }
    }
}
