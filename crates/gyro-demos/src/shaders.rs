//! Embedded shader stages.

use gyro_engine::render::ShaderSource;

/// Applies the scene transform to a bare position.
pub const TRANSFORM_VS: ShaderSource =
    ShaderSource::vertex("transform.vert", include_str!("shaders/transform.vert.wgsl"));

/// Solid red.
pub const RED_FS: ShaderSource =
    ShaderSource::fragment("red.frag", include_str!("shaders/red.frag.wgsl"));

/// Solid `object_color` from the scene uniform.
pub const TINT_FS: ShaderSource =
    ShaderSource::fragment("tint.frag", include_str!("shaders/tint.frag.wgsl"));

/// Transforms position and normal for per-fragment lighting.
pub const PHONG_VS: ShaderSource =
    ShaderSource::vertex("phong.vert", include_str!("shaders/phong.vert.wgsl"));

/// Ambient + diffuse + specular lighting from one point light.
pub const PHONG_FS: ShaderSource =
    ShaderSource::fragment("phong.frag", include_str!("shaders/phong.frag.wgsl"));
