//! GPU rendering subsystem.
//!
//! The pieces a spinning demo is assembled from:
//! - `shader`: compile embedded WGSL stages and report diagnostics
//! - `program`: link a vertex + fragment stage into a render pipeline with a
//!   scene uniform, and draw meshes with it
//! - `mesh`: upload flat `f32` vertex arrays into vertex buffers
//!
//! Convention: model coordinates are already in clip space (x right, y up,
//! z in `[-1, 1]`); vertex shaders remap z into wgpu's `[0, 1]` depth range.

mod ctx;
mod layout;
pub mod mesh;
pub mod program;
pub mod shader;
mod uniform;

pub use ctx::{RenderCtx, RenderTarget};
pub use layout::VertexLayout;
pub use mesh::{Mesh, VertexData};
pub use program::{check_interface, Program, ProgramDesc};
pub use shader::{
    CompiledShader, IoType, Resource, ShaderError, ShaderSource, ShaderStage, Varying, INFO_LOG_LEN,
};
pub use uniform::SceneUniform;
