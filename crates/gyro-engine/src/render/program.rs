use wgpu::util::DeviceExt;

use super::mesh::Mesh;
use super::shader::{info_log, CompiledShader, IoType, Resource, ShaderError, ShaderStage};
use super::{RenderCtx, RenderTarget, SceneUniform, VertexLayout};

/// Everything needed to link two compiled stages into a [`Program`].
#[derive(Debug, Clone, Copy)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex: &'a CompiledShader,
    pub fragment: &'a CompiledShader,
    pub layout: VertexLayout,
    pub cull_mode: Option<wgpu::Face>,
    pub front_face: wgpu::FrontFace,
}

/// Checks that two stages form a complete program for `layout`:
/// - the stages are a vertex and a fragment stage, in that order
/// - every vertex input location is fed by a `layout` attribute of the same
///   scalar kind
/// - every fragment input location is written by the vertex stage with the
///   same type
/// - the only bound global is the scene uniform at `@group(0) @binding(0)`,
///   no larger than [`SceneUniform`]
///
/// All mismatches are reported together in one link log.
pub fn check_interface(
    label: &str,
    vertex: &CompiledShader,
    fragment: &CompiledShader,
    layout: VertexLayout,
) -> Result<(), ShaderError> {
    let mut problems = Vec::new();

    if vertex.stage() != ShaderStage::Vertex {
        problems.push(format!("{:?} attached as vertex stage is a {} shader", vertex.label(), vertex.stage()));
    }
    if fragment.stage() != ShaderStage::Fragment {
        problems.push(format!(
            "{:?} attached as fragment stage is a {} shader",
            fragment.label(),
            fragment.stage()
        ));
    }

    for input in vertex.inputs() {
        let location = input.location;
        match layout.format_at(location) {
            None => problems.push(format!(
                "vertex input @location({location}) has no attribute in the {layout:?} layout"
            )),
            Some(format) if !format_feeds(format, input.ty) => problems.push(format!(
                "vertex input @location({location}) is {} but the {layout:?} layout feeds {format:?}",
                type_name(input.ty)
            )),
            Some(_) => {}
        }
    }

    let written = vertex.outputs();
    for input in fragment.inputs() {
        let location = input.location;
        match written.iter().find(|out| out.location == location) {
            None => problems.push(format!(
                "fragment input @location({location}) is not written by the vertex stage"
            )),
            Some(out) if out.ty != input.ty || input.ty.is_none() => problems.push(format!(
                "fragment input @location({location}) reads {} but the vertex stage writes {}",
                type_name(input.ty),
                type_name(out.ty)
            )),
            Some(_) => {}
        }
    }

    for shader in [vertex, fragment] {
        for res in shader.resources() {
            check_resource(shader, &res, &mut problems);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ShaderError::Link {
            label: label.to_string(),
            log: info_log(problems.join("\n")),
        })
    }
}

fn check_resource(shader: &CompiledShader, res: &Resource, problems: &mut Vec<String>) {
    let stage = shader.stage();
    let name = &res.name;

    if (res.group, res.binding) != (0, 0) {
        problems.push(format!(
            "{stage} global {name:?} at @group({}) @binding({}) has no binding; only @group(0) @binding(0) is provided",
            res.group, res.binding
        ));
        return;
    }
    if !res.uniform {
        problems.push(format!("{stage} global {name:?} at @group(0) @binding(0) is not a uniform"));
        return;
    }

    let provided = SceneUniform::min_binding_size().get();
    if u64::from(res.size) > provided {
        problems.push(format!(
            "{stage} uniform {name:?} is {} bytes but the scene uniform buffer holds {provided}",
            res.size
        ));
    }
}

/// Whether an attribute of `format` can feed a shader input of type `ty`.
///
/// Component counts may differ; the scalar kind must match.
fn format_feeds(format: wgpu::VertexFormat, ty: Option<IoType>) -> bool {
    use wgpu::VertexFormat as F;

    let Some(ty) = ty else { return false };

    match format {
        F::Uint8 | F::Uint8x2 | F::Uint8x4 | F::Uint16 | F::Uint16x2 | F::Uint16x4 | F::Uint32
        | F::Uint32x2 | F::Uint32x3 | F::Uint32x4 => ty.kind == naga::ScalarKind::Uint,
        F::Sint8 | F::Sint8x2 | F::Sint8x4 | F::Sint16 | F::Sint16x2 | F::Sint16x4 | F::Sint32
        | F::Sint32x2 | F::Sint32x3 | F::Sint32x4 => ty.kind == naga::ScalarKind::Sint,
        F::Float64 | F::Float64x2 | F::Float64x3 | F::Float64x4 => {
            ty.kind == naga::ScalarKind::Float && ty.width == 8
        }
        // Float, unorm and snorm formats all read as floating point.
        _ => ty.kind == naga::ScalarKind::Float && ty.width != 8,
    }
}

fn type_name(ty: Option<IoType>) -> String {
    ty.map_or_else(|| "a non-numeric type".to_string(), |t| t.to_string())
}

/// A linked vertex + fragment pipeline with its scene uniform.
///
/// The uniform is the only GPU state touched every frame.
pub struct Program {
    label: String,
    layout: VertexLayout,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl Program {
    /// Checks the stage interface, then builds the render pipeline.
    ///
    /// The per-stage `wgpu::ShaderModule`s are dropped once the pipeline
    /// exists; the pipeline keeps what it needs.
    pub fn link(ctx: &RenderCtx<'_>, desc: &ProgramDesc<'_>) -> Result<Self, ShaderError> {
        check_interface(desc.label, desc.vertex, desc.fragment, desc.layout)?;

        // Validation errors the interface check cannot see (limits, backend
        // rules) surface here as link failures.
        let scope = ctx.device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vs = desc.vertex.create_module(ctx.device);
        let fs = desc.fragment.create_module(ctx.device);

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("gyro scene bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(SceneUniform::min_binding_size()),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("gyro program pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(desc.vertex.entry_point()),
                compilation_options: Default::default(),
                buffers: &[desc.layout.buffer_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(desc.fragment.entry_point()),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: desc.front_face,
                cull_mode: desc.cull_mode,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(ShaderError::Link {
                label: desc.label.to_string(),
                log: info_log(err.to_string()),
            });
        }

        let uniform_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("gyro scene ubo"),
            contents: bytemuck::bytes_of(&SceneUniform::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gyro scene bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::debug!(
            "linked program {:?} ({} + {})",
            desc.label,
            desc.vertex.label(),
            desc.fragment.label()
        );

        Ok(Self {
            label: desc.label.to_string(),
            layout: desc.layout,
            pipeline,
            uniform_buffer,
            bind_group,
        })
    }

    /// Uploads the scene uniform for the next draw.
    pub fn write_uniform(&self, queue: &wgpu::Queue, uniform: &SceneUniform) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Draws every mesh once, in order, on top of what `target` holds.
    pub fn draw(&self, target: &mut RenderTarget<'_>, meshes: &[Mesh]) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gyro draw pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);

        for mesh in meshes {
            debug_assert_eq!(mesh.layout(), self.layout, "mesh {:?} layout", mesh.label());
            if mesh.vertex_count() == 0 {
                continue;
            }
            rpass.set_vertex_buffer(0, mesh.buffer().slice(..));
            rpass.draw(0..mesh.vertex_count(), 0..1);
        }
    }

    /// Frees the GPU-side uniform buffer now instead of at drop.
    pub fn release(self) {
        self.uniform_buffer.destroy();
        log::debug!("released program {:?}", self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ShaderSource;

    const POSITION_VS: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}
"#;

    const NORMAL_VS: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) normal: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> VsOut {
    var out: VsOut;
    out.clip = vec4<f32>(position, 1.0);
    out.normal = normal;
    return out;
}
"#;

    const SOLID_FS: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

    const NORMAL_FS: &str = r#"
@fragment
fn fs_main(@location(0) normal: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(normalize(normal), 1.0);
}
"#;

    const UINT_VS: &str = r#"
@vertex
fn vs_main(@location(0) position: vec4<u32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position);
}
"#;

    const VEC2_VS: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VsOut {
    var out: VsOut;
    out.clip = vec4<f32>(position, 1.0);
    out.uv = position.xy;
    return out;
}
"#;

    const VEC4_FS: &str = r#"
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
"#;

    const OVERSIZED_UNIFORM_FS: &str = r#"
struct Scene {
    transform: mat4x4<f32>,
    colors: array<vec4<f32>, 8>,
};

@group(0) @binding(0) var<uniform> scene: Scene;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return scene.colors[0];
}
"#;

    const SCENE_FS: &str = r#"
struct Scene {
    transform: mat4x4<f32>,
    light_pos: vec4<f32>,
    view_pos: vec4<f32>,
    object_color: vec4<f32>,
    light_color: vec4<f32>,
};

@group(0) @binding(0) var<uniform> scene: Scene;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return scene.object_color;
}
"#;

    const SECOND_GROUP_FS: &str = r#"
@group(1) @binding(0) var<uniform> tint: vec4<f32>;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return tint;
}
"#;

    fn vs(src: &'static str) -> CompiledShader {
        ShaderSource::vertex("vs", src).compile().unwrap()
    }

    fn fs(src: &'static str) -> CompiledShader {
        ShaderSource::fragment("fs", src).compile().unwrap()
    }

    #[test]
    fn position_only_program_links() {
        assert!(check_interface("p", &vs(POSITION_VS), &fs(SOLID_FS), VertexLayout::Position).is_ok());
    }

    #[test]
    fn normal_program_links_with_normal_layout() {
        let r = check_interface("p", &vs(NORMAL_VS), &fs(NORMAL_FS), VertexLayout::PositionNormal);
        assert!(r.is_ok());
    }

    #[test]
    fn missing_normal_attribute_fails_to_link() {
        let err = check_interface("p", &vs(NORMAL_VS), &fs(NORMAL_FS), VertexLayout::Position)
            .unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
        assert!(err.log().contains("@location(1)"));
        assert!(err.to_string().starts_with("PROGRAM::LINK_FAILURE"));
    }

    #[test]
    fn unwritten_varying_fails_to_link() {
        let err = check_interface("p", &vs(POSITION_VS), &fs(NORMAL_FS), VertexLayout::Position)
            .unwrap_err();
        assert!(err.log().contains("not written by the vertex stage"));
    }

    #[test]
    fn swapped_stages_fail_to_link() {
        let err = check_interface("p", &fs(SOLID_FS), &vs(POSITION_VS), VertexLayout::Position)
            .unwrap_err();
        assert!(err.log().contains("attached as vertex stage"));
        assert!(err.log().contains("attached as fragment stage"));
    }

    #[test]
    fn integer_input_fed_by_float_attribute_fails_to_link() {
        let err = check_interface("p", &vs(UINT_VS), &fs(SOLID_FS), VertexLayout::Position)
            .unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
        assert!(err.log().contains("vec4<u32>"), "{}", err.log());
        assert!(err.log().contains("Float32x3"), "{}", err.log());
    }

    #[test]
    fn varying_type_mismatch_fails_to_link() {
        let err = check_interface("p", &vs(VEC2_VS), &fs(VEC4_FS), VertexLayout::Position)
            .unwrap_err();
        assert!(err.log().contains("reads vec4<f32>"), "{}", err.log());
        assert!(err.log().contains("writes vec2<f32>"), "{}", err.log());
    }

    #[test]
    fn uniform_larger_than_scene_fails_to_link() {
        let err = check_interface("p", &vs(POSITION_VS), &fs(OVERSIZED_UNIFORM_FS), VertexLayout::Position)
            .unwrap_err();
        assert!(err.log().contains("192 bytes"), "{}", err.log());
        assert!(err.log().contains("holds 128"), "{}", err.log());
    }

    #[test]
    fn scene_sized_uniform_links() {
        assert!(check_interface("p", &vs(POSITION_VS), &fs(SCENE_FS), VertexLayout::Position).is_ok());
    }

    #[test]
    fn binding_outside_scene_slot_fails_to_link() {
        let err = check_interface("p", &vs(POSITION_VS), &fs(SECOND_GROUP_FS), VertexLayout::Position)
            .unwrap_err();
        assert!(err.log().contains("@group(1) @binding(0)"), "{}", err.log());
    }

    #[test]
    fn every_mismatch_lands_in_one_log() {
        let err = check_interface("p", &vs(UINT_VS), &fs(OVERSIZED_UNIFORM_FS), VertexLayout::PositionNormal)
            .unwrap_err();
        assert_eq!(err.log().lines().count(), 2, "{}", err.log());
    }
}
