use std::time::Duration;

use glam::Vec3;
use winit::dpi::LogicalSize;

use gyro_engine::core::{App, AppControl, FrameCtx};
use gyro_engine::device::GpuInit;
use gyro_engine::paint::Color;
use gyro_engine::render::{
    Mesh, Program, ProgramDesc, RenderCtx, SceneUniform, ShaderSource, VertexData, VertexLayout,
};
use gyro_engine::transform::Spin;
use gyro_engine::window::RuntimeConfig;

/// Initial window size shared by every demo, in logical pixels.
pub const WINDOW_SIZE: (f64, f64) = (800.0, 800.0);

/// One degree, the per-frame rotation of every demo.
pub const DEGREE: f32 = std::f32::consts::PI / 180.0;

/// Everything that differs between the demos.
#[derive(Debug, Clone)]
pub struct DemoSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
    pub layout: VertexLayout,
    /// One vertex buffer per entry, drawn in order.
    pub meshes: Vec<&'static [f32]>,
    pub clear: Color,
    pub spin_axis: Vec3,
    pub spin_per_frame: f32,
    /// Scene uniform minus the transform, which the spin overwrites.
    pub scene: SceneUniform,
    pub cull_mode: Option<wgpu::Face>,
    pub front_face: wgpu::FrontFace,
    pub frame_sleep: Option<Duration>,
    /// Destroy GPU buffers explicitly at shutdown instead of leaving them to drop.
    pub release_on_exit: bool,
}

impl DemoSpec {
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.title.to_string(),
            initial_size: LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1),
            frame_sleep: self.frame_sleep,
        }
    }

    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            prefer_srgb: false,
            ..GpuInit::default()
        }
    }

    pub fn vertex_data(&self) -> impl Iterator<Item = VertexData<'static>> + '_ {
        let layout = self.layout;
        self.meshes
            .iter()
            .copied()
            .map(move |floats| VertexData::from_flat(floats, layout))
    }
}

struct Resources {
    program: Program,
    meshes: Vec<Mesh>,
}

/// Spins a fixed set of meshes with one program until the window closes.
pub struct SpinDemo {
    spec: DemoSpec,
    spin: Spin,
    resources: Option<Resources>,
}

impl SpinDemo {
    pub fn new(spec: DemoSpec) -> Self {
        let spin = Spin::new(spec.spin_axis, spec.spin_per_frame);
        Self {
            spec,
            spin,
            resources: None,
        }
    }

    pub fn spec(&self) -> &DemoSpec {
        &self.spec
    }

    pub fn spin(&self) -> &Spin {
        &self.spin
    }

    /// Scene uniform for the current orientation.
    pub fn uniform(&self) -> SceneUniform {
        SceneUniform {
            transform: self.spin.to_cols_array_2d(),
            ..self.spec.scene
        }
    }

    /// Advances the rotation by one frame and returns the uniform to upload.
    pub fn step(&mut self) -> SceneUniform {
        self.spin.advance();
        self.uniform()
    }
}

impl App for SpinDemo {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> anyhow::Result<()> {
        let vertex = self.spec.vertex.compile()?;
        let fragment = self.spec.fragment.compile()?;

        let program = Program::link(
            ctx,
            &ProgramDesc {
                label: self.spec.name,
                vertex: &vertex,
                fragment: &fragment,
                layout: self.spec.layout,
                cull_mode: self.spec.cull_mode,
                front_face: self.spec.front_face,
            },
        )?;

        let meshes: Vec<Mesh> = self
            .spec
            .vertex_data()
            .enumerate()
            .map(|(i, data)| Mesh::upload(ctx.device, &format!("{} mesh {i}", self.spec.name), &data))
            .collect();

        log::info!(
            "{}: {} meshes, {} vertices",
            self.spec.name,
            meshes.len(),
            meshes.iter().map(Mesh::vertex_count).sum::<u32>()
        );

        self.resources = Some(Resources { program, meshes });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let uniform = self.step();
        let Some(res) = self.resources.as_ref() else {
            return AppControl::Continue;
        };

        ctx.render(self.spec.clear, |rctx, target| {
            res.program.write_uniform(rctx.queue, &uniform);
            res.program.draw(target, &res.meshes);
        })
    }

    fn on_exit(&mut self) {
        let Some(res) = self.resources.take() else { return };

        if self.spec.release_on_exit {
            res.program.release();
            for mesh in res.meshes {
                mesh.release();
            }
            log::info!("{}: GPU resources released", self.spec.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants;
    use glam::{Mat4, Quat};

    #[test]
    fn step_composes_one_rotation_per_frame() {
        for spec in variants::all() {
            let mut demo = SpinDemo::new(spec);
            let step = demo.spin().step();

            let mut expected = Quat::IDENTITY;
            for _ in 0..240 {
                demo.step();
                expected = expected * step;
            }

            let got = Mat4::from_cols_array_2d(&demo.uniform().transform);
            assert!(
                got.abs_diff_eq(Mat4::from_quat(expected), 1e-4),
                "{}",
                demo.spec().name
            );
            assert_eq!(demo.spin().frames(), 240);
        }
    }

    #[test]
    fn uniform_keeps_scene_parameters() {
        let mut demo = SpinDemo::new(variants::lit_cube());
        let scene = demo.spec().scene;
        let u = demo.step();
        assert_eq!(u.light_pos, scene.light_pos);
        assert_eq!(u.object_color, scene.object_color);
        assert_ne!(u.transform, scene.transform);
    }

    #[test]
    fn runtime_config_uses_fixed_window_size() {
        for spec in variants::all() {
            let config = spec.runtime_config();
            assert_eq!(config.initial_size, LogicalSize::new(800.0, 800.0));
            assert_eq!(config.title, spec.title);
        }
    }

    #[test]
    fn surfaces_are_not_srgb() {
        assert!(!variants::flat_cube().gpu_init().prefer_srgb);
    }
}
