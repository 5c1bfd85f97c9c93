//! The three demo configurations.

use std::time::Duration;

use glam::Vec3;

use gyro_engine::paint::Color;
use gyro_engine::render::{SceneUniform, VertexLayout};

use crate::demo::{DemoSpec, DEGREE};
use crate::geometry::{BOX_FACES, LIT_CUBE, TWO_TRIANGLES};
use crate::shaders::{PHONG_FS, PHONG_VS, RED_FS, TINT_FS, TRANSFORM_VS};

/// Front and back faces of a box in flat red, one buffer per triangle,
/// turning about the vertical axis.
pub fn flat_cube() -> DemoSpec {
    DemoSpec {
        name: "flat_cube",
        title: "gyro: flat cube",
        vertex: TRANSFORM_VS,
        fragment: RED_FS,
        layout: VertexLayout::Position,
        meshes: BOX_FACES.iter().map(|t| t.as_slice()).collect(),
        clear: Color::rgb(0.2, 0.5, 0.5),
        spin_axis: Vec3::Y,
        spin_per_frame: DEGREE,
        scene: SceneUniform::default(),
        cull_mode: None,
        front_face: wgpu::FrontFace::Ccw,
        frame_sleep: None,
        release_on_exit: false,
    }
}

/// Two triangles in one colour turning in the screen plane, paced with a
/// 16 ms sleep per frame.
pub fn two_triangles() -> DemoSpec {
    DemoSpec {
        name: "two_triangles",
        title: "gyro: two triangles",
        vertex: TRANSFORM_VS,
        fragment: TINT_FS,
        layout: VertexLayout::Position,
        meshes: TWO_TRIANGLES.iter().map(|t| t.as_slice()).collect(),
        clear: Color::rgb(0.2, 0.3, 0.3),
        spin_axis: Vec3::Z,
        spin_per_frame: DEGREE,
        scene: SceneUniform {
            object_color: Color::rgb(1.0, 0.5, 0.2).to_array(),
            ..SceneUniform::default()
        },
        cull_mode: None,
        front_face: wgpu::FrontFace::Ccw,
        frame_sleep: Some(Duration::from_millis(16)),
        release_on_exit: false,
    }
}

/// A Phong-lit cube tumbling about a tilted axis. Releases its GPU buffers
/// explicitly on shutdown.
pub fn lit_cube() -> DemoSpec {
    DemoSpec {
        name: "lit_cube",
        title: "gyro: lit cube",
        vertex: PHONG_VS,
        fragment: PHONG_FS,
        layout: VertexLayout::PositionNormal,
        meshes: vec![LIT_CUBE.as_slice()],
        clear: Color::rgb(0.1, 0.1, 0.1),
        spin_axis: Vec3::new(0.5, 1.0, 0.0),
        spin_per_frame: DEGREE,
        scene: SceneUniform {
            // The viewer looks down +z from negative z.
            light_pos: [1.2, 1.0, -2.0, 1.0],
            view_pos: [0.0, 0.0, -3.0, 1.0],
            object_color: Color::rgb(1.0, 0.5, 0.31).to_array(),
            light_color: Color::WHITE.to_array(),
            ..SceneUniform::default()
        },
        // No depth buffer: back-face culling hides the far side of the cube.
        // There is no projection to flip z, so outward-CCW triangles appear
        // clockwise on screen.
        cull_mode: Some(wgpu::Face::Back),
        front_face: wgpu::FrontFace::Cw,
        frame_sleep: None,
        release_on_exit: true,
    }
}

pub fn all() -> [DemoSpec; 3] {
    [flat_cube(), two_triangles(), lit_cube()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyro_engine::coords::Viewport;
    use gyro_engine::core::{AppControl, LoopEvent, WindowState};
    use gyro_engine::input::{InputEvent, Key, KeyState};
    use gyro_engine::render::check_interface;
    use gyro_engine::window::Lifecycle;

    use crate::demo::SpinDemo;

    fn press(key: Key) -> LoopEvent {
        LoopEvent::Input(InputEvent::Key { key, state: KeyState::Pressed, repeat: false })
    }

    #[test]
    fn close_request_right_after_start_ends_every_demo() {
        for spec in all() {
            let (w, h) = crate::demo::WINDOW_SIZE;
            for ev in [press(Key::Escape), press(Key::Q), LoopEvent::CloseRequested] {
                let mut state = WindowState::new(Viewport::new(w as u32, h as u32));
                assert_eq!(state.apply(&ev), AppControl::Exit, "{} on {ev:?}", spec.name);
            }
        }
    }

    #[test]
    fn close_request_shuts_every_demo_down_without_error() {
        for spec in all() {
            let (w, h) = crate::demo::WINDOW_SIZE;
            let name = spec.name;
            let mut lifecycle = Lifecycle::new(SpinDemo::new(spec));
            let mut state = WindowState::new(Viewport::new(w as u32, h as u32));

            let control = lifecycle.dispatch(Some(&mut state), &[press(Key::Escape)]);
            assert_eq!(control, AppControl::Exit, "{name}");
            assert!(lifecycle.exit(), "{name}");
            assert_eq!(lifecycle.app().spin().frames(), 0, "{name}");
            assert!(lifecycle.finish().is_ok(), "{name}");
        }
    }

    #[test]
    fn every_demo_program_links() {
        for spec in all() {
            let vs = spec.vertex.compile().unwrap();
            let fs = spec.fragment.compile().unwrap();
            check_interface(spec.name, &vs, &fs, spec.layout)
                .unwrap_or_else(|e| panic!("{e}"));
        }
    }

    #[test]
    fn uploaded_vertex_counts_match_literals() {
        for spec in all() {
            let stride = spec.layout.stride_floats();
            for (floats, data) in spec.meshes.iter().zip(spec.vertex_data()) {
                assert_eq!(data.vertex_count() as usize, floats.len() / stride);
                assert_eq!(data.floats(), *floats);
            }
        }
    }

    #[test]
    fn mesh_counts_per_demo() {
        assert_eq!(flat_cube().meshes.len(), 4);
        assert_eq!(two_triangles().meshes.len(), 2);
        assert_eq!(lit_cube().meshes.len(), 1);
    }

    #[test]
    fn only_two_triangles_sleeps() {
        assert_eq!(two_triangles().frame_sleep, Some(Duration::from_millis(16)));
        assert!(flat_cube().frame_sleep.is_none());
        assert!(lit_cube().frame_sleep.is_none());
    }

    #[test]
    fn only_lit_cube_releases_explicitly() {
        let released: Vec<_> = all().into_iter().filter(|s| s.release_on_exit).map(|s| s.name).collect();
        assert_eq!(released, vec!["lit_cube"]);
    }
}
