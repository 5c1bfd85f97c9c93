//! Three spinning-geometry demos on top of `gyro-engine`.
//!
//! Each binary picks a [`DemoSpec`] from [`variants`] and hands it to [`run`].

pub mod demo;
pub mod geometry;
pub mod shaders;
pub mod variants;

pub use demo::{DemoSpec, SpinDemo};

use gyro_engine::fatal::abort_init;
use gyro_engine::logging::{init_logging, LoggingConfig};
use gyro_engine::window::Runtime;

/// Opens the demo window and renders until it is closed.
///
/// Any setup failure, including a shader that fails to compile or link,
/// terminates the process.
pub fn run(spec: DemoSpec) {
    init_logging(LoggingConfig::default());
    log::info!("starting {}", spec.name);

    let config = spec.runtime_config();
    let gpu_init = spec.gpu_init();

    if let Err(err) = Runtime::run(config, gpu_init, SpinDemo::new(spec)) {
        abort_init(err);
    }
}
