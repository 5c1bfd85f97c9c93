/// Surface options for the GPU layer.
///
/// Features and limits are not configurable: the demos need nothing beyond
/// the WebGPU defaults, so the device always requests those.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when one is offered.
    ///
    /// The demos turn this off so literal colours reach the screen without a
    /// gamma curve applied.
    pub prefer_srgb: bool,

    /// Defaults to `Fifo`, which is vsync'd and always supported.
    pub present_mode: wgpu::PresentMode,

    /// Falls back to the surface's first supported mode when unset or
    /// unsupported.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,
}

impl GpuInit {
    /// Frames the surface may queue ahead of presentation.
    pub(crate) const FRAME_LATENCY: u32 = 2;
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
        }
    }
}
