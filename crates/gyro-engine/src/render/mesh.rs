use wgpu::util::DeviceExt;

use super::VertexLayout;

/// A flat `f32` vertex array read through a fixed [`VertexLayout`].
///
/// Triangles are listed vertex by vertex with no index buffer. The vertex
/// count is `floats.len() / stride`; a trailing partial vertex is ignored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexData<'a> {
    floats: &'a [f32],
    layout: VertexLayout,
}

impl<'a> VertexData<'a> {
    pub fn from_flat(floats: &'a [f32], layout: VertexLayout) -> Self {
        let rem = floats.len() % layout.stride_floats();
        if rem != 0 {
            log::debug!(
                "vertex array of {} floats leaves {rem} trailing floats for {layout:?}",
                floats.len()
            );
        }
        Self { floats, layout }
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    pub fn vertex_count(&self) -> u32 {
        (self.floats.len() / self.layout.stride_floats()) as u32
    }

    /// The floats that make up whole vertices.
    pub fn floats(&self) -> &'a [f32] {
        let used = self.vertex_count() as usize * self.layout.stride_floats();
        &self.floats[..used]
    }

    /// Bytes uploaded to the GPU, exactly the floats as given.
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.floats())
    }
}

/// A GPU vertex buffer holding one [`VertexData`].
pub struct Mesh {
    label: String,
    layout: VertexLayout,
    vertex_count: u32,
    buffer: wgpu::Buffer,
}

impl Mesh {
    /// Copies `data` into a new vertex buffer, untransformed.
    pub fn upload(device: &wgpu::Device, label: &str, data: &VertexData<'_>) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: data.as_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!("uploaded mesh {label:?}: {} vertices", data.vertex_count());

        Self {
            label: label.to_string(),
            layout: data.layout(),
            vertex_count: data.vertex_count(),
            buffer,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    /// Vertices uploaded, which is also the count drawn.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Frees the GPU buffer now instead of at drop.
    pub fn release(self) {
        self.buffer.destroy();
        log::debug!("released mesh {:?}", self.label);
    }
}
