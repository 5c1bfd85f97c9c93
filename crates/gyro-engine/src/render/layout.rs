/// Fixed vertex attribute layouts for flat, non-indexed vertex arrays.
///
/// | Layout           | Stride (floats) | location 0        | location 1      |
/// |------------------|-----------------|-------------------|-----------------|
/// | `Position`       | 3               | position `vec3`   | none            |
/// | `PositionNormal` | 6               | position `vec3`   | normal `vec3`   |
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VertexLayout {
    Position,
    PositionNormal,
}

impl VertexLayout {
    pub const POSITION_LOCATION: u32 = 0;
    pub const NORMAL_LOCATION: u32 = 1;

    const POSITION_ATTRS: [wgpu::VertexAttribute; 1] =
        wgpu::vertex_attr_array![0 => Float32x3];

    const POSITION_NORMAL_ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];

    /// Floats per vertex.
    #[inline]
    pub const fn stride_floats(self) -> usize {
        match self {
            VertexLayout::Position => 3,
            VertexLayout::PositionNormal => 6,
        }
    }

    #[inline]
    pub const fn stride_bytes(self) -> u64 {
        (self.stride_floats() * std::mem::size_of::<f32>()) as u64
    }

    pub fn attributes(self) -> &'static [wgpu::VertexAttribute] {
        match self {
            VertexLayout::Position => &Self::POSITION_ATTRS,
            VertexLayout::PositionNormal => &Self::POSITION_NORMAL_ATTRS,
        }
    }

    /// Whether a vertex shader input at `location` is fed by this layout.
    pub fn provides(self, location: u32) -> bool {
        self.format_at(location).is_some()
    }

    /// Format of the attribute feeding `location`, if any.
    pub fn format_at(self, location: u32) -> Option<wgpu::VertexFormat> {
        self.attributes()
            .iter()
            .find(|a| a.shader_location == location)
            .map(|a| a.format)
    }

    pub fn buffer_layout(self) -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride_bytes(),
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: self.attributes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides() {
        assert_eq!(VertexLayout::Position.stride_floats(), 3);
        assert_eq!(VertexLayout::Position.stride_bytes(), 12);
        assert_eq!(VertexLayout::PositionNormal.stride_floats(), 6);
        assert_eq!(VertexLayout::PositionNormal.stride_bytes(), 24);
    }

    #[test]
    fn normal_follows_position() {
        let attrs = VertexLayout::PositionNormal.attributes();
        assert_eq!(attrs[0].shader_location, VertexLayout::POSITION_LOCATION);
        assert_eq!(attrs[0].offset, 0);
        assert_eq!(attrs[1].shader_location, VertexLayout::NORMAL_LOCATION);
        assert_eq!(attrs[1].offset, 12);
    }

    #[test]
    fn position_layout_has_no_normal() {
        assert!(VertexLayout::Position.provides(0));
        assert!(!VertexLayout::Position.provides(1));
        assert!(VertexLayout::PositionNormal.provides(1));
    }

    #[test]
    fn every_attribute_is_three_floats() {
        assert_eq!(VertexLayout::Position.format_at(0), Some(wgpu::VertexFormat::Float32x3));
        assert_eq!(VertexLayout::PositionNormal.format_at(1), Some(wgpu::VertexFormat::Float32x3));
        assert_eq!(VertexLayout::Position.format_at(1), None);
    }
}
