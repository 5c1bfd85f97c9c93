//! Shader stage compilation.
//!
//! Stages are embedded WGSL text. Compilation parses and validates the text
//! on the CPU with naga (the same front-end wgpu uses) so that failures are
//! reported with a readable diagnostic before any GPU object is created.

use std::fmt;

use naga::valid::{Capabilities, ValidationFlags, Validator};

/// Diagnostics are cut to this many bytes, like a fixed-size info log.
pub const INFO_LOG_LEN: usize = 512;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A shader stage failed to compile, or two stages failed to link.
///
/// Either is unrecoverable for the caller: the embedded text is wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    Compile {
        label: String,
        stage: ShaderStage,
        log: String,
    },
    Link {
        label: String,
        log: String,
    },
}

impl ShaderError {
    /// The diagnostic text, at most [`INFO_LOG_LEN`] bytes.
    pub fn log(&self) -> &str {
        match self {
            ShaderError::Compile { log, .. } | ShaderError::Link { log, .. } => log,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Compile { label, stage, log } => {
                write!(f, "SHADER::COMPILE_FAILURE ({stage} shader {label:?})\n{log}")
            }
            ShaderError::Link { label, log } => {
                write!(f, "PROGRAM::LINK_FAILURE (program {label:?})\n{log}")
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Truncates a diagnostic to [`INFO_LOG_LEN`] bytes on a char boundary.
pub(crate) fn info_log(mut full: String) -> String {
    if full.len() > INFO_LOG_LEN {
        let mut end = INFO_LOG_LEN;
        while !full.is_char_boundary(end) {
            end -= 1;
        }
        full.truncate(end);
    }
    full
}

/// Shape of a user-defined stage input or output.
///
/// `components` is 1 for scalars. Anything that is not a scalar or vector
/// (which validation rejects at a location anyway) is `None`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IoType {
    pub kind: naga::ScalarKind,
    pub width: u8,
    pub components: u8,
}

impl IoType {
    fn of(inner: &naga::TypeInner) -> Option<Self> {
        match *inner {
            naga::TypeInner::Scalar(scalar) => Some(Self {
                kind: scalar.kind,
                width: scalar.width,
                components: 1,
            }),
            naga::TypeInner::Vector { size, scalar } => Some(Self {
                kind: scalar.kind,
                width: scalar.width,
                components: size as u8,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scalar = match (self.kind, self.width) {
            (naga::ScalarKind::Float, 2) => "f16",
            (naga::ScalarKind::Float, 8) => "f64",
            (naga::ScalarKind::Float, _) => "f32",
            (naga::ScalarKind::Sint, _) => "i32",
            (naga::ScalarKind::Uint, _) => "u32",
            (naga::ScalarKind::Bool, _) => "bool",
            _ => "abstract",
        };
        if self.components == 1 {
            f.write_str(scalar)
        } else {
            write!(f, "vec{}<{scalar}>", self.components)
        }
    }
}

/// One `@location` of an entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Varying {
    pub location: u32,
    pub ty: Option<IoType>,
}

/// A global bound at `@group(group) @binding(binding)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    pub group: u32,
    pub binding: u32,
    /// Declared in the `uniform` address space.
    pub uniform: bool,
    /// Size of the declared type in bytes.
    pub size: u32,
}

/// Embedded shader text for one stage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub label: &'static str,
    pub stage: ShaderStage,
    pub text: &'static str,
}

impl ShaderSource {
    pub const fn vertex(label: &'static str, text: &'static str) -> Self {
        Self { label, stage: ShaderStage::Vertex, text }
    }

    pub const fn fragment(label: &'static str, text: &'static str) -> Self {
        Self { label, stage: ShaderStage::Fragment, text }
    }

    /// Parses and validates the text and locates the stage's entry point.
    pub fn compile(&self) -> Result<CompiledShader, ShaderError> {
        let module = naga::front::wgsl::parse_str(self.text)
            .map_err(|e| self.compile_error(e.emit_to_string(self.text)))?;

        Validator::new(ValidationFlags::all(), Capabilities::all())
            .validate(&module)
            .map_err(|e| self.compile_error(e.emit_to_string(self.text)))?;

        let mut entries = module
            .entry_points
            .iter()
            .enumerate()
            .filter(|(_, ep)| ep.stage == self.stage.to_naga());

        let (entry_index, entry) = entries
            .next()
            .ok_or_else(|| self.compile_error(format!("no @{} entry point", self.stage)))?;

        if entries.next().is_some() {
            log::debug!(
                "{} shader {:?} has several @{} entry points; using {:?}",
                self.stage,
                self.label,
                self.stage,
                entry.name
            );
        }

        log::debug!("compiled {} shader {:?} ({})", self.stage, self.label, entry.name);

        Ok(CompiledShader {
            source: *self,
            module,
            entry_index,
        })
    }

    fn compile_error(&self, log: String) -> ShaderError {
        ShaderError::Compile {
            label: self.label.to_string(),
            stage: self.stage,
            log: info_log(log),
        }
    }
}

/// A validated shader stage, not yet on the GPU.
#[derive(Debug)]
pub struct CompiledShader {
    source: ShaderSource,
    module: naga::Module,
    entry_index: usize,
}

impl CompiledShader {
    pub fn label(&self) -> &'static str {
        self.source.label
    }

    pub fn stage(&self) -> ShaderStage {
        self.source.stage
    }

    fn entry(&self) -> &naga::EntryPoint {
        &self.module.entry_points[self.entry_index]
    }

    pub fn entry_point(&self) -> &str {
        &self.entry().name
    }

    /// User-defined input locations of the entry point, sorted.
    pub fn input_locations(&self) -> Vec<u32> {
        self.inputs().into_iter().map(|v| v.location).collect()
    }

    /// User-defined output locations of the entry point, sorted.
    pub fn output_locations(&self) -> Vec<u32> {
        self.outputs().into_iter().map(|v| v.location).collect()
    }

    /// User-defined inputs of the entry point with their types, by location.
    pub fn inputs(&self) -> Vec<Varying> {
        let mut out = Vec::new();
        for arg in &self.entry().function.arguments {
            self.collect_located(arg.ty, arg.binding.as_ref(), &mut out);
        }
        out.sort_unstable_by_key(|v| v.location);
        out
    }

    /// User-defined outputs of the entry point with their types, by location.
    pub fn outputs(&self) -> Vec<Varying> {
        let mut out = Vec::new();
        if let Some(result) = &self.entry().function.result {
            self.collect_located(result.ty, result.binding.as_ref(), &mut out);
        }
        out.sort_unstable_by_key(|v| v.location);
        out
    }

    /// Every bound global the module declares.
    pub fn resources(&self) -> Vec<Resource> {
        self.module
            .global_variables
            .iter()
            .filter_map(|(_, var)| {
                let binding = var.binding.as_ref()?;
                Some(Resource {
                    name: var.name.clone().unwrap_or_default(),
                    group: binding.group,
                    binding: binding.binding,
                    uniform: var.space == naga::AddressSpace::Uniform,
                    size: self.module.types[var.ty].inner.size(self.module.to_ctx()),
                })
            })
            .collect()
    }

    fn collect_located(
        &self,
        ty: naga::Handle<naga::Type>,
        binding: Option<&naga::Binding>,
        out: &mut Vec<Varying>,
    ) {
        match binding {
            Some(naga::Binding::Location { location, .. }) => out.push(Varying {
                location: *location,
                ty: IoType::of(&self.module.types[ty].inner),
            }),
            Some(_) => {}
            // Unbound arguments/results are structs whose members carry the bindings.
            None => {
                if let naga::TypeInner::Struct { members, .. } = &self.module.types[ty].inner {
                    for member in members {
                        self.collect_located(member.ty, member.binding.as_ref(), out);
                    }
                }
            }
        }
    }

    /// Hands the stage to wgpu.
    pub fn create_module(&self, device: &wgpu::Device) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.source.label),
            source: wgpu::ShaderSource::Wgsl(self.source.text.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) tint: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> VsOut {
    var out: VsOut;
    out.clip = vec4<f32>(position, 1.0);
    out.tint = normal;
    return out;
}
"#;

    const FS: &str = r#"
@fragment
fn fs_main(@location(0) tint: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(tint, 1.0);
}
"#;

    #[test]
    fn compiles_valid_vertex_stage() {
        let shader = ShaderSource::vertex("vs", VS).compile().unwrap();
        assert_eq!(shader.stage(), ShaderStage::Vertex);
        assert_eq!(shader.entry_point(), "vs_main");
        assert_eq!(shader.input_locations(), vec![0, 1]);
        assert_eq!(shader.output_locations(), vec![0]);
    }

    #[test]
    fn compiles_valid_fragment_stage() {
        let shader = ShaderSource::fragment("fs", FS).compile().unwrap();
        assert_eq!(shader.entry_point(), "fs_main");
        assert_eq!(shader.input_locations(), vec![0]);
    }

    #[test]
    fn syntax_error_is_a_compile_failure() {
        let err = ShaderSource::vertex("broken", "@vertex fn vs_main( {")
            .compile()
            .unwrap_err();
        match &err {
            ShaderError::Compile { label, stage, log } => {
                assert_eq!(label, "broken");
                assert_eq!(*stage, ShaderStage::Vertex);
                assert!(!log.is_empty());
            }
            other => panic!("expected compile error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("SHADER::COMPILE_FAILURE"));
    }

    #[test]
    fn type_error_is_a_compile_failure() {
        let src = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    let x: f32 = vec2<f32>(1.0, 2.0);
    return vec4<f32>(x);
}
"#;
        let err = ShaderSource::fragment("bad types", src).compile().unwrap_err();
        assert!(matches!(err, ShaderError::Compile { .. }));
    }

    #[test]
    fn missing_entry_point_is_a_compile_failure() {
        // Valid WGSL, but only a fragment entry point.
        let err = ShaderSource::vertex("wrong stage", FS).compile().unwrap_err();
        assert!(err.log().contains("@vertex"));
    }

    #[test]
    fn locations_carry_their_types() {
        let vs = ShaderSource::vertex("vs", VS).compile().unwrap();
        let vec3_f32 = Some(IoType { kind: naga::ScalarKind::Float, width: 4, components: 3 });
        assert_eq!(
            vs.inputs(),
            vec![
                Varying { location: 0, ty: vec3_f32 },
                Varying { location: 1, ty: vec3_f32 },
            ]
        );
        assert_eq!(vs.outputs(), vec![Varying { location: 0, ty: vec3_f32 }]);
        assert_eq!(vec3_f32.unwrap().to_string(), "vec3<f32>");
    }

    #[test]
    fn uniform_resources_report_size() {
        let src = r#"
struct Block {
    m: mat4x4<f32>,
    v: vec4<f32>,
};

@group(0) @binding(0) var<uniform> block: Block;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return block.v;
}
"#;
        let fs = ShaderSource::fragment("block", src).compile().unwrap();
        assert_eq!(
            fs.resources(),
            vec![Resource { name: "block".into(), group: 0, binding: 0, uniform: true, size: 80 }]
        );
    }

    #[test]
    fn info_log_is_truncated_on_char_boundary() {
        let long = "é".repeat(INFO_LOG_LEN);
        let log = info_log(long);
        assert!(log.len() <= INFO_LOG_LEN);
        assert!(log.len() >= INFO_LOG_LEN - 1);
        assert!(log.chars().all(|c| c == 'é'));
    }

    #[test]
    fn short_info_log_is_untouched() {
        assert_eq!(info_log("oops".to_string()), "oops");
    }
}
