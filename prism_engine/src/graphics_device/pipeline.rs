//! Pipeline trait, fixed-function state and pipeline descriptor

use std::sync::Arc;
use crate::graphics_device::{Shader, BufferFormat, ResourceLayout};

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    TriangleList,
    TriangleStrip,
    LineList,
    LineStrip,
    PointList,
}

// ===== VERTEX INPUT =====

/// Vertex input rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexInputRate {
    /// Data is per-vertex
    Vertex,
    /// Data is per-instance
    Instance,
}

/// Vertex attribute description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Attribute name in the shader source
    pub name: String,
    /// Attribute location in shader
    pub location: u32,
    /// Binding index
    pub binding: u32,
    /// Format of the attribute (data type and component count)
    pub format: BufferFormat,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// Vertex binding description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBinding {
    pub binding: u32,
    /// Stride in bytes between consecutive elements
    pub stride: u32,
    pub input_rate: VertexInputRate,
}

/// Vertex input layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    pub bindings: Vec<VertexBinding>,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Single interleaved binding built from `(name, format)` pairs, locations in order
    pub fn interleaved(fields: &[(&str, BufferFormat)]) -> Self {
        let mut attributes = Vec::with_capacity(fields.len());
        let mut offset = 0;
        for (location, (name, format)) in fields.iter().enumerate() {
            attributes.push(VertexAttribute {
                name: name.to_string(),
                location: location as u32,
                binding: 0,
                format: *format,
                offset,
            });
            offset += format.size_bytes();
        }

        Self {
            bindings: vec![VertexBinding { binding: 0, stride: offset, input_rate: VertexInputRate::Vertex }],
            attributes,
        }
    }

    /// 2D sprite vertex: position (vec2), texcoord (vec2), color (vec4)
    pub fn position_texcoord_color() -> Self {
        Self::interleaved(&[
            ("Position", BufferFormat::R32G32_SFLOAT),
            ("TexCoords", BufferFormat::R32G32_SFLOAT),
            ("Color", BufferFormat::R32G32B32A32_SFLOAT),
        ])
    }

    /// 3D mesh vertex: position (vec3), normal (vec3), texcoord (vec2), color (vec4)
    pub fn position_normal_texcoord_color() -> Self {
        Self::interleaved(&[
            ("Position", BufferFormat::R32G32B32_SFLOAT),
            ("Normal", BufferFormat::R32G32B32_SFLOAT),
            ("TexCoords", BufferFormat::R32G32_SFLOAT),
            ("Color", BufferFormat::R32G32B32A32_SFLOAT),
        ])
    }

    /// Stride of binding 0, or 0 if the layout is empty
    pub fn stride(&self) -> u32 {
        self.bindings.first().map(|b| b.stride).unwrap_or(0)
    }
}

// ===== RASTERIZATION =====

/// Face culling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Front face winding order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    CounterClockwise,
    Clockwise,
}

/// Polygon rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

/// Rasterization fixed-function state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizationState {
    pub cull_mode: CullMode,
    pub front_face: FrontFace,
    pub polygon_mode: PolygonMode,
    pub depth_clip_enable: bool,
    pub scissor_test_enable: bool,
}

impl Default for RasterizationState {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            front_face: FrontFace::Clockwise,
            polygon_mode: PolygonMode::Fill,
            depth_clip_enable: true,
            scissor_test_enable: false,
        }
    }
}

// ===== DEPTH =====

/// Comparison operator for depth tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Never,
    Less,
    Equal,
    LessOrEqual,
    Greater,
    NotEqual,
    GreaterOrEqual,
    Always,
}

/// Depth testing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilState {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare_op: CompareOp,
}

impl DepthStencilState {
    /// No depth test, no depth write
    pub const DISABLED: Self = Self {
        depth_test_enable: false,
        depth_write_enable: false,
        depth_compare_op: CompareOp::LessOrEqual,
    };

    /// Test and write with less-or-equal
    pub const LESS_EQUAL_WRITE: Self = Self {
        depth_test_enable: true,
        depth_write_enable: true,
        depth_compare_op: CompareOp::LessOrEqual,
    };
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self::DISABLED
    }
}

// ===== COLOR BLEND =====

/// Blend factor for color blending equations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    SrcColor,
    OneMinusSrcColor,
}

/// Blend operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendOp {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Color blending state for a single color target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBlendState {
    pub blend_enable: bool,
    pub src_color_factor: BlendFactor,
    pub dst_color_factor: BlendFactor,
    pub color_blend_op: BlendOp,
    pub src_alpha_factor: BlendFactor,
    pub dst_alpha_factor: BlendFactor,
    pub alpha_blend_op: BlendOp,
}

impl ColorBlendState {
    /// Blending disabled
    pub const OVERRIDE: Self = Self {
        blend_enable: false,
        src_color_factor: BlendFactor::One,
        dst_color_factor: BlendFactor::Zero,
        color_blend_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::One,
        dst_alpha_factor: BlendFactor::Zero,
        alpha_blend_op: BlendOp::Add,
    };

    /// Standard non-premultiplied alpha blending
    pub const ALPHA_BLEND: Self = Self {
        blend_enable: true,
        src_color_factor: BlendFactor::SrcAlpha,
        dst_color_factor: BlendFactor::OneMinusSrcAlpha,
        color_blend_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::SrcAlpha,
        dst_alpha_factor: BlendFactor::OneMinusSrcAlpha,
        alpha_blend_op: BlendOp::Add,
    };

    /// Additive blending
    pub const ADDITIVE: Self = Self {
        blend_enable: true,
        src_color_factor: BlendFactor::SrcAlpha,
        dst_color_factor: BlendFactor::One,
        color_blend_op: BlendOp::Add,
        src_alpha_factor: BlendFactor::SrcAlpha,
        dst_alpha_factor: BlendFactor::One,
        alpha_blend_op: BlendOp::Add,
    };
}

impl Default for ColorBlendState {
    fn default() -> Self {
        Self::ALPHA_BLEND
    }
}

// ===== PIPELINE =====

/// Fixed-function state that can be overridden per binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineState {
    pub color_blend: ColorBlendState,
    pub depth_stencil: DepthStencilState,
    pub rasterization: RasterizationState,
    pub topology: PrimitiveTopology,
}

impl Default for PrimitiveTopology {
    fn default() -> Self {
        PrimitiveTopology::TriangleList
    }
}

/// Pipeline descriptor
#[derive(Clone)]
pub struct PipelineDesc {
    pub vertex_shader: Arc<dyn Shader>,
    pub fragment_shader: Arc<dyn Shader>,
    pub vertex_layout: VertexLayout,
    pub resource_layouts: Vec<Arc<dyn ResourceLayout>>,
    pub state: PipelineState,
    /// Number of color targets in the output framebuffer
    pub color_target_count: u32,
    /// Whether the output framebuffer has a depth target
    pub has_depth_target: bool,
}

/// Graphics pipeline
pub trait Pipeline: Send + Sync {
    fn state(&self) -> &PipelineState;
}
