//! Texture and sampler traits

/// Texture pixel format
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    R8G8B8A8_UNORM,
    B8G8R8A8_UNORM,
    R32G32B32A32_SFLOAT,
    D32_FLOAT,
}

/// Texture descriptor
#[derive(Debug, Clone)]
pub struct TextureDesc {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    /// Initial pixel data (tightly packed), if any
    pub data: Option<Vec<u8>>,
}

/// Texture properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// GPU texture
pub trait Texture: Send + Sync {
    fn info(&self) -> &TextureInfo;
}

/// Sampler filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerFilter {
    Point,
    Linear,
}

/// Sampler addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerAddressMode {
    Repeat,
    ClampToEdge,
    MirroredRepeat,
}

/// Sampler descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerDesc {
    pub filter: SamplerFilter,
    pub address_mode: SamplerAddressMode,
}

impl SamplerDesc {
    /// Nearest-neighbour, wrapping
    pub const POINT: Self = Self { filter: SamplerFilter::Point, address_mode: SamplerAddressMode::Repeat };
    /// Bilinear, wrapping
    pub const LINEAR: Self = Self { filter: SamplerFilter::Linear, address_mode: SamplerAddressMode::Repeat };
}

/// GPU sampler
pub trait Sampler: Send + Sync {
    fn desc(&self) -> &SamplerDesc;
}
