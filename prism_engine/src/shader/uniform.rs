//! Uniform value types and GPU packing rules
//!
//! Every uniform entry, and every element of a uniform array, occupies a
//! multiple of 16 bytes in its stage buffer. A `float` takes 16 bytes, a
//! `vec3` takes 16, a `mat4` takes 64, and a `vec3[3]` takes 48.

use std::fmt;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Alignment of uniform entries and array elements, in bytes
pub const UNIFORM_ALIGNMENT: u64 = 16;

/// Round `natural_size` up to the next multiple of 16
pub fn packed_size(natural_size: u64) -> u64 {
    natural_size.div_ceil(UNIFORM_ALIGNMENT) * UNIFORM_ALIGNMENT
}

// ============================================================================
// Color
// ============================================================================

/// RGBA color with float components, packed like a vec4
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

// ============================================================================
// Uniform type tags
// ============================================================================

/// Element kind of a uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Float,
    Int,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
    Color,
}

impl UniformKind {
    /// Size in bytes before alignment
    pub fn natural_size(&self) -> u64 {
        match self {
            UniformKind::Float | UniformKind::Int => 4,
            UniformKind::Vec2 => 8,
            UniformKind::Vec3 => 12,
            UniformKind::Vec4 | UniformKind::Color => 16,
            UniformKind::Mat4 => 64,
        }
    }

    /// Size in bytes of one element once packed
    pub fn packed_size(&self) -> u64 {
        packed_size(self.natural_size())
    }

    pub fn glsl_name(&self) -> &'static str {
        match self {
            UniformKind::Float => "float",
            UniformKind::Int => "int",
            UniformKind::Vec2 => "vec2",
            UniformKind::Vec3 => "vec3",
            UniformKind::Vec4 | UniformKind::Color => "vec4",
            UniformKind::Mat4 => "mat4",
        }
    }
}

/// Declared type of a uniform entry: an element kind, scalar or array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformType {
    pub kind: UniformKind,
    pub is_array: bool,
}

impl UniformType {
    pub const fn scalar(kind: UniformKind) -> Self {
        Self { kind, is_array: false }
    }

    pub const fn array(kind: UniformKind) -> Self {
        Self { kind, is_array: true }
    }

    /// Packed byte size of an entry of this type. `length` is ignored for scalars.
    pub fn packed_size(&self, length: u32) -> u64 {
        if self.is_array {
            self.kind.packed_size() * length as u64
        } else {
            self.kind.packed_size()
        }
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{:?}[]", self.kind)
        } else {
            write!(f, "{:?}", self.kind)
        }
    }
}

// ============================================================================
// Uniform values
// ============================================================================

/// Value of a uniform entry
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Color(Color),
    FloatArray(Vec<f32>),
    IntArray(Vec<i32>),
    Vec2Array(Vec<Vec2>),
    Vec3Array(Vec<Vec3>),
    Vec4Array(Vec<Vec4>),
    Mat4Array(Vec<Mat4>),
    ColorArray(Vec<Color>),
}

fn push_padded(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(bytes);
    let padding = packed_size(bytes.len() as u64) as usize - bytes.len();
    out.resize(out.len() + padding, 0);
}

fn push_elements<T: Pod>(out: &mut Vec<u8>, values: &[T]) {
    for value in values {
        push_padded(out, bytemuck::bytes_of(value));
    }
}

impl UniformValue {
    /// Default value for a declared type. Arrays get `length` default elements.
    pub fn default_for(ty: UniformType, length: u32) -> Self {
        let n = length as usize;
        match (ty.kind, ty.is_array) {
            (UniformKind::Float, false) => UniformValue::Float(0.0),
            (UniformKind::Int, false) => UniformValue::Int(0),
            (UniformKind::Vec2, false) => UniformValue::Vec2(Vec2::ZERO),
            (UniformKind::Vec3, false) => UniformValue::Vec3(Vec3::ZERO),
            (UniformKind::Vec4, false) => UniformValue::Vec4(Vec4::ZERO),
            (UniformKind::Mat4, false) => UniformValue::Mat4(Mat4::default()),
            (UniformKind::Color, false) => UniformValue::Color(Color::default()),
            (UniformKind::Float, true) => UniformValue::FloatArray(vec![0.0; n]),
            (UniformKind::Int, true) => UniformValue::IntArray(vec![0; n]),
            (UniformKind::Vec2, true) => UniformValue::Vec2Array(vec![Vec2::ZERO; n]),
            (UniformKind::Vec3, true) => UniformValue::Vec3Array(vec![Vec3::ZERO; n]),
            (UniformKind::Vec4, true) => UniformValue::Vec4Array(vec![Vec4::ZERO; n]),
            (UniformKind::Mat4, true) => UniformValue::Mat4Array(vec![Mat4::default(); n]),
            (UniformKind::Color, true) => UniformValue::ColorArray(vec![Color::default(); n]),
        }
    }

    pub fn uniform_type(&self) -> UniformType {
        match self {
            UniformValue::Float(_) => UniformType::scalar(UniformKind::Float),
            UniformValue::Int(_) => UniformType::scalar(UniformKind::Int),
            UniformValue::Vec2(_) => UniformType::scalar(UniformKind::Vec2),
            UniformValue::Vec3(_) => UniformType::scalar(UniformKind::Vec3),
            UniformValue::Vec4(_) => UniformType::scalar(UniformKind::Vec4),
            UniformValue::Mat4(_) => UniformType::scalar(UniformKind::Mat4),
            UniformValue::Color(_) => UniformType::scalar(UniformKind::Color),
            UniformValue::FloatArray(_) => UniformType::array(UniformKind::Float),
            UniformValue::IntArray(_) => UniformType::array(UniformKind::Int),
            UniformValue::Vec2Array(_) => UniformType::array(UniformKind::Vec2),
            UniformValue::Vec3Array(_) => UniformType::array(UniformKind::Vec3),
            UniformValue::Vec4Array(_) => UniformType::array(UniformKind::Vec4),
            UniformValue::Mat4Array(_) => UniformType::array(UniformKind::Mat4),
            UniformValue::ColorArray(_) => UniformType::array(UniformKind::Color),
        }
    }

    /// Element count for arrays, `None` for scalars
    pub fn array_len(&self) -> Option<usize> {
        match self {
            UniformValue::FloatArray(v) => Some(v.len()),
            UniformValue::IntArray(v) => Some(v.len()),
            UniformValue::Vec2Array(v) => Some(v.len()),
            UniformValue::Vec3Array(v) => Some(v.len()),
            UniformValue::Vec4Array(v) => Some(v.len()),
            UniformValue::Mat4Array(v) => Some(v.len()),
            UniformValue::ColorArray(v) => Some(v.len()),
            _ => None,
        }
    }

    /// Byte size once packed
    pub fn packed_size(&self) -> u64 {
        let ty = self.uniform_type();
        ty.packed_size(self.array_len().unwrap_or(0) as u32)
    }

    /// Append the packed representation to `out`
    pub fn write_packed(&self, out: &mut Vec<u8>) {
        match self {
            UniformValue::Float(v) => push_padded(out, bytemuck::bytes_of(v)),
            UniformValue::Int(v) => push_padded(out, bytemuck::bytes_of(v)),
            UniformValue::Vec2(v) => push_padded(out, bytemuck::bytes_of(v)),
            UniformValue::Vec3(v) => push_padded(out, bytemuck::bytes_of(v)),
            UniformValue::Vec4(v) => push_padded(out, bytemuck::bytes_of(v)),
            UniformValue::Mat4(v) => push_padded(out, bytemuck::bytes_of(v)),
            UniformValue::Color(v) => push_padded(out, bytemuck::bytes_of(v)),
            UniformValue::FloatArray(v) => push_elements(out, v),
            UniformValue::IntArray(v) => push_elements(out, v),
            UniformValue::Vec2Array(v) => push_elements(out, v),
            UniformValue::Vec3Array(v) => push_elements(out, v),
            UniformValue::Vec4Array(v) => push_elements(out, v),
            UniformValue::Mat4Array(v) => push_elements(out, v),
            UniformValue::ColorArray(v) => push_elements(out, v),
        }
    }

    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.packed_size() as usize);
        self.write_packed(&mut out);
        out
    }
}

// ============================================================================
// Typed access
// ============================================================================

/// A Rust type that can be stored in a uniform entry
pub trait Uniform: Sized + Default {
    fn uniform_type() -> UniformType;
    fn into_value(self) -> UniformValue;
    fn from_value(value: &UniformValue) -> Option<Self>;
}

/// A scalar type that can also be an array element (`Vec<T>` is then a `Uniform`)
pub trait UniformElement: Copy + Default + PartialEq {
    const KIND: UniformKind;
    fn into_array(values: Vec<Self>) -> UniformValue;
    fn array_from(value: &UniformValue) -> Option<&[Self]>;
}

macro_rules! impl_uniform {
    ($ty:ty, $scalar:ident, $array:ident) => {
        impl Uniform for $ty {
            fn uniform_type() -> UniformType {
                UniformType::scalar(UniformKind::$scalar)
            }

            fn into_value(self) -> UniformValue {
                UniformValue::$scalar(self)
            }

            fn from_value(value: &UniformValue) -> Option<Self> {
                match value {
                    UniformValue::$scalar(v) => Some(*v),
                    _ => None,
                }
            }
        }

        impl UniformElement for $ty {
            const KIND: UniformKind = UniformKind::$scalar;

            fn into_array(values: Vec<Self>) -> UniformValue {
                UniformValue::$array(values)
            }

            fn array_from(value: &UniformValue) -> Option<&[Self]> {
                match value {
                    UniformValue::$array(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_uniform!(f32, Float, FloatArray);
impl_uniform!(i32, Int, IntArray);
impl_uniform!(Vec2, Vec2, Vec2Array);
impl_uniform!(Vec3, Vec3, Vec3Array);
impl_uniform!(Vec4, Vec4, Vec4Array);
impl_uniform!(Mat4, Mat4, Mat4Array);
impl_uniform!(Color, Color, ColorArray);

impl<T: UniformElement> Uniform for Vec<T> {
    fn uniform_type() -> UniformType {
        UniformType::array(T::KIND)
    }

    fn into_value(self) -> UniformValue {
        T::into_array(self)
    }

    fn from_value(value: &UniformValue) -> Option<Self> {
        T::array_from(value).map(|values| values.to_vec())
    }
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;
