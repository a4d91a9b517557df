//! Unit tests for uniform types and packing

use super::*;

// ============================================================================
// ALIGNMENT
// ============================================================================

#[test]
fn test_packed_size_rounds_up_to_16() {
    assert_eq!(packed_size(0), 0);
    assert_eq!(packed_size(1), 16);
    assert_eq!(packed_size(4), 16);
    assert_eq!(packed_size(16), 16);
    assert_eq!(packed_size(17), 32);
    assert_eq!(packed_size(64), 64);
}

#[test]
fn test_every_kind_packs_to_multiple_of_16() {
    for kind in [
        UniformKind::Float,
        UniformKind::Int,
        UniformKind::Vec2,
        UniformKind::Vec3,
        UniformKind::Vec4,
        UniformKind::Mat4,
        UniformKind::Color,
    ] {
        let natural = kind.natural_size();
        assert_eq!(kind.packed_size(), 16 * natural.div_ceil(16), "{:?}", kind);
        assert_eq!(kind.packed_size() % 16, 0);
    }
}

#[test]
fn test_documented_sizes() {
    assert_eq!(UniformType::scalar(UniformKind::Float).packed_size(0), 16);
    assert_eq!(UniformType::scalar(UniformKind::Vec3).packed_size(0), 16);
    assert_eq!(UniformType::scalar(UniformKind::Mat4).packed_size(0), 64);
    assert_eq!(UniformType::array(UniformKind::Vec3).packed_size(3), 48);
    assert_eq!(UniformType::array(UniformKind::Mat4).packed_size(5), 320);
    assert_eq!(UniformType::array(UniformKind::Float).packed_size(4), 64);
}

// ============================================================================
// VALUES
// ============================================================================

#[test]
fn test_value_types_and_sizes() {
    assert_eq!(UniformValue::Float(1.0).uniform_type(), f32::uniform_type());
    assert_eq!(UniformValue::Color(Color::WHITE).packed_size(), 16);
    assert_eq!(UniformValue::Vec2Array(vec![Vec2::ONE; 3]).packed_size(), 48);
    assert_eq!(UniformValue::Vec2Array(vec![Vec2::ONE; 3]).array_len(), Some(3));
    assert_eq!(UniformValue::Int(3).array_len(), None);
}

#[test]
fn test_default_for_arrays_has_requested_length() {
    let value = UniformValue::default_for(UniformType::array(UniformKind::Mat4), 5);
    assert_eq!(value.array_len(), Some(5));
    assert_eq!(value.packed_size(), 320);

    let scalar = UniformValue::default_for(UniformType::scalar(UniformKind::Vec3), 7);
    assert_eq!(scalar, UniformValue::Vec3(Vec3::ZERO));
}

#[test]
fn test_write_packed_pads_scalars() {
    let bytes = UniformValue::Float(2.0).to_packed_bytes();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[0..4], &2.0f32.to_ne_bytes());
    assert!(bytes[4..].iter().all(|b| *b == 0));

    let bytes = UniformValue::Vec3(Vec3::new(1.0, 2.0, 3.0)).to_packed_bytes();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[8..12], &3.0f32.to_ne_bytes());
    assert_eq!(&bytes[12..16], &[0, 0, 0, 0]);
}

#[test]
fn test_write_packed_pads_each_array_element() {
    let bytes = UniformValue::FloatArray(vec![1.0, 2.0, 3.0]).to_packed_bytes();
    assert_eq!(bytes.len(), 48);
    assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
    assert_eq!(&bytes[16..20], &2.0f32.to_ne_bytes());
    assert_eq!(&bytes[32..36], &3.0f32.to_ne_bytes());
}

#[test]
fn test_write_packed_mat4_is_column_major() {
    let m = Mat4::from_cols_array(&[
        1.0, 2.0, 3.0, 4.0,
        5.0, 6.0, 7.0, 8.0,
        9.0, 10.0, 11.0, 12.0,
        13.0, 14.0, 15.0, 16.0,
    ]);
    let bytes = UniformValue::Mat4(m).to_packed_bytes();
    assert_eq!(bytes.len(), 64);
    let floats: &[f32] = bytemuck::cast_slice(&bytes);
    assert_eq!(floats[4], 5.0);
    assert_eq!(floats[15], 16.0);
}

// ============================================================================
// TYPED ACCESS
// ============================================================================

#[test]
fn test_scalar_round_trip_through_value() {
    let value = Vec4::new(1.0, 2.0, 3.0, 4.0).into_value();
    assert_eq!(Vec4::from_value(&value), Some(Vec4::new(1.0, 2.0, 3.0, 4.0)));
    assert_eq!(f32::from_value(&value), None);
}

#[test]
fn test_array_round_trip_through_value() {
    let value = vec![Color::RED, Color::WHITE].into_value();
    assert_eq!(value.uniform_type(), UniformType::array(UniformKind::Color));
    assert_eq!(Vec::<Color>::from_value(&value), Some(vec![Color::RED, Color::WHITE]));
    assert_eq!(Vec::<Vec4>::from_value(&value), None);
}

#[test]
fn test_uniform_type_display() {
    assert_eq!(UniformType::scalar(UniformKind::Mat4).to_string(), "Mat4");
    assert_eq!(UniformType::array(UniformKind::Vec3).to_string(), "Vec3[]");
    assert_eq!(UniformKind::Color.glsl_name(), "vec4");
}
