use valuecheck_core::classify;
use valuecheck_core::{PrimitiveKind, TypeDescriptor, TypeKind, Value};
use valuecheck_instantiate::Instantiator;

use crate::chain::FieldMutator;
use crate::error::{MutationError, MutationResult};

/// The eight numeric/boolean/character kinds, unboxed or boxed.
///
/// - integers: `+1`, wrapping at the kind's maximum
/// - boolean: negation
/// - character: next scalar value, skipping the surrogate gap, `char::MAX` wraps to `'\0'`
/// - floats: `+1`; where that cannot change the value (huge magnitudes,
///   infinities, NaN) the next representable value upwards, `+inf` wraps to `-inf`
///
/// An absent boxed value becomes the kind's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimitiveMutator;

impl FieldMutator for PrimitiveMutator {
    fn name(&self) -> &'static str {
        "primitive"
    }

    fn can_handle(&self, ty: &TypeDescriptor) -> bool {
        classify::is_primitive_or_boxed(ty)
    }

    fn mutate(
        &self,
        current: &Value,
        ty: &TypeDescriptor,
        _ctx: &Instantiator<'_>,
    ) -> MutationResult<Value> {
        let Some(kind) = classify::primitive_kind(ty) else {
            return Err(MutationError::mismatch(ty.name(), current));
        };

        let next = match (kind, current) {
            (PrimitiveKind::Boolean, Value::Boolean(v)) => Value::Boolean(!v),
            (PrimitiveKind::Byte, Value::Byte(v)) => Value::Byte(v.wrapping_add(1)),
            (PrimitiveKind::Short, Value::Short(v)) => Value::Short(v.wrapping_add(1)),
            (PrimitiveKind::Character, Value::Character(c)) => Value::Character(next_char(*c)),
            (PrimitiveKind::Integer, Value::Integer(v)) => Value::Integer(v.wrapping_add(1)),
            (PrimitiveKind::Long, Value::Long(v)) => Value::Long(v.wrapping_add(1)),
            (PrimitiveKind::Float, Value::Float(v)) => Value::Float(next_f32(*v)),
            (PrimitiveKind::Double, Value::Double(v)) => Value::Double(next_f64(*v)),
            (kind, Value::Null) if matches!(ty.kind(), TypeKind::Boxed(_)) => Value::default_for(kind),
            (_, other) => return Err(MutationError::mismatch(ty.name(), other)),
        };
        Ok(next)
    }
}

fn next_char(c: char) -> char {
    match c {
        char::MAX => '\0',
        '\u{D7FF}' => '\u{E000}',
        _ => char::from_u32(c as u32 + 1).unwrap_or('\0'),
    }
}

fn next_f64(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    if v == f64::INFINITY {
        return f64::NEG_INFINITY;
    }
    let bumped = v + 1.0;
    if bumped != v {
        return bumped;
    }
    // |v| >= 2^53 or -inf: step one ulp towards +inf.
    if v == f64::NEG_INFINITY {
        return f64::MIN;
    }
    let bits = v.to_bits();
    f64::from_bits(if v > 0.0 { bits + 1 } else { bits - 1 })
}

fn next_f32(v: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    if v == f32::INFINITY {
        return f32::NEG_INFINITY;
    }
    let bumped = v + 1.0;
    if bumped != v {
        return bumped;
    }
    if v == f32::NEG_INFINITY {
        return f32::MIN;
    }
    let bits = v.to_bits();
    f32::from_bits(if v > 0.0 { bits + 1 } else { bits - 1 })
}
