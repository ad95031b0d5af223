use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Ticks are the atomic unit of simulation time (one presentation frame).
pub type Ticks = u64;

/// Convert an f64 to Fixed64. Use only for initialization and data loading.
///
/// Returns `None` for NaN, infinities and values outside the Q32.32 range.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Option<Fixed64> {
    Fixed64::checked_from_num(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_convert() {
        assert_eq!(f64_to_fixed64(2.0), Some(Fixed64::from_num(2)));
        assert_eq!(f64_to_fixed64(-0.5), Some(Fixed64::from_num(-0.5)));
    }

    #[test]
    fn non_finite_and_out_of_range_rejected() {
        assert_eq!(f64_to_fixed64(f64::NAN), None);
        assert_eq!(f64_to_fixed64(f64::INFINITY), None);
        assert_eq!(f64_to_fixed64(f64::NEG_INFINITY), None);
        assert_eq!(f64_to_fixed64(1e12), None);
    }

    #[test]
    fn multiplication_is_deterministic() {
        let w = Fixed64::from_num(3);
        let m = Fixed64::from_num(0.3);
        assert_eq!(w * m, Fixed64::from_num(3) * Fixed64::from_num(0.3));
    }
}
