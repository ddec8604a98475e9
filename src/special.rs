//! Modified Bessel functions used by the Laplace-space responses.
//!
//! Thin wrappers over `puruspe`. The error policy is local to each call:
//! nothing here can abort the process or touch global state. Overflow to
//! infinity is left to IEEE arithmetic, where limits such as a very distant
//! outer boundary resolve correctly; a NaN reaching a composed response is
//! reported by the caller as a domain error, never coerced to a finite
//! default.

use puruspe::{In, Kn};

/// Modified Bessel function of the first kind, order zero.
#[inline]
pub(crate) fn i0(x: f64) -> f64 {
    In(0, x)
}

/// Modified Bessel function of the first kind, order one.
#[inline]
pub(crate) fn i1(x: f64) -> f64 {
    In(1, x)
}

/// Modified Bessel function of the second kind, order zero.
#[inline]
pub(crate) fn k0(x: f64) -> f64 {
    Kn(0, x)
}

/// Modified Bessel function of the second kind, order one.
#[inline]
pub(crate) fn k1(x: f64) -> f64 {
    Kn(1, x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Reference values from Abramowitz & Stegun, tables 9.8 and 9.11.

    #[test]
    fn first_kind_reference_values() {
        assert_relative_eq!(i0(1.0), 1.266_065_877_752_008_3, epsilon = 1e-12);
        assert_relative_eq!(i1(1.0), 0.565_159_103_992_485_0, epsilon = 1e-12);
        assert_relative_eq!(i0(2.0), 2.279_585_302_336_067_3, epsilon = 1e-12);
        assert_relative_eq!(i1(2.0), 1.590_636_854_637_329_1, epsilon = 1e-12);
    }

    #[test]
    fn second_kind_reference_values() {
        assert_relative_eq!(k0(1.0), 0.421_024_438_240_708_3, epsilon = 1e-12);
        assert_relative_eq!(k1(1.0), 0.601_907_230_197_234_6, epsilon = 1e-12);
        assert_relative_eq!(k0(2.0), 0.113_893_872_749_533_4, epsilon = 1e-12);
        assert_relative_eq!(k1(2.0), 0.139_865_881_816_522_4, epsilon = 1e-12);
    }

    #[test]
    fn small_argument_behavior() {
        // I0 -> 1 and I1 -> x/2 as x -> 0; K0 and K1 blow up.
        assert_relative_eq!(i0(1e-8), 1.0, epsilon = 1e-12);
        assert_relative_eq!(i1(1e-8), 5e-9, epsilon = 1e-12);
        assert!(k0(1e-8) > 17.0);
        assert!(k1(1e-8) > 1e7);
    }

    #[test]
    fn wronskian_identity() {
        // I0(x) K1(x) + I1(x) K0(x) = 1/x
        for &x in &[0.1, 0.5, 1.0, 3.0, 10.0] {
            assert_relative_eq!(
                i0(x) * k1(x) + i1(x) * k0(x),
                1.0 / x,
                epsilon = 1e-12
            );
        }
    }
}
