use crate::{DcError, DcResult};

pub fn ensure_finite(v: f64, what: &'static str) -> DcResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(DcError::NonFinite { what, value: v })
    }
}

/// Round to a fixed number of decimal places, half away from zero.
///
/// `round_to_decimals(0.38, 1) == 0.4`. The result is computed as
/// `round(v * 10^d) / 10^d`, so for one decimal it is bit-identical to the
/// literal `0.1 * k` values used as table breakpoints.
pub fn round_to_decimals(v: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rounding_is_idempotent(v in -1.0e6_f64..1.0e6_f64, d in 0_u32..4) {
            let once = round_to_decimals(v, d);
            prop_assert_eq!(round_to_decimals(once, d), once);
        }
    }
}
