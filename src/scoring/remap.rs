use crate::constants::SCORE_DECIMALS;

/// Linearly map `value` from the interval `[from_lo, from_hi]` onto
/// `[to_lo, to_hi]`.
///
/// - The target bounds may be in descending order, which inverts the mapping.
/// - Values outside of the source interval are *not* clamped, and will
///   be extrapolated outside of the target interval.
/// - If the source interval is empty (`from_lo == from_hi`), the larger of
///   the target bounds is returned.
pub fn remap(value: f64, from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64) -> f64 {
    if from_hi == from_lo {
        return to_lo.max(to_hi);
    }
    let scaled = (value - from_lo) / (from_hi - from_lo);
    to_lo + scaled * (to_hi - to_lo)
}

/// Round a derived score to three decimal places.
pub fn round_score(x: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (x * factor).round() / factor
}
