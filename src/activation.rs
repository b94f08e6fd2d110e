/// Probability at or above which a row is classified as positive.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// The logistic function, maps a logit into `(0, 1)`.
///
/// No clamping is applied: for logits of large magnitude the exponential
/// overflows or underflows and the result saturates to exactly `0.0` or `1.0`.
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    1. / (1. + (-z).exp())
}

/// Maps a probability into a hard `{0, 1}` class.
#[inline]
pub fn classify(p: f64) -> f64 {
    if p >= DECISION_THRESHOLD { 1. } else { 0. }
}
