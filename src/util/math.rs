//! Numeric helpers for box decoding.

/// Exponent clamp applied before `exp` in box-size decoding.
///
/// Raw network outputs are unbounded, so `exp(tw)` can overflow to infinity
/// for adversarial inputs. `exp(20)` is about 4.8e8, far beyond any sane
/// box-to-anchor ratio, so clamping loses nothing meaningful.
pub(crate) const EXP_CLAMP: f32 = 20.0;

/// Logistic sigmoid.
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// `exp` with the argument clamped to `[-EXP_CLAMP, EXP_CLAMP]`.
pub(crate) fn safe_exp(x: f32) -> f32 {
    x.clamp(-EXP_CLAMP, EXP_CLAMP).exp()
}
