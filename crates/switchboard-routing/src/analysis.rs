//! Input analysis feeding the complexity term

/// Input length (in characters) at which complexity saturates
pub const COMPLEXITY_SATURATION_CHARS: usize = 1000;

/// Normalized difficulty proxy for a request
///
/// Grows linearly with the character count and saturates at 1.0, so
/// `""` is 0.0, 500 characters is 0.5, and anything from 1000 up is 1.0.
#[allow(clippy::cast_precision_loss)]
pub fn complexity(text: &str) -> f64 {
    let length = text.chars().count();
    (length as f64 / COMPLEXITY_SATURATION_CHARS as f64).min(1.0)
}
