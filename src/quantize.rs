//! Sign quantization primitives.
//!
//! Forward passes map values to the two-level set {-1, +1} via `sign()`;
//! backward passes route gradients to the full-precision input with a
//! straight-through estimator (STE). Exact zeros map to 0, matching
//! candle's `sign`.

use candle_core::{Result, Tensor};

/// Two-level quantization: forward `sign(x)`, backward hard-tanh STE
/// (identity inside \[-1, 1\], zero outside).
///
/// The trick: `sign(x) + (clip(x) - clip(x).detach())`. The residual is
/// zero in the forward pass, and its gradient is the clipped identity.
pub fn quantize(x: &Tensor) -> Result<Tensor> {
    let sign_x = x.sign()?;
    let clipped = x.clamp(-1f64, 1f64)?;
    let residual = (&clipped - &clipped.detach())?;
    &sign_x + &residual
}

/// Plain STE sign: forward `sign(x)`, backward unclipped identity.
#[inline]
pub fn ste_sign(x: &Tensor) -> Result<Tensor> {
    let sign_x = x.sign()?;
    let detach_x = x.detach();
    let residual = (x - &detach_x)?;
    Ok((&sign_x + &residual)?)
}

/// Count {-1, +1} occurrences in a sign-quantized tensor.
pub fn sign_distribution(x: &Tensor) -> Result<(u64, u64)> {
    let flat = x.flatten_all()?.to_vec1::<f32>()?;
    let (mut n_neg, mut n_pos) = (0u64, 0u64);
    for &v in &flat {
        if v < 0.0 {
            n_neg += 1;
        } else {
            n_pos += 1;
        }
    }
    Ok((n_neg, n_pos))
}
