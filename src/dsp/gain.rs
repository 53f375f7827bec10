//! Gain
//!
//! Saturating sample scaling and the volume transform.

use log::debug;
use num_traits::clamp;

use crate::engine::Wave;
use crate::error::{Result, WaveError};

/// Scale a sample, saturating to the 16-bit range
///
/// `clamp(round(sample * factor), -32768, 32767)`; rounding is half away
/// from zero.
#[inline]
pub fn scale_sample(sample: i16, factor: f64) -> i16 {
    let scaled = (sample as f64 * factor).round();
    // `as` maps NaN to 0; the clamp guarantees the value is in range otherwise.
    clamp(scaled, i16::MIN as f64, i16::MAX as f64) as i16
}

/// Scale every sample of both channels by `scale`
///
/// # Errors
/// * `InvalidVolume` - If `scale` is negative or NaN
pub fn volume(wave: &mut Wave, scale: f64) -> Result<()> {
    check_volume(scale)?;

    // Unity gain
    if scale == 1.0 {
        return Ok(());
    }

    debug!("Scaling volume by {}", scale);
    let (left, right) = wave.samples_mut().channels_mut();
    for sample in left.iter_mut().chain(right.iter_mut()) {
        *sample = scale_sample(*sample, scale);
    }
    Ok(())
}

pub(crate) fn check_volume(scale: f64) -> Result<()> {
    if scale >= 0.0 {
        Ok(())
    } else {
        Err(WaveError::InvalidVolume { scale })
    }
}
