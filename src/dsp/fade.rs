//! Fades
//!
//! Quadratic fade-in and fade-out over a window measured in seconds.
//! A window of `n` samples applies gain `(i/n)^2` (fade-in, from the start)
//! or `(1 - i/n)^2` (fade-out, ending at the last sample). Windows longer
//! than the buffer keep their curve; only the positions that exist are
//! touched. Scaled samples are truncated toward zero.

use log::debug;

use crate::engine::Wave;
use crate::error::{Result, WaveError};

/// Fade in over the first `seconds` of audio
///
/// # Errors
/// * `InvalidTime` - If `seconds` is negative or NaN
pub fn fade_in(wave: &mut Wave, seconds: f64) -> Result<()> {
    check_time(seconds)?;

    let n = wave.samples_for_secs(seconds);
    if n == 0 {
        return Ok(());
    }

    let len = wave.num_samples();
    let end = n.min(len);
    debug!("Fade in over {} samples ({} in buffer)", n, end);

    let (left, right) = wave.samples_mut().channels_mut();
    apply_curve(&mut left[..end], &mut right[..end], |i| {
        let g = i as f64 / n as f64;
        g * g
    });
    Ok(())
}

/// Fade out over the last `seconds` of audio
///
/// # Errors
/// * `InvalidTime` - If `seconds` is negative or NaN
pub fn fade_out(wave: &mut Wave, seconds: f64) -> Result<()> {
    check_time(seconds)?;

    let n = wave.samples_for_secs(seconds);
    if n == 0 {
        return Ok(());
    }

    let len = wave.num_samples();
    let start = len.saturating_sub(n);
    // Curve positions that fall before the start of the buffer
    let skipped = n.saturating_sub(len);
    debug!("Fade out over {} samples from index {}", n, start);

    let (left, right) = wave.samples_mut().channels_mut();
    apply_curve(&mut left[start..], &mut right[start..], |k| {
        let g = 1.0 - (k + skipped) as f64 / n as f64;
        g * g
    });
    Ok(())
}

pub(crate) fn check_time(seconds: f64) -> Result<()> {
    if seconds >= 0.0 {
        Ok(())
    } else {
        Err(WaveError::InvalidTime { seconds })
    }
}

/// Scale matching windows of both channels by `gain(i)`
fn apply_curve(left: &mut [i16], right: &mut [i16], gain: impl Fn(usize) -> f64) {
    for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
        let g = gain(i);
        *l = attenuate(*l, g);
        *r = attenuate(*r, g);
    }
}

/// `sample * gain` truncated toward zero; `gain` is within `[0, 1]`
#[inline]
fn attenuate(sample: i16, gain: f64) -> i16 {
    (sample as f64 * gain) as i16
}
