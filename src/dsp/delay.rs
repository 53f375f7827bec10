//! Echo
//!
//! Single-tap echo: the signal is mixed with a scaled copy of itself delayed
//! by `delay` seconds. The buffer grows by the delay so the tail of the echo
//! is kept.

use log::{debug, info};

use crate::dsp::gain::scale_sample;
use crate::engine::{SampleBuffer, Wave};
use crate::error::{Result, WaveError};

/// Add an echo `delay` seconds later at `scale` of the original level
///
/// With `n = floor(sample_rate * delay)` the output has `N + n` samples:
/// `out[i] = in[i] + scale_sample(in[i - n], scale)`, where missing terms
/// are zero and the sum saturates to the 16-bit range. A delay shorter than
/// one sample leaves the wave unchanged.
///
/// # Errors
/// * `InvalidEcho` - If `delay` or `scale` is negative or NaN
/// * `DataTooLarge` / `OutOfMemory` - If the longer buffer cannot be held
pub fn echo(wave: &mut Wave, delay: f64, scale: f64) -> Result<()> {
    check_echo(delay, scale)?;

    let n = wave.samples_for_secs(delay);
    if n == 0 {
        debug!("Echo delay below one sample; nothing to do");
        return Ok(());
    }

    let len = wave.num_samples();
    let new_len = len
        .checked_add(n)
        .ok_or(WaveError::DataTooLarge { num_samples: usize::MAX })?;
    Wave::check_capacity(new_len)?;

    let mut out = SampleBuffer::with_capacity(new_len)?;
    {
        let src = wave.samples();
        let (left, right) = (src.left(), src.right());
        for i in 0..new_len {
            let (mut l, mut r) = if i < len { (left[i], right[i]) } else { (0, 0) };
            if i >= n {
                l = l.saturating_add(scale_sample(left[i - n], scale));
                r = r.saturating_add(scale_sample(right[i - n], scale));
            }
            out.push(l, r);
        }
    }

    info!("Echo: {} -> {} samples (delay {} samples)", len, new_len, n);
    wave.replace_samples(out)
}

pub(crate) fn check_echo(delay: f64, scale: f64) -> Result<()> {
    if delay >= 0.0 && scale >= 0.0 {
        Ok(())
    } else {
        Err(WaveError::InvalidEcho { delay, scale })
    }
}
