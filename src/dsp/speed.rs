//! Speed Change
//!
//! Nearest-sample resampling: playback speed and pitch change together.

use log::{info, trace};

use crate::engine::{SampleBuffer, Wave};
use crate::error::{Result, WaveError};

/// Change playback speed by `factor` (2.0 = twice as fast, half as long)
///
/// The new length is `L = floor(N / factor)` and output sample `i` is input
/// sample `floor(i * factor)`. Floating-point rounding can push that index
/// to `N` at the very end of the buffer; it is clamped to the last sample.
///
/// # Errors
/// * `InvalidSpeed` - If `factor` is not positive
/// * `DataTooLarge` / `OutOfMemory` - If the resulting buffer cannot be held
pub fn change_speed(wave: &mut Wave, factor: f64) -> Result<()> {
    check_speed(factor)?;

    let len = wave.num_samples();
    let new_len = (len as f64 / factor).floor() as usize;
    Wave::check_capacity(new_len)?;

    let out = resample(wave.samples(), new_len, factor)?;

    info!("Speed change x{}: {} -> {} samples", factor, len, new_len);
    wave.replace_samples(out)
}

/// Build `new_len` frames where frame `i` is source frame `source_index(i)`
fn resample(src: &SampleBuffer, new_len: usize, factor: f64) -> Result<SampleBuffer> {
    let mut out = SampleBuffer::with_capacity(new_len)?;
    let (left, right) = (src.left(), src.right());
    for i in 0..new_len {
        let j = source_index(i, factor, src.num_samples());
        out.push(left[j], right[j]);
    }
    Ok(out)
}

/// `floor(i * factor)`, clamped to the last of `len` samples
///
/// `len` must be non-zero.
fn source_index(i: usize, factor: f64, len: usize) -> usize {
    let j = (i as f64 * factor).floor() as usize;
    if j >= len {
        trace!("Speed change source index {} clamped to {}", j, len - 1);
        len - 1
    } else {
        j
    }
}

pub(crate) fn check_speed(factor: f64) -> Result<()> {
    if factor > 0.0 {
        Ok(())
    } else {
        Err(WaveError::InvalidSpeed { factor })
    }
}
