//! Channel and ordering transforms: reverse and flip.

use crate::engine::Wave;

/// Reverse the order of samples in both channels
///
/// The middle sample of an odd-length buffer stays where it is.
pub fn reverse(wave: &mut Wave) {
    let (left, right) = wave.samples_mut().channels_mut();
    left.reverse();
    right.reverse();
}

/// Swap the left and right channels
pub fn flip_channels(wave: &mut Wave) {
    wave.samples_mut().swap_channels();
}
