//! Operation definition
//!
//! One variant per sample-domain transform. Operations serialize as JSON
//! objects tagged by `"op"`, e.g. `{"op": "echo", "delay": 0.25, "scale": 0.5}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dsp::{channels, delay, fade, gain, speed};
use crate::engine::Wave;
use crate::error::Result;

/// A single transform with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Operation {
    /// Play the audio backwards
    Reverse,
    /// Resample by `factor` (2.0 = twice as fast)
    SpeedChange { factor: f64 },
    /// Swap left and right channels
    FlipChannels,
    /// Quadratic fade-out over the last `seconds`
    FadeOut { seconds: f64 },
    /// Quadratic fade-in over the first `seconds`
    FadeIn { seconds: f64 },
    /// Scale every sample, saturating
    Volume { scale: f64 },
    /// Single echo `delay` seconds later at `scale` level
    Echo { delay: f64, scale: f64 },
}

impl Operation {
    /// Command name of this operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Reverse => "reverse",
            Operation::SpeedChange { .. } => "speed-change",
            Operation::FlipChannels => "flip-channels",
            Operation::FadeOut { .. } => "fade-out",
            Operation::FadeIn { .. } => "fade-in",
            Operation::Volume { .. } => "volume",
            Operation::Echo { .. } => "echo",
        }
    }

    /// Check parameters without touching any audio
    pub fn validate(&self) -> Result<()> {
        match *self {
            Operation::Reverse | Operation::FlipChannels => Ok(()),
            Operation::SpeedChange { factor } => speed::check_speed(factor),
            Operation::FadeOut { seconds } | Operation::FadeIn { seconds } => {
                fade::check_time(seconds)
            }
            Operation::Volume { scale } => gain::check_volume(scale),
            Operation::Echo { delay: seconds, scale } => delay::check_echo(seconds, scale),
        }
    }

    /// Apply the operation to a wave
    ///
    /// Parameters are checked before the wave is modified; on error the
    /// wave is left as it was.
    pub fn apply(&self, wave: &mut Wave) -> Result<()> {
        match *self {
            Operation::Reverse => {
                channels::reverse(wave);
                Ok(())
            }
            Operation::SpeedChange { factor } => speed::change_speed(wave, factor),
            Operation::FlipChannels => {
                channels::flip_channels(wave);
                Ok(())
            }
            Operation::FadeOut { seconds } => fade::fade_out(wave, seconds),
            Operation::FadeIn { seconds } => fade::fade_in(wave, seconds),
            Operation::Volume { scale } => gain::volume(wave, scale),
            Operation::Echo { delay: seconds, scale } => delay::echo(wave, seconds, scale),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Operation::Reverse | Operation::FlipChannels => write!(f, "{}", self.name()),
            Operation::SpeedChange { factor } => write!(f, "{} {}", self.name(), factor),
            Operation::FadeOut { seconds } | Operation::FadeIn { seconds } => {
                write!(f, "{} {}", self.name(), seconds)
            }
            Operation::Volume { scale } => write!(f, "{} {}", self.name(), scale),
            Operation::Echo { delay, scale } => write!(f, "{} {} {}", self.name(), delay, scale),
        }
    }
}
