//! Transform Engine
//!
//! Sample-domain operations on a [`Wave`](crate::engine::Wave). Each
//! operation checks its parameters before touching the audio. Reverse, flip,
//! fades and volume work in place; speed change and echo build a new buffer
//! and update the header size fields.

mod chain;
mod channels;
mod delay;
mod effect;
mod fade;
mod gain;
mod speed;

pub use chain::Pipeline;
pub use channels::{flip_channels, reverse};
pub use delay::echo;
pub use effect::Operation;
pub use fade::{fade_in, fade_out};
pub use gain::{scale_sample, volume};
pub use speed::change_speed;
