//! Stereowave - canonical stereo WAV processing
//!
//! Reads a 16-bit, 44.1kHz, stereo PCM WAV stream, validates its header,
//! applies an ordered list of sample-domain transforms and writes the result
//! back in the same format.
//!
//! # Architecture
//!
//! - `engine`: header model and validation, sample buffer, I/O
//! - `dsp`: reverse, speed change, channel flip, fades, volume, echo
//! - `cli`: command-line driver
//!
//! # Example
//! ```
//! use stereowave::dsp::{Operation, Pipeline};
//! use stereowave::engine::{SampleBuffer, Wave};
//!
//! let samples = SampleBuffer::from_channels(vec![1, 2, 3, 4], vec![5, 6, 7, 8]).unwrap();
//! let mut wave = Wave::from_samples(samples).unwrap();
//!
//! let pipeline = Pipeline::from(vec![Operation::Reverse, Operation::SpeedChange { factor: 2.0 }]);
//! pipeline.apply(&mut wave).unwrap();
//! assert_eq!(wave.samples().left(), &[4, 2]);
//! assert_eq!(wave.header().data_chunk.size, 8);
//! ```

pub mod cli;
pub mod dsp;
pub mod engine;
pub mod error;

pub use error::{FormatError, Result, WaveError};
