//! Audio Engine Module
//!
//! Container handling for canonical stereo WAV files:
//! - Header model and validation
//! - Sample buffer management
//! - Processing session (header + samples)
//! - Stream and file I/O

pub mod buffer;
pub mod header;
pub mod io;
pub mod wave;

pub use buffer::SampleBuffer;
pub use header::{parse_header, DataChunk, FormatChunk, WaveHeader, HEADER_LEN, SAMPLE_RATE};
pub use io::{export_wave, generate_stereo_test_tone, import_wave, read_wave, write_wave};
pub use wave::Wave;
