//! File and stream I/O for stereowave
//!
//! Byte sources are any `std::io::Read`, sinks any `std::io::Write`.
//! Output is always serialized fully in memory before it is committed, so a
//! failed run never leaves a partially written file behind.

use std::fs;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

use log::debug;

use crate::engine::buffer::SampleBuffer;
use crate::engine::wave::Wave;
use crate::error::Result;

/// Read a validated wave from a byte source
pub fn read_wave<R: Read>(reader: &mut R) -> Result<Wave> {
    Wave::load(reader)
}

/// Serialize a wave and write it to the sink in one piece
pub fn write_wave<W: Write>(wave: &Wave, writer: &mut W) -> Result<()> {
    let bytes = wave.to_bytes()?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Import a WAV file from disk
///
/// # Errors
/// * `Io` - If the file cannot be read
/// * `Format` / `TruncatedStream` - If the contents are not a valid file
pub fn import_wave(path: &Path) -> Result<Wave> {
    debug!("Importing {}", path.display());
    let bytes = fs::read(path)?;
    Wave::from_bytes(&bytes)
}

/// Export a wave to disk
///
/// The file is only created once serialization has succeeded.
pub fn export_wave(wave: &Wave, path: &Path) -> Result<()> {
    let bytes = wave.to_bytes()?;
    fs::write(path, &bytes)?;
    debug!("Exported {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Generate a stereo test tone with different frequencies per channel
///
/// Produces a 44.1kHz wave of `duration_secs` seconds at `amplitude`
/// (0.0 to 1.0 of full scale).
pub fn generate_stereo_test_tone(
    freq_left: f64,
    freq_right: f64,
    duration_secs: f64,
    amplitude: f64,
) -> Result<Wave> {
    let sample_rate = crate::engine::header::SAMPLE_RATE as f64;
    let num_samples = (duration_secs * sample_rate) as usize;
    let peak = amplitude.clamp(0.0, 1.0) * i16::MAX as f64;

    let angular_l = 2.0 * std::f64::consts::PI * freq_left / sample_rate;
    let angular_r = 2.0 * std::f64::consts::PI * freq_right / sample_rate;

    let mut samples = SampleBuffer::with_capacity(num_samples)?;
    for i in 0..num_samples {
        let t = i as f64;
        samples.push(
            (peak * (angular_l * t).sin()).round() as i16,
            (peak * (angular_r * t).sin()).round() as i16,
        );
    }

    Wave::from_samples(samples)
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Fill `buf` from the reader, stopping early only at end-of-stream
///
/// Returns the number of bytes read. Interrupted reads are retried; a short
/// count means the stream ended.
pub(crate) fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

// ============================================================================
// Tests
// ============================================================================
