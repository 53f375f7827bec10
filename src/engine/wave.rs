//! Processing Session
//!
//! A `Wave` owns the header and the sample buffer for one file. Transforms
//! mutate it in place; length-changing transforms move a freshly built
//! buffer in through [`Wave::replace_samples`], which also keeps the header
//! size fields consistent.

use std::io::{Read, Write};

use log::{debug, warn};

use crate::engine::buffer::SampleBuffer;
use crate::engine::header::{parse_header, sizes_for, WaveHeader, HEADER_LEN};
use crate::error::Result;

/// Header and samples of one stereo file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    header: WaveHeader,
    samples: SampleBuffer,
}

impl Wave {
    /// Wrap a buffer in a canonical 44.1kHz stereo header
    pub fn from_samples(samples: SampleBuffer) -> Result<Self> {
        let mut header = WaveHeader::stereo_pcm(0);
        header.set_num_samples(samples.num_samples())?;
        Ok(Self { header, samples })
    }

    /// Validate the header and load the sample data from a byte source
    ///
    /// If the declared data size is not a whole number of frames the size
    /// fields are normalized to the frames actually kept.
    ///
    /// # Errors
    /// * `Format` - First violated header invariant
    /// * `TruncatedStream` - If the source is shorter than declared
    pub fn load<R: Read>(reader: &mut R) -> Result<Self> {
        let mut header = parse_header(reader)?;
        debug!("Input header:\n{}", header);

        let samples = SampleBuffer::read_from(reader, &header)?;
        if header.data_chunk.size as usize != samples.num_samples() * 4 {
            header.set_num_samples(samples.num_samples())?;
            warn!(
                "Normalized data size to {} bytes ({} samples)",
                header.data_chunk.size,
                samples.num_samples()
            );
        }

        debug!("Loaded {} samples per channel", samples.num_samples());
        Ok(Self { header, samples })
    }

    /// Load from an in-memory byte slice
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::load(&mut &bytes[..])
    }

    /// Serialize the header followed by interleaved sample data
    ///
    /// The header is written exactly as held; no validation is performed.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.header.to_bytes())?;
        self.samples.write_to(writer)
    }

    /// Serialize into a new byte vector
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.samples.num_samples() * 4);
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn header(&self) -> &WaveHeader {
        &self.header
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn samples_mut(&mut self) -> &mut SampleBuffer {
        &mut self.samples
    }

    pub fn num_samples(&self) -> usize {
        self.samples.num_samples()
    }

    /// Sample rate declared in the header
    pub fn sample_rate(&self) -> u32 {
        self.header.format_chunk.sample_rate
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.num_samples() as f64 / self.sample_rate() as f64
    }

    /// Whole samples covered by `seconds` at the header's sample rate
    ///
    /// Saturates at `usize::MAX` for absurdly long durations.
    pub fn samples_for_secs(&self, seconds: f64) -> usize {
        (self.sample_rate() as f64 * seconds).floor() as usize
    }

    /// Check that a buffer of `num_samples` frames would fit the header
    ///
    /// Lets length-changing transforms fail before doing any work.
    pub fn check_capacity(num_samples: usize) -> Result<()> {
        sizes_for(num_samples).map(|_| ())
    }

    /// Replace the sample buffer, updating the header size fields
    ///
    /// The previous buffer is dropped here.
    pub fn replace_samples(&mut self, samples: SampleBuffer) -> Result<()> {
        self.header.set_num_samples(samples.num_samples())?;
        self.samples = samples;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FormatError, WaveError};
    use pretty_assertions::assert_eq;

    fn sample_bytes() -> Vec<u8> {
        let samples = SampleBuffer::from_channels(vec![10, -20, 30], vec![-1, 2, -3]).unwrap();
        Wave::from_samples(samples).unwrap().to_bytes().unwrap()
    }

    #[test]
    fn test_round_trip_exact() {
        let bytes = sample_bytes();
        let wave = Wave::from_bytes(&bytes).unwrap();
        assert_eq!(wave.num_samples(), 3);
        assert_eq!(wave.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_round_trip_preserves_nonstandard_riff_size() {
        let mut bytes = sample_bytes();
        // RIFF size that disagrees with the data chunk is carried through untouched
        bytes[4..8].copy_from_slice(&999u32.to_le_bytes());
        let wave = Wave::from_bytes(&bytes).unwrap();
        assert_eq!(wave.header().size, 999);
        assert_eq!(wave.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_load_rejects_before_reading_samples() {
        let mut bytes = sample_bytes();
        bytes[16..20].copy_from_slice(&18u32.to_le_bytes());
        // Sample data is also truncated; the header error must win.
        bytes.truncate(HEADER_LEN + 2);
        match Wave::from_bytes(&bytes) {
            Err(WaveError::Format(FormatError::BadFormatChunk)) => {}
            other => panic!("Expected BadFormatChunk, got: {:?}", other),
        }
    }

    #[test]
    fn test_load_normalizes_partial_frame() {
        let mut bytes = sample_bytes();
        bytes[40..44].copy_from_slice(&14u32.to_le_bytes());
        bytes.extend_from_slice(&[0x7F, 0x7F]);
        let wave = Wave::from_bytes(&bytes).unwrap();
        assert_eq!(wave.num_samples(), 3);
        assert_eq!(wave.header().data_chunk.size, 12);
        assert_eq!(wave.header().size, 56);
    }

    #[test]
    fn test_replace_samples_updates_header() {
        let mut wave = Wave::from_bytes(&sample_bytes()).unwrap();
        wave.replace_samples(SampleBuffer::silence(10)).unwrap();
        assert_eq!(wave.header().data_chunk.size, 40);
        assert_eq!(wave.header().size, 84);
    }

    #[test]
    fn test_samples_for_secs() {
        let wave = Wave::from_samples(SampleBuffer::silence(1)).unwrap();
        assert_eq!(wave.samples_for_secs(0.5), 22050);
        assert_eq!(wave.samples_for_secs(0.0), 0);
        assert_eq!(wave.samples_for_secs(1e300), usize::MAX);
    }
}
