//! Sample Buffer
//!
//! Decoded stereo audio held as two equal-length channels of signed 16-bit
//! samples. In the byte stream samples are interleaved left/right pairs,
//! little-endian two's-complement.

use std::io::{Read, Write};

use log::warn;

use crate::engine::header::{WaveHeader, BYTES_PER_FRAME};
use crate::engine::io::read_fully;
use crate::error::{Result, WaveError};

/// Core sample storage for a stereo file
///
/// `left` and `right` always have the same length; that length is the
/// number of samples (frames).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleBuffer {
    left: Vec<i16>,
    right: Vec<i16>,
}

impl SampleBuffer {
    /// Create a silent buffer with `num_samples` frames
    pub fn silence(num_samples: usize) -> Self {
        Self {
            left: vec![0; num_samples],
            right: vec![0; num_samples],
        }
    }

    /// Build a buffer from separate channels
    ///
    /// # Errors
    /// * `Usage` - If the channels differ in length
    pub fn from_channels(left: Vec<i16>, right: Vec<i16>) -> Result<Self> {
        if left.len() != right.len() {
            return Err(WaveError::usage(format!(
                "channel length mismatch: left has {} samples, right has {}",
                left.len(),
                right.len()
            )));
        }
        Ok(Self { left, right })
    }

    /// Allocate an empty buffer able to hold `num_samples` frames
    ///
    /// # Errors
    /// * `OutOfMemory` - If the allocation cannot be satisfied
    pub fn with_capacity(num_samples: usize) -> Result<Self> {
        let mut left = Vec::new();
        let mut right = Vec::new();
        left.try_reserve_exact(num_samples)
            .and_then(|_| right.try_reserve_exact(num_samples))
            .map_err(|e| {
                WaveError::out_of_memory(format!("{} samples per channel: {}", num_samples, e))
            })?;
        Ok(Self { left, right })
    }

    /// Append one frame
    #[inline]
    pub fn push(&mut self, left: i16, right: i16) {
        self.left.push(left);
        self.right.push(right);
    }

    /// Number of samples per channel
    pub fn num_samples(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn left(&self) -> &[i16] {
        &self.left
    }

    pub fn right(&self) -> &[i16] {
        &self.right
    }

    /// Mutable access to both channels at once
    pub fn channels_mut(&mut self) -> (&mut [i16], &mut [i16]) {
        (&mut self.left, &mut self.right)
    }

    /// Swap the two channels without copying samples
    pub fn swap_channels(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    /// Load the sample data described by a validated header
    ///
    /// Reads exactly `header.data_chunk.size` bytes and decodes
    /// `size / 4` interleaved frames. Trailing bytes that do not form a whole
    /// frame are consumed and dropped.
    ///
    /// # Errors
    /// * `TruncatedStream` - If the source ends before the declared size
    /// * `OutOfMemory` - If the buffer cannot be allocated
    pub fn read_from<R: Read>(reader: &mut R, header: &WaveHeader) -> Result<Self> {
        let declared = header.data_chunk.size as usize;
        let num_samples = header.declared_samples();

        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(declared)
            .map_err(|e| WaveError::out_of_memory(format!("{} bytes of sample data: {}", declared, e)))?;
        bytes.resize(declared, 0);

        let actual = read_fully(reader, &mut bytes)?;
        if actual < declared {
            return Err(WaveError::TruncatedStream {
                expected: declared,
                actual,
            });
        }

        let leftover = declared % BYTES_PER_FRAME as usize;
        if leftover != 0 {
            warn!(
                "Data chunk size {} is not a whole number of frames; dropping {} trailing byte(s)",
                declared, leftover
            );
        }

        let mut buffer = Self::with_capacity(num_samples)?;
        for frame in bytes.chunks_exact(BYTES_PER_FRAME as usize) {
            buffer.push(
                i16::from_le_bytes([frame[0], frame[1]]),
                i16::from_le_bytes([frame[2], frame[3]]),
            );
        }

        Ok(buffer)
    }

    /// Write the samples as interleaved little-endian frames
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (l, r) in self.left.iter().zip(self.right.iter()) {
            let [l0, l1] = l.to_le_bytes();
            let [r0, r1] = r.to_le_bytes();
            writer.write_all(&[l0, l1, r0, r1])?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn header_for(data_size: u32) -> WaveHeader {
        let mut header = WaveHeader::stereo_pcm(0);
        header.data_chunk.size = data_size;
        header
    }

    #[test]
    fn test_read_interleaved() {
        // L=1, R=-1, L=256, R=-32768
        let bytes = [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x01, 0x00, 0x80];
        let buffer = SampleBuffer::read_from(&mut Cursor::new(bytes), &header_for(8)).unwrap();

        assert_eq!(buffer.num_samples(), 2);
        assert_eq!(buffer.left(), &[1, 256]);
        assert_eq!(buffer.right(), &[-1, -32768]);
    }

    #[test]
    fn test_read_truncated() {
        let bytes = [0u8; 10];
        let result = SampleBuffer::read_from(&mut Cursor::new(bytes), &header_for(16));
        match result {
            Err(WaveError::TruncatedStream { expected, actual }) => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 10);
            }
            other => panic!("Expected TruncatedStream, got: {:?}", other),
        }
    }

    #[test]
    fn test_read_consumes_partial_frame() {
        let bytes = [1, 0, 2, 0, 9, 9, 7];
        let mut cursor = Cursor::new(bytes);
        let buffer = SampleBuffer::read_from(&mut cursor, &header_for(6)).unwrap();
        assert_eq!(buffer.num_samples(), 1);
        assert_eq!(cursor.position(), 6);
    }

    #[test]
    fn test_write_interleaved() {
        let buffer = SampleBuffer::from_channels(vec![1, -2], vec![3, i16::MIN]).unwrap();
        let mut out = Vec::new();
        buffer.write_to(&mut out).unwrap();
        assert_eq!(out, vec![1, 0, 3, 0, 0xFE, 0xFF, 0x00, 0x80]);
    }

    #[test]
    fn test_from_channels_mismatch() {
        let result = SampleBuffer::from_channels(vec![0; 3], vec![0; 2]);
        assert!(matches!(result, Err(WaveError::Usage { .. })));
    }

    #[test]
    fn test_swap_channels() {
        let mut buffer = SampleBuffer::from_channels(vec![1, 2], vec![3, 4]).unwrap();
        buffer.swap_channels();
        assert_eq!(buffer.left(), &[3, 4]);
        assert_eq!(buffer.right(), &[1, 2]);
    }
}
