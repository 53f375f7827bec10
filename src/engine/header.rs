//! Container Header Model
//!
//! The canonical 44-byte RIFF/WAVE header and its validation against the
//! fixed profile: linear PCM, stereo, 44.1kHz, 16-bit.
//!
//! Offset | Size | Field
//! -----: | ---: | ------------------------------
//!      0 |    4 | "RIFF"
//!      4 |    4 | RIFF size
//!      8 |    4 | "WAVE"
//!     12 |    4 | "fmt "
//!     16 |    4 | format chunk size (16)
//!     20 |    2 | compression code (1 = PCM)
//!     22 |    2 | channels
//!     24 |    4 | sample rate
//!     28 |    4 | byte rate
//!     32 |    2 | block align
//!     34 |    2 | bits per sample
//!     36 |    4 | "data"
//!     40 |    4 | data size in bytes

use std::fmt;
use std::io::Read;

use serde::{Serialize, Serializer};

use crate::engine::io::read_fully;
use crate::error::{FormatError, Result, WaveError};

// ============================================================================
// Constants
// ============================================================================

/// Length of the header on the wire
pub const HEADER_LEN: usize = 44;

/// Base of a recomputed RIFF size: the whole header length
pub const RIFF_SIZE_BASE: u32 = HEADER_LEN as u32;

/// Bytes per stereo frame: 2 channels of 16-bit samples
pub const BYTES_PER_FRAME: u32 = 4;

/// The only supported sample rate
pub const SAMPLE_RATE: u32 = 44100;

pub const RIFF_ID: [u8; 4] = *b"RIFF";
pub const WAVE_ID: [u8; 4] = *b"WAVE";
pub const FMT_ID: [u8; 4] = *b"fmt ";
pub const DATA_ID: [u8; 4] = *b"data";

/// Format chunk body length for plain PCM
const PCM_FORMAT_CHUNK_SIZE: u32 = 16;

/// Compression code for linear PCM
const PCM_COMPRESSION: u16 = 1;

// ============================================================================
// Header Types
// ============================================================================

/// The "fmt " chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatChunk {
    #[serde(serialize_with = "serialize_fourcc")]
    pub id: [u8; 4],
    pub size: u32,
    pub compression: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

/// The "data" chunk header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataChunk {
    #[serde(serialize_with = "serialize_fourcc")]
    pub id: [u8; 4],
    /// Size of the sample data in bytes
    pub size: u32,
}

/// Canonical WAV header, held exactly as it appears on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaveHeader {
    #[serde(serialize_with = "serialize_fourcc")]
    pub id: [u8; 4],
    /// RIFF size, written as `HEADER_LEN + data size` when recomputed
    pub size: u32,
    #[serde(serialize_with = "serialize_fourcc")]
    pub format: [u8; 4],
    pub format_chunk: FormatChunk,
    pub data_chunk: DataChunk,
}

impl WaveHeader {
    /// Build a canonical stereo 16-bit 44.1kHz header for `num_samples` frames
    pub fn stereo_pcm(num_samples: u32) -> Self {
        let data_size = num_samples.saturating_mul(BYTES_PER_FRAME);
        WaveHeader {
            id: RIFF_ID,
            size: data_size.saturating_add(RIFF_SIZE_BASE),
            format: WAVE_ID,
            format_chunk: FormatChunk {
                id: FMT_ID,
                size: PCM_FORMAT_CHUNK_SIZE,
                compression: PCM_COMPRESSION,
                channels: 2,
                sample_rate: SAMPLE_RATE,
                byte_rate: SAMPLE_RATE * BYTES_PER_FRAME,
                block_align: BYTES_PER_FRAME as u16,
                bits_per_sample: 16,
            },
            data_chunk: DataChunk {
                id: DATA_ID,
                size: data_size,
            },
        }
    }

    /// Decode the header fields without validating them
    pub fn from_bytes(bytes: &[u8; HEADER_LEN]) -> Self {
        WaveHeader {
            id: fourcc(bytes, 0),
            size: le_u32(bytes, 4),
            format: fourcc(bytes, 8),
            format_chunk: FormatChunk {
                id: fourcc(bytes, 12),
                size: le_u32(bytes, 16),
                compression: le_u16(bytes, 20),
                channels: le_u16(bytes, 22),
                sample_rate: le_u32(bytes, 24),
                byte_rate: le_u32(bytes, 28),
                block_align: le_u16(bytes, 32),
                bits_per_sample: le_u16(bytes, 34),
            },
            data_chunk: DataChunk {
                id: fourcc(bytes, 36),
                size: le_u32(bytes, 40),
            },
        }
    }

    /// Encode the header for writing
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        let fmt = &self.format_chunk;

        out[0..4].copy_from_slice(&self.id);
        out[4..8].copy_from_slice(&self.size.to_le_bytes());
        out[8..12].copy_from_slice(&self.format);
        out[12..16].copy_from_slice(&fmt.id);
        out[16..20].copy_from_slice(&fmt.size.to_le_bytes());
        out[20..22].copy_from_slice(&fmt.compression.to_le_bytes());
        out[22..24].copy_from_slice(&fmt.channels.to_le_bytes());
        out[24..28].copy_from_slice(&fmt.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&fmt.byte_rate.to_le_bytes());
        out[32..34].copy_from_slice(&fmt.block_align.to_le_bytes());
        out[34..36].copy_from_slice(&fmt.bits_per_sample.to_le_bytes());
        out[36..40].copy_from_slice(&self.data_chunk.id);
        out[40..44].copy_from_slice(&self.data_chunk.size.to_le_bytes());
        out
    }

    /// Read the raw header from a byte source
    ///
    /// Consumes exactly `HEADER_LEN` bytes. No validation is performed.
    ///
    /// # Errors
    /// * `TruncatedStream` - If the source ends before the header is complete
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_LEN];
        let actual = read_fully(reader, &mut bytes)?;
        if actual < HEADER_LEN {
            return Err(WaveError::TruncatedStream {
                expected: HEADER_LEN,
                actual,
            });
        }
        Ok(Self::from_bytes(&bytes))
    }

    /// Check the header against the supported profile
    ///
    /// Checks run in a fixed order and the first violation is returned:
    /// RIFF tag, format chunk, data chunk, channels, sample rate, bit depth.
    /// The "WAVE" tag is carried but not checked.
    pub fn validate(&self) -> std::result::Result<(), FormatError> {
        let fmt = &self.format_chunk;

        if self.id != RIFF_ID {
            return Err(FormatError::NotRiff);
        }

        if fmt.id != FMT_ID
            || fmt.size != PCM_FORMAT_CHUNK_SIZE
            || fmt.compression != PCM_COMPRESSION
        {
            return Err(FormatError::BadFormatChunk);
        }

        if self.data_chunk.id != DATA_ID {
            return Err(FormatError::BadDataChunk);
        }

        if fmt.channels != 2 {
            return Err(FormatError::NotStereo);
        }

        if fmt.sample_rate != SAMPLE_RATE {
            return Err(FormatError::InvalidSampleRate);
        }

        if fmt.bits_per_sample != 16 {
            return Err(FormatError::InvalidSampleSize);
        }

        Ok(())
    }

    /// Number of whole stereo frames declared by the data chunk
    pub fn declared_samples(&self) -> usize {
        (self.data_chunk.size / BYTES_PER_FRAME) as usize
    }

    /// Recompute both size fields for a buffer of `num_samples` frames
    ///
    /// # Errors
    /// * `DataTooLarge` - If the sizes do not fit the 32-bit header fields
    pub fn set_num_samples(&mut self, num_samples: usize) -> Result<()> {
        let (data_size, riff_size) = sizes_for(num_samples)?;
        self.data_chunk.size = data_size;
        self.size = riff_size;
        Ok(())
    }
}

/// Data and RIFF size fields for a buffer of `num_samples` frames
pub(crate) fn sizes_for(num_samples: usize) -> Result<(u32, u32)> {
    u32::try_from(num_samples)
        .ok()
        .and_then(|n| n.checked_mul(BYTES_PER_FRAME))
        .and_then(|data| data.checked_add(RIFF_SIZE_BASE).map(|riff| (data, riff)))
        .ok_or(WaveError::DataTooLarge { num_samples })
}

/// Read and validate a header from a byte source
///
/// Reads only the header; no sample data is consumed.
pub fn parse_header<R: Read>(reader: &mut R) -> Result<WaveHeader> {
    let header = WaveHeader::read_from(reader)?;
    header.validate()?;
    Ok(header)
}

impl fmt::Display for WaveHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_chunk = &self.format_chunk;
        writeln!(f, "ID:              {}", FourCc(&self.id))?;
        writeln!(f, "Size:            {}", self.size)?;
        writeln!(f, "Format:          {}", FourCc(&self.format))?;
        writeln!(f, "Format ID:       {}", FourCc(&fmt_chunk.id))?;
        writeln!(f, "Format Size:     {}", fmt_chunk.size)?;
        writeln!(f, "Compression:     {}", fmt_chunk.compression)?;
        writeln!(f, "Channels:        {}", fmt_chunk.channels)?;
        writeln!(f, "Sample Rate:     {}", fmt_chunk.sample_rate)?;
        writeln!(f, "Byte Rate:       {}", fmt_chunk.byte_rate)?;
        writeln!(f, "Block Align:     {}", fmt_chunk.block_align)?;
        writeln!(f, "Bits Per Sample: {}", fmt_chunk.bits_per_sample)?;
        writeln!(f, "Data ID:         {}", FourCc(&self.data_chunk.id))?;
        write!(f, "Data Size:       {}", self.data_chunk.size)
    }
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Four-character code rendered lossily as text
struct FourCc<'a>(&'a [u8; 4]);

impl fmt::Display for FourCc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.0))
    }
}

fn serialize_fourcc<S: Serializer>(id: &[u8; 4], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(id))
}

fn fourcc(bytes: &[u8], offset: usize) -> [u8; 4] {
    [
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]
}

fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(fourcc(bytes, offset))
}

fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use test_case::test_case;

    fn canonical() -> WaveHeader {
        WaveHeader::stereo_pcm(100)
    }

    #[test]
    fn test_stereo_pcm_sizes() {
        let header = canonical();
        assert_eq!(header.data_chunk.size, 400);
        assert_eq!(header.size, 444);
        assert_eq!(header.format_chunk.byte_rate, 176_400);
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_bytes_round_trip() {
        let header = canonical();
        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(WaveHeader::from_bytes(&bytes), header);
    }

    #[test_case(|h: &mut WaveHeader| h.id = *b"RIFX", FormatError::NotRiff ; "riff magic")]
    #[test_case(|h: &mut WaveHeader| h.format_chunk.id = *b"fmt\0", FormatError::BadFormatChunk ; "fmt magic")]
    #[test_case(|h: &mut WaveHeader| h.format_chunk.size = 18, FormatError::BadFormatChunk ; "fmt size")]
    #[test_case(|h: &mut WaveHeader| h.format_chunk.compression = 3, FormatError::BadFormatChunk ; "compression")]
    #[test_case(|h: &mut WaveHeader| h.data_chunk.id = *b"LIST", FormatError::BadDataChunk ; "data magic")]
    #[test_case(|h: &mut WaveHeader| h.format_chunk.channels = 1, FormatError::NotStereo ; "mono")]
    #[test_case(|h: &mut WaveHeader| h.format_chunk.sample_rate = 48000, FormatError::InvalidSampleRate ; "sample rate")]
    #[test_case(|h: &mut WaveHeader| h.format_chunk.bits_per_sample = 24, FormatError::InvalidSampleSize ; "bit depth")]
    fn test_validate_rejects(corrupt: fn(&mut WaveHeader), expected: FormatError) {
        let mut header = canonical();
        corrupt(&mut header);
        assert_eq!(header.validate(), Err(expected));
    }

    #[test]
    fn test_validation_order_reports_first_violation() {
        let mut header = canonical();
        header.format_chunk.channels = 6;
        header.format_chunk.sample_rate = 8000;
        header.data_chunk.id = *b"junk";
        assert_eq!(header.validate(), Err(FormatError::BadDataChunk));

        header.id = *b"RIFX";
        assert_eq!(header.validate(), Err(FormatError::NotRiff));
    }

    #[test]
    fn test_wave_tag_not_checked() {
        let mut header = canonical();
        header.format = *b"AVI ";
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_parse_header_truncated() {
        let bytes = canonical().to_bytes();
        let mut cursor = Cursor::new(&bytes[..20]);
        match parse_header(&mut cursor) {
            Err(WaveError::TruncatedStream { expected, actual }) => {
                assert_eq!(expected, HEADER_LEN);
                assert_eq!(actual, 20);
            }
            other => panic!("Expected TruncatedStream, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_header_reads_only_header() {
        let mut bytes = canonical().to_bytes().to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 4]);
        let mut cursor = Cursor::new(bytes);
        parse_header(&mut cursor).unwrap();
        assert_eq!(cursor.position(), HEADER_LEN as u64);
    }

    #[test]
    fn test_set_num_samples() {
        let mut header = canonical();
        header.set_num_samples(25).unwrap();
        assert_eq!(header.data_chunk.size, 100);
        assert_eq!(header.size, 144);
        assert_eq!(header.declared_samples(), 25);
    }

    #[test]
    fn test_set_num_samples_overflow() {
        let mut header = canonical();
        let result = header.set_num_samples(u32::MAX as usize);
        assert!(matches!(result, Err(WaveError::DataTooLarge { .. })));
        // Unchanged on failure
        assert_eq!(header, canonical());
    }

    #[test]
    fn test_display_table() {
        let text = canonical().to_string();
        assert!(text.starts_with("ID:              RIFF\n"));
        assert!(text.contains("Sample Rate:     44100"));
        assert!(text.ends_with("Data Size:       400"));
    }

    #[test]
    fn test_json_fourcc_as_strings() {
        let json = serde_json::to_value(canonical()).unwrap();
        assert_eq!(json["id"], "RIFF");
        assert_eq!(json["format_chunk"]["id"], "fmt ");
        assert_eq!(json["data_chunk"]["size"], 400);
    }
}
