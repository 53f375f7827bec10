//! Processing report written by `--report`.

use std::fs;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::dsp::Operation;
use crate::engine::{Wave, WaveHeader};
use crate::error::Result;

/// Summary of one run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingReport {
    pub input_header: WaveHeader,
    pub output_header: WaveHeader,
    pub operations: Vec<Operation>,
    pub input_samples: usize,
    pub output_samples: usize,
    pub output_duration_secs: f64,
    /// SHA-256 of the serialized output, lowercase hex
    pub output_sha256: String,
}

impl ProcessingReport {
    pub fn new(
        input_header: WaveHeader,
        input_samples: usize,
        output: &Wave,
        operations: &[Operation],
        output_bytes: &[u8],
    ) -> Self {
        Self {
            input_header,
            output_header: *output.header(),
            operations: operations.to_vec(),
            input_samples,
            output_samples: output.num_samples(),
            output_duration_secs: output.duration_secs(),
            output_sha256: sha256_hex(output_bytes),
        }
    }

    /// Write the report as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
