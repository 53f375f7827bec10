//! Operation pipeline
//!
//! Operations are applied strictly in order (index 0 first), one at a time.
//! The first failure stops the pipeline.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::Operation;
use crate::engine::Wave;
use crate::error::Result;

/// Ordered list of operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    operations: Vec<Operation>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a pipeline from a JSON array of operations
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a pipeline from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading pipeline from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Append an operation at the end
    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Check every operation's parameters up front
    pub fn validate(&self) -> Result<()> {
        self.operations.iter().try_for_each(Operation::validate)
    }

    /// Apply all operations in order
    pub fn apply(&self, wave: &mut Wave) -> Result<()> {
        for (index, operation) in self.operations.iter().enumerate() {
            debug!(
                "[{}/{}] {} ({} samples)",
                index + 1,
                self.operations.len(),
                operation,
                wave.num_samples()
            );
            operation.apply(wave)?;
        }
        Ok(())
    }
}

impl From<Vec<Operation>> for Pipeline {
    fn from(operations: Vec<Operation>) -> Self {
        Self { operations }
    }
}

impl FromIterator<Operation> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}
