//! JSON signal files.
//!
//! ```json
//! { "shape": [4, 2], "samples": [[1.0, 0.0], [0.0, 0.0], ...] }
//! ```
//!
//! Samples are `[re, im]` pairs in row-major order.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use num_complex::Complex64;
use pinfft_core::{ArrayN, Buffer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignalFile {
    pub shape: Vec<usize>,
    pub samples: Vec<[f64; 2]>,
}

#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid signal: {0}")]
    Invalid(#[from] pinfft_core::Error),
}

impl SignalFile {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SignalError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn load(path: &Path) -> Result<Self, SignalError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn into_array(self) -> Result<ArrayN<f64>, SignalError> {
        let data = self
            .samples
            .into_iter()
            .map(|[re, im]| Complex64::new(re, im))
            .collect();
        Ok(ArrayN::from_vec(&self.shape, data)?)
    }

    pub fn from_array(array: &ArrayN<f64>) -> Self {
        Self {
            shape: array.dims().to_vec(),
            samples: array.as_slice().iter().map(|c| [c.re, c.im]).collect(),
        }
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), SignalError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Writes to `dest`, or stdout when `None`.
    pub fn write(&self, dest: Option<&Path>) -> Result<(), SignalError> {
        let mut writer: Box<dyn Write> = match dest {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout())),
        };
        self.to_writer(&mut writer)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
