//! JSON writer: the DET in its wire form.

use super::{FormatWriter, WriteEnv};
use crate::Result;
use crate::det::Element;

/// Writes the DET as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonWriter;

impl FormatWriter for JsonWriter {
    fn write(&self, elements: &[Element], _env: &WriteEnv<'_>) -> Result<Vec<u8>> {
        let mut out = serde_json::to_vec_pretty(elements)?;
        out.push(b'\n');
        Ok(out)
    }
}
