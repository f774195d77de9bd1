//! DOCX writer: structural conversion followed by packaging.

use super::{FormatWriter, WriteEnv};
use crate::Result;
use crate::det::Element;
use crate::docx::{DocxConverter, DocxPackager};

/// Converts the DET into the structural tree and packs it into `.docx`
/// bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxWriter;

impl FormatWriter for DocxWriter {
    fn write(&self, elements: &[Element], env: &WriteEnv<'_>) -> Result<Vec<u8>> {
        let document = DocxConverter::new(env.mapper, env.fetcher)
            .with_options(env.options.clone())
            .convert(elements)?;
        DocxPackager::new().pack(&document)
    }
}
