//! DOCX conversion.
//!
//! This module is organized into two stages:
//! - Converter: turns DET elements into the word-processing structural tree
//!   of [`model`], allocating numbering and relationship ids per call
//! - Packager: renders the structural tree into `.docx` bytes with docx-rs
//!   (feature `docx`), together with its style sheet and numbering

pub mod model;

mod context;
mod converter;
mod image;
mod list;
mod table;

#[cfg(feature = "docx")]
mod numbering;
#[cfg(feature = "docx")]
mod styles;
#[cfg(feature = "docx")]
mod writer;

pub use converter::DocxConverter;
pub use self::image::EMU_PER_PX;
pub use model::*;
#[cfg(feature = "docx")]
pub use writer::DocxPackager;
