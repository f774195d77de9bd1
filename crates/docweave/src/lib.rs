//! # Docweave
//!
//! Converts markup node trees into word-processing documents in two stages:
//!
//! 1. The [`builder`] walks a [`MarkupNode`] tree into a Document Element
//!    Tree (DET, see [`det`]), dispatching to registered [`tags`] handlers and
//!    flattening inline markup into styled text leaves.
//! 2. A [`FormatWriter`] serializes the DET. The built-in `docx` writer maps
//!    the DET onto the structural tree of [`docx::model`] and packs it with
//!    docx-rs; the `json` writer emits the DET wire form.
//!
//! ```ignore
//! let docweave = docweave::Docweave::default();
//! let bytes = docweave.convert_html("<h1>Title</h1><p>Body</p>", "docx")?;
//! ```

pub mod builder;
pub mod det;
pub mod docx;
mod error;
pub mod fetch;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
pub mod style;
pub mod tags;
pub mod writer;

use std::sync::Arc;

pub use error::*;

pub use crate::builder::TreeBuilder;
pub use crate::det::Element;
pub use crate::docx::{Document, DocxConverter};
pub use crate::fetch::{FetchedResource, NoFetch, ResourceFetcher};
pub use crate::node::{MarkupElement, MarkupNode};
pub use crate::style::{StyleFragment, StyleMapper};
pub use crate::tags::{TagContext, TagHandler, TagRegistry};
pub use crate::writer::{FormatRegistry, FormatWriter, WriteEnv};

/// The result type for docweave.
pub type Result<T, Err = Error> = std::result::Result<T, Err>;

/// Conversion options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Images wider than this, in EMU, are scaled down keeping their aspect
    /// ratio.
    pub max_image_width_emu: u32,
    /// The size, in EMU, of images whose size can neither be read from their
    /// attributes nor from their data.
    pub default_image_size_emu: (u32, u32),
    /// Renders `javascript:` and `vbscript:` links as plain runs.
    pub sanitize_links: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_image_width_emu: 5_486_400,
            default_image_size_emu: (4_000_000, 3_000_000),
            sanitize_links: true,
        }
    }
}

/// The conversion pipeline with its extension points.
///
/// Registries are configured up front and only read during a conversion,
/// so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct Docweave {
    tags: TagRegistry,
    mapper: StyleMapper,
    formats: FormatRegistry,
    fetcher: Arc<dyn ResourceFetcher>,
    options: ConvertOptions,
}

impl Default for Docweave {
    fn default() -> Self {
        Self {
            tags: TagRegistry::new(),
            mapper: StyleMapper::default(),
            formats: FormatRegistry::default(),
            fetcher: Arc::new(NoFetch),
            options: ConvertOptions::default(),
        }
    }
}

impl std::fmt::Debug for Docweave {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Docweave")
            .field("tags", &self.tags)
            .field("mapper", &self.mapper)
            .field("formats", &self.formats)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Docweave {
    /// Creates a pipeline with the built-in style mappings and formats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a tag; a later registration replaces an
    /// earlier one.
    pub fn register_tag_handler(&mut self, tag: &str, handler: impl TagHandler + 'static) {
        self.tags.register_tag_handler(tag, handler);
    }

    /// Registers or overrides the handler of a style property.
    pub fn add_mapping<F>(&mut self, property: &str, mapping: F)
    where
        F: Fn(&str) -> Option<StyleFragment> + Send + Sync + 'static,
    {
        self.mapper.add_mapping(property, mapping);
    }

    /// Registers or overrides an output format.
    pub fn register_format(&mut self, name: &str, writer: impl FormatWriter + 'static) {
        self.formats.register(name, writer);
    }

    /// Sets the fetcher used for remote images.
    pub fn with_fetcher(mut self, fetcher: impl ResourceFetcher + 'static) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    /// Sets the conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// The style mapper.
    pub fn mapper(&self) -> &StyleMapper {
        &self.mapper
    }

    /// The conversion options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Builds the DET of a markup node tree.
    pub fn build_tree(&self, nodes: &[MarkupNode]) -> Vec<Element> {
        TreeBuilder::new(&self.tags).build(nodes)
    }

    /// Builds the DET and converts it into the word-processing structural
    /// tree.
    pub fn to_document(&self, nodes: &[MarkupNode]) -> Result<Document> {
        let elements = self.build_tree(nodes);
        DocxConverter::new(&self.mapper, self.fetcher.as_ref())
            .with_options(self.options.clone())
            .convert(&elements)
    }

    /// Converts a markup node tree into the named format.
    ///
    /// An unregistered format fails before any work is done.
    pub fn convert(&self, nodes: &[MarkupNode], format: &str) -> Result<Vec<u8>> {
        let writer = self.formats.require(format)?;
        let elements = self.build_tree(nodes);
        log::debug!(
            "docweave: writing {} top-level elements as {format}",
            elements.len()
        );
        writer.write(&elements, &self.env())
    }

    /// Parses an HTML string and converts it into the named format.
    #[cfg(feature = "html")]
    pub fn convert_html(&self, input: &str, format: &str) -> Result<Vec<u8>> {
        self.formats.require(format)?;
        self.convert(&html::parse_html(input), format)
    }

    fn env(&self) -> WriteEnv<'_> {
        WriteEnv {
            mapper: &self.mapper,
            fetcher: self.fetcher.as_ref(),
            options: &self.options,
        }
    }
}
