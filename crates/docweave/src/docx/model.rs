//! The word-processing structural tree produced by the converter.
//!
//! The tree mirrors the body model of a `.docx` package: paragraphs made of
//! runs and hyperlinks, tables with merge markers, numbering definitions
//! referenced by list paragraphs, and relationships binding hyperlinks and
//! images to their targets. It is the contract handed to a packager.

use ecow::EcoString;

use crate::det::ListType;
use crate::style::{Border, ParagraphFormat, RunFormat, Width};

/// A converted document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Body blocks in input order.
    pub body: Vec<BodyElement>,
    /// Numbering definitions, one per top-level list, by ascending id.
    pub numbering: Vec<NumberingDefinition>,
    /// Relationships by ascending id.
    pub relationships: Vec<Relationship>,
}

impl Document {
    /// Iterates over all paragraphs depth-first, including those in table
    /// cells.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        let mut out = Vec::new();
        collect_paragraphs(&self.body, &mut out);
        out.into_iter()
    }

    /// Looks up a relationship by id.
    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.relationships.iter().find(|rel| rel.id == id)
    }
}

fn collect_paragraphs<'a>(blocks: &'a [BodyElement], out: &mut Vec<&'a Paragraph>) {
    for block in blocks {
        match block {
            BodyElement::Paragraph(para) => out.push(para),
            BodyElement::Table(table) => {
                for cell in table.rows.iter().flat_map(|row| &row.cells) {
                    collect_paragraphs(&cell.content, out);
                }
            }
        }
    }
}

/// A block of the document body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyElement {
    /// A paragraph.
    Paragraph(Paragraph),
    /// A table.
    Table(Table),
}

/// A paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Paragraph style id, e.g. `Heading1` or `ListParagraph`.
    pub style_id: Option<EcoString>,
    /// List numbering reference.
    pub numbering: Option<NumberingRef>,
    /// Direct paragraph formatting.
    pub format: ParagraphFormat,
    /// Runs and hyperlinks in order.
    pub children: Vec<ParagraphChild>,
}

impl Paragraph {
    /// Creates an empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style id.
    pub fn style(mut self, style_id: impl Into<EcoString>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    /// Appends a run.
    pub fn add_run(mut self, run: Run) -> Self {
        self.children.push(ParagraphChild::Run(run));
        self
    }

    /// Concatenates the text of all runs; breaks count as newlines.
    pub fn text(&self) -> EcoString {
        let mut out = EcoString::new();
        for run in self.runs() {
            match &run.content {
                RunContent::Text(text) => out.push_str(text),
                RunContent::Break => out.push('\n'),
                RunContent::Drawing(_) => {}
            }
        }
        out
    }

    /// Iterates over all runs, including those inside hyperlinks.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.children.iter().flat_map(|child| match child {
            ParagraphChild::Run(run) => std::slice::from_ref(run),
            ParagraphChild::Hyperlink(link) => link.runs.as_slice(),
        })
    }

    /// Whether the paragraph has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// A list numbering reference of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingRef {
    /// The numbering definition id.
    pub num_id: u32,
    /// Zero-based level index.
    pub level: u32,
}

/// An inline child of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum ParagraphChild {
    /// A run.
    Run(Run),
    /// A hyperlink wrapping runs.
    Hyperlink(Hyperlink),
}

/// A hyperlink bound to a relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperlink {
    /// The relationship id of the target.
    pub rel_id: EcoString,
    /// The linked runs.
    pub runs: Vec<Run>,
}

/// A run of uniformly formatted content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    /// Run formatting.
    pub format: RunFormat,
    /// The content.
    pub content: RunContent,
}

impl Run {
    /// Creates a text run.
    pub fn text(text: impl Into<EcoString>) -> Self {
        Self {
            format: RunFormat::default(),
            content: RunContent::Text(text.into()),
        }
    }

    /// Creates a line break run.
    pub fn line_break() -> Self {
        Self {
            format: RunFormat::default(),
            content: RunContent::Break,
        }
    }

    /// Sets the formatting.
    pub fn with_format(mut self, format: RunFormat) -> Self {
        self.format = format;
        self
    }

    /// The text of the run, if it is a text run.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            RunContent::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// The content of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunContent {
    /// Literal text.
    Text(EcoString),
    /// A line break.
    Break,
    /// An inline image.
    Drawing(Drawing),
}

impl Default for RunContent {
    fn default() -> Self {
        RunContent::Text(EcoString::new())
    }
}

/// An inline image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drawing {
    /// The relationship id of the image part.
    pub rel_id: EcoString,
    /// Width in EMU.
    pub width_emu: u32,
    /// Height in EMU.
    pub height_emu: u32,
    /// Alternative text.
    pub description: EcoString,
}

/// A table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Preferred table width.
    pub width: Option<Width>,
    /// Table border.
    pub border: Option<Border>,
    /// Rows in order.
    pub rows: Vec<TableRow>,
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    /// Cells in grid order, including vertical merge placeholders.
    pub cells: Vec<TableCell>,
}

/// Vertical merge marker of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalMerge {
    /// The first cell of a vertically merged region.
    Restart,
    /// A cell continuing the region above.
    Continue,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// Number of grid columns spanned.
    pub grid_span: u32,
    /// Vertical merge marker.
    pub vertical_merge: Option<VerticalMerge>,
    /// Preferred cell width.
    pub width: Option<Width>,
    /// Background shading as six hex digits.
    pub shading: Option<EcoString>,
    /// Cell content; empty for merge placeholders.
    pub content: Vec<BodyElement>,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            grid_span: 1,
            vertical_merge: None,
            width: None,
            shading: None,
            content: Vec::new(),
        }
    }
}

/// A numbering definition referenced by list paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingDefinition {
    /// The numbering id.
    pub num_id: u32,
    /// The kind of the list that allocated it.
    pub list_type: ListType,
}

/// A relationship entry of the package.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// The id, e.g. `rId1`.
    pub id: EcoString,
    /// The target.
    pub target: RelationshipTarget,
}

/// What a relationship points at.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationshipTarget {
    /// An external hyperlink.
    Hyperlink {
        /// The link target.
        url: EcoString,
    },
    /// An embedded image part.
    Image {
        /// The part name inside the package, e.g. `media/image1.png`.
        part_name: EcoString,
        /// The MIME type.
        content_type: EcoString,
        /// The image bytes.
        data: Vec<u8>,
    },
}
