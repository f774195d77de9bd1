//! DOCX packager: renders the structural tree with docx-rs.

use std::io::Cursor;

use docx_rs::*;
use log::{debug, warn};

use crate::{Error, Result};
use crate::style::{
    Alignment, Border, ParagraphFormat, RunFormat, VerticalAlign, Width, WidthUnit,
};

use super::model::{self, BodyElement, Document, ParagraphChild, RelationshipTarget, RunContent};
use super::{numbering, styles};

/// Packs a [`Document`] into `.docx` bytes.
///
/// Relationship ids of the structural tree are resolved here: hyperlinks
/// become external links and image parts are embedded as inline pictures.
/// The package's own part naming is left to docx-rs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxPackager;

impl DocxPackager {
    /// Creates a packager.
    pub fn new() -> Self {
        Self
    }

    /// Renders and packs the document.
    pub fn pack(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut docx = styles::initialize_styles(Docx::new());
        docx = numbering::add_numbering(docx, &doc.numbering);

        for block in &doc.body {
            docx = match block {
                BodyElement::Paragraph(para) => docx.add_paragraph(self.paragraph(doc, para)),
                BodyElement::Table(table) => docx.add_table(self.table(doc, table)),
            };
        }

        let mut buffer = Vec::new();
        docx.build()
            .pack(&mut Cursor::new(&mut buffer))
            .map_err(|e| Error::io(format!("failed to pack DOCX: {e}")))?;

        Ok(buffer)
    }

    fn paragraph(&self, doc: &Document, para: &model::Paragraph) -> Paragraph {
        let mut out = Paragraph::new();
        if let Some(style_id) = &para.style_id {
            out = out.style(style_id);
        }
        if let Some(numbering) = para.numbering {
            out = out.numbering(
                NumberingId::new(numbering.num_id as usize),
                IndentLevel::new(numbering.level as usize),
            );
        }
        out = paragraph_format(out, &para.format);

        for child in &para.children {
            out = match child {
                ParagraphChild::Run(run) => out.add_run(self.run(doc, run)),
                ParagraphChild::Hyperlink(link) => match doc.relationship(&link.rel_id) {
                    Some(model::Relationship {
                        target: RelationshipTarget::Hyperlink { url },
                        ..
                    }) => {
                        let mut hyperlink = Hyperlink::new(url.as_str(), HyperlinkType::External);
                        for run in &link.runs {
                            hyperlink = hyperlink.add_run(self.run(doc, run));
                        }
                        out.add_hyperlink(hyperlink)
                    }
                    _ => {
                        warn!("docweave: hyperlink {} has no target, packing plain runs", link.rel_id);
                        link.runs
                            .iter()
                            .fold(out, |out, run| out.add_run(self.run(doc, run)))
                    }
                },
            };
        }

        // Word drops paragraphs without runs from some views.
        if para.is_empty() {
            out = out.add_run(Run::new().add_text(""));
        }
        out
    }

    fn run(&self, doc: &Document, run: &model::Run) -> Run {
        let out = run_format(Run::new(), &run.format);
        match &run.content {
            RunContent::Text(text) => out.add_text(text.as_str()),
            RunContent::Break => out.add_break(BreakType::TextWrapping),
            RunContent::Drawing(drawing) => self.drawing(doc, out, drawing),
        }
    }

    fn drawing(&self, doc: &Document, run: Run, drawing: &model::Drawing) -> Run {
        let data = match doc.relationship(&drawing.rel_id) {
            Some(model::Relationship {
                target: RelationshipTarget::Image { data, .. },
                ..
            }) => data,
            _ => {
                warn!("docweave: image {} has no part", drawing.rel_id);
                return alt_text(run, drawing);
            }
        };

        let pic = match image::guess_format(data) {
            Ok(image::ImageFormat::Png | image::ImageFormat::Jpeg) => Pic::new(data),
            // Other formats are converted to PNG
            _ => match to_png(data) {
                Some(buffer) => Pic::new(&buffer),
                None => {
                    warn!("docweave: cannot decode image {}, packing its alt text", drawing.rel_id);
                    return alt_text(run, drawing);
                }
            },
        };

        run.add_image(pic.size(drawing.width_emu, drawing.height_emu))
    }

    fn table(&self, doc: &Document, table: &model::Table) -> Table {
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let cells = row.cells.iter().map(|cell| self.cell(doc, cell)).collect();
                TableRow::new(cells)
            })
            .collect();

        let mut out = Table::new(rows);
        if let Some(width) = table.width {
            let (size, ty) = width_of(width);
            out = out.width(size, ty);
        }
        if let Some(border) = &table.border {
            out = out.set_borders(table_borders(border));
        }
        out
    }

    fn cell(&self, doc: &Document, cell: &model::TableCell) -> TableCell {
        let mut out = TableCell::new();
        if cell.grid_span > 1 {
            out = out.grid_span(cell.grid_span as usize);
        }
        match cell.vertical_merge {
            Some(model::VerticalMerge::Restart) => out = out.vertical_merge(VMergeType::Restart),
            Some(model::VerticalMerge::Continue) => out = out.vertical_merge(VMergeType::Continue),
            None => {}
        }
        if let Some(width) = cell.width {
            let (size, ty) = width_of(width);
            out = out.width(size, ty);
        }
        if let Some(fill) = &cell.shading {
            out = out.shading(Shading::new().fill(fill.as_str()));
        }

        for block in &cell.content {
            out = match block {
                BodyElement::Paragraph(para) => out.add_paragraph(self.paragraph(doc, para)),
                BodyElement::Table(table) => out.add_table(self.table(doc, table)),
            };
        }
        // A cell must hold at least one paragraph.
        if cell.content.is_empty() {
            out = out.add_paragraph(Paragraph::new());
        }
        out
    }
}

fn paragraph_format(mut para: Paragraph, format: &ParagraphFormat) -> Paragraph {
    if let Some(alignment) = format.alignment {
        para = para.align(match alignment {
            Alignment::Left => AlignmentType::Left,
            Alignment::Center => AlignmentType::Center,
            Alignment::Right => AlignmentType::Right,
            Alignment::Both => AlignmentType::Both,
        });
    }

    let spacing = format.spacing;
    if !spacing.is_empty() {
        let mut line_spacing = LineSpacing::new();
        if let Some(before) = spacing.before {
            line_spacing = line_spacing.before(before);
        }
        if let Some(after) = spacing.after {
            line_spacing = line_spacing.after(after);
        }
        if let Some(line) = spacing.line {
            // In 240ths of a line.
            line_spacing = line_spacing
                .line_rule(LineSpacingType::Auto)
                .line(line as _);
        }
        para = para.line_spacing(line_spacing);
    }

    let indent = format.indent;
    if !indent.is_empty() {
        let special = indent.first_line.map(|first_line| {
            if first_line < 0 {
                SpecialIndentType::Hanging(-first_line)
            } else {
                SpecialIndentType::FirstLine(first_line)
            }
        });
        para = para.indent(indent.left, special, indent.right, None);
    }

    if format.border.is_some() || format.border_bottom.is_some() {
        let mut borders = ParagraphBorders::with_empty();
        if let Some(border) = &format.border {
            for position in [
                ParagraphBorderPosition::Top,
                ParagraphBorderPosition::Left,
                ParagraphBorderPosition::Bottom,
                ParagraphBorderPosition::Right,
            ] {
                borders = borders.set(paragraph_border(position, border));
            }
        }
        if let Some(border) = &format.border_bottom {
            borders = borders.set(paragraph_border(ParagraphBorderPosition::Bottom, border));
        }
        para.property = para.property.set_borders(borders);
    }
    if format.shading.is_some() {
        debug!("docweave: paragraph shading is not packed");
    }
    para
}

fn run_format(mut run: Run, format: &RunFormat) -> Run {
    if format.bold == Some(true) {
        run = run.bold();
    }
    if format.italic == Some(true) {
        run = run.italic();
    }
    if let Some(underline) = format.underline.as_deref().filter(|u| *u != "none") {
        run = run.underline(underline);
    }
    if format.strike == Some(true) {
        run = run.strike();
    }
    if let Some(color) = &format.color {
        run = run.color(color.as_str());
    }
    if let Some(size) = format.size {
        run = run.size(size as usize);
    }
    let vert_align = match format.vertical_align {
        Some(VerticalAlign::Superscript) => Some(VertAlignType::SuperScript),
        Some(VerticalAlign::Subscript) => Some(VertAlignType::SubScript),
        Some(VerticalAlign::Baseline) | None => None,
    };
    if let Some(vert_align) = vert_align {
        run.run_property = run.run_property.vert_align(vert_align);
    }
    if let Some(fill) = &format.shading {
        run = run.shading(Shading::new().fill(fill.as_str()));
    }
    if let Some(spacing) = format.letter_spacing {
        run = run.character_spacing(spacing);
    }
    if let Some(font) = &format.font {
        let font = font.as_str();
        run = run.fonts(
            RunFonts::new()
                .ascii(font)
                .hi_ansi(font)
                .east_asia(font)
                .cs(font),
        );
    }
    run
}

fn border_type(border: &Border) -> BorderType {
    match border.style.as_deref() {
        Some("dashed") => BorderType::Dashed,
        Some("dotted") => BorderType::Dotted,
        Some("double") => BorderType::Double,
        Some("none") => BorderType::None,
        _ => BorderType::Single,
    }
}

fn paragraph_border(position: ParagraphBorderPosition, border: &Border) -> ParagraphBorder {
    let mut out = ParagraphBorder::new(position)
        .val(border_type(border))
        .size(border.size.unwrap_or(4) as usize)
        .space(border.space.unwrap_or(0) as usize);
    if let Some(color) = &border.color {
        out = out.color(color.as_str());
    }
    out
}

/// The same border on every edge and between cells.
fn table_borders(border: &Border) -> TableBorders {
    let mut borders = TableBorders::with_empty();
    for position in [
        TableBorderPosition::Top,
        TableBorderPosition::Left,
        TableBorderPosition::Bottom,
        TableBorderPosition::Right,
        TableBorderPosition::InsideH,
        TableBorderPosition::InsideV,
    ] {
        let mut edge = TableBorder::new(position)
            .border_type(border_type(border))
            .size(border.size.unwrap_or(4) as usize);
        if let Some(color) = &border.color {
            edge = edge.color(color.as_str());
        }
        borders = borders.set(edge);
    }
    borders
}

fn width_of(width: Width) -> (usize, WidthType) {
    match width.unit {
        WidthUnit::Dxa => (width.value as usize, WidthType::Dxa),
        // Fiftieths of a percent.
        WidthUnit::Pct => (width.value as usize * 50, WidthType::Pct),
    }
}

fn to_png(data: &[u8]) -> Option<Vec<u8>> {
    let img = image::load_from_memory(data).ok()?;
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .ok()?;
    Some(buffer)
}

fn alt_text(run: Run, drawing: &model::Drawing) -> Run {
    if drawing.description.is_empty() {
        run.add_text("[image]")
    } else {
        run.add_text(format!("[{}]", drawing.description))
    }
}
