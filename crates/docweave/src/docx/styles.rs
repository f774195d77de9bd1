//! The default style sheet of packaged documents.

use docx_rs::*;

/// Creates a heading style with the specified parameters
fn heading_style(level: usize, size: usize) -> Style {
    Style::new(format!("Heading{level}"), StyleType::Paragraph)
        .name(format!("Heading {level}"))
        .size(size)
        .bold()
}

/// Adds the styles referenced by the structural tree.
pub(super) fn initialize_styles(docx: Docx) -> Docx {
    let mut docx = docx;
    for (level, size) in [(1, 32), (2, 28), (3, 26), (4, 24), (5, 22), (6, 20)] {
        docx = docx.add_style(heading_style(level, size));
    }

    let list_paragraph = Style::new("ListParagraph", StyleType::Paragraph)
        .name("List Paragraph")
        .indent(Some(720), None, None, None);

    let hyperlink = Style::new("Hyperlink", StyleType::Character)
        .name("Hyperlink")
        .color("0000FF")
        .underline("single");

    let horizontal_line = Style::new("HorizontalLine", StyleType::Paragraph)
        .name("Horizontal Line")
        .size(2);

    docx.add_style(list_paragraph)
        .add_style(hyperlink)
        .add_style(horizontal_line)
}
