use docweave::det::ElementKind;
use docweave::docx::{BodyElement, VerticalMerge};
use docweave::{Docweave, Element, ErrorKind, TagContext};

const ARTICLE: &str = r#"<!doctype html>
<html>
  <head><title>ignored</title><style>p { color: red }</style></head>
  <body>
    <h1>Release notes</h1>
    <p style="text-align: justify">This release adds <b>tables</b> and <a href="https://example.com/docs">docs</a>.</p>
    <ul>
      <li>first</li>
      <li>second
        <ol><li>nested</li></ol>
      </li>
    </ul>
    <table>
      <thead><tr><th>Name</th><th>Value</th></tr></thead>
      <tbody>
        <tr><td rowspan="2">merged</td><td>1</td></tr>
        <tr><td>2</td></tr>
      </tbody>
    </table>
    <hr>
    <aside>Side note</aside>
  </body>
</html>"#;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn article_to_json() {
    init_logger();
    let bytes = Docweave::default().convert_html(ARTICLE, "json").unwrap();
    let elements: Vec<Element> = serde_json::from_slice(&bytes).unwrap();

    let kinds: Vec<_> = elements
        .iter()
        .map(|el| match &el.kind {
            ElementKind::Heading { .. } => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::List { .. } => "list",
            ElementKind::Table => "table",
            ElementKind::Line => "line",
            ElementKind::Custom { .. } => "custom",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        ["heading", "paragraph", "list", "table", "line", "custom"]
    );
}

#[test]
fn article_to_document() {
    init_logger();
    let doc = Docweave::default()
        .to_document(&docweave::html::parse_html(ARTICLE))
        .unwrap();

    let texts: Vec<_> = doc.paragraphs().map(|para| para.text()).collect();
    assert_eq!(texts[0], "Release notes");
    assert_eq!(texts[1], "This release adds tables and docs.");
    assert!(texts.iter().any(|text| text.trim() == "nested"));
    assert_eq!(texts.last().map(|text| text.as_str()), Some("Side note"));

    let table = doc
        .body
        .iter()
        .find_map(|block| match block {
            BodyElement::Table(table) => Some(table),
            BodyElement::Paragraph(_) => None,
        })
        .unwrap();
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[2].cells[0].vertical_merge, Some(VerticalMerge::Continue));
    assert_eq!(doc.numbering.len(), 1);
    assert_eq!(doc.relationships.len(), 1);
}

#[test]
fn article_to_docx() {
    init_logger();
    let mut docweave = Docweave::default();
    docweave.register_tag_handler("aside", |cx: &TagContext<'_>| {
        Element::paragraph()
            .with_style("fontStyle", "italic")
            .with_text(cx.element.text_content())
    });

    let bytes = docweave.convert_html(ARTICLE, "docx").unwrap();
    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[test]
fn unknown_format() {
    let err = Docweave::default()
        .convert_html(ARTICLE, "odt")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
}
