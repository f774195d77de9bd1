use super::*;
use crate::det::ListType;
use crate::docx::{Relationship, RelationshipTarget};
use crate::fetch::FetchedResource;

#[test]
fn test_headings() {
    insta::assert_snapshot!(conv(r###"<h1>Title</h1><p>Hello <b>world</b></p>"###), @r#"
    p[Heading1] "Title"
    p "Hello " "world"{bold}
    "#);
    insta::assert_snapshot!(conv(r###"<h3 style="text-align: right">T</h3>"###), @r#"p[Heading3]{align=right} "T""#);
}

#[test]
fn test_heading_levels_default_to_one() {
    let elements = [
        Element::heading(None).with_text("absent"),
        Element::heading(Some(0)).with_text("zero"),
        Element::heading(Some(7)).with_text("seven"),
        Element::heading(Some(6)).with_text("six"),
    ];
    insta::assert_snapshot!(conv_det(&elements), @r#"
    p[Heading1] "absent"
    p[Heading1] "zero"
    p[Heading1] "seven"
    p[Heading6] "six"
    "#);
}

#[test]
fn test_line_breaks() {
    insta::assert_snapshot!(conv(r###"<p>a<br>b</p>"###), @r#"p "a" <br> "b""#);
}

#[test]
fn test_horizontal_rules() {
    insta::assert_snapshot!(conv(r###"<p>a</p><hr><p>b</p>"###), @r#"
    p "a"
    p[HorizontalLine]{bottom=single/6/808080/1}
    p "b"
    "#);
    insta::assert_snapshot!(conv(r###"<hr style="border-bottom: 2px dashed red; margin-top: 4px">"###), @"p[HorizontalLine]{before=80 bottom=dashed/16/FF0000/1}");
}

#[test]
fn test_hyperlinks() {
    init_logger();
    let doc = Docweave::default()
        .to_document(&html(
            r#"<p><a href="https://example.com">x</a> and <a href="https://example.org" style="color: green">y</a></p>"#,
        ))
        .unwrap();
    insta::assert_snapshot!(outline(&doc), @r#"p <rId1 "x"{underline=single color=0000FF}> " and " <rId2 "y"{color=008000}>"#);
    assert_eq!(
        doc.relationship("rId2").map(|rel| &rel.target),
        Some(&RelationshipTarget::Hyperlink {
            url: "https://example.org".into()
        })
    );
}

#[test]
fn test_unsafe_links_are_plain_runs() {
    insta::assert_snapshot!(conv(r###"<p><a href="javascript:alert(1)">x</a></p>"###), @r#"p "x""#);
    insta::assert_snapshot!(conv(r###"<p><a href=" VBScript:run">x</a></p>"###), @r#"p "x""#);

    let docweave = Docweave::default().with_options(ConvertOptions {
        sanitize_links: false,
        ..Default::default()
    });
    let doc = docweave
        .to_document(&html(r#"<p><a href="javascript:alert(1)">x</a></p>"#))
        .unwrap();
    assert_eq!(doc.relationships.len(), 1);
}

#[test]
fn test_data_url_images() {
    init_logger();
    let input = format!(
        r#"<p><img src="data:image/png;base64,{PIXEL_PNG}" width="10" height="20" alt="dot"></p>"#
    );
    let doc = Docweave::default().to_document(&html(&input)).unwrap();
    insta::assert_snapshot!(outline(&doc), @"p <img rId1 95250x190500>");

    let Relationship { id, target } = &doc.relationships[0];
    assert_eq!(id, "rId1");
    let RelationshipTarget::Image {
        part_name,
        content_type,
        data,
    } = target
    else {
        panic!("expected an image relationship, got {target:?}");
    };
    assert_eq!(part_name, "media/image1.png");
    assert_eq!(content_type, "image/png");
    assert_eq!(&data[1..4], b"PNG");
}

#[test]
fn test_image_size_is_clamped() {
    let input = format!(
        r#"<p><img src="data:image/png;base64,{PIXEL_PNG}" style="width: 1000px; height: 500px"></p>"#
    );
    let doc = Docweave::default().to_document(&html(&input)).unwrap();
    insta::assert_snapshot!(outline(&doc), @"p <img rId1 5486400x2743200>");
}

#[test]
fn test_image_without_source() {
    let err = Docweave::default()
        .to_document(&html(r#"<p>before <img alt="nothing"></p>"#))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("missing source"), "{err}");

    insta::assert_snapshot!(conv(r###"<p><img src=""></p>"###), @"failed to convert: invalid input: image element is missing source");
    insta::assert_snapshot!(conv(r###"<p>a</p><img src="  ">"###), @"failed to convert: invalid input: image element is missing source");
}

#[test]
fn test_remote_images_use_the_fetcher() {
    init_logger();
    let png = {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD
            .decode(PIXEL_PNG)
            .unwrap()
    };
    let docweave = Docweave::default().with_fetcher(move |url: &str| -> Result<FetchedResource> {
        assert_eq!(url, "https://example.com/a.png");
        Ok(FetchedResource {
            data: png.clone(),
            content_type: None,
        })
    });

    let doc = docweave
        .to_document(&html(
            r#"<p><img src="https://example.com/a.png" width="2" height="2"></p>"#,
        ))
        .unwrap();
    insta::assert_snapshot!(outline(&doc), @"p <img rId1 19050x19050>");
    // The type is sniffed from the bytes.
    assert!(matches!(
        &doc.relationships[0].target,
        RelationshipTarget::Image { content_type, .. } if content_type == "image/png"
    ));
}

#[test]
fn test_fetch_failures_abort_the_call() {
    let err = Docweave::default()
        .to_document(&html(r#"<p><img src="https://example.com/a.png"></p>"#))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_custom_elements() {
    insta::assert_snapshot!(conv(r###"<div>a<p>b</p><section>c</section></div>"###), @r#"
    p "a"
    p "b"
    p "c"
    "#);
}

#[test]
fn test_blocks_inside_paragraphs_split_them() {
    let para = Element::paragraph()
        .with_style("textAlign", "center")
        .with_content(vec![
            Element::text("before"),
            Element::list(ListType::Unordered, 0)
                .with_content(vec![Element::list_item(0).with_text("item")]),
            Element::text("after"),
        ]);
    insta::assert_snapshot!(conv_det(&[para]), @r#"
    p{align=center} "before"
    p[ListParagraph] #1.0{align=center} "item"
    p{align=center} "after"
    "#);
}

#[test]
fn test_stray_structural_elements() {
    let elements = [
        Element::list_item(0).with_text("orphan item"),
        Element::table_cell(1, 1).with_content(vec![Element::text("orphan"), Element::text(" cell")]),
        Element::text("bare"),
    ];
    insta::assert_snapshot!(conv_det(&elements), @r#"
    p "orphan item"
    p "orphan" " cell"
    p "bare"
    "#);
}

#[test]
fn test_empty_input() {
    insta::assert_snapshot!(conv(""), @"");
    let doc = Docweave::default().to_document(&[]).unwrap();
    assert_eq!(doc, Document::default());
}
