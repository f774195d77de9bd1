use super::*;

#[test]
fn test_text_blocks() {
    insta::assert_snapshot!(det(r###"<p>just text</p>"###), @r#"[{"type":"paragraph","text":"just text"}]"#);
    insta::assert_snapshot!(det(r###"<h2 style="color: red">T</h2>"###), @r#"[{"type":"heading","level":2,"styles":{"color":"red"},"text":"T"}]"#);
    insta::assert_snapshot!(det(r###"<p>Hello <b>world</b></p>"###), @r#"[{"type":"paragraph","content":[{"type":"text","text":"Hello "},{"type":"text","styles":{"fontWeight":"bold"},"text":"world"}]}]"#);
}

#[test]
fn test_implicit_paragraphs() {
    insta::assert_snapshot!(det(r###"just text"###), @r#"[{"type":"paragraph","text":"just text"}]"#);
    insta::assert_snapshot!(det(r###"hello <b>x</b>"###), @r#"[{"type":"paragraph","content":[{"type":"text","text":"hello "},{"type":"text","styles":{"fontWeight":"bold"},"text":"x"}]}]"#);
    insta::assert_snapshot!(det(r###"<img src="x.png">"###), @r#"[{"type":"image","attributes":{"src":"x.png"}}]"#);
}

#[test]
fn test_blank_text_between_blocks() {
    insta::assert_snapshot!(det("<p>a</p>\n    <p>b</p>"), @r#"[{"type":"paragraph","text":"a"},{"type":"paragraph","text":"b"}]"#);
}

#[test]
fn test_inline_leaves() {
    insta::assert_snapshot!(det(r###"<p>a<br>b</p>"###), @r#"[{"type":"paragraph","content":[{"type":"text","text":"a"},{"type":"text","metadata":{"break":1}},{"type":"text","text":"b"}]}]"#);
    insta::assert_snapshot!(det(r###"<p><img src="x.png" alt="A"></p>"###), @r#"[{"type":"paragraph","content":[{"type":"image","attributes":{"alt":"A","src":"x.png"}}]}]"#);
    insta::assert_snapshot!(det(r###"<p><a href="u" style="color: green">l</a></p>"###), @r#"[{"type":"paragraph","content":[{"type":"text","styles":{"color":"green"},"attributes":{"href":"u"},"text":"l"}]}]"#);
}

#[test]
fn test_nested_inline_styles() {
    let json = det(
        r###"<p><span style="color: red">a<span style="color: blue">b</span>c</span></p>"###,
    );
    insta::assert_snapshot!(json, @r#"[{"type":"paragraph","content":[{"type":"text","styles":{"color":"red"},"text":"a"},{"type":"text","styles":{"color":"blue"},"text":"b"},{"type":"text","styles":{"color":"red"},"text":"c"}]}]"#);
}

#[test]
fn test_nested_lists() {
    insta::assert_snapshot!(det(r###"<ul><li>a <b>b</b><ol><li>c</li></ol></li></ul>"###), @r#"[{"type":"list","listType":"unordered","level":0,"content":[{"type":"list-item","level":0,"content":[{"type":"text","text":"a "},{"type":"text","styles":{"fontWeight":"bold"},"text":"b"},{"type":"list","listType":"ordered","level":1,"content":[{"type":"list-item","level":1,"text":"c"}]}]}]}]"#);
}

#[test]
fn test_leaves_carry_no_level() {
    init_logger();
    let elements =
        Docweave::default().build_tree(&html("<ul><li>a<ul><li><i>b</i><br></li></ul></li></ul>"));

    fn walk(el: &Element, leaves: &mut usize) {
        if el.is_inline() {
            *leaves += 1;
            let json = serde_json::to_value(el).unwrap();
            assert!(json.get("level").is_none(), "{json}");
            assert!(el.attr("level").is_none());
        }
        for child in el.children() {
            walk(child, leaves);
        }
    }

    let mut leaves = 0;
    for el in &elements {
        walk(el, &mut leaves);
    }
    assert_eq!(leaves, 3);
}

#[test]
fn test_tables() {
    insta::assert_snapshot!(det(r###"<table><tr><th>H</th><td colspan="2" width="50%">x</td></tr></table>"###), @r#"[{"type":"table","content":[{"type":"table-row","content":[{"type":"table-cell","colspan":1,"rowspan":1,"styles":{"textAlign":"center"},"text":"H"},{"type":"table-cell","colspan":2,"rowspan":1,"styles":{"width":"50%"},"attributes":{"colspan":"2","width":"50%"},"text":"x"}]}]}]"#);
}

#[test]
fn test_header_alignment_yields_to_explicit_styles() {
    insta::assert_snapshot!(det(r###"<table><tr><th style="text-align: left">H</th></tr></table>"###), @r#"[{"type":"table","content":[{"type":"table-row","content":[{"type":"table-cell","colspan":1,"rowspan":1,"styles":{"textAlign":"left"},"text":"H"}]}]}]"#);
}

#[test]
fn test_fallbacks() {
    insta::assert_snapshot!(det(r###"<hr>"###), @r#"[{"type":"line"}]"#);
    insta::assert_snapshot!(det(r###"<div class="x">a<p>b</p></div>"###), @r#"[{"type":"custom","tag":"div","attributes":{"class":"x"},"content":[{"type":"paragraph","text":"a"},{"type":"paragraph","text":"b"}]}]"#);
    insta::assert_snapshot!(det(r###"<script>x</script><p>y</p>"###), @r#"[{"type":"paragraph","text":"y"}]"#);
}

#[test]
fn test_tag_handlers() {
    let mut docweave = Docweave::default();
    docweave.register_tag_handler("NOTE", |cx: &TagContext<'_>| {
        Element::paragraph()
            .with_styles(cx.styles.clone())
            .with_text(format!("NOTE: {}", cx.element.text_content()))
    });

    let elements = docweave.build_tree(&html(r#"<note style="color: red">hi</note>"#));
    let json = serde_json::to_string(&elements).unwrap();
    insta::assert_snapshot!(json, @r#"[{"type":"paragraph","styles":{"color":"red"},"text":"NOTE: hi"}]"#);
}

#[test]
fn test_inline_tag_handlers() {
    let mut docweave = Docweave::default();
    docweave.register_tag_handler("kbd", |cx: &TagContext<'_>| {
        Element::text(format!("[{}]", cx.element.text_content()))
    });

    let elements = docweave.build_tree(&html("<p>press <kbd>K</kbd></p>"));
    let json = serde_json::to_string(&elements).unwrap();
    insta::assert_snapshot!(json, @r#"[{"type":"paragraph","content":[{"type":"text","text":"press "},{"type":"text","text":"[K]"}]}]"#);
}

#[test]
fn test_blocks_in_list_items() {
    insta::assert_snapshot!(det(r###"<ul><li><div>first</div><p>second</p>tail</li></ul>"###), @r#"[{"type":"list","listType":"unordered","level":0,"content":[{"type":"list-item","level":0,"content":[{"type":"custom","tag":"div","text":"first"},{"type":"paragraph","text":"second"},{"type":"text","text":"tail"}]}]}]"#);
}
