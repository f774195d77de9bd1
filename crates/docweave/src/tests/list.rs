use super::*;
use crate::det::ListType;

#[test]
fn test_nested_lists() {
    init_logger();
    let doc = Docweave::default()
        .to_document(&html(
            "<ul><li>a<ul><li>b</li></ul>c</li></ul><ol><li>d</li></ol>",
        ))
        .unwrap();
    insta::assert_snapshot!(outline(&doc), @r#"
    p[ListParagraph] #1.0 "a"
    p[ListParagraph] #1.1 "b"
    p[ListParagraph] #1.0 "c"
    p[ListParagraph] #2.0 "d"
    "#);

    let kinds: Vec<_> = doc
        .numbering
        .iter()
        .map(|def| (def.num_id, def.list_type))
        .collect();
    assert_eq!(kinds, [(1, ListType::Unordered), (2, ListType::Ordered)]);
}

#[test]
fn test_sibling_lists_restart_numbering() {
    insta::assert_snapshot!(conv(r###"<ol><li>a</li></ol><p>between</p><ol><li>b</li></ol>"###), @r#"
    p[ListParagraph] #1.0 "a"
    p "between"
    p[ListParagraph] #2.0 "b"
    "#);
}

#[test]
fn test_list_items() {
    insta::assert_snapshot!(conv(r###"<ul><li></li></ul>"###), @"p[ListParagraph] #1.0");
    insta::assert_snapshot!(conv(r###"<ol><li style="color: red">a <i>b</i></li></ol>"###), @r#"p[ListParagraph] #1.0 "a "{color=FF0000} "b"{italic color=FF0000}"#);
    insta::assert_snapshot!(conv(r###"<ul>x<li>a</li></ul>"###), @r#"
    p[ListParagraph] #1.0 "x"
    p[ListParagraph] #1.0 "a"
    "#);
}

#[test]
fn test_levels_are_capped() {
    let mut list = Element::list(ListType::Ordered, 9)
        .with_content(vec![Element::list_item(9).with_text("x")]);
    for level in (0..9).rev() {
        list = Element::list(ListType::Ordered, level).with_content(vec![
            Element::list_item(level).with_content(vec![Element::text("x"), list]),
        ]);
    }

    let mapper = StyleMapper::default();
    let doc = DocxConverter::offline(&mapper).convert(&[list]).unwrap();
    let levels: Vec<_> = doc
        .paragraphs()
        .map(|para| para.numbering.map(|n| (n.num_id, n.level)))
        .collect();
    let expected: Vec<Option<(u32, u32)>> = [0, 1, 2, 3, 4, 5, 6, 7, 8, 8]
        .into_iter()
        .map(|level| Some((1, level)))
        .collect();
    assert_eq!(levels, expected);
    assert_eq!(doc.numbering.len(), 1);
}

#[test]
fn test_lists_in_tables_start_their_own_numbering() {
    insta::assert_snapshot!(conv(r###"<ul><li>a<table><tr><td><ol><li>b</li></ol></td></tr></table></li></ul>"###), @r#"
    p[ListParagraph] #1.0 "a"
    table
      row
        cell
          p[ListParagraph] #2.0 "b"
    "#);
}

#[test]
fn test_blocks_in_list_items_stay_separate() {
    insta::assert_snapshot!(conv(r###"<ul><li><div>first</div><div>second</div></li><li><h3>Title</h3><p>body</p></li></ul>"###), @r#"
    p[ListParagraph] #1.0 "first"
    p[ListParagraph] #1.0 "second"
    p[Heading3] #1.0 "Title"
    p[ListParagraph] #1.0 "body"
    "#);
    insta::assert_snapshot!(conv(r###"<ol><li>lead <b>x</b><p style="text-align: right">para</p>tail</li></ol>"###), @r#"
    p[ListParagraph] #1.0 "lead " "x"{bold}
    p[ListParagraph] #1.0{align=right} "para"
    p[ListParagraph] #1.0 "tail"
    "#);
}
