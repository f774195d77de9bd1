use super::*;

#[test]
fn test_block_formulas() {
    insta::assert_snapshot!(conv(r###"<p style="font-size: 16px; margin-top: 5px">x</p>"###), @r#"p{before=100} "x"{size=24}"#);
    insta::assert_snapshot!(conv(r###"<p style="font-size: 20px; margin-bottom: 10px">x</p>"###), @r#"p{after=200} "x"{size=30}"#);
    insta::assert_snapshot!(conv(r###"<p style="padding-left: 15px; text-indent: -10px">x</p>"###), @r#"p{left=225 first=-150} "x""#);
    insta::assert_snapshot!(conv(r###"<p style="line-height: 1.5">x</p>"###), @r#"p{line=360} "x""#);
}

#[test]
fn test_semantic_inline_tags() {
    insta::assert_snapshot!(conv(r###"<p><b>b</b><i>i</i><u>u</u><s>s</s></p>"###), @r#"p "b"{bold} "i"{italic} "u"{underline=single} "s"{strike}"#);
    insta::assert_snapshot!(conv(r###"<p>x<sup>2</sup><sub>i</sub></p>"###), @r#"p "x" "2"{sup} "i"{sub}"#);
    insta::assert_snapshot!(conv(r###"<p><mark>m</mark><code>c</code></p>"###), @r#"p "m"{shade=FFFF00} "c"{font="Courier New"}"#);
    insta::assert_snapshot!(conv(r###"<p><b style="font-weight: normal">x</b></p>"###), @r#"p "x"{!bold}"#);
}

#[test]
fn test_nested_span_colors() {
    insta::assert_snapshot!(conv(r###"<p><span style="color: red">a<span style="color: blue">b</span>c</span></p>"###), @r#"p "a"{color=FF0000} "b"{color=0000FF} "c"{color=FF0000}"#);
    insta::assert_snapshot!(conv(r###"<span style="color:red">Hello <span style="color:green">Green World</span></span>World"###), @r#"p "Hello "{color=FF0000} "Green World"{color=008000} "World""#);
}

#[test]
fn test_block_styles_cascade_into_runs() {
    insta::assert_snapshot!(conv(r###"<p style="color: red; text-align: center">a <span style="color: blue">b</span></p>"###), @r#"p{align=center} "a "{color=FF0000} "b"{color=0000FF}"#);
    insta::assert_snapshot!(conv(r###"<div style="color: #00ff00; margin-top: 10px"><p>x</p></div>"###), @r#"p "x"{color=00FF00}"#);
}

#[test]
fn test_unknown_properties_are_dropped() {
    insta::assert_snapshot!(conv(r###"<p style="float: left; color: nonsense; font-size: big">x</p>"###), @r#"p "x""#);
}

#[test]
fn test_background_becomes_paragraph_shading() {
    insta::assert_snapshot!(conv(r###"<p style="background-color: #eee">x</p>"###), @r#"p{shade=EEEEEE} "x""#);
}

#[test]
fn test_custom_mappings() {
    init_logger();
    let mut docweave = Docweave::default();
    docweave.add_mapping("fontSize", |_| {
        let mut fragment = StyleFragment::default();
        fragment.run.size = Some(99);
        Some(fragment)
    });
    docweave.add_mapping("xShout", |v| {
        let mut fragment = StyleFragment::default();
        fragment.run.bold = Some(v == "yes");
        Some(fragment)
    });

    let doc = docweave
        .to_document(&html(r#"<p><span style="font-size: 1px; x-shout: yes">x</span></p>"#))
        .unwrap();
    insta::assert_snapshot!(outline(&doc), @r#"p "x"{bold size=99}"#);
}
