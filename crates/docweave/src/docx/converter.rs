//! The structural converter: DET to word-processing structural tree.

use ecow::{EcoString, eco_format};
use log::{debug, warn};

use crate::det::{Body, Element, ElementKind, StyleMap};
use crate::fetch::{NoFetch, ResourceFetcher};
use crate::style::{Border, RunFormat, StyleFragment, StyleMapper};
use crate::{ConvertOptions, Result};

use super::context::ConvertContext;
use super::list::ListScope;
use super::model::{BodyElement, Document, Hyperlink, Paragraph, ParagraphChild, Run, RunContent};

/// Style properties that flow from a block into the blocks and runs nested
/// in it. Everything else stays on the block that declares it.
const CASCADING_KEYS: &[&str] = &[
    "color",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontWeight",
    "letterSpacing",
    "textAlign",
    "textDecoration",
    "textDecorationLine",
    "verticalAlign",
];

/// Merges the cascading part of `own` over the inherited styles.
pub(super) fn cascaded(inherited: &StyleMap, own: &StyleMap) -> StyleMap {
    let mut styles = inherited.clone();
    for (key, value) in own {
        if CASCADING_KEYS.contains(&key.as_str()) {
            styles.insert(key.clone(), value.clone());
        }
    }
    styles
}

/// Converts a DET into a [`Document`].
pub struct DocxConverter<'a> {
    pub(super) mapper: &'a StyleMapper,
    pub(super) fetcher: &'a dyn ResourceFetcher,
    pub(super) options: ConvertOptions,
}

impl<'a> DocxConverter<'a> {
    /// Creates a converter using the given style mapper and fetcher.
    pub fn new(mapper: &'a StyleMapper, fetcher: &'a dyn ResourceFetcher) -> Self {
        Self {
            mapper,
            fetcher,
            options: ConvertOptions::default(),
        }
    }

    /// Creates a converter that cannot fetch remote resources.
    pub fn offline(mapper: &'a StyleMapper) -> Self {
        Self::new(mapper, &NoFetch)
    }

    /// Sets the conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Converts top-level DET elements.
    ///
    /// Each call starts from fresh numbering and relationship counters. Any
    /// failure aborts the whole call.
    pub fn convert(&self, elements: &[Element]) -> Result<Document> {
        let mut cx = ConvertContext::new();
        let mut body = Vec::new();
        self.convert_blocks(elements, &StyleMap::new(), None, &mut cx, &mut body)?;
        Ok(Document {
            body,
            numbering: cx.numbering,
            relationships: cx.relationships,
        })
    }

    /// Converts a sequence of siblings as a generic container: consecutive
    /// inline leaves are grouped into one paragraph.
    pub(super) fn convert_blocks(
        &self,
        elements: &[Element],
        cascade: &StyleMap,
        scope: Option<ListScope>,
        cx: &mut ConvertContext,
        out: &mut Vec<BodyElement>,
    ) -> Result<()> {
        let template = self.inherited_paragraph(cascade);
        let mut current = template.clone();
        for el in elements {
            if el.is_inline() {
                self.push_leaf(&mut current, el, cascade, cx)?;
                continue;
            }
            flush(&mut current, &template, out);
            self.convert_block(el, cascade, scope, cx, out)?;
        }
        flush(&mut current, &template, out);
        Ok(())
    }

    pub(super) fn convert_block(
        &self,
        el: &Element,
        cascade: &StyleMap,
        scope: Option<ListScope>,
        cx: &mut ConvertContext,
        out: &mut Vec<BodyElement>,
    ) -> Result<()> {
        match &el.kind {
            ElementKind::Paragraph => self.convert_paragraph(el, None, cascade, scope, cx, out),
            ElementKind::Heading { level } => {
                let style_id = heading_style_id(*level);
                self.convert_paragraph(el, Some(style_id), cascade, scope, cx, out)
            }
            ElementKind::Text | ElementKind::Image => {
                let mut para = self.inherited_paragraph(cascade);
                self.push_leaf(&mut para, el, cascade, cx)?;
                out.push(BodyElement::Paragraph(para));
                Ok(())
            }
            ElementKind::List { list_type, .. } => {
                self.convert_list(el, *list_type, cascade, scope, cx, out)
            }
            ElementKind::Table => {
                let table = self.convert_table(el, cascade, cx)?;
                out.push(BodyElement::Table(table));
                Ok(())
            }
            ElementKind::Line => {
                out.push(BodyElement::Paragraph(self.convert_line(el, cascade)));
                Ok(())
            }
            ElementKind::ListItem { .. } | ElementKind::TableRow | ElementKind::TableCell { .. } => {
                debug!("docweave: {:?} outside of its parent, converting as a container", el.kind);
                self.convert_container(el, cascade, scope, cx, out)
            }
            ElementKind::Custom { tag } => {
                debug!("docweave: converting custom element <{tag}> as a container");
                self.convert_container(el, cascade, scope, cx, out)
            }
        }
    }

    fn convert_paragraph(
        &self,
        el: &Element,
        style_id: Option<EcoString>,
        cascade: &StyleMap,
        scope: Option<ListScope>,
        cx: &mut ConvertContext,
        out: &mut Vec<BodyElement>,
    ) -> Result<()> {
        let cascade = cascaded(cascade, &el.styles);
        let mut template = self.block_paragraph(el, &cascade);
        template.style_id = style_id;
        self.convert_flow(el, template, &cascade, scope, cx, out)
    }

    /// Fallback for unknown elements: text becomes a plain paragraph, content
    /// is converted as a generic container.
    fn convert_container(
        &self,
        el: &Element,
        cascade: &StyleMap,
        scope: Option<ListScope>,
        cx: &mut ConvertContext,
        out: &mut Vec<BodyElement>,
    ) -> Result<()> {
        let cascade = cascaded(cascade, &el.styles);
        match &el.body {
            Body::Empty => Ok(()),
            Body::Text(text) => {
                let para = self
                    .block_paragraph(el, &cascade)
                    .add_run(self.text_run(text, &cascade));
                out.push(BodyElement::Paragraph(para));
                Ok(())
            }
            Body::Content(children) => self.convert_blocks(children, &cascade, scope, cx, out),
        }
    }

    /// Converts the body of a paragraph-like element using `template` for
    /// every emitted paragraph.
    ///
    /// A block met among the children closes the current paragraph and is
    /// converted as a sibling; trailing leaves open a new paragraph with the
    /// same template. At least one paragraph is emitted.
    fn convert_flow(
        &self,
        el: &Element,
        template: Paragraph,
        cascade: &StyleMap,
        scope: Option<ListScope>,
        cx: &mut ConvertContext,
        out: &mut Vec<BodyElement>,
    ) -> Result<()> {
        match &el.body {
            Body::Empty => out.push(BodyElement::Paragraph(template)),
            Body::Text(text) => {
                let para = template.add_run(self.text_run(text, cascade));
                out.push(BodyElement::Paragraph(para));
            }
            Body::Content(children) => {
                let start = out.len();
                let mut current = template.clone();
                for child in children {
                    if child.is_inline() {
                        self.push_leaf(&mut current, child, cascade, cx)?;
                        continue;
                    }
                    flush(&mut current, &template, out);
                    self.convert_block(child, cascade, scope, cx, out)?;
                }
                flush(&mut current, &template, out);
                if out.len() == start {
                    out.push(BodyElement::Paragraph(template));
                }
            }
        }
        Ok(())
    }

    /// A horizontal rule: an empty paragraph with a bottom border.
    fn convert_line(&self, el: &Element, cascade: &StyleMap) -> Paragraph {
        let cascade = cascaded(cascade, &el.styles);
        let mut para = self.block_paragraph(el, &cascade);
        let mut border = Border {
            style: Some("single".into()),
            size: Some(6),
            color: Some("808080".into()),
            space: Some(1),
        };
        if let Some(explicit) = para.format.border_bottom.take() {
            border.merge(explicit);
        }
        para.format.border_bottom = Some(border);
        para.style_id = Some("HorizontalLine".into());
        para
    }

    /// Appends the run for an inline leaf.
    pub(super) fn push_leaf(
        &self,
        para: &mut Paragraph,
        leaf: &Element,
        cascade: &StyleMap,
        cx: &mut ConvertContext,
    ) -> Result<()> {
        if matches!(leaf.kind, ElementKind::Image) {
            let run = self.convert_image(leaf, cx)?;
            para.children.push(ParagraphChild::Run(run));
            return Ok(());
        }

        let mut effective = cascade.clone();
        effective.extend(leaf.styles.clone());
        let fragment = self.mapper.map_styles(&effective);

        if leaf.is_break() {
            let run = Run::line_break().with_format(run_format(fragment));
            para.children.push(ParagraphChild::Run(run));
            return Ok(());
        }

        let text = leaf.text_payload().unwrap_or_default();
        let mut run = Run::text(text).with_format(run_format(fragment));

        match leaf.attr("href").map(str::trim) {
            Some(href) if self.is_safe_link(href) => {
                if run.format.color.is_none() {
                    run.format.color = Some("0000FF".into());
                    run.format.underline.get_or_insert_with(|| "single".into());
                }
                let rel_id = cx.alloc_hyperlink(href);
                para.children.push(ParagraphChild::Hyperlink(Hyperlink {
                    rel_id,
                    runs: vec![run],
                }));
            }
            _ => para.children.push(ParagraphChild::Run(run)),
        }
        Ok(())
    }

    fn is_safe_link(&self, href: &str) -> bool {
        if href.is_empty() {
            return false;
        }
        if !self.options.sanitize_links {
            return true;
        }
        let scheme = href
            .split_once(':')
            .map(|(scheme, _)| scheme.trim().to_ascii_lowercase());
        match scheme.as_deref() {
            Some("javascript" | "vbscript") => {
                warn!("docweave: dropping unsafe link target {href:?}");
                false
            }
            _ => true,
        }
    }

    pub(super) fn text_run(&self, text: &str, styles: &StyleMap) -> Run {
        Run::text(text).with_format(run_format(self.mapper.map_styles(styles)))
    }

    /// An empty paragraph carrying only the inherited alignment.
    pub(super) fn inherited_paragraph(&self, cascade: &StyleMap) -> Paragraph {
        Paragraph {
            format: self.mapper.map_styles(cascade).paragraph,
            ..Default::default()
        }
    }

    /// An empty paragraph with the formatting of a block element: its own
    /// structural styles plus the cascaded ones.
    pub(super) fn block_paragraph(&self, el: &Element, cascade: &StyleMap) -> Paragraph {
        let mut effective = cascade.clone();
        effective.extend(el.styles.clone());
        let fragment = self.mapper.map_styles(&effective);

        let mut format = fragment.paragraph;
        if format.border.is_none() {
            format.border = fragment.border;
        }
        if format.shading.is_none() {
            format.shading = fragment.shading;
        }
        Paragraph {
            format,
            ..Default::default()
        }
    }
}

/// Projects a fragment onto run formatting; a background becomes run
/// shading.
fn run_format(fragment: StyleFragment) -> RunFormat {
    let mut format = fragment.run;
    if format.shading.is_none() {
        format.shading = fragment.shading;
    }
    format
}

/// `Heading1`-`Heading6`; absent or out of range levels resolve to 1.
pub(super) fn heading_style_id(level: Option<u32>) -> EcoString {
    let level = level.filter(|l| (1..=6).contains(l)).unwrap_or(1);
    eco_format!("Heading{level}")
}

/// Emits the pending paragraph unless it holds nothing but whitespace.
pub(super) fn flush(current: &mut Paragraph, template: &Paragraph, out: &mut Vec<BodyElement>) {
    let para = std::mem::replace(current, template.clone());
    if !is_blank(&para) {
        out.push(BodyElement::Paragraph(para));
    }
}

fn is_blank(para: &Paragraph) -> bool {
    para.children.iter().all(|child| match child {
        ParagraphChild::Run(Run {
            content: RunContent::Text(text),
            ..
        }) => text.trim().is_empty(),
        _ => false,
    })
}
