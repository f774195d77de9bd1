//! Style fragments: the bounded set of word-processing formatting keys a
//! style property can map to.

use ecow::EcoString;

/// Field-wise merge where set fields of `other` replace those of `self`.
macro_rules! merge_fields {
    ($self:ident, $other:ident; $($opt:ident),* $(; $($nested:ident),*)?) => {
        $(
            if $other.$opt.is_some() {
                $self.$opt = $other.$opt;
            }
        )*
        $($(
            $self.$nested.merge($other.$nested);
        )*)?
    };
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Start aligned.
    Left,
    /// Centered.
    Center,
    /// End aligned.
    Right,
    /// Justified.
    Both,
}

impl Alignment {
    /// The justification value of the word-processing format.
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Both => "both",
        }
    }
}

/// Vertical run alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    /// Superscript.
    Superscript,
    /// Subscript.
    Subscript,
    /// Baseline.
    Baseline,
}

/// The unit of a [`Width`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthUnit {
    /// Twentieths of a point.
    Dxa,
    /// Percent of the available width.
    Pct,
}

/// A table or cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Width {
    /// The magnitude.
    pub value: u32,
    /// The unit.
    pub unit: WidthUnit,
}

/// A border line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Border {
    /// Line style, e.g. `single` or `dashed`.
    pub style: Option<EcoString>,
    /// Width in eighths of a point.
    pub size: Option<u32>,
    /// Color as six hex digits.
    pub color: Option<EcoString>,
    /// Distance from the text in points.
    pub space: Option<u32>,
}

impl Border {
    /// Merges `other` into `self`.
    pub fn merge(&mut self, other: Border) {
        merge_fields!(self, other; style, size, color, space);
    }
}

/// Merges two optional nested groups field-wise.
fn merge_border(slot: &mut Option<Border>, other: Option<Border>) {
    match (slot.as_mut(), other) {
        (Some(border), Some(other)) => border.merge(other),
        (None, Some(other)) => *slot = Some(other),
        (_, None) => {}
    }
}

/// Run-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunFormat {
    /// Bold weight.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,
    /// Underline style, e.g. `single`; `none` removes it.
    pub underline: Option<EcoString>,
    /// Strikethrough.
    pub strike: Option<bool>,
    /// Text color as six hex digits.
    pub color: Option<EcoString>,
    /// Font size in half-points.
    pub size: Option<u32>,
    /// Vertical alignment.
    pub vertical_align: Option<VerticalAlign>,
    /// Background shading as six hex digits.
    pub shading: Option<EcoString>,
    /// Character spacing in twentieths of a point.
    pub letter_spacing: Option<i32>,
    /// Font family.
    pub font: Option<EcoString>,
}

impl RunFormat {
    /// Merges `other` into `self`.
    pub fn merge(&mut self, other: RunFormat) {
        merge_fields!(self, other;
            bold, italic, underline, strike, color, size,
            vertical_align, shading, letter_spacing, font);
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Paragraph spacing in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spacing {
    /// Space before the paragraph.
    pub before: Option<u32>,
    /// Space after the paragraph.
    pub after: Option<u32>,
    /// Line spacing in 240ths of a line.
    pub line: Option<u32>,
}

impl Spacing {
    /// Merges `other` into `self`.
    pub fn merge(&mut self, other: Spacing) {
        merge_fields!(self, other; before, after, line);
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Paragraph indentation in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indent {
    /// Left indentation.
    pub left: Option<i32>,
    /// Right indentation.
    pub right: Option<i32>,
    /// First line indentation; negative values hang.
    pub first_line: Option<i32>,
}

impl Indent {
    /// Merges `other` into `self`.
    pub fn merge(&mut self, other: Indent) {
        merge_fields!(self, other; left, right, first_line);
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Paragraph-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphFormat {
    /// Justification.
    pub alignment: Option<Alignment>,
    /// Spacing before, after and between lines.
    pub spacing: Spacing,
    /// Indentation.
    pub indent: Indent,
    /// Box border around the paragraph.
    pub border: Option<Border>,
    /// Bottom border of the paragraph.
    pub border_bottom: Option<Border>,
    /// Background shading as six hex digits.
    pub shading: Option<EcoString>,
}

impl ParagraphFormat {
    /// Merges `other` into `self`.
    pub fn merge(&mut self, other: ParagraphFormat) {
        merge_fields!(self, other; alignment, shading; spacing, indent);
        merge_border(&mut self.border, other.border);
        merge_border(&mut self.border_bottom, other.border_bottom);
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The output of a style mapping.
///
/// `width`, `border` and `shading` are not tied to a single target; the
/// converter projects them onto runs, paragraphs, tables or cells depending
/// on where the style was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleFragment {
    /// Run-level keys.
    pub run: RunFormat,
    /// Paragraph-level keys.
    pub paragraph: ParagraphFormat,
    /// Width of a table or cell.
    pub width: Option<Width>,
    /// Border of a block.
    pub border: Option<Border>,
    /// Background color.
    pub shading: Option<EcoString>,
}

impl StyleFragment {
    /// Deep-merges `other` into `self`: nested groups merge field-wise and
    /// set scalars replace.
    pub fn merge(&mut self, other: StyleFragment) {
        merge_fields!(self, other; width, shading; run, paragraph);
        merge_border(&mut self.border, other.border);
    }

    /// Returns `self` deep-merged with `other`.
    pub fn merged(mut self, other: StyleFragment) -> Self {
        self.merge(other);
        self
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
