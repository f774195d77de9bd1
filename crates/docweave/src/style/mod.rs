//! The style mapper: translates camelCase CSS properties into
//! [`StyleFragment`]s of word-processing formatting.

mod fragment;
mod units;

pub use fragment::*;
pub use units::{Length, Unit, parse_color, parse_length, parse_px};

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ecow::EcoString;

use crate::det::StyleMap;
use units::{round_i32, round_u32};

/// A property handler. Returns `None` when the value cannot be mapped.
pub type StyleMapping = Arc<dyn Fn(&str) -> Option<StyleFragment> + Send + Sync>;

/// A registry of property handlers.
#[derive(Clone)]
pub struct StyleMapper {
    mappings: HashMap<EcoString, StyleMapping>,
}

impl Default for StyleMapper {
    fn default() -> Self {
        let mut mapper = Self::empty();
        mapper.install_builtin();
        mapper
    }
}

impl fmt::Debug for StyleMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.mappings.keys().collect();
        keys.sort();
        f.debug_struct("StyleMapper").field("mappings", &keys).finish()
    }
}

impl StyleMapper {
    /// Creates a mapper without any handler.
    pub fn empty() -> Self {
        Self {
            mappings: HashMap::new(),
        }
    }

    /// Registers or overrides the handler of a property.
    pub fn add_mapping<F>(&mut self, property: impl Into<EcoString>, mapping: F)
    where
        F: Fn(&str) -> Option<StyleFragment> + Send + Sync + 'static,
    {
        self.mappings.insert(property.into(), Arc::new(mapping));
    }

    /// Whether a handler is registered for the property.
    pub fn has_mapping(&self, property: &str) -> bool {
        self.mappings.contains_key(property)
    }

    /// Maps a single property.
    pub fn map_style(&self, property: &str, value: &str) -> Option<StyleFragment> {
        let mapping = self.mappings.get(property)?;
        mapping(value.trim())
    }

    /// Maps every recognized property and deep-merges the fragments.
    ///
    /// Properties are applied in sorted order, so shorthands such as `border`
    /// come before their longhands. Unrecognized properties are dropped.
    pub fn map_styles(&self, styles: &StyleMap) -> StyleFragment {
        let mut fragment = StyleFragment::default();
        for (property, value) in styles {
            if let Some(mapped) = self.map_style(property, value) {
                fragment.merge(mapped);
            }
        }
        fragment
    }

    fn install_builtin(&mut self) {
        self.add_mapping("fontSize", |v| {
            let size = font_size(v)?;
            Some(run(|r| r.size = Some(size)))
        });
        self.add_mapping("color", |v| {
            let color = parse_color(v)?;
            Some(run(|r| r.color = Some(color)))
        });
        self.add_mapping("backgroundColor", |v| {
            Some(StyleFragment {
                shading: Some(parse_color(v)?),
                ..Default::default()
            })
        });
        self.add_mapping("background", |v| {
            let color = v.split_whitespace().find_map(parse_color)?;
            Some(StyleFragment {
                shading: Some(color),
                ..Default::default()
            })
        });
        self.add_mapping("fontWeight", |v| {
            let bold = match v.to_ascii_lowercase().as_str() {
                "bold" | "bolder" => true,
                "normal" | "lighter" => false,
                n => n.parse::<u32>().ok()? >= 600,
            };
            Some(run(|r| r.bold = Some(bold)))
        });
        self.add_mapping("fontStyle", |v| {
            let italic = matches!(v.to_ascii_lowercase().as_str(), "italic" | "oblique");
            Some(run(|r| r.italic = Some(italic)))
        });
        self.add_mapping("textDecoration", text_decoration);
        self.add_mapping("textDecorationLine", text_decoration);
        self.add_mapping("verticalAlign", |v| {
            let align = match v.to_ascii_lowercase().as_str() {
                "super" => VerticalAlign::Superscript,
                "sub" => VerticalAlign::Subscript,
                "baseline" => VerticalAlign::Baseline,
                _ => return None,
            };
            Some(run(|r| r.vertical_align = Some(align)))
        });
        self.add_mapping("fontFamily", |v| {
            let family = v.split(',').next()?.trim().trim_matches(['"', '\'']);
            if family.is_empty() {
                return None;
            }
            let family = match family.to_ascii_lowercase().as_str() {
                "monospace" => "Courier New",
                "serif" => "Times New Roman",
                "sans-serif" => "Arial",
                _ => family,
            };
            Some(run(|r| r.font = Some(family.into())))
        });
        self.add_mapping("letterSpacing", |v| {
            let px = parse_px(v)?;
            Some(run(|r| r.letter_spacing = Some(round_i32(px * 10.0))))
        });

        self.add_mapping("textAlign", |v| {
            let align = match v.to_ascii_lowercase().as_str() {
                "left" | "start" => Alignment::Left,
                "center" => Alignment::Center,
                "right" | "end" => Alignment::Right,
                "justify" => Alignment::Both,
                _ => return None,
            };
            Some(paragraph(|p| p.alignment = Some(align)))
        });
        self.add_mapping("marginTop", |v| {
            let twips = twips(v, 20.0)?;
            Some(paragraph(|p| p.spacing.before = Some(twips)))
        });
        self.add_mapping("marginBottom", |v| {
            let twips = twips(v, 20.0)?;
            Some(paragraph(|p| p.spacing.after = Some(twips)))
        });
        for property in ["marginLeft", "paddingLeft"] {
            self.add_mapping(property, |v| {
                let twips = signed_twips(v, 15.0)?;
                Some(paragraph(|p| p.indent.left = Some(twips)))
            });
        }
        for property in ["marginRight", "paddingRight"] {
            self.add_mapping(property, |v| {
                let twips = signed_twips(v, 15.0)?;
                Some(paragraph(|p| p.indent.right = Some(twips)))
            });
        }
        self.add_mapping("textIndent", |v| {
            let twips = signed_twips(v, 15.0)?;
            Some(paragraph(|p| p.indent.first_line = Some(twips)))
        });
        self.add_mapping("lineHeight", |v| {
            let line = match parse_length(v)? {
                // Bare numbers parse as pixels; a multiplier has no unit.
                Length {
                    value,
                    unit: Unit::Px,
                } if !v.trim().to_ascii_lowercase().ends_with("px") => round_u32(value * 240.0),
                Length {
                    value,
                    unit: Unit::Px,
                } => round_u32(value * 20.0),
                Length {
                    value,
                    unit: Unit::Percent,
                } => round_u32(value / 100.0 * 240.0),
                Length {
                    value,
                    unit: Unit::Em,
                } => round_u32(value * 240.0),
                Length {
                    value,
                    unit: Unit::Pt,
                } => round_u32(value * 20.0),
                _ => return None,
            };
            Some(paragraph(|p| p.spacing.line = Some(line)))
        });
        self.add_mapping("borderBottom", |v| {
            let border = border_shorthand(v)?;
            Some(paragraph(|p| p.border_bottom = Some(border)))
        });

        self.add_mapping("width", |v| {
            Some(StyleFragment {
                width: Some(width(v)?),
                ..Default::default()
            })
        });
        self.add_mapping("border", |v| border(border_shorthand(v)?));
        self.add_mapping("borderWidth", |v| {
            let px = parse_px(v)?;
            border(Border {
                size: Some(round_u32(px * 8.0)),
                ..Default::default()
            })
        });
        self.add_mapping("borderStyle", |v| {
            border(Border {
                style: Some(border_style(v)?.into()),
                ..Default::default()
            })
        });
        self.add_mapping("borderColor", |v| {
            border(Border {
                color: Some(parse_color(v)?),
                ..Default::default()
            })
        });
    }
}

fn run(f: impl FnOnce(&mut RunFormat)) -> StyleFragment {
    let mut fragment = StyleFragment::default();
    f(&mut fragment.run);
    fragment
}

fn paragraph(f: impl FnOnce(&mut ParagraphFormat)) -> StyleFragment {
    let mut fragment = StyleFragment::default();
    f(&mut fragment.paragraph);
    fragment
}

fn border(border: Border) -> Option<StyleFragment> {
    Some(StyleFragment {
        border: Some(border),
        ..Default::default()
    })
}

/// Font size in half-points.
fn font_size(v: &str) -> Option<u32> {
    let Length { value, unit } = parse_length(v)?;
    let half_points = match unit {
        Unit::Px => value * 1.5,
        Unit::Percent => 16.0 * (value / 100.0) * 1.5,
        Unit::Pt => value * 2.0,
        Unit::Em => 16.0 * value * 1.5,
        _ => return None,
    };
    Some(round_u32(half_points))
}

/// Converts a pixel (or point) length to twips with the given pixel factor.
fn twips(v: &str, px_factor: f64) -> Option<u32> {
    let Length { value, unit } = parse_length(v)?;
    match unit {
        Unit::Px => Some(round_u32(value * px_factor)),
        Unit::Pt => Some(round_u32(value * 20.0)),
        _ => None,
    }
}

fn signed_twips(v: &str, px_factor: f64) -> Option<i32> {
    let Length { value, unit } = parse_length(v)?;
    match unit {
        Unit::Px => Some(round_i32(value * px_factor)),
        Unit::Pt => Some(round_i32(value * 20.0)),
        _ => None,
    }
}

fn width(v: &str) -> Option<Width> {
    let Length { value, unit } = parse_length(v)?;
    let (value, unit) = match unit {
        Unit::Px => (round_u32(value * 15.0), WidthUnit::Dxa),
        Unit::Percent => (round_u32(value), WidthUnit::Pct),
        Unit::In => (round_u32(value * 1440.0), WidthUnit::Dxa),
        Unit::Cm => (round_u32(value * 567.0), WidthUnit::Dxa),
        Unit::Pt => (round_u32(value * 20.0), WidthUnit::Dxa),
        _ => return None,
    };
    Some(Width { value, unit })
}

fn text_decoration(v: &str) -> Option<StyleFragment> {
    let mut fragment = StyleFragment::default();
    for token in v.split_whitespace() {
        match token.to_ascii_lowercase().as_str() {
            "underline" => fragment.run.underline = Some("single".into()),
            "line-through" => fragment.run.strike = Some(true),
            "none" => {
                fragment.run.underline = Some("none".into());
                fragment.run.strike = Some(false);
            }
            _ => {}
        }
    }
    (!fragment.is_empty()).then_some(fragment)
}

fn border_style(v: &str) -> Option<&'static str> {
    Some(match v.trim().to_ascii_lowercase().as_str() {
        "solid" => "single",
        "dashed" => "dashed",
        "dotted" => "dotted",
        "double" => "double",
        "none" | "hidden" => "none",
        _ => return None,
    })
}

/// Parses `1px solid #ccc` in any token order.
fn border_shorthand(v: &str) -> Option<Border> {
    let mut border = Border::default();
    for token in v.split_whitespace() {
        if let Some(px) = parse_px(token) {
            border.size = Some(round_u32(px * 8.0));
        } else if let Some(style) = border_style(token) {
            border.style = Some(style.into());
        } else if let Some(color) = parse_color(token) {
            border.color = Some(color);
        }
    }
    (border != Border::default()).then_some(border)
}
