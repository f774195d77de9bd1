//! CSS value parsing: lengths and colors.

use std::sync::LazyLock;

use ecow::{EcoString, eco_format};
use regex::Regex;

/// The unit of a CSS length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Pixels; also assumed for bare numbers.
    Px,
    /// Percent.
    Percent,
    /// Points.
    Pt,
    /// Font-relative units (`em`, `rem`).
    Em,
    /// Inches.
    In,
    /// Centimeters.
    Cm,
    /// Millimeters.
    Mm,
}

/// A parsed CSS length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    /// The numeric value.
    pub value: f64,
    /// The unit.
    pub unit: Unit,
}

impl Length {
    /// The value in pixels for absolute units.
    pub fn to_px(self) -> Option<f64> {
        match self.unit {
            Unit::Px => Some(self.value),
            Unit::Pt => Some(self.value * 96.0 / 72.0),
            Unit::In => Some(self.value * 96.0),
            Unit::Cm => Some(self.value * 96.0 / 2.54),
            Unit::Mm => Some(self.value * 96.0 / 25.4),
            Unit::Percent | Unit::Em => None,
        }
    }
}

static LENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*([+-]?(?:\d+\.?\d*|\.\d+))\s*(px|%|pt|rem|em|in|cm|mm)?\s*$").unwrap()
});

/// Parses a CSS length such as `12px`, `50%` or `1.5in`.
pub fn parse_length(value: &str) -> Option<Length> {
    let caps = LENGTH_RE.captures(value)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => Unit::Px,
        Some(unit) => match unit.as_str() {
            "px" => Unit::Px,
            "%" => Unit::Percent,
            "pt" => Unit::Pt,
            "em" | "rem" => Unit::Em,
            "in" => Unit::In,
            "cm" => Unit::Cm,
            "mm" => Unit::Mm,
            _ => return None,
        },
    };
    value.is_finite().then_some(Length { value, unit })
}

/// Parses a pixel length; bare numbers count as pixels.
pub fn parse_px(value: &str) -> Option<f64> {
    match parse_length(value)? {
        Length {
            value,
            unit: Unit::Px,
        } => Some(value),
        _ => None,
    }
}

/// Rounds a non-negative measurement to an integer unit, saturating at zero.
pub(crate) fn round_u32(value: f64) -> u32 {
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.round() as u32
    }
}

/// Rounds a signed measurement to an integer unit.
pub(crate) fn round_i32(value: f64) -> i32 {
    value.round().clamp(i32::MIN as f64, i32::MAX as f64) as i32
}

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*(\d{1,3}%?)\s*[,\s]\s*(\d{1,3}%?)\s*[,\s]\s*(\d{1,3}%?)\s*(?:[,/]\s*[\d.]+%?\s*)?\)$",
    )
    .unwrap()
});

/// Normalizes a CSS color to six uppercase hex digits without `#`.
///
/// Accepts `#rgb`, `#rrggbb` (alpha suffixes are ignored), `rgb()`/`rgba()`
/// and named colors. Returns `None` for `transparent` and anything
/// unrecognized.
pub fn parse_color(value: &str) -> Option<EcoString> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return match hex.len() {
            3 | 4 => {
                let mut out = EcoString::new();
                for c in hex.chars().take(3) {
                    let c = c.to_ascii_uppercase();
                    out.push(c);
                    out.push(c);
                }
                Some(out)
            }
            6 | 8 => Some(hex[..6].to_ascii_uppercase().into()),
            _ => None,
        };
    }

    if let Some(caps) = RGB_RE.captures(value) {
        let channel = |i: usize| -> Option<u8> {
            let raw = caps.get(i)?.as_str();
            let n = match raw.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().ok()? * 2.55,
                None => raw.parse::<f64>().ok()?,
            };
            Some(n.round().clamp(0.0, 255.0) as u8)
        };
        return Some(eco_format!("{:02X}{:02X}{:02X}", channel(1)?, channel(2)?, channel(3)?));
    }

    let lower = value.to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by(|(name, _)| name.cmp(&lower.as_str()))
        .ok()
        .map(|i| NAMED_COLORS[i].1.into())
}

// Sorted by name for binary search.
static NAMED_COLORS: &[(&str, &str)] = &[
    ("aliceblue", "F0F8FF"),
    ("antiquewhite", "FAEBD7"),
    ("aqua", "00FFFF"),
    ("aquamarine", "7FFFD4"),
    ("azure", "F0FFFF"),
    ("beige", "F5F5DC"),
    ("bisque", "FFE4C4"),
    ("black", "000000"),
    ("blanchedalmond", "FFEBCD"),
    ("blue", "0000FF"),
    ("blueviolet", "8A2BE2"),
    ("brown", "A52A2A"),
    ("burlywood", "DEB887"),
    ("cadetblue", "5F9EA0"),
    ("chartreuse", "7FFF00"),
    ("chocolate", "D2691E"),
    ("coral", "FF7F50"),
    ("cornflowerblue", "6495ED"),
    ("cornsilk", "FFF8DC"),
    ("crimson", "DC143C"),
    ("cyan", "00FFFF"),
    ("darkblue", "00008B"),
    ("darkcyan", "008B8B"),
    ("darkgoldenrod", "B8860B"),
    ("darkgray", "A9A9A9"),
    ("darkgreen", "006400"),
    ("darkgrey", "A9A9A9"),
    ("darkkhaki", "BDB76B"),
    ("darkmagenta", "8B008B"),
    ("darkolivegreen", "556B2F"),
    ("darkorange", "FF8C00"),
    ("darkorchid", "9932CC"),
    ("darkred", "8B0000"),
    ("darksalmon", "E9967A"),
    ("darkseagreen", "8FBC8F"),
    ("darkslateblue", "483D8B"),
    ("darkslategray", "2F4F4F"),
    ("darkslategrey", "2F4F4F"),
    ("darkturquoise", "00CED1"),
    ("darkviolet", "9400D3"),
    ("deeppink", "FF1493"),
    ("deepskyblue", "00BFFF"),
    ("dimgray", "696969"),
    ("dimgrey", "696969"),
    ("dodgerblue", "1E90FF"),
    ("firebrick", "B22222"),
    ("floralwhite", "FFFAF0"),
    ("forestgreen", "228B22"),
    ("fuchsia", "FF00FF"),
    ("gainsboro", "DCDCDC"),
    ("ghostwhite", "F8F8FF"),
    ("gold", "FFD700"),
    ("goldenrod", "DAA520"),
    ("gray", "808080"),
    ("green", "008000"),
    ("greenyellow", "ADFF2F"),
    ("grey", "808080"),
    ("honeydew", "F0FFF0"),
    ("hotpink", "FF69B4"),
    ("indianred", "CD5C5C"),
    ("indigo", "4B0082"),
    ("ivory", "FFFFF0"),
    ("khaki", "F0E68C"),
    ("lavender", "E6E6FA"),
    ("lavenderblush", "FFF0F5"),
    ("lawngreen", "7CFC00"),
    ("lemonchiffon", "FFFACD"),
    ("lightblue", "ADD8E6"),
    ("lightcoral", "F08080"),
    ("lightcyan", "E0FFFF"),
    ("lightgoldenrodyellow", "FAFAD2"),
    ("lightgray", "D3D3D3"),
    ("lightgreen", "90EE90"),
    ("lightgrey", "D3D3D3"),
    ("lightpink", "FFB6C1"),
    ("lightsalmon", "FFA07A"),
    ("lightseagreen", "20B2AA"),
    ("lightskyblue", "87CEFA"),
    ("lightslategray", "778899"),
    ("lightslategrey", "778899"),
    ("lightsteelblue", "B0C4DE"),
    ("lightyellow", "FFFFE0"),
    ("lime", "00FF00"),
    ("limegreen", "32CD32"),
    ("linen", "FAF0E6"),
    ("magenta", "FF00FF"),
    ("maroon", "800000"),
    ("mediumaquamarine", "66CDAA"),
    ("mediumblue", "0000CD"),
    ("mediumorchid", "BA55D3"),
    ("mediumpurple", "9370DB"),
    ("mediumseagreen", "3CB371"),
    ("mediumslateblue", "7B68EE"),
    ("mediumspringgreen", "00FA9A"),
    ("mediumturquoise", "48D1CC"),
    ("mediumvioletred", "C71585"),
    ("midnightblue", "191970"),
    ("mintcream", "F5FFFA"),
    ("mistyrose", "FFE4E1"),
    ("moccasin", "FFE4B5"),
    ("navajowhite", "FFDEAD"),
    ("navy", "000080"),
    ("oldlace", "FDF5E6"),
    ("olive", "808000"),
    ("olivedrab", "6B8E23"),
    ("orange", "FFA500"),
    ("orangered", "FF4500"),
    ("orchid", "DA70D6"),
    ("palegoldenrod", "EEE8AA"),
    ("palegreen", "98FB98"),
    ("paleturquoise", "AFEEEE"),
    ("palevioletred", "DB7093"),
    ("papayawhip", "FFEFD5"),
    ("peachpuff", "FFDAB9"),
    ("peru", "CD853F"),
    ("pink", "FFC0CB"),
    ("plum", "DDA0DD"),
    ("powderblue", "B0E0E6"),
    ("purple", "800080"),
    ("rebeccapurple", "663399"),
    ("red", "FF0000"),
    ("rosybrown", "BC8F8F"),
    ("royalblue", "4169E1"),
    ("saddlebrown", "8B4513"),
    ("salmon", "FA8072"),
    ("sandybrown", "F4A460"),
    ("seagreen", "2E8B57"),
    ("seashell", "FFF5EE"),
    ("sienna", "A0522D"),
    ("silver", "C0C0C0"),
    ("skyblue", "87CEEB"),
    ("slateblue", "6A5ACD"),
    ("slategray", "708090"),
    ("slategrey", "708090"),
    ("snow", "FFFAFA"),
    ("springgreen", "00FF7F"),
    ("steelblue", "4682B4"),
    ("tan", "D2B48C"),
    ("teal", "008080"),
    ("thistle", "D8BFD8"),
    ("tomato", "FF6347"),
    ("turquoise", "40E0D0"),
    ("violet", "EE82EE"),
    ("wheat", "F5DEB3"),
    ("white", "FFFFFF"),
    ("whitesmoke", "F5F5F5"),
    ("yellow", "FFFF00"),
    ("yellowgreen", "9ACD32"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths() {
        assert_eq!(
            parse_length("12px"),
            Some(Length {
                value: 12.0,
                unit: Unit::Px
            })
        );
        assert_eq!(parse_length(" 50% ").map(|l| l.unit), Some(Unit::Percent));
        assert_eq!(parse_length("1.5EM").map(|l| l.unit), Some(Unit::Em));
        assert_eq!(parse_length(".5in").map(|l| l.value), Some(0.5));
        assert_eq!(parse_px("200"), Some(200.0));
        assert_eq!(parse_length("auto"), None);
        assert_eq!(parse_length("12vw"), None);
    }

    #[test]
    fn colors() {
        assert_eq!(parse_color("#ff0000").as_deref(), Some("FF0000"));
        assert_eq!(parse_color("#abc").as_deref(), Some("AABBCC"));
        assert_eq!(parse_color("rgb(255, 128, 0)").as_deref(), Some("FF8000"));
        assert_eq!(parse_color("rgba(0 0 255 / 50%)").as_deref(), Some("0000FF"));
        assert_eq!(parse_color("Red").as_deref(), Some("FF0000"));
        assert_eq!(parse_color("green").as_deref(), Some("008000"));
        assert_eq!(parse_color("transparent"), None);
        assert_eq!(parse_color("#12"), None);
    }

    #[test]
    fn named_colors_are_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }
}
