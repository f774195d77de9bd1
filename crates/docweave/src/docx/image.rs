//! Image embedding: source resolution, content type and sizing.

use base64::Engine;
use ecow::EcoString;
use log::warn;
use percent_encoding::percent_decode_str;

use crate::det::Element;
use crate::style::parse_px;
use crate::{Error, Result};

use super::context::ConvertContext;
use super::converter::DocxConverter;
use super::model::{Drawing, Run, RunContent};

/// EMU per CSS pixel at 96 dpi.
pub const EMU_PER_PX: f64 = 9525.0;

impl DocxConverter<'_> {
    /// Resolves the image source, allocates its relationship and returns a
    /// drawing run.
    pub(super) fn convert_image(&self, el: &Element, cx: &mut ConvertContext) -> Result<Run> {
        let src = el.attr("src").map(str::trim).unwrap_or_default();
        if src.is_empty() {
            return Err(Error::validation("image element is missing source"));
        }

        let (data, declared) = if is_data_url(src) {
            decode_data_url(src)?
        } else {
            let fetched = self.fetcher.fetch(src)?;
            (fetched.data, fetched.content_type)
        };

        let content_type: EcoString = declared
            .filter(|ct| ct.starts_with("image/"))
            .or_else(|| sniff_content_type(&data).map(EcoString::from))
            .unwrap_or_else(|| {
                warn!("docweave: cannot determine the type of image {}", truncate(src));
                "application/octet-stream".into()
            });

        let (width_emu, height_emu) = self.image_size(el, &data);
        let rel_id = cx.alloc_image(extension_for(&content_type), &content_type, data);

        Ok(Run {
            format: Default::default(),
            content: RunContent::Drawing(Drawing {
                rel_id,
                width_emu,
                height_emu,
                description: el.attr("alt").unwrap_or_default().into(),
            }),
        })
    }

    /// Size in EMU from the `width`/`height` attributes or styles, else from
    /// the decoded pixel size, else the configured default; clamped to the
    /// maximum width keeping the aspect ratio.
    fn image_size(&self, el: &Element, data: &[u8]) -> (u32, u32) {
        let declared = |key: &str| {
            el.attr(key)
                .and_then(parse_px)
                .or_else(|| el.style(key).and_then(parse_px))
                .filter(|px| *px > 0.0)
        };
        let natural = pixel_size(data)
            .filter(|&(w, h)| w > 0 && h > 0)
            .map(|(w, h)| (w as f64, h as f64));

        let px = match (declared("width"), declared("height"), natural) {
            (Some(w), Some(h), _) => Some((w, h)),
            (Some(w), None, Some((nw, nh))) => Some((w, w * nh / nw)),
            (None, Some(h), Some((nw, nh))) => Some((h * nw / nh, h)),
            (None, None, natural) => natural,
            (Some(w), None, None) => {
                let (dw, dh) = self.options.default_image_size_emu;
                Some((w, w * dh as f64 / dw.max(1) as f64))
            }
            (None, Some(h), None) => {
                let (dw, dh) = self.options.default_image_size_emu;
                Some((h * dw as f64 / dh.max(1) as f64, h))
            }
        };

        let (width, height) = match px {
            Some((w, h)) => (to_emu(w), to_emu(h)),
            None => self.options.default_image_size_emu,
        };

        let max = self.options.max_image_width_emu;
        if width > max && width > 0 {
            let height = (height as u64 * max as u64 / width as u64) as u32;
            (max, height)
        } else {
            (width, height)
        }
    }
}

fn to_emu(px: f64) -> u32 {
    (px * EMU_PER_PX).round().clamp(0.0, u32::MAX as f64) as u32
}

fn is_data_url(src: &str) -> bool {
    src.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
}

/// Decodes a `data:` URL into its bytes and declared MIME type.
pub(crate) fn decode_data_url(src: &str) -> Result<(Vec<u8>, Option<EcoString>)> {
    let rest = &src[5..];
    let Some((meta, payload)) = rest.split_once(',') else {
        return Err(Error::decode("malformed data URL: missing `,`"));
    };

    let mut params = meta.split(';').map(str::trim);
    let mime = params
        .next()
        .filter(|mime| !mime.is_empty())
        .map(|mime| EcoString::from(mime.to_ascii_lowercase()));
    let is_base64 = params.any(|param| param.eq_ignore_ascii_case("base64"));

    let data = if is_base64 {
        let payload = percent_decode_str(payload).decode_utf8_lossy();
        let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        base64::engine::general_purpose::STANDARD.decode(cleaned)?
    } else {
        percent_decode_str(payload).collect()
    };

    if data.is_empty() {
        return Err(Error::decode("data URL has an empty payload"));
    }
    Ok((data, mime))
}

/// The file extension of an image part.
fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpeg",
        "image/gif" => "gif",
        "image/bmp" | "image/x-ms-bmp" => "bmp",
        "image/webp" => "webp",
        "image/tiff" => "tiff",
        "image/svg+xml" => "svg",
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
        "image/x-emf" | "image/emf" => "emf",
        "image/x-wmf" | "image/wmf" => "wmf",
        _ => "bin",
    }
}

#[cfg(feature = "docx")]
fn sniff_content_type(data: &[u8]) -> Option<&'static str> {
    image::guess_format(data)
        .ok()
        .map(|format| format.to_mime_type())
}

#[cfg(not(feature = "docx"))]
fn sniff_content_type(_data: &[u8]) -> Option<&'static str> {
    None
}

#[cfg(feature = "docx")]
fn pixel_size(data: &[u8]) -> Option<(u32, u32)> {
    use image::GenericImageView;

    image::load_from_memory(data).ok().map(|img| img.dimensions())
}

#[cfg(not(feature = "docx"))]
fn pixel_size(_data: &[u8]) -> Option<(u32, u32)> {
    None
}

fn truncate(src: &str) -> &str {
    match src.char_indices().nth(64) {
        Some((idx, _)) => &src[..idx],
        None => src,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn decodes_base64_data_urls() {
        let (data, mime) = decode_data_url("data:image/png;base64,aGVs bG8=").unwrap();
        assert_eq!(data, b"hello");
        assert_eq!(mime.as_deref(), Some("image/png"));
    }

    #[test]
    fn decodes_percent_encoded_data_urls() {
        let (data, mime) = decode_data_url("data:,a%20b").unwrap();
        assert_eq!(data, b"a b");
        assert_eq!(mime, None);
    }

    #[test]
    fn rejects_malformed_data_urls() {
        let err = decode_data_url("data:image/png;base64").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        let err = decode_data_url("data:image/png;base64,!!!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn extensions() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpeg");
        assert_eq!(extension_for("application/octet-stream"), "bin");
    }
}
