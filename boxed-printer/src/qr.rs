//! QR code encoding
//!
//! Every label carries a QR code holding the container's
//! [`QrPayload`](shared::QrPayload) JSON. Images are PNG `data:` URIs so the
//! print document has no external references.

use crate::error::{PrintError, PrintResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures::future::try_join_all;
use image::{ImageFormat, Rgba, RgbaImage, imageops};
use qrcode::{EcLevel, QrCode};
use shared::util::is_hex_color;
use shared::{Container, QrImage, QrPayload};
use std::io::Cursor;
use std::sync::Arc;

pub const DEFAULT_QR_WIDTH: u32 = 300;
pub const DEFAULT_QR_MARGIN: u32 = 2;
pub const DEFAULT_DARK: &str = "#000000";
pub const DEFAULT_LIGHT: &str = "#ffffff";

/// Above this luma a dark colour no longer contrasts with the light modules
const MAX_DARK_LUMA: f64 = 0.8;

/// QR rendering options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrOptions {
    /// Target image width in pixels
    pub width_px: u32,
    /// Quiet zone in modules
    pub margin: u32,
    pub dark: String,
    pub light: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_QR_WIDTH,
            margin: DEFAULT_QR_MARGIN,
            dark: DEFAULT_DARK.to_string(),
            light: DEFAULT_LIGHT.to_string(),
        }
    }
}

impl QrOptions {
    /// Options tinted with the container colour.
    ///
    /// Missing, malformed and near-white colours fall back to black so the
    /// code stays scannable.
    pub fn for_container(container: &Container) -> Self {
        let dark = container
            .color
            .as_deref()
            .filter(|c| parse_hex(c).is_some_and(|rgba| luma(rgba) <= MAX_DARK_LUMA))
            .unwrap_or(DEFAULT_DARK);
        Self {
            dark: dark.to_string(),
            ..Self::default()
        }
    }
}

fn parse_hex(s: &str) -> Option<Rgba<u8>> {
    if !is_hex_color(s) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
    Some(Rgba([channel(1)?, channel(3)?, channel(5)?, 255]))
}

fn luma(Rgba([r, g, b, _]): Rgba<u8>) -> f64 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}

/// QR encoder seam
///
/// Encoding is CPU-bound and synchronous; callers batch it through
/// [`acquire_qr_images`].
pub trait QrEncoder: Send + Sync {
    /// Encode `payload` into an image; identical input yields identical output
    fn encode(&self, payload: &str, options: &QrOptions) -> PrintResult<QrImage>;
}

/// PNG encoder backed by the `qrcode` and `image` crates
#[derive(Debug, Clone, Copy, Default)]
pub struct PngQrEncoder;

impl QrEncoder for PngQrEncoder {
    fn encode(&self, payload: &str, options: &QrOptions) -> PrintResult<QrImage> {
        let dark = parse_hex(&options.dark)
            .ok_or_else(|| PrintError::InvalidConfig(format!("dark colour {}", options.dark)))?;
        let light = parse_hex(&options.light)
            .ok_or_else(|| PrintError::InvalidConfig(format!("light colour {}", options.light)))?;

        let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::M)
            .map_err(|e| PrintError::QrEncoding(e.to_string()))?;

        // Whole pixels per module keep the edges sharp
        let modules = code.width() as u32 + 2 * options.margin;
        let module_px = (options.width_px / modules).max(1);

        let symbol = code
            .render::<Rgba<u8>>()
            .dark_color(dark)
            .light_color(light)
            .quiet_zone(false)
            .module_dimensions(module_px, module_px)
            .build();

        let margin_px = module_px * options.margin;
        let side = symbol.width() + 2 * margin_px;
        let mut canvas = RgbaImage::from_pixel(side, side, light);
        imageops::overlay(&mut canvas, &symbol, i64::from(margin_px), i64::from(margin_px));

        let mut png = Vec::new();
        canvas
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| PrintError::QrEncoding(e.to_string()))?;

        Ok(QrImage::new(
            format!("data:image/png;base64,{}", STANDARD.encode(&png)),
            side,
        ))
    }
}

/// Encode QR images for every container, order preserved.
///
/// All images resolve before this returns; the first failure fails the
/// whole batch and no partial result is produced.
pub async fn acquire_qr_images(
    encoder: Arc<dyn QrEncoder>,
    containers: &[Container],
) -> PrintResult<Vec<QrImage>> {
    let tasks = containers.iter().map(|container| {
        let encoder = Arc::clone(&encoder);
        let payload = QrPayload::for_container(container).to_json();
        let options = QrOptions::for_container(container);
        async move {
            let payload = payload.map_err(|e| PrintError::QrEncoding(e.to_string()))?;
            tokio::task::spawn_blocking(move || encoder.encode(&payload, &options))
                .await
                .map_err(|e| PrintError::QrEncoding(format!("encoder task failed: {}", e)))?
        }
    });

    let images = try_join_all(tasks).await?;
    tracing::debug!(count = images.len(), "QR images acquired");
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let o = QrOptions::default();
        assert_eq!(o.width_px, 300);
        assert_eq!(o.margin, 2);
        assert_eq!(o.dark, "#000000");
        assert_eq!(o.light, "#ffffff");
    }

    #[test]
    fn test_container_colour() {
        let c = Container::named("1", "Decor").with_color("#ff0055");
        assert_eq!(QrOptions::for_container(&c).dark, "#ff0055");

        let white = Container::named("2", "Winter").with_color("#ffffff");
        assert_eq!(QrOptions::for_container(&white).dark, "#000000");

        let bad = Container::named("3", "Bad").with_color("purple");
        assert_eq!(QrOptions::for_container(&bad).dark, "#000000");

        assert_eq!(QrOptions::for_container(&Container::named("4", "None")).dark, "#000000");
    }

    #[test]
    fn test_png_data_uri() {
        let img = PngQrEncoder
            .encode(r#"{"type":"tub","id":"abc"}"#, &QrOptions::default())
            .unwrap();
        assert!(img.src.starts_with("data:image/png;base64,"));
        assert!(img.width_px <= 300);
        assert!(img.width_px > 100);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = PngQrEncoder.encode("same", &QrOptions::default()).unwrap();
        let b = PngQrEncoder.encode("same", &QrOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_colour_rejected() {
        let options = QrOptions {
            dark: "black".into(),
            ..QrOptions::default()
        };
        let err = PngQrEncoder.encode("x", &options).unwrap_err();
        assert!(matches!(err, PrintError::InvalidConfig(_)));
    }

    struct FailingEncoder;

    impl QrEncoder for FailingEncoder {
        fn encode(&self, payload: &str, _: &QrOptions) -> PrintResult<QrImage> {
            if payload.contains("\"bad\"") {
                return Err(PrintError::QrEncoding("too long".into()));
            }
            Ok(QrImage::new(payload.to_string(), 1))
        }
    }

    #[tokio::test]
    async fn test_acquire_preserves_order() {
        let containers: Vec<_> = (0..8)
            .map(|i| Container::named(i.to_string(), format!("Tub {}", i)))
            .collect();
        let images = acquire_qr_images(Arc::new(FailingEncoder), &containers)
            .await
            .unwrap();
        assert_eq!(images.len(), 8);
        for (i, img) in images.iter().enumerate() {
            assert!(img.src.contains(&format!("\"id\":\"{}\"", i)));
        }
    }

    #[tokio::test]
    async fn test_acquire_fails_whole_batch() {
        let containers = vec![
            Container::named("ok", "Fine"),
            Container::named("bad", "Broken"),
        ];
        let err = acquire_qr_images(Arc::new(FailingEncoder), &containers)
            .await
            .unwrap_err();
        assert!(matches!(err, PrintError::QrEncoding(_)));
    }
}
