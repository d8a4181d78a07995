//! # boxed-printer
//!
//! Label layout generation for container QR labels.
//!
//! ## Scope
//!
//! This crate turns a [`PrintJob`](shared::PrintJob) into a print-ready HTML
//! document sized for a physical medium, and hands it to a print surface:
//! - Sheet geometry for Avery 22806 / 5160 (exact cell sizes and gaps)
//! - Thermal and single-card page layouts
//! - QR code encoding (PNG data URIs)
//! - Print surfaces (file output, system browser)
//! - The print dialog step flow
//!
//! Fetching containers and sessions stays in `boxed-client`.
//!
//! ## Example
//!
//! ```ignore
//! use boxed_printer::{FileSurface, LabelLayout, PrintSurface};
//!
//! let document = LabelLayout::render(&job);
//! let surface = FileSurface::new("labels");
//! surface.open(&document).await?;
//! ```

mod error;
mod flow;
mod geometry;
mod icons;
mod layout;
mod markup;
mod qr;
mod supplies;
mod surface;

// Re-exports
pub use error::{PrintError, PrintResult};
pub use flow::{FlowAction, PrintFlow, PrintStep};
pub use geometry::{AVERY_5160, AVERY_22806, Arrangement, LabelSpec, Length, SheetGeometry};
pub use icons::variant_icon_svg;
pub use layout::{LabelLayout, PrintDocument};
pub use markup::{MarkupBuilder, StyleSheet, escape_html};
pub use qr::{PngQrEncoder, QrEncoder, QrOptions, acquire_qr_images};
pub use supplies::{Supply, recommended_supplies};
pub use surface::{BrowserSurface, FileSurface, PrintSurface, SurfaceHandle, dispatch};
