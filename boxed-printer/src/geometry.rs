//! Physical label measurements
//!
//! Sheet constants follow the manufacturer templates. A wrong margin or gap
//! shifts every label after it off its die-cut, so these values are pinned by
//! golden tests.

use shared::LabelFormat;
use std::fmt;

/// CSS length
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Inches(f64),
    Px(u32),
}

impl Length {
    /// Value in inches (CSS reference pixel is 1/96in)
    pub fn as_inches(&self) -> f64 {
        match self {
            Length::Inches(v) => *v,
            Length::Px(px) => f64::from(*px) / 96.0,
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Four decimals is well below printer resolution and keeps
            // float noise (8.115000000000002) out of the stylesheet
            Length::Inches(v) => write!(f, "{}in", (v * 10_000.0).round() / 10_000.0),
            Length::Px(px) => write!(f, "{}px", px),
        }
    }
}

/// Multi-label sheet on US Letter paper, all values in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub columns: usize,
    pub rows: usize,
    pub label_width: f64,
    pub label_height: f64,
    pub column_gap: f64,
    pub row_gap: f64,
    pub margin_top: f64,
    pub margin_left: f64,
}

/// Avery 22806: 2" x 2" square labels, 3 x 4
pub const AVERY_22806: SheetGeometry = SheetGeometry {
    page_width: 8.5,
    page_height: 11.0,
    columns: 3,
    rows: 4,
    label_width: 2.0,
    label_height: 2.0,
    column_gap: 0.6,
    row_gap: 0.6,
    margin_top: 0.6,
    margin_left: 0.65,
};

/// Avery 5160: 2-5/8" x 1" address labels, 3 x 10, rows butt together
pub const AVERY_5160: SheetGeometry = SheetGeometry {
    page_width: 8.5,
    page_height: 11.0,
    columns: 3,
    rows: 10,
    label_width: 2.625,
    label_height: 1.0,
    column_gap: 0.12,
    row_gap: 0.0,
    margin_top: 0.5,
    margin_left: 0.19,
};

impl SheetGeometry {
    pub fn for_format(format: LabelFormat) -> Option<&'static SheetGeometry> {
        match format {
            LabelFormat::Avery22806 => Some(&AVERY_22806),
            LabelFormat::Avery5160 => Some(&AVERY_5160),
            _ => None,
        }
    }

    /// Width of the label grid, gaps included
    pub fn content_width(&self) -> f64 {
        self.columns as f64 * self.label_width + (self.columns - 1) as f64 * self.column_gap
    }
}

/// How the parts of a label are placed inside its cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Icon, variant, name, QR and id stacked top to bottom
    Stacked,
    /// QR on the left, text column on the right
    SideBySide,
}

/// Cell dimensions and type scale for one format
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSpec {
    pub width: Length,
    /// `None` lets the card grow with its content
    pub height: Option<Length>,
    pub padding: Length,
    pub arrangement: Arrangement,
    pub icon_px: u32,
    pub variant_font_px: u32,
    pub name_font_px: u32,
    pub qr_px: u32,
    pub id_font_px: u32,
    /// Characters of the container id printed on the label
    pub id_chars: usize,
    pub show_description: bool,
    /// Physical page size for one-label-per-page media
    pub page: Option<(Length, Length)>,
}

impl LabelSpec {
    pub fn for_format(format: LabelFormat) -> Self {
        match format {
            LabelFormat::Single => Self {
                width: Length::Px(300),
                height: None,
                padding: Length::Px(20),
                arrangement: Arrangement::Stacked,
                icon_px: 48,
                variant_font_px: 14,
                name_font_px: 28,
                qr_px: 200,
                id_font_px: 12,
                id_chars: 8,
                show_description: true,
                page: None,
            },
            LabelFormat::Avery22806 => Self {
                width: Length::Inches(AVERY_22806.label_width),
                height: Some(Length::Inches(AVERY_22806.label_height)),
                padding: Length::Inches(0.1),
                arrangement: Arrangement::Stacked,
                icon_px: 18,
                variant_font_px: 7,
                name_font_px: 10,
                qr_px: 110,
                id_font_px: 7,
                id_chars: 8,
                show_description: false,
                page: None,
            },
            LabelFormat::Avery5160 => Self {
                width: Length::Inches(AVERY_5160.label_width),
                height: Some(Length::Inches(AVERY_5160.label_height)),
                padding: Length::Inches(0.1),
                arrangement: Arrangement::SideBySide,
                icon_px: 12,
                variant_font_px: 6,
                name_font_px: 12,
                qr_px: 60,
                id_font_px: 8,
                id_chars: 6,
                show_description: false,
                page: None,
            },
            LabelFormat::Thermal4x6 => Self::thermal(4.0, 6.0, Arrangement::Stacked, 72, 22, 40, 260, 18),
            LabelFormat::Thermal3x2 => Self::thermal(3.0, 2.0, Arrangement::SideBySide, 28, 11, 18, 140, 11),
            LabelFormat::Thermal225x125 => {
                Self::thermal(2.25, 1.25, Arrangement::SideBySide, 16, 8, 12, 96, 8)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn thermal(
        width: f64,
        height: f64,
        arrangement: Arrangement,
        icon_px: u32,
        variant_font_px: u32,
        name_font_px: u32,
        qr_px: u32,
        id_font_px: u32,
    ) -> Self {
        Self {
            width: Length::Inches(width),
            height: Some(Length::Inches(height)),
            padding: Length::Inches(if height >= 2.0 { 0.15 } else { 0.06 }),
            arrangement,
            icon_px,
            variant_font_px,
            name_font_px,
            qr_px,
            id_font_px,
            id_chars: 8,
            show_description: false,
            page: Some((Length::Inches(width), Length::Inches(height))),
        }
    }
}
