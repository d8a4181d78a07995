//! Physical label formats

use crate::error::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label medium chosen for a print job
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelFormat {
    /// One large free-floating card per page
    #[default]
    #[serde(rename = "single")]
    Single,
    /// Avery 22806, 2" x 2" squares, 12 per sheet
    #[serde(rename = "22806")]
    Avery22806,
    /// Avery 5160, 2-5/8" x 1" address labels, 30 per sheet
    #[serde(rename = "5160")]
    Avery5160,
    /// Direct-thermal 4" x 6" shipping label
    #[serde(rename = "thermal-4x6")]
    Thermal4x6,
    /// Direct-thermal 3" x 2" label
    #[serde(rename = "thermal-3x2")]
    Thermal3x2,
    /// Direct-thermal 2.25" x 1.25" label
    #[serde(rename = "thermal-2.25x1.25")]
    Thermal225x125,
}

impl LabelFormat {
    pub const ALL: [LabelFormat; 6] = [
        LabelFormat::Single,
        LabelFormat::Avery22806,
        LabelFormat::Avery5160,
        LabelFormat::Thermal4x6,
        LabelFormat::Thermal3x2,
        LabelFormat::Thermal225x125,
    ];

    /// Selector string, also the serde representation
    pub const fn id(&self) -> &'static str {
        match self {
            LabelFormat::Single => "single",
            LabelFormat::Avery22806 => "22806",
            LabelFormat::Avery5160 => "5160",
            LabelFormat::Thermal4x6 => "thermal-4x6",
            LabelFormat::Thermal3x2 => "thermal-3x2",
            LabelFormat::Thermal225x125 => "thermal-2.25x1.25",
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            LabelFormat::Single => "Single Large Label",
            LabelFormat::Avery22806 => "2\" x 2\" Square (Page)",
            LabelFormat::Avery5160 => "Address Label (Page)",
            LabelFormat::Thermal4x6 => "Thermal 4\" x 6\"",
            LabelFormat::Thermal3x2 => "Thermal 3\" x 2\"",
            LabelFormat::Thermal225x125 => "Thermal 2.25\" x 1.25\"",
        }
    }

    pub const fn subtitle(&self) -> &'static str {
        match self {
            LabelFormat::Single => "Best for plain paper or thermal",
            LabelFormat::Avery22806 => "Avery 22806 (12 per sheet)",
            LabelFormat::Avery5160 => "Avery 5160 (30 per sheet)",
            LabelFormat::Thermal4x6 => "Shipping-size direct thermal label",
            LabelFormat::Thermal3x2 => "Medium direct thermal label",
            LabelFormat::Thermal225x125 => "Small direct thermal label",
        }
    }

    /// Multiple fixed cells tiled on one physical page
    pub const fn is_sheet(&self) -> bool {
        matches!(self, LabelFormat::Avery22806 | LabelFormat::Avery5160)
    }

    /// Labels on one physical page
    pub const fn labels_per_page(&self) -> usize {
        match self {
            LabelFormat::Avery22806 => 12,
            LabelFormat::Avery5160 => 30,
            _ => 1,
        }
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LabelFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.id() == key)
            .ok_or_else(|| {
                AppError::new(ErrorCode::LabelFormatUnknown).with_detail("format", s.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single() {
        assert_eq!(LabelFormat::default(), LabelFormat::Single);
    }

    #[test]
    fn test_parse_and_display() {
        for f in LabelFormat::ALL {
            assert_eq!(f.to_string().parse::<LabelFormat>().unwrap(), f);
        }
        assert_eq!(
            "Thermal-2.25x1.25".parse::<LabelFormat>().unwrap(),
            LabelFormat::Thermal225x125
        );
        let err = "a4".parse::<LabelFormat>().unwrap_err();
        assert_eq!(err.code, ErrorCode::LabelFormatUnknown);
    }

    #[test]
    fn test_serde_matches_id() {
        let json = serde_json::to_string(&LabelFormat::Avery5160).unwrap();
        assert_eq!(json, "\"5160\"");
        let f: LabelFormat = serde_json::from_str("\"thermal-3x2\"").unwrap();
        assert_eq!(f, LabelFormat::Thermal3x2);
    }

    #[test]
    fn test_capacity() {
        assert_eq!(LabelFormat::Avery22806.labels_per_page(), 12);
        assert_eq!(LabelFormat::Avery5160.labels_per_page(), 30);
        assert_eq!(LabelFormat::Thermal4x6.labels_per_page(), 1);
        assert!(LabelFormat::Avery5160.is_sheet());
        assert!(!LabelFormat::Single.is_sheet());
    }
}
