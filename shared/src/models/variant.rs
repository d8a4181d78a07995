//! Container variant (storage type) tags

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage type of a container, used for display only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TubVariant {
    Bin,
    Box,
    Bag,
    Crate,
    Envelope,
    Drawer,
    Shelf,
    Cabinet,
    Suitcase,
    Backpack,
    Electronics,
    Files,
    Gift,
    Other,
}

/// Label shown when a container has no (or an unknown) variant
pub const FALLBACK_VARIANT_LABEL: &str = "Container";

impl TubVariant {
    /// All variants in picker order
    pub const ALL: [TubVariant; 14] = [
        TubVariant::Bin,
        TubVariant::Box,
        TubVariant::Bag,
        TubVariant::Crate,
        TubVariant::Envelope,
        TubVariant::Drawer,
        TubVariant::Shelf,
        TubVariant::Cabinet,
        TubVariant::Suitcase,
        TubVariant::Backpack,
        TubVariant::Electronics,
        TubVariant::Files,
        TubVariant::Gift,
        TubVariant::Other,
    ];

    /// Stable id as stored in the `icon` column
    pub const fn id(&self) -> &'static str {
        match self {
            TubVariant::Bin => "bin",
            TubVariant::Box => "box",
            TubVariant::Bag => "bag",
            TubVariant::Crate => "crate",
            TubVariant::Envelope => "envelope",
            TubVariant::Drawer => "drawer",
            TubVariant::Shelf => "shelf",
            TubVariant::Cabinet => "cabinet",
            TubVariant::Suitcase => "suitcase",
            TubVariant::Backpack => "backpack",
            TubVariant::Electronics => "electronics",
            TubVariant::Files => "files",
            TubVariant::Gift => "gift",
            TubVariant::Other => "other",
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            TubVariant::Bin => "Storage Bin",
            TubVariant::Box => "Cardboard Box",
            TubVariant::Bag => "Bag / Tote",
            TubVariant::Crate => "Crate",
            TubVariant::Envelope => "Envelope",
            TubVariant::Drawer => "Drawer",
            TubVariant::Shelf => "Shelf",
            TubVariant::Cabinet => "Cabinet",
            TubVariant::Suitcase => "Suitcase",
            TubVariant::Backpack => "Backpack",
            TubVariant::Electronics => "Electronics",
            TubVariant::Files => "Files",
            TubVariant::Gift => "Gift",
            TubVariant::Other => "Other",
        }
    }

    /// Variant whose icon is drawn for an optional tag (`Other` when absent)
    pub fn icon_or_default(variant: Option<TubVariant>) -> TubVariant {
        variant.unwrap_or(TubVariant::Other)
    }

    /// Label for an optional tag (`"Container"` when absent)
    pub fn label_or_default(variant: Option<TubVariant>) -> &'static str {
        variant.map(|v| v.label()).unwrap_or(FALLBACK_VARIANT_LABEL)
    }
}

impl fmt::Display for TubVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TubVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.id() == key)
            .ok_or_else(|| format!("unknown container variant: {}", s))
    }
}

/// Deserialize an optional variant, mapping unknown strings to `None`.
///
/// Rows written by older clients may carry icon ids this build does not know.
pub fn deserialize_variant_lenient<'de, D>(deserializer: D) -> Result<Option<TubVariant>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_roundtrip_through_from_str() {
        for v in TubVariant::ALL {
            assert_eq!(v.id().parse::<TubVariant>().unwrap(), v);
        }
        assert_eq!("  BIN ".parse::<TubVariant>().unwrap(), TubVariant::Bin);
        assert!("barrel".parse::<TubVariant>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TubVariant::icon_or_default(None), TubVariant::Other);
        assert_eq!(TubVariant::label_or_default(None), "Container");
        assert_eq!(
            TubVariant::label_or_default(Some(TubVariant::Bag)),
            "Bag / Tote"
        );
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&TubVariant::Electronics).unwrap();
        assert_eq!(json, "\"electronics\"");
    }
}
