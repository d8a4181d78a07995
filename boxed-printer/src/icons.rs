//! Inline SVG icons for container variants
//!
//! Icons are drawn on a 24x24 stroke grid so they stay crisp at any size and
//! print without network access.

use shared::TubVariant;

/// Inner SVG elements per variant
fn glyph(variant: TubVariant) -> &'static str {
    match variant {
        TubVariant::Bin => {
            r#"<rect x="3" y="4" width="18" height="5" rx="1"/><path d="M5 9v10a2 2 0 0 0 2 2h10a2 2 0 0 0 2-2V9"/><path d="M10 13h4"/>"#
        }
        TubVariant::Box => {
            r#"<path d="M21 8 12 3 3 8v8l9 5 9-5z"/><path d="m3 8 9 5 9-5"/><path d="M12 13v8"/>"#
        }
        TubVariant::Bag => {
            r#"<path d="M6 7h12l1 14H5z"/><path d="M9 10V6a3 3 0 0 1 6 0v4"/>"#
        }
        TubVariant::Crate => {
            r#"<rect x="3" y="5" width="18" height="14" rx="1"/><path d="M3 12h18"/><path d="M8 5v14"/><path d="M16 5v14"/>"#
        }
        TubVariant::Envelope => {
            r#"<rect x="2" y="4" width="20" height="16" rx="2"/><path d="m22 7-10 6L2 7"/>"#
        }
        TubVariant::Drawer => {
            r#"<rect x="3" y="3" width="18" height="18" rx="2"/><path d="M3 12h18"/><path d="M10 7.5h4"/><path d="M10 16.5h4"/>"#
        }
        TubVariant::Shelf => {
            r#"<path d="M3 4v17"/><path d="M21 4v17"/><path d="M3 9h18"/><path d="M3 15h18"/><path d="M3 21h18"/>"#
        }
        TubVariant::Cabinet => {
            r#"<rect x="4" y="2" width="16" height="20" rx="2"/><path d="M12 2v20"/><path d="M9.5 11v2"/><path d="M14.5 11v2"/>"#
        }
        TubVariant::Suitcase => {
            r#"<rect x="3" y="7" width="18" height="13" rx="2"/><path d="M9 7V4h6v3"/><path d="M8 11v5"/><path d="M16 11v5"/>"#
        }
        TubVariant::Backpack => {
            r#"<path d="M5 10a7 7 0 0 1 14 0v10a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2z"/><path d="M9 6V4h6v2"/><path d="M8 14h8v4H8z"/>"#
        }
        TubVariant::Electronics => {
            r#"<rect x="5" y="5" width="14" height="14" rx="2"/><rect x="9" y="9" width="6" height="6"/><path d="M9 2v3"/><path d="M15 2v3"/><path d="M9 19v3"/><path d="M15 19v3"/><path d="M2 9h3"/><path d="M2 15h3"/><path d="M19 9h3"/><path d="M19 15h3"/>"#
        }
        TubVariant::Files => {
            r#"<path d="M14 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V8z"/><path d="M14 2v6h6"/><path d="M8 13h8"/><path d="M8 17h5"/>"#
        }
        TubVariant::Gift => {
            r#"<rect x="3" y="8" width="18" height="4" rx="1"/><path d="M5 12v8a1 1 0 0 0 1 1h12a1 1 0 0 0 1-1v-8"/><path d="M12 8v13"/><path d="M12 8S10 3 7.5 4 8 8 12 8s4.5-3 4.5-4S14 3 12 8"/>"#
        }
        TubVariant::Other => {
            r#"<path d="M21 8 12 3 3 8v8l9 5 9-5z"/><path d="M12 3v18"/><path d="m3 8 18 8"/>"#
        }
    }
}

/// Complete `<svg>` element for a variant at `size_px`
pub fn variant_icon_svg(variant: TubVariant, size_px: u32) -> String {
    format!(
        r#"<svg class="label-icon" data-variant="{id}" xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">{glyph}</svg>"#,
        id = variant.id(),
        size = size_px,
        glyph = glyph(variant),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_an_icon() {
        for v in TubVariant::ALL {
            let svg = variant_icon_svg(v, 24);
            assert!(svg.starts_with("<svg"));
            assert!(svg.ends_with("</svg>"));
            assert!(svg.contains(&format!("data-variant=\"{}\"", v.id())));
        }
    }

    #[test]
    fn test_icon_size() {
        let svg = variant_icon_svg(TubVariant::Bin, 48);
        assert!(svg.contains("width=\"48\" height=\"48\""));
    }
}
