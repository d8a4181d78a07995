//! Print document generation
//!
//! [`LabelLayout::render`] turns a print job into one self-contained HTML
//! document: a stylesheet carrying the per-format measurements, one cell per
//! container in job order, and an onload hook that opens the print dialog.
//!
//! Sheet formats place every cell inside a single flex-wrapped `.sheet`
//! container. The `@page` bottom margin is zero, so the row after the last
//! one on a sheet no longer fits and the browser moves it to the next
//! physical page on its own; no page markers are emitted.

use crate::geometry::{Arrangement, LabelSpec, Length, SheetGeometry};
use crate::icons::variant_icon_svg;
use crate::markup::{MarkupBuilder, StyleSheet};
use serde::Serialize;
use shared::models::PrintEntry;
use shared::util::short_id;
use shared::{LabelFormat, PrintJob, TubVariant};

const PRINT_ON_LOAD: &str = "window.onload = function() { window.print(); };";

const FONT_STACK: &str =
    "system-ui, -apple-system, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif";

const MONO_STACK: &str = "ui-monospace, SFMono-Regular, Menlo, Consolas, monospace";

/// Rendered, print-ready document
#[derive(Debug, Clone, Serialize)]
pub struct PrintDocument {
    pub title: String,
    pub format: LabelFormat,
    /// Number of label cells in `html`
    pub cell_count: usize,
    pub html: String,
}

impl PrintDocument {
    /// File name stem, e.g. `labels-22806-13`
    pub fn file_stem(&self) -> String {
        format!("labels-{}-{}", self.format.id(), self.cell_count)
    }
}

/// Label document renderer
pub struct LabelLayout;

impl LabelLayout {
    /// Render a job into a print document
    pub fn render(job: &PrintJob) -> PrintDocument {
        let format = job.format();
        let spec = LabelSpec::for_format(format);
        let title = document_title(job);

        let body_class = format!("format-{}", format.id());

        let mut b = MarkupBuilder::new();
        b.raw("<!DOCTYPE html>\n")
            .open("html", &[("lang", "en")])
            .raw("\n")
            .open("head", &[])
            .void("meta", &[("charset", "utf-8")])
            .element("title", &[], &title)
            .open("style", &[])
            .raw("\n")
            .raw(&Self::stylesheet(format))
            .close("style")
            .open("script", &[])
            .raw(PRINT_ON_LOAD)
            .close("script")
            .close("head")
            .open("body", &[("class", body_class.as_str())])
            .raw("\n");

        if format.is_sheet() {
            b.open("div", &[("class", "sheet")]).raw("\n");
            for (index, entry) in job.entries().iter().enumerate() {
                render_cell(&mut b, index, entry, &spec);
            }
            b.close("div");
        } else {
            for (index, entry) in job.entries().iter().enumerate() {
                b.open("div", &[("class", "page")]).raw("\n");
                render_cell(&mut b, index, entry, &spec);
                b.close("div");
            }
        }

        // Nothing may follow the last page or `.page:last-child` stops matching
        b.close("body").close("html");

        tracing::debug!(format = %format, cells = job.len(), "Rendered label document");

        PrintDocument {
            title,
            format,
            cell_count: job.len(),
            html: b.build(),
        }
    }

    /// Stylesheet for a format
    pub fn stylesheet(format: LabelFormat) -> String {
        let spec = LabelSpec::for_format(format);
        let mut css = StyleSheet::new();

        css.rule(
            "*",
            &[
                ("box-sizing", "border-box".into()),
                ("margin", "0".into()),
                ("padding", "0".into()),
            ],
        )
        .rule(
            "html, body",
            &[
                ("font-family", FONT_STACK.into()),
                ("color", "#000".into()),
                ("background", "#fff".into()),
                ("-webkit-print-color-adjust", "exact".into()),
                ("print-color-adjust", "exact".into()),
            ],
        );

        page_rules(&mut css, format, &spec);
        cell_rules(&mut css, format, &spec);
        part_rules(&mut css, &spec);

        css.build()
    }
}

fn document_title(job: &PrintJob) -> String {
    match job.entries() {
        [only] => format!("Label: {}", only.container.name),
        entries => format!("{} Labels ({})", entries.len(), job.format().title()),
    }
}

fn page_rules(css: &mut StyleSheet, format: LabelFormat, spec: &LabelSpec) {
    if let Some(sheet) = SheetGeometry::for_format(format) {
        css.rule(
            "@page",
            &[
                (
                    "size",
                    format!(
                        "{} {}",
                        Length::Inches(sheet.page_width),
                        Length::Inches(sheet.page_height)
                    ),
                ),
                (
                    "margin",
                    format!(
                        "{} 0 0 {}",
                        Length::Inches(sheet.margin_top),
                        Length::Inches(sheet.margin_left)
                    ),
                ),
            ],
        )
        .rule(
            ".sheet",
            &[
                ("display", "flex".into()),
                ("flex-wrap", "wrap".into()),
                ("align-content", "flex-start".into()),
                ("width", Length::Inches(sheet.content_width()).to_string()),
                ("column-gap", Length::Inches(sheet.column_gap).to_string()),
                ("row-gap", Length::Inches(sheet.row_gap).to_string()),
            ],
        );
        return;
    }

    if let Some((width, height)) = spec.page {
        css.rule(
            "@page",
            &[
                ("size", format!("{} {}", width, height)),
                ("margin", "0".into()),
            ],
        );
    }

    css.rule(
        ".page",
        &[
            ("break-after", "page".into()),
            ("page-break-after", "always".into()),
        ],
    )
    .rule(
        ".page:last-child",
        &[
            ("break-after", "auto".into()),
            ("page-break-after", "auto".into()),
        ],
    );
}

fn cell_rules(css: &mut StyleSheet, format: LabelFormat, spec: &LabelSpec) {
    let mut label: Vec<(&str, String)> = vec![
        ("width", spec.width.to_string()),
        ("padding", spec.padding.to_string()),
        ("overflow", "hidden".into()),
        ("break-inside", "avoid".into()),
        ("page-break-inside", "avoid".into()),
    ];
    if let Some(height) = spec.height {
        label.push(("height", height.to_string()));
    }

    match spec.arrangement {
        Arrangement::Stacked => label.extend([
            ("display", "flex".to_string()),
            ("flex-direction", "column".to_string()),
            ("align-items", "center".to_string()),
            ("justify-content", "center".to_string()),
            ("text-align", "center".to_string()),
            ("gap", "4px".to_string()),
        ]),
        Arrangement::SideBySide => label.extend([
            ("display", "grid".to_string()),
            ("grid-template-columns", "auto minmax(0, 1fr)".to_string()),
            ("grid-template-rows", "auto auto 1fr auto".to_string()),
            (
                "grid-template-areas",
                "\"qr icon\" \"qr variant\" \"qr name\" \"qr id\"".to_string(),
            ),
            ("column-gap", "0.08in".to_string()),
            ("align-items", "center".to_string()),
            ("justify-items", "start".to_string()),
        ]),
    }

    if format.is_sheet() {
        label.push(("flex", "none".into()));
    }
    if format == LabelFormat::Single {
        label.extend([
            ("border", "2px solid #000".to_string()),
            ("border-radius", "12px".to_string()),
            ("margin", "40px auto".to_string()),
        ]);
    }

    css.rule(".label", &label);

    if spec.arrangement == Arrangement::SideBySide {
        css.rule(".label-icon", &[("grid-area", "icon".into())])
            .rule(".label-variant", &[("grid-area", "variant".into())])
            .rule(".label-name", &[("grid-area", "name".into())])
            .rule(".label-qr", &[("grid-area", "qr".into())])
            .rule(".label-id", &[("grid-area", "id".into())]);
    }
}

fn part_rules(css: &mut StyleSheet, spec: &LabelSpec) {
    css.rule(
        ".label-icon",
        &[
            ("width", Length::Px(spec.icon_px).to_string()),
            ("height", Length::Px(spec.icon_px).to_string()),
            ("flex", "none".into()),
        ],
    )
    .rule(
        ".label-variant",
        &[
            ("font-size", Length::Px(spec.variant_font_px).to_string()),
            ("font-weight", "600".into()),
            ("letter-spacing", "0.08em".into()),
            ("color", "#333".into()),
        ],
    )
    .rule(
        ".label-name",
        &[
            ("font-size", Length::Px(spec.name_font_px).to_string()),
            ("font-weight", "700".into()),
            ("line-height", "1.15".into()),
            ("max-width", "100%".into()),
            ("min-width", "0".into()),
            ("white-space", "nowrap".into()),
            ("overflow", "hidden".into()),
            ("text-overflow", "ellipsis".into()),
        ],
    )
    .rule(
        ".label-qr",
        &[
            ("display", "block".into()),
            ("width", Length::Px(spec.qr_px).to_string()),
            ("height", Length::Px(spec.qr_px).to_string()),
            ("image-rendering", "pixelated".into()),
        ],
    )
    .rule(
        ".label-id",
        &[
            ("font-family", MONO_STACK.into()),
            ("font-size", Length::Px(spec.id_font_px).to_string()),
            ("color", "#555".into()),
        ],
    );

    if spec.show_description {
        css.rule(
            ".label-description",
            &[
                ("font-size", "14px".into()),
                ("color", "#444".into()),
                ("max-width", "100%".into()),
            ],
        );
    }
}

fn render_cell(b: &mut MarkupBuilder, index: usize, entry: &PrintEntry, spec: &LabelSpec) {
    let container = &entry.container;
    let variant = TubVariant::icon_or_default(container.icon);
    let variant_label = TubVariant::label_or_default(container.icon).to_uppercase();
    let cell = index.to_string();
    let qr_size = spec.qr_px.to_string();
    let alt = format!("QR code for {}", container.name);

    b.open("div", &[("class", "label"), ("data-cell", cell.as_str())])
        .raw("\n")
        .raw(&variant_icon_svg(variant, spec.icon_px))
        .raw("\n")
        .element("div", &[("class", "label-variant")], &variant_label)
        .element(
            "div",
            &[("class", "label-name"), ("title", container.name.as_str())],
            &container.name,
        );

    if spec.show_description {
        b.element(
            "div",
            &[("class", "label-description")],
            container.description_or_empty(),
        );
    }

    b.void(
        "img",
        &[
            ("class", "label-qr"),
            ("src", entry.qr.src.as_str()),
            ("alt", alt.as_str()),
            ("width", qr_size.as_str()),
            ("height", qr_size.as_str()),
        ],
    )
    .element(
        "div",
        &[("class", "label-id")],
        short_id(&container.id, spec.id_chars),
    )
    .close("div");
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Container, QrImage};

    fn job(containers: Vec<Container>, format: LabelFormat) -> PrintJob {
        let qrs = containers
            .iter()
            .map(|c| QrImage::new(format!("data:image/png;base64,{}", c.id), 300))
            .collect();
        PrintJob::from_pairs(containers, qrs, format).unwrap()
    }

    #[test]
    fn test_single_cell_order() {
        let c = Container::named("abc12345-0000", "Garage Tools")
            .with_description("Hammers")
            .with_icon(TubVariant::Crate);
        let doc = LabelLayout::render(&job(vec![c], LabelFormat::Single));
        let html = &doc.html;

        let icon = html.find("data-variant=\"crate\"").unwrap();
        let variant = html.find(">CRATE<").unwrap();
        let name = html.find(">Garage Tools<").unwrap();
        let desc = html.find(">Hammers<").unwrap();
        let qr = html.find("class=\"label-qr\"").unwrap();
        let id = html.find(">abc12345<").unwrap();
        assert!(icon < variant && variant < name && name < desc && desc < qr && qr < id);
        assert_eq!(doc.title, "Label: Garage Tools");
    }

    #[test]
    fn test_description_only_on_single() {
        let c = Container::named("x", "Box").with_description("Secret stuff");
        let doc = LabelLayout::render(&job(vec![c], LabelFormat::Avery22806));
        assert!(!doc.html.contains("Secret stuff"));
        assert!(!doc.html.contains("label-description"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let c = Container::named("id\"1", "<script>alert(1)</script>");
        let doc = LabelLayout::render(&job(vec![c], LabelFormat::Single));
        assert!(!doc.html.contains("<script>alert"));
        assert!(doc.html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert_eq!(doc.html.matches("<script>").count(), 1);
    }

    #[test]
    fn test_side_by_side_uses_grid_areas() {
        let css = LabelLayout::stylesheet(LabelFormat::Avery5160);
        assert!(css.contains("display: grid;"));
        assert!(css.contains("grid-area: qr;"));
        let css = LabelLayout::stylesheet(LabelFormat::Thermal4x6);
        assert!(!css.contains("grid-area"));
    }

    #[test]
    fn test_thermal_page_size() {
        let css = LabelLayout::stylesheet(LabelFormat::Thermal225x125);
        assert!(css.contains("size: 2.25in 1.25in;"));
        assert!(css.contains("break-after: page;"));
    }

    #[test]
    fn test_sheet_page_margins() {
        let css = LabelLayout::stylesheet(LabelFormat::Avery22806);
        assert!(css.contains("margin: 0.6in 0 0 0.65in;"));
        assert!(css.contains("width: 7.2in;"));
        let css = LabelLayout::stylesheet(LabelFormat::Avery5160);
        assert!(css.contains("margin: 0.5in 0 0 0.19in;"));
    }

    #[test]
    fn test_file_stem() {
        let doc = LabelLayout::render(&job(
            vec![Container::named("a", "A"), Container::named("b", "B")],
            LabelFormat::Thermal3x2,
        ));
        assert_eq!(doc.file_stem(), "labels-thermal-3x2-2");
        assert_eq!(doc.title, "2 Labels (Thermal 3\" x 2\")");
    }
}
