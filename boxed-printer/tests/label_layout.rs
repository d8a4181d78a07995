// boxed-printer/tests/label_layout.rs
// End-to-end label document scenarios

use boxed_printer::{
    FileSurface, LabelLayout, PngQrEncoder, PrintSurface, acquire_qr_images, dispatch,
};
use shared::{Container, LabelFormat, PrintJob, QrImage, TubVariant};
use std::sync::Arc;
use tempfile::TempDir;

fn placeholder_qr() -> QrImage {
    QrImage::new("data:image/png;base64,iVBORw0KGgo=", 300)
}

fn job_of(containers: Vec<Container>, format: LabelFormat) -> PrintJob {
    let qrs = containers.iter().map(|_| placeholder_qr()).collect();
    PrintJob::from_pairs(containers, qrs, format).unwrap()
}

fn garage_tools() -> Container {
    Container::named("abc12345", "Garage Tools").with_icon(TubVariant::Bin)
}

#[test]
fn test_single_label_garage_tools() {
    let doc = LabelLayout::render(&job_of(vec![garage_tools()], LabelFormat::Single));
    let html = &doc.html;

    assert_eq!(doc.cell_count, 1);
    assert_eq!(html.matches("class=\"label\"").count(), 1);
    assert!(html.contains(">Garage Tools<"));
    assert!(html.contains(">STORAGE BIN<"));
    assert!(html.contains(">abc12345<"));
    assert!(html.contains("class=\"label-qr\""));
    assert!(html.contains("window.onload = function() { window.print(); };"));
    // Free card
    assert!(html.contains("width: 300px;"));
    assert!(html.contains("border: 2px solid #000;"));
    assert!(html.contains("border-radius: 12px;"));
}

#[test]
fn test_thirteen_containers_on_square_sheet() {
    let containers: Vec<_> = (0..13)
        .map(|i| Container::named(format!("id-{:02}-xyz", i), format!("Tub {:02}", i)))
        .collect();
    let doc = LabelLayout::render(&job_of(containers, LabelFormat::Avery22806));
    let html = &doc.html;

    assert_eq!(doc.cell_count, 13);
    assert_eq!(html.matches("class=\"label\"").count(), 13);
    assert_eq!(html.matches("class=\"sheet\"").count(), 1);
    assert!(!html.contains("class=\"page\""));

    // Input order is kept
    let positions: Vec<_> = (0..13)
        .map(|i| html.find(&format!(">Tub {:02}<", i)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(html.contains("data-cell=\"12\""));
}

#[test]
fn test_every_format_renders_one_cell() {
    for format in LabelFormat::ALL {
        let doc = LabelLayout::render(&job_of(vec![garage_tools()], format));
        assert_eq!(doc.cell_count, 1, "{}", format);
        assert_eq!(doc.html.matches("class=\"label\"").count(), 1, "{}", format);
        assert_eq!(doc.html.matches("class=\"label-qr\"").count(), 1, "{}", format);
        assert!(doc.html.contains("Garage Tools"), "{}", format);
        assert!(doc.html.contains(&format!("class=\"format-{}\"", format.id())));
    }
}

#[test]
fn test_square_sheet_measurements() {
    let css = LabelLayout::stylesheet(LabelFormat::Avery22806);
    assert!(css.contains("width: 2in;"));
    assert!(css.contains("height: 2in;"));
    assert!(css.contains("column-gap: 0.6in;"));
    assert!(css.contains("row-gap: 0.6in;"));
    assert!(css.contains("size: 8.5in 11in;"));
}

#[test]
fn test_address_sheet_measurements() {
    let css = LabelLayout::stylesheet(LabelFormat::Avery5160);
    assert!(css.contains("width: 2.625in;"));
    assert!(css.contains("height: 1in;"));
    assert!(css.contains("column-gap: 0.12in;"));
    assert!(css.contains("row-gap: 0in;"));
}

#[test]
fn test_address_label_short_id() {
    let doc = LabelLayout::render(&job_of(vec![garage_tools()], LabelFormat::Avery5160));
    assert!(doc.html.contains(">abc123<"));
    assert!(!doc.html.contains(">abc12345<"));
}

#[test]
fn test_missing_description_and_icon() {
    let bare = Container::named("ffff0000", "Bare");
    let doc = LabelLayout::render(&job_of(vec![bare], LabelFormat::Single));
    assert!(doc.html.contains("data-variant=\"other\""));
    assert!(doc.html.contains(">CONTAINER<"));
    assert!(doc.html.contains("<div class=\"label-description\"></div>"));
}

#[test]
fn test_long_name_is_truncated_with_ellipsis() {
    let long = "A very long container name that cannot possibly fit on one label line";
    for format in LabelFormat::ALL {
        let doc = LabelLayout::render(&job_of(vec![Container::named("x", long)], format));
        assert!(doc.html.contains("text-overflow: ellipsis;"));
        assert!(doc.html.contains("white-space: nowrap;"));
        // Full name kept for hover and assistive tech
        assert!(doc.html.contains(&format!("title=\"{}\"", long)));
    }
}

#[test]
fn test_thermal_one_label_per_page() {
    let containers = vec![garage_tools(), Container::named("b", "Camping Gear")];
    let doc = LabelLayout::render(&job_of(containers, LabelFormat::Thermal4x6));
    assert_eq!(doc.html.matches("class=\"page\"").count(), 2);
    assert!(doc.html.contains("size: 4in 6in;"));
}

#[test]
fn test_last_thermal_page_has_no_trailing_break() {
    let containers = vec![garage_tools(), Container::named("b", "Camping Gear")];
    let doc = LabelLayout::render(&job_of(containers, LabelFormat::Thermal3x2));
    let html = &doc.html;

    assert!(html.contains(".page:last-child {\n  break-after: auto;"));
    // Last page closes right before the body, so `:last-child` applies
    let body = &html[html.find("<body").unwrap()..];
    assert!(!body.contains("<script"));
    assert!(body.ends_with("</div>\n</div>\n</body>\n</html>\n"));
    assert!(html.find("<script>").unwrap() < html.find("</head>").unwrap());
}

#[tokio::test]
async fn test_encode_render_and_write() {
    let containers = vec![
        garage_tools().with_color("#ff0055"),
        Container::named("def67890", "Winter Clothes").with_color("#ffffff"),
    ];
    let qrs = acquire_qr_images(Arc::new(PngQrEncoder), &containers)
        .await
        .unwrap();
    assert_eq!(qrs.len(), 2);

    let job = PrintJob::from_pairs(containers, qrs, LabelFormat::Avery22806).unwrap();
    let temp_dir = TempDir::new().unwrap();
    let surface = FileSurface::new(temp_dir.path());
    let handle = dispatch(&job, &surface).await.unwrap();

    assert!(!handle.launched);
    assert_eq!(handle.path.file_name().unwrap(), "labels-22806-2.html");
    let written = std::fs::read_to_string(&handle.path).unwrap();
    assert_eq!(written.matches("data:image/png;base64,").count(), 2);
}

#[tokio::test]
async fn test_file_surface_overwrites_same_stem() {
    let temp_dir = TempDir::new().unwrap();
    let surface = FileSurface::new(temp_dir.path());
    let doc = LabelLayout::render(&job_of(vec![garage_tools()], LabelFormat::Single));

    let first = surface.open(&doc).await.unwrap();
    let second = surface.open(&doc).await.unwrap();
    assert_eq!(first.path, second.path);
}
