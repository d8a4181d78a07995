//! Label print job

use super::container::Container;
use super::label_format::LabelFormat;
use crate::error::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};

/// Encoded QR image ready to embed in markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrImage {
    /// `data:` URI (or any URL the print surface can load)
    pub src: String,
    /// Rendered width in pixels
    pub width_px: u32,
}

impl QrImage {
    pub fn new(src: impl Into<String>, width_px: u32) -> Self {
        Self {
            src: src.into(),
            width_px,
        }
    }
}

/// One container paired with its QR image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintEntry {
    pub container: Container,
    pub qr: QrImage,
}

/// Containers selected for one print action, in print order.
///
/// Never persisted: built when the print flow commits and dropped once the
/// document has been handed to a print surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    entries: Vec<PrintEntry>,
    format: LabelFormat,
}

impl PrintJob {
    /// Build a job; fails when `entries` is empty
    pub fn new(entries: Vec<PrintEntry>, format: LabelFormat) -> AppResult<Self> {
        if entries.is_empty() {
            return Err(AppError::new(ErrorCode::PrintJobEmpty));
        }
        Ok(Self { entries, format })
    }

    /// Pair containers with QR images positionally
    pub fn from_pairs(
        containers: Vec<Container>,
        qrs: Vec<QrImage>,
        format: LabelFormat,
    ) -> AppResult<Self> {
        if containers.len() != qrs.len() {
            return Err(AppError::invalid_request(format!(
                "{} containers but {} QR images",
                containers.len(),
                qrs.len()
            )));
        }
        let entries = containers
            .into_iter()
            .zip(qrs)
            .map(|(container, qr)| PrintEntry { container, qr })
            .collect();
        Self::new(entries, format)
    }

    pub fn entries(&self) -> &[PrintEntry] {
        &self.entries
    }

    pub fn format(&self) -> LabelFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed job
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Physical pages the job will occupy when printed
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(self.format.labels_per_page())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> PrintEntry {
        PrintEntry {
            container: Container::named(name, name),
            qr: QrImage::new("data:image/png;base64,AA==", 300),
        }
    }

    #[test]
    fn test_empty_job_rejected() {
        let err = PrintJob::new(Vec::new(), LabelFormat::Single).unwrap_err();
        assert_eq!(err.code, ErrorCode::PrintJobEmpty);
    }

    #[test]
    fn test_page_count() {
        let entries: Vec<_> = (0..13).map(|i| entry(&i.to_string())).collect();
        let job = PrintJob::new(entries.clone(), LabelFormat::Avery22806).unwrap();
        assert_eq!(job.page_count(), 2);
        let job = PrintJob::new(entries, LabelFormat::Thermal3x2).unwrap();
        assert_eq!(job.page_count(), 13);
    }

    #[test]
    fn test_from_pairs_length_mismatch() {
        let err = PrintJob::from_pairs(
            vec![Container::named("a", "A")],
            Vec::new(),
            LabelFormat::Single,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }
}
