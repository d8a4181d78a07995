//! Print surfaces
//!
//! A surface receives a rendered [`PrintDocument`] and makes it printable:
//! - [`FileSurface`]: writes the HTML document to a directory
//! - [`BrowserSurface`]: writes the file, then opens it in the system browser
//!   where the onload hook raises the print dialog

use crate::error::{PrintError, PrintResult};
use crate::layout::{LabelLayout, PrintDocument};
use shared::PrintJob;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, instrument, warn};

/// Where a document ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceHandle {
    pub path: PathBuf,
    /// Whether an external viewer was launched
    pub launched: bool,
}

/// Trait for print surfaces
#[allow(async_fn_in_trait)]
pub trait PrintSurface {
    /// Make the document available for printing
    async fn open(&self, document: &PrintDocument) -> PrintResult<SurfaceHandle>;
}

/// Writes documents as `<dir>/<stem>.html`
#[derive(Debug, Clone)]
pub struct FileSurface {
    dir: PathBuf,
}

impl FileSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write(&self, document: &PrintDocument) -> PrintResult<PathBuf> {
        match tokio::fs::metadata(&self.dir).await {
            Ok(meta) if meta.is_dir() => {}
            _ => {
                return Err(PrintError::SurfaceUnavailable(format!(
                    "output directory {} does not exist",
                    self.dir.display()
                )));
            }
        }

        let path = self.dir.join(format!("{}.html", document.file_stem()));
        tokio::fs::write(&path, document.html.as_bytes()).await?;
        Ok(path)
    }
}

impl PrintSurface for FileSurface {
    #[instrument(skip(self, document), fields(dir = %self.dir.display(), cells = document.cell_count))]
    async fn open(&self, document: &PrintDocument) -> PrintResult<SurfaceHandle> {
        let path = self.write(document).await?;
        info!(path = %path.display(), "Label document written");
        Ok(SurfaceHandle {
            path,
            launched: false,
        })
    }
}

/// Opens documents in the system browser
#[derive(Debug, Clone)]
pub struct BrowserSurface {
    file: FileSurface,
    program: String,
    args: Vec<String>,
}

impl BrowserSurface {
    /// Browser surface using the platform opener
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let (program, args) = platform_opener();
        Self {
            file: FileSurface::new(dir),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Use a specific program; the document path is appended to `args`
    pub fn with_opener(mut self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.program = program.into();
        self.args = args;
        self
    }
}

impl PrintSurface for BrowserSurface {
    #[instrument(skip(self, document), fields(opener = %self.program, cells = document.cell_count))]
    async fn open(&self, document: &PrintDocument) -> PrintResult<SurfaceHandle> {
        let path = self.file.write(document).await?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .status()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to launch browser");
                PrintError::SurfaceUnavailable(format!("{}: {}", self.program, e))
            })?;

        if !status.success() {
            warn!(%status, "Browser opener exited with failure");
            return Err(PrintError::SurfaceUnavailable(format!(
                "{} exited with {}",
                self.program, status
            )));
        }

        info!(path = %path.display(), "Label document opened in browser");
        Ok(SurfaceHandle {
            path,
            launched: true,
        })
    }
}

fn platform_opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(windows) {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Render a job and hand it to a surface
pub async fn dispatch<S: PrintSurface>(job: &PrintJob, surface: &S) -> PrintResult<SurfaceHandle> {
    let document = LabelLayout::render(job);
    surface.open(&document).await
}
