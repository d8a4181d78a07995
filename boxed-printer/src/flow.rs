//! Print dialog step flow
//!
//! ```text
//! Initial ──BuySupplies──▶ BuySupplies ──SkipToPrint──▶ FormatSelection ──commit──▶ Print
//!    │  ◀──────Back───────────┘                            │    ▲
//!    └──────────────────PrintLabels────────────────────────┘    │
//!    ◀─────────────────────────Back─────────────────────────────┘
//! ```
//!
//! `Print` is terminal and only reachable by committing from
//! `FormatSelection`. A rejected action leaves the flow untouched.

use crate::error::{PrintError, PrintResult};
use serde::{Deserialize, Serialize};
use shared::{Container, LabelFormat, PrintJob, QrImage};
use std::fmt;

/// Dialog step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintStep {
    #[default]
    Initial,
    BuySupplies,
    FormatSelection,
    Print,
}

impl fmt::Display for PrintStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrintStep::Initial => "initial",
            PrintStep::BuySupplies => "buy_supplies",
            PrintStep::FormatSelection => "format_selection",
            PrintStep::Print => "print",
        };
        f.write_str(name)
    }
}

/// User action in the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowAction {
    /// "Buy Label Supplies"
    BuySupplies,
    /// "Print Labels"
    PrintLabels,
    /// "Skip to Print" from the supplies list
    SkipToPrint,
    Back,
}

/// Print dialog state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintFlow {
    step: PrintStep,
    format: LabelFormat,
}

impl PrintFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> PrintStep {
        self.step
    }

    /// Currently selected format (defaults to single)
    pub fn format(&self) -> LabelFormat {
        self.format
    }

    /// Apply an action, returning the new step
    pub fn apply(&mut self, action: FlowAction) -> PrintResult<PrintStep> {
        let next = match (self.step, action) {
            (PrintStep::Initial, FlowAction::BuySupplies) => PrintStep::BuySupplies,
            (PrintStep::Initial, FlowAction::PrintLabels) => PrintStep::FormatSelection,
            (PrintStep::BuySupplies, FlowAction::SkipToPrint) => PrintStep::FormatSelection,
            (PrintStep::BuySupplies | PrintStep::FormatSelection, FlowAction::Back) => {
                PrintStep::Initial
            }
            (step, action) => {
                return Err(PrintError::InvalidTransition(format!(
                    "{:?} is not allowed at step {}",
                    action, step
                )));
            }
        };

        tracing::debug!(from = %self.step, to = %next, "Print flow transition");
        self.step = next;
        Ok(next)
    }

    /// Choose the label format; only allowed while selecting formats
    pub fn select_format(&mut self, format: LabelFormat) -> PrintResult<()> {
        if self.step != PrintStep::FormatSelection {
            return Err(PrintError::InvalidTransition(format!(
                "format can only change at step {}, current step is {}",
                PrintStep::FormatSelection,
                self.step
            )));
        }
        self.format = format;
        Ok(())
    }

    /// Commit the selection and move to `Print`.
    ///
    /// Builds the job from containers and their QR images (same order). On
    /// failure the flow stays at `FormatSelection`.
    pub fn commit(&mut self, containers: Vec<Container>, qrs: Vec<QrImage>) -> PrintResult<PrintJob> {
        if self.step != PrintStep::FormatSelection {
            return Err(PrintError::InvalidTransition(format!(
                "cannot print from step {}",
                self.step
            )));
        }
        let job = PrintJob::from_pairs(containers, qrs, self.format)?;
        self.step = PrintStep::Print;
        Ok(job)
    }
}
