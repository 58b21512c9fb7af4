//! Report Builder
//!
//! Renders the outcome of a run as plain text or JSON. The stock section
//! is only present when the run recorded no hard error.

use crate::errors::StockError;
use crate::interpreter::ProcessingLogEntry;
use crate::parser::ParseFix;
use crate::stock::{NegativeStockWarning, StockTable};
use crate::validate::SkuId;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One row of the final stock section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    pub sku: SkuId,
    pub level: i64,
}

impl StockLine {
    pub fn is_negative(&self) -> bool {
        self.level < 0
    }
}

/// Result of processing an instruction document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// One entry per instruction, in input order
    pub log: Vec<ProcessingLogEntry>,
    /// Final levels sorted by SKU-ID, `None` when the run was aborted
    pub stock: Option<Vec<StockLine>>,
    /// Soft warnings, in input order; empty when the run was aborted
    pub warnings: Vec<NegativeStockWarning>,
    /// Hard errors, in input order
    pub errors: Vec<StockError>,
    /// Keyword fixes applied in tolerant mode
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<ParseFix>,
}

impl Report {
    /// Assemble a report, suppressing stock levels and their warnings if
    /// any error occurred
    pub fn build(
        log: Vec<ProcessingLogEntry>,
        table: StockTable,
        warnings: Vec<NegativeStockWarning>,
        errors: Vec<StockError>,
        fixes: Vec<ParseFix>,
    ) -> Self {
        let stock = errors.is_empty().then(|| {
            table
                .iter()
                .map(|(sku, level)| StockLine {
                    sku: sku.clone(),
                    level,
                })
                .collect()
        });

        let warnings = if errors.is_empty() { warnings } else { Vec::new() };

        Self {
            log,
            stock,
            warnings,
            errors,
            fixes,
        }
    }

    pub fn is_aborted(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_success(&self) -> bool {
        !self.is_aborted()
    }

    /// Level of a SKU in the final section
    pub fn level(&self, sku: &str) -> Option<i64> {
        self.stock
            .as_ref()?
            .iter()
            .find(|line| line.sku.as_str() == sku)
            .map(|line| line.level)
    }

    /// Plain-text rendering
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for entry in &self.log {
            let _ = writeln!(out, "Processing instruction {}: {}", entry.sequence, entry.text);
        }

        if !self.fixes.is_empty() {
            out.push_str("\nParse fixes:\n");
            for fix in &self.fixes {
                let _ = writeln!(out, "line {}: {}", fix.line, fix.description);
            }
        }

        match &self.stock {
            Some(stock) => {
                out.push_str("\nFinal stock levels:\n");
                for line in stock {
                    let _ = write!(out, "{} {}", line.sku, line.level);
                    if line.is_negative() {
                        out.push_str(" (negative)");
                    }
                    out.push('\n');
                }
                if !self.warnings.is_empty() {
                    out.push_str("\nWarnings:\n");
                    for w in &self.warnings {
                        let _ = writeln!(
                            out,
                            "instruction {}: {} stock is negative ({})",
                            w.sequence, w.sku, w.level
                        );
                    }
                }
            }
            None => {
                out.push_str("\nErrors:\n");
                for err in &self.errors {
                    let _ = writeln!(out, "{}", err);
                }
            }
        }

        out
    }

    /// JSON rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
