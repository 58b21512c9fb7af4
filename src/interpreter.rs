//! Instruction Interpreter
//!
//! Folds parsed instruction lines over a fresh [`StockTable`], recording a
//! log entry per line, collecting hard errors, and gathering negative-stock
//! warnings.
//!
//! ## Abort model
//!
//! A run is *aborted* once any hard error is recorded. Later lines are still
//! validated and, when valid, applied so that every error surfaces in a
//! single pass, but the final stock levels of an aborted run are never
//! reported.

use crate::errors::{StockError, StockErrorKind};
use crate::parser::{parse_str_with_mode, ParseMode, ParseResult};
use crate::report::Report;
use crate::stock::{NegativeStockWarning, StockTable};
use crate::validate::{validate_instruction, SkuPolicy, ValidationConfig, DEFAULT_MAX_STOCK_LEVEL};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What happened to one instruction line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Validated and applied to the table
    Applied,
    /// Rejected as a whole, nothing applied
    Skipped { kind: StockErrorKind, reason: String },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Log entry for one instruction line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingLogEntry {
    /// Sequence number (1-indexed, counts skipped lines too)
    pub sequence: usize,
    /// Original instruction text
    pub text: String,
    pub outcome: Outcome,
}

/// Processor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Keyword matching mode
    pub parse_mode: ParseMode,
    /// Accepted SKU-ID shape
    pub sku_policy: SkuPolicy,
    /// Ceiling for set-stock / add-stock results
    pub max_stock_level: u32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::Strict,
            sku_policy: SkuPolicy::Hyphenated,
            max_stock_level: DEFAULT_MAX_STOCK_LEVEL,
        }
    }
}

impl ProcessorConfig {
    /// Exact keywords only
    pub fn strict() -> Self {
        Self {
            parse_mode: ParseMode::Strict,
            ..Self::default()
        }
    }

    /// Case-insensitive keywords
    pub fn tolerant() -> Self {
        Self {
            parse_mode: ParseMode::Tolerant,
            ..Self::default()
        }
    }

    pub fn validation(&self) -> ValidationConfig {
        ValidationConfig {
            sku_policy: self.sku_policy,
            max_stock_level: self.max_stock_level,
        }
    }
}

/// Mutable state of one run
#[derive(Debug, Default)]
struct RunState {
    table: StockTable,
    log: Vec<ProcessingLogEntry>,
    errors: Vec<StockError>,
    warnings: Vec<NegativeStockWarning>,
}

impl RunState {
    fn is_aborted(&self) -> bool {
        !self.errors.is_empty()
    }

    fn record_error(&mut self, sequence: usize, text: &str, err: StockError) {
        warn!(sequence, kind = %err.kind, "{}", err.message);
        if !self.is_aborted() {
            info!(sequence, "hard error recorded, final stock levels will be suppressed");
        }
        self.log.push(ProcessingLogEntry {
            sequence,
            text: text.to_string(),
            outcome: Outcome::Skipped {
                kind: err.kind,
                reason: err.message.clone(),
            },
        });
        self.errors.push(err);
    }
}

/// Parse and process an instruction document
pub fn process_str(input: &str, config: &ProcessorConfig) -> Report {
    let parsed = parse_str_with_mode(input, config.parse_mode);
    process(parsed, config)
}

/// Process already-parsed instruction lines
pub fn process(parsed: ParseResult, config: &ProcessorConfig) -> Report {
    let validation = config.validation();
    let mut state = RunState::default();

    for line in &parsed.lines {
        debug!(sequence = line.sequence, text = %line.text, "processing instruction");

        let instruction = match &line.result {
            Ok(instruction) => instruction,
            Err(err) => {
                state.record_error(line.sequence, &line.text, err.clone());
                continue;
            }
        };

        match validate_instruction(instruction, &state.table, &validation) {
            Ok(validated) => {
                let warnings = state.table.apply(&validated);
                for w in &warnings {
                    warn!(sequence = w.sequence, sku = %w.sku, level = w.level, "stock is negative");
                }
                state.warnings.extend(warnings);
                state.log.push(ProcessingLogEntry {
                    sequence: line.sequence,
                    text: line.text.clone(),
                    outcome: Outcome::Applied,
                });
            }
            Err(err) => state.record_error(line.sequence, &line.text, err),
        }
    }

    info!(
        instructions = state.log.len(),
        errors = state.errors.len(),
        warnings = state.warnings.len(),
        skus = state.table.len(),
        "run complete"
    );

    Report::build(state.log, state.table, state.warnings, state.errors, parsed.fixes)
}
