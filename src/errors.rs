//! Stock Ledger Error Types
//!
//! Unified error handling across tokenize, validate, and apply phases.
//! Every variant here is a hard error: a single one suppresses the final
//! stock report.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error kind categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockErrorKind {
    /// Unknown instruction keyword or inconsistent token grouping
    MalformedInstruction,
    /// SKU-ID does not match the active SKU policy
    InvalidSkuFormat,
    /// Amount token is a negative integer
    NegativeInputAmount,
    /// SetStock/AddStock would leave a level above the configured maximum
    StockLevelExceedsMax,
    /// AddStock/Order references a SKU with no prior SetStock
    UninitializedSku,
}

impl StockErrorKind {
    /// Stable name used in rendered reports
    pub fn as_str(&self) -> &'static str {
        match self {
            StockErrorKind::MalformedInstruction => "MalformedInstruction",
            StockErrorKind::InvalidSkuFormat => "InvalidSkuFormat",
            StockErrorKind::NegativeInputAmount => "NegativeInputAmount",
            StockErrorKind::StockLevelExceedsMax => "StockLevelExceedsMax",
            StockErrorKind::UninitializedSku => "UninitializedSku",
        }
    }
}

impl fmt::Display for StockErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock ledger error with instruction context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("[{kind}] {message}{}", sequence_suffix(.sequence))]
pub struct StockError {
    /// Error category
    pub kind: StockErrorKind,
    /// Human-readable message
    pub message: String,
    /// Offending token or value
    pub token: Option<String>,
    /// Instruction sequence number (1-indexed)
    pub sequence: Option<usize>,
    /// Source line in the input file (1-indexed)
    pub line: Option<usize>,
}

impl StockError {
    /// Create a new error
    pub fn new(kind: StockErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            token: None,
            sequence: None,
            line: None,
        }
    }

    /// Attach the offending token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach the instruction sequence number
    pub fn with_sequence(mut self, sequence: usize) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Attach the source line
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    // --- Convenience constructors ---

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::new(StockErrorKind::MalformedInstruction, msg)
    }

    pub fn invalid_sku(sku: &str) -> Self {
        Self::new(
            StockErrorKind::InvalidSkuFormat,
            format!("Invalid SKU-ID '{}'", sku),
        )
        .with_token(sku)
    }

    pub fn negative_amount(sku: &str, amount: &str) -> Self {
        Self::new(
            StockErrorKind::NegativeInputAmount,
            format!("Negative amount {} for SKU {}", amount, sku),
        )
        .with_token(amount)
    }

    pub fn exceeds_max(sku: &str, amount: &str, level: impl fmt::Display, max: u32) -> Self {
        Self::new(
            StockErrorKind::StockLevelExceedsMax,
            format!("Stock level {} for SKU {} exceeds maximum of {}", level, sku, max),
        )
        .with_token(amount)
    }

    pub fn uninitialized(sku: &str) -> Self {
        Self::new(
            StockErrorKind::UninitializedSku,
            format!("SKU {} has no prior set-stock", sku),
        )
        .with_token(sku)
    }
}

fn sequence_suffix(sequence: &Option<usize>) -> String {
    match sequence {
        Some(n) => format!(" (instruction {})", n),
        None => String::new(),
    }
}

/// Result type alias for ledger operations
pub type StockResult<T> = Result<T, StockError>;
