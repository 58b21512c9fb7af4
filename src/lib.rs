//! # Stock Ledger
//!
//! A deterministic inventory instruction processor. Reads instruction lines,
//! validates them against SKU and stock rules, applies them to an in-memory
//! stock table, and reports the final levels.
//!
//! ## Instruction grammar
//!
//! One instruction per line, words separated by whitespace:
//!
//! ```text
//! set-stock <SKU> <level> [<SKU> <level> ...]
//! add-stock <SKU> <amount> [<SKU> <amount> ...]
//! order <reference> <SKU> <quantity> [<SKU> <quantity> ...]
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.
//!
//! ## Core APIs
//!
//! ### Process a whole document
//!
//! ```rust
//! use stock_ledger::{process_str, ProcessorConfig};
//!
//! let input = "\
//! set-stock AB-6 100 CD-3 200
//! add-stock AB-6 20 CD-3 10
//! order ON-123 AB-6 2 CD-3 1
//! ";
//!
//! let report = process_str(input, &ProcessorConfig::default());
//! assert!(report.is_success());
//! assert_eq!(report.level("AB-6"), Some(118));
//! assert_eq!(report.level("CD-3"), Some(209));
//! ```
//!
//! ### Hard errors suppress the stock report
//!
//! ```rust
//! use stock_ledger::{process_str, ProcessorConfig, StockErrorKind};
//!
//! let report = process_str("add-stock XY-9 5", &ProcessorConfig::default());
//! assert!(report.stock.is_none());
//! assert_eq!(report.errors[0].kind, StockErrorKind::UninitializedSku);
//! ```
//!
//! ### Step by step
//!
//! ```rust
//! use stock_ledger::{parse_instruction, validate_instruction, StockTable, ValidationConfig};
//!
//! let mut table = StockTable::new();
//! let ins = parse_instruction("set-stock AB-6 40").unwrap();
//! let validated = validate_instruction(&ins, &table, &ValidationConfig::default()).unwrap();
//! let warnings = table.apply(&validated);
//! assert!(warnings.is_empty());
//! assert_eq!(table.len(), 1);
//! ```
//!
//! ## SKU policies
//!
//! - [`SkuPolicy::Hyphenated`] - 2-10 chars of letters, digits and inner
//!   hyphens (`AB-6`). Default.
//! - [`SkuPolicy::Alphanumeric`] - 2-10 letters and digits only.
//!
//! ## Error kinds
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | MalformedInstruction | unknown keyword, odd operand count, non-integer amount |
//! | InvalidSkuFormat | SKU-ID does not match the policy |
//! | NegativeInputAmount | amount token is `-<digits>` |
//! | StockLevelExceedsMax | set/add result above the ceiling (10,000) |
//! | UninitializedSku | add/order on a SKU with no prior set-stock |
//!
//! Negative stock after an order is a soft warning and never suppresses
//! the report.

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod parser;
pub mod report;
pub mod stock;
pub mod validate;

// Re-exports for convenience
pub use ast::{Instruction, InstructionKind, SkuAmount, Span};
pub use errors::{StockError, StockErrorKind, StockResult};
pub use interpreter::{process, process_str, Outcome, ProcessingLogEntry, ProcessorConfig};
pub use parser::{parse_instruction, parse_str, parse_str_with_mode, ParseFix, ParseMode, ParseResult};
pub use report::{Report, StockLine};
pub use stock::{NegativeStockWarning, StockTable};
pub use validate::{
    validate_instruction, SkuId, SkuPolicy, ValidatedInstruction, ValidationConfig,
    DEFAULT_MAX_STOCK_LEVEL,
};
