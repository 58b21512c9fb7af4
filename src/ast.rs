//! Instruction Syntax Tree
//!
//! Core data structures for tokenized inventory instructions and their
//! source locations. Nothing here is validated yet: SKU and amount tokens
//! are kept exactly as written so the validator can report them verbatim.

use serde::{Deserialize, Serialize};

/// Source location for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Line in the input file (1-indexed)
    pub line: usize,
}

impl Span {
    pub fn new(line: usize) -> Self {
        Self { line }
    }
}

/// Instruction keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionKind {
    /// `set-stock` - creates or overwrites stock levels
    SetStock,
    /// `add-stock` - adds to existing stock levels
    AddStock,
    /// `order` - subtracts ordered quantities, may go negative
    Order,
}

impl InstructionKind {
    /// Parse keyword exactly as written (strict mode)
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "set-stock" => Some(InstructionKind::SetStock),
            "add-stock" => Some(InstructionKind::AddStock),
            "order" => Some(InstructionKind::Order),
            _ => None,
        }
    }

    /// Parse keyword ignoring case and accepting `_` for `-`
    pub fn from_keyword_loose(s: &str) -> Option<Self> {
        Self::from_keyword(&s.to_ascii_lowercase().replace('_', "-"))
    }

    /// Get canonical keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructionKind::SetStock => "set-stock",
            InstructionKind::AddStock => "add-stock",
            InstructionKind::Order => "order",
        }
    }

    /// Whether the instruction may only touch SKUs already in the table
    pub fn requires_existing_sku(&self) -> bool {
        matches!(self, InstructionKind::AddStock | InstructionKind::Order)
    }

    /// Whether the resulting level is bounded by the stock maximum
    pub fn is_bounded(&self) -> bool {
        matches!(self, InstructionKind::SetStock | InstructionKind::AddStock)
    }
}

impl std::fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A raw (SKU, amount) token pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuAmount {
    pub sku: String,
    pub amount: String,
}

impl SkuAmount {
    pub fn new(sku: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            amount: amount.into(),
        }
    }
}

/// A single tokenized instruction line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Instruction keyword
    pub kind: InstructionKind,
    /// Order reference (only for `order`)
    pub reference: Option<String>,
    /// SKU/amount pairs in line order
    pub items: Vec<SkuAmount>,
    /// Sequence number among instructions (1-indexed)
    pub sequence: usize,
    /// Original line text, trimmed
    pub text: String,
    /// Source location
    pub span: Span,
}

impl Instruction {
    /// SKU tokens in line order
    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.sku.as_str())
    }
}
