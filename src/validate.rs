//! Instruction Validator
//!
//! Validates tokenized instructions against the SKU policy, amount rules,
//! the stock ceiling, and the current stock table.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. SKU-ID format for every referenced SKU
//! 2. every amount is a non-negative integer
//! 3. set-stock / add-stock resulting level within the maximum
//! 4. add-stock / order SKUs already initialized
//!
//! An instruction either validates as a whole or not at all, so a
//! multi-SKU line is never partially applied.

use crate::ast::{Instruction, InstructionKind, SkuAmount};
use crate::errors::{StockError, StockResult};
use crate::stock::StockTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Default ceiling for set-stock / add-stock levels
pub const DEFAULT_MAX_STOCK_LEVEL: u32 = 10_000;

static HYPHENATED_SKU_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,8}[A-Za-z0-9])$").expect("Invalid regex")
});

static ALPHANUMERIC_SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{2,10}$").expect("Invalid regex"));

/// Accepted SKU-ID shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkuPolicy {
    /// 2-10 chars of `[A-Za-z0-9-]`, first and last alphanumeric (`AB-6`)
    #[default]
    Hyphenated,
    /// 2-10 alphanumeric chars only
    Alphanumeric,
}

impl SkuPolicy {
    pub fn is_match(&self, sku: &str) -> bool {
        match self {
            SkuPolicy::Hyphenated => HYPHENATED_SKU_RE.is_match(sku),
            SkuPolicy::Alphanumeric => ALPHANUMERIC_SKU_RE.is_match(sku),
        }
    }
}

/// A SKU-ID that passed the policy check
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuId(String);

impl SkuId {
    pub fn parse(raw: &str, policy: SkuPolicy) -> StockResult<Self> {
        if policy.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(StockError::invalid_sku(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub sku_policy: SkuPolicy,
    pub max_stock_level: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sku_policy: SkuPolicy::default(),
            max_stock_level: DEFAULT_MAX_STOCK_LEVEL,
        }
    }
}

/// Instruction with typed SKUs and amounts, safe to apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedInstruction {
    pub kind: InstructionKind,
    pub reference: Option<String>,
    pub items: Vec<(SkuId, u32)>,
    pub sequence: usize,
    pub text: String,
}

/// Validate an instruction against the current table
pub fn validate_instruction(
    instruction: &Instruction,
    table: &StockTable,
    config: &ValidationConfig,
) -> StockResult<ValidatedInstruction> {
    let context = |err: StockError| {
        err.with_sequence(instruction.sequence)
            .with_line(instruction.span.line)
    };

    // Rule 1: SKU format
    let skus = instruction
        .items
        .iter()
        .map(|item| SkuId::parse(&item.sku, config.sku_policy))
        .collect::<StockResult<Vec<_>>>()
        .map_err(context)?;

    // Rule 2: amounts
    let amounts = instruction
        .items
        .iter()
        .map(|item| parse_amount(instruction.kind, item, config.max_stock_level))
        .collect::<StockResult<Vec<_>>>()
        .map_err(context)?;

    let items: Vec<(SkuId, u32)> = skus.into_iter().zip(amounts).collect();

    // Rule 3: ceiling on resulting level
    if instruction.kind.is_bounded() {
        check_resulting_levels(instruction.kind, &items, table, config.max_stock_level)
            .map_err(context)?;
    }

    // Rule 4: prior set-stock
    if instruction.kind.requires_existing_sku() {
        if let Some((sku, _)) = items.iter().find(|(sku, _)| !table.contains(sku)) {
            return Err(context(StockError::uninitialized(sku.as_str())));
        }
    }

    Ok(ValidatedInstruction {
        kind: instruction.kind,
        reference: instruction.reference.clone(),
        items,
        sequence: instruction.sequence,
        text: instruction.text.clone(),
    })
}

/// Parse a non-negative integer amount token
fn parse_amount(kind: InstructionKind, item: &SkuAmount, max: u32) -> StockResult<u32> {
    let token = item.amount.as_str();

    if let Some(digits) = token.strip_prefix('-') {
        if is_digits(digits) {
            return Err(StockError::negative_amount(&item.sku, token));
        }
    }

    if !is_digits(token) {
        return Err(StockError::malformed(format!(
            "Amount '{}' for SKU {} is not an integer",
            token, item.sku
        ))
        .with_token(token));
    }

    token.parse::<u32>().map_err(|_| {
        if kind.is_bounded() {
            StockError::exceeds_max(&item.sku, token, token, max)
        } else {
            StockError::malformed(format!("Quantity {} for SKU {} is out of range", token, item.sku))
                .with_token(token)
        }
    })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Simulate the line against the table and reject any level above `max`
fn check_resulting_levels(
    kind: InstructionKind,
    items: &[(SkuId, u32)],
    table: &StockTable,
    max: u32,
) -> StockResult<()> {
    let mut pending: BTreeMap<&SkuId, i64> = BTreeMap::new();

    for (sku, amount) in items {
        let level = match kind {
            InstructionKind::SetStock => i64::from(*amount),
            _ => {
                let current = pending
                    .get(sku)
                    .copied()
                    .or_else(|| table.get(sku))
                    .unwrap_or(0);
                current + i64::from(*amount)
            }
        };
        if level > i64::from(max) {
            return Err(StockError::exceeds_max(sku.as_str(), &amount.to_string(), level, max));
        }
        pending.insert(sku, level);
    }

    Ok(())
}
