//! Stock Table and Applicator
//!
//! In-memory stock levels for one run. Only validated instructions are
//! applied, so application itself cannot fail.

use crate::ast::InstructionKind;
use crate::validate::{SkuId, ValidatedInstruction};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Soft warning: an order left a SKU below zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativeStockWarning {
    /// Instruction sequence number (1-indexed)
    pub sequence: usize,
    pub sku: SkuId,
    /// Level after the order was applied
    pub level: i64,
}

/// SKU-ID to stock level, iterated in SKU order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockTable {
    levels: BTreeMap<SkuId, i64>,
}

impl StockTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sku: &SkuId) -> Option<i64> {
        self.levels.get(sku).copied()
    }

    pub fn contains(&self, sku: &SkuId) -> bool {
        self.levels.contains_key(sku)
    }

    pub fn set(&mut self, sku: SkuId, level: i64) {
        self.levels.insert(sku, level);
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Entries sorted by SKU-ID
    pub fn iter(&self) -> impl Iterator<Item = (&SkuId, i64)> {
        self.levels.iter().map(|(sku, level)| (sku, *level))
    }

    /// Apply a validated instruction, returning warnings for SKUs an order
    /// left negative (one per SKU, with its final level)
    pub fn apply(&mut self, instruction: &ValidatedInstruction) -> Vec<NegativeStockWarning> {
        for (sku, amount) in &instruction.items {
            let amount = i64::from(*amount);
            match instruction.kind {
                InstructionKind::SetStock => {
                    self.levels.insert(sku.clone(), amount);
                }
                InstructionKind::AddStock => {
                    *self.levels.entry(sku.clone()).or_insert(0) += amount;
                }
                InstructionKind::Order => {
                    let level = self.levels.entry(sku.clone()).or_insert(0);
                    *level = level.saturating_sub(amount);
                }
            }
        }

        if instruction.kind != InstructionKind::Order {
            return Vec::new();
        }

        let mut warnings: Vec<NegativeStockWarning> = Vec::new();
        for (sku, _) in &instruction.items {
            if warnings.iter().any(|w| &w.sku == sku) {
                continue;
            }
            match self.get(sku) {
                Some(level) if level < 0 => warnings.push(NegativeStockWarning {
                    sequence: instruction.sequence,
                    sku: sku.clone(),
                    level,
                }),
                _ => {}
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_instruction;
    use crate::validate::{validate_instruction, ValidationConfig};

    fn run(table: &mut StockTable, line: &str) -> Vec<NegativeStockWarning> {
        let ins = parse_instruction(line).unwrap();
        let validated = validate_instruction(&ins, table, &ValidationConfig::default()).unwrap();
        table.apply(&validated)
    }

    fn level(table: &StockTable, sku: &str) -> Option<i64> {
        table.get(&SkuId::parse(sku, Default::default()).unwrap())
    }

    #[test]
    fn test_set_then_read() {
        for l in [0, 1, 4_999, 10_000] {
            let mut table = StockTable::new();
            run(&mut table, &format!("set-stock AB-6 {}", l));
            assert_eq!(level(&table, "AB-6"), Some(l));
        }
    }

    #[test]
    fn test_set_overwrites() {
        let mut table = StockTable::new();
        run(&mut table, "set-stock AB-6 50");
        run(&mut table, "set-stock AB-6 7");
        assert_eq!(level(&table, "AB-6"), Some(7));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_add_accumulates() {
        let mut table = StockTable::new();
        run(&mut table, "set-stock S1 10");
        run(&mut table, "add-stock S1 5");
        run(&mut table, "add-stock S1 5");
        assert_eq!(level(&table, "S1"), Some(20));
    }

    #[test]
    fn test_order_goes_negative_with_warning() {
        let mut table = StockTable::new();
        run(&mut table, "set-stock AB-6 3 CD-3 10");
        let warnings = run(&mut table, "order ON-1 AB-6 5 CD-3 1");

        assert_eq!(level(&table, "AB-6"), Some(-2));
        assert_eq!(level(&table, "CD-3"), Some(9));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].sku.as_str(), "AB-6");
        assert_eq!(warnings[0].level, -2);
        assert_eq!(warnings[0].sequence, 1);
    }

    #[test]
    fn test_repeated_sku_warns_once() {
        let mut table = StockTable::new();
        run(&mut table, "set-stock AB-6 1");
        let warnings = run(&mut table, "order ON-1 AB-6 2 AB-6 2");

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, -3);
    }

    #[test]
    fn test_iter_sorted() {
        let mut table = StockTable::new();
        run(&mut table, "set-stock ZZ 1 AA 2 MM 3");
        let skus: Vec<&str> = table.iter().map(|(sku, _)| sku.as_str()).collect();
        assert_eq!(skus, vec!["AA", "MM", "ZZ"]);
    }
}
