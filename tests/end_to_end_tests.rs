//! End-to-end instruction document tests

use pretty_assertions::assert_eq;
use stock_ledger::{process_str, Outcome, ProcessorConfig, StockErrorKind};

#[test]
fn test_worked_example_sorted_report() {
    let input = r#"set-stock CD-3 200 AB-6 100
add-stock AB-6 20 CD-3 10
order ON-123 AB-6 2 CD-3 1
"#;
    let report = process_str(input, &ProcessorConfig::default());

    let stock: Vec<(String, i64)> = report
        .stock
        .unwrap()
        .into_iter()
        .map(|line| (line.sku.to_string(), line.level))
        .collect();
    assert_eq!(
        stock,
        vec![("AB-6".to_string(), 118), ("CD-3".to_string(), 209)]
    );
}

#[test]
fn test_add_stock_accumulates() {
    let input = "set-stock S1 10\nadd-stock S1 5\nadd-stock S1 5\n";
    let report = process_str(input, &ProcessorConfig::default());

    assert_eq!(report.level("S1"), Some(20));
}

#[test]
fn test_set_stock_reads_back() {
    for level in [0u32, 1, 250, 9_999, 10_000] {
        let report = process_str(&format!("set-stock AB-6 {}", level), &ProcessorConfig::default());
        assert_eq!(report.level("AB-6"), Some(i64::from(level)));
    }
}

#[test]
fn test_oversold_order_is_soft() {
    let input = "set-stock AB-6 3\norder ON-9 AB-6 10\n";
    let report = process_str(input, &ProcessorConfig::default());

    assert!(report.is_success());
    assert!(report.errors.is_empty());
    assert_eq!(report.level("AB-6"), Some(-7));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].sequence, 2);
    assert!(report.render_text().contains("AB-6 -7 (negative)"));
}

#[test]
fn test_uninitialized_sku_suppresses_report() {
    let report = process_str("add-stock XY-9 5\n", &ProcessorConfig::default());

    assert!(report.is_aborted());
    assert!(report.stock.is_none());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, StockErrorKind::UninitializedSku);
    assert!(!report.render_text().contains("Final stock levels"));
}

#[test]
fn test_order_on_uninitialized_sku() {
    let input = "set-stock AB-6 3\norder ON-1 ZZ-1 1\n";
    let report = process_str(input, &ProcessorConfig::default());

    assert!(report.stock.is_none());
    assert_eq!(report.errors[0].kind, StockErrorKind::UninitializedSku);
    assert_eq!(report.errors[0].token.as_deref(), Some("ZZ-1"));
}

#[test]
fn test_set_stock_above_ceiling() {
    let report = process_str("set-stock AB-6 10001\n", &ProcessorConfig::default());

    assert_eq!(report.errors[0].kind, StockErrorKind::StockLevelExceedsMax);
    assert!(report.stock.is_none());
}

#[test]
fn test_all_errors_reported_in_one_pass() {
    let input = r#"set-stock AB-6 5
set-stock A 5
add-stock AB-6 -2
add-stock AB-6 10000
frobnicate AB-6 1
order ON-1 QQ 1
"#;
    let report = process_str(input, &ProcessorConfig::default());

    let kinds: Vec<StockErrorKind> = report.errors.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StockErrorKind::InvalidSkuFormat,
            StockErrorKind::NegativeInputAmount,
            StockErrorKind::StockLevelExceedsMax,
            StockErrorKind::MalformedInstruction,
            StockErrorKind::UninitializedSku,
        ]
    );
    let sequences: Vec<Option<usize>> = report.errors.iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![Some(2), Some(3), Some(4), Some(5), Some(6)]);
}

#[test]
fn test_log_lines_for_every_instruction() {
    let input = "# header comment\nset-stock AB-6 5\n\nadd-stock XY-9 1\norder ON-1 AB-6 1\n";
    let report = process_str(input, &ProcessorConfig::default());
    let text = report.render_text();

    let log: Vec<&str> = text.lines().take(3).collect();
    assert_eq!(
        log,
        vec![
            "Processing instruction 1: set-stock AB-6 5",
            "Processing instruction 2: add-stock XY-9 1",
            "Processing instruction 3: order ON-1 AB-6 1",
        ]
    );
    assert_eq!(report.log[0].outcome, Outcome::Applied);
    assert!(!report.log[1].outcome.is_applied());
    // line numbers in errors refer to the file, not the sequence
    assert_eq!(report.errors[0].line, Some(4));
}

#[test]
fn test_empty_document() {
    let report = process_str("\n# nothing here\n", &ProcessorConfig::default());

    assert!(report.is_success());
    assert!(report.log.is_empty());
    assert_eq!(report.render_text(), "\nFinal stock levels:\n");
}
