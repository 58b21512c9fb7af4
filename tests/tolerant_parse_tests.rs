//! Tolerant keyword parsing tests

use stock_ledger::{parse_str_with_mode, process_str, InstructionKind, ParseMode, ProcessorConfig, StockErrorKind};

#[test]
fn test_tolerant_accepts_keyword_variants() {
    let input = "Set-Stock AB-6 5\nADD_STOCK AB-6 1\nORDER ON-1 AB-6 2\n";
    let result = parse_str_with_mode(input, ParseMode::Tolerant);

    let kinds: Vec<InstructionKind> = result.instructions().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![InstructionKind::SetStock, InstructionKind::AddStock, InstructionKind::Order]
    );
    assert_eq!(result.fixes.len(), 3);
}

#[test]
fn test_tolerant_records_line_numbers() {
    let input = "\nset-stock AB-6 5\n\nSET-STOCK CD-3 1\n";
    let result = parse_str_with_mode(input, ParseMode::Tolerant);

    assert_eq!(result.fixes.len(), 1);
    assert_eq!(result.fixes[0].line, 4);
    assert!(result.fixes[0].description.contains("SET-STOCK"));
}

#[test]
fn test_strict_rejects_keyword_variants() {
    let result = parse_str_with_mode("Set-Stock AB-6 5", ParseMode::Strict);

    assert_eq!(result.instructions().count(), 0);
    assert!(result.fixes.is_empty());
    let err = result.errors().next().unwrap();
    assert_eq!(err.kind, StockErrorKind::MalformedInstruction);
}

#[test]
fn test_tolerant_report_lists_fixes() {
    let report = process_str("SET-STOCK AB-6 5\n", &ProcessorConfig::tolerant());
    let text = report.render_text();

    assert!(text.contains("Parse fixes:\nline 1: Normalized keyword 'SET-STOCK' to 'set-stock'\n"));
    assert!(text.contains("AB-6 5\n"));
}

#[test]
fn test_tolerant_preserves_original_text_in_log() {
    let report = process_str("ORDER ON-1 AB-6 1\n", &ProcessorConfig::tolerant());
    assert_eq!(report.log[0].text, "ORDER ON-1 AB-6 1");
}
