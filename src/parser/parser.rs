//! Instruction Parser
//!
//! Groups lexed operands into (SKU, amount) pairs. A line that cannot be
//! grouped does not stop parsing: its error is kept in place so the
//! processor can log it and move on.

use crate::ast::{Instruction, InstructionKind, SkuAmount};
use crate::errors::{StockError, StockResult};
use crate::parser::lexer::{LexedLine, Lexer, ParseFix, ParseMode, Token};

/// Parse result: one entry per instruction line, plus tolerant-mode fixes
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub lines: Vec<ParsedLine>,
    pub fixes: Vec<ParseFix>,
}

impl ParseResult {
    /// Successfully tokenized instructions, in order
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.lines.iter().filter_map(|l| l.result.as_ref().ok())
    }

    /// Tokenizer errors, in order
    pub fn errors(&self) -> impl Iterator<Item = &StockError> {
        self.lines.iter().filter_map(|l| l.result.as_ref().err())
    }
}

/// One instruction line and its tokenize outcome
#[derive(Debug, Clone)]
pub struct ParsedLine {
    pub sequence: usize,
    pub text: String,
    pub result: StockResult<Instruction>,
}

/// Parse input string (strict mode)
pub fn parse_str(input: &str) -> ParseResult {
    parse_str_with_mode(input, ParseMode::Strict)
}

/// Parse input string with specified mode
pub fn parse_str_with_mode(input: &str, mode: ParseMode) -> ParseResult {
    let mut lexer = Lexer::with_mode(input, mode);
    let tokens = lexer.tokenize_all();

    let lines = tokens
        .into_iter()
        .filter_map(|token| match token {
            Token::Line(line) => Some(ParsedLine {
                sequence: line.sequence,
                text: line.text.clone(),
                result: parse_line(line),
            }),
            Token::Eof => None,
        })
        .collect();

    ParseResult {
        lines,
        fixes: lexer.fixes,
    }
}

/// Parse a single line outside of a document (strict mode, sequence 1)
pub fn parse_instruction(text: &str) -> StockResult<Instruction> {
    match Lexer::new(text).next_token() {
        Token::Line(line) => parse_line(line),
        Token::Eof => Err(StockError::malformed("Empty instruction")),
    }
}

/// Group one lexed line into an instruction
fn parse_line(line: LexedLine) -> StockResult<Instruction> {
    let sequence = line.sequence;
    let span = line.span;
    let context = |err: StockError| err.with_sequence(sequence).with_line(span.line);

    let kind = match line.kind {
        Some(kind) => kind,
        None => {
            let keyword = line.keyword().to_string();
            return Err(context(
                StockError::malformed(format!("Unknown instruction '{}'", keyword)).with_token(keyword),
            ));
        }
    };

    let mut operands = line.operands.into_iter();
    let reference = if kind == InstructionKind::Order {
        match operands.next() {
            Some(reference) => Some(reference),
            None => return Err(context(StockError::malformed("order is missing its reference"))),
        }
    } else {
        None
    };

    let rest: Vec<String> = operands.collect();
    if rest.is_empty() {
        return Err(context(StockError::malformed(format!(
            "{} has no SKU/amount pairs",
            kind
        ))));
    }
    if rest.len() % 2 != 0 {
        let dangling = rest.last().cloned().unwrap_or_default();
        return Err(context(
            StockError::malformed(format!(
                "{} expects SKU/amount pairs, found {} operand(s)",
                kind,
                rest.len()
            ))
            .with_token(dangling),
        ));
    }

    let items = rest
        .chunks_exact(2)
        .map(|pair| SkuAmount::new(pair[0].clone(), pair[1].clone()))
        .collect();

    Ok(Instruction {
        kind,
        reference,
        items,
        sequence,
        text: line.text,
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StockErrorKind;

    #[test]
    fn test_set_stock_pairs() {
        let ins = parse_instruction("set-stock AB-6 100 CD-3 200").unwrap();

        assert_eq!(ins.kind, InstructionKind::SetStock);
        assert_eq!(ins.reference, None);
        assert_eq!(
            ins.items,
            vec![SkuAmount::new("AB-6", "100"), SkuAmount::new("CD-3", "200")]
        );
    }

    #[test]
    fn test_order_consumes_reference() {
        let ins = parse_instruction("order ON-123 AB-6 2 CD-3 1").unwrap();

        assert_eq!(ins.kind, InstructionKind::Order);
        assert_eq!(ins.reference.as_deref(), Some("ON-123"));
        assert_eq!(ins.items.len(), 2);
        assert_eq!(ins.skus().collect::<Vec<_>>(), vec!["AB-6", "CD-3"]);
    }

    #[test]
    fn test_odd_operands_malformed() {
        let err = parse_instruction("add-stock AB-6 20 CD-3").unwrap_err();
        assert_eq!(err.kind, StockErrorKind::MalformedInstruction);
        assert_eq!(err.token.as_deref(), Some("CD-3"));

        // order reference does not count toward the pairs
        let err = parse_instruction("order ON-1 AB-6").unwrap_err();
        assert_eq!(err.kind, StockErrorKind::MalformedInstruction);
    }

    #[test]
    fn test_missing_pairs_malformed() {
        assert!(parse_instruction("set-stock").is_err());
        assert!(parse_instruction("order").is_err());
        assert!(parse_instruction("order ON-1").is_err());
    }

    #[test]
    fn test_unknown_keyword() {
        let err = parse_instruction("remove-stock AB-6 1").unwrap_err();
        assert_eq!(err.kind, StockErrorKind::MalformedInstruction);
        assert_eq!(err.token.as_deref(), Some("remove-stock"));
        assert_eq!(err.sequence, Some(1));
    }

    #[test]
    fn test_errors_kept_in_place() {
        let result = parse_str("set-stock A1 1\nbogus\nadd-stock A1 2\n");

        assert_eq!(result.lines.len(), 3);
        assert_eq!(result.instructions().count(), 2);
        let errors: Vec<_> = result.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].sequence, Some(2));
        assert_eq!(errors[0].line, Some(2));
    }

    #[test]
    fn test_empty_input() {
        let result = parse_str("");
        assert!(result.lines.is_empty());
        assert!(result.fixes.is_empty());
    }
}
