//! Instruction Lexer
//!
//! Splits input into instruction lines and whitespace-separated words,
//! resolving the leading keyword according to the parse mode.

use crate::ast::{InstructionKind, Span};
use serde::{Deserialize, Serialize};

/// Token types produced by lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// One instruction line
    Line(LexedLine),
    /// End of input
    Eof,
}

/// An instruction line split into words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexedLine {
    /// Sequence number among instruction lines (1-indexed)
    pub sequence: usize,
    /// Trimmed line text
    pub text: String,
    /// Resolved keyword, `None` if unrecognized
    pub kind: Option<InstructionKind>,
    /// Words after the keyword
    pub operands: Vec<String>,
    pub span: Span,
}

impl LexedLine {
    /// Raw first word as written
    pub fn keyword(&self) -> &str {
        self.text.split_whitespace().next().unwrap_or("")
    }
}

/// Parser mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParseMode {
    /// Keywords must be lowercase and hyphenated exactly
    #[default]
    Strict,
    /// Accept any case and `_` for `-` in keywords, record fixes
    Tolerant,
}

/// Keyword fix recorded in tolerant mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFix {
    pub line: usize,
    pub description: String,
}

/// Lexer state
pub struct Lexer<'a> {
    /// Lines split from input
    lines: Vec<&'a str>,
    /// Current line index (0-based)
    line_idx: usize,
    /// Instruction lines emitted so far
    sequence: usize,
    mode: ParseMode,
    /// Fixes applied in tolerant mode
    pub fixes: Vec<ParseFix>,
}

impl<'a> Lexer<'a> {
    /// Create new lexer from input string (strict mode)
    pub fn new(input: &'a str) -> Self {
        Self::with_mode(input, ParseMode::Strict)
    }

    /// Create new lexer with specified mode
    pub fn with_mode(input: &'a str, mode: ParseMode) -> Self {
        Self {
            lines: input.lines().collect(),
            line_idx: 0,
            sequence: 0,
            mode,
            fixes: Vec::new(),
        }
    }

    /// Check if at end of input
    pub fn is_eof(&self) -> bool {
        self.line_idx >= self.lines.len()
    }

    /// Blank lines and `#` comments carry no instruction
    fn is_ignorable(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#')
    }

    /// Resolve keyword based on current mode
    fn resolve_keyword(&mut self, word: &str, line_num: usize) -> Option<InstructionKind> {
        match self.mode {
            ParseMode::Strict => InstructionKind::from_keyword(word),
            ParseMode::Tolerant => {
                let kind = InstructionKind::from_keyword_loose(word)?;
                if word != kind.as_str() {
                    self.fixes.push(ParseFix {
                        line: line_num,
                        description: format!(
                            "Normalized keyword '{}' to '{}'",
                            word,
                            kind.as_str()
                        ),
                    });
                }
                Some(kind)
            }
        }
    }

    /// Get next token
    pub fn next_token(&mut self) -> Token {
        while !self.is_eof() {
            let line = self.lines[self.line_idx];
            let line_num = self.line_idx + 1;
            self.line_idx += 1;

            if Self::is_ignorable(line) {
                continue;
            }

            self.sequence += 1;
            let mut words = line.split_whitespace();
            let kind = match words.next() {
                Some(word) => self.resolve_keyword(word, line_num),
                None => None,
            };

            return Token::Line(LexedLine {
                sequence: self.sequence,
                text: line.trim().to_string(),
                kind,
                operands: words.map(str::to_string).collect(),
                span: Span::new(line_num),
            });
        }
        Token::Eof
    }

    /// Tokenize entire input into token vector
    pub fn tokenize_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = matches!(token, Token::Eof);
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }
}
