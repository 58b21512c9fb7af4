//! Instruction Parser Module
//!
//! Line lexing and tokenizing of inventory instructions.

pub mod lexer;
pub mod parser;

pub use lexer::{Lexer, LexedLine, Token, ParseMode, ParseFix};
pub use parser::{parse_str, parse_str_with_mode, parse_instruction, ParseResult, ParsedLine};
