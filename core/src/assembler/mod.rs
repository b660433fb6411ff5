//! Assembler: yan85 source text to a physically-ordered byte stream, via
//! tokenize -> group-into-statements -> parse-per-statement -> link labels.

mod error;
mod link;
mod parse;
mod token;

pub use error::{AssembleError, AssembleErrorReason};
pub use token::{Token, TokenType};

use crate::config::EncodingConfig;

/// Assembles source text for one specific variant. Two variants with
/// different byte assignments or instruction order produce different bytes
/// from the same source, by design.
pub struct Assembler<'c> {
    config: &'c EncodingConfig,
}

impl<'c> Assembler<'c> {
    pub fn new(config: &'c EncodingConfig) -> Self {
        Assembler { config }
    }

    pub fn assemble(&self, source: &str) -> Result<Vec<u8>, AssembleError> {
        let tokens = token::tokenize(source);
        let statements = group_statements(&tokens);

        let mut unlinked = Vec::with_capacity(statements.len());
        let mut pending_label: Option<String> = None;
        for statement in statements {
            if statement.len() == 1 && statement[0].kind == TokenType::Label {
                pending_label = Some(statement[0].text.clone());
                continue;
            }
            let instr = parse::parse_instruction(self.config, &statement, pending_label.take())?;
            unlinked.push(instr);
        }

        link::link(self.config, unlinked)
    }
}

/// Split the flat token stream into statements, each terminated by a
/// NEWLINE/EOF boundary. Empty statements (blank runs, trailing EOF) are
/// dropped.
fn group_statements(tokens: &[Token]) -> Vec<Vec<Token>> {
    let mut statements = Vec::new();
    let mut current = Vec::new();
    for token in tokens {
        match token.kind {
            TokenType::Newline | TokenType::Eof => {
                if !current.is_empty() {
                    statements.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(token.clone()),
        }
    }
    statements
}
