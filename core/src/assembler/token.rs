//! Hand-rolled lexer for the yan85 source language. Whitespace other than
//! newlines is insignificant and simply dropped; `#` begins a line comment.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenType {
    Newline,
    Sysname,
    SquareOpen,
    SquareClose,
    Label,
    Text,
    Eof,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub text: String,
}

impl Token {
    fn new(kind: TokenType, text: impl Into<String>) -> Self {
        Token { kind, text: text.into() }
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' || c == '#' {
            let start = i;
            while i < chars.len() && (chars[i] == '\n' || chars[i] == '#') {
                if chars[i] == '#' {
                    while i < chars.len() && chars[i] != '\n' {
                        i += 1;
                    }
                    if i < chars.len() {
                        i += 1; // consume the newline ending the comment
                    }
                } else {
                    i += 1;
                }
            }
            tokens.push(Token::new(TokenType::Newline, chars[start..i].iter().collect::<String>()));
            continue;
        }

        if c == '[' {
            tokens.push(Token::new(TokenType::SquareOpen, "["));
            i += 1;
            continue;
        }
        if c == ']' {
            tokens.push(Token::new(TokenType::SquareClose, "]"));
            i += 1;
            continue;
        }

        if c == ':' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::new(TokenType::Label, chars[start..i].iter().collect::<String>()));
            continue;
        }

        if c.is_ascii_lowercase() {
            let start = i;
            let mut j = i + 1;
            while j < chars.len() && (chars[j].is_ascii_lowercase() || chars[j] == '_') {
                j += 1;
            }
            if j - start >= 2 && j + 1 < chars.len() && chars[j] == '(' && chars[j + 1] == ')' {
                let end = j + 2;
                tokens.push(Token::new(TokenType::Sysname, chars[start..end].iter().collect::<String>()));
                i = end;
                continue;
            }
            // no trailing "()": fall through and lex as plain TEXT below
        }

        if c.is_ascii_alphanumeric() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::new(TokenType::Text, chars[start..i].iter().collect::<String>()));
            continue;
        }

        // stray whitespace/punctuation: insignificant, skip it
        i += 1;
    }

    tokens.push(Token::new(TokenType::Eof, ""));
    tokens
}
