//! 솔루션 파일 렉서
//!
//! [`Lexer`]는 입력 문자열을 한 번만 순회하며 [`Token`]을 하나씩 생성합니다.
//!
//! # 토큰화 규칙
//!
//! - 연속된 공백(space, tab, `\n`, `\r`)은 하나의 `Whitespace` 토큰
//! - 문자로 시작하는 연속 구간(문자, 숫자, `_`)은 키워드 또는 `Identifier`
//! - `*` `,` `(` `)` `"` `=`는 단일 문자 토큰
//! - 그 외 문자는 해당 문자를 literal로 갖는 `Unknown`
//! - 입력 끝에서는 몇 번을 호출해도 `EndOfInput`

use std::iter::Peekable;
use std::str::Chars;

use crate::token::{Token, TokenKind, lookup_keyword};

/// 솔루션 파일 렉서
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    /// 입력 문자열로 렉서를 생성합니다.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    /// 다음 토큰을 반환합니다.
    pub fn scan(&mut self) -> Token {
        let line = self.line;
        let Some(&ch) = self.chars.peek() else {
            return Token::new(TokenKind::EndOfInput, "", line);
        };

        if is_whitespace(ch) {
            return self.scan_whitespace();
        }
        if ch.is_alphabetic() {
            return self.scan_ident();
        }

        self.chars.next();
        let kind = match ch {
            '*' => TokenKind::Asterisk,
            ',' => TokenKind::Comma,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '"' => TokenKind::Quote,
            '=' => TokenKind::Equal,
            _ => TokenKind::Unknown,
        };
        Token::new(kind, ch, line)
    }

    fn scan_whitespace(&mut self) -> Token {
        let line = self.line;
        let mut buf = String::new();
        while let Some(ch) = self.chars.next_if(|c| is_whitespace(*c)) {
            if ch == '\n' {
                self.line += 1;
            }
            buf.push(ch);
        }
        Token::new(TokenKind::Whitespace, buf, line)
    }

    fn scan_ident(&mut self) -> Token {
        let line = self.line;
        let mut buf = String::new();
        while let Some(ch) = self.chars.next_if(|c| is_ident_char(*c)) {
            buf.push(ch);
        }
        let kind = lookup_keyword(&buf).unwrap_or(TokenKind::Identifier);
        Token::new(kind, buf, line)
    }
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
