//! 솔루션 파일 토큰 정의
//!
//! 렉서가 생성하는 토큰 종류와 키워드 테이블을 정의합니다.

use std::fmt;

/// 토큰 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// 입력 끝
    EndOfInput,
    /// 연속된 공백 문자 (space, tab, newline, carriage return)
    Whitespace,
    /// 문자로 시작해 문자/숫자/`_`가 이어지는 식별자
    Identifier,
    /// `*`
    Asterisk,
    /// `,`
    Comma,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `"`
    Quote,
    /// `=`
    Equal,
    /// `Project` 키워드
    ProjectKeyword,
    /// `EndProject` 키워드
    EndProjectKeyword,
    /// 그 외 단일 문자
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EndOfInput => "end of input",
            Self::Whitespace => "whitespace",
            Self::Identifier => "identifier",
            Self::Asterisk => "'*'",
            Self::Comma => "','",
            Self::OpenParen => "'('",
            Self::CloseParen => "')'",
            Self::Quote => "'\"'",
            Self::Equal => "'='",
            Self::ProjectKeyword => "Project",
            Self::EndProjectKeyword => "EndProject",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// 키워드 테이블 (대소문자 구분 없이 매칭)
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("PROJECT", TokenKind::ProjectKeyword),
    ("ENDPROJECT", TokenKind::EndProjectKeyword),
];

/// 식별자 텍스트가 키워드이면 해당 토큰 종류를 반환합니다.
pub fn lookup_keyword(ident: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(keyword, _)| keyword.eq_ignore_ascii_case(ident))
        .map(|(_, kind)| *kind)
}

/// 렉서가 생성하는 토큰
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 토큰 종류
    pub kind: TokenKind,
    /// 원문 텍스트 (키워드/식별자는 원래 대소문자 유지)
    pub literal: String,
    /// 토큰이 시작된 줄 번호 (1부터 시작)
    pub line: usize,
}

impl Token {
    /// 새 토큰을 생성합니다.
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
        }
    }

    /// 입력 끝 토큰인지 확인합니다.
    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}
