//! 솔루션 파일 파서 -- 재귀 하강 방식
//!
//! [`SolutionParser`]는 [`Lexer`]가 생성한 토큰을 읽어 `Project` 레코드마다
//! [`ProjectDescriptor`]를 하나씩 생성합니다.
//!
//! # 문법
//!
//! ```text
//! Project        := "Project" "(" String ")" "=" String "," String "," String
//!                   ProjectSection* "EndProject"
//! String         := '"' <토큰들> '"' | <단일 토큰>
//! ProjectSection := "ProjectSection" ... "EndProjectSection"
//! ```
//!
//! 최상위에서는 `Project` 키워드와 입력 끝만 의미가 있으며,
//! 나머지 토큰(헤더, `Global` 섹션 등)은 무시합니다.

use serde::Serialize;
use tracing::debug;

use crate::error::SolutionError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// 프로젝트 레코드 안에서 건너뛰는 섹션 시작/끝 식별자
const SECTION_START: &str = "ProjectSection";
const SECTION_END: &str = "EndProjectSection";

/// 솔루션에 포함된 프로젝트 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    /// 프로젝트 타입 GUID
    pub type_guid: String,
    /// 프로젝트 이름
    pub name: String,
    /// 솔루션 디렉토리 기준 상대 경로 (플랫폼 구분자로 정규화됨)
    pub relative_path: String,
    /// 프로젝트 GUID
    pub project_id: String,
}

impl ProjectDescriptor {
    /// 상대 경로가 주어진 확장자로 끝나는지 확인합니다 (대소문자 무시).
    pub fn has_extension(&self, extension: &str) -> bool {
        let path = self.relative_path.as_bytes();
        let ext = extension.as_bytes();
        path.len() >= ext.len() && path[path.len() - ext.len()..].eq_ignore_ascii_case(ext)
    }
}

/// 솔루션 파일 파서
///
/// 한 토큰 크기의 되돌리기 버퍼를 가집니다.
pub struct SolutionParser<'a> {
    lexer: Lexer<'a>,
    buffered: Option<Token>,
}

impl<'a> SolutionParser<'a> {
    /// 솔루션 파일 내용으로 파서를 생성합니다.
    pub fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            buffered: None,
        }
    }

    /// 입력 전체를 파싱하여 프로젝트 목록을 소스 순서대로 반환합니다.
    ///
    /// # Errors
    ///
    /// 잘못된 `Project` 레코드를 만나면 즉시 에러를 반환합니다.
    pub fn parse(&mut self) -> Result<Vec<ProjectDescriptor>, SolutionError> {
        let mut projects = Vec::new();
        loop {
            let token = self.scan_ignore_whitespace();
            match token.kind {
                TokenKind::EndOfInput => break,
                TokenKind::ProjectKeyword => {
                    let project = self.parse_project()?;
                    debug!(
                        name = %project.name,
                        path = %project.relative_path,
                        line = token.line,
                        "parsed project record"
                    );
                    projects.push(project);
                }
                _ => {}
            }
        }
        Ok(projects)
    }

    /// `Project` 키워드 다음부터 `EndProject`까지 파싱합니다.
    fn parse_project(&mut self) -> Result<ProjectDescriptor, SolutionError> {
        self.expect(&[TokenKind::OpenParen])?;
        let type_guid = self.parse_string()?;
        self.expect(&[TokenKind::CloseParen, TokenKind::Equal])?;
        let name = self.parse_string()?;
        self.expect(&[TokenKind::Comma])?;
        let relative_path = normalize_separators(&self.parse_string()?);
        self.expect(&[TokenKind::Comma])?;
        let project_id = self.parse_string()?;
        self.skip_sections()?;
        self.expect(&[TokenKind::EndProjectKeyword])?;

        Ok(ProjectDescriptor {
            type_guid,
            name,
            relative_path,
            project_id,
        })
    }

    /// 문자열 값을 읽습니다.
    ///
    /// 따옴표로 시작하면 다음 따옴표까지의 모든 토큰 원문을 이어 붙이고,
    /// 그렇지 않으면 토큰 하나의 원문을 그대로 반환합니다.
    fn parse_string(&mut self) -> Result<String, SolutionError> {
        let open = self.scan_ignore_whitespace();
        if open.kind != TokenKind::Quote {
            return Ok(open.literal);
        }

        let mut value = String::new();
        loop {
            let token = self.scan();
            match token.kind {
                TokenKind::Quote => return Ok(value),
                TokenKind::EndOfInput => {
                    return Err(SolutionError::UnterminatedString { line: open.line });
                }
                _ => value.push_str(&token.literal),
            }
        }
    }

    /// `ProjectSection ... EndProjectSection` 블록을 모두 건너뜁니다.
    fn skip_sections(&mut self) -> Result<(), SolutionError> {
        loop {
            let token = self.scan_ignore_whitespace();
            if !is_identifier(&token, SECTION_START) {
                self.unscan(token);
                return Ok(());
            }

            let start_line = token.line;
            loop {
                let inner = self.scan();
                if inner.is_end() {
                    return Err(SolutionError::UnterminatedSection { line: start_line });
                }
                if is_identifier(&inner, SECTION_END) {
                    break;
                }
            }
        }
    }

    /// 공백을 건너뛰며 기대한 토큰들이 순서대로 나오는지 확인합니다.
    fn expect(&mut self, expected: &[TokenKind]) -> Result<(), SolutionError> {
        for &kind in expected {
            let token = self.scan_ignore_whitespace();
            if token.kind != kind {
                return Err(SolutionError::UnexpectedToken {
                    expected: kind,
                    found: token.literal,
                    line: token.line,
                });
            }
        }
        Ok(())
    }

    /// 다음 토큰을 반환합니다. 되돌린 토큰이 있으면 그것을 먼저 반환합니다.
    fn scan(&mut self) -> Token {
        self.buffered.take().unwrap_or_else(|| self.lexer.scan())
    }

    /// 토큰 하나를 되돌립니다.
    fn unscan(&mut self, token: Token) {
        self.buffered = Some(token);
    }

    /// 공백 토큰을 건너뛴 다음 토큰을 반환합니다.
    ///
    /// 렉서가 연속 공백을 하나로 합치므로 한 번만 건너뛰면 됩니다.
    fn scan_ignore_whitespace(&mut self) -> Token {
        let token = self.scan();
        if token.kind == TokenKind::Whitespace {
            self.scan()
        } else {
            token
        }
    }
}

/// 솔루션 파일 내용을 파싱합니다.
pub fn parse_solution(input: &str) -> Result<Vec<ProjectDescriptor>, SolutionError> {
    SolutionParser::new(input).parse()
}

fn is_identifier(token: &Token, name: &str) -> bool {
    token.kind == TokenKind::Identifier && token.literal.eq_ignore_ascii_case(name)
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', std::path::MAIN_SEPARATOR_STR)
}
