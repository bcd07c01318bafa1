//! 솔루션 파서 에러 타입
//!
//! [`SolutionError`]는 `From<SolutionError> for NuscanError` 구현을 통해
//! 상위 에러 타입인 `NuscanError::Parse`로 전파됩니다.

use nuscan_core::error::{NuscanError, ParseError};

use crate::token::TokenKind;

/// 솔루션 파일 파싱 에러
///
/// 파서는 오류 복구를 하지 않으므로 첫 번째 오류에서 파싱이 중단됩니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolutionError {
    /// 특정 토큰이 필요한 위치에 다른 토큰이 나타남
    #[error("line {line}: expected {expected}, found {found:?}")]
    UnexpectedToken {
        /// 기대한 토큰 종류
        expected: TokenKind,
        /// 실제로 읽은 토큰의 원문
        found: String,
        /// 토큰이 나타난 줄 번호
        line: usize,
    },

    /// 따옴표 문자열 안에서 입력이 끝남
    #[error("line {line}: unterminated quoted string")]
    UnterminatedString {
        /// 문자열이 시작된 줄 번호
        line: usize,
    },

    /// `ProjectSection` 블록이 닫히지 않음
    #[error("line {line}: ProjectSection without EndProjectSection")]
    UnterminatedSection {
        /// 섹션이 시작된 줄 번호
        line: usize,
    },
}

impl From<SolutionError> for NuscanError {
    fn from(err: SolutionError) -> Self {
        NuscanError::Parse(ParseError::Solution(err.to_string()))
    }
}
