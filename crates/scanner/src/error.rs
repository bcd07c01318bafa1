//! 스캐너 에러 타입
//!
//! - [`ScannerError`]: 스캔 전체를 중단시키는 에러와 패키지 단위 에러
//! - [`ProjectReadError`]: 프로젝트 파일 하나를 읽지 못한 경우
//!
//! 두 타입 모두 `From` 구현을 통해 최상위 `NuscanError`로 변환됩니다.
//!
//! # 에러 카테고리
//!
//! - **입력**: `InvalidInputFormat`, `EntryFileUnreadable`, `FileTooBig`
//! - **파싱**: `Solution`, `ProjectRead`
//! - **패키지 단위**: `NoMatchFound`
//! - **기타**: `Task`, `Config`

use nuscan_core::error::{ConfigError, NuscanError, ParseError, ScanError};
use nuscan_solution::SolutionError;

/// 스캐너 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    /// 지원하지 않는 입력 파일 확장자
    #[error("unknown input file format: {path}")]
    InvalidInputFormat {
        /// 입력 파일 경로
        path: String,
    },

    /// 입력 파일이 없거나 읽을 수 없음
    #[error("cannot read input file {path}: {source}")]
    EntryFileUnreadable {
        /// 입력 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 입력 파일 크기 초과
    #[error("file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 파일 경로
        path: String,
        /// 실제 크기 (바이트)
        size: usize,
        /// 허용 크기 (바이트)
        max: usize,
    },

    /// 솔루션 파일 문법 오류
    #[error("solution parse error: {0}")]
    Solution(#[from] SolutionError),

    /// 프로젝트 파일 읽기 실패
    #[error(transparent)]
    ProjectRead(#[from] ProjectReadError),

    /// 어떤 소스에서도 패키지를 찾지 못함
    #[error("no source returned a match for {package}")]
    NoMatchFound {
        /// `id@version`
        package: String,
    },

    /// blocking 태스크 실패
    #[error("task error: {0}")]
    Task(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

/// 프로젝트 파일 읽기 에러
#[derive(Debug, thiserror::Error)]
pub enum ProjectReadError {
    /// 파일 I/O 실패
    #[error("io error: {path}: {source}")]
    Io {
        /// 프로젝트 파일 경로
        path: String,
        /// 원본 I/O 에러
        source: std::io::Error,
    },

    /// 파일 크기 초과
    #[error("project file too large: {path}: {size} bytes (max: {max})")]
    FileTooBig {
        /// 프로젝트 파일 경로
        path: String,
        /// 실제 크기 (바이트)
        size: usize,
        /// 허용 크기 (바이트)
        max: usize,
    },

    /// XML 파싱 실패
    #[error("invalid project xml: {path}: {reason}")]
    Xml {
        /// 프로젝트 파일 경로
        path: String,
        /// 실패 사유
        reason: String,
    },
}

impl From<ProjectReadError> for NuscanError {
    fn from(err: ProjectReadError) -> Self {
        NuscanError::Parse(ParseError::Project(err.to_string()))
    }
}

impl From<ScannerError> for NuscanError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::InvalidInputFormat { path } => {
                NuscanError::Scan(ScanError::InvalidInput(path))
            }
            ScannerError::Solution(e) => e.into(),
            ScannerError::ProjectRead(e) => e.into(),
            ScannerError::Config { field, reason } => {
                NuscanError::Config(ConfigError::InvalidValue { field, reason })
            }
            other => NuscanError::Scan(ScanError::Failed(other.to_string())),
        }
    }
}
