//! 에러 타입: 도메인별 에러 정의
//!
//! 각 크레이트는 자체 에러 타입을 가지며, `From` 구현을 통해
//! 최상위 [`NuscanError`]로 변환됩니다.

/// nuscan 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum NuscanError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 솔루션/프로젝트 파일 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 패키지 레지스트리 에러
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// 스캔 에러
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 솔루션 파일 문법 오류
    #[error("solution syntax error: {0}")]
    Solution(String),

    /// 프로젝트 파일 읽기/파싱 실패
    #[error("project read failed: {0}")]
    Project(String),
}

/// 패키지 레지스트리 에러
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// 사용 가능한 패키지 소스가 없음
    #[error("no package sources found")]
    NoSources,

    /// 레지스트리 질의 실패 (소스 단위)
    #[error("query failed: {0}")]
    QueryFailed(String),
}

/// 스캔 에러
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 지원하지 않는 입력 파일 형식
    #[error("unsupported input format: {0}")]
    InvalidInput(String),

    /// 스캔 실패
    #[error("scan failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_to_nuscan_error() {
        let err: NuscanError = ConfigError::FileNotFound {
            path: "nuscan.toml".to_owned(),
        }
        .into();
        assert!(matches!(err, NuscanError::Config(_)));
        assert!(err.to_string().contains("nuscan.toml"));
    }

    #[test]
    fn registry_error_display() {
        let err: NuscanError = RegistryError::NoSources.into();
        assert_eq!(err.to_string(), "registry error: no package sources found");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::Solution("unexpected token \")\"".to_owned());
        assert!(err.to_string().contains("unexpected token"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NuscanError = io_err.into();
        assert!(matches!(err, NuscanError::Io(_)));
    }
}
