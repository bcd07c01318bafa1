//! 레지스트리 에러 타입
//!
//! [`RegistryError`]는 소스 탐색과 레지스트리 질의에서 발생하는 에러를 나타냅니다.
//! `NoSourcesFound`를 제외한 모든 에러는 소스 단위로 발생하며,
//! 오케스트레이터는 경고를 남기고 다음 소스로 넘어갑니다.

use nuscan_core::error::{ConfigError, NuscanError, RegistryError as CoreRegistryError};

/// 레지스트리 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// 탐색한 설정 파일에서 HTTP(S) 소스를 하나도 찾지 못함
    #[error("no package sources found")]
    NoSourcesFound,

    /// 엔드포인트가 알 수 없는 미디어 타입으로 응답함
    #[error("unsupported media type '{media_type}' from {url}")]
    UnsupportedMediaType {
        /// 요청 URL
        url: String,
        /// 응답의 미디어 타입 (파라미터 제외, 소문자)
        media_type: String,
    },

    /// 전송 실패 또는 타임아웃
    #[error("request to {url} failed: {source}")]
    Http {
        /// 요청 URL
        url: String,
        /// 원본 reqwest 에러
        source: reqwest::Error,
    },

    /// 2xx가 아닌 HTTP 상태 코드
    #[error("request to {url} returned HTTP {status}")]
    HttpStatus {
        /// 요청 URL
        url: String,
        /// 상태 코드
        status: u16,
    },

    /// 응답 본문 디코딩 실패
    #[error("failed to decode response from {url}: {reason}")]
    Decode {
        /// 요청 URL
        url: String,
        /// 실패 사유
        reason: String,
    },

    /// 잘못된 URL
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl {
        /// 입력 URL
        url: String,
        /// 실패 사유
        reason: String,
    },

    /// V3 서비스 인덱스에 `SearchQueryService` 리소스가 없음
    #[error("search query service not found in {url}")]
    SearchServiceNotFound {
        /// 서비스 인덱스 URL
        url: String,
    },

    /// HTTP 클라이언트 생성 실패
    #[error("failed to build http client: {0}")]
    ClientBuild(String),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl RegistryError {
    /// 전송 타임아웃으로 인한 에러인지 확인합니다.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http { source, .. } if source.is_timeout())
    }
}

impl From<RegistryError> for NuscanError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NoSourcesFound => NuscanError::Registry(CoreRegistryError::NoSources),
            RegistryError::Config { field, reason } => {
                NuscanError::Config(ConfigError::InvalidValue { field, reason })
            }
            other => NuscanError::Registry(CoreRegistryError::QueryFailed(other.to_string())),
        }
    }
}
