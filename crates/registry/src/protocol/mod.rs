//! 레지스트리 프로토콜 판별 및 응답 모델
//!
//! 엔드포인트 응답의 `Content-Type`으로 프로토콜을 판별합니다.
//!
//! | 미디어 타입          | 프로토콜 | 질의                                   |
//! |----------------------|----------|----------------------------------------|
//! | `application/xml`    | V2       | `FindPackagesById()?id='<id>'`         |
//! | `application/json`   | V3       | `SearchQueryService?q=<id>&...`        |
//!
//! 두 응답은 [`RegistryResponse`]의 variant로 표현되며,
//! [`RegistryResponse::into_entries`]로 공통 [`PackageEntry`] 목록이 됩니다.

pub mod v2;
pub mod v3;

use std::fmt;

use crate::types::PackageEntry;

/// 레지스트리 프로토콜 버전
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// OData/XML (Atom 피드)
    V2,
    /// JSON/REST (서비스 인덱스 + 검색 서비스)
    V3,
}

impl Protocol {
    /// `Content-Type` 헤더 값에서 프로토콜을 판별합니다.
    ///
    /// 파라미터(`; charset=utf-8` 등)는 무시하고 대소문자를 구분하지 않습니다.
    pub fn from_media_type(content_type: &str) -> Option<Self> {
        match normalize_media_type(content_type).as_str() {
            "application/xml" => Some(Self::V2),
            "application/json" => Some(Self::V3),
            _ => None,
        }
    }

    /// 메트릭 레이블 등에 쓰는 짧은 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Content-Type` 값에서 파라미터를 제거하고 소문자로 정규화합니다.
pub fn normalize_media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// 프로토콜별 질의 응답
#[derive(Debug, Clone)]
pub enum RegistryResponse {
    /// V2 Atom 피드
    V2(v2::Feed),
    /// V3 검색 응답
    V3(v3::SearchResponse),
}

impl RegistryResponse {
    /// 응답의 프로토콜을 반환합니다.
    pub fn protocol(&self) -> Protocol {
        match self {
            Self::V2(_) => Protocol::V2,
            Self::V3(_) => Protocol::V3,
        }
    }

    /// 프로토콜에 무관한 패키지 목록으로 변환합니다.
    pub fn into_entries(self) -> Vec<PackageEntry> {
        match self {
            Self::V2(feed) => feed.entries.into_iter().map(PackageEntry::from).collect(),
            Self::V3(response) => response.data.into_iter().map(PackageEntry::from).collect(),
        }
    }
}
