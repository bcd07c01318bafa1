//! V3 (JSON/REST) 프로토콜
//!
//! 엔드포인트는 서비스 인덱스를 반환하며, 그중 `@type`이 `SearchQueryService`인
//! 첫 번째 리소스에 검색 질의를 보냅니다.
//!
//! ```json
//! {
//!   "version": "3.0.0",
//!   "resources": [
//!     { "@id": "https://azuresearch-usnc.nuget.org/query", "@type": "SearchQueryService" }
//!   ]
//! }
//! ```

use reqwest::Url;
use serde::Deserialize;

use crate::types::PackageEntry;

/// 검색 서비스 리소스 타입
pub const SEARCH_QUERY_SERVICE: &str = "SearchQueryService";

/// 검색 질의 URL을 만듭니다.
pub fn query_url(search_service: &Url, id: &str) -> Url {
    let mut url = search_service.clone();
    url.query_pairs_mut()
        .append_pair("q", id)
        .append_pair("prerelease", "false")
        .append_pair("semVerLevel", "2.0.0");
    url
}

/// 문자열 하나 또는 문자열 배열
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// 목록으로 변환합니다. 단일 문자열은 `separator`로 나눕니다.
    fn into_list(self, separator: char) -> Vec<String> {
        match self {
            Self::Many(values) => values,
            Self::One(value) => value
                .split(separator)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        match self {
            Self::One(value) => value == needle,
            Self::Many(values) => values.iter().any(|v| v == needle),
        }
    }
}

/// 서비스 인덱스
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceIndex {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub resources: Vec<ServiceResource>,
}

/// 서비스 인덱스의 리소스 한 건
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceResource {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub resource_type: StringOrList,
}

impl ServiceIndex {
    /// `@type`이 정확히 `SearchQueryService`인 첫 번째 리소스의 URL을 반환합니다.
    pub fn search_query_service(&self) -> Option<&str> {
        self.resources
            .iter()
            .find(|r| r.resource_type.contains(SEARCH_QUERY_SERVICE))
            .map(|r| r.id.as_str())
    }
}

/// 검색 응답
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<SearchResult>,
}

/// 검색 결과 한 건
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchResult {
    pub id: Option<String>,
    pub version: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub authors: Option<StringOrList>,
    pub tags: Option<StringOrList>,
    pub license_url: Option<String>,
    pub project_url: Option<String>,
}

impl From<SearchResult> for PackageEntry {
    fn from(result: SearchResult) -> Self {
        Self {
            id: result.id.unwrap_or_default(),
            version: result.version.unwrap_or_default(),
            title: result.title.unwrap_or_default(),
            description: result.description.unwrap_or_default(),
            summary: result.summary.unwrap_or_default(),
            authors: result
                .authors
                .map(|a| a.into_list(','))
                .unwrap_or_default(),
            tags: result.tags.map(|t| t.into_list(' ')).unwrap_or_default(),
            license_url: result.license_url.unwrap_or_default(),
            project_url: result.project_url.unwrap_or_default(),
        }
    }
}
