//! 레지스트리 클라이언트 -- 프로토콜 판별 및 패키지 조회
//!
//! [`RegistryQuery`] trait은 오케스트레이터가 사용하는 질의 인터페이스이며,
//! 실제 구현은 [`RegistryClient`], 테스트에서는 mock 구현을 사용합니다.
//!
//! # 질의 흐름
//!
//! 1. 엔드포인트 URL에 GET 요청
//! 2. `Content-Type`으로 프로토콜 판별
//! 3. V2: `FindPackagesById()` 질의 후 Atom 피드 디코딩
//! 4. V3: 서비스 인덱스에서 `SearchQueryService`를 찾아 검색 질의 후 JSON 디코딩
//!
//! 모든 요청에는 클라이언트 전체 타임아웃이 적용되며 재시도하지 않습니다.

use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use tracing::debug;

use nuscan_core::metrics as m;

use crate::config::RegistryClientConfig;
use crate::error::RegistryError;
use crate::protocol::{Protocol, RegistryResponse, normalize_media_type, v2, v3};
use crate::types::PackageEntry;

/// 레지스트리 질의 trait
///
/// 엔드포인트 하나에 패키지 식별자를 질의하여 후보 목록을 반환합니다.
/// 식별자 일치 여부 판단은 호출자가 수행합니다.
pub trait RegistryQuery: Send + Sync + 'static {
    /// 엔드포인트에 패키지를 질의합니다.
    ///
    /// # Errors
    ///
    /// 전송 실패, 타임아웃, 비정상 상태 코드, 알 수 없는 미디어 타입, 디코딩 실패
    fn resolve(
        &self,
        endpoint_url: &str,
        id: &str,
    ) -> impl Future<Output = Result<Vec<PackageEntry>, RegistryError>> + Send;
}

/// reqwest 기반 레지스트리 클라이언트
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
}

impl RegistryClient {
    /// 설정으로 클라이언트를 생성합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증 실패 또는 TLS 백엔드 초기화 실패
    pub fn new(config: &RegistryClientConfig) -> Result<Self, RegistryError> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| RegistryError::ClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    /// 엔드포인트에 질의하여 프로토콜별 응답을 반환합니다.
    pub async fn query(&self, endpoint_url: &str, id: &str) -> Result<RegistryResponse, RegistryError> {
        let endpoint = parse_url(endpoint_url)?;
        let response = self.get(endpoint.clone()).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        match Protocol::from_media_type(&content_type) {
            Some(Protocol::V2) => {
                let feed_url = v2::query_url(&endpoint, id);
                let body = self.get_text(feed_url.clone()).await?;
                let feed = v2::parse_feed(&body).map_err(|e| decode_error(&feed_url, e))?;
                Ok(RegistryResponse::V2(feed))
            }
            Some(Protocol::V3) => {
                let body = read_text(&endpoint, response).await?;
                let index: v3::ServiceIndex =
                    serde_json::from_str(&body).map_err(|e| decode_error(&endpoint, e))?;
                debug!(url = %endpoint, version = %index.version, "service index loaded");
                let search = index.search_query_service().ok_or_else(|| {
                    RegistryError::SearchServiceNotFound {
                        url: endpoint.to_string(),
                    }
                })?;
                let search_url = v3::query_url(&parse_url(search)?, id);
                let body = self.get_text(search_url.clone()).await?;
                let results: v3::SearchResponse =
                    serde_json::from_str(&body).map_err(|e| decode_error(&search_url, e))?;
                Ok(RegistryResponse::V3(results))
            }
            None => Err(RegistryError::UnsupportedMediaType {
                url: endpoint.to_string(),
                media_type: normalize_media_type(&content_type),
            }),
        }
    }

    async fn get(&self, url: Url) -> Result<Response, RegistryError> {
        debug!(url = %url, "registry request");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| RegistryError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_text(&self, url: Url) -> Result<String, RegistryError> {
        let response = self.get(url.clone()).await?;
        read_text(&url, response).await
    }
}

impl RegistryQuery for RegistryClient {
    async fn resolve(&self, endpoint_url: &str, id: &str) -> Result<Vec<PackageEntry>, RegistryError> {
        match self.query(endpoint_url, id).await {
            Ok(response) => {
                let protocol = response.protocol();
                metrics::counter!(m::REGISTRY_QUERIES_TOTAL, m::LABEL_PROTOCOL => protocol.as_str())
                    .increment(1);
                let entries = response.into_entries();
                debug!(endpoint = endpoint_url, id, %protocol, count = entries.len(), "registry query completed");
                Ok(entries)
            }
            Err(e) => {
                metrics::counter!(m::REGISTRY_QUERY_ERRORS_TOTAL).increment(1);
                Err(e)
            }
        }
    }
}

async fn read_text(url: &Url, response: Response) -> Result<String, RegistryError> {
    response.text().await.map_err(|source| RegistryError::Http {
        url: url.to_string(),
        source,
    })
}

fn parse_url(raw: &str) -> Result<Url, RegistryError> {
    Url::parse(raw).map_err(|e| RegistryError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

fn decode_error(url: &Url, err: impl std::fmt::Display) -> RegistryError {
    RegistryError::Decode {
        url: url.to_string(),
        reason: err.to_string(),
    }
}
