//! 레지스트리 설정
//!
//! [`RegistryClientConfig`]는 core의 [`RegistryConfig`](nuscan_core::config::RegistryConfig)에서
//! 파생되며, HTTP 클라이언트와 소스 탐색기가 함께 사용합니다.
//!
//! # 사용 예시
//!
//! ```
//! use nuscan_registry::RegistryClientConfigBuilder;
//!
//! let config = RegistryClientConfigBuilder::new()
//!     .timeout_secs(5)
//!     .search_default_locations(false)
//!     .extra_config_path("/srv/nuget")
//!     .build()
//!     .unwrap();
//! assert_eq!(config.timeout().as_secs(), 5);
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// 타임아웃 상한 (초)
const MAX_TIMEOUT_SECS: u64 = 300;

/// 레지스트리 클라이언트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryClientConfig {
    /// 모든 요청에 적용되는 타임아웃 (초)
    pub timeout_secs: u64,
    /// HTTP User-Agent
    pub user_agent: String,
    /// 추가 탐색 경로 (파일이면 상위 디렉토리를 탐색)
    pub extra_config_paths: Vec<PathBuf>,
    /// 플랫폼 기본 위치 탐색 여부
    pub search_default_locations: bool,
}

impl Default for RegistryClientConfig {
    fn default() -> Self {
        Self::from_core(&nuscan_core::config::RegistryConfig::default())
    }
}

impl RegistryClientConfig {
    /// core의 `RegistryConfig`에서 설정을 생성합니다.
    pub fn from_core(core: &nuscan_core::config::RegistryConfig) -> Self {
        Self {
            timeout_secs: core.timeout_secs,
            user_agent: core.user_agent.clone(),
            extra_config_paths: core.extra_config_paths.iter().map(PathBuf::from).collect(),
            search_default_locations: core.search_default_locations,
        }
    }

    /// 요청 타임아웃을 반환합니다.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// - `timeout_secs`: 1-300
    /// - `user_agent`: 비어있으면 안 됨
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(RegistryError::Config {
                field: "timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_TIMEOUT_SECS}"),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(RegistryError::Config {
                field: "user_agent".to_owned(),
                reason: "user_agent must not be empty".to_owned(),
            });
        }

        Ok(())
    }
}

/// [`RegistryClientConfig`] 빌더
#[derive(Default)]
pub struct RegistryClientConfigBuilder {
    config: RegistryClientConfig,
}

impl RegistryClientConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 요청 타임아웃(초)을 설정합니다.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    /// User-Agent를 설정합니다.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// 추가 탐색 경로를 하나 더합니다.
    pub fn extra_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.extra_config_paths.push(path.into());
        self
    }

    /// 추가 탐색 경로 목록을 설정합니다.
    pub fn extra_config_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.extra_config_paths = paths;
        self
    }

    /// 플랫폼 기본 위치 탐색 여부를 설정합니다.
    pub fn search_default_locations(mut self, enabled: bool) -> Self {
        self.config.search_default_locations = enabled;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `RegistryError::Config` 반환
    pub fn build(self) -> Result<RegistryClientConfig, RegistryError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
