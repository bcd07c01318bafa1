//! 설정 관리: nuscan.toml 파싱 및 런타임 설정
//!
//! [`NuscanConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`NUSCAN_REGISTRY_TIMEOUT_SECS=30` 형식)
//! 3. 설정 파일 (`nuscan.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), nuscan_core::error::NuscanError> {
//! use nuscan_core::config::NuscanConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = NuscanConfig::load("nuscan.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = NuscanConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, NuscanError};

/// 레지스트리 타임아웃 상한 (초)
const MAX_TIMEOUT_SECS: u64 = 300;

/// 입력 파일 크기 상한 (바이트)
const MAX_FILE_SIZE_LIMIT: usize = 100 * 1024 * 1024; // 100 MB

/// nuscan 통합 설정
///
/// `nuscan.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 크레이트는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NuscanConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 레지스트리 설정
    #[serde(default)]
    pub registry: RegistryConfig,
    /// 스캔 설정
    #[serde(default)]
    pub scan: ScanConfig,
}

impl NuscanConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, NuscanError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일 없이 기본값에 환경변수 오버라이드만 적용합니다.
    ///
    /// CLI에서 `--config`를 지정하지 않았을 때 사용합니다.
    pub fn from_env() -> Result<Self, NuscanError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, NuscanError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NuscanError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                NuscanError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, NuscanError> {
        toml::from_str(toml_str).map_err(|e| {
            NuscanError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `NUSCAN_{SECTION}_{FIELD}`
    /// 예: `NUSCAN_GENERAL_LOG_LEVEL=debug`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "NUSCAN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "NUSCAN_GENERAL_LOG_FORMAT");

        // Registry
        override_u64(
            &mut self.registry.timeout_secs,
            "NUSCAN_REGISTRY_TIMEOUT_SECS",
        );
        override_string(&mut self.registry.user_agent, "NUSCAN_REGISTRY_USER_AGENT");
        override_csv(
            &mut self.registry.extra_config_paths,
            "NUSCAN_REGISTRY_EXTRA_CONFIG_PATHS",
        );
        override_bool(
            &mut self.registry.search_default_locations,
            "NUSCAN_REGISTRY_SEARCH_DEFAULT_LOCATIONS",
        );

        // Scan
        override_string(
            &mut self.scan.project_extension,
            "NUSCAN_SCAN_PROJECT_EXTENSION",
        );
        override_string(
            &mut self.scan.solution_extension,
            "NUSCAN_SCAN_SOLUTION_EXTENSION",
        );
        override_usize(&mut self.scan.max_file_size, "NUSCAN_SCAN_MAX_FILE_SIZE");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), NuscanError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.registry.timeout_secs == 0 || self.registry.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                field: "registry.timeout_secs".to_owned(),
                reason: format!("must be 1-{MAX_TIMEOUT_SECS}"),
            }
            .into());
        }

        if self.registry.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "registry.user_agent".to_owned(),
                reason: "user_agent must not be empty".to_owned(),
            }
            .into());
        }

        // 확장자 검증: 점으로 시작하는 비어있지 않은 문자열
        for (field, ext) in [
            ("scan.project_extension", &self.scan.project_extension),
            ("scan.solution_extension", &self.scan.solution_extension),
        ] {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(ConfigError::InvalidValue {
                    field: field.to_owned(),
                    reason: format!("'{ext}' must start with '.' followed by a name"),
                }
                .into());
            }
        }

        if self
            .scan
            .project_extension
            .eq_ignore_ascii_case(&self.scan.solution_extension)
        {
            return Err(ConfigError::InvalidValue {
                field: "scan.project_extension".to_owned(),
                reason: "must differ from scan.solution_extension".to_owned(),
            }
            .into());
        }

        if self.scan.max_file_size == 0 || self.scan.max_file_size > MAX_FILE_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "scan.max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE_LIMIT}"),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 레지스트리 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// 모든 HTTP 요청에 적용되는 타임아웃 (초)
    pub timeout_secs: u64,
    /// HTTP User-Agent 헤더
    pub user_agent: String,
    /// 추가로 탐색할 설정 파일 경로 (파일이면 상위 디렉토리 사용)
    pub extra_config_paths: Vec<String>,
    /// 플랫폼 기본 위치 탐색 여부
    pub search_default_locations: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("nuscan/", env!("CARGO_PKG_VERSION")).to_owned(),
            extra_config_paths: Vec::new(),
            search_default_locations: true,
        }
    }
}

/// 스캔 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 프로젝트 파일 확장자
    pub project_extension: String,
    /// 솔루션 파일 확장자
    pub solution_extension: String,
    /// 솔루션/프로젝트 파일 최대 크기 (바이트)
    pub max_file_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            project_extension: ".csproj".to_owned(),
            solution_extension: ".sln".to_owned(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = NuscanConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.registry.timeout_secs, 10);
        assert!(config.registry.search_default_locations);
        assert!(config.registry.user_agent.starts_with("nuscan/"));
        assert_eq!(config.scan.project_extension, ".csproj");
        assert_eq!(config.scan.solution_extension, ".sln");
    }

    #[test]
    fn default_config_passes_validation() {
        NuscanConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = NuscanConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.registry.timeout_secs, 10);
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[general]
log_level = "debug"

[registry]
timeout_secs = 30
"#;
        let config = NuscanConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_level, "debug");
        // log_format은 기본값 유지
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.registry.timeout_secs, 30);
        assert!(config.registry.search_default_locations);
    }

    #[test]
    fn from_str_full_toml() {
        let toml = r#"
[general]
log_level = "warn"
log_format = "json"

[registry]
timeout_secs = 5
user_agent = "build-bot/1.0"
extra_config_paths = ["/opt/feeds", "/etc/nuget/NuGet.Config"]
search_default_locations = false

[scan]
project_extension = ".fsproj"
solution_extension = ".sln"
max_file_size = 1048576
"#;
        let config = NuscanConfig::parse(toml).unwrap();
        assert_eq!(config.general.log_format, "json");
        assert_eq!(config.registry.user_agent, "build-bot/1.0");
        assert_eq!(config.registry.extra_config_paths.len(), 2);
        assert!(!config.registry.search_default_locations);
        assert_eq!(config.scan.project_extension, ".fsproj");
        assert_eq!(config.scan.max_file_size, 1_048_576);
        config.validate().unwrap();
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = NuscanConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            NuscanError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = NuscanConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = NuscanConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = NuscanConfig::default();
        config.registry.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn validate_rejects_too_large_timeout() {
        let mut config = NuscanConfig::default();
        config.registry.timeout_secs = 3600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_extension_without_dot() {
        let mut config = NuscanConfig::default();
        config.scan.project_extension = "csproj".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("project_extension"));
    }

    #[test]
    fn validate_rejects_identical_extensions() {
        let mut config = NuscanConfig::default();
        config.scan.project_extension = ".SLN".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_max_file_size() {
        let mut config = NuscanConfig::default();
        config.scan.max_file_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_file_size"));
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_NUSCAN_STR", "overridden") };
        override_string(&mut val, "TEST_NUSCAN_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_NUSCAN_STR") };
    }

    #[test]
    #[serial]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = true;
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_NUSCAN_BOOL_BAD", "not-a-bool") };
        override_bool(&mut val, "TEST_NUSCAN_BOOL_BAD");
        assert!(val); // 원래 값 유지
        unsafe { std::env::remove_var("TEST_NUSCAN_BOOL_BAD") };
    }

    #[test]
    #[serial]
    fn env_override_u64_valid() {
        let mut val = 10_u64;
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_NUSCAN_U64", "42") };
        override_u64(&mut val, "TEST_NUSCAN_U64");
        assert_eq!(val, 42);
        unsafe { std::env::remove_var("TEST_NUSCAN_U64") };
    }

    #[test]
    #[serial]
    fn env_override_csv_drops_empty_items() {
        let mut val = vec!["a".to_owned()];
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_NUSCAN_CSV", "x, ,y , z") };
        override_csv(&mut val, "TEST_NUSCAN_CSV");
        assert_eq!(val, vec!["x", "y", "z"]);
        unsafe { std::env::remove_var("TEST_NUSCAN_CSV") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_NUSCAN_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = NuscanConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = NuscanConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.registry.timeout_secs, parsed.registry.timeout_secs);
        assert_eq!(config.scan.max_file_size, parsed.scan.max_file_size);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = NuscanConfig::from_file("/nonexistent/path/nuscan.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            NuscanError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
