//! 스캐너 설정
//!
//! [`ScannerConfig`]는 core의 [`ScanConfig`](nuscan_core::config::ScanConfig)에서 파생됩니다.
//!
//! # 사용 예시
//!
//! ```
//! use nuscan_scanner::ScannerConfigBuilder;
//!
//! let config = ScannerConfigBuilder::new()
//!     .project_extension(".csproj")
//!     .max_file_size(1024 * 1024)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.solution_extension, ".sln");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ScannerError;

/// 입력 파일 크기 상한 (바이트)
const MAX_FILE_SIZE: usize = 100 * 1024 * 1024; // 100 MB

/// 스캐너 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// 프로젝트 파일 확장자 (대소문자 무시)
    pub project_extension: String,
    /// 솔루션 파일 확장자 (대소문자 무시)
    pub solution_extension: String,
    /// 솔루션/프로젝트 파일 최대 크기 (바이트)
    pub max_file_size: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::from_core(&nuscan_core::config::ScanConfig::default())
    }
}

impl ScannerConfig {
    /// core의 `ScanConfig`에서 스캐너 설정을 생성합니다.
    pub fn from_core(core: &nuscan_core::config::ScanConfig) -> Self {
        Self {
            project_extension: core.project_extension.clone(),
            solution_extension: core.solution_extension.clone(),
            max_file_size: core.max_file_size,
        }
    }

    /// 설정 값의 유효성을 검증합니다.
    ///
    /// # 검증 규칙
    ///
    /// - 확장자: `.`으로 시작하는 두 글자 이상, 서로 달라야 함
    /// - `max_file_size`: 1-104857600 (100MB)
    pub fn validate(&self) -> Result<(), ScannerError> {
        for (field, ext) in [
            ("project_extension", &self.project_extension),
            ("solution_extension", &self.solution_extension),
        ] {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(ScannerError::Config {
                    field: field.to_owned(),
                    reason: format!("'{ext}' must start with '.' followed by a name"),
                });
            }
        }

        if self
            .project_extension
            .eq_ignore_ascii_case(&self.solution_extension)
        {
            return Err(ScannerError::Config {
                field: "project_extension".to_owned(),
                reason: "must differ from solution_extension".to_owned(),
            });
        }

        if self.max_file_size == 0 || self.max_file_size > MAX_FILE_SIZE {
            return Err(ScannerError::Config {
                field: "max_file_size".to_owned(),
                reason: format!("must be 1-{MAX_FILE_SIZE}"),
            });
        }

        Ok(())
    }
}

/// [`ScannerConfig`] 빌더
#[derive(Default)]
pub struct ScannerConfigBuilder {
    config: ScannerConfig,
}

impl ScannerConfigBuilder {
    /// 기본값을 가진 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 프로젝트 파일 확장자를 설정합니다.
    pub fn project_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.project_extension = ext.into();
        self
    }

    /// 솔루션 파일 확장자를 설정합니다.
    pub fn solution_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.solution_extension = ext.into();
        self
    }

    /// 최대 파일 크기(바이트)를 설정합니다.
    pub fn max_file_size(mut self, size: usize) -> Self {
        self.config.max_file_size = size;
        self
    }

    /// 설정을 검증하고 빌드합니다.
    ///
    /// # Errors
    ///
    /// 유효성 검증 실패 시 `ScannerError::Config` 반환
    pub fn build(self) -> Result<ScannerConfig, ScannerError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
