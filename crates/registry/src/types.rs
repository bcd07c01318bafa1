//! 레지스트리 도메인 타입
//!
//! - [`PackageSource`]: 설정 파일에서 찾은 패키지 소스
//! - [`PackageEntry`]: 프로토콜에 무관한 패키지 메타데이터 한 건

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use nuscan_core::types::PackageMetadata;

/// 설정 파일에서 추출한 패키지 소스
///
/// `endpoint_url`은 항상 절대 http/https URL입니다.
/// 로컬 경로를 가리키는 항목은 탐색 단계에서 걸러집니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSource {
    /// 소스가 선언된 설정 파일
    pub origin_file: PathBuf,
    /// 소스 이름 (`key` 속성)
    pub name: String,
    /// 엔드포인트 URL (`value` 속성)
    pub endpoint_url: String,
    /// 선언된 프로토콜 버전 (`protocolVersion` 속성, 없으면 빈 문자열)
    pub protocol_version: String,
}

impl fmt::Display for PackageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.origin_file.display())
    }
}

/// 레지스트리가 반환한 패키지 정보
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub id: String,
    pub version: String,
    pub title: String,
    pub description: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub tags: Vec<String>,
    pub license_url: String,
    pub project_url: String,
}

impl PackageEntry {
    /// 요청한 식별자와 일치하는지 확인합니다 (대소문자 구분, 버전 무시).
    pub fn matches(&self, id: &str) -> bool {
        self.id == id
    }

    /// 패키지 레코드에 메타데이터를 채웁니다.
    ///
    /// 버전은 프로젝트에 선언된 값을 유지합니다.
    pub fn enrich(&self, metadata: &mut PackageMetadata) {
        metadata.name = self.title.clone();
        metadata.description = self.description.clone();
        metadata.summary = self.summary.clone();
        metadata.authors = self.authors.clone();
        metadata.tags = self.tags.clone();
        metadata.license_url = self.license_url.clone();
        metadata.project_url = self.project_url.clone();
        metadata.resolved = true;
    }
}
