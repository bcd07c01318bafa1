//! 도메인 타입: 크레이트 간에 공유되는 공통 타입
//!
//! 프로젝트 파일에서 추출한 패키지 참조, 레지스트리 메타데이터가 채워진
//! 패키지 레코드, 최종 스캔 결과를 정의합니다.
//! [`ScanResult`]의 직렬화 형식은 `--output` 파일의 JSON 스키마와 같습니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 프로젝트 파일에 선언된 패키지 참조
///
/// `<PackageReference Include="Serilog" Version="2.10.0" />` 한 건에 대응합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageReference {
    /// 패키지 식별자
    pub id: String,
    /// 선언된 버전 문자열 (범위 표기 포함 가능)
    pub version: String,
}

impl PackageReference {
    /// 새 패키지 참조를 생성합니다.
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)
    }
}

/// 패키지 메타데이터 레코드
///
/// 처음에는 `{id, version}`만 채워진 상태로 생성되고,
/// 첫 번째로 일치한 레지스트리 소스의 값으로 한 번만 갱신됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    /// 패키지 식별자
    pub id: String,
    /// 표시 이름 (레지스트리 title)
    #[serde(default)]
    pub name: String,
    /// 설명
    #[serde(default)]
    pub description: String,
    /// 요약
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    /// 프로젝트에 선언된 버전
    pub version: String,
    /// 작성자 목록
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    /// 태그 목록
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// 라이선스 URL
    #[serde(default)]
    pub license_url: String,
    /// 프로젝트 URL
    #[serde(default)]
    pub project_url: String,
    /// 레지스트리에서 메타데이터를 찾았는지 여부 (출력 파일에는 기록하지 않음)
    #[serde(skip)]
    pub resolved: bool,
}

impl PackageMetadata {
    /// 패키지 참조로부터 아직 해석되지 않은 레코드를 생성합니다.
    pub fn from_reference(reference: &PackageReference) -> Self {
        Self {
            id: reference.id.clone(),
            version: reference.version.clone(),
            ..Self::default()
        }
    }

    /// 정렬 키 (`id + version` 문자열 연결)
    pub fn sort_key(&self) -> String {
        format!("{}{}", self.id, self.version)
    }
}

impl fmt::Display for PackageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.version)?;
        if !self.resolved {
            write!(f, " (unresolved)")?;
        }
        Ok(())
    }
}

/// 스캔 결과
///
/// 스캔한 프로젝트 수, 중복 제거된 패키지 수, 패키지 레코드 목록을 담습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// 성공적으로 읽은 프로젝트 파일 수
    #[serde(rename = "scannedProjects")]
    pub scanned_projects: usize,
    /// 중복 제거된 패키지 수
    #[serde(rename = "usedPackages")]
    pub total_packages: usize,
    /// 패키지 레코드 (정렬됨)
    pub packages: Vec<PackageMetadata>,
}

impl ScanResult {
    /// 패키지를 `id + version` 사전순으로 정렬합니다.
    pub fn sort_packages(&mut self) {
        self.packages.sort_by_cached_key(PackageMetadata::sort_key);
    }

    /// 메타데이터를 찾지 못한 패키지 수를 반환합니다.
    pub fn unresolved_count(&self) -> usize {
        self.packages.iter().filter(|p| !p.resolved).count()
    }

    /// 출력 파일 형식(들여쓰기된 JSON)으로 직렬화합니다.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 출력 파일 형식의 JSON을 역직렬화합니다.
    ///
    /// `resolved` 플래그는 파일에 기록되지 않으므로 모두 `false`가 됩니다.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for ScanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScanResult(projects={}, packages={}, unresolved={})",
            self.scanned_projects,
            self.total_packages,
            self.unresolved_count(),
        )
    }
}
