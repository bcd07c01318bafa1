//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 레코더가 설치되지 않은 경우(기본 CLI 실행) 호출은 아무 동작도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `nuscan_`
//! - 모듈명: `scanner_`, `registry_`
//! - 접미어: `_total` (counter)

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 프로토콜 레이블 키 (v2, v3)
pub const LABEL_PROTOCOL: &str = "protocol";

// ─── Scanner 메트릭 ────────────────────────────────────────────────

/// Scanner: 읽어들인 프로젝트 파일 수 (counter)
pub const SCANNER_PROJECTS_SCANNED_TOTAL: &str = "nuscan_scanner_projects_scanned_total";

/// Scanner: 건너뛴 프로젝트 파일 수 (counter)
pub const SCANNER_PROJECTS_SKIPPED_TOTAL: &str = "nuscan_scanner_projects_skipped_total";

/// Scanner: 메타데이터가 채워진 패키지 수 (counter)
pub const SCANNER_PACKAGES_RESOLVED_TOTAL: &str = "nuscan_scanner_packages_resolved_total";

/// Scanner: 어떤 소스에서도 찾지 못한 패키지 수 (counter)
pub const SCANNER_PACKAGES_UNRESOLVED_TOTAL: &str = "nuscan_scanner_packages_unresolved_total";

// ─── Registry 메트릭 ───────────────────────────────────────────────

/// Registry: 레지스트리 질의 수 (counter, label: protocol)
pub const REGISTRY_QUERIES_TOTAL: &str = "nuscan_registry_queries_total";

/// Registry: 실패한 레지스트리 질의 수 (counter)
pub const REGISTRY_QUERY_ERRORS_TOTAL: &str = "nuscan_registry_query_errors_total";

/// Registry: 발견된 패키지 소스 수 (counter)
pub const REGISTRY_SOURCES_DISCOVERED_TOTAL: &str = "nuscan_registry_sources_discovered_total";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
pub fn describe_all() {
    use metrics::describe_counter;

    describe_counter!(
        SCANNER_PROJECTS_SCANNED_TOTAL,
        "Total number of project files read successfully"
    );
    describe_counter!(
        SCANNER_PROJECTS_SKIPPED_TOTAL,
        "Total number of project files skipped after a read failure"
    );
    describe_counter!(
        SCANNER_PACKAGES_RESOLVED_TOTAL,
        "Total number of packages enriched with registry metadata"
    );
    describe_counter!(
        SCANNER_PACKAGES_UNRESOLVED_TOTAL,
        "Total number of packages no source could resolve"
    );
    describe_counter!(
        REGISTRY_QUERIES_TOTAL,
        "Total number of registry queries per protocol"
    );
    describe_counter!(
        REGISTRY_QUERY_ERRORS_TOTAL,
        "Total number of failed registry queries"
    );
    describe_counter!(
        REGISTRY_SOURCES_DISCOVERED_TOTAL,
        "Total number of package sources discovered in config files"
    );
}
