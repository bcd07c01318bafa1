//! 패키지 스캐너 -- 솔루션/프로젝트 스캔 오케스트레이터
//!
//! [`PackageScanner`]는 입력 파일에서 패키지 참조를 수집하고,
//! 패키지 소스에 차례로 질의하여 메타데이터를 채운 [`ScanResult`]를 생성합니다.
//!
//! # 스캔 흐름
//!
//! 1. 입력 확장자 판별 (`.sln` / `.csproj`, 대소문자 무시)
//! 2. blocking 태스크에서 솔루션 파싱 및 프로젝트 파일 읽기
//! 3. `(id, version)` 기준 중복 제거
//! 4. 패키지마다 소스를 순서대로 질의, 식별자가 일치하는 첫 항목으로 갱신
//! 5. `id + version` 순 정렬
//!
//! # 사용 예시
//!
//! ```ignore
//! let scanner = PackageScannerBuilder::new()
//!     .config(ScannerConfig::from_core(&core_config.scan))
//!     .sources(sources)
//!     .registry(RegistryClient::new(&registry_config)?)
//!     .build()?;
//!
//! let result = scanner.scan(Path::new("App.sln")).await?;
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use nuscan_core::metrics as m;
use nuscan_core::types::{PackageMetadata, PackageReference, ScanResult};
use nuscan_registry::{PackageSource, RegistryClient, RegistryQuery};
use nuscan_solution::parse_solution;

use crate::config::ScannerConfig;
use crate::error::{ProjectReadError, ScannerError};
use crate::project::{MsBuildProjectReader, ProjectReader, read_file_bounded};

/// 입력 파일 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 솔루션 파일
    Solution,
    /// 단일 프로젝트 파일
    Project,
}

impl EntryKind {
    /// 설정된 확장자로 입력 파일 종류를 판별합니다.
    pub fn detect(path: &Path, config: &ScannerConfig) -> Option<Self> {
        if has_extension(path, &config.solution_extension) {
            Some(Self::Solution)
        } else if has_extension(path, &config.project_extension) {
            Some(Self::Project)
        } else {
            None
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solution => write!(f, "solution"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// 파일 이름이 주어진 확장자로 끝나는지 확인합니다 (ASCII 대소문자 무시).
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| {
            name.len() > extension.len()
                && name
                    .get(name.len() - extension.len()..)
                    .is_some_and(|tail| tail.eq_ignore_ascii_case(extension))
        })
}

/// 수집된 패키지 참조 (중복 제거, 최초 등장 순서 유지)
#[derive(Debug, Default)]
struct Collected {
    scanned_projects: usize,
    references: Vec<PackageReference>,
    seen: HashSet<PackageReference>,
}

impl Collected {
    fn add(&mut self, references: Vec<PackageReference>) {
        self.scanned_projects += 1;
        metrics::counter!(m::SCANNER_PROJECTS_SCANNED_TOTAL).increment(1);
        for reference in references {
            if self.seen.insert(reference.clone()) {
                self.references.push(reference);
            }
        }
    }
}

/// 패키지 스캐너
///
/// 레지스트리 질의와 프로젝트 읽기는 trait으로 추상화되어 있어
/// 테스트에서 mock 구현으로 교체할 수 있습니다.
pub struct PackageScanner<R = RegistryClient, P = MsBuildProjectReader> {
    config: ScannerConfig,
    sources: Vec<PackageSource>,
    registry: R,
    reader: Arc<P>,
}

impl<R: RegistryQuery, P: ProjectReader> PackageScanner<R, P> {
    /// 입력 파일을 스캔하여 결과를 반환합니다.
    ///
    /// 프로젝트 읽기 실패, 소스 질의 실패, 일치 항목 없음은 경고 후 계속 진행합니다.
    ///
    /// # Errors
    ///
    /// - 지원하지 않는 확장자: `ScannerError::InvalidInputFormat`
    /// - 입력 파일 읽기 실패: `ScannerError::EntryFileUnreadable`, `ScannerError::FileTooBig`
    /// - 솔루션 문법 오류: `ScannerError::Solution`
    /// - 단일 프로젝트 입력 읽기 실패: `ScannerError::ProjectRead`
    pub async fn scan(&self, entry_file: &Path) -> Result<ScanResult, ScannerError> {
        let kind = EntryKind::detect(entry_file, &self.config).ok_or_else(|| {
            ScannerError::InvalidInputFormat {
                path: entry_file.display().to_string(),
            }
        })?;

        info!(
            path = %entry_file.display(),
            kind = %kind,
            sources = self.sources.len(),
            "starting package scan"
        );

        let entry = entry_file.to_path_buf();
        let max_file_size = self.config.max_file_size;
        let project_extension = self.config.project_extension.clone();
        let reader = Arc::clone(&self.reader);

        let collected = tokio::task::spawn_blocking(move || match kind {
            EntryKind::Solution => {
                collect_solution(&entry, &project_extension, max_file_size, reader.as_ref())
            }
            EntryKind::Project => collect_project(&entry, reader.as_ref()),
        })
        .await
        .map_err(|e| ScannerError::Task(format!("spawn_blocking failed: {e}")))??;

        info!(
            projects = collected.scanned_projects,
            packages = collected.references.len(),
            "package references collected"
        );

        let mut packages = Vec::with_capacity(collected.references.len());
        for reference in &collected.references {
            let mut metadata = PackageMetadata::from_reference(reference);
            match self.resolve(&mut metadata).await {
                Ok(source) => {
                    metrics::counter!(m::SCANNER_PACKAGES_RESOLVED_TOTAL).increment(1);
                    info!(package = %reference, source = %source.name, "package metadata fetched");
                }
                Err(e) => {
                    metrics::counter!(m::SCANNER_PACKAGES_UNRESOLVED_TOTAL).increment(1);
                    warn!(package = %reference, error = %e, "package metadata not found");
                }
            }
            packages.push(metadata);
        }

        let mut result = ScanResult {
            scanned_projects: collected.scanned_projects,
            total_packages: collected.references.len(),
            packages,
        };
        result.sort_packages();

        info!(
            projects = result.scanned_projects,
            packages = result.total_packages,
            unresolved = result.unresolved_count(),
            "package scan completed"
        );
        Ok(result)
    }

    /// 소스를 순서대로 질의하여 첫 번째로 일치한 항목으로 레코드를 갱신합니다.
    async fn resolve(&self, metadata: &mut PackageMetadata) -> Result<&PackageSource, ScannerError> {
        for source in &self.sources {
            match self.registry.resolve(&source.endpoint_url, &metadata.id).await {
                Ok(entries) => {
                    if let Some(entry) = entries.iter().find(|e| e.matches(&metadata.id)) {
                        entry.enrich(metadata);
                        return Ok(source);
                    }
                    debug!(
                        package = %metadata.id,
                        source = %source.name,
                        candidates = entries.len(),
                        "no matching entry in source"
                    );
                }
                Err(e) => {
                    warn!(
                        package = %metadata.id,
                        source = %source.name,
                        error = %e,
                        "package source query failed"
                    );
                }
            }
        }

        Err(ScannerError::NoMatchFound {
            package: format!("{}@{}", metadata.id, metadata.version),
        })
    }
}

/// 솔루션 파일을 파싱하고 프로젝트 파일마다 패키지 참조를 수집합니다.
fn collect_solution<P: ProjectReader>(
    entry: &Path,
    project_extension: &str,
    max_file_size: usize,
    reader: &P,
) -> Result<Collected, ScannerError> {
    let content = read_file_bounded(entry, max_file_size).map_err(|e| match e {
        ProjectReadError::Io { path, source } => ScannerError::EntryFileUnreadable { path, source },
        ProjectReadError::FileTooBig { path, size, max } => {
            ScannerError::FileTooBig { path, size, max }
        }
        other => ScannerError::ProjectRead(other),
    })?;

    let projects = parse_solution(&content)?;
    let base_dir = solution_dir(entry);
    debug!(path = %entry.display(), projects = projects.len(), "solution parsed");

    let mut collected = Collected::default();
    for project in projects
        .iter()
        .filter(|p| p.has_extension(project_extension))
    {
        let path = base_dir.join(&project.relative_path);
        match reader.read(&path) {
            Ok(references) => {
                debug!(
                    project = %project.name,
                    path = %path.display(),
                    packages = references.len(),
                    "project file read"
                );
                collected.add(references);
            }
            Err(e) => {
                metrics::counter!(m::SCANNER_PROJECTS_SKIPPED_TOTAL).increment(1);
                warn!(project = %project.name, error = %e, "failed to read project file, skipping");
            }
        }
    }

    Ok(collected)
}

/// 단일 프로젝트 파일에서 패키지 참조를 수집합니다.
fn collect_project<P: ProjectReader>(entry: &Path, reader: &P) -> Result<Collected, ScannerError> {
    let references = reader.read(entry).map_err(|e| match e {
        ProjectReadError::Io { path, source } => ScannerError::EntryFileUnreadable { path, source },
        other => ScannerError::ProjectRead(other),
    })?;

    let mut collected = Collected::default();
    collected.add(references);
    Ok(collected)
}

fn solution_dir(entry: &Path) -> PathBuf {
    match entry.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// [`PackageScanner`] 빌더
pub struct PackageScannerBuilder<R = RegistryClient, P = MsBuildProjectReader> {
    config: ScannerConfig,
    sources: Vec<PackageSource>,
    registry: Option<R>,
    reader: Option<P>,
}

impl PackageScannerBuilder {
    /// 기본 설정과 기본 구현 타입으로 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: ScannerConfig::default(),
            sources: Vec::new(),
            registry: None,
            reader: None,
        }
    }
}

impl Default for PackageScannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RegistryQuery, P: ProjectReader> PackageScannerBuilder<R, P> {
    /// 스캐너 설정을 지정합니다.
    pub fn config(mut self, config: ScannerConfig) -> Self {
        self.config = config;
        self
    }

    /// 질의할 패키지 소스 목록을 지정합니다 (우선순위 순).
    pub fn sources(mut self, sources: Vec<PackageSource>) -> Self {
        self.sources = sources;
        self
    }

    /// 레지스트리 질의 구현을 지정합니다.
    pub fn registry<R2: RegistryQuery>(self, registry: R2) -> PackageScannerBuilder<R2, P> {
        PackageScannerBuilder {
            config: self.config,
            sources: self.sources,
            registry: Some(registry),
            reader: self.reader,
        }
    }

    /// 프로젝트 리더 구현을 지정합니다.
    pub fn project_reader<P2: ProjectReader>(self, reader: P2) -> PackageScannerBuilder<R, P2> {
        PackageScannerBuilder {
            config: self.config,
            sources: self.sources,
            registry: self.registry,
            reader: Some(reader),
        }
    }
}

impl<R: RegistryQuery> PackageScannerBuilder<R, MsBuildProjectReader> {
    /// 스캐너를 빌드합니다.
    ///
    /// 프로젝트 리더를 지정하지 않으면 설정의 `max_file_size`를 사용하는
    /// [`MsBuildProjectReader`]가 사용됩니다.
    ///
    /// # Errors
    ///
    /// 설정 검증 실패 또는 레지스트리 미지정 시 `ScannerError::Config`
    pub fn build(self) -> Result<PackageScanner<R, MsBuildProjectReader>, ScannerError> {
        let max_file_size = self.config.max_file_size;
        let with_reader = PackageScannerBuilder {
            reader: Some(
                self.reader
                    .unwrap_or_else(|| MsBuildProjectReader::new(max_file_size)),
            ),
            ..self
        };
        with_reader.build_with_reader()
    }
}

impl<R: RegistryQuery, P: ProjectReader> PackageScannerBuilder<R, P> {
    /// 지정된 프로젝트 리더로 스캐너를 빌드합니다.
    ///
    /// # Errors
    ///
    /// 설정 검증 실패, 레지스트리 또는 프로젝트 리더 미지정 시 `ScannerError::Config`
    pub fn build_with_reader(self) -> Result<PackageScanner<R, P>, ScannerError> {
        self.config.validate()?;

        let registry = self.registry.ok_or_else(|| ScannerError::Config {
            field: "registry".to_owned(),
            reason: "registry client is required".to_owned(),
        })?;
        let reader = self.reader.ok_or_else(|| ScannerError::Config {
            field: "project_reader".to_owned(),
            reason: "project reader is required".to_owned(),
        })?;

        Ok(PackageScanner {
            config: self.config,
            sources: self.sources,
            registry,
            reader: Arc::new(reader),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use nuscan_registry::{PackageEntry, RegistryError};

    /// 엔드포인트별 고정 응답을 반환하고 호출 기록을 남기는 mock 레지스트리
    #[derive(Default)]
    struct MockRegistry {
        responses: HashMap<String, Vec<PackageEntry>>,
        failing: HashSet<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockRegistry {
        fn with_entries(mut self, endpoint: &str, entries: Vec<PackageEntry>) -> Self {
            self.responses.insert(endpoint.to_owned(), entries);
            self
        }

        fn failing(mut self, endpoint: &str) -> Self {
            self.failing.insert(endpoint.to_owned());
            self
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RegistryQuery for MockRegistry {
        async fn resolve(
            &self,
            endpoint_url: &str,
            id: &str,
        ) -> Result<Vec<PackageEntry>, RegistryError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint_url.to_owned(), id.to_owned()));
            if self.failing.contains(endpoint_url) {
                return Err(RegistryError::HttpStatus {
                    url: endpoint_url.to_owned(),
                    status: 500,
                });
            }
            Ok(self
                .responses
                .get(endpoint_url)
                .map(|entries| entries.iter().filter(|e| e.id.contains(id)).cloned().collect())
                .unwrap_or_default())
        }
    }

    /// 경로별 고정 참조 목록을 반환하는 mock 프로젝트 리더
    #[derive(Default)]
    struct MockReader {
        projects: HashMap<PathBuf, Vec<PackageReference>>,
    }

    impl ProjectReader for MockReader {
        fn read(&self, path: &Path) -> Result<Vec<PackageReference>, ProjectReadError> {
            self.projects
                .get(path)
                .cloned()
                .ok_or_else(|| ProjectReadError::Io {
                    path: path.display().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
                })
        }
    }

    fn source(name: &str, url: &str) -> PackageSource {
        PackageSource {
            origin_file: PathBuf::from("/etc/NuGet/NuGet.Config"),
            name: name.to_owned(),
            endpoint_url: url.to_owned(),
            protocol_version: String::new(),
        }
    }

    fn entry(id: &str, title: &str) -> PackageEntry {
        PackageEntry {
            id: id.to_owned(),
            version: "99.0.0".to_owned(),
            title: title.to_owned(),
            description: format!("{title} description"),
            license_url: format!("https://licenses.example/{id}"),
            ..PackageEntry::default()
        }
    }

    fn scanner(
        registry: MockRegistry,
        reader: MockReader,
        sources: Vec<PackageSource>,
    ) -> PackageScanner<MockRegistry, MockReader> {
        PackageScannerBuilder::new()
            .sources(sources)
            .registry(registry)
            .project_reader(reader)
            .build_with_reader()
            .unwrap()
    }

    #[test]
    fn detect_entry_kind() {
        let config = ScannerConfig::default();
        assert_eq!(
            EntryKind::detect(Path::new("App.sln"), &config),
            Some(EntryKind::Solution)
        );
        assert_eq!(
            EntryKind::detect(Path::new("src/App.CSPROJ"), &config),
            Some(EntryKind::Project)
        );
        assert_eq!(EntryKind::detect(Path::new("App.vbproj"), &config), None);
        assert_eq!(EntryKind::detect(Path::new(".sln"), &config), None);
    }

    #[test]
    fn has_extension_handles_non_ascii_names() {
        assert!(has_extension(Path::new("프로젝트.csproj"), ".csproj"));
        assert!(!has_extension(Path::new("프로"), ".csproj"));
    }

    #[test]
    fn solution_dir_of_bare_file_name_is_current_dir() {
        assert_eq!(solution_dir(Path::new("App.sln")), PathBuf::from("."));
        assert_eq!(
            solution_dir(Path::new("/work/App.sln")),
            PathBuf::from("/work")
        );
    }

    #[test]
    fn collected_dedups_by_id_and_version() {
        let mut collected = Collected::default();
        collected.add(vec![
            PackageReference::new("A", "1.0.0"),
            PackageReference::new("B", "1.0.0"),
        ]);
        collected.add(vec![
            PackageReference::new("A", "1.0.0"),
            PackageReference::new("A", "2.0.0"),
        ]);
        assert_eq!(collected.scanned_projects, 2);
        assert_eq!(
            collected.references,
            vec![
                PackageReference::new("A", "1.0.0"),
                PackageReference::new("B", "1.0.0"),
                PackageReference::new("A", "2.0.0"),
            ]
        );
    }

    #[test]
    fn build_without_registry_fails() {
        let result = PackageScannerBuilder::new().build();
        assert!(matches!(result, Err(ScannerError::Config { field, .. }) if field == "registry"));
    }

    #[test]
    fn build_with_invalid_config_fails() {
        let config = ScannerConfig {
            max_file_size: 0,
            ..ScannerConfig::default()
        };
        let result = PackageScannerBuilder::new()
            .config(config)
            .registry(MockRegistry::default())
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unknown_extension_is_rejected_before_reading() {
        let scanner = scanner(MockRegistry::default(), MockReader::default(), vec![]);
        let err = scanner.scan(Path::new("readme.txt")).await.unwrap_err();
        assert!(matches!(err, ScannerError::InvalidInputFormat { .. }));
    }

    #[tokio::test]
    async fn project_entry_resolves_first_match() {
        let path = PathBuf::from("/work/App.csproj");
        let mut reader = MockReader::default();
        reader.projects.insert(
            path.clone(),
            vec![
                PackageReference::new("Serilog", "2.10.0"),
                PackageReference::new("Dapper", "2.0.123"),
            ],
        );
        let registry = MockRegistry::default()
            .with_entries("https://a.example/v3/index.json", vec![entry("Serilog", "Serilog A")])
            .with_entries(
                "https://b.example/v3/index.json",
                vec![entry("Serilog", "Serilog B"), entry("Dapper", "Dapper B")],
            );
        let scanner = scanner(
            registry,
            reader,
            vec![
                source("a", "https://a.example/v3/index.json"),
                source("b", "https://b.example/v3/index.json"),
            ],
        );

        let result = scanner.scan(&path).await.unwrap();

        assert_eq!(result.scanned_projects, 1);
        assert_eq!(result.total_packages, 2);
        let ids: Vec<_> = result.packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["Dapper", "Serilog"]);

        let dapper = &result.packages[0];
        assert_eq!(dapper.name, "Dapper B");
        assert_eq!(dapper.version, "2.0.123");
        let serilog = &result.packages[1];
        assert_eq!(serilog.name, "Serilog A");
        assert_eq!(serilog.version, "2.10.0");

        // Serilog는 a에서 찾았으므로 b에 질의하지 않음
        let calls = scanner.registry.calls();
        assert_eq!(
            calls
                .iter()
                .filter(|(url, id)| id == "Serilog" && url.contains("b.example"))
                .count(),
            0
        );
    }

    #[tokio::test]
    async fn failing_source_falls_through_to_next() {
        let path = PathBuf::from("/work/App.csproj");
        let mut reader = MockReader::default();
        reader
            .projects
            .insert(path.clone(), vec![PackageReference::new("Serilog", "2.10.0")]);
        let registry = MockRegistry::default()
            .failing("https://down.example/")
            .with_entries("https://up.example/", vec![entry("Serilog", "Serilog")]);
        let scanner = scanner(
            registry,
            reader,
            vec![
                source("down", "https://down.example/"),
                source("up", "https://up.example/"),
            ],
        );

        let result = scanner.scan(&path).await.unwrap();
        assert!(result.packages[0].resolved);
        assert_eq!(scanner.registry.calls().len(), 2);
    }

    #[tokio::test]
    async fn partial_id_candidates_do_not_match() {
        let path = PathBuf::from("/work/App.csproj");
        let mut reader = MockReader::default();
        reader
            .projects
            .insert(path.clone(), vec![PackageReference::new("Serilog", "2.10.0")]);
        let registry = MockRegistry::default().with_entries(
            "https://a.example/",
            vec![entry("Serilog.Sinks.Console", "Console sink")],
        );
        let scanner = scanner(registry, reader, vec![source("a", "https://a.example/")]);

        let result = scanner.scan(&path).await.unwrap();
        let serilog = &result.packages[0];
        assert!(!serilog.resolved);
        assert!(serilog.name.is_empty());
        assert_eq!(result.unresolved_count(), 1);
    }

    #[tokio::test]
    async fn no_sources_leaves_packages_unresolved() {
        let path = PathBuf::from("/work/App.csproj");
        let mut reader = MockReader::default();
        reader
            .projects
            .insert(path.clone(), vec![PackageReference::new("A", "1.0.0")]);
        let scanner = scanner(MockRegistry::default(), reader, vec![]);

        let result = scanner.scan(&path).await.unwrap();
        assert_eq!(result.total_packages, 1);
        assert_eq!(result.unresolved_count(), 1);
    }

    #[tokio::test]
    async fn missing_project_entry_is_unreadable() {
        let scanner = scanner(MockRegistry::default(), MockReader::default(), vec![]);
        let err = scanner
            .scan(Path::new("/work/Missing.csproj"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScannerError::EntryFileUnreadable { .. }));
    }

    #[tokio::test]
    async fn solution_entry_dedups_and_skips_unreadable_projects() {
        let dir = tempfile::tempdir().unwrap();
        let sln = dir.path().join("App.sln");
        std::fs::write(
            &sln,
            "Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Web\", \"Web/Web.csproj\", \"{11111111-1111-1111-1111-111111111111}\"\nEndProject\n\
             Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Api\", \"Api/Api.csproj\", \"{22222222-2222-2222-2222-222222222222}\"\nEndProject\n\
             Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"Gone\", \"Gone/Gone.csproj\", \"{33333333-3333-3333-3333-333333333333}\"\nEndProject\n\
             Project(\"{F2A71F9B-5D33-465A-A702-920D77279786}\") = \"Lib\", \"Lib/Lib.fsproj\", \"{44444444-4444-4444-4444-444444444444}\"\nEndProject\n",
        )
        .unwrap();

        let mut reader = MockReader::default();
        reader.projects.insert(
            dir.path().join("Web").join("Web.csproj"),
            vec![PackageReference::new("Newtonsoft.Json", "13.0.1")],
        );
        reader.projects.insert(
            dir.path().join("Api").join("Api.csproj"),
            vec![
                PackageReference::new("Newtonsoft.Json", "13.0.1"),
                PackageReference::new("Dapper", "2.0.123"),
            ],
        );
        reader.projects.insert(
            dir.path().join("Lib").join("Lib.fsproj"),
            vec![PackageReference::new("FSharp.Core", "6.0.0")],
        );

        let scanner = scanner(MockRegistry::default(), reader, vec![]);
        let result = scanner.scan(&sln).await.unwrap();

        assert_eq!(result.scanned_projects, 2);
        assert_eq!(result.total_packages, 2);
        let ids: Vec<_> = result.packages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["Dapper", "Newtonsoft.Json"]);
    }

    #[tokio::test]
    async fn malformed_solution_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let sln = dir.path().join("Broken.sln");
        std::fs::write(&sln, "Project(\"{X}\") = \"Web\"").unwrap();

        let scanner = scanner(MockRegistry::default(), MockReader::default(), vec![]);
        let err = scanner.scan(&sln).await.unwrap_err();
        assert!(matches!(err, ScannerError::Solution(_)));
    }

    #[tokio::test]
    async fn oversized_solution_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let sln = dir.path().join("Big.sln");
        std::fs::write(&sln, "x".repeat(64)).unwrap();

        let config = ScannerConfig {
            max_file_size: 16,
            ..ScannerConfig::default()
        };
        let scanner = PackageScannerBuilder::new()
            .config(config)
            .registry(MockRegistry::default())
            .project_reader(MockReader::default())
            .build_with_reader()
            .unwrap();

        let err = scanner.scan(&sln).await.unwrap_err();
        assert!(matches!(err, ScannerError::FileTooBig { size: 64, max: 16, .. }));
    }
}
