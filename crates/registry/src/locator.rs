//! 패키지 소스 탐색기
//!
//! [`ConfigSourceLocator`]는 플랫폼 기본 위치와 사용자가 지정한 경로를 재귀적으로
//! 탐색하여 `*.config` 파일에 선언된 HTTP(S) 패키지 소스를 수집합니다.
//!
//! # 탐색 순서
//!
//! 1. 플랫폼 기본 위치 ([`WINDOWS_LOCATIONS`] 또는 [`UNIX_LOCATIONS`])
//! 2. 추가 경로 (파일이면 상위 디렉토리)
//!
//! 각 디렉토리는 파일 이름 순으로 순회하며, 같은 엔드포인트 URL은 처음 발견된 것만 유지합니다.
//! 이 모듈의 함수는 모두 동기 I/O이므로 비동기 컨텍스트에서는
//! `tokio::task::spawn_blocking`으로 호출해야 합니다.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use reqwest::Url;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use nuscan_core::metrics as m;

use crate::config::RegistryClientConfig;
use crate::error::RegistryError;
use crate::types::PackageSource;

/// Windows 기본 위치 (`%VAR%`는 환경변수로 치환)
pub const WINDOWS_LOCATIONS: &[&str] = &[r"%ProgramFiles(x86)%\NuGet\Config", r"%AppData%\NuGet"];

/// Windows 외 플랫폼 기본 위치 (`~`는 홈 디렉토리)
pub const UNIX_LOCATIONS: &[&str] = &["~/.nuget/NuGet", "~/.config/NuGet"];

/// 설정 파일 확장자
const CONFIG_EXTENSION: &str = ".config";

/// 패키지 소스 탐색기
#[derive(Debug, Clone)]
pub struct ConfigSourceLocator {
    search_default_locations: bool,
    home_dir: Option<PathBuf>,
}

impl Default for ConfigSourceLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSourceLocator {
    /// 플랫폼 기본 위치를 포함하는 탐색기를 생성합니다.
    pub fn new() -> Self {
        Self {
            search_default_locations: true,
            home_dir: dirs::home_dir(),
        }
    }

    /// 설정에 따라 탐색기를 생성합니다.
    pub fn from_config(config: &RegistryClientConfig) -> Self {
        Self::new().with_default_locations(config.search_default_locations)
    }

    /// 플랫폼 기본 위치 탐색 여부를 설정합니다.
    pub fn with_default_locations(mut self, enabled: bool) -> Self {
        self.search_default_locations = enabled;
        self
    }

    /// `~` 확장에 사용할 홈 디렉토리를 지정합니다.
    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home.into());
        self
    }

    /// 현재 플랫폼의 기본 탐색 디렉토리 목록을 반환합니다.
    pub fn default_locations(&self) -> Vec<PathBuf> {
        if cfg!(windows) {
            WINDOWS_LOCATIONS
                .iter()
                .map(|template| {
                    PathBuf::from(expand_env_placeholders(template, |name| {
                        std::env::var(name).ok()
                    }))
                })
                .collect()
        } else {
            UNIX_LOCATIONS
                .iter()
                .filter_map(|template| expand_home(template, self.home_dir.as_deref()))
                .collect()
        }
    }

    /// 패키지 소스를 탐색합니다.
    ///
    /// # Errors
    ///
    /// HTTP(S) 소스를 하나도 찾지 못하면 `RegistryError::NoSourcesFound`를 반환합니다.
    pub fn search(&self, extra_paths: &[PathBuf]) -> Result<Vec<PackageSource>, RegistryError> {
        info!("searching NuGet package sources");

        let mut locations = if self.search_default_locations {
            self.default_locations()
        } else {
            Vec::new()
        };
        locations.extend(extra_paths.iter().filter_map(|p| search_root(p)));

        let mut seen = HashSet::new();
        let mut sources = Vec::new();
        for location in &locations {
            for source in scan_location(location) {
                if seen.insert(source.endpoint_url.clone()) {
                    sources.push(source);
                } else {
                    debug!(url = %source.endpoint_url, file = %source.origin_file.display(), "duplicate package source, skipping");
                }
            }
        }

        if sources.is_empty() {
            return Err(RegistryError::NoSourcesFound);
        }

        info!(count = sources.len(), "found package sources");
        for source in &sources {
            info!(url = %source.endpoint_url, "> {source}");
        }
        metrics::counter!(m::REGISTRY_SOURCES_DISCOVERED_TOTAL).increment(sources.len() as u64);

        Ok(sources)
    }
}

/// `%NAME%` 자리표시자를 `lookup` 결과로 치환합니다.
///
/// 값이 없는 변수는 빈 문자열로 치환되고, 닫히지 않은 `%`는 그대로 둡니다.
pub fn expand_env_placeholders(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('%') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('%') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&lookup(&after[..end]).unwrap_or_default());
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

/// `~/` 접두어를 홈 디렉토리로 확장합니다. 홈을 알 수 없으면 `None`입니다.
fn expand_home(template: &str, home: Option<&Path>) -> Option<PathBuf> {
    match template.strip_prefix("~/") {
        Some(rest) => match home {
            Some(home) => Some(home.join(rest)),
            None => {
                debug!(location = template, "home directory unknown, skipping location");
                None
            }
        },
        None => Some(PathBuf::from(template)),
    }
}

/// 추가 경로를 탐색 루트로 변환합니다 (파일이면 상위 디렉토리).
fn search_root(path: &Path) -> Option<PathBuf> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Some(path.to_path_buf()),
        Ok(_) => match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Some(parent.to_path_buf()),
            _ => Some(PathBuf::from(".")),
        },
        Err(e) => {
            warn!(path = %path.display(), error = %e, "extra config path not accessible, skipping");
            None
        }
    }
}

/// 디렉토리 하나를 재귀 탐색하여 소스를 수집합니다.
fn scan_location(location: &Path) -> Vec<PackageSource> {
    let mut sources = Vec::new();
    if !location.exists() {
        debug!(location = %location.display(), "location does not exist, skipping");
        return sources;
    }

    for entry in WalkDir::new(location).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(location = %location.display(), error = %e, "failed to walk directory entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_config_file(entry.path()) {
            continue;
        }

        let path = entry.path();
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config file");
                continue;
            }
        };

        match parse_package_sources(&content, path) {
            Ok(found) => {
                debug!(path = %path.display(), count = found.len(), "parsed config file");
                sources.extend(found);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse config file");
            }
        }
    }

    sources
}

fn is_config_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(CONFIG_EXTENSION))
}

/// 설정 파일 XML에서 `configuration/packageSources/add` 항목 중
/// HTTP(S) 엔드포인트만 추출합니다.
pub fn parse_package_sources(
    xml: &str,
    origin_file: &Path,
) -> Result<Vec<PackageSource>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut sources = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if is_source_element(&e, &path) {
                    push_source(&e, origin_file, &mut sources)?;
                }
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Event::Empty(e) if is_source_element(&e, &path) => {
                push_source(&e, origin_file, &mut sources)?;
            }
            Event::End(_) => {
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(sources)
}

fn is_source_element(e: &BytesStart<'_>, path: &[String]) -> bool {
    e.local_name().as_ref() == b"add"
        && path.len() >= 2
        && path[path.len() - 2] == "configuration"
        && path[path.len() - 1] == "packageSources"
}

fn push_source(
    e: &BytesStart<'_>,
    origin_file: &Path,
    sources: &mut Vec<PackageSource>,
) -> Result<(), quick_xml::Error> {
    let mut key = String::new();
    let mut value = String::new();
    let mut protocol_version = String::new();

    for attr in e.attributes() {
        let attr = attr?;
        let target = match attr.key.local_name().as_ref() {
            b"key" => &mut key,
            b"value" => &mut value,
            b"protocolVersion" => &mut protocol_version,
            _ => continue,
        };
        *target = attr.unescape_value()?.into_owned();
    }

    if !is_remote_endpoint(&value) {
        debug!(name = %key, value = %value, "not an http(s) package source, skipping");
        return Ok(());
    }

    sources.push(PackageSource {
        origin_file: origin_file.to_path_buf(),
        name: key,
        endpoint_url: value,
        protocol_version,
    });
    Ok(())
}

/// 로컬 경로가 아니고 절대 http/https URL인지 확인합니다.
fn is_remote_endpoint(value: &str) -> bool {
    if value.is_empty() || Path::new(value).exists() {
        return false;
    }
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}
