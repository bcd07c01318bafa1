//! 프로젝트 파일 리더 -- MSBuild `.csproj`에서 패키지 참조 추출
//!
//! [`ProjectReader`] trait은 프로젝트 파일 하나를 읽어 패키지 참조 목록을 반환하는
//! 인터페이스입니다. 기본 구현은 [`MsBuildProjectReader`]입니다.
//!
//! # 인식하는 형식
//!
//! ```xml
//! <Project Sdk="Microsoft.NET.Sdk">
//!   <ItemGroup>
//!     <PackageReference Include="Serilog" Version="2.10.0" />
//!     <PackageReference Include="Dapper">
//!       <Version>2.0.123</Version>
//!     </PackageReference>
//!   </ItemGroup>
//! </Project>
//! ```
//!
//! `Project > ItemGroup > PackageReference` 경로에 있는 요소만 인식합니다.
//! `Include`가 비어 있는 참조(`Update` 전용 등)는 제외합니다.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use nuscan_core::types::PackageReference;

use crate::error::ProjectReadError;

const PROJECT: &[u8] = b"Project";
const ITEM_GROUP: &[u8] = b"ItemGroup";
const PACKAGE_REFERENCE: &[u8] = b"PackageReference";
const VERSION: &[u8] = b"Version";

/// 프로젝트 파일 리더 trait
///
/// 솔루션 스캔은 blocking 태스크 안에서 실행되므로 동기 인터페이스입니다.
pub trait ProjectReader: Send + Sync + 'static {
    /// 프로젝트 파일을 읽어 선언된 패키지 참조를 문서 순서대로 반환합니다.
    fn read(&self, path: &Path) -> Result<Vec<PackageReference>, ProjectReadError>;
}

/// quick-xml 기반 MSBuild 프로젝트 리더
#[derive(Debug, Clone)]
pub struct MsBuildProjectReader {
    max_file_size: usize,
}

impl MsBuildProjectReader {
    /// 최대 파일 크기(바이트)를 지정하여 리더를 생성합니다.
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }
}

impl ProjectReader for MsBuildProjectReader {
    fn read(&self, path: &Path) -> Result<Vec<PackageReference>, ProjectReadError> {
        let content = read_file_bounded(path, self.max_file_size)?;
        parse_project(&content).map_err(|e| ProjectReadError::Xml {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// 파일 크기를 확인한 뒤 UTF-8 문자열로 읽습니다.
pub(crate) fn read_file_bounded(path: &Path, max: usize) -> Result<String, ProjectReadError> {
    let io_error = |source| ProjectReadError::Io {
        path: path.display().to_string(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_error)?.len() as usize;
    if size > max {
        return Err(ProjectReadError::FileTooBig {
            path: path.display().to_string(),
            size,
            max,
        });
    }

    std::fs::read_to_string(path).map_err(io_error)
}

/// MSBuild 프로젝트 XML에서 패키지 참조를 추출합니다.
///
/// `Version` 속성이 없으면 중첩된 `<Version>` 요소의 텍스트를 사용합니다.
/// 둘 다 없으면 빈 버전 문자열이 됩니다.
pub fn parse_project(xml: &str) -> Result<Vec<PackageReference>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut pending: Option<PackageReference> = None;
    let mut references = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if in_item_group(&path) && name == PACKAGE_REFERENCE {
                    pending = Some(reference_from_attributes(&e)?);
                }
                path.push(name);
            }
            Event::Empty(e)
                if in_item_group(&path) && e.local_name().as_ref() == PACKAGE_REFERENCE =>
            {
                push_reference(&mut references, reference_from_attributes(&e)?);
            }
            Event::Text(t) if in_version_element(&path) => {
                if let Some(reference) = pending.as_mut().filter(|r| r.version.is_empty()) {
                    reference.version = t.unescape()?.trim().to_owned();
                }
            }
            Event::End(_) => {
                let closed = path.pop();
                let closes_reference =
                    closed.as_deref() == Some(PACKAGE_REFERENCE) && in_item_group(&path);
                if let Some(reference) = pending.take_if(|_| closes_reference) {
                    push_reference(&mut references, reference);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(references)
}

fn in_item_group(path: &[Vec<u8>]) -> bool {
    matches!(path, [project, group] if project == PROJECT && group == ITEM_GROUP)
}

fn in_version_element(path: &[Vec<u8>]) -> bool {
    matches!(
        path,
        [project, group, reference, version]
            if project == PROJECT
                && group == ITEM_GROUP
                && reference == PACKAGE_REFERENCE
                && version == VERSION
    )
}

fn reference_from_attributes(e: &BytesStart<'_>) -> Result<PackageReference, quick_xml::Error> {
    let mut reference = PackageReference::new("", "");
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        match attr.key.local_name().as_ref() {
            b"Include" => reference.id = attr.unescape_value()?.trim().to_owned(),
            b"Version" => reference.version = attr.unescape_value()?.trim().to_owned(),
            _ => {}
        }
    }
    Ok(reference)
}

fn push_reference(references: &mut Vec<PackageReference>, reference: PackageReference) {
    if !reference.id.is_empty() {
        references.push(reference);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDK_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net6.0</TargetFramework>
    <Version>9.9.9</Version>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Serilog" Version="2.10.0" />
    <PackageReference Include="Dapper" Version="2.0.123" />
  </ItemGroup>
  <ItemGroup>
    <ProjectReference Include="..\Core\Core.csproj" />
  </ItemGroup>
</Project>
"#;

    #[test]
    fn parses_attribute_references_in_order() {
        let refs = parse_project(SDK_PROJECT).unwrap();
        assert_eq!(
            refs,
            vec![
                PackageReference::new("Serilog", "2.10.0"),
                PackageReference::new("Dapper", "2.0.123"),
            ]
        );
    }

    #[test]
    fn property_group_version_is_not_a_package() {
        let refs = parse_project(SDK_PROJECT).unwrap();
        assert!(refs.iter().all(|r| r.version != "9.9.9"));
    }

    #[test]
    fn nested_version_element() {
        let xml = r#"<Project>
  <ItemGroup>
    <PackageReference Include="Newtonsoft.Json">
      <Version>13.0.1</Version>
      <PrivateAssets>all</PrivateAssets>
    </PackageReference>
  </ItemGroup>
</Project>"#;
        let refs = parse_project(xml).unwrap();
        assert_eq!(refs, vec![PackageReference::new("Newtonsoft.Json", "13.0.1")]);
    }

    #[test]
    fn attribute_version_wins_over_nested_element() {
        let xml = r#"<Project><ItemGroup>
<PackageReference Include="A" Version="1.0.0"><Version>2.0.0</Version></PackageReference>
</ItemGroup></Project>"#;
        let refs = parse_project(xml).unwrap();
        assert_eq!(refs[0].version, "1.0.0");
    }

    #[test]
    fn missing_version_is_empty() {
        let xml = r#"<Project><ItemGroup><PackageReference Include="A" /></ItemGroup></Project>"#;
        let refs = parse_project(xml).unwrap();
        assert_eq!(refs, vec![PackageReference::new("A", "")]);
    }

    #[test]
    fn update_only_reference_is_skipped() {
        let xml = r#"<Project><ItemGroup>
<PackageReference Update="A" Version="1.0.0" />
<PackageReference Include="B" Version="2.0.0" />
</ItemGroup></Project>"#;
        let refs = parse_project(xml).unwrap();
        assert_eq!(refs, vec![PackageReference::new("B", "2.0.0")]);
    }

    #[test]
    fn reference_outside_item_group_is_ignored() {
        let xml = r#"<Project>
<PackageReference Include="Stray" Version="1.0.0" />
<Choose><When><ItemGroup><PackageReference Include="Nested" Version="1.0.0" /></ItemGroup></When></Choose>
</Project>"#;
        assert!(parse_project(xml).unwrap().is_empty());
    }

    #[test]
    fn non_project_root_is_ignored() {
        let xml = r#"<packages><ItemGroup><PackageReference Include="A" Version="1" /></ItemGroup></packages>"#;
        assert!(parse_project(xml).unwrap().is_empty());
    }

    #[test]
    fn namespaced_legacy_project() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="15.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <ItemGroup>
    <PackageReference Include="log4net" Version="2.0.12" />
  </ItemGroup>
</Project>"#;
        let refs = parse_project(xml).unwrap();
        assert_eq!(refs, vec![PackageReference::new("log4net", "2.0.12")]);
    }

    #[test]
    fn escaped_attribute_values() {
        let xml = r#"<Project><ItemGroup><PackageReference Include="A&amp;B" Version="[1.0,2.0)" /></ItemGroup></Project>"#;
        let refs = parse_project(xml).unwrap();
        assert_eq!(refs, vec![PackageReference::new("A&B", "[1.0,2.0)")]);
    }

    #[test]
    fn mismatched_tags_are_error() {
        let xml = "<Project><ItemGroup></Project>";
        assert!(parse_project(xml).is_err());
    }

    #[test]
    fn reader_reports_missing_file() {
        let reader = MsBuildProjectReader::new(1024);
        let err = reader.read(Path::new("/nonexistent/App.csproj")).unwrap_err();
        assert!(matches!(err, ProjectReadError::Io { .. }));
    }

    #[test]
    fn reader_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("App.csproj");
        std::fs::write(&path, SDK_PROJECT).unwrap();

        let reader = MsBuildProjectReader::new(16);
        let err = reader.read(&path).unwrap_err();
        assert!(matches!(err, ProjectReadError::FileTooBig { max: 16, .. }));
    }

    #[test]
    fn reader_wraps_xml_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Broken.csproj");
        std::fs::write(&path, "<Project><ItemGroup></Project>").unwrap();

        let reader = MsBuildProjectReader::new(1024);
        let err = reader.read(&path).unwrap_err();
        match err {
            ProjectReadError::Xml { path: p, .. } => assert!(p.ends_with("Broken.csproj")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
