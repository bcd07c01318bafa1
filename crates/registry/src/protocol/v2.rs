//! V2 (OData/XML) 프로토콜
//!
//! `FindPackagesById()` 질의는 Atom 피드를 반환합니다.
//!
//! ```xml
//! <feed xmlns="http://www.w3.org/2005/Atom"
//!       xmlns:d="http://schemas.microsoft.com/ado/2007/08/dataservices"
//!       xmlns:m="http://schemas.microsoft.com/ado/2007/08/dataservices/metadata">
//!   <entry>
//!     <title type="text">Serilog</title>
//!     <summary type="text"></summary>
//!     <author><name>Serilog Contributors</name></author>
//!     <m:properties>
//!       <d:Id>Serilog</d:Id>
//!       <d:NormalizedVersion>2.10.0</d:NormalizedVersion>
//!       <d:Tags>serilog logging</d:Tags>
//!     </m:properties>
//!   </entry>
//! </feed>
//! ```
//!
//! 네임스페이스 접두어는 무시하고 로컬 이름으로만 매칭합니다.

use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Url;

use crate::types::PackageEntry;

/// `FindPackagesById()` 질의 URL을 만듭니다.
pub fn query_url(endpoint: &Url, id: &str) -> Url {
    let mut url = endpoint.clone();
    let path = format!("{}/FindPackagesById()", endpoint.path().trim_end_matches('/'));
    url.set_path(&path);
    url.query_pairs_mut().append_pair("id", &format!("'{id}'"));
    url
}

/// Atom 피드
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feed {
    pub entries: Vec<FeedEntry>,
}

/// 피드의 `entry` 한 건 (원문 그대로)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: String,
    pub version: String,
    pub title: String,
    pub description: String,
    pub summary: String,
    /// `author/name` 값 (쉼표로 구분된 원문)
    pub authors: Vec<String>,
    /// `properties/Tags` 값 (공백으로 구분된 원문)
    pub tags: String,
    pub license_url: String,
    pub project_url: String,
}

impl FeedEntry {
    fn assign(&mut self, path: &[&str], value: String) {
        match path {
            ["title"] => self.title = value,
            ["summary"] => self.summary = value,
            ["author", "name"] => self.authors.push(value),
            ["properties", "Id"] => self.id = value,
            ["properties", "NormalizedVersion"] => self.version = value,
            ["properties", "Description"] => self.description = value,
            ["properties", "Tags"] => self.tags = value,
            ["properties", "LicenseUrl"] => self.license_url = value,
            ["properties", "ProjectUrl"] => self.project_url = value,
            _ => {}
        }
    }
}

impl From<FeedEntry> for PackageEntry {
    fn from(entry: FeedEntry) -> Self {
        let authors = entry
            .authors
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .map(str::to_owned)
            .collect();
        let tags = entry
            .tags
            .split(' ')
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            id: entry.id,
            version: entry.version,
            title: entry.title,
            description: entry.description,
            summary: entry.summary,
            authors,
            tags,
            license_url: entry.license_url,
            project_url: entry.project_url,
        }
    }
}

/// Atom 피드 XML을 파싱합니다.
pub fn parse_feed(xml: &str) -> Result<Feed, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut feed = Feed::default();
    let mut path: Vec<String> = Vec::new();
    let mut current: Option<(usize, FeedEntry)> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == "entry" && current.is_none() {
                    current = Some((path.len() + 1, FeedEntry::default()));
                }
                path.push(name);
                text.clear();
            }
            Event::Text(t) => text.push_str(&t.unescape()?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c.into_inner())),
            Event::End(_) => {
                match current.as_ref().map(|(depth, _)| *depth) {
                    Some(depth) if path.len() == depth => {
                        if let Some((_, entry)) = current.take() {
                            feed.entries.push(entry);
                        }
                    }
                    Some(depth) if path.len() > depth => {
                        if let Some((_, entry)) = current.as_mut() {
                            let relative: Vec<&str> =
                                path[depth..].iter().map(String::as_str).collect();
                            entry.assign(&relative, std::mem::take(&mut text));
                        }
                    }
                    _ => {}
                }
                path.pop();
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(feed)
}
