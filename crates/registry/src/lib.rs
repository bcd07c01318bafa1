#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`error`]: 도메인 에러 (`RegistryError`)
//! - [`config`]: 클라이언트/탐색 설정 (`RegistryClientConfig`, builder)
//! - [`types`]: 도메인 타입 (`PackageSource`, `PackageEntry`)
//! - [`locator`]: 설정 파일 탐색 (`ConfigSourceLocator`)
//! - [`protocol`]: 프로토콜 판별 및 응답 디코딩 (`Protocol`, `RegistryResponse`)
//! - [`client`]: 레지스트리 질의 (`RegistryQuery` trait, `RegistryClient`)
//!
//! # Architecture
//!
//! ```text
//! *.config --> ConfigSourceLocator --> Vec<PackageSource>
//!                                            |
//!                                      endpoint_url
//!                                            |
//!                                     RegistryClient --> Content-Type
//!                                            |
//!                         +------------------+------------------+
//!                         |                                     |
//!                  application/xml                      application/json
//!                  FindPackagesById()               SearchQueryService ?q=
//!                         |                                     |
//!                  RegistryResponse::V2               RegistryResponse::V3
//!                         +------------------+------------------+
//!                                            |
//!                                    Vec<PackageEntry>
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod locator;
pub mod protocol;
pub mod types;

// --- Public API Re-exports ---

pub use client::{RegistryClient, RegistryQuery};
pub use config::{RegistryClientConfig, RegistryClientConfigBuilder};
pub use error::RegistryError;
pub use locator::ConfigSourceLocator;
pub use protocol::{Protocol, RegistryResponse};
pub use types::{PackageEntry, PackageSource};
