#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`token`]: 토큰 타입 (`Token`, `TokenKind`)
//! - [`lexer`]: 렉서 (`Lexer`)
//! - [`parser`]: 솔루션 파서 (`SolutionParser`, `ProjectDescriptor`)
//! - [`error`]: 도메인 에러 (`SolutionError`)

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::SolutionError;
pub use lexer::Lexer;
pub use parser::{ProjectDescriptor, SolutionParser, parse_solution};
pub use token::{Token, TokenKind};
