//! Baseload Common Library
//!
//! Shared types, utilities, and error handling for the baseload workspace.
//!
//! # Overview
//!
//! This crate provides the functionality shared by all baseload members:
//!
//! - **Document Validation**: CPF and CNPJ check-digit validation
//! - **Client Records**: The client entity and its flat-file parser
//! - **Error Handling**: Typed parse errors
//! - **Logging**: Tracing-based logging setup
//!
//! # Example
//!
//! ```
//! use baseload_common::{document::cpf, Client};
//!
//! let mut client = Client::parse_line(
//!     "37078130022 1 0 2020-01-01 100,00 200,00 NULL NULL",
//! ).unwrap();
//! client.validate_documents();
//! assert_eq!(client.valid_cpf, Some(true));
//! assert!(cpf::validate("37078130022"));
//! ```

pub mod document;
pub mod error;
pub mod logging;
pub mod record;

// Re-export commonly used types
pub use error::ParseError;
pub use record::Client;
