//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que usa el servidor,
//! sin librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (request line + headers) desde un stream
//! - Headers con lookup case-insensitive
//! - Construcción y serialización de responses
//! - Compresión gzip del body
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/hola HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 4\r\n
//! \r\n
//! hola
//! ```
//!
//! El body de un request nunca se lee por adelantado: el handler de POST lo
//! consume bajo demanda usando `Content-Length`.

pub mod headers;   // HeaderMap case-insensitive
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use headers::HeaderMap;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
