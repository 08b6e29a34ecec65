//! # minihttp
//! src/lib.rs
//!
//! Servidor HTTP/1.1 minimalista implementado desde cero sobre `std::net`,
//! con conexiones persistentes, echo, reflexión de User-Agent, archivos
//! estáticos (GET/POST) y negociación de compresión gzip.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing del protocolo HTTP/1.1 y construcción de respuestas
//! - `router`: Despacho de peticiones a los handlers de contenido
//! - `server`: Listener TCP y loop de conexión (un thread por conexión)
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use minihttp::config::Config;
//! use minihttp::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod router;
pub mod server;
