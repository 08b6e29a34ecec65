//! # minihttp - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1: inicializa el logging
//! estructurado, parsea la configuración CLI y arranca el servidor.
//! El proceso corre hasta que el listener falle; no hay comando de
//! shutdown ni manejo de señales.

use minihttp::config::Config;
use minihttp::server::Server;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    // Logging estructurado: nivel `info` por defecto, ajustable con RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Configuración desde CLI argumentos y variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        error!(error = %e, "configuración inválida");
        std::process::exit(1);
    }

    // Iniciar el servidor (esto bloqueará el thread)
    let mut server = Server::new(config);
    if let Err(e) = server.run() {
        error!(error = %e, "error fatal del servidor");
        std::process::exit(1);
    }
}
