//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio thread,
//! sin estado compartido entre conexiones: el socket, los headers y los
//! handles de archivo pertenecen a un solo thread.
//!
//! ## Loop de conexión
//!
//! ```text
//! AwaitingRequest → Dispatching → Responding → (AwaitingRequest | Closed)
//! ```
//!
//! La conexión se mantiene abierta entre requests (HTTP/1.1 persistente) y
//! solo se cierra cuando el parse falla, el cliente cierra el stream, o el
//! request recién atendido traía `Connection: close`. El socket se libera
//! por scope al salir del loop, pase lo que pase.

use crate::config::Config;
use crate::http::{ParseError, Request};
use crate::router::Router;
use std::io::{BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info};

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
}

impl Server {
    /// Crea el servidor a partir de su configuración
    pub fn new(config: Config) -> Self {
        let router = Router::new(config.directory.clone());

        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Hace bind en la dirección configurada y atiende conexiones
    ///
    /// Bloquea el thread actual. Solo retorna si el bind o el accept fallan:
    /// una falla del socket de escucha no es recuperable.
    pub fn run(&mut self) -> std::io::Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;

        info!(
            address = %address,
            directory = %self.config.directory,
            "servidor escuchando"
        );

        self.serve(listener)
    }

    /// Atiende conexiones sobre un listener ya creado
    ///
    /// Separado de `run` para que los tests puedan usar un puerto efímero.
    /// Cada conexión aceptada corre en su propio thread, en paralelo con el
    /// accept loop y con las demás conexiones.
    pub fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, router) {
                            debug!(error = %e, "error de E/S en la conexión");
                        }
                    });
                }
                Err(e) => {
                    // Falla de accept: fatal, no se reintenta
                    error!(error = %e, "fallo al aceptar conexión, deteniendo el servidor");
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Loop de una conexión: parsea, despacha y responde hasta cerrar
    ///
    /// Los fallos de handler ya vienen convertidos en Response (404/500) por
    /// el router; los fallos de transporte (parse inválido, stream cerrado,
    /// error de escritura) terminan la conexión sin respuesta.
    fn handle_connection(stream: TcpStream, router: Arc<Router>) -> std::io::Result<()> {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        debug!(peer = %peer, "conexión aceptada");

        let mut reader = BufReader::new(stream.try_clone()?);
        let mut writer = stream;

        loop {
            // AwaitingRequest
            let request = match Request::read_from(&mut reader) {
                Ok(request) => request,
                Err(ParseError::ConnectionClosed) => {
                    debug!(peer = %peer, "conexión cerrada por el cliente");
                    break;
                }
                Err(e) => {
                    // Request line malformada o error de E/S: se corta la
                    // conexión sin enviar respuesta
                    debug!(peer = %peer, error = %e, "request inválido, cerrando conexión");
                    break;
                }
            };

            let start = Instant::now();
            let close_requested = request.wants_close();

            // Dispatching: el body queda en el reader y lo consume el handler
            let response = router.route(&request, &mut reader);

            // Responding
            writer.write_all(&response.to_bytes(close_requested))?;
            writer.flush()?;

            info!(
                peer = %peer,
                method = %request.method().as_str(),
                path = %request.path(),
                status = response.status().as_u16(),
                elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                "request atendido"
            );

            // El loop nunca cierra por iniciativa propia: solo si el cliente
            // lo pidió en este request
            if close_requested {
                debug!(peer = %peer, "cierre solicitado por el cliente");
                break;
            }
        }

        // Closed: el socket se libera al salir del scope
        Ok(())
    }
}
