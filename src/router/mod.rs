//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo despacha cada request parseado a su handler de contenido.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! El despacho es en orden fijo, con matching literal de prefijos (sin
//! wildcards ni regex); gana el primer match:
//!
//! 1. `GET /` → 200 sin body
//! 2. `GET /echo/{text}` → 200 con `{text}` tal cual (sin URL-decode)
//! 3. `GET /user-agent` → 200 con el header `User-Agent` (o vacío)
//! 4. `GET /files/{name}` → contenido del archivo, 404 si no existe
//! 5. `POST /files/{name}` → escribe el body al archivo, 201
//! 6. Cualquier otra cosa (incluyendo otros métodos) → 404
//!
//! Los fallos de handler (archivo ilegible, E/S al escribir) se convierten
//! siempre en una Response 500; nunca se propagan como error de conexión.
//!
//! El segmento `{name}` se une al directorio de archivos sin sanitizar:
//! secuencias como `../` llegan al filesystem tal cual.

use crate::http::{response, Method, Request, Response, StatusCode};
use std::fs;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::warn;

/// Router que despacha requests a los handlers de contenido
///
/// Es función pura de (método, path, headers, body, directorio) → Response.
pub struct Router {
    /// Directorio del que se sirven y al que se escriben los archivos
    directory: PathBuf,
}

impl Router {
    /// Crea un router que sirve archivos desde `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Despacha un request y produce su respuesta
    ///
    /// `body` es el stream de la conexión posicionado justo después de los
    /// headers; solo el handler de POST lo consume.
    ///
    /// # Ejemplo
    /// ```
    /// use minihttp::http::{Request, StatusCode};
    /// use minihttp::router::Router;
    ///
    /// let router = Router::new(".");
    /// let raw: &[u8] = b"GET /echo/hola HTTP/1.1\r\n\r\n";
    /// let mut reader = raw;
    /// let request = Request::read_from(&mut reader).unwrap();
    ///
    /// let response = router.route(&request, &mut reader);
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// assert_eq!(response.body(), b"hola");
    /// ```
    pub fn route(&self, request: &Request, body: &mut dyn BufRead) -> Response {
        match request.method() {
            Method::GET => self.route_get(request),
            Method::POST => self.route_post(request, body),
            Method::Other(_) => Response::new(StatusCode::NotFound),
        }
    }

    /// Despacho de requests GET
    fn route_get(&self, request: &Request) -> Response {
        let path = request.path();
        let accepts_gzip = client_accepts_gzip(request);

        if path == "/" {
            Response::new(StatusCode::Ok)
        } else if let Some(text) = path.strip_prefix("/echo/") {
            text_response(text, accepts_gzip)
        } else if path == "/user-agent" {
            let user_agent = request.header("user-agent").unwrap_or("");
            text_response(user_agent, accepts_gzip)
        } else if let Some(name) = path.strip_prefix("/files/") {
            self.serve_file(name)
        } else {
            Response::new(StatusCode::NotFound)
        }
    }

    /// Despacho de requests POST
    fn route_post(&self, request: &Request, body: &mut dyn BufRead) -> Response {
        if let Some(name) = request.path().strip_prefix("/files/") {
            self.store_file(name, request.content_length(), body)
        } else {
            Response::new(StatusCode::NotFound)
        }
    }

    /// Handler de `GET /files/{name}`
    ///
    /// Archivo inexistente → 404; existente pero ilegible → 500.
    fn serve_file(&self, name: &str) -> Response {
        let path = self.directory.join(name);

        if !path.exists() {
            return Response::new(StatusCode::NotFound);
        }

        match fs::read(&path) {
            Ok(content) => Response::new(StatusCode::Ok)
                .with_header("Content-Type", "application/octet-stream")
                .with_body_bytes(content),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "no se pudo leer el archivo");
                Response::new(StatusCode::InternalServerError)
            }
        }
    }

    /// Handler de `POST /files/{name}`
    ///
    /// Lee exactamente `Content-Length` bytes del stream (nunca por líneas,
    /// para no corromper uploads binarios) y los escribe tal cual al archivo,
    /// sobrescribiendo si existía.
    ///
    /// `Content-Length` de 0 (o ausente) → 500: los uploads vacíos se
    /// rechazan en vez de tratarse como creación de archivo vacío.
    fn store_file(&self, name: &str, content_length: usize, body: &mut dyn BufRead) -> Response {
        if content_length == 0 {
            return Response::new(StatusCode::InternalServerError);
        }

        let mut content = vec![0u8; content_length];
        if let Err(e) = body.read_exact(&mut content) {
            warn!(error = %e, "no se pudo leer el body del request");
            return Response::new(StatusCode::InternalServerError);
        }

        let path = self.directory.join(name);
        match fs::write(&path, &content) {
            Ok(()) => Response::new(StatusCode::Created),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "no se pudo escribir el archivo");
                Response::new(StatusCode::InternalServerError)
            }
        }
    }
}

/// Verifica si el cliente anunció soporte gzip
///
/// Match por substring sobre el valor de `Accept-Encoding` (sensible a
/// mayúsculas), no un parseo de tokens.
fn client_accepts_gzip(request: &Request) -> bool {
    request
        .header("accept-encoding")
        .is_some_and(|v| v.contains("gzip"))
}

/// Construye la respuesta 200 de texto plano para /echo/ y /user-agent
///
/// Si el cliente acepta gzip, el body se comprime antes de calcular
/// `Content-Length` y se agrega `Content-Encoding: gzip`.
fn text_response(body: &str, accepts_gzip: bool) -> Response {
    let response = Response::new(StatusCode::Ok).with_header("Content-Type", "text/plain");

    if accepts_gzip {
        match response::gzip_compress(body.as_bytes()) {
            Ok(compressed) => response
                .with_header("Content-Encoding", "gzip")
                .with_body_bytes(compressed),
            Err(e) => {
                warn!(error = %e, "falló la compresión gzip");
                Response::new(StatusCode::InternalServerError)
            }
        }
    } else {
        response.with_body(body)
    }
}
