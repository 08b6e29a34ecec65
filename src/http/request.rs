//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 desde cero, orientado a stream:
//! lee líneas directamente del socket (via `BufRead`) en vez de exigir el
//! request completo en un buffer. Eso permite conexiones persistentes (varios
//! requests sobre el mismo socket) y leer el body bajo demanda.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hola!
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path VERSION` (la versión se ignora)
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: NO se consume aquí; el handler de POST lo lee después
//!    usando `Content-Length`

use super::HeaderMap;
use std::io::BufRead;

/// Métodos HTTP que el servidor distingue
///
/// Cualquier método desconocido parsea igual (como `Other`) y el router lo
/// responde con 404; un método raro no es un error de protocolo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso
    GET,

    /// POST - Enviar datos a un recurso
    POST,

    /// Cualquier otro método (PUT, DELETE, etc.)
    Other(String),
}

impl Method {
    /// Parsea un método HTTP desde un string
    fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(s) => s,
        }
    }
}

/// Errores que pueden ocurrir durante el parsing
///
/// Todos terminan la conexión sin enviar respuesta: son fallas de transporte
/// o de protocolo, no errores de handler.
#[derive(Debug)]
pub enum ParseError {
    /// El cliente cerró el stream sin enviar datos (fin normal de una
    /// conexión persistente, no un error real)
    ConnectionClosed,

    /// Request line vacía o con menos de 2 tokens
    InvalidRequestLine,

    /// Error de E/S leyendo del socket
    Io(std::io::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::ConnectionClosed => write!(f, "Connection closed by peer"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<std::io::Error> for ParseError {
    fn from(e: std::io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// Representa un request HTTP/1.1 parseado (sin body)
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP (GET, POST u otro)
    method: Method,

    /// Path de la petición (ej: "/echo/hola")
    path: String,

    /// Headers HTTP con lookup case-insensitive
    headers: HeaderMap,
}

impl Request {
    /// Lee y parsea un request desde un stream line-buffered
    ///
    /// Consume la request line y los headers hasta la línea vacía. El body
    /// queda sin leer en el reader, para que el handler lo consuma con
    /// `Content-Length` si lo necesita.
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError::ConnectionClosed)` - El cliente cerró sin enviar nada
    /// * `Err(ParseError::InvalidRequestLine)` - Request line vacía o incompleta
    /// * `Err(ParseError::Io)` - Falla de E/S en el socket
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use minihttp::http::{Method, Request};
    ///
    /// let raw: &[u8] = b"GET /echo/hola HTTP/1.1\r\nHost: localhost\r\n\r\n";
    /// let request = Request::read_from(&mut &raw[..]).unwrap();
    ///
    /// assert_eq!(request.method(), &Method::GET);
    /// assert_eq!(request.path(), "/echo/hola");
    /// assert_eq!(request.header("host"), Some("localhost"));
    /// ```
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, ParseError> {
        // 1. Request line
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            // EOF sin datos: el cliente cerró limpiamente
            return Err(ParseError::ConnectionClosed);
        }

        let (method, path) = Self::parse_request_line(line.trim_end_matches(['\r', '\n']))?;

        // 2. Headers hasta la línea vacía (o fin del stream)
        let headers = Self::read_headers(reader)?;

        Ok(Request {
            method,
            path,
            headers,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1`. El tercer token (versión) se ignora;
    /// con menos de 2 tokens la línea es inválida.
    fn parse_request_line(line: &str) -> Result<(Method, String), ParseError> {
        if line.is_empty() {
            return Err(ParseError::InvalidRequestLine);
        }

        // Separar por espacios simples: METHOD PATH [VERSION]
        let mut parts = line.split(' ');
        let method = parts.next().unwrap_or("");
        let path = parts.next().unwrap_or("");

        if method.is_empty() || path.is_empty() {
            return Err(ParseError::InvalidRequestLine);
        }

        Ok((Method::parse(method), path.to_string()))
    }

    /// Lee los headers hasta encontrar una línea vacía o el fin del stream
    ///
    /// Cada línea se divide en el primer ':'; el nombre se normaliza a
    /// minúsculas y el valor se recorta. Las líneas sin ':' se ignoran en
    /// silencio.
    fn read_headers(reader: &mut impl BufRead) -> Result<HeaderMap, ParseError> {
        let mut headers = HeaderMap::new();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                // Fin del stream: tratamos igual que la línea vacía
                break;
            }

            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.is_empty() {
                break;
            }

            if let Some(colon_pos) = trimmed.find(':') {
                headers.insert(&trimmed[..colon_pos], &trimmed[colon_pos + 1..]);
            }
            // Línea sin ':': se salta sin error
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Obtiene un header específico (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Largo del body declarado por el cliente
    ///
    /// `Content-Length` ausente o no numérico cuenta como 0.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Verifica si el cliente pidió cerrar la conexión tras la respuesta
    ///
    /// Compara `Connection: close` sin distinguir mayúsculas en el valor.
    pub fn wants_close(&self) -> bool {
        self.header("connection")
            .is_some_and(|v| v.eq_ignore_ascii_case("close"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &[u8]) -> Result<Request, ParseError> {
        let mut reader = raw;
        Request::read_from(&mut reader)
    }

    #[test]
    fn test_parse_simple_get() {
        let request = parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/");
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_parse_with_headers() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: test\r\n\r\n";
        let request = parse(raw).unwrap();

        assert_eq!(request.header("Host"), Some("localhost:4221"));
        assert_eq!(request.header("user-agent"), Some("test"));
    }

    #[test]
    fn test_parse_post() {
        let raw = b"POST /files/a.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhola!";
        let request = parse(raw).unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.content_length(), 5);
    }

    #[test]
    fn test_body_is_not_consumed() {
        let raw: &[u8] = b"POST /files/a.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhola!";
        let mut reader = raw;
        let request = Request::read_from(&mut reader).unwrap();

        // El body sigue disponible en el reader para el handler
        assert_eq!(request.content_length(), 5);
        assert_eq!(reader, b"hola!");
    }

    #[test]
    fn test_unknown_method_parses() {
        let request = parse(b"DELETE /files/a.txt HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.method(), &Method::Other("DELETE".to_string()));
        assert_eq!(request.method().as_str(), "DELETE");
    }

    #[test]
    fn test_version_token_is_ignored() {
        // La versión no se valida: HTTP/1.0, HTTP/9.9 o ausente dan igual
        let request = parse(b"GET / HTTP/9.9\r\n\r\n").unwrap();
        assert_eq!(request.path(), "/");
    }

    #[test]
    fn test_connection_closed_on_eof() {
        let result = parse(b"");
        assert!(matches!(result, Err(ParseError::ConnectionClosed)));
    }

    #[test]
    fn test_empty_request_line() {
        let result = parse(b"\r\n");
        assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
    }

    #[test]
    fn test_request_line_missing_path() {
        let result = parse(b"GET\r\n\r\n");
        assert!(matches!(result, Err(ParseError::InvalidRequestLine)));
    }

    #[test]
    fn test_header_without_colon_is_skipped() {
        let raw = b"GET / HTTP/1.1\r\nesto no es un header\r\nHost: localhost\r\n\r\n";
        let request = parse(raw).unwrap();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("host"), Some("localhost"));
    }

    #[test]
    fn test_headers_end_at_stream_end() {
        // Sin línea vacía final: el fin del stream cierra los headers
        let request = parse(b"GET / HTTP/1.1\r\nHost: localhost").unwrap();
        assert_eq!(request.header("host"), Some("localhost"));
    }

    #[test]
    fn test_wants_close() {
        let request = parse(b"GET / HTTP/1.1\r\nConnection: Close\r\n\r\n").unwrap();
        assert!(request.wants_close());

        let request = parse(b"GET / HTTP/1.1\r\nConnection: keep-alive\r\n\r\n").unwrap();
        assert!(!request.wants_close());

        let request = parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert!(!request.wants_close());
    }

    #[test]
    fn test_content_length_unparsable_is_zero() {
        let request = parse(b"POST /files/a HTTP/1.1\r\nContent-Length: abc\r\n\r\n").unwrap();
        assert_eq!(request.content_length(), 0);
    }
}
