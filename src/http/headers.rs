//! # Headers HTTP
//! src/http/headers.rs
//!
//! Almacenamiento case-insensitive de los headers de un request. HTTP define
//! los nombres de header como case-insensitive, así que normalizamos a
//! minúsculas al insertar en vez de usar una colección case-insensitive del
//! lenguaje. Si un header aparece repetido, gana la última ocurrencia.

use std::collections::HashMap;

/// Mapa de headers con lookup case-insensitive
///
/// Se construye nuevo para cada request y se descarta tras el despacho.
///
/// # Ejemplo
/// ```
/// use minihttp::http::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("User-Agent", " curl/8.0 ");
///
/// assert_eq!(headers.get("user-agent"), Some("curl/8.0"));
/// assert_eq!(headers.get("USER-AGENT"), Some("curl/8.0"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    /// Claves en minúsculas, valores sin espacios a los extremos
    inner: HashMap<String, String>,
}

impl HeaderMap {
    /// Crea un mapa vacío
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Inserta un header normalizando nombre (minúsculas, trim) y valor (trim)
    ///
    /// Si el header ya existía, se sobrescribe.
    pub fn insert(&mut self, name: &str, value: &str) {
        self.inner
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    /// Obtiene el valor de un header, sin importar mayúsculas/minúsculas
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner
            .get(&name.trim().to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Cantidad de headers almacenados
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Verifica si el mapa está vacío
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
