use crate::catalog::RawSearchResponse;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("transport error: {0}")]
  Transport(String),

  #[error("catalog rejected search ({status}): {message}")]
  Rejected { status: u16, message: String },

  #[error("invalid response: {0}")]
  InvalidResponse(String),
}

/// Port de búsqueda en el catálogo musical.
///
/// El adapter es responsable de validar la forma de la respuesta una sola vez
/// (ver [`crate::catalog::decode_search_response`]) y devolver el sobre tipado.
/// La deduplicación de álbumes no es asunto del adapter.
#[async_trait::async_trait]
pub trait CatalogSearch: Send + Sync {
  async fn search(&self, query: &str) -> Result<RawSearchResponse, CatalogError>;
}
