// ==========================================
// Controle de Entregas - erros da camada de API
// ==========================================
// Responsabilidade: converter erros das camadas inferiores em mensagens
// de negócio com causa explícita
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Erros da camada de API
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== Erros de regra de negócio =====
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("Recurso não encontrado: {0}")]
    NotFound(String),

    // ===== Erros de importação/exportação =====
    #[error("Falha na importação: {0}")]
    ImportError(String),

    #[error("Falha na exportação: {0}")]
    ExportError(String),

    // ===== Erros de acesso a dados =====
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(String),

    #[error("Falha na conexão com o banco: {0}")]
    DatabaseConnectionError(String),

    // ===== Erros genéricos =====
    #[error("Erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// Conversão de RepositoryError
// Objetivo: transformar erro técnico do repositório em erro de negócio
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={}) não existe", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("falha ao obter o lock do banco: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::SerializationError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// Conversão de ImportError
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Other(inner) => ApiError::Other(inner),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Alias de Result
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "entrega".to_string(),
            id: "100".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("entrega"));
                assert!(msg.contains("100"));
            }
            _ => panic!("esperava NotFound"),
        }
    }

    #[test]
    fn test_import_error_conversion_keeps_message() {
        let err = ImportError::SheetFetchError("HTTP 403".to_string());
        let api_err: ApiError = err.into();
        match api_err {
            ApiError::ImportError(msg) => assert!(msg.contains("HTTP 403")),
            _ => panic!("esperava ImportError"),
        }
    }
}
