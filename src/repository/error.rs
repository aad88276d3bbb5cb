// ==========================================
// Controle de Entregas - erros da camada de repositório
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de repositório
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Erros de banco =====
    #[error("Registro não encontrado: {entity} com id={id}")]
    NotFound { entity: String, id: String },

    #[error("Falha na conexão com o banco: {0}")]
    DatabaseConnectionError(String),

    #[error("Falha ao obter o lock do banco: {0}")]
    LockError(String),

    #[error("Falha na transação do banco: {0}")]
    DatabaseTransactionError(String),

    #[error("Falha na consulta ao banco: {0}")]
    DatabaseQueryError(String),

    // ===== Erros de serialização =====
    #[error("Falha de serialização: {0}")]
    SerializationError(String),

    // ===== Erros genéricos =====
    #[error("Erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Implementa From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "desconhecida".to_string(),
                id: "desconhecido".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

// Implementa From<serde_json::Error>
impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// Alias de Result
pub type RepositoryResult<T> = Result<T, RepositoryError>;
