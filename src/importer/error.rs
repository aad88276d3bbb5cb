// ==========================================
// Controle de Entregas - erros da camada de importação
// ==========================================
// Ferramenta: macro derive do thiserror
// ==========================================

use thiserror::Error;

/// Erros da camada de importação
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Erros de arquivo =====
    #[error("Arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("Formato de arquivo não suportado: {0} (apenas .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("Falha na leitura do arquivo: {0}")]
    FileReadError(String),

    #[error("Falha no parse do Excel: {0}")]
    ExcelParseError(String),

    #[error("Falha no parse do CSV: {0}")]
    CsvParseError(String),

    #[error("Falha na escrita do CSV: {0}")]
    CsvWriteError(String),

    // ===== Erros de dados =====
    #[error("Planilha vazia ou sem dados: {0}")]
    EmptyDataset(String),

    // ===== Erros de rede =====
    #[error("Falha ao acessar a planilha remota: {0}")]
    SheetFetchError(String),

    // ===== Erros genéricos =====
    #[error("Erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// Implementa From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// Implementa From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// Implementa From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// Implementa From<reqwest::Error>
impl From<reqwest::Error> for ImportError {
    fn from(err: reqwest::Error) -> Self {
        ImportError::SheetFetchError(err.to_string())
    }
}

/// Alias de Result
pub type ImportResult<T> = Result<T, ImportError>;
