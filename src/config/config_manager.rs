// ==========================================
// Controle de Entregas - gerenciador de configuração
// ==========================================
// Responsabilidade: leitura/escrita de configuração com valor padrão
// Armazenamento: tabela config_kv (key-value + escopo)
// ==========================================

use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};

/// Meta de performance padrão (%)
pub const DEFAULT_TARGET_PERFORMANCE: f64 = 98.0;

// ==========================================
// Chaves de configuração
// ==========================================
pub mod config_keys {
    /// Meta de performance do painel (%)
    pub const TARGET_PERFORMANCE: &str = "target_performance";
}

// ==========================================
// ConfigManager - gerenciador de configuração
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// Cria um ConfigManager abrindo conexão própria
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_schema()?;
        Ok(manager)
    }

    /// Cria um ConfigManager sobre conexão compartilhada
    ///
    /// Reaplica os PRAGMA unificados (idempotente).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        let manager = Self { conn };
        manager.ensure_schema()?;
        Ok(manager)
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS config_kv (
                scope_id TEXT NOT NULL,
                key      TEXT NOT NULL,
                value    TEXT NOT NULL,
                PRIMARY KEY (scope_id, key)
            );
            "#,
        )?;
        Ok(())
    }

    /// Lê um valor de configuração (scope_id='global')
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lê um valor de configuração com padrão
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Grava um valor de configuração (UPSERT, scope_id='global')
    fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }

    // ===== Meta de performance =====

    /// Meta de performance do painel (%)
    ///
    /// Valor ilegível no banco cai no padrão com aviso no log.
    pub fn get_target_performance(&self) -> RepositoryResult<f64> {
        let raw = self.get_config_or_default(
            config_keys::TARGET_PERFORMANCE,
            &DEFAULT_TARGET_PERFORMANCE.to_string(),
        )?;

        Ok(raw.parse::<f64>().unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::TARGET_PERFORMANCE,
                raw_value = %raw,
                "meta de performance ilegível, usando o padrão"
            );
            DEFAULT_TARGET_PERFORMANCE
        }))
    }

    /// Define a meta de performance do painel (%)
    pub fn set_target_performance(&self, value: f64) -> RepositoryResult<()> {
        self.set_config_value(config_keys::TARGET_PERFORMANCE, &value.to_string())
    }
}
