// ==========================================
// Controle de Entregas - repositório de entregas
// ==========================================
// Persistência do conjunto de registros de entrega. A escrita é sempre
// do conjunto inteiro (o estado agregado é recomputado em memória, nunca
// mutado incrementalmente no banco).
// ==========================================

use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::DeliveryRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// DeliveryStore - interface de persistência
// ==========================================
// Injetada na aplicação; os testes usam a implementação em memória.
pub trait DeliveryStore: Send + Sync {
    /// Carrega o conjunto completo na ordem em que foi salvo
    fn load(&self) -> RepositoryResult<Vec<DeliveryRecord>>;

    /// Substitui o conjunto persistido pelo informado (transacional)
    fn save(&self, records: &[DeliveryRecord]) -> RepositoryResult<usize>;

    /// Remove todos os registros (a meta de SLA não é afetada)
    fn clear(&self) -> RepositoryResult<()>;
}

// ==========================================
// SqliteDeliveryRepository - implementação SQLite
// ==========================================
pub struct SqliteDeliveryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDeliveryRepository {
    /// Cria o repositório abrindo uma conexão própria
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        let repo = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// Cria o repositório sobre uma conexão compartilhada
    ///
    /// Reaplica os PRAGMA unificados (idempotente) para garantir
    /// comportamento consistente.
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        let repo = Self { conn };
        repo.ensure_schema()?;
        Ok(repo)
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
            CREATE TABLE IF NOT EXISTS delivery_record (
                seq             INTEGER PRIMARY KEY,
                delivery_number TEXT NOT NULL,
                record_json     TEXT NOT NULL,
                saved_at        TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl DeliveryStore for SqliteDeliveryRepository {
    fn load(&self) -> RepositoryResult<Vec<DeliveryRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT record_json FROM delivery_record ORDER BY seq")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for row in rows {
            let json = row?;
            records.push(serde_json::from_str::<DeliveryRecord>(&json)?);
        }
        Ok(records)
    }

    fn save(&self, records: &[DeliveryRecord]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let saved_at = chrono::Utc::now().to_rfc3339();

        tx.execute("DELETE FROM delivery_record", [])?;
        for (seq, record) in records.iter().enumerate() {
            let json = serde_json::to_string(record)?;
            tx.execute(
                "INSERT INTO delivery_record (seq, delivery_number, record_json, saved_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![seq as i64, record.delivery_number, json, saved_at],
            )?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(records.len())
    }

    fn clear(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute("DELETE FROM delivery_record", [])?;
        Ok(())
    }
}

// ==========================================
// InMemoryDeliveryRepository - implementação para testes
// ==========================================
#[derive(Default)]
pub struct InMemoryDeliveryRepository {
    records: Mutex<Vec<DeliveryRecord>>,
}

impl InMemoryDeliveryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeliveryStore for InMemoryDeliveryRepository {
    fn load(&self) -> RepositoryResult<Vec<DeliveryRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(records.clone())
    }

    fn save(&self, new_records: &[DeliveryRecord]) -> RepositoryResult<usize> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        *records = new_records.to_vec();
        Ok(records.len())
    }

    fn clear(&self) -> RepositoryResult<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        records.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(number: &str, status: &str) -> DeliveryRecord {
        DeliveryRecord {
            delivery_number: number.to_string(),
            status: status.to_string(),
            ..DeliveryRecord::empty()
        }
    }

    fn sqlite_repo() -> (tempfile::NamedTempFile, SqliteDeliveryRepository) {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap().to_string();
        let repo = SqliteDeliveryRepository::new(&path).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_temp, repo) = sqlite_repo();
        let records = vec![record("1", "A"), record("2", "B")];

        assert_eq!(repo.save(&records).unwrap(), 2);
        let loaded = repo.load().unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_save_replaces_previous_set() {
        let (_temp, repo) = sqlite_repo();
        repo.save(&[record("1", "A"), record("2", "B")]).unwrap();
        repo.save(&[record("3", "C")]).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].delivery_number, "3");
    }

    #[test]
    fn test_load_preserves_order() {
        let (_temp, repo) = sqlite_repo();
        let records = vec![record("9", "A"), record("1", "B"), record("5", "C")];
        repo.save(&records).unwrap();

        let loaded = repo.load().unwrap();
        let keys: Vec<&str> = loaded.iter().map(|r| r.delivery_number.as_str()).collect();
        assert_eq!(keys, vec!["9", "1", "5"]);
    }

    #[test]
    fn test_clear_removes_everything() {
        let (_temp, repo) = sqlite_repo();
        repo.save(&[record("1", "A")]).unwrap();

        repo.clear().unwrap();

        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_on_fresh_database_is_empty() {
        let (_temp, repo) = sqlite_repo();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_in_memory_repository_round_trip() {
        let repo = InMemoryDeliveryRepository::new();
        repo.save(&[record("1", "A")]).unwrap();
        assert_eq!(repo.load().unwrap().len(), 1);
        repo.clear().unwrap();
        assert!(repo.load().unwrap().is_empty());
    }
}
