// ==========================================
// Controle de Entregas - inicialização SQLite
// ==========================================
// Objetivo:
// - Unificar os PRAGMA de todo Connection::open, evitando conexões com
//   comportamento divergente entre módulos
// - Unificar busy_timeout para reduzir erros esporádicos de busy
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout padrão (milissegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Aplica os PRAGMA unificados a uma conexão SQLite
///
/// Observações:
/// - foreign_keys precisa ser ligado por conexão
/// - busy_timeout precisa ser configurado por conexão
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre uma conexão SQLite já com a configuração unificada
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Caminho padrão do banco de dados da aplicação
///
/// Usa o diretório de dados do usuário quando disponível; senão cai no
/// diretório corrente.
pub fn default_db_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("controle-entregas").join("controle_entregas.db"))
        .and_then(|p| p.to_str().map(|s| s.to_string()))
        .unwrap_or_else(|| "controle_entregas.db".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_configure() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();

        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_default_db_path_not_empty() {
        assert!(!default_db_path().is_empty());
    }
}
