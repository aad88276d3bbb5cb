// ==========================================
// Controle de Entregas - camada de aplicação
// ==========================================

pub mod state;

pub use state::AppState;

/// Caminho padrão do banco de dados
pub fn get_default_db_path() -> String {
    crate::db::default_db_path()
}
