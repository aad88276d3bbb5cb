// ==========================================
// Controle de Entregas - camada de API
// ==========================================
// Interfaces de negócio consumidas pela aplicação: importação,
// consultas do painel e módulo de movimentação.
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod import_api;
pub mod movement_api;

pub use dashboard_api::{DashboardApi, FilterOptions};
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use movement_api::{MovementApi, MovementOptions};
