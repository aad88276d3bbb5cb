// ==========================================
// Controle de Entregas - camada de repositório
// ==========================================
// Acesso a dados atrás de interface explícita: nada de estado global
// ambiente. O conjunto de entregas persiste entre sessões; movimentação
// nunca persiste.
// ==========================================

pub mod delivery_repo;
pub mod error;

pub use delivery_repo::{DeliveryStore, InMemoryDeliveryRepository, SqliteDeliveryRepository};
pub use error::{RepositoryError, RepositoryResult};
