// ==========================================
// Controle de Entregas - camada de domínio
// ==========================================
// Entidades e tipos compartilhados entre importação, motor e API
// ==========================================

pub mod delivery;
pub mod movement;
pub mod types;

pub use delivery::{DeliveryFilter, DeliveryRecord};
pub use movement::{MovementFilter, MovementRecord};
pub use types::{ImportReport, ImportSource, SlaClass};
