// ==========================================
// Controle de Entregas - camada de motor
// ==========================================
// Regras de negócio puras: normalização de datas, filtros, agregações
// e mesclagem por chave de negócio. Nenhuma função deste módulo toca
// banco, rede ou estado global; tudo é recomputado do zero a cada chamada.
// ==========================================

pub mod aggregator;
pub mod date_norm;
pub mod filter;
pub mod merge;

pub use aggregator::{
    performance, performance_matrix, status_cards, status_unit_counts, unit_performance,
    PerformanceMatrix, StatusCards, StatusUnitCount, UnitPerformance,
};
pub use date_norm::{format_br, normalize_day, normalize_month};
pub use filter::{filter_deliveries, filter_movements};
pub use merge::merge_records;
