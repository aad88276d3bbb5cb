// ==========================================
// Controle de Performance de Entregas - biblioteca central
// ==========================================
// Pilha: Rust + SQLite
// Escopo: pipeline de ingestão de planilhas, filtros e agregações de SLA
// ==========================================

// Inicializa o sistema de internacionalização
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - entidades e tipos
pub mod domain;

// Camada de repositório - acesso a dados
pub mod repository;

// Camada de motor - regras de negócio puras
pub mod engine;

// Camada de importação - dados externos
pub mod importer;

// Camada de exportação - reexporte fiel das linhas originais
pub mod exporter;

// Camada de configuração - meta de SLA
pub mod config;

// Infraestrutura de banco (inicialização de conexão/PRAGMA unificados)
pub mod db;

// Sistema de logs
pub mod logging;

// Internacionalização
pub mod i18n;

// Camada de API - interfaces de negócio
pub mod api;

// Camada de aplicação - composição do estado
pub mod app;

// ==========================================
// Reexporte de tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::types::{ImportReport, ImportSource, SlaClass};

// Entidades de domínio
pub use domain::{DeliveryFilter, DeliveryRecord, MovementFilter, MovementRecord};

// Motor
pub use engine::{
    aggregator::{PerformanceMatrix, StatusCards, StatusUnitCount, UnitPerformance},
    merge::merge_records,
};

// API
pub use api::{DashboardApi, ImportApi, MovementApi};

// ==========================================
// Constantes do sistema
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Controle de Performance de Entregas";
