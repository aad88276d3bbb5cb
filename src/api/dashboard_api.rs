// ==========================================
// Controle de Entregas - API do painel
// ==========================================
// Responsabilidade: aplicar filtros sobre o conjunto persistido e
// entregar as agregações prontas para exibição. Todo resultado é
// recomputado do zero a cada chamada (ver camada de motor).
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::{DeliveryFilter, DeliveryRecord};
use crate::engine::aggregator::{
    performance, performance_matrix, status_cards, status_unit_counts, unit_performance,
    PerformanceMatrix, StatusCards, StatusUnitCount, UnitPerformance,
};
use crate::engine::filter::filter_deliveries;
use crate::exporter;
use crate::i18n;

// ==========================================
// FilterOptions - valores distintos para os seletores
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub current_units: Vec<String>,
    pub destination_units: Vec<String>,
    pub preventive_statuses: Vec<String>,
}

// ==========================================
// DashboardApi - consultas do painel de entregas
// ==========================================
pub struct DashboardApi {
    store: Arc<dyn crate::repository::DeliveryStore>,
    config: Arc<ConfigManager>,
}

impl DashboardApi {
    pub fn new(
        store: Arc<dyn crate::repository::DeliveryStore>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self { store, config }
    }

    fn filtered(&self, filter: &DeliveryFilter) -> ApiResult<Vec<DeliveryRecord>> {
        let records = self.store.load()?;
        Ok(filter_deliveries(&records, filter))
    }

    /// Registros filtrados, na ordem persistida
    pub fn list_records(&self, filter: &DeliveryFilter) -> ApiResult<Vec<DeliveryRecord>> {
        self.filtered(filter)
    }

    /// Cards de status do topo do painel
    pub fn get_status_cards(&self, filter: &DeliveryFilter) -> ApiResult<StatusCards> {
        Ok(status_cards(&self.filtered(filter)?))
    }

    /// Percentual de SLA2 positivo sobre o conjunto filtrado
    pub fn get_performance(&self, filter: &DeliveryFilter) -> ApiResult<f64> {
        Ok(performance(&self.filtered(filter)?))
    }

    /// Matriz data × status com a linha TOTAL
    pub fn get_performance_matrix(&self, filter: &DeliveryFilter) -> ApiResult<PerformanceMatrix> {
        Ok(performance_matrix(&self.filtered(filter)?))
    }

    /// Performance por unidade atual, ordenada decrescente
    pub fn get_unit_performance(&self, filter: &DeliveryFilter) -> ApiResult<Vec<UnitPerformance>> {
        Ok(unit_performance(&self.filtered(filter)?))
    }

    /// Contagem por par (status, unidade atual)
    pub fn get_status_unit_counts(
        &self,
        filter: &DeliveryFilter,
    ) -> ApiResult<Vec<StatusUnitCount>> {
        Ok(status_unit_counts(&self.filtered(filter)?))
    }

    /// Valores distintos (ordenados, sem vazios) para os seletores de filtro
    pub fn filter_options(&self) -> ApiResult<FilterOptions> {
        let records = self.store.load()?;

        let distinct = |field: fn(&DeliveryRecord) -> &String| -> Vec<String> {
            records
                .iter()
                .map(field)
                .filter(|v| !v.is_empty())
                .cloned()
                .collect::<BTreeSet<String>>()
                .into_iter()
                .collect()
        };

        Ok(FilterOptions {
            current_units: distinct(|r| &r.current_unit),
            destination_units: distinct(|r| &r.destination_unit),
            preventive_statuses: distinct(|r| &r.preventive_flag),
        })
    }

    // ===== Meta de SLA =====

    /// Meta de performance persistida (%)
    pub fn get_target_performance(&self) -> ApiResult<f64> {
        Ok(self.config.get_target_performance()?)
    }

    /// Atualiza a meta de performance (0 a 100)
    pub fn set_target_performance(&self, value: f64) -> ApiResult<()> {
        if !(0.0..=100.0).contains(&value) {
            return Err(ApiError::InvalidInput(format!(
                "meta de performance fora do intervalo 0-100: {}",
                value
            )));
        }
        self.config.set_target_performance(value)?;
        Ok(())
    }

    // ===== Exportação =====

    /// Exporta o conjunto filtrado como CSV fiel ao arquivo de origem
    pub fn export_filtered(&self, filter: &DeliveryFilter) -> ApiResult<String> {
        let records = self.filtered(filter)?;
        if records.is_empty() {
            return Err(ApiError::ExportError(i18n::t("export.empty")));
        }
        exporter::export_deliveries(&records).map_err(|e| ApiError::ExportError(e.to_string()))
    }

    /// Gera o modelo de importação completo
    pub fn export_template(&self) -> ApiResult<String> {
        exporter::template_csv().map_err(|e| ApiError::ExportError(e.to_string()))
    }
}
