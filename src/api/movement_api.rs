// ==========================================
// Controle de Entregas - API de movimentação
// ==========================================
// Romaneios e consolidações. O conjunto vive só em memória e é
// SUBSTITUÍDO por inteiro a cada recarga da planilha; não há mescla por
// chave nem persistência entre sessões.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{MovementFilter, MovementRecord};
use crate::engine::filter::filter_movements;
use crate::exporter;
use crate::i18n;
use crate::importer::error::ImportError;
use crate::importer::{map_movements, parse_csv_text, SheetSource, MOVEMENT_SHEET_ID};

// ==========================================
// MovementOptions - valores distintos para os seletores
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementOptions {
    pub origin_units: Vec<String>,
    pub manifest_types: Vec<String>,
    pub settlement_statuses: Vec<String>,
}

// ==========================================
// MovementApi - módulo de movimentação
// ==========================================
pub struct MovementApi {
    sheet_source: Arc<dyn SheetSource>,
    records: Mutex<Vec<MovementRecord>>,
}

impl MovementApi {
    pub fn new(sheet_source: Arc<dyn SheetSource>) -> Self {
        Self {
            sheet_source,
            records: Mutex::new(Vec::new()),
        }
    }

    fn records(&self) -> ApiResult<Vec<MovementRecord>> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|e| ApiError::InternalError(format!("falha ao obter o lock: {}", e)))
    }

    /// Carrega a planilha remota de movimentação, substituindo o conjunto.
    ///
    /// # Retorno
    /// - Ok(usize): quantidade de registros carregados
    pub async fn load_from_sheet(&self) -> ApiResult<usize> {
        self.load_from_sheet_id(MOVEMENT_SHEET_ID).await
    }

    /// Carrega uma planilha remota específica, substituindo o conjunto.
    pub async fn load_from_sheet_id(&self, sheet_id: &str) -> ApiResult<usize> {
        let csv_text = self.sheet_source.fetch_csv(sheet_id).await?;
        let sheet = parse_csv_text(&csv_text)?;
        if sheet.is_empty() {
            return Err(ImportError::EmptyDataset(format!(
                "planilha de movimentação {} sem linhas de dados",
                sheet_id
            ))
            .into());
        }

        let mapped = map_movements(&sheet);
        let count = mapped.len();

        let mut records = self
            .records
            .lock()
            .map_err(|e| ApiError::InternalError(format!("falha ao obter o lock: {}", e)))?;
        *records = mapped;

        tracing::info!(sheet_id, count, "movimentações carregadas");
        Ok(count)
    }

    /// Registros filtrados, na ordem da planilha
    pub fn list(&self, filter: &MovementFilter) -> ApiResult<Vec<MovementRecord>> {
        Ok(filter_movements(&self.records()?, filter))
    }

    /// Quantidade de registros carregados (sem filtro)
    pub fn count(&self) -> ApiResult<usize> {
        Ok(self.records()?.len())
    }

    /// Valores distintos (ordenados, sem vazios) para os seletores
    pub fn options(&self) -> ApiResult<MovementOptions> {
        let records = self.records()?;

        let distinct = |values: Vec<String>| -> Vec<String> {
            values
                .into_iter()
                .filter(|v| !v.is_empty())
                .collect::<BTreeSet<String>>()
                .into_iter()
                .collect()
        };

        Ok(MovementOptions {
            origin_units: distinct(records.iter().map(|r| r.origin_unit.clone()).collect()),
            manifest_types: distinct(records.iter().map(|r| r.manifest_type.clone()).collect()),
            settlement_statuses: distinct(
                records
                    .iter()
                    .map(|r| r.settlement_status.trim().to_string())
                    .collect(),
            ),
        })
    }

    /// Exporta o conjunto filtrado como CSV fiel à planilha de origem
    pub fn export_filtered(&self, filter: &MovementFilter) -> ApiResult<String> {
        let records = self.list(filter)?;
        if records.is_empty() {
            return Err(ApiError::ExportError(i18n::t("export.empty")));
        }
        exporter::export_movements(&records).map_err(|e| ApiError::ExportError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StaticSheetSource {
        payload: String,
    }

    #[async_trait]
    impl SheetSource for StaticSheetSource {
        async fn fetch_csv(&self, _sheet_id: &str) -> crate::importer::ImportResult<String> {
            Ok(self.payload.clone())
        }
    }

    fn api(payload: &str) -> MovementApi {
        MovementApi::new(Arc::new(StaticSheetSource {
            payload: payload.to_string(),
        }))
    }

    const SHEET: &str = "Numero do romaneio,Tipo de Romaneio,Motorista,Unidade Origem,Dt. Operação,Situação Baixa,Qtde Solicitações\n\
        R-1,Entrega,José,POA,05/03/2024,baixado,2\n\
        R-2,Coleta,Maria,CWB,05/04/2024,em aberto,1\n\
        R-3,Entrega,Ana,POA,10/03/2024,Baixado,4\n";

    #[tokio::test]
    async fn test_load_replaces_wholesale() {
        let api = api(SHEET);

        assert_eq!(api.load_from_sheet().await.unwrap(), 3);
        assert_eq!(api.count().unwrap(), 3);

        // nova carga substitui tudo (sem mescla por chave)
        assert_eq!(api.load_from_sheet().await.unwrap(), 3);
        assert_eq!(api.count().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_list_with_month_and_settlement_filters() {
        let api = api(SHEET);
        api.load_from_sheet().await.unwrap();

        let filter = MovementFilter {
            month: Some("2024-03".to_string()),
            settlement_status: Some("BAIXADO".to_string()),
            ..Default::default()
        };
        let rows = api.list(&filter).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.origin_unit == "POA"));
    }

    #[tokio::test]
    async fn test_options_are_distinct_and_sorted() {
        let api = api(SHEET);
        api.load_from_sheet().await.unwrap();

        let options = api.options().unwrap();

        assert_eq!(options.origin_units, vec!["CWB", "POA"]);
        assert_eq!(options.manifest_types, vec!["Coleta", "Entrega"]);
        // "baixado" e "Baixado" são valores distintos na planilha
        assert_eq!(
            options.settlement_statuses,
            vec!["Baixado", "baixado", "em aberto"]
        );
    }

    #[tokio::test]
    async fn test_empty_sheet_is_error() {
        let api = api("");
        let result = api.load_from_sheet().await;
        assert!(matches!(result, Err(ApiError::ImportError(_))));
    }

    #[tokio::test]
    async fn test_export_filtered() {
        let api = api(SHEET);
        api.load_from_sheet().await.unwrap();

        let csv = api
            .export_filtered(&MovementFilter {
                manifest_types: vec!["Coleta".to_string()],
                ..Default::default()
            })
            .unwrap();

        assert!(csv.contains("Numero do romaneio"));
        assert!(csv.contains("R-2"));
        assert!(!csv.contains("R-1"));
    }
}
