// ==========================================
// Controle de Entregas - API de importação
// ==========================================
// Fluxo de arquivo: parse → mapeamento → MESCLA com o conjunto salvo →
// persiste. Fluxo de planilha remota: busca → parse → mapeamento →
// SUBSTITUI o conjunto salvo → persiste. Qualquer erro aborta sem
// alterar o estado persistido.
// ==========================================

use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{ImportReport, ImportSource};
use crate::engine::merge::merge_records;
use crate::i18n;
use crate::importer::error::ImportError;
use crate::importer::{
    map_deliveries, parse_csv_text, SheetSource, UniversalFileParser, DELIVERY_SHEET_ID,
};
use crate::repository::DeliveryStore;

// ==========================================
// ImportApi - importação de entregas
// ==========================================
pub struct ImportApi {
    store: Arc<dyn DeliveryStore>,
    sheet_source: Arc<dyn SheetSource>,
}

impl ImportApi {
    pub fn new(store: Arc<dyn DeliveryStore>, sheet_source: Arc<dyn SheetSource>) -> Self {
        Self {
            store,
            sheet_source,
        }
    }

    /// Importa um arquivo local (.xlsx/.csv) e mescla com o conjunto salvo.
    ///
    /// # Retorno
    /// - Ok(ImportReport): lote importado (contagens + duração)
    /// - Err(ApiError): arquivo ilegível, formato não suportado ou
    ///   planilha sem dados; nada é persistido nesses casos
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ApiResult<ImportReport> {
        let path = file_path.as_ref();
        let started = Instant::now();

        let sheet = UniversalFileParser.parse(path)?;
        if sheet.is_empty() {
            return Err(ImportError::EmptyDataset(i18n::t("import.no_data")).into());
        }

        let incoming = map_deliveries(&sheet);
        let existing = self.store.load()?;
        let merged = merge_records(&existing, &incoming);
        self.store.save(&merged)?;

        let report = ImportReport {
            batch_id: Uuid::new_v4().to_string(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string()),
            source: ImportSource::File,
            total_rows: sheet.rows.len(),
            mapped: incoming.len(),
            merged_total: merged.len(),
            imported_at: Utc::now(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            batch_id = %report.batch_id,
            file = ?report.file_name,
            total_rows = report.total_rows,
            merged_total = report.merged_total,
            elapsed_ms = report.elapsed_ms,
            "importação de arquivo concluída"
        );

        Ok(report)
    }

    /// Importa vários arquivos; um resultado por arquivo.
    ///
    /// A falha de um arquivo não afeta os demais.
    pub async fn batch_import(&self, file_paths: Vec<PathBuf>) -> Vec<Result<ImportReport, String>> {
        let imports = file_paths.into_iter().map(|path| async move {
            self.import_file(&path).map_err(|e| e.to_string())
        });

        futures::future::join_all(imports).await
    }

    /// Carrega a planilha remota de entregas e SUBSTITUI o conjunto salvo.
    pub async fn load_from_sheet(&self) -> ApiResult<ImportReport> {
        self.load_from_sheet_id(DELIVERY_SHEET_ID).await
    }

    /// Carrega uma planilha remota específica e SUBSTITUI o conjunto salvo.
    pub async fn load_from_sheet_id(&self, sheet_id: &str) -> ApiResult<ImportReport> {
        let started = Instant::now();

        let csv_text = self.sheet_source.fetch_csv(sheet_id).await?;
        let sheet = parse_csv_text(&csv_text)?;
        if sheet.is_empty() {
            return Err(
                ImportError::EmptyDataset(format!("planilha {} sem linhas de dados", sheet_id))
                    .into(),
            );
        }

        let records = map_deliveries(&sheet);
        self.store.save(&records)?;

        let report = ImportReport {
            batch_id: Uuid::new_v4().to_string(),
            file_name: None,
            source: ImportSource::RemoteSheet,
            total_rows: sheet.rows.len(),
            mapped: records.len(),
            merged_total: records.len(),
            imported_at: Utc::now(),
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        tracing::info!(
            batch_id = %report.batch_id,
            sheet_id,
            total_rows = report.total_rows,
            elapsed_ms = report.elapsed_ms,
            "carga da planilha remota concluída"
        );

        Ok(report)
    }

    /// Remove todos os registros persistidos (a meta de SLA permanece).
    pub fn clear_all(&self) -> ApiResult<()> {
        self.store.clear()?;
        tracing::info!("conjunto de entregas removido");
        Ok(())
    }
}
