// ==========================================
// Controle de Entregas - busca de planilha remota
// ==========================================
// As duas planilhas públicas (entregas e movimentação) expõem o export
// CSV via GET sem autenticação. Uma única leitura por chamada: sem
// retry, sem timeout próprio, sem cancelamento — duas buscas
// sobrepostas não são protegidas (a última a completar vence).
// ==========================================

use async_trait::async_trait;
use reqwest::Client;

use crate::importer::error::{ImportError, ImportResult};

/// Planilha do painel de entregas
pub const DELIVERY_SHEET_ID: &str = "1_4qxu-eZvlbSB36ohIecGUZPGQiLTy8-eDVhsGLaPI4";

/// Planilha do módulo de movimentação
pub const MOVEMENT_SHEET_ID: &str = "1WQsXsByhjnUxNz_mbMnjTLy4j-jXU1qdIKzJWbmMY54";

// ==========================================
// SheetSource - fonte de planilhas remotas
// ==========================================
// Costura de teste: as APIs recebem Arc<dyn SheetSource> e os testes
// injetam uma fonte estática sem rede.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Busca o export CSV de uma planilha pública.
    ///
    /// # Retorno
    /// - Ok(String): texto CSV completo
    /// - Err(ImportError::SheetFetchError): falha de transporte ou
    ///   resposta HTTP sem sucesso (mensagem original preservada)
    async fn fetch_csv(&self, sheet_id: &str) -> ImportResult<String>;
}

// ==========================================
// GoogleSheetsFetcher - implementação HTTP
// ==========================================
pub struct GoogleSheetsFetcher {
    client: Client,
}

impl GoogleSheetsFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn export_url(sheet_id: &str) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv",
            sheet_id
        )
    }
}

impl Default for GoogleSheetsFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsFetcher {
    async fn fetch_csv(&self, sheet_id: &str) -> ImportResult<String> {
        let url = Self::export_url(sheet_id);
        tracing::debug!(%url, "buscando export CSV da planilha");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::SheetFetchError(format!(
                "HTTP {} ao acessar a planilha {}",
                status, sheet_id
            )));
        }

        Ok(response.text().await?)
    }
}
