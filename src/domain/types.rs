// ==========================================
// Controle de Entregas - tipos de domínio
// ==========================================
// Classificação de SLA e metadados de importação
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// SlaClass - classificação derivada de SLA2
// ==========================================
// O campo SLA2 da planilha é texto livre; a classificação normaliza
// (TRIM + UPPER) e reconhece o conjunto fechado usado nos indicadores.
// Valores fora do conjunto caem em Outro e não contam como positivos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlaClass {
    EntregueNoPrazo, // "ENTREGUE NO PRAZO"
    DentroDoPrazo,   // "DENTRO DO PRAZO"
    Atrasada,        // "ATRASADA"
    Vencida,         // "VENCIDA"
    Outro,           // qualquer outro texto (inclusive vazio)
}

impl SlaClass {
    /// Classifica um valor bruto de SLA2 (TRIM + UPPER antes de comparar)
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "ENTREGUE NO PRAZO" => SlaClass::EntregueNoPrazo,
            "DENTRO DO PRAZO" => SlaClass::DentroDoPrazo,
            "ATRASADA" => SlaClass::Atrasada,
            "VENCIDA" => SlaClass::Vencida,
            _ => SlaClass::Outro,
        }
    }

    /// Conjunto positivo usado no cálculo de performance
    pub fn is_positive(&self) -> bool {
        matches!(self, SlaClass::EntregueNoPrazo | SlaClass::DentroDoPrazo)
    }
}

// ==========================================
// ImportSource - origem de uma importação
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportSource {
    File,        // arquivo local (.xlsx/.csv)
    RemoteSheet, // export CSV de planilha pública
}

// ==========================================
// ImportReport - resultado de uma importação
// ==========================================
// Uso: valor de retorno da API de importação; também vai para o log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,              // id do lote (UUID)
    pub file_name: Option<String>,     // nome do arquivo de origem
    pub source: ImportSource,          // origem dos dados
    pub total_rows: usize,             // linhas de dados lidas
    pub mapped: usize,                 // registros mapeados
    pub merged_total: usize,           // tamanho do conjunto após persistir
    pub imported_at: DateTime<Utc>,    // momento da importação
    pub elapsed_ms: u64,               // duração da importação
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sla_class_from_raw() {
        assert_eq!(SlaClass::from_raw("ENTREGUE NO PRAZO"), SlaClass::EntregueNoPrazo);
        assert_eq!(SlaClass::from_raw("  entregue no prazo  "), SlaClass::EntregueNoPrazo);
        assert_eq!(SlaClass::from_raw("Dentro do Prazo"), SlaClass::DentroDoPrazo);
        assert_eq!(SlaClass::from_raw("ATRASADA"), SlaClass::Atrasada);
        assert_eq!(SlaClass::from_raw("VENCIDA"), SlaClass::Vencida);
        assert_eq!(SlaClass::from_raw(""), SlaClass::Outro);
        assert_eq!(SlaClass::from_raw("EM ROTA"), SlaClass::Outro);
    }

    #[test]
    fn test_sla_class_positive_set() {
        assert!(SlaClass::EntregueNoPrazo.is_positive());
        assert!(SlaClass::DentroDoPrazo.is_positive());
        assert!(!SlaClass::Atrasada.is_positive());
        assert!(!SlaClass::Vencida.is_positive());
        assert!(!SlaClass::Outro.is_positive());
    }
}
