// ==========================================
// Controle de Entregas - modelo de entrega
// ==========================================
// Projeção semântica da linha de planilha + linha original preservada
// ==========================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ==========================================
// DeliveryRecord - registro de entrega
// ==========================================
// Regra: raw_row reproduz exatamente as colunas/valores originais do
// arquivo importado (coluna → célula, na ordem da planilha). É a base do
// reexporte fiel; os campos tipados nunca substituem a linha original.
// Campos semânticos ficam vazios quando a coluna não foi resolvida.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    // ===== Chave de negócio =====
    pub delivery_number: String, // "Nro. Entrega" (pode ser vazio em linhas legadas)

    // ===== Situação =====
    pub status: String, // "Status" (texto livre)
    pub sla: String,    // "SLA" (texto livre/numérico)
    pub sla2: String,   // "SLA2" (classificação de prazo, texto livre)

    // ===== Prazo =====
    pub due_date: String, // "Dt. Prazo Atual" (string em formato variado)

    // ===== Unidades =====
    pub current_unit: String,     // "Sigla Unidade Atual"
    pub destination_unit: String, // "Sigla Unidade Destino"

    // ===== Tratamento preventivo =====
    pub preventive_flag: String, // "PREVENTIVO" (texto livre)

    // ===== Linha original (reexporte sem perdas) =====
    pub raw_row: IndexMap<String, String>,
}

// ==========================================
// DeliveryFilter - filtros do painel de entregas
// ==========================================
// Todas as dimensões são opcionais; None, "" ou o sentinela "all"
// significam "sem restrição nesta dimensão".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryFilter {
    pub current_unit: Option<String>,      // sigla exata
    pub destination_unit: Option<String>,  // sigla exata
    pub preventive_status: Option<String>, // valor exato de PREVENTIVO
    pub specific_date: Option<String>,     // YYYY-MM-DD
    pub due_month: Option<String>,         // YYYY-MM
}

impl DeliveryRecord {
    /// Registro vazio (todos os campos em branco)
    ///
    /// Útil para construir registros sintéticos em testes e no merge.
    pub fn empty() -> Self {
        Self {
            delivery_number: String::new(),
            status: String::new(),
            sla: String::new(),
            sla2: String::new(),
            due_date: String::new(),
            current_unit: String::new(),
            destination_unit: String::new(),
            preventive_flag: String::new(),
            raw_row: IndexMap::new(),
        }
    }
}
