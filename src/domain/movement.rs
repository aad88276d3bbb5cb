// ==========================================
// Controle de Entregas - modelo de movimentação
// ==========================================
// Romaneios e consolidações; módulo independente do painel de entregas
// ==========================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ==========================================
// MovementRecord - registro de movimentação
// ==========================================
// Ciclo de vida: substituído por inteiro a cada recarga da planilha;
// nunca persistido entre sessões.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRecord {
    pub manifest_number: String,    // "Numero do romaneio" (coluna A)
    pub manifest_type: String,      // "Tipo de Romaneio" (coluna B)
    pub driver: String,             // "Motorista" (coluna D)
    pub origin_unit: String,        // "Unidade Origem" (coluna F)
    pub generation_date: String,    // "Dt. Operação" (coluna L, formato variado)
    pub settlement_status: String,  // "Situação Baixa" (coluna P)
    pub requested_quantity: String, // "Qtde. Solicitações/Consolidações" (coluna Q)

    // Linha original (coluna → célula, na ordem da planilha)
    pub raw_row: IndexMap<String, String>,
}

// ==========================================
// MovementFilter - filtros do módulo de movimentação
// ==========================================
// manifest_types vazio = sem restrição (diferente de "excluir tudo").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementFilter {
    pub month: Option<String>,             // YYYY-MM sobre a data de geração
    pub origin_unit: Option<String>,       // base de origem exata
    pub manifest_types: Vec<String>,       // pertinência multi-seleção
    pub settlement_status: Option<String>, // comparação sem caixa/espaços
}
