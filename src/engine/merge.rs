// ==========================================
// Controle de Entregas - mesclagem por chave de negócio
// ==========================================
// Importações repetidas são deduplicadas pelo número da entrega: dado
// novo sobrescreve o antigo, registro inteiro (sem mescla por campo).
// Registros sem chave são descartados do mapa em TODA mesclagem —
// política explícita para linhas legadas, não um descuido.
// ==========================================

use indexmap::IndexMap;

use crate::domain::DeliveryRecord;

/// Mescla `incoming` sobre `existing`, chaveando por `delivery_number`.
///
/// A saída preserva a posição da primeira ocorrência de cada chave; o
/// valor é o da última ocorrência. Idempotente:
/// `merge(merge(a, b), b) == merge(a, b)`.
pub fn merge_records(existing: &[DeliveryRecord], incoming: &[DeliveryRecord]) -> Vec<DeliveryRecord> {
    let mut map: IndexMap<String, DeliveryRecord> = IndexMap::new();

    for record in existing.iter().chain(incoming.iter()) {
        if record.delivery_number.is_empty() {
            continue;
        }
        // IndexMap::insert substitui o valor mantendo a posição original
        map.insert(record.delivery_number.clone(), record.clone());
    }

    map.into_values().collect()
}
