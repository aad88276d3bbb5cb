// ==========================================
// Controle de Entregas - motor de filtros
// ==========================================
// Funções puras: cada dimensão é um predicado independente por registro,
// combinadas com E lógico. Dimensão ausente, vazia ou com o sentinela
// "all" não impõe restrição. A composição satisfaz
// filter(R, {d1,d2}) == filter(filter(R, {d1}), {d2}).
// ==========================================

use crate::domain::{DeliveryFilter, DeliveryRecord, MovementFilter, MovementRecord};
use crate::engine::date_norm::{normalize_day, normalize_month};

/// Sentinela de "sem restrição" nos seletores do painel
const ALL: &str = "all";

fn constraint(value: &Option<String>) -> Option<&str> {
    match value.as_deref() {
        None | Some("") | Some(ALL) => None,
        Some(v) => Some(v),
    }
}

/// Aplica o conjunto de filtros do painel de entregas.
///
/// Filtros de texto comparam com sensibilidade a caixa; filtros de data
/// exigem que a data do registro seja normalizável — data ausente ou não
/// reconhecida exclui o registro quando o filtro está ativo.
pub fn filter_deliveries(records: &[DeliveryRecord], filter: &DeliveryFilter) -> Vec<DeliveryRecord> {
    records
        .iter()
        .filter(|record| delivery_matches(record, filter))
        .cloned()
        .collect()
}

fn delivery_matches(record: &DeliveryRecord, filter: &DeliveryFilter) -> bool {
    if let Some(unit) = constraint(&filter.current_unit) {
        if record.current_unit != unit {
            return false;
        }
    }

    if let Some(unit) = constraint(&filter.destination_unit) {
        if record.destination_unit != unit {
            return false;
        }
    }

    if let Some(preventive) = constraint(&filter.preventive_status) {
        if record.preventive_flag != preventive {
            return false;
        }
    }

    if let Some(date) = constraint(&filter.specific_date) {
        match normalize_day(&record.due_date) {
            Some(day) if day == date => {}
            _ => return false,
        }
    }

    if let Some(month) = constraint(&filter.due_month) {
        match normalize_month(&record.due_date) {
            Some(m) if m == month => {}
            _ => return false,
        }
    }

    true
}

/// Aplica o conjunto de filtros do módulo de movimentação.
///
/// A situação de baixa compara sem caixa e sem espaços nas pontas; a
/// multi-seleção de tipos vazia não impõe restrição.
pub fn filter_movements(records: &[MovementRecord], filter: &MovementFilter) -> Vec<MovementRecord> {
    records
        .iter()
        .filter(|record| movement_matches(record, filter))
        .cloned()
        .collect()
}

fn movement_matches(record: &MovementRecord, filter: &MovementFilter) -> bool {
    if let Some(month) = constraint(&filter.month) {
        match normalize_month(&record.generation_date) {
            Some(m) if m == month => {}
            _ => return false,
        }
    }

    if let Some(origin) = constraint(&filter.origin_unit) {
        if record.origin_unit != origin {
            return false;
        }
    }

    if !filter.manifest_types.is_empty()
        && !filter.manifest_types.iter().any(|t| t == &record.manifest_type)
    {
        return false;
    }

    if let Some(settlement) = constraint(&filter.settlement_status) {
        let value = record.settlement_status.trim().to_lowercase();
        if value != settlement.trim().to_lowercase() {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn delivery(number: &str, unit: &str, destination: &str, due: &str) -> DeliveryRecord {
        DeliveryRecord {
            delivery_number: number.to_string(),
            current_unit: unit.to_string(),
            destination_unit: destination.to_string(),
            due_date: due.to_string(),
            ..DeliveryRecord::empty()
        }
    }

    fn movement(manifest_type: &str, origin: &str, date: &str, settlement: &str) -> MovementRecord {
        MovementRecord {
            manifest_number: "R1".to_string(),
            manifest_type: manifest_type.to_string(),
            driver: String::new(),
            origin_unit: origin.to_string(),
            generation_date: date.to_string(),
            settlement_status: settlement.to_string(),
            requested_quantity: String::new(),
            raw_row: IndexMap::new(),
        }
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let records = vec![delivery("1", "SP", "RJ", "2024-03-10")];
        let out = filter_deliveries(&records, &DeliveryFilter::default());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_sentinel_all_means_no_constraint() {
        let records = vec![delivery("1", "SP", "RJ", "")];
        let filter = DeliveryFilter {
            current_unit: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_deliveries(&records, &filter).len(), 1);
    }

    #[test]
    fn test_unit_filter_is_case_sensitive_exact() {
        let records = vec![delivery("1", "SP", "RJ", ""), delivery("2", "sp", "RJ", "")];
        let filter = DeliveryFilter {
            current_unit: Some("SP".to_string()),
            ..Default::default()
        };
        let out = filter_deliveries(&records, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].delivery_number, "1");
    }

    #[test]
    fn test_date_filter_accepts_any_recognized_format() {
        let records = vec![
            delivery("1", "SP", "RJ", "2024-03-15"),
            delivery("2", "SP", "RJ", "15/03/2024"),
            delivery("3", "SP", "RJ", "3/15/24"),
            delivery("4", "SP", "RJ", "16/03/2024"),
        ];
        let filter = DeliveryFilter {
            specific_date: Some("2024-03-15".to_string()),
            ..Default::default()
        };
        let out = filter_deliveries(&records, &filter);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_date_filter_excludes_unparseable_dates() {
        let records = vec![delivery("1", "SP", "RJ", "amanhã"), delivery("2", "SP", "RJ", "")];
        let filter = DeliveryFilter {
            due_month: Some("2024-03".to_string()),
            ..Default::default()
        };
        assert!(filter_deliveries(&records, &filter).is_empty());
    }

    #[test]
    fn test_and_composition() {
        let records = vec![
            delivery("1", "SP", "RJ", "2024-03-15"),
            delivery("2", "SP", "MG", "2024-03-15"),
            delivery("3", "RJ", "RJ", "2024-03-15"),
        ];
        let combined = DeliveryFilter {
            current_unit: Some("SP".to_string()),
            destination_unit: Some("RJ".to_string()),
            ..Default::default()
        };
        let only_unit = DeliveryFilter {
            current_unit: Some("SP".to_string()),
            ..Default::default()
        };
        let only_destination = DeliveryFilter {
            destination_unit: Some("RJ".to_string()),
            ..Default::default()
        };

        let both = filter_deliveries(&records, &combined);
        let sequential = filter_deliveries(&filter_deliveries(&records, &only_unit), &only_destination);
        let reversed = filter_deliveries(&filter_deliveries(&records, &only_destination), &only_unit);

        assert_eq!(both, sequential);
        assert_eq!(both, reversed);
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].delivery_number, "1");
    }

    #[test]
    fn test_movement_month_filter() {
        let records = vec![
            movement("Entrega", "POA", "05/03/2024", "baixado"),
            movement("Entrega", "POA", "05/04/2024", "baixado"),
        ];
        let filter = MovementFilter {
            month: Some("2024-03".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_movements(&records, &filter).len(), 1);
    }

    #[test]
    fn test_movement_empty_type_selection_keeps_everything() {
        let records = vec![
            movement("Entrega", "POA", "", ""),
            movement("Coleta", "POA", "", ""),
        ];
        let filter = MovementFilter::default();
        assert_eq!(filter_movements(&records, &filter).len(), 2);
    }

    #[test]
    fn test_movement_type_membership() {
        let records = vec![
            movement("Entrega", "POA", "", ""),
            movement("Coleta", "POA", "", ""),
            movement("Transferência", "POA", "", ""),
        ];
        let filter = MovementFilter {
            manifest_types: vec!["Entrega".to_string(), "Coleta".to_string()],
            ..Default::default()
        };
        assert_eq!(filter_movements(&records, &filter).len(), 2);
    }

    #[test]
    fn test_movement_settlement_ignores_case_and_spaces() {
        let records = vec![movement("Entrega", "POA", "", "  Baixado ")];
        let filter = MovementFilter {
            settlement_status: Some("baixado".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_movements(&records, &filter).len(), 1);
    }
}
