// ==========================================
// Controle de Entregas - agregações do painel
// ==========================================
// Produz os resumos exibidos no painel: cards de status, contagem por
// (status, unidade), matriz data × status e performance por unidade.
// Todas as funções são totais: toleram campos vazios e conjunto vazio,
// nunca retornam erro.
// ==========================================

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::domain::{DeliveryRecord, SlaClass};

/// Rótulo dos grupos sem sigla de unidade
pub const NO_UNIT_LABEL: &str = "Sem unidade";

/// Percentual de registros com SLA2 positivo sobre o conjunto.
///
/// Conjunto vazio → 0.
pub fn performance(records: &[DeliveryRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let positive = records
        .iter()
        .filter(|r| SlaClass::from_raw(&r.sla2).is_positive())
        .count();
    (positive as f64 / records.len() as f64) * 100.0
}

// ==========================================
// StatusCards - contadores do topo do painel
// ==========================================
// O total conta entregas distintas (chave de negócio não vazia); os
// demais cards contam registros por classe de SLA2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCards {
    pub total_deliveries: usize,
    pub delivered_on_time: usize, // ENTREGUE NO PRAZO
    pub within_deadline: usize,   // DENTRO DO PRAZO
    pub late: usize,              // ATRASADA
    pub expired: usize,           // VENCIDA
}

pub fn status_cards(records: &[DeliveryRecord]) -> StatusCards {
    let unique: HashSet<&str> = records
        .iter()
        .map(|r| r.delivery_number.as_str())
        .filter(|n| !n.is_empty())
        .collect();

    let mut cards = StatusCards {
        total_deliveries: unique.len(),
        delivered_on_time: 0,
        within_deadline: 0,
        late: 0,
        expired: 0,
    };

    for record in records {
        match SlaClass::from_raw(&record.sla2) {
            SlaClass::EntregueNoPrazo => cards.delivered_on_time += 1,
            SlaClass::DentroDoPrazo => cards.within_deadline += 1,
            SlaClass::Atrasada => cards.late += 1,
            SlaClass::Vencida => cards.expired += 1,
            SlaClass::Outro => {}
        }
    }

    cards
}

// ==========================================
// StatusUnitCount - contagem por (status, unidade atual)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUnitCount {
    pub status: String,
    pub current_unit: String,
    pub count: usize,
}

/// Uma linha por par (status, unidade) observado, na ordem de primeira
/// ocorrência. Nenhuma outra ordenação é garantida.
pub fn status_unit_counts(records: &[DeliveryRecord]) -> Vec<StatusUnitCount> {
    let mut groups: IndexMap<(String, String), usize> = IndexMap::new();
    for record in records {
        *groups
            .entry((record.status.clone(), record.current_unit.clone()))
            .or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|((status, current_unit), count)| StatusUnitCount {
            status,
            current_unit,
            count,
        })
        .collect()
}

// ==========================================
// PerformanceMatrix - matriz data × status
// ==========================================
// Linhas: datas de prazo distintas (string bruta, ordenação lexical
// crescente — não cronológica quando a string não é ISO zero-preenchida).
// Colunas: status distintos em ordem lexical. A linha TOTAL soma as
// colunas e reporta a MÉDIA das performances por linha, não o percentual
// recalculado sobre o conjunto inteiro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub due_date: String,
    pub counts: Vec<usize>, // alinhado com PerformanceMatrix::columns
    pub total: usize,
    pub performance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMatrix {
    pub columns: Vec<String>, // status distintos, ordenados
    pub rows: Vec<MatrixRow>,
    pub totals: Vec<usize>, // soma por coluna
    pub grand_total: usize,
    pub average_performance: f64, // média das performances por linha
}

pub fn performance_matrix(records: &[DeliveryRecord]) -> PerformanceMatrix {
    let mut dates: Vec<String> = records
        .iter()
        .map(|r| r.due_date.clone())
        .filter(|d| !d.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    dates.sort();

    let mut columns: Vec<String> = records
        .iter()
        .map(|r| r.status.clone())
        .filter(|s| !s.is_empty())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    columns.sort();

    let rows: Vec<MatrixRow> = dates
        .into_iter()
        .map(|date| {
            let date_records: Vec<&DeliveryRecord> =
                records.iter().filter(|r| r.due_date == date).collect();

            let counts: Vec<usize> = columns
                .iter()
                .map(|status| date_records.iter().filter(|r| &r.status == status).count())
                .collect();

            let positive = date_records
                .iter()
                .filter(|r| SlaClass::from_raw(&r.sla2).is_positive())
                .count();
            let total = date_records.len();
            let performance = if total > 0 {
                (positive as f64 / total as f64) * 100.0
            } else {
                0.0
            };

            MatrixRow {
                due_date: date,
                counts,
                total,
                performance,
            }
        })
        .collect();

    let totals: Vec<usize> = (0..columns.len())
        .map(|i| rows.iter().map(|row| row.counts[i]).sum())
        .collect();
    let grand_total = rows.iter().map(|row| row.total).sum();
    let average_performance = if rows.is_empty() {
        0.0
    } else {
        rows.iter().map(|row| row.performance).sum::<f64>() / rows.len() as f64
    };

    PerformanceMatrix {
        columns,
        rows,
        totals,
        grand_total,
        average_performance,
    }
}

// ==========================================
// UnitPerformance - performance por unidade atual
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPerformance {
    pub unit: String,
    pub total: usize,
    pub on_time: usize, // SLA2 no conjunto positivo
    pub late: usize,    // ATRASADA
    pub expired: usize, // VENCIDA
    pub performance: f64,
}

/// Agrupa por unidade atual (vazia → "Sem unidade") e ordena por
/// performance decrescente.
pub fn unit_performance(records: &[DeliveryRecord]) -> Vec<UnitPerformance> {
    let mut groups: IndexMap<String, UnitPerformance> = IndexMap::new();

    for record in records {
        let unit = if record.current_unit.is_empty() {
            NO_UNIT_LABEL.to_string()
        } else {
            record.current_unit.clone()
        };

        let group = groups.entry(unit.clone()).or_insert_with(|| UnitPerformance {
            unit,
            total: 0,
            on_time: 0,
            late: 0,
            expired: 0,
            performance: 0.0,
        });

        group.total += 1;
        match SlaClass::from_raw(&record.sla2) {
            class if class.is_positive() => group.on_time += 1,
            SlaClass::Atrasada => group.late += 1,
            SlaClass::Vencida => group.expired += 1,
            _ => {}
        }
    }

    let mut result: Vec<UnitPerformance> = groups
        .into_values()
        .map(|mut group| {
            group.performance = if group.total > 0 {
                (group.on_time as f64 / group.total as f64) * 100.0
            } else {
                0.0
            };
            group
        })
        .collect();

    result.sort_by(|a, b| {
        b.performance
            .partial_cmp(&a.performance)
            .unwrap_or(Ordering::Equal)
    });
    result
}
