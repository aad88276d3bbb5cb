// ==========================================
// Controle de Entregas - mapeador de registros
// ==========================================
// Resolve a coluna de cada campo UMA vez contra o cabeçalho (nunca por
// linha) e depois lê índices fixos. A linha original inteira vai em
// raw_row independentemente de quais campos semânticos resolveram.
// ==========================================

use indexmap::IndexMap;
use regex::Regex;

use crate::domain::{DeliveryRecord, MovementRecord};
use crate::importer::file_parser::SheetData;
use crate::importer::header_matcher::resolve_column;

// ==========================================
// FieldSpec - descrição de um campo mapeável
// ==========================================
struct FieldSpec {
    aliases: &'static [&'static str],
    predicate: Option<Regex>,
    // Coluna fixa usada quando nenhum apelido resolve (planilha de
    // movimentação tem layout posicional conhecido: A, B, D, F, L, P, Q)
    fallback_index: Option<usize>,
}

impl FieldSpec {
    fn resolve(&self, sheet: &SheetData) -> Option<usize> {
        resolve_column(
            &sheet.headers,
            self.aliases,
            self.predicate.as_ref(),
            &sheet.rows,
        )
        .or(self.fallback_index)
    }
}

fn regex(pattern: &str) -> Option<Regex> {
    // padrões literais do próprio código; falha aqui é bug de compilação
    Some(Regex::new(pattern).unwrap())
}

fn cell(row: &[String], index: Option<usize>) -> String {
    index
        .and_then(|i| row.get(i))
        .cloned()
        .unwrap_or_default()
}

fn raw_row(headers: &[String], row: &[String]) -> IndexMap<String, String> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| (header.clone(), row.get(i).cloned().unwrap_or_default()))
        .collect()
}

// ==========================================
// Campos do painel de entregas
// ==========================================
// Apelidos e predicados de conteúdo por campo; os predicados cobrem a
// perda total do cabeçalho (coluna renomeada para algo irreconhecível).
struct DeliveryColumns {
    delivery_number: Option<usize>,
    status: Option<usize>,
    due_date: Option<usize>,
    current_unit: Option<usize>,
    destination_unit: Option<usize>,
    preventive_flag: Option<usize>,
    sla: Option<usize>,
    sla2: Option<usize>,
}

impl DeliveryColumns {
    fn resolve(sheet: &SheetData) -> Self {
        let delivery_number = FieldSpec {
            aliases: &[
                "Nro. Entrega",
                "Nro Entrega",
                "numero entrega",
                "nro entrega",
                "nroentrega",
            ],
            // valores com cara de número de entrega
            predicate: regex(r"[0-9]"),
            fallback_index: None,
        };
        let status = FieldSpec {
            aliases: &["Status", "situacao", "situação", "ocorrencia"],
            // valores com cara de situação de entrega
            predicate: regex(r"(?i)entreg|atras|aguard|ocorr|penden|cancel"),
            fallback_index: None,
        };
        let due_date = FieldSpec {
            aliases: &[
                "Dt. Prazo Atual",
                "Dt Prazo Atual",
                "Dt. Prazo",
                "Dt. Prazo Embarcador",
                "Dt. Primeiro Prazo",
                "dtprazo",
            ],
            // valores com cara de data
            predicate: regex(
                r"^\d{4}-\d{2}-\d{2}|^\d{1,2}/\d{1,2}/\d{2,4}|^\d{1,2}-\d{1,2}-\d{2,4}",
            ),
            fallback_index: None,
        };
        let sigla = r"^[A-Z0-9]{1,6}$|^[A-Z]{2,4}$";
        let current_unit = FieldSpec {
            aliases: &[
                "Sigla Unidade Atual",
                "Sigla Unidade Coleta de Carga",
                "Sigla Unidade",
                "unidade atual",
                "unidadecoleta",
            ],
            // siglas curtas em maiúsculas
            predicate: regex(sigla),
            fallback_index: None,
        };
        let destination_unit = FieldSpec {
            aliases: &[
                "Sigla Unidade Destino",
                "Sigla Unidade Entrega",
                "Unidade Destino",
                "unidade destino",
            ],
            predicate: regex(sigla),
            fallback_index: None,
        };
        let preventive_flag = FieldSpec {
            aliases: &["PREVENTIVO", "Preventivo", "tipo"],
            predicate: regex(r"(?i)prevent|sim|nao|não|programado"),
            fallback_index: None,
        };
        let sla = FieldSpec {
            aliases: &["SLA", "sla"],
            predicate: regex(r"[0-9]"),
            fallback_index: None,
        };
        let sla2 = FieldSpec {
            aliases: &["SLA2", "SLA 2", "sla2"],
            predicate: regex(r"(?i)[0-9]|entreg|dentro"),
            fallback_index: None,
        };

        Self {
            delivery_number: delivery_number.resolve(sheet),
            status: status.resolve(sheet),
            due_date: due_date.resolve(sheet),
            current_unit: current_unit.resolve(sheet),
            destination_unit: destination_unit.resolve(sheet),
            preventive_flag: preventive_flag.resolve(sheet),
            sla: sla.resolve(sheet),
            sla2: sla2.resolve(sheet),
        }
    }
}

/// Mapeia a grade de células para registros de entrega.
///
/// Linhas totalmente em branco já foram descartadas pelo parser; campos
/// sem coluna resolvida ficam vazios (dado parcial é aceitável).
pub fn map_deliveries(sheet: &SheetData) -> Vec<DeliveryRecord> {
    let columns = DeliveryColumns::resolve(sheet);

    sheet
        .rows
        .iter()
        .map(|row| DeliveryRecord {
            delivery_number: cell(row, columns.delivery_number),
            status: cell(row, columns.status),
            due_date: cell(row, columns.due_date),
            current_unit: cell(row, columns.current_unit),
            destination_unit: cell(row, columns.destination_unit),
            preventive_flag: cell(row, columns.preventive_flag),
            sla: cell(row, columns.sla),
            sla2: cell(row, columns.sla2),
            raw_row: raw_row(&sheet.headers, row),
        })
        .collect()
}

// ==========================================
// Campos do módulo de movimentação
// ==========================================
struct MovementColumns {
    manifest_number: Option<usize>,
    manifest_type: Option<usize>,
    driver: Option<usize>,
    origin_unit: Option<usize>,
    generation_date: Option<usize>,
    settlement_status: Option<usize>,
    requested_quantity: Option<usize>,
}

impl MovementColumns {
    fn resolve(sheet: &SheetData) -> Self {
        let spec = |aliases: &'static [&'static str], fallback: usize| FieldSpec {
            aliases,
            predicate: None,
            fallback_index: Some(fallback),
        };

        Self {
            manifest_number: spec(
                &[
                    "Numero do romaneio",
                    "Numero romaneio",
                    "Romaneio",
                    "Nro Romaneio",
                    "Número do romaneio",
                ],
                0, // coluna A
            )
            .resolve(sheet),
            manifest_type: spec(&["Tipo de Romaneio", "Tipo romaneio", "Tipo"], 1).resolve(sheet), // coluna B
            driver: spec(&["Motorista", "Nome do Motorista"], 3).resolve(sheet), // coluna D
            origin_unit: spec(&["Unidade Origem", "Base Origem", "Filial Origem"], 5)
                .resolve(sheet), // coluna F
            generation_date: spec(
                &[
                    "Dt. Operação",
                    "Dt Operação",
                    "Dt. Operacao",
                    "Dt Operacao",
                    "Data de geração",
                    "Data geração",
                    "Dt Geração",
                    "Data",
                ],
                11, // coluna L
            )
            .resolve(sheet),
            settlement_status: spec(
                &[
                    "Situação Baixa",
                    "Situação da Baixa",
                    "Situacao da Baixa",
                    "Status Baixa",
                    "Situação",
                    "Situacao",
                ],
                15, // coluna P
            )
            .resolve(sheet),
            requested_quantity: spec(
                &[
                    "Qtde. Solicitações/Consolidações",
                    "Qtde Solicitações",
                    "Quantidade Solicitações",
                ],
                16, // coluna Q
            )
            .resolve(sheet),
        }
    }
}

/// Mapeia a grade de células para registros de movimentação.
pub fn map_movements(sheet: &SheetData) -> Vec<MovementRecord> {
    let columns = MovementColumns::resolve(sheet);

    sheet
        .rows
        .iter()
        .map(|row| MovementRecord {
            manifest_number: cell(row, columns.manifest_number),
            manifest_type: cell(row, columns.manifest_type),
            driver: cell(row, columns.driver),
            origin_unit: cell(row, columns.origin_unit),
            generation_date: cell(row, columns.generation_date),
            settlement_status: cell(row, columns.settlement_status),
            requested_quantity: cell(row, columns.requested_quantity),
            raw_row: raw_row(&sheet.headers, row),
        })
        .collect()
}
