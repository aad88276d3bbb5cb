// ==========================================
// Controle de Entregas - exportação fiel
// ==========================================
// O export devolve as linhas ORIGINAIS preservadas em raw_row (coluna →
// célula, na ordem da planilha importada), nunca uma tabela re-derivada
// dos campos tipados. Registros sintéticos (sem raw_row) caem nos
// campos tipados com os nomes canônicos de coluna.
// ==========================================

use indexmap::{IndexMap, IndexSet};

use crate::domain::{DeliveryRecord, MovementRecord};
use crate::importer::error::{ImportError, ImportResult};

/// Colunas do modelo de importação completo (layout do sistema de origem)
pub const TEMPLATE_COLUMNS: &[&str] = &[
    "Nro. Entrega",
    "Nro. Arquivo",
    "Serviço",
    "Serviço Parceiro",
    "Nota Fiscal",
    "Chave NFe",
    "N° Pedido",
    "Nro. Carga",
    "Nro. Entrega2",
    "Cliente",
    "CNPJ Cliente",
    "Filial",
    "CNPJ Filial",
    "Sigla Unidade Coleta de Carga",
    "Sigla Unidade Atual",
    "Sigla Unidade Destino",
    "Sigla Unidade Entrega",
    "Sigla Unidade Devolução",
    "Cidade Unidade Atual",
    "Cidade Unidade Entrega",
    "Cidade Unidade Devolução",
    "Rota",
    "Nome Pessoa Visita",
    "RG Pessoa Visita",
    "Documento Pessoa Visita",
    "CEP Pessoa Visita",
    "Logradouro Pessoa Visita",
    "Numero Pessoa Visita",
    "Complemento Pessoa Visita",
    "Bairro Pessoa Visita",
    "Cidade Pessoa Visita",
    "UF Pessoa Visita",
    "Ponto de Referencia Pessoa Visita",
    "Região Tarifária",
    "Nome Recebedor",
    "Documento Recebedor",
    "Observação Recebedor",
    "Peso Informado",
    "Peso Medido",
    "Cubagem Informada",
    "Cubagem Medida",
    "Peso Taxado",
    "Peso NotaFiscal",
    "Qtde Volumes",
    "Qtde. Itens",
    "Valor Mercadoria",
    "Valor Pendente Compra",
    "Nro. CTE",
    "Nro. Série CTe",
    "Dt. Entrega",
    "Dt. Devolução",
    "Status",
    "Dt. Prazo Embarcador",
    "Dt. Primeiro Prazo",
    "Dt. Prazo Atual",
    "Dt. Agendamento",
    "Dt. Cadastro",
    "Dt. Recebimento Unidade Entrega",
    "Qtde. Atendimentos Realizados",
    "Qtde. Pendências",
    "Pendências",
    "Últ. Pendência",
    "Obs. Ult. Pendência",
    "Dt. Ult. Pendência",
    "Últ. Ocorrência",
    "Obs. Ult. Ocorrência",
    "Dt. Ult. Ocorrência",
    "Id Ult. Ocorrência",
    "Ult. Romaneio",
    "Ult. Motorista",
    "Código Remetente",
    "Nro. Transporte",
    "Motivo Atraso",
    "PREVENTIVO",
    "SLA",
    "SLA2",
];

/// Serializa linhas brutas em CSV.
///
/// O cabeçalho é a união ordenada das colunas de todas as linhas (ordem
/// de primeira ocorrência); células ausentes saem em branco.
fn rows_to_csv(rows: &[IndexMap<String, String>]) -> ImportResult<String> {
    let mut headers: IndexSet<String> = IndexSet::new();
    for row in rows {
        for key in row.keys() {
            headers.insert(key.clone());
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers.iter())
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;

    for row in rows {
        let record: Vec<&str> = headers
            .iter()
            .map(|h| row.get(h).map(|v| v.as_str()).unwrap_or(""))
            .collect();
        writer
            .write_record(&record)
            .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::CsvWriteError(e.to_string()))
}

fn delivery_fallback_raw(record: &DeliveryRecord) -> IndexMap<String, String> {
    IndexMap::from([
        ("Nro. Entrega".to_string(), record.delivery_number.clone()),
        ("Status".to_string(), record.status.clone()),
        ("Dt. Prazo Atual".to_string(), record.due_date.clone()),
        ("Sigla Unidade Atual".to_string(), record.current_unit.clone()),
        (
            "Sigla Unidade Destino".to_string(),
            record.destination_unit.clone(),
        ),
        ("PREVENTIVO".to_string(), record.preventive_flag.clone()),
        ("SLA".to_string(), record.sla.clone()),
        ("SLA2".to_string(), record.sla2.clone()),
    ])
}

fn movement_fallback_raw(record: &MovementRecord) -> IndexMap<String, String> {
    IndexMap::from([
        ("Numero do romaneio".to_string(), record.manifest_number.clone()),
        ("Tipo de Romaneio".to_string(), record.manifest_type.clone()),
        ("Motorista".to_string(), record.driver.clone()),
        ("Unidade Origem".to_string(), record.origin_unit.clone()),
        ("Dt. Operação".to_string(), record.generation_date.clone()),
        ("Situação Baixa".to_string(), record.settlement_status.clone()),
        (
            "Qtde. Solicitações/Consolidações".to_string(),
            record.requested_quantity.clone(),
        ),
    ])
}

/// Exporta registros de entrega como CSV fiel ao arquivo de origem.
pub fn export_deliveries(records: &[DeliveryRecord]) -> ImportResult<String> {
    let rows: Vec<IndexMap<String, String>> = records
        .iter()
        .map(|r| {
            if r.raw_row.is_empty() {
                delivery_fallback_raw(r)
            } else {
                r.raw_row.clone()
            }
        })
        .collect();
    rows_to_csv(&rows)
}

/// Exporta registros de movimentação como CSV fiel à planilha de origem.
pub fn export_movements(records: &[MovementRecord]) -> ImportResult<String> {
    let rows: Vec<IndexMap<String, String>> = records
        .iter()
        .map(|r| {
            if r.raw_row.is_empty() {
                movement_fallback_raw(r)
            } else {
                r.raw_row.clone()
            }
        })
        .collect();
    rows_to_csv(&rows)
}

/// Gera o modelo de importação: só o cabeçalho canônico completo.
pub fn template_csv() -> ImportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(TEMPLATE_COLUMNS)
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::CsvWriteError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::{map_deliveries, parse_csv_text};

    #[test]
    fn test_export_round_trips_raw_rows() {
        let original = "Nro. Entrega,Cliente,Observação\n1001,ACME,\"entrega, fundos\"\n1002,Beta,ok\n";
        let sheet = parse_csv_text(original).unwrap();
        let records = map_deliveries(&sheet);

        let exported = export_deliveries(&records).unwrap();
        let reparsed = parse_csv_text(&exported).unwrap();

        assert_eq!(reparsed.headers, sheet.headers);
        assert_eq!(reparsed.rows, sheet.rows);
    }

    #[test]
    fn test_export_subset_preserves_headers() {
        let sheet =
            parse_csv_text("Nro. Entrega,Cliente\n1001,ACME\n1002,Beta\n").unwrap();
        let records = map_deliveries(&sheet);

        // subconjunto filtrado mantém o cabeçalho original
        let exported = export_deliveries(&records[..1]).unwrap();
        let reparsed = parse_csv_text(&exported).unwrap();

        assert_eq!(reparsed.headers, vec!["Nro. Entrega", "Cliente"]);
        assert_eq!(reparsed.rows.len(), 1);
    }

    #[test]
    fn test_export_synthetic_record_uses_typed_fields() {
        let record = crate::domain::DeliveryRecord {
            delivery_number: "1001".to_string(),
            status: "ENTREGUE".to_string(),
            ..crate::domain::DeliveryRecord::empty()
        };

        let exported = export_deliveries(&[record]).unwrap();

        assert!(exported.contains("Nro. Entrega"));
        assert!(exported.contains("1001"));
        assert!(exported.contains("ENTREGUE"));
    }

    #[test]
    fn test_template_has_all_columns() {
        let template = template_csv().unwrap();
        let sheet = parse_csv_text(&template).unwrap();

        assert_eq!(sheet.headers.len(), TEMPLATE_COLUMNS.len());
        assert_eq!(sheet.headers[0], "Nro. Entrega");
        assert_eq!(sheet.headers.last().map(|s| s.as_str()), Some("SLA2"));
        assert!(sheet.rows.is_empty());
    }
}
