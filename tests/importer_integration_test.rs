// ==========================================
// Controle de Entregas - teste de integração da importação
// ==========================================
// Cobre o pipeline completo: arquivo/planilha remota → parse → resolução
// de colunas → registros → mescla → persistência em SQLite.
// ==========================================


use std::sync::Arc;

use controle_entregas::api::ImportApi;
use controle_entregas::domain::DeliveryFilter;
use controle_entregas::engine::{performance, status_cards};
use controle_entregas::repository::{DeliveryStore, SqliteDeliveryRepository};
use test_helpers::{create_test_db, write_csv_file, StaticSheetSource};

fn import_api(db_path: &str, source: StaticSheetSource) -> (Arc<SqliteDeliveryRepository>, ImportApi) {
    let store = Arc::new(SqliteDeliveryRepository::new(db_path).expect("falha ao criar repositório"));
    let api = ImportApi::new(store.clone(), Arc::new(source));
    (store, api)
}

#[test]
fn test_file_import_end_to_end() {
    let (_db, db_path) = create_test_db();
    let (store, api) = import_api(&db_path, StaticSheetSource::ok(""));

    let file = write_csv_file(
        "Nro. Entrega,Status,Dt. Prazo Atual,Sigla Unidade Atual,Sigla Unidade Destino,PREVENTIVO,SLA,SLA2\n\
         1001,ENTREGUE,2024-03-10,SP,RJ,NAO,24,ENTREGUE NO PRAZO\n\
         1002,EM ROTA,15/03/2024,SP,MG,SIM,48,ATRASADA\n\
         1003,EM ROTA,3/20/24,RJ,SP,NAO,24,DENTRO DO PRAZO\n",
    );

    let report = api.import_file(file.path()).expect("importação falhou");
    assert_eq!(report.total_rows, 3);
    assert_eq!(report.mapped, 3);
    assert_eq!(report.merged_total, 3);

    // cenário fim a fim: total=3, no prazo=2, atrasada=1, performance 66.7
    let records = store.load().expect("load falhou");
    let cards = status_cards(&records);
    assert_eq!(cards.total_deliveries, 3);
    assert_eq!(cards.delivered_on_time + cards.within_deadline, 2);
    assert_eq!(cards.late, 1);
    assert_eq!(format!("{:.1}", performance(&records)), "66.7");

    // raw_row preservada para o reexporte
    assert_eq!(records[0].raw_row.get("SLA"), Some(&"24".to_string()));
}

#[test]
fn test_reimport_merges_and_survives_reopen() {
    let (_db, db_path) = create_test_db();

    {
        let (_store, api) = import_api(&db_path, StaticSheetSource::ok(""));
        let first = write_csv_file("Nro. Entrega,Status,SLA2\n100,EM ROTA,ATRASADA\n200,EM ROTA,VENCIDA\n");
        api.import_file(first.path()).expect("primeira importação falhou");

        let second = write_csv_file("Nro. Entrega,Status,SLA2\n100,ENTREGUE,ENTREGUE NO PRAZO\n");
        let report = api.import_file(second.path()).expect("segunda importação falhou");
        assert_eq!(report.merged_total, 2);
    }

    // reabre o banco em outra "sessão": o conjunto mesclado sobrevive
    let store = SqliteDeliveryRepository::new(&db_path).expect("falha ao reabrir repositório");
    let records = store.load().expect("load falhou");

    assert_eq!(records.len(), 2);
    let overwritten = records
        .iter()
        .find(|r| r.delivery_number == "100")
        .expect("registro 100 sumiu");
    assert_eq!(overwritten.status, "ENTREGUE");
    assert_eq!(overwritten.sla2, "ENTREGUE NO PRAZO");
}

#[test]
fn test_import_with_degraded_headers_resolves_by_content() {
    let (_db, db_path) = create_test_db();
    let (store, api) = import_api(&db_path, StaticSheetSource::ok(""));

    // cabeçalhos fora do padrão: "Entrega" resolve por substring e a
    // coluna de data pela amostragem de conteúdo
    let file = write_csv_file(
        "Entrega,Situação,Data\n1001,ENTREGUE,2024-03-01\n1002,EM ROTA,2024-03-02\n",
    );
    api.import_file(file.path()).expect("importação falhou");

    let records = store.load().expect("load falhou");
    assert_eq!(records[0].delivery_number, "1001");
    assert_eq!(records[0].status, "ENTREGUE");
    assert_eq!(records[0].due_date, "2024-03-01");
    assert_eq!(records[1].delivery_number, "1002");
}

#[tokio::test]
async fn test_remote_load_replaces_persisted_set() {
    let (_db, db_path) = create_test_db();
    let (store, api) = import_api(
        &db_path,
        StaticSheetSource::ok("Nro. Entrega,Status,SLA2\n900,NOVO,DENTRO DO PRAZO\n"),
    );

    let file = write_csv_file("Nro. Entrega,Status,SLA2\n100,ANTIGO,ATRASADA\n");
    api.import_file(file.path()).expect("importação falhou");

    let report = api.load_from_sheet().await.expect("carga remota falhou");
    assert_eq!(report.total_rows, 1);

    let records = store.load().expect("load falhou");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].delivery_number, "900");
}

#[tokio::test]
async fn test_remote_failure_aborts_without_state_change() {
    let (_db, db_path) = create_test_db();
    let (store, api) = import_api(&db_path, StaticSheetSource::failing("HTTP 500"));

    let file = write_csv_file("Nro. Entrega,Status\n100,X\n");
    api.import_file(file.path()).expect("importação falhou");

    let result = api.load_from_sheet().await;
    assert!(result.is_err(), "esperava falha de rede");

    let records = store.load().expect("load falhou");
    assert_eq!(records.len(), 1, "estado não deveria mudar em falha de rede");
}

#[test]
fn test_unkeyed_rows_are_dropped_on_merge() {
    let (_db, db_path) = create_test_db();
    let (store, api) = import_api(&db_path, StaticSheetSource::ok(""));

    let file = write_csv_file("Nro. Entrega,Status\n,SEM CHAVE\n100,COM CHAVE\n");
    let report = api.import_file(file.path()).expect("importação falhou");

    // as duas linhas são lidas, mas só a com chave sobrevive à mescla
    assert_eq!(report.total_rows, 2);
    assert_eq!(report.merged_total, 1);
    assert_eq!(store.load().expect("load falhou").len(), 1);
}

#[test]
fn test_filters_compose_over_imported_data() {
    let (_db, db_path) = create_test_db();
    let (store, api) = import_api(&db_path, StaticSheetSource::ok(""));

    let file = write_csv_file(
        "Nro. Entrega,Status,Dt. Prazo Atual,Sigla Unidade Atual,Sigla Unidade Destino,PREVENTIVO,SLA,SLA2\n\
         1,A,2024-03-10,SP,RJ,NAO,24,ATRASADA\n\
         2,A,2024-04-10,SP,RJ,NAO,24,ATRASADA\n\
         3,A,2024-03-20,RJ,SP,NAO,24,ATRASADA\n",
    );
    api.import_file(file.path()).expect("importação falhou");

    let records = store.load().expect("load falhou");
    let filter = DeliveryFilter {
        current_unit: Some("SP".to_string()),
        due_month: Some("2024-03".to_string()),
        ..Default::default()
    };
    let filtered = controle_entregas::engine::filter_deliveries(&records, &filter);

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].delivery_number, "1");
}
