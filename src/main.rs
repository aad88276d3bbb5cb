// ==========================================
// Controle de Performance de Entregas - entrada de linha de comando
// ==========================================
// Superfície sem interface gráfica: importa planilhas, carrega as
// planilhas remotas e imprime os resumos do painel.
// ==========================================

use std::path::PathBuf;

use controle_entregas::app::{get_default_db_path, AppState};
use controle_entregas::domain::DeliveryFilter;
use controle_entregas::engine::date_norm::format_br;
use controle_entregas::{i18n, logging, APP_NAME, VERSION};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", APP_NAME);
    tracing::info!("Versão do sistema: {}", VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let command = match args.next() {
        Some(c) => c,
        None => {
            print_usage();
            return Ok(());
        }
    };

    let db_path = std::env::var("CONTROLE_ENTREGAS_DB").unwrap_or_else(|_| get_default_db_path());
    tracing::info!("Usando banco de dados: {}", db_path);

    let state = AppState::new(db_path)?;

    match command.as_str() {
        "importar" => {
            let paths: Vec<PathBuf> = args.map(PathBuf::from).collect();
            if paths.is_empty() {
                return Err("uso: controle-entregas importar <arquivo.xlsx|arquivo.csv>...".into());
            }

            let results = state.import_api.batch_import(paths).await;
            for result in results {
                match result {
                    Ok(report) => println!(
                        "{}",
                        i18n::t_with_args(
                            "import.completed",
                            &[("count", &report.total_rows.to_string())]
                        )
                    ),
                    Err(message) => eprintln!("{}", message),
                }
            }
        }

        "planilha" => {
            let report = state.import_api.load_from_sheet().await?;
            println!(
                "{}",
                i18n::t_with_args(
                    "import.remote_loaded",
                    &[("count", &report.total_rows.to_string())]
                )
            );
        }

        "resumo" => {
            print_summary(&state)?;
        }

        "exportar" => {
            let target = args
                .next()
                .ok_or("uso: controle-entregas exportar <arquivo.csv>")?;
            let csv = state
                .dashboard_api
                .export_filtered(&DeliveryFilter::default())?;
            std::fs::write(&target, csv)?;
            println!("Exportado para {}", target);
        }

        "modelo" => {
            let target = args
                .next()
                .ok_or("uso: controle-entregas modelo <arquivo.csv>")?;
            std::fs::write(&target, state.dashboard_api.export_template()?)?;
            println!("Modelo gerado em {}", target);
        }

        "movimentacao" => {
            let count = state.movement_api.load_from_sheet().await?;
            println!(
                "{}",
                i18n::t_with_args("movement.loaded", &[("count", &count.to_string())])
            );
            for record in state
                .movement_api
                .list(&controle_entregas::domain::MovementFilter::default())?
            {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    record.manifest_number,
                    record.manifest_type,
                    record.origin_unit,
                    format_br(&record.generation_date),
                    record.settlement_status,
                    record.requested_quantity
                );
            }
        }

        "limpar" => {
            state.import_api.clear_all()?;
            println!("{}", i18n::t("data.cleared"));
        }

        other => {
            eprintln!("Comando desconhecido: {}", other);
            print_usage();
        }
    }

    Ok(())
}

fn print_summary(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let filter = DeliveryFilter::default();

    let cards = state.dashboard_api.get_status_cards(&filter)?;
    let overall = state.dashboard_api.get_performance(&filter)?;
    let target = state.dashboard_api.get_target_performance()?;

    println!("=== Cards de status ===");
    println!("Total de entregas:  {}", cards.total_deliveries);
    println!("Entregue no prazo:  {}", cards.delivered_on_time);
    println!("Dentro do prazo:    {}", cards.within_deadline);
    println!("Atrasada:           {}", cards.late);
    println!("Vencida:            {}", cards.expired);
    println!("Performance geral:  {:.1}% (meta {:.1}%)", overall, target);

    let matrix = state.dashboard_api.get_performance_matrix(&filter)?;
    if !matrix.rows.is_empty() {
        println!();
        println!("=== Análise diária por status ===");
        println!("Dt. Vencimento\t{}\tPerformance", matrix.columns.join("\t"));
        for row in &matrix.rows {
            let counts: Vec<String> = row.counts.iter().map(|c| c.to_string()).collect();
            println!(
                "{}\t{}\t{:.1}%",
                format_br(&row.due_date),
                counts.join("\t"),
                row.performance
            );
        }
        let totals: Vec<String> = matrix.totals.iter().map(|c| c.to_string()).collect();
        println!(
            "TOTAL\t{}\t{:.1}%",
            totals.join("\t"),
            matrix.average_performance
        );
    }

    let units = state.dashboard_api.get_unit_performance(&filter)?;
    if !units.is_empty() {
        println!();
        println!("=== Performance por unidade atual ===");
        println!("Unidade\tTotal\tNo prazo\tAtrasada\tVencida\tPerformance");
        for unit in units {
            println!(
                "{}\t{}\t{}\t{}\t{}\t{:.1}%",
                unit.unit, unit.total, unit.on_time, unit.late, unit.expired, unit.performance
            );
        }
    }

    Ok(())
}

fn print_usage() {
    println!("Uso: controle-entregas <comando> [argumentos]");
    println!();
    println!("Comandos:");
    println!("  importar <arquivo>...   importa XLSX/CSV e mescla com o conjunto salvo");
    println!("  planilha                carrega a planilha remota de entregas (substitui)");
    println!("  resumo                  imprime cards, matriz diária e performance por unidade");
    println!("  exportar <arquivo.csv>  exporta o conjunto salvo (linhas originais)");
    println!("  modelo <arquivo.csv>    gera o modelo de importação completo");
    println!("  movimentacao            carrega e lista a planilha de movimentação");
    println!("  limpar                  remove todos os registros salvos");
    println!();
    println!("Variáveis: CONTROLE_ENTREGAS_DB define o caminho do banco");
}
