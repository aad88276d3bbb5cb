// ==========================================
// Controle de Entregas - estado da aplicação
// ==========================================
// Responsabilidade: compor repositórios, configuração e APIs sobre uma
// conexão compartilhada. Nenhum módulo acessa estado global ambiente;
// tudo chega por injeção a partir daqui.
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, ImportApi, MovementApi};
use crate::config::ConfigManager;
use crate::importer::GoogleSheetsFetcher;
use crate::repository::SqliteDeliveryRepository;

/// Estado da aplicação
///
/// Contém as instâncias de API e os recursos compartilhados.
pub struct AppState {
    /// Caminho do banco de dados
    pub db_path: String,

    /// API de importação de entregas
    pub import_api: Arc<ImportApi>,

    /// API do painel de entregas
    pub dashboard_api: Arc<DashboardApi>,

    /// API do módulo de movimentação
    pub movement_api: Arc<MovementApi>,
}

impl AppState {
    /// Cria o estado da aplicação
    ///
    /// # Parâmetros
    /// - db_path: caminho do arquivo do banco
    ///
    /// # Passos
    /// 1. abre a conexão compartilhada (PRAGMA unificados)
    /// 2. inicializa repositório e configuração
    /// 3. cria as instâncias de API
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(%db_path, "inicializando AppState");

        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("não foi possível criar o diretório do banco: {}", e))?;
            }
        }

        let conn = Connection::open(&db_path)
            .map_err(|e| format!("não foi possível abrir o banco: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // Repositório e configuração sobre a mesma conexão
        let store = Arc::new(
            SqliteDeliveryRepository::from_connection(conn.clone())
                .map_err(|e| format!("não foi possível criar o repositório de entregas: {}", e))?,
        );
        let config = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("não foi possível criar o gerenciador de configuração: {}", e))?,
        );

        // Fonte das planilhas remotas
        let sheet_source = Arc::new(GoogleSheetsFetcher::new());

        // APIs
        let import_api = Arc::new(ImportApi::new(store.clone(), sheet_source.clone()));
        let dashboard_api = Arc::new(DashboardApi::new(store, config));
        let movement_api = Arc::new(MovementApi::new(sheet_source));

        tracing::info!("AppState inicializado");

        Ok(Self {
            db_path,
            import_api,
            dashboard_api,
            movement_api,
        })
    }
}
