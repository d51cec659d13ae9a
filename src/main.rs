use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use emergency_dispatch::config::database::DatabaseConfig;
use emergency_dispatch::config::environment::{EnvironmentConfig, StorageBackend};
use emergency_dispatch::database::DatabaseConnection;
use emergency_dispatch::repositories::unit_repository::{
    InMemoryUnitRepository, PgUnitRepository, UnitStore,
};
use emergency_dispatch::routes::create_app;
use emergency_dispatch::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚑 Emergency Resource Dispatch");
    info!("==============================");

    let config = EnvironmentConfig::from_env().map_err(|e| {
        error!("❌ Configuración inválida: {}", e);
        e
    })?;

    // Inicializar almacenamiento
    let store: Arc<dyn UnitStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            Arc::new(PgUnitRepository::new(
                db_connection.pool().clone(),
                config.storage_timeout,
            ))
        }
        StorageBackend::Memory => {
            info!("🧪 Usando almacenamiento en memoria (los datos no persisten)");
            Arc::new(InMemoryUnitRepository::new())
        }
    };

    let server_url = config.server_url();
    let options = config.dispatch_options();
    let app = create_app(AppState::new(config, store));

    info!("🌐 Servidor iniciando en http://{}", server_url);
    info!(
        "📏 Radio de búsqueda: {} km, máximo {} ambulancias",
        options.radius_km, options.max_results
    );
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   POST /api/emergency/ambulances - Registrar ambulancia");
    info!("   GET  /api/emergency/ambulances - Listar ambulancias");
    info!("   POST /api/emergency/dispatch - Buscar ambulancias cercanas");

    let listener = tokio::net::TcpListener::bind(server_url.as_str()).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
