use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fleetflow_backend::config::{DatabaseConfig, EnvironmentConfig, StoreBackend};
use fleetflow_backend::database::connect_and_migrate;
use fleetflow_backend::repositories::{FleetRepository, MemoryFleetRepository, PgFleetRepository};
use fleetflow_backend::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fleetflow_backend=debug,tower_http=info")),
        )
        .init();

    info!("🚚 FleetFlow - Fleet dispatch backend");
    info!("=====================================");

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    let repository: Arc<dyn FleetRepository> = match config.store {
        StoreBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let pool = connect_and_migrate(&db_config).await?;
            Arc::new(PgFleetRepository::new(pool))
        }
        StoreBackend::Memory => {
            warn!("⚠️ Usando almacenamiento en memoria: los datos se pierden al reiniciar");
            Arc::new(MemoryFleetRepository::new())
        }
    };

    if !config.enforce_available_dispatch {
        warn!(
            "⚠️ ENFORCE_AVAILABLE_DISPATCH=false: se despachan vehículos no disponibles"
        );
    }

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let app = create_app_router(AppState::new(repository, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🚗 Vehículos:");
    info!("   POST /vehicles - Registrar vehículo");
    info!("   GET  /vehicles - Listar vehículos");
    info!("   GET  /vehicles/:id - Obtener vehículo");
    info!("   PUT  /vehicles/:id - Corregir estado");
    info!("🚚 Viajes:");
    info!("   POST /trips - Despachar viaje");
    info!("   GET  /trips - Historial de viajes");
    info!("🔧 Mantenimiento:");
    info!("   POST /maintenance - Reportar avería");
    info!("   GET  /maintenance - Historial de mantenimiento");
    info!("🧑‍✈️ Conductores:");
    info!("   POST /drivers - Registrar conductor");
    info!("   GET  /drivers - Listar conductores");
    info!("   GET  /drivers/:id - Obtener conductor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

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
            Ok(mut stream) => {
                stream.recv().await;
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
