use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fleet_backend::config::{DatabaseConfig, EnvironmentConfig};
use fleet_backend::database::DatabaseConnection;
use fleet_backend::routes::{DRIVER_PREFIXES, VEHICLE_PREFIXES};
use fleet_backend::{create_app_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Fahrzeug Plus - Backend de flota");
    info!("================================================");
    if config.is_development() {
        info!("🛠️ Modo desarrollo ({})", config.environment);
    }

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_path(&config.database_path);
    let db_connection = match DatabaseConnection::connect(&db_config, config.pin_hash_cost).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e.into());
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_app_router(AppState::new(db_connection.pool().clone(), config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /  - Información del servicio");
    for prefix in VEHICLE_PREFIXES {
        info!("   GET|POST {} | GET|PUT|DELETE {}/:id | POST {}/:id/upload-image", prefix, prefix, prefix);
    }
    for prefix in DRIVER_PREFIXES {
        info!("   POST {}/login | POST {}/km-stand | {}/schaden | {}/wartung", prefix, prefix, prefix, prefix);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("✅ Servidor listo para recibir peticiones");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Servidor detenido, cerrando la base de datos...");
    db_connection.close().await;
    info!("✅ Apagado completado");
    Ok(())
}

/// Esperar Ctrl-C o SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl-C: {}", e);
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
        _ = ctrl_c => info!("🛑 SIGINT recibido, apagando..."),
        _ = terminate => info!("🛑 SIGTERM recibido, apagando..."),
    }
}
