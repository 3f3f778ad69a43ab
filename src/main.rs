use std::sync::Arc;

use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpServer};
use log::{error, info};

use heart_risk_api::config::ServerConfig;
use heart_risk_api::inference::{OnnxModel, RiskModel};
use heart_risk_api::routes::{self, UploadLimit};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("🚀 Démarrage de l'API de détection de risque cardiaque");

    let config = ServerConfig::from_env();

    // Sans modèle, le serveur ne démarre pas
    let model: Arc<dyn RiskModel> = match OnnxModel::load(&config.model_path) {
        Ok(model) => {
            info!("✅ Modèle ONNX chargé: {}", config.model_path.display());
            Arc::new(model)
        }
        Err(e) => {
            error!("❌ Impossible de charger le modèle: {:#}", e);
            return Err(e);
        }
    };

    let bind_address = config.bind_address();
    let limit = UploadLimit(config.max_upload_bytes);

    info!("🌐 Serveur démarré sur: http://{}", bind_address);
    info!("👷 Workers: {}", config.workers);
    info!("🔐 Origines CORS: {:?}", config.allowed_origins);
    info!("🔧 Endpoints API:");
    info!("   POST /predict  - Prédiction à partir d'une image");
    info!("   GET  /health   - Vérification santé");

    let origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(heart_risk_api::cors(&origins))
            .configure(routes::configure(model.clone(), limit))
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
