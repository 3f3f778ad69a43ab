use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::TryStreamExt;
use log::{error, info};

use crate::error::PredictError;
use crate::inference::{to_batch, RiskModel, INPUT_SHAPE};
use crate::models::{ErrorResponse, HealthResponse, ModelInfo, PredictionResult, RISK_THRESHOLD};
use crate::preprocess::{decode_rgb, preprocess_image, TARGET_SIZE};

pub const FILE_FIELD: &str = "file";

/// Taille maximale acceptée pour le champ `file`.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimit(pub usize);

/// Enregistre les routes et les données partagées de l'application.
pub fn configure(
    model: Arc<dyn RiskModel>,
    limit: UploadLimit,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::from(model))
            .app_data(web::Data::new(limit))
            .route("/predict", web::post().to(predict))
            .route("/health", web::get().to(health_check))
            .default_service(web::route().to(|| async {
                HttpResponse::NotFound().json(ErrorResponse::new("Endpoint not found"))
            }));
    }
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        model: ModelInfo {
            input_shape: INPUT_SHAPE.to_vec(),
            threshold: RISK_THRESHOLD,
        },
    })
}

async fn predict(
    model: web::Data<dyn RiskModel>,
    limit: web::Data<UploadLimit>,
    payload: Multipart,
) -> Result<HttpResponse, PredictError> {
    match run_prediction(model.into_inner(), limit.0, payload).await {
        Ok(result) => {
            info!(
                "Prédiction réussie: probabilité={:.3} ({})",
                result.confidence, result.label
            );
            Ok(HttpResponse::Ok().json(result))
        }
        Err(e) => {
            error!("Erreur de prédiction: {}", e);
            Err(e)
        }
    }
}

async fn run_prediction(
    model: Arc<dyn RiskModel>,
    limit: usize,
    mut payload: Multipart,
) -> Result<PredictionResult, PredictError> {
    let bytes = read_file_field(&mut payload, limit).await?;

    // Décodage et inférence sont bornés par le CPU : pool bloquant
    let probability = web::block(move || -> Result<f32, PredictError> {
        let image = decode_rgb(&bytes)?;
        let tensor = preprocess_image(&image, TARGET_SIZE);
        model.predict(to_batch(tensor)).map_err(PredictError::Inference)
    })
    .await??;

    Ok(PredictionResult::new(probability))
}

/// Lit entièrement le premier champ `file` ; les autres champs sont ignorés.
async fn read_file_field(payload: &mut Multipart, limit: usize) -> Result<Vec<u8>, PredictError> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if bytes.len() + chunk.len() > limit {
                return Err(PredictError::PayloadTooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }

    Err(PredictError::MissingFile)
}
