//! Service HTTP de détection de risque cardiaque à partir d'une image.
//!
//! `POST /predict` reçoit une image (champ multipart `file`), la prépare en
//! tenseur `224x224x3` dans [0, 1], interroge le modèle ONNX chargé au
//! démarrage et renvoie `{label, confidence, isRisk}`.

pub mod config;
pub mod error;
pub mod inference;
pub mod models;
pub mod preprocess;
pub mod routes;

use actix_cors::Cors;
use actix_web::http::Uri;
use log::warn;

use crate::config::AllowedOrigins;

/// Politique CORS : origines configurées, toutes méthodes, tous en-têtes,
/// cookies autorisés.
pub fn cors(origins: &AllowedOrigins) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials();

    match origins {
        AllowedOrigins::Any => cors.allow_any_origin(),
        AllowedOrigins::List(list) => list.iter().fold(cors, |cors, origin| {
            if origin.parse::<Uri>().is_err() {
                warn!("Origine CORS ignorée (invalide): {}", origin);
                return cors;
            }
            cors.allowed_origin(origin)
        }),
    }
}
