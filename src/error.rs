//! Erreurs de traitement d'une requête de prédiction.
//!
//! Chaque variante reste distincte dans les logs, mais la réponse HTTP est
//! toujours la même : statut 500 et `{"error": "<message>"}`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum PredictError {
    /// Aucun champ `file` dans le formulaire
    #[error("No file uploaded: expected a multipart field named 'file'")]
    MissingFile,

    /// Flux multipart invalide ou interrompu
    #[error("Invalid multipart payload: {0}")]
    Multipart(String),

    #[error("Uploaded file exceeds the {limit} bytes limit")]
    PayloadTooLarge { limit: usize },

    #[error("Cannot decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Inference failed: {0}")]
    Inference(anyhow::Error),

    /// Le pool de threads bloquants n'a pas pu exécuter l'inférence
    #[error("Blocking execution failed: {0}")]
    Blocking(String),
}

impl From<actix_multipart::MultipartError> for PredictError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        PredictError::Multipart(err.to_string())
    }
}

impl From<actix_web::error::BlockingError> for PredictError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        PredictError::Blocking(err.to_string())
    }
}

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}
