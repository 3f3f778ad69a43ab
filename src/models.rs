use serde::Serialize;

/// Seuil de décision : strictement supérieur => risque détecté.
pub const RISK_THRESHOLD: f32 = 0.5;

pub const LABEL_RISK: &str = "Heart Risk Detected";
pub const LABEL_NO_RISK: &str = "No Heart Risk";

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub label: String,
    pub confidence: f32,
    pub is_risk: bool,
}

impl PredictionResult {
    pub fn new(probability: f32) -> Self {
        let is_risk = probability > RISK_THRESHOLD;
        let label = if is_risk { LABEL_RISK } else { LABEL_NO_RISK };

        PredictionResult {
            label: label.to_string(),
            confidence: probability,
            is_risk,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub input_shape: Vec<usize>,
    pub threshold: f32,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: ModelInfo,
}
