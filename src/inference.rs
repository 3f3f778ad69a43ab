use std::path::Path;

use anyhow::Context;
use tract_onnx::prelude::tract_ndarray::{Array3, Array4, Axis};
use tract_onnx::prelude::*;

use crate::preprocess::{CHANNELS, TARGET_SIZE};

/// Forme d'entrée du modèle : (batch, hauteur, largeur, canaux).
pub const INPUT_SHAPE: [usize; 4] = [1, TARGET_SIZE.1 as usize, TARGET_SIZE.0 as usize, CHANNELS];

/// Modèle de classification binaire chargé une seule fois au démarrage.
/// Partagé en lecture seule entre tous les workers.
pub trait RiskModel: Send + Sync {
    /// Probabilité de risque pour un lot `(1, 224, 224, 3)`.
    fn predict(&self, batch: Array4<f32>) -> anyhow::Result<f32>;
}

/// Ajoute l'axe de lot (taille 1) attendu par le modèle.
pub fn to_batch(tensor: Array3<f32>) -> Array4<f32> {
    tensor.insert_axis(Axis(0))
}

pub struct OnnxModel {
    model: TypedRunnableModel<TypedModel>,
}

impl OnnxModel {
    pub fn load<P: AsRef<Path>>(model_path: P) -> anyhow::Result<Self> {
        let path = model_path.as_ref();
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .with_context(|| format!("lecture du modèle {}", path.display()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(
                    f32::datum_type(),
                    tvec!(INPUT_SHAPE[0], INPUT_SHAPE[1], INPUT_SHAPE[2], INPUT_SHAPE[3]),
                ),
            )?
            .into_optimized()?
            .into_runnable()
            .with_context(|| format!("préparation du modèle {}", path.display()))?;

        Ok(Self { model })
    }
}

impl RiskModel for OnnxModel {
    fn predict(&self, batch: Array4<f32>) -> anyhow::Result<f32> {
        let outputs = self.model.run(tvec!(batch.into_tensor().into()))?;

        // Sortie sigmoïde : la première valeur est déjà une probabilité
        let probability = outputs
            .first()
            .ok_or_else(|| anyhow::anyhow!("Aucune sortie du modèle"))?
            .to_array_view::<f32>()?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Sortie du modèle vide"))?;

        Ok(probability)
    }
}
