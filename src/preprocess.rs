//! Préparation des images avant inférence : décodage, conversion RGB,
//! redimensionnement et mise à l'échelle dans [0, 1].

use image::imageops::FilterType;
use image::{ImageError, RgbImage};
use tract_onnx::prelude::tract_ndarray::Array3;

/// Taille (largeur, hauteur) attendue par le modèle.
pub const TARGET_SIZE: (u32, u32) = (224, 224);

pub const CHANNELS: usize = 3;

/// Décode des octets bruts (JPEG, PNG, ...) et force une image 3 canaux.
/// Niveaux de gris, RGBA et palettes sont tous ramenés en RGB.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, ImageError> {
    let image = image::load_from_memory(bytes)?;
    Ok(image.to_rgb8())
}

/// Étire l'image aux dimensions cibles (pas de conservation du ratio, ni
/// recadrage ni marges) puis divise chaque canal par 255.
///
/// Sortie en HWC : `(hauteur, largeur, 3)`.
pub fn preprocess_image(image: &RgbImage, target: (u32, u32)) -> Array3<f32> {
    let (width, height) = target;
    let resized = image::imageops::resize(image, width, height, FilterType::CatmullRom);

    Array3::from_shape_fn(
        (height as usize, width as usize, CHANNELS),
        |(y, x, c)| resized.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
    )
}
