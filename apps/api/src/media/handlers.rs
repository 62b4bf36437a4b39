use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::media::host::{ImageHost, ImageUpload, UploadedImage};
use crate::media::transform::{parse_dimension, parse_flag, ImageType, ResizeDirective};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Raw multipart fields, before validation.
#[derive(Debug, Clone, Default)]
pub struct ImageUploadForm {
    pub image: Option<ImageFile>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub maintain_aspect_ratio: Option<String>,
    pub image_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file: UploadedImage,
}

/// POST /api/upload-image
pub async fn handle_upload_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let form = read_form(multipart).await?;
    let file = process_upload(state.images.as_ref(), form).await?;
    info!("Image uploaded: {}", file.url);
    Ok(Json(UploadResponse {
        success: true,
        file,
    }))
}

async fn read_form(mut multipart: Multipart) -> Result<ImageUploadForm, AppError> {
    let mut form = ImageUploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                form.image = Some(ImageFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            "width" | "height" | "maintainAspectRatio" | "imageType" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                match name.as_str() {
                    "width" => form.width = Some(value),
                    "height" => form.height = Some(value),
                    "maintainAspectRatio" => form.maintain_aspect_ratio = Some(value),
                    _ => form.image_type = Some(value),
                }
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    Ok(form)
}

/// Validates the form and hands the file to `host`. Nothing is sent upstream
/// unless the file is a non-empty `image/*`.
pub async fn process_upload(
    host: &dyn ImageHost,
    form: ImageUploadForm,
) -> Result<UploadedImage, AppError> {
    let image = form
        .image
        .ok_or_else(|| AppError::field("image", "No image file provided"))?;

    let content_type = image
        .content_type
        .filter(|ct| ct.starts_with("image/"))
        .ok_or_else(|| AppError::field("image", "Only image files are allowed"))?;

    if image.bytes.is_empty() {
        return Err(AppError::field("image", "File is empty"));
    }

    let width = parse_dimension("width", form.width.as_deref())?;
    let height = parse_dimension("height", form.height.as_deref())?;
    let maintain = parse_flag("maintainAspectRatio", form.maintain_aspect_ratio.as_deref())?;
    let image_type = ImageType::parse(form.image_type.as_deref())?;
    let directive = ResizeDirective::from_request(width, height, maintain);

    let upload = ImageUpload {
        bytes: image.bytes,
        file_name: image.file_name,
        content_type,
        folder: image_type.folder().to_string(),
        transformation: directive.map(|d| d.transformation()),
    };

    let mut uploaded = host
        .upload(upload)
        .await
        .map_err(|e| AppError::Upload(e.to_string()))?;

    if let Some(d) = directive {
        uploaded.width.get_or_insert(d.width);
        uploaded.height.get_or_insert(d.height);
    }
    Ok(uploaded)
}
