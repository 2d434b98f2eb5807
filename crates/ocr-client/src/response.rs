//! Vision `images:annotate` response model and its interpretation.

use serde::Deserialize;

use crate::ExtractionResult;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchAnnotateImagesResponse {
    #[serde(default)]
    pub responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotateImageResponse {
    #[serde(default)]
    pub full_text_annotation: Option<TextAnnotation>,
    #[serde(default)]
    pub text_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    pub error: Option<Status>,
}

/// Document-level text with layout collapsed into one string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextAnnotation {
    #[serde(default)]
    pub text: String,
}

/// Detected text entity. The first one spans the whole image; the rest are single words.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub message: String,
}

/// Reads the first image response.
///
/// Precedence: `error` → `fullTextAnnotation.text` → `textAnnotations[0].description` → no text.
/// Word-level annotations past index 0 are never used.
pub fn interpret(batch: &BatchAnnotateImagesResponse) -> ExtractionResult {
    let Some(first) = batch.responses.first() else {
        return ExtractionResult::NoText;
    };
    if let Some(ref status) = first.error {
        let message = if status.message.trim().is_empty() {
            "Text detection failed".to_string()
        } else {
            status.message.clone()
        };
        return ExtractionResult::Failed(message);
    }
    let full = first
        .full_text_annotation
        .as_ref()
        .map(|a| a.text.as_str())
        .filter(|t| !t.trim().is_empty());
    let first_entity = first
        .text_annotations
        .first()
        .map(|a| a.description.as_str())
        .filter(|t| !t.trim().is_empty());
    match full.or(first_entity) {
        Some(text) => ExtractionResult::Text(text.to_string()),
        None => ExtractionResult::NoText,
    }
}
