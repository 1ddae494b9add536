//! The transform backend seam: the mocked AI service.

use crate::artifact::ArtifactVersion;
use crate::effects::EffectKind;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future for async seams, keeping the traits object safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Transform errors.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("transform failed: {0}")]
    Failed(String),
    #[error("transform does not support media type: {0}")]
    Unsupported(String),
}

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// What the user asked the backend to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformRequest {
    pub effect: Option<EffectKind>,
    pub prompt: Option<String>,
}

impl TransformRequest {
    pub fn effect(kind: EffectKind) -> Self {
        Self {
            effect: Some(kind),
            prompt: None,
        }
    }

    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            effect: None,
            prompt: Some(text.into()),
        }
    }

    /// Human-readable note recorded on the produced version.
    pub fn annotation(&self) -> String {
        match (self.effect, self.prompt.as_deref()) {
            (Some(effect), Some(prompt)) => format!("{}: {prompt}", effect.label()),
            (Some(effect), None) => effect.label().to_string(),
            (None, Some(prompt)) => prompt.to_string(),
            (None, None) => "Transform".to_string(),
        }
    }
}

/// A service that turns one artifact version into another.
///
/// The caller only touches history with a resolved value; after a failure
/// the prior current version stays displayed.
pub trait TransformBackend: Send + Sync {
    fn transform(
        &self,
        source: &ArtifactVersion,
        request: &TransformRequest,
    ) -> BoxFuture<'_, TransformResult<ArtifactVersion>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_annotation() {
        assert_eq!(
            TransformRequest::effect(EffectKind::Vintage).annotation(),
            "Vintage"
        );
        assert_eq!(
            TransformRequest::prompt("a foggy harbor").annotation(),
            "a foggy harbor"
        );
        assert_eq!(TransformRequest::default().annotation(), "Transform");

        let both = TransformRequest {
            effect: Some(EffectKind::Noir),
            prompt: Some("rainy street".to_string()),
        };
        assert_eq!(both.annotation(), "Noir: rainy street");
    }

    #[test]
    fn test_request_serde_round_trip() {
        let request = TransformRequest::effect(EffectKind::Echo);
        let json = serde_json::to_string(&request).unwrap();
        let back: TransformRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
