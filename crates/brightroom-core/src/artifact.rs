//! Artifact versions: immutable snapshots of edited content.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for one artifact version.
pub type VersionId = Uuid;

/// One immutable snapshot of edited content in the history timeline.
///
/// Versions are created by the commit pipeline or by a transform call and
/// never mutated in place; undo/redo hands back the stored snapshots.
/// Equality is identity: two versions with byte-equal payloads are still
/// distinct points on the timeline.
#[derive(Debug, Clone)]
pub struct ArtifactVersion {
    id: VersionId,
    payload: Arc<[u8]>,
    media_type: String,
    annotation: Option<String>,
}

impl ArtifactVersion {
    /// Create a version from encoded content.
    pub fn new(payload: impl Into<Vec<u8>>, media_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload: Arc::from(payload.into()),
            media_type: media_type.into(),
            annotation: None,
        }
    }

    /// Create a version with a note describing how it was produced
    /// (a prompt, a crop description).
    pub fn with_annotation(
        payload: impl Into<Vec<u8>>,
        media_type: impl Into<String>,
        annotation: impl Into<String>,
    ) -> Self {
        let mut version = Self::new(payload, media_type);
        version.annotation = Some(annotation.into());
        version
    }

    pub fn id(&self) -> VersionId {
        self.id
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Tag describing the payload encoding (e.g. `image/x-raw`).
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    /// Encode the payload for handoff to a web rendering layer.
    pub fn payload_base64(&self) -> String {
        STANDARD.encode(&self.payload)
    }
}

impl PartialEq for ArtifactVersion {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ArtifactVersion {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_accessors() {
        let version =
            ArtifactVersion::with_annotation(vec![1, 2, 3], "image/x-raw", "test fixture");

        assert_eq!(version.payload(), &[1, 2, 3]);
        assert_eq!(version.media_type(), "image/x-raw");
        assert_eq!(version.annotation(), Some("test fixture"));
    }

    #[test]
    fn test_equality_is_identity() {
        let a = ArtifactVersion::new(vec![1, 2, 3], "image/x-raw");
        let b = ArtifactVersion::new(vec![1, 2, 3], "image/x-raw");

        assert_eq!(a, a.clone());
        assert_ne!(a, b); // same bytes, different versions
    }

    #[test]
    fn test_payload_base64() {
        let version = ArtifactVersion::new(b"hello".to_vec(), "text/plain");
        assert_eq!(version.payload_base64(), "aGVsbG8=");
    }
}
