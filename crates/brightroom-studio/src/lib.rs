//! BrightRoom Studio
//!
//! The panel layer of the creative studio: editor panels wiring the shared
//! edit history to the crop pipeline and the mock AI services.

pub mod backend;
pub mod codec;
pub mod generate;
pub mod photo;
pub mod template;

pub use backend::{MockJobService, MockTransformBackend, TEXT_MEDIA_TYPE};
pub use codec::{RAW_MEDIA_TYPE, RawCodec};
pub use generate::GeneratorPanel;
pub use photo::{Adjustments, PhotoError, PhotoPanel};
pub use template::TemplatePanel;
