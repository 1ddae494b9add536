//! Template composer panel: prompt-driven text drafts with history.

use crate::backend::{TEXT_MEDIA_TYPE, seed_bytes};
use brightroom_core::{ArtifactVersion, EditHistory};

const HOOKS: [&str; 4] = [
    "Stop scrolling - this one's worth it.",
    "Big news from the studio:",
    "You asked, we delivered.",
    "A little behind-the-scenes:",
];

const CALLS_TO_ACTION: [&str; 4] = [
    "Tap the link to see more.",
    "Tell us what you think below.",
    "Share it with someone who needs it.",
    "More coming this week.",
];

/// The template composer panel.
///
/// Drafts are deterministic text artifacts in the same edit history
/// contract as the image panels, so regenerating after an undo truncates
/// the abandoned drafts.
#[derive(Debug, Default)]
pub struct TemplatePanel {
    history: EditHistory<ArtifactVersion>,
}

impl TemplatePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &EditHistory<ArtifactVersion> {
        &self.history
    }

    pub fn current(&self) -> Option<&ArtifactVersion> {
        self.history.current()
    }

    /// The displayed draft as text.
    pub fn current_text(&self) -> Option<String> {
        self.history
            .current()
            .map(|version| String::from_utf8_lossy(version.payload()).into_owned())
    }

    pub fn undo(&mut self) -> Option<&ArtifactVersion> {
        self.history.undo()
    }

    pub fn redo(&mut self) -> Option<&ArtifactVersion> {
        self.history.redo()
    }

    /// Compose a draft for the prompt and record it as a new version.
    pub fn generate(&mut self, prompt: &str) -> ArtifactVersion {
        let version =
            ArtifactVersion::with_annotation(compose(prompt).into_bytes(), TEXT_MEDIA_TYPE, prompt);
        if self.history.seed(version.clone()).is_err() {
            self.history.push(version.clone());
        }
        version
    }
}

/// Deterministic template copy for a prompt.
fn compose(prompt: &str) -> String {
    let seed = seed_bytes(&[prompt.as_bytes()]);
    let hook = HOOKS[(seed as usize) % HOOKS.len()];
    let cta = CALLS_TO_ACTION[((seed >> 8) as usize) % CALLS_TO_ACTION.len()];
    format!("{hook}\n\n{prompt}\n\n{cta}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let mut a = TemplatePanel::new();
        let mut b = TemplatePanel::new();

        let first = a.generate("spring sale announcement");
        let second = b.generate("spring sale announcement");
        assert_eq!(first.payload(), second.payload());
        assert_eq!(first.annotation(), Some("spring sale announcement"));
    }

    #[test]
    fn test_draft_contains_prompt() {
        let mut panel = TemplatePanel::new();
        panel.generate("new album drop");
        let text = panel.current_text().unwrap();
        assert!(text.contains("new album drop"));
    }

    #[test]
    fn test_history_walk() {
        let mut panel = TemplatePanel::new();
        panel.generate("one");
        panel.generate("two");
        panel.generate("three");
        assert_eq!(panel.history().len(), 3);

        panel.undo();
        panel.undo();
        assert_eq!(panel.current().and_then(|v| v.annotation()), Some("one"));

        // Regenerating after rewinding truncates the abandoned drafts.
        panel.generate("four");
        assert_eq!(panel.history().len(), 2);
        assert!(panel.redo().is_none());
    }
}
