//! The simulated AI effect catalog.
//!
//! Each effect is a closed variant resolving to a pure configuration via
//! exhaustive match, so adding a variant is a compile-checked change
//! instead of a new branch in a conditional chain.

use serde::{Deserialize, Serialize};

/// Effects offered across the editing panels: photo filters plus the voice
/// effects of the audio panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Enhance,
    Vintage,
    Noir,
    Vivid,
    Robot,
    Chipmunk,
    DeepVoice,
    Echo,
}

/// Pure configuration an effect resolves to.
///
/// Photo fields drive the pixel transform; audio fields describe the
/// synthesis graph the host builds. Unused fields stay at their neutral
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    /// Brightness multiplier.
    pub gain: f64,
    /// Per-channel RGB multipliers.
    pub tint: [f64; 3],
    /// Contrast multiplier around mid-gray.
    pub contrast: f64,
    /// Color saturation multiplier (0 = grayscale).
    pub saturation: f64,
    /// Pitch shift in semitones.
    pub pitch_semitones: f64,
    /// Wet/dry reverb mix, 0..1.
    pub reverb_mix: f64,
    /// Feedback delay in milliseconds.
    pub delay_ms: f64,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            gain: 1.0,
            tint: [1.0, 1.0, 1.0],
            contrast: 1.0,
            saturation: 1.0,
            pitch_semitones: 0.0,
            reverb_mix: 0.0,
            delay_ms: 0.0,
        }
    }
}

impl EffectKind {
    /// Every effect, in picker order.
    pub const ALL: [EffectKind; 8] = [
        EffectKind::Enhance,
        EffectKind::Vintage,
        EffectKind::Noir,
        EffectKind::Vivid,
        EffectKind::Robot,
        EffectKind::Chipmunk,
        EffectKind::DeepVoice,
        EffectKind::Echo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Enhance => "Enhance",
            EffectKind::Vintage => "Vintage",
            EffectKind::Noir => "Noir",
            EffectKind::Vivid => "Vivid",
            EffectKind::Robot => "Robot",
            EffectKind::Chipmunk => "Chipmunk",
            EffectKind::DeepVoice => "Deep Voice",
            EffectKind::Echo => "Echo",
        }
    }

    /// Whether the effect belongs to the voice-effect family.
    pub fn is_audio(self) -> bool {
        matches!(
            self,
            EffectKind::Robot | EffectKind::Chipmunk | EffectKind::DeepVoice | EffectKind::Echo
        )
    }

    /// Resolve the variant to its configuration.
    pub fn config(self) -> EffectConfig {
        let base = EffectConfig::default();
        match self {
            EffectKind::Enhance => EffectConfig {
                gain: 1.08,
                contrast: 1.12,
                saturation: 1.05,
                ..base
            },
            EffectKind::Vintage => EffectConfig {
                gain: 0.96,
                tint: [1.08, 1.0, 0.85],
                contrast: 0.92,
                saturation: 0.8,
                ..base
            },
            EffectKind::Noir => EffectConfig {
                gain: 0.9,
                contrast: 1.25,
                saturation: 0.0,
                ..base
            },
            EffectKind::Vivid => EffectConfig {
                gain: 1.05,
                contrast: 1.1,
                saturation: 1.4,
                ..base
            },
            EffectKind::Robot => EffectConfig {
                pitch_semitones: -2.0,
                reverb_mix: 0.15,
                delay_ms: 35.0,
                ..base
            },
            EffectKind::Chipmunk => EffectConfig {
                pitch_semitones: 7.0,
                ..base
            },
            EffectKind::DeepVoice => EffectConfig {
                pitch_semitones: -6.0,
                ..base
            },
            EffectKind::Echo => EffectConfig {
                reverb_mix: 0.5,
                delay_ms: 240.0,
                ..base
            },
        }
    }
}
