// Scene parameters and page configuration.
//
// The presentation ships in a couple of near-identical page variants that
// differ only in tuning (camera travel, parallax, particle counts, reveal
// behaviour, background). Each variant is a named preset; a page selects one
// through `data-*` attributes on the canvas and may override individual
// knobs.

use super::constants::*;
use super::palette::{INK, PAPER};
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown variant '{0}' (expected 'narrative' or 'briefing')")]
    UnknownVariant(String),
    #[error("invalid seed '{0}'")]
    InvalidSeed(String),
    #[error("invalid flag '{0}' (expected 'true' or 'false')")]
    InvalidFlag(String),
    #[error("invalid reveal amount '{0}' (expected a number in 0..=1)")]
    InvalidAmount(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Variant {
    /// Light paper background, long camera travel, sections reveal once.
    #[default]
    Narrative,
    /// Dark background with bloom, shorter travel, denser scene, sections
    /// re-toggle on every viewport crossing.
    Briefing,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Narrative => "narrative",
            Variant::Briefing => "briefing",
        }
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "narrative" => Ok(Variant::Narrative),
            "briefing" => Ok(Variant::Briefing),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Scroll-to-camera mapping and smoothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRigParams {
    /// Camera drop over the full scroll range.
    pub ky: f32,
    /// Camera pull-back over the full scroll range.
    pub kz: f32,
    pub z_base: f32,
    /// Horizontal camera offset at the pointer's extreme.
    pub parallax: f32,
    /// Exponential smoothing rate (1/s).
    pub rate: f32,
}

impl Default for CameraRigParams {
    fn default() -> Self {
        Self {
            ky: 4.0,
            kz: 8.0,
            z_base: CAMERA_Z_BASE,
            parallax: 0.8,
            rate: CAMERA_SMOOTHING_RATE,
        }
    }
}

/// How connection line opacity is derived.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OpacityMode {
    /// `max(0.1, base * (1 - d / threshold))`
    Fading { base: f32 },
    /// Same opacity for every drawn line.
    Constant(f32),
}

impl OpacityMode {
    #[inline]
    pub fn opacity(self, distance: f32, threshold: f32) -> f32 {
        match self {
            OpacityMode::Fading { base } => {
                (base * (1.0 - distance / threshold)).max(CONNECT_MIN_OPACITY)
            }
            OpacityMode::Constant(a) => a,
        }
    }
}

/// Post-processing knobs (bloom + vignette). Zero strengths disable them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectsParams {
    pub bloom_strength: f32,
    pub bloom_threshold: f32,
    pub vignette_offset: f32,
    pub vignette_darkness: f32,
}

impl EffectsParams {
    pub const OFF: EffectsParams = EffectsParams {
        bloom_strength: 0.0,
        bloom_threshold: 1.0,
        vignette_offset: 0.0,
        vignette_darkness: 0.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub variant: Variant,
    pub camera: CameraRigParams,
    pub particle_count: usize,
    pub sparkles: bool,
    pub node_count: usize,
    pub connect_threshold: f32,
    pub connector_opacity: OpacityMode,
    pub connector_color: u32,
    pub clear_color: u32,
    /// Linear fog start/end distance from the camera.
    pub fog_range: [f32; 2],
    pub effects: EffectsParams,
    /// Default reveal behaviour for sections without their own attribute.
    pub reveal_pin_once: bool,
}

impl SceneParams {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Narrative => Self {
                variant,
                camera: CameraRigParams::default(),
                particle_count: 30,
                sparkles: true,
                node_count: 24,
                connect_threshold: CONNECT_THRESHOLD,
                connector_opacity: OpacityMode::Fading { base: 0.35 },
                connector_color: 0x0077cc,
                clear_color: PAPER,
                fog_range: [15.0, 40.0],
                effects: EffectsParams::OFF,
                reveal_pin_once: true,
            },
            Variant::Briefing => Self {
                variant,
                camera: CameraRigParams {
                    ky: 3.0,
                    kz: 5.0,
                    parallax: 0.5,
                    ..CameraRigParams::default()
                },
                particle_count: 80,
                sparkles: true,
                node_count: 40,
                connect_threshold: CONNECT_THRESHOLD,
                connector_opacity: OpacityMode::Constant(0.25),
                connector_color: 0x4a90d9,
                clear_color: INK,
                fog_range: [15.0, 40.0],
                effects: EffectsParams {
                    bloom_strength: 0.4,
                    bloom_threshold: 0.4,
                    vignette_offset: 0.4,
                    vignette_darkness: 0.25,
                },
                reveal_pin_once: false,
            },
        }
    }
}

impl Default for SceneParams {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

/// Parse a boolean attribute value.
pub fn parse_flag(s: &str) -> Result<bool, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(s.to_string())),
    }
}

/// Configuration read from the page (canvas `data-*` attributes).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageConfig {
    pub variant: Variant,
    pub seed: Option<u64>,
    pub reveal_pin_once: Option<bool>,
}

impl PageConfig {
    pub fn from_attributes(
        variant: Option<&str>,
        seed: Option<&str>,
        reveal_once: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let variant = match variant {
            Some(v) => v.parse()?,
            None => Variant::default(),
        };
        let seed = match seed {
            Some(s) => Some(
                s.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed(s.to_string()))?,
            ),
            None => None,
        };
        let reveal_pin_once = reveal_once.map(parse_flag).transpose()?;
        Ok(Self {
            variant,
            seed,
            reveal_pin_once,
        })
    }

    pub fn scene_params(&self) -> SceneParams {
        let mut p = SceneParams::for_variant(self.variant);
        if let Some(once) = self.reveal_pin_once {
            p.reveal_pin_once = once;
        }
        p
    }
}
