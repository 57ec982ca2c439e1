// Fade-in-on-scroll state for the HTML content sections.
//
// The page's intersection observer reports `(section id, is_visible)`; this
// controller keeps one flag per section and reports when a section's visual
// state actually flips. Whether a revealed section stays revealed is a
// per-section policy.

use super::constants::{REVEAL_DEFAULT_AMOUNT, REVEAL_DURATION_SEC, REVEAL_OFFSET_PX};
use super::params::{parse_flag, ConfigError};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPolicy {
    /// Keep the section visible after its first reveal.
    pub pin_once: bool,
    /// Fraction of the section that must intersect the viewport.
    pub amount: f32,
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            pin_once: true,
            amount: REVEAL_DEFAULT_AMOUNT,
        }
    }
}

impl RevealPolicy {
    /// Policy for one section from its `data-reveal-once` and
    /// `data-reveal-amount` attributes, falling back to `default_pin_once`.
    pub fn from_attributes(
        default_pin_once: bool,
        once: Option<&str>,
        amount: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let pin_once = once.map(parse_flag).transpose()?.unwrap_or(default_pin_once);
        let amount = match amount {
            Some(s) => match s.trim().parse::<f32>() {
                Ok(a) if (0.0..=1.0).contains(&a) => a,
                _ => return Err(ConfigError::InvalidAmount(s.to_string())),
            },
            None => REVEAL_DEFAULT_AMOUNT,
        };
        Ok(Self { pin_once, amount })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Reveal,
    Hide,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SectionState {
    policy: RevealPolicy,
    visible: bool,
    revealed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct RevealController {
    sections: FnvHashMap<String, SectionState>,
}

impl RevealController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a section in the hidden state. Registering an id again
    /// updates its policy and keeps its current visibility.
    pub fn register(&mut self, id: &str, policy: RevealPolicy) {
        self.sections
            .entry(id.to_string())
            .and_modify(|s| s.policy = policy)
            .or_insert(SectionState {
                policy,
                visible: false,
                revealed: false,
            });
    }

    pub fn unregister(&mut self, id: &str) {
        self.sections.remove(id);
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    pub fn policy(&self, id: &str) -> Option<RevealPolicy> {
        self.sections.get(id).map(|s| s.policy)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections that were never registered (not mounted when the observer
    /// attached) report visible so their content is never stuck hidden.
    pub fn is_visible(&self, id: &str) -> bool {
        self.sections.get(id).map_or(true, |s| s.visible)
    }

    pub fn on_intersection(&mut self, id: &str, is_visible: bool) -> Option<Transition> {
        let s = self.sections.get_mut(id)?;
        let next = is_visible || (s.policy.pin_once && s.revealed);
        if next == s.visible {
            return None;
        }
        s.visible = next;
        if next {
            s.revealed = true;
            Some(Transition::Reveal)
        } else {
            Some(Transition::Hide)
        }
    }
}

/// One of the two static visual states of a section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionStyle {
    pub offset_y_px: f32,
    pub opacity: f32,
}

impl SectionStyle {
    pub const HIDDEN: SectionStyle = SectionStyle {
        offset_y_px: REVEAL_OFFSET_PX,
        opacity: 0.0,
    };
    pub const VISIBLE: SectionStyle = SectionStyle {
        offset_y_px: 0.0,
        opacity: 1.0,
    };

    pub const PROPERTIES: [&'static str; 3] = ["opacity", "transform", "transition"];

    pub fn for_visibility(visible: bool) -> Self {
        if visible {
            Self::VISIBLE
        } else {
            Self::HIDDEN
        }
    }

    /// Inline style properties for the state, including the declarative
    /// transition. Only the names in `SectionStyle::PROPERTIES` are set.
    pub fn properties(&self) -> [(&'static str, String); 3] {
        let [opacity, transform, transition] = Self::PROPERTIES;
        [
            (opacity, self.opacity.to_string()),
            (transform, format!("translateY({}px)", self.offset_y_px)),
            (
                transition,
                format!(
                    "opacity {d}s cubic-bezier(0.4,0,0.2,1),transform {d}s cubic-bezier(0.4,0,0.2,1)",
                    d = REVEAL_DURATION_SEC
                ),
            ),
        ]
    }
}
