//! Scroll-reveal hints. Presentation only: the view models are identical
//! with motion reduced, minus the delay hints.

use serde::{Deserialize, Serialize};

const REVEAL_STEP_SECS: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn from_reduced_flag(reduced: bool) -> Self {
        if reduced {
            Self::Reduced
        } else {
            Self::Full
        }
    }

    pub fn year_delay(self, year_index: usize) -> Option<f32> {
        match self {
            Self::Full => Some(year_index as f32 * REVEAL_STEP_SECS),
            Self::Reduced => None,
        }
    }

    pub fn entry_delay(self, year_index: usize, entry_index: usize) -> Option<f32> {
        match self {
            Self::Full => Some((year_index + entry_index + 1) as f32 * REVEAL_STEP_SECS),
            Self::Reduced => None,
        }
    }
}
