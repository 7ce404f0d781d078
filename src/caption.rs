//! Sea mood: the caption, expression and light chosen from the amplitude.

use crate::params::{MoodPresentation, MoodTable};

/// Sea state as read from the current amplitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Stormy,
    Calm,
    Settling,
    Prompt,
}

impl Mood {
    /// Step function over the current amplitude
    ///
    /// Checked in order: stormy, calm, settling, otherwise prompt.
    pub fn from_amplitude(amplitude: f32, table: &MoodTable) -> Self {
        if amplitude > table.stormy_above {
            Mood::Stormy
        } else if amplitude < table.calm_below {
            Mood::Calm
        } else if amplitude < table.settling_below {
            Mood::Settling
        } else {
            Mood::Prompt
        }
    }

    pub fn presentation(self, table: &MoodTable) -> &MoodPresentation {
        match self {
            Mood::Stormy => &table.stormy,
            Mood::Calm => &table.calm,
            Mood::Settling => &table.settling,
            Mood::Prompt => &table.prompt,
        }
    }
}
