//! Follower offsets, raft geometry and sea-mood presentation.

use crate::avatar::Expression;

/// Offsets tying the raft, avatar and caption to the ocean surface
#[derive(Debug, Clone)]
pub struct FollowerRig {
    /// Raft anchor on the XZ plane (world units)
    pub raft_anchor: [f32; 2],

    /// Height of the raft above the sampled surface
    pub raft_lift: f32,

    /// Distance to the slope probes used for pitch and roll
    pub slope_probe: f32,

    /// Height of the avatar above the raft origin
    pub avatar_lift: f32,

    /// Uniform scale applied to the avatar model
    pub avatar_scale: f32,

    /// Height of the caption above the raft origin
    pub caption_lift: f32,
}

impl Default for FollowerRig {
    fn default() -> Self {
        Self {
            raft_anchor: [0.0, 0.0],
            raft_lift: 15.0,
            slope_probe: 500.0,
            avatar_lift: 15.0,
            avatar_scale: 0.5,
            caption_lift: 20.0,
        }
    }
}

/// Dimensions of the log raft and its mast
#[derive(Debug, Clone)]
pub struct RaftGeometry {
    /// Number of logs laid side by side
    pub log_count: usize,

    /// Radius of each log
    pub log_radius: f32,

    /// Length of each log (along Z)
    pub log_length: f32,

    /// Height of the log axes above the raft origin
    pub log_lift: f32,

    /// Radial segments per log
    pub log_segments: u32,

    /// Mast box size (x, y, z)
    pub mast_size: [f32; 3],

    /// Mast centre relative to the raft origin
    pub mast_offset: [f32; 3],
}

impl Default for RaftGeometry {
    fn default() -> Self {
        Self {
            log_count: 10,
            log_radius: 7.5,
            log_length: 150.0,
            log_lift: 5.0,
            log_segments: 32,
            mast_size: [5.0, 100.0, 5.0],
            mast_offset: [-30.0, 45.0, 0.0],
        }
    }
}

/// What the scene shows for one sea mood
#[derive(Debug, Clone)]
pub struct MoodPresentation {
    pub caption: String,
    pub expression: Expression,
    /// Directional light intensity (1.0 = full sun)
    pub light_intensity: f32,
}

/// Amplitude thresholds and presentation for each sea mood
///
/// Thresholds are checked in order: above `stormy_above`, below
/// `calm_below`, below `settling_below`, otherwise the prompt.
#[derive(Debug, Clone)]
pub struct MoodTable {
    pub stormy_above: f32,
    pub calm_below: f32,
    pub settling_below: f32,
    pub stormy: MoodPresentation,
    pub calm: MoodPresentation,
    pub settling: MoodPresentation,
    pub prompt: MoodPresentation,
}

impl Default for MoodTable {
    fn default() -> Self {
        Self {
            stormy_above: 75.0,
            calm_below: 20.0,
            settling_below: 45.0,
            stormy: MoodPresentation {
                caption: "Owh too many waves! Keep your breathing in tune with the waves".into(),
                expression: Expression::Surprised,
                light_intensity: 0.45,
            },
            calm: MoodPresentation {
                caption: "It's better, now you're calm :)".into(),
                expression: Expression::Neutral,
                light_intensity: 1.0,
            },
            settling: MoodPresentation {
                caption: "The sea is settling. Breathe out slowly.".into(),
                expression: Expression::Sad,
                light_intensity: 0.9,
            },
            prompt: MoodPresentation {
                caption: "You have the power to control the waves! Use the space bar to change the wave amplitude.".into(),
                expression: Expression::Neutral,
                light_intensity: 0.8,
            },
        }
    }
}
