//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::avatar::AvatarRig;
use crate::params::SceneConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Tidekeeper")]
#[command(about = "A raft, a robot and a sea that follows your breathing", long_about = None)]
pub struct Args {
    /// Fog density (0 to 0.002)
    #[arg(long, value_name = "DENSITY", default_value = "0.0007")]
    pub fog_density: f32,

    /// Ocean grid vertices per side
    #[arg(long, value_name = "VERTICES", default_value = "256")]
    pub grid_resolution: usize,

    /// Wave amplitude at startup
    #[arg(long, value_name = "AMPLITUDE", default_value = "45")]
    pub initial_amplitude: f32,

    /// Avatar model (glTF or GLB)
    #[arg(long, value_name = "PATH", default_value = "RobotExpressive.glb")]
    pub avatar: PathBuf,

    /// Skip loading the avatar
    #[arg(long)]
    pub no_avatar: bool,
}

impl Args {
    /// Default configuration with command-line overrides applied
    pub fn scene_config(&self) -> SceneConfig {
        let mut config = SceneConfig::default();

        let fog = &mut config.fog;
        if self.fog_density.is_nan() {
            log::warn!("fog density is not a number, using {}", fog.density);
        } else {
            fog.density = self.fog_density.clamp(0.0, fog.max_density);
            if fog.density != self.fog_density {
                log::warn!(
                    "fog density {} out of range, using {}",
                    self.fog_density,
                    fog.density
                );
            }
        }

        let physics = &mut config.physics;
        physics.grid_resolution = self.grid_resolution;
        physics.grid_resolution = physics.resolution();
        if physics.grid_resolution != self.grid_resolution {
            log::warn!(
                "grid resolution {} out of range, using {}",
                self.grid_resolution,
                physics.grid_resolution
            );
        }

        let limits = &mut config.limits;
        if self.initial_amplitude.is_nan() {
            log::warn!("initial amplitude is not a number, using {}", limits.initial);
        } else {
            limits.initial = limits.clamp(self.initial_amplitude);
            if limits.initial != self.initial_amplitude {
                log::warn!(
                    "initial amplitude {} out of range, using {}",
                    self.initial_amplitude,
                    limits.initial
                );
            }
        }

        config
    }

    /// Load the avatar unless disabled; failures leave it inert
    pub fn avatar_rig(&self) -> AvatarRig {
        if self.no_avatar {
            log::info!("avatar disabled");
            return AvatarRig::inert();
        }
        AvatarRig::load_or_inert(&self.avatar)
    }
}
