//! Command line configuration

use clap::Parser;
use particle_physics::constants::PARTICLE_COUNT;

#[derive(Parser, Debug, Clone)]
#[command(name = "particle-field", version, about = "Pointer-reactive particle field")]
pub struct Cli {
    /// Number of particles to seed
    #[arg(short, long, default_value_t = PARTICLE_COUNT)]
    pub particles: usize,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1920)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 1080)]
    pub height: u32,

    /// Seed for a reproducible layout (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Don't draw the cursor follower
    #[arg(long)]
    pub no_follower: bool,
}
