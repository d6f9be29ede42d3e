pub mod clock;
pub mod constants;
pub mod director;
pub mod noise;
pub mod ornaments;
pub mod particles;
pub mod pointer;
pub mod profile;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use clock::*;
pub use constants::*;
pub use director::*;
pub use noise::*;
pub use ornaments::*;
pub use particles::*;
pub use pointer::*;
pub use profile::*;
