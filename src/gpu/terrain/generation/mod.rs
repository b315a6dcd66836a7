pub mod noise;
pub mod height;
pub mod falloff;

pub use height::HeightParams;
pub use falloff::{FalloffMask, FalloffParams};
pub use noise::{noise2d, hash2d};
