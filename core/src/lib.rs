pub mod descriptor;
pub mod engine;
pub mod keypoint;
pub mod mode;

pub use descriptor::*;
pub use engine::*;
pub use keypoint::*;
pub use mode::*;
