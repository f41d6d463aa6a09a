pub mod color;
pub mod contours;
pub mod decode;
pub mod postprocess;
pub mod resize;

pub use color::*;
pub use contours::*;
pub use decode::*;
pub use postprocess::*;
pub use resize::*;

pub type Result<T> = std::result::Result<T, ImgprocError>;

#[derive(Debug, thiserror::Error)]
pub enum ImgprocError {
    #[error("could not decode image bytes: {0}")]
    Decode(String),
}
