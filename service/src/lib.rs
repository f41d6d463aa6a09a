//! Transport-independent service surface.
//!
//! Three operations, each taking a typed request and returning JPEG bytes or
//! a structured [`ServiceError`]: image-batch stitch, video stitch, and the
//! pairwise match-diagnostic sheet. An HTTP layer (not part of this crate)
//! only has to parse forms into the request structs and map
//! [`ServiceError::status`] onto its response codes.

pub mod encode;
pub mod error;
pub mod ops;
pub mod request;

pub use encode::*;
pub use error::*;
pub use ops::*;
pub use request::*;

pub type Result<T> = std::result::Result<T, ServiceError>;
