pub mod fast;
pub mod font;
pub mod matcher;
pub mod orb;
pub mod sheet;

pub use fast::*;
pub use matcher::*;
pub use orb::*;
pub use sheet::*;
