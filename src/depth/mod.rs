pub mod io;
pub mod map;

pub use self::map::{DepthCell, DepthMap};
