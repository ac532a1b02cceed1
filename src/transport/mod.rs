pub mod traits;
pub mod multicast;

pub use traits::*;
pub use multicast::*;
