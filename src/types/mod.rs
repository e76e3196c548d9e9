pub mod fix;
pub mod tile;
pub mod update;

pub use fix::*;
pub use tile::*;
pub use update::*;
