pub mod fix;
pub mod frame;
pub mod stream;

pub use fix::*;
pub use frame::*;
pub use stream::*;
