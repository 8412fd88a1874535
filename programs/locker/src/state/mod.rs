pub mod deposit;
pub mod locker;
pub mod proposal;
pub mod registry;
pub mod schedule;

pub use deposit::*;
pub use locker::*;
pub use proposal::*;
pub use registry::*;
pub use schedule::*;
