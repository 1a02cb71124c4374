pub use moves::*;
pub use snapshot::*;

mod moves;
mod snapshot;
