pub mod ages;
pub mod effects;
pub mod happiness;
pub mod logging;

pub use ages::*;
pub use effects::*;
pub use happiness::*;
pub use logging::*;
