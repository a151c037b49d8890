mod logger;
pub use logger::*;

#[cfg(feature = "status-hook")]
mod hook;
#[cfg(feature = "status-hook")]
pub use hook::*;
