mod generate;
mod health_check;
mod preview;

pub use generate::*;
pub use health_check::*;
pub use preview::*;
