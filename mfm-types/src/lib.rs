pub mod enums;
pub mod models;
pub mod segment;

pub use enums::*;
pub use models::*;
pub use segment::*;
