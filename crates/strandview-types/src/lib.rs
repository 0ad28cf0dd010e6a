pub mod field;
pub mod preferences;
pub mod strand;
pub mod view;

pub use field::*;
pub use preferences::*;
pub use strand::*;
pub use view::*;
