pub mod issue;
pub mod notes;

pub use issue::*;
pub use notes::*;
