pub mod claims;
pub mod error;
pub mod trace;
pub mod traits;
pub mod types;

pub use claims::*;
pub use error::*;
pub use trace::*;
pub use traits::*;
pub use types::*;
