//! Wire and value types exchanged with the gateway.

pub mod codes;
pub mod content;
pub mod rate;
pub mod token;

pub use codes::*;
pub use content::*;
pub use rate::*;
pub use token::*;
