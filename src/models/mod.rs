// Re-export all model types
pub use self::calc::*;
pub use self::catalog::*;
pub use self::enums::*;
pub use self::errors::*;
pub use self::intake::*;
pub use self::schema::*;
pub use self::validation::*;

mod calc;
mod catalog;
mod enums;
mod errors;
mod intake;
mod schema;
mod validation;
