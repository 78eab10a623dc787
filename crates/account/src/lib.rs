mod account;
pub use account::*;

mod error;
pub use error::*;

mod name;
pub use name::*;

mod store;
pub use store::*;
