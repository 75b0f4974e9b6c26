mod command;
mod error;
mod response;

pub use command::execute;
pub use error::*;
pub use response::*;
