//! Add stocks: increase the stock level of one product by a positive delta.

mod command;
mod error;
mod handler;
mod result;
mod validator;

pub use command::AddStocksCommand;
pub use error::AddStocksError;
pub use handler::AddStocksHandler;
pub use result::AddStocksResult;
pub use validator::AddStocksValidator;
