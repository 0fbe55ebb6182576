//! Stock use cases (one vertical slice per feature).
//!
//! Each slice owns its command, validator, result projection, error type and
//! handler. Slices depend on the persistence port, never on a concrete store.

pub mod add_stocks;

pub use add_stocks::{
    AddStocksCommand, AddStocksError, AddStocksHandler, AddStocksResult, AddStocksValidator,
};

use stockroom_infra::{CommandDispatcher, Repository};
use stockroom_products::Product;

/// Register every stock use case on `dispatcher`, backed by `repository`.
pub fn register_handlers<R>(dispatcher: &mut CommandDispatcher, repository: R)
where
    R: Repository<Product> + 'static,
{
    dispatcher.register::<AddStocksCommand, _>(AddStocksHandler::new(repository));
}

