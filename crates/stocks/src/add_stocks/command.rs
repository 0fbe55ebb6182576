use serde::{Deserialize, Serialize};

use stockroom_core::ProductId;
use stockroom_infra::Request;

use super::{AddStocksError, AddStocksResult};

/// Command: add `quantity` units to the stock of `product_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStocksCommand {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl AddStocksCommand {
    pub fn new(product_id: ProductId, quantity: i64) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

impl Request for AddStocksCommand {
    type Response = AddStocksResult;
    type Error = AddStocksError;
}
