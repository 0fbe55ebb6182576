use serde::{Deserialize, Serialize};

use stockroom_products::Product;

/// Stock level of the product right after the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStocksResult {
    pub quantity_in_stock: i64,
}

impl From<&Product> for AddStocksResult {
    fn from(product: &Product) -> Self {
        Self {
            quantity_in_stock: product.quantity_in_stock(),
        }
    }
}
