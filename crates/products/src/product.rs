use serde::{Deserialize, Serialize};

use stockroom_core::validation::rules;
use stockroom_core::{DomainError, DomainResult, Entity, ProductId, ValidationErrors, Versioned};

/// Entity: Product.
///
/// Owned and persisted by a product store; use cases borrow it for the
/// duration of one request, mutate it in memory and hand it back via `save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    id: ProductId,
    name: String,
    quantity_in_stock: i64,
    version: u64,
}

/// Wire shape of a [`Product`]; decoding goes through [`Product::new`].
#[derive(Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    quantity_in_stock: i64,
    #[serde(default)]
    version: u64,
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let mut product = Product::new(record.id, record.name, record.quantity_in_stock)?;
        product.version = record.version;
        Ok(product)
    }
}

impl Product {
    /// Create a product that has not been persisted yet (`version == 0`).
    pub fn new(id: ProductId, name: impl Into<String>, quantity_in_stock: i64) -> DomainResult<Self> {
        let name = name.into();

        let mut errors = ValidationErrors::new();
        errors
            .check(rules::not_blank("name", &name))
            .check(rules::at_least("quantity_in_stock", quantity_in_stock, 0));
        errors.into_result()?;

        Ok(Self {
            id,
            name,
            quantity_in_stock,
            version: 0,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity_in_stock(&self) -> i64 {
        self.quantity_in_stock
    }

    /// Add `quantity` units to the stock level and return the new level.
    ///
    /// Only strictly positive quantities are accepted, so the stock level can
    /// never drop as a result of this call. On error the entity is unchanged.
    pub fn increase_stock(&mut self, quantity: i64) -> DomainResult<i64> {
        if let Some(err) = rules::greater_than("quantity", quantity, 0) {
            return Err(DomainError::Validation(err.into()));
        }

        let new_stock = self
            .quantity_in_stock
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invariant("stock level overflow"))?;

        self.quantity_in_stock = new_stock;
        Ok(new_stock)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Versioned for Product {
    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}
