use async_trait::async_trait;

use stockroom_core::{Validator, Versioned};
use stockroom_infra::{CancellationToken, Repository, RequestHandler};
use stockroom_products::Product;

use super::{AddStocksCommand, AddStocksError, AddStocksResult, AddStocksValidator};

/// Handler for [`AddStocksCommand`].
///
/// ## Execution
///
/// ```text
/// validate ─▶ find(product_id) ─▶ increase_stock ─▶ save(product) ─▶ project
/// ```
///
/// - Validation runs inline, so an invalid command never reaches the store.
/// - `find` races against `cancel`. The token is checked again right before
///   `save`; once the commit has started it runs to completion and its
///   outcome is reported, so `Cancelled` always means nothing was written.
/// - A failed `save` means the increment was not applied. The handler never
///   retries; conflicts are surfaced as
///   `AddStocksError::Persistence(StoreError::Conflict(_))` for the caller.
#[derive(Debug)]
pub struct AddStocksHandler<R> {
    repository: R,
    validator: AddStocksValidator,
}

impl<R> AddStocksHandler<R>
where
    R: Repository<Product>,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            validator: AddStocksValidator,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    #[tracing::instrument(
        name = "add_stocks",
        skip(self, command, cancel),
        fields(product_id = %command.product_id, quantity = command.quantity)
    )]
    pub async fn execute(
        &self,
        command: AddStocksCommand,
        cancel: &CancellationToken,
    ) -> Result<AddStocksResult, AddStocksError> {
        self.validator.validate(&command).map_err(|errors| {
            tracing::debug!(%errors, "command rejected");
            AddStocksError::Validation(errors)
        })?;

        let found = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled("lookup")),
            found = self.repository.find(&command.product_id) => found?,
        };

        let mut product = found.ok_or_else(|| {
            tracing::debug!("product not found");
            AddStocksError::ProductNotFound(command.product_id)
        })?;

        product.increase_stock(command.quantity)?;

        if cancel.is_cancelled() {
            return Err(cancelled("commit"));
        }
        let version = self.repository.save(&product).await.map_err(|e| {
            tracing::warn!(error = %e, "failed to persist stock increase");
            AddStocksError::Persistence(e)
        })?;
        product.set_version(version);

        let result = AddStocksResult::from(&product);
        tracing::debug!(quantity_in_stock = result.quantity_in_stock, version, "stock increased");
        Ok(result)
    }
}

fn cancelled(stage: &'static str) -> AddStocksError {
    tracing::debug!(stage, "cancelled");
    AddStocksError::Cancelled
}

#[async_trait]
impl<R> RequestHandler<AddStocksCommand> for AddStocksHandler<R>
where
    R: Repository<Product> + 'static,
{
    async fn handle(
        &self,
        request: AddStocksCommand,
        cancel: &CancellationToken,
    ) -> Result<AddStocksResult, AddStocksError> {
        self.execute(request, cancel).await
    }
}
