use stockroom_core::validation::rules;
use stockroom_core::{ValidationErrors, Validator};

use super::AddStocksCommand;

/// Rules checked before the store is touched.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddStocksValidator;

impl Validator<AddStocksCommand> for AddStocksValidator {
    fn validate(&self, command: &AddStocksCommand) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(rules::greater_than("quantity", command.quantity, 0));
        errors.into_result()
    }
}
