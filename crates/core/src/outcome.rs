//! Tagged results of store mutations.

use crate::errors::{Error, Result, ValidationError};

/// Result of an add, edit or delete against one of the ledger stores.
///
/// Only `Applied` changes state. `Rejected` and `NotFound` leave the store
/// (and its persisted snapshot) untouched, so callers that ignore the outcome
/// keep the "do nothing on bad input" behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    /// The mutation happened. Carries the stored record, or the removed one for deletes.
    Applied(T),
    /// The candidate failed validation.
    Rejected(ValidationError),
    /// No record carries the requested id.
    NotFound(i64),
}

impl<T> MutationOutcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }

    /// Returns the applied record, discarding the failure reason.
    pub fn applied(self) -> Option<T> {
        match self {
            MutationOutcome::Applied(value) => Some(value),
            _ => None,
        }
    }

    /// Converts the outcome into a `Result` for callers that surface failures as errors.
    ///
    /// `entity` names the record kind in the `NotFound` message (e.g. "Budget").
    pub fn into_result(self, entity: &str) -> Result<T> {
        match self {
            MutationOutcome::Applied(value) => Ok(value),
            MutationOutcome::Rejected(reason) => Err(Error::Validation(reason)),
            MutationOutcome::NotFound(id) => {
                Err(Error::NotFound(format!("{} with id {} not found", entity, id)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result_maps_each_variant() {
        let applied: MutationOutcome<u8> = MutationOutcome::Applied(7);
        assert_eq!(applied.into_result("Budget").unwrap(), 7);

        let rejected: MutationOutcome<u8> =
            MutationOutcome::Rejected(ValidationError::MissingField("description".to_string()));
        assert!(matches!(
            rejected.into_result("Transaction"),
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));

        let missing: MutationOutcome<u8> = MutationOutcome::NotFound(42);
        match missing.into_result("Budget") {
            Err(Error::NotFound(msg)) => assert_eq!(msg, "Budget with id 42 not found"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
