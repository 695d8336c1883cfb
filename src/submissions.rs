use crate::error::{RegistrarResult, SubmissionInProgressSnafu};
use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};
use uuid::Uuid;

/// Tokens of form submissions whose backend call has not finished yet.
///
/// Every rendered form carries a fresh token; a second submission of the same
/// token is refused until the first one's [`SubmissionTicket`] is dropped,
/// which also happens when the request is cancelled mid-flight.
#[derive(Clone, Debug, Default)]
pub struct InFlightSubmissions {
    tokens: Arc<Mutex<HashSet<Uuid>>>,
}

impl InFlightSubmissions {
    pub fn begin(&self, token: Uuid) -> RegistrarResult<SubmissionTicket> {
        let newly_added = self
            .tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token);
        snafu::ensure!(newly_added, SubmissionInProgressSnafu { token });

        Ok(SubmissionTicket {
            tokens: self.tokens.clone(),
            token,
        })
    }

    #[cfg(test)]
    fn is_in_flight(&self, token: Uuid) -> bool {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&token)
    }
}

#[derive(Debug)]
pub struct SubmissionTicket {
    tokens: Arc<Mutex<HashSet<Uuid>>>,
    token: Uuid,
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.token);
    }
}
