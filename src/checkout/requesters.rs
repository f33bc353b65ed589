use std::collections::BTreeMap;

use crate::checkout::{
    error::{CheckoutError, not_found},
    types::{Requester, RequesterId},
};

#[derive(Debug, Clone, Default)]
pub struct RequesterDirectory {
    requesters: BTreeMap<RequesterId, Requester>,
}

impl RequesterDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_requesters(requesters: impl IntoIterator<Item = Requester>) -> Self {
        let mut directory = Self::new();
        for requester in requesters {
            directory.add(requester);
        }
        directory
    }

    pub fn add(&mut self, requester: Requester) {
        self.requesters.insert(requester.id.clone(), requester);
    }

    pub fn find(&self, requester_id: &str) -> Result<&Requester, CheckoutError> {
        self.requesters
            .get(requester_id)
            .ok_or_else(|| not_found(format!("requester not found: {requester_id}")))
    }

    pub fn contains(&self, requester_id: &str) -> bool {
        self.requesters.contains_key(requester_id)
    }

    /// Sole mutator of the active-borrow count. Returns the new count.
    pub fn record_borrow(&mut self, requester_id: &str) -> Result<u32, CheckoutError> {
        let requester = self
            .requesters
            .get_mut(requester_id)
            .ok_or_else(|| not_found(format!("requester not found: {requester_id}")))?;
        requester.active_borrows = requester.active_borrows.saturating_add(1);
        Ok(requester.active_borrows)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requester> {
        self.requesters.values()
    }

    pub fn len(&self) -> usize {
        self.requesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requesters.is_empty()
    }
}
