use crate::selection::Key;

/// Handle for one issued dependent-option fetch. Carries the parent key the
/// fetch was keyed by, so the caller knows what to ask the option source
/// for, and an epoch used to judge the result when it comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
    key: Key,
}

impl FetchTicket {
    pub fn key(&self) -> &Key {
        &self.key
    }
}

/// Tracks which issued fetch, if any, may mutate state when it completes.
///
/// At most one request is authoritative at a time. Issuing a new request
/// supersedes the outstanding one; a superseded result is silently dropped
/// at delivery time. Whether a ticket is still authoritative is judged
/// against the parent key in effect at delivery, not at request time.
#[derive(Debug, Default)]
pub struct FetchSequencer {
    epoch: u64,
    outstanding: Option<FetchTicket>,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a request for `key`, superseding any outstanding request.
    pub fn request(&mut self, key: Key) -> FetchTicket {
        self.epoch += 1;
        let ticket = FetchTicket {
            epoch: self.epoch,
            key,
        };
        self.outstanding = Some(ticket.clone());
        ticket
    }

    /// Invalidate the outstanding request, if any. Later deliveries against
    /// its ticket are dropped.
    pub fn cancel_all(&mut self) {
        self.epoch += 1;
        self.outstanding = None;
    }

    /// Whether `ticket` may deliver its result: it must be the outstanding
    /// request AND its key must match the parent key in effect right now.
    pub fn is_authoritative(&self, ticket: &FetchTicket, current_parent: Option<&Key>) -> bool {
        match (&self.outstanding, current_parent) {
            (Some(outstanding), Some(current)) => {
                outstanding.epoch == ticket.epoch && &ticket.key == current
            }
            _ => false,
        }
    }

    /// Mark the outstanding request settled, after its result was absorbed
    /// or its failure recorded.
    pub fn settle(&mut self) {
        self.outstanding = None;
    }

    pub fn outstanding(&self) -> Option<&FetchTicket> {
        self.outstanding.as_ref()
    }
}
