/// Which asynchronous bitmap a ticket belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Background,
    Logo,
}

/// Receipt for an asynchronous bitmap load.
///
/// A completion is applied only if the surface it started against is still current and no
/// newer load of the same kind has been started since.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    kind: LoadKind,
    generation: u64,
    seq: u64,
}

impl LoadTicket {
    pub fn kind(&self) -> LoadKind {
        self.kind
    }
}

/// What happened to a completed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// Superseded by a rebuild or a newer load; the result was dropped.
    Stale,
}

#[derive(Debug, Default)]
pub(crate) struct LoadTracker {
    next_seq: u64,
    latest_background: u64,
    latest_logo: u64,
}

impl LoadTracker {
    pub(crate) fn begin(&mut self, kind: LoadKind, generation: u64) -> LoadTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        match kind {
            LoadKind::Background => self.latest_background = seq,
            LoadKind::Logo => self.latest_logo = seq,
        }
        LoadTicket {
            kind,
            generation,
            seq,
        }
    }

    pub(crate) fn is_current(&self, ticket: &LoadTicket, generation: u64) -> bool {
        let latest = match ticket.kind {
            LoadKind::Background => self.latest_background,
            LoadKind::Logo => self.latest_logo,
        };
        ticket.generation == generation && ticket.seq == latest
    }
}
