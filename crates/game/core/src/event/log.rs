use super::{Event, EventId, EventKind};

/// Iterator over a slice of the log. Restartable: ask the log again.
pub type Events<'a> = core::slice::Iter<'a, Event>;

/// Append-only, totally ordered event store.
///
/// Only the engine appends. Readers get shared iterators and cannot reorder
/// or edit what was recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and returns its sequence number.
    pub(crate) fn emit(&mut self, round: u32, kind: EventKind) -> EventId {
        let seq = EventId(self.events.len() as u64);
        self.events.push(Event { seq, round, kind });
        seq
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Every event, oldest first.
    pub fn read_all(&self) -> Events<'_> {
        self.events.iter()
    }

    /// Events with `seq >= index`. Past the end yields nothing.
    pub fn read_from(&self, index: usize) -> Events<'_> {
        self.events
            .get(index..)
            .unwrap_or_default()
            .iter()
    }

    pub fn get(&self, seq: EventId) -> Option<&Event> {
        usize::try_from(seq.0).ok().and_then(|i| self.events.get(i))
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    /// SHA-256 over the bincode encoding of every event, in order.
    ///
    /// Two logs with equal digests recorded byte-identical event streams.
    /// Fails if any event cannot be encoded; no event is ever left out.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        for event in &self.events {
            hasher.update(bincode::serialize(event)?);
        }
        Ok(hasher.finalize().into())
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = Events<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.read_all()
    }
}
