//! Per-run cursor state

use crate::domain::SequenceNumber;

/// Cursor state of one sync run
///
/// Holds the checkpoint read at start, the running maximum of every sequence number
/// seen (whatever page it came from) and whether the listing crossed the checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    prior: SequenceNumber,
    running_max: Option<SequenceNumber>,
    boundary_reached: bool,
}

impl RunState {
    /// Start a run from the stored checkpoint
    pub fn new(prior: SequenceNumber) -> Self {
        Self {
            prior,
            running_max: None,
            boundary_reached: false,
        }
    }

    /// Checkpoint read at run start
    pub fn prior(&self) -> SequenceNumber {
        self.prior
    }

    /// Record a listed order
    ///
    /// Updates the running maximum first, then returns `true` when the order is at
    /// or below the checkpoint, marking the boundary as reached.
    pub fn observe(&mut self, sequence_number: SequenceNumber) -> bool {
        self.running_max = Some(match self.running_max {
            Some(max) => max.max(sequence_number),
            None => sequence_number,
        });

        if sequence_number <= self.prior {
            self.boundary_reached = true;
            return true;
        }
        false
    }

    /// Highest sequence number observed so far
    pub fn running_max(&self) -> Option<SequenceNumber> {
        self.running_max
    }

    /// Whether an already-synced order was listed
    pub fn boundary_reached(&self) -> bool {
        self.boundary_reached
    }

    /// Value to persist at run end, if it advances the checkpoint
    pub fn next_checkpoint(&self) -> Option<SequenceNumber> {
        self.running_max
            .map(|max| max.max(self.prior))
            .filter(|next| *next > self.prior)
    }
}
