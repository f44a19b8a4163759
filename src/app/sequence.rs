//! Committed actuation plan.
//!
//! [`ControlState`] holds the bit sequence the heater is currently playing
//! and the cursor of the next bit.  It is only ever replaced wholesale, from
//! a line the parser accepted as valid.

use heapless::Vec;

/// Capacity of the raw line buffer, terminator slot included.
pub const SEQUENCE_CAPACITY: usize = 101;

/// Maximum number of characters stored from one input line.
pub const LINE_LIMIT: usize = SEQUENCE_CAPACITY - 1;

/// One planned heater state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bit {
    Off,
    On,
}

impl Bit {
    /// Map an input character, `None` for anything outside `{0,1}`.
    pub fn from_ascii(c: u8) -> Option<Self> {
        match c {
            b'0' => Some(Self::Off),
            b'1' => Some(Self::On),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Off => '0',
            Self::On => '1',
        }
    }

    /// The always-visible tick marker.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Off => "[OFF]",
            Self::On => "[ON]",
        }
    }
}

/// A validated sequence waiting to be committed.
pub type BitSequence = Vec<Bit, LINE_LIMIT>;

/// What the cursor position means for the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A bit is due.
    Play(Bit),
    /// The sequence just ran out; idle has not been announced yet.
    Exhausted,
    /// Idle was already announced; nothing happens until a new commit.
    Silent,
}

/// The committed plan.
///
/// `cursor` may sit one past `len()` after the idle announcement.  That
/// sentinel keeps both the play and the exhausted branch false until a new
/// sequence is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    sequence: BitSequence,
    cursor: usize,
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlState {
    /// Empty plan with idle already announced: the controller stays quiet
    /// until the first sequence arrives.
    pub fn new() -> Self {
        Self {
            sequence: Vec::new(),
            cursor: 1,
        }
    }

    /// Replace the whole plan and rewind.
    pub fn commit(&mut self, sequence: BitSequence) {
        self.sequence = sequence;
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn bits(&self) -> &[Bit] {
        &self.sequence
    }

    pub fn slot(&self) -> Slot {
        match self.cursor.cmp(&self.sequence.len()) {
            core::cmp::Ordering::Less => Slot::Play(self.sequence[self.cursor]),
            core::cmp::Ordering::Equal => Slot::Exhausted,
            core::cmp::Ordering::Greater => Slot::Silent,
        }
    }

    /// Move past the current slot.  Saturates at the idle sentinel.
    pub fn advance(&mut self) {
        if self.cursor <= self.sequence.len() {
            self.cursor += 1;
        }
    }
}

/// Render bits back to their input form.
pub fn render(bits: &[Bit]) -> String {
    bits.iter().map(|b| b.as_char()).collect()
}
