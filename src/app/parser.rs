//! Line classifier for the operator input channel.
//!
//! Bytes are fed one at a time, the same way the frame decoder of a
//! streaming protocol would be fed.  The scanner decides as early as
//! possible:
//!
//! ```text
//!  first byte 'q' ──▶ Quit (stop reading immediately)
//!  first byte 'd' ──▶ Command (rest of line drained, never a sequence)
//!  otherwise       ──▶ every byte must be '0' / '1'
//! ```
//!
//! Bytes are accepted into the line buffer until the first invalid one or
//! until [`LINE_LIMIT`] bytes are held.  The byte that fills the buffer
//! reports [`ScanStep::BufferFull`]; everything after it is drained without
//! being inspected, so an over-long line is classified from its prefix.
//! A `\r` is an ordinary non-bit byte.

use super::sequence::{Bit, BitSequence, LINE_LIMIT};

/// Result of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    /// Keep reading until end of line.
    Continue,
    /// This byte filled the line buffer; keep draining.
    BufferFull,
    /// The line is a quit request; stop reading.
    Quit,
}

/// Classification of a complete line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Quit,
    /// Debug toggle.
    Command,
    /// A sequence to commit (may be empty).
    Valid(BitSequence),
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Sequence,
    Command,
    Invalid,
}

/// Streaming classifier for one input line.
#[derive(Debug)]
pub struct LineScanner {
    bits: BitSequence,
    /// Bytes accepted into the line buffer.
    held: usize,
    verdict: Verdict,
}

impl Default for LineScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LineScanner {
    pub fn new() -> Self {
        Self {
            bits: BitSequence::new(),
            held: 0,
            verdict: Verdict::Sequence,
        }
    }

    /// Feed one byte of the line, terminator excluded.
    pub fn feed(&mut self, byte: u8) -> ScanStep {
        if self.held == 0 {
            match byte {
                b'q' => return ScanStep::Quit,
                b'd' => {
                    self.held = 1;
                    self.verdict = Verdict::Command;
                    return ScanStep::Continue;
                }
                _ => {}
            }
        }

        if self.verdict != Verdict::Sequence || self.held == LINE_LIMIT {
            return ScanStep::Continue;
        }

        self.held += 1;
        match Bit::from_ascii(byte) {
            // `held` never exceeds the capacity, so the push cannot fail.
            Some(bit) => {
                let _ = self.bits.push(bit);
            }
            None => self.verdict = Verdict::Invalid,
        }

        if self.held == LINE_LIMIT {
            ScanStep::BufferFull
        } else {
            ScanStep::Continue
        }
    }

    /// Close the line (newline or end of stream reached).
    pub fn finish(self) -> LineOutcome {
        match self.verdict {
            Verdict::Sequence => LineOutcome::Valid(self.bits),
            Verdict::Command => LineOutcome::Command,
            Verdict::Invalid => LineOutcome::Invalid,
        }
    }
}

/// Classify a complete in-memory line.  Mostly useful for tests and tools;
/// the control loop feeds bytes straight from its input source.
pub fn classify_line(line: &[u8]) -> LineOutcome {
    let mut scanner = LineScanner::new();
    for &b in line {
        if scanner.feed(b) == ScanStep::Quit {
            return LineOutcome::Quit;
        }
    }
    scanner.finish()
}
