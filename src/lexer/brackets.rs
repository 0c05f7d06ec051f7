//! Open-bracket bookkeeping.
//!
//! One stack of opener ranges per bracket kind.  The innermost open bracket
//! is whichever stack top starts last, so a closer can be checked against
//! all three kinds at once.

use crate::error::LexError;
use crate::source::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    Round,
    Square,
    Curly,
}

impl Bracket {
    pub const ALL: [Bracket; 3] = [Bracket::Round, Bracket::Square, Bracket::Curly];

    pub fn opener(self) -> char {
        match self {
            Bracket::Round => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }

    pub fn closer(self) -> char {
        match self {
            Bracket::Round => ')',
            Bracket::Square => ']',
            Bracket::Curly => '}',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketTracker {
    round: Vec<Range>,
    square: Vec<Range>,
    curly: Vec<Range>,
}

impl BracketTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the stacks for a reserved symbol.  Anything that is not a
    /// bracket is ignored.
    pub fn track(&mut self, symbol: &str, range: Range) -> Result<(), LexError> {
        match symbol {
            "(" => self.open(Bracket::Round, range),
            "[" => self.open(Bracket::Square, range),
            "{" => self.open(Bracket::Curly, range),
            ")" => return self.close(Bracket::Round, range),
            "]" => return self.close(Bracket::Square, range),
            "}" => return self.close(Bracket::Curly, range),
            _ => {}
        }
        Ok(())
    }

    pub fn open(&mut self, kind: Bracket, range: Range) {
        self.stack_mut(kind).push(range);
    }

    /// Pop the innermost opener if it is of `kind`.  On a mismatch the stacks
    /// are left as they were.
    pub fn close(&mut self, kind: Bracket, range: Range) -> Result<(), LexError> {
        let Some((innermost, opened_at)) = self.innermost() else {
            return Err(LexError::UnmatchedBracket {
                delimiter: kind.closer(),
                location: range,
            });
        };
        if innermost != kind {
            return Err(LexError::MismatchedBracket {
                delimiter: kind.closer(),
                opener: innermost.opener(),
                opener_location: opened_at,
                closer_location: range,
            });
        }
        self.stack_mut(kind).pop();
        Ok(())
    }

    /// The most recently opened bracket that is still open, of any kind.
    pub fn innermost(&self) -> Option<(Bracket, Range)> {
        Bracket::ALL
            .into_iter()
            .filter_map(|kind| self.stack(kind).last().map(|r| (kind, *r)))
            .max_by_key(|(_, r)| r.begin)
    }

    pub fn stack(&self, kind: Bracket) -> &[Range] {
        match kind {
            Bracket::Round => &self.round,
            Bracket::Square => &self.square,
            Bracket::Curly => &self.curly,
        }
    }

    fn stack_mut(&mut self, kind: Bracket) -> &mut Vec<Range> {
        match kind {
            Bracket::Round => &mut self.round,
            Bracket::Square => &mut self.square,
            Bracket::Curly => &mut self.curly,
        }
    }

    /// Total number of open brackets.
    pub fn depth(&self) -> usize {
        self.round.len() + self.square.len() + self.curly.len()
    }

    /// Line breaks are only significant when this holds.
    pub fn is_empty(&self) -> bool {
        self.depth() == 0
    }
}
