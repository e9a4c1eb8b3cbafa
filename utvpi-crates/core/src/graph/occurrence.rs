use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;

/// An integer-valued unknown.
///
/// Variables are plain identifiers; the graph only learns about one once its occurrences are
/// registered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    id: u32,
}

impl Variable {
    pub fn new(id: u32) -> Self {
        Variable { id }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// The occurrence `+self`.
    pub fn positive(self) -> SignedOccurrence {
        SignedOccurrence::new(self, Polarity::Positive)
    }

    /// The occurrence `-self`.
    pub fn negative(self) -> SignedOccurrence {
        SignedOccurrence::new(self, Polarity::Negative)
    }
}

impl StorageKey for Variable {
    fn index(&self) -> usize {
        self.id as usize
    }

    fn create_from_index(index: usize) -> Self {
        Variable { id: index as u32 }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

impl std::fmt::Debug for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.id)
    }
}

/// The sign with which a variable appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    pub fn negate(self) -> Polarity {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }

    fn symbol(self) -> char {
        match self {
            Polarity::Positive => '+',
            Polarity::Negative => '-',
        }
    }
}

/// One half of the variable-splitting encoding: `x` is represented by the pair `x+` and `x-`,
/// with `x = (x+ - x-) / 2`, so that `±x ± y <= c` becomes a difference constraint between two
/// occurrences.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignedOccurrence {
    variable: Variable,
    polarity: Polarity,
}

impl SignedOccurrence {
    pub fn new(variable: Variable, polarity: Polarity) -> Self {
        SignedOccurrence { variable, polarity }
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// The occurrence of the same variable with the opposite polarity.
    pub fn negate(self) -> SignedOccurrence {
        SignedOccurrence {
            variable: self.variable,
            polarity: self.polarity.negate(),
        }
    }
}

impl Display for SignedOccurrence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.variable, self.polarity.symbol())
    }
}

impl std::fmt::Debug for SignedOccurrence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negate_is_an_involution() {
        let x = Variable::new(3);

        for occurrence in [x.positive(), x.negative()] {
            assert_ne!(occurrence, occurrence.negate());
            assert_eq!(occurrence, occurrence.negate().negate());
            assert_eq!(x, occurrence.negate().variable());
        }
    }

    #[test]
    fn occurrences_display_their_sign() {
        let x = Variable::new(0);

        assert_eq!("x0+", x.positive().to_string());
        assert_eq!("x0-", x.negative().to_string());
    }
}
