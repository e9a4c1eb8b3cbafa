use std::fmt::Display;
use std::fmt::Formatter;

use super::Polarity;
use super::SignedOccurrence;
use super::Variable;
use crate::basic_types::GraphError;
use crate::basic_types::Weight;

/// A term `±x` with a unit coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    sign: Polarity,
    variable: Variable,
}

impl Term {
    pub fn new(sign: Polarity, variable: Variable) -> Self {
        Term { sign, variable }
    }

    /// The term `+x`.
    pub fn positive(variable: Variable) -> Self {
        Term::new(Polarity::Positive, variable)
    }

    /// The term `-x`.
    pub fn negative(variable: Variable) -> Self {
        Term::new(Polarity::Negative, variable)
    }

    pub fn variable(&self) -> Variable {
        self.variable
    }

    pub fn sign(&self) -> Polarity {
        self.sign
    }

    /// The occurrence standing for this term after variable splitting.
    pub fn occurrence(&self) -> SignedOccurrence {
        SignedOccurrence::new(self.variable, self.sign)
    }

    pub fn negate(self) -> Term {
        Term::new(self.sign.negate(), self.variable)
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::positive(variable)
    }
}

/// An inequality `t1 + t2 <= bound` or `t1 <= bound`, where each term is `±x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UtvpiConstraint<W> {
    first: Term,
    second: Option<Term>,
    bound: W,
}

impl<W: Weight> UtvpiConstraint<W> {
    pub fn new(first: Term, second: Option<Term>, bound: W) -> Self {
        UtvpiConstraint {
            first,
            second,
            bound,
        }
    }

    /// `x - y <= bound`.
    pub fn difference(x: Variable, y: Variable, bound: W) -> Self {
        UtvpiConstraint::new(Term::positive(x), Some(Term::negative(y)), bound)
    }

    /// `x + y <= bound`.
    pub fn sum(x: Variable, y: Variable, bound: W) -> Self {
        UtvpiConstraint::new(Term::positive(x), Some(Term::positive(y)), bound)
    }

    /// `x <= bound`.
    pub fn upper_bound(x: Variable, bound: W) -> Self {
        UtvpiConstraint::new(Term::positive(x), None, bound)
    }

    /// `x >= bound`, stored as `-x <= -bound`.
    ///
    /// Fails if `-bound` is not representable.
    pub fn lower_bound(x: Variable, bound: W) -> Result<Self, GraphError> {
        let negated = W::zero()
            .checked_sub(&bound)
            .ok_or(GraphError::BoundOverflow)?;

        Ok(UtvpiConstraint::new(Term::negative(x), None, negated))
    }

    pub fn terms(&self) -> impl Iterator<Item = Term> + '_ {
        std::iter::once(self.first).chain(self.second)
    }

    pub fn bound(&self) -> W {
        self.bound
    }

    /// The difference edges `(source, target, weight)`, each meaning `target <= source + weight`,
    /// that together encode this constraint over split variables.
    ///
    /// `a·x + b·y <= c` yields `-b·y -> a·x` and `-a·x -> b·y`, both with weight `c`. A single
    /// term `a·x <= c` yields `-a·x -> a·x` with weight `2c`, since `x+ - x- = 2x`.
    pub(crate) fn lower(&self) -> Result<Vec<(SignedOccurrence, SignedOccurrence, W)>, GraphError> {
        match self.second {
            Some(second) => Ok(vec![
                (
                    second.negate().occurrence(),
                    self.first.occurrence(),
                    self.bound,
                ),
                (
                    self.first.negate().occurrence(),
                    second.occurrence(),
                    self.bound,
                ),
            ]),
            None => {
                let weight = self.bound.doubled().ok_or(GraphError::BoundOverflow)?;
                Ok(vec![(
                    self.first.negate().occurrence(),
                    self.first.occurrence(),
                    weight,
                )])
            }
        }
    }
}

impl<W: Weight> Display for UtvpiConstraint<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.first.sign {
            Polarity::Positive => write!(f, "{}", self.first.variable)?,
            Polarity::Negative => write!(f, "-{}", self.first.variable)?,
        }

        if let Some(second) = self.second {
            match second.sign {
                Polarity::Positive => write!(f, " + {}", second.variable)?,
                Polarity::Negative => write!(f, " - {}", second.variable)?,
            }
        }

        write!(f, " <= {}", self.bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_lowers_to_two_mirrored_edges() {
        let x = Variable::new(0);
        let y = Variable::new(1);

        let edges = UtvpiConstraint::difference(x, y, 3)
            .lower()
            .expect("no overflow");

        // x+ - y+ <= 3 and y- - x- <= 3
        assert_eq!(
            vec![(y.positive(), x.positive(), 3), (x.negative(), y.negative(), 3)],
            edges
        );
    }

    #[test]
    fn sum_lowers_to_edges_from_the_negated_terms() {
        let x = Variable::new(0);
        let y = Variable::new(1);

        let edges = UtvpiConstraint::sum(x, y, -1).lower().expect("no overflow");

        // x+ - y- <= -1 and y+ - x- <= -1
        assert_eq!(
            vec![
                (y.negative(), x.positive(), -1),
                (x.negative(), y.positive(), -1)
            ],
            edges
        );
    }

    #[test]
    fn single_variable_bounds_are_doubled() {
        let x = Variable::new(0);

        let upper = UtvpiConstraint::upper_bound(x, 4).lower().expect("no overflow");
        assert_eq!(vec![(x.negative(), x.positive(), 8)], upper);

        let lower = UtvpiConstraint::lower_bound(x, 1)
            .expect("representable")
            .lower()
            .expect("no overflow");
        assert_eq!(vec![(x.positive(), x.negative(), -2)], lower);
    }

    #[test]
    fn doubling_can_overflow() {
        let x = Variable::new(0);

        let result = UtvpiConstraint::upper_bound(x, i8::MAX).lower();

        assert_eq!(Err(GraphError::BoundOverflow), result);
        assert_eq!(
            Err(GraphError::BoundOverflow),
            UtvpiConstraint::lower_bound(x, i8::MIN)
        );
    }

    #[test]
    fn constraints_display_as_inequalities() {
        let x = Variable::new(0);
        let y = Variable::new(1);

        assert_eq!("x0 - x1 <= 3", UtvpiConstraint::difference(x, y, 3).to_string());
        assert_eq!(
            "-x0 <= -1",
            UtvpiConstraint::lower_bound(x, 1)
                .expect("representable")
                .to_string()
        );
    }
}
