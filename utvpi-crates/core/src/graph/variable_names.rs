use std::fmt::Display;
use std::fmt::Formatter;

use super::Polarity;
use super::SignedOccurrence;
use super::Variable;
use crate::containers::HashMap;

/// Optional human-readable names for variables, used when displaying conflicts.
#[derive(Debug, Default, Clone)]
pub struct VariableNames {
    names: HashMap<Variable, String>,
}

impl VariableNames {
    /// Get the name associated with a variable.
    pub fn get_name(&self, variable: Variable) -> Option<&str> {
        self.names.get(&variable).map(|s| s.as_str())
    }

    /// Add a name to the variable. This will override the existing name if it exists.
    pub(crate) fn add(&mut self, variable: Variable, name: String) {
        let _ = self.names.insert(variable, name);
    }

    /// Display an occurrence with the variable name if there is one, e.g. `start+`.
    pub fn display_occurrence(&self, occurrence: SignedOccurrence) -> impl Display + '_ {
        OccurrenceDisplay {
            occurrence,
            names: self,
        }
    }
}

struct OccurrenceDisplay<'names> {
    occurrence: SignedOccurrence,
    names: &'names VariableNames,
}

impl Display for OccurrenceDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = match self.occurrence.polarity() {
            Polarity::Positive => '+',
            Polarity::Negative => '-',
        };

        match self.names.get_name(self.occurrence.variable()) {
            Some(name) => write!(f, "{name}{sign}"),
            None => write!(f, "{}", self.occurrence),
        }
    }
}
