use std::fmt;

/// The variable names accepted by the parser, in table column order.
pub const ALPHABET: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Maximum number of distinct variables in a single expression.
pub const MAX_VARIABLES: usize = ALPHABET.len();

/// A propositional variable, identified by its position in [`ALPHABET`].
///
/// Ordering follows the alphabet, so sorting variables sorts them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    id: u8,
}

impl Variable {
    /// Looks up the variable with the given single-character name.
    pub fn from_name(name: char) -> Option<Self> {
        ALPHABET
            .iter()
            .position(|&c| c == name)
            .map(|id| Self { id: id as u8 })
    }

    /// Returns the variable at position `id` of [`ALPHABET`].
    pub fn from_id(id: usize) -> Option<Self> {
        (id < MAX_VARIABLES).then_some(Self { id: id as u8 })
    }

    pub const fn name(self) -> char {
        ALPHABET[self.id as usize]
    }

    pub const fn id(self) -> usize {
        self.id as usize
    }

    /// All variables of the alphabet, in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..MAX_VARIABLES as u8).map(|id| Self { id })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.name(), f)
    }
}

impl From<Variable> for usize {
    fn from(v: Variable) -> Self {
        v.id()
    }
}
