//! Operator groups and the built-in operator set.

use std::fmt;
use std::sync::OnceLock;

use lumen_lexer_core::SymbolTable;

/// A named set of operators recognized together.
///
/// Each precedence level of the grammar consumes operators from one group.
/// [`OperatorGroup::Punctuation`] holds the brackets and separators, which
/// take part in longest-match recognition like any operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperatorGroup {
    Assignment,
    Logical,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Punctuation,
}

impl OperatorGroup {
    /// Every group, in precedence order from loosest to tightest.
    pub const ALL: [OperatorGroup; 8] = [
        OperatorGroup::Assignment,
        OperatorGroup::Logical,
        OperatorGroup::Equality,
        OperatorGroup::Relational,
        OperatorGroup::Additive,
        OperatorGroup::Multiplicative,
        OperatorGroup::Unary,
        OperatorGroup::Punctuation,
    ];

    /// Key of this group in a [`SymbolTable`].
    pub fn name(self) -> &'static str {
        match self {
            OperatorGroup::Assignment => "Assignment",
            OperatorGroup::Logical => "Logical",
            OperatorGroup::Equality => "Equality",
            OperatorGroup::Relational => "Relational",
            OperatorGroup::Additive => "Additive",
            OperatorGroup::Multiplicative => "Multiplicative",
            OperatorGroup::Unary => "Unary",
            OperatorGroup::Punctuation => "Punctuation",
        }
    }

    /// Built-in operators of this group.
    pub fn default_symbols(self) -> &'static [&'static str] {
        match self {
            OperatorGroup::Assignment => &["="],
            OperatorGroup::Logical => &["&&", "||"],
            OperatorGroup::Equality => &["===", "==", "!==", "!="],
            OperatorGroup::Relational => &["<", "<=", ">", ">="],
            OperatorGroup::Additive => &["+", "-"],
            OperatorGroup::Multiplicative => &["*", "/", "%"],
            OperatorGroup::Unary => &["+", "-", "!"],
            OperatorGroup::Punctuation => &["(", ")", "[", "]", "{", "}", ",", ".", "?", ":"],
        }
    }

    /// Whether operators without a built-in meaning may be added.
    ///
    /// Assignment, logical and punctuation symbols drive grammar shape, so
    /// their sets are fixed.
    pub fn accepts_custom(self) -> bool {
        matches!(
            self,
            OperatorGroup::Equality
                | OperatorGroup::Relational
                | OperatorGroup::Additive
                | OperatorGroup::Multiplicative
                | OperatorGroup::Unary
        )
    }
}

impl fmt::Display for OperatorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The built-in operator table.
pub fn default_symbols() -> &'static SymbolTable {
    static TABLE: OnceLock<SymbolTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        tracing::trace!("compiling default operator table");
        SymbolTable::compile(
            OperatorGroup::ALL
                .iter()
                .map(|group| (group.name(), group.default_symbols().iter().copied())),
        )
    })
}
