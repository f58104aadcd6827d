use crate::parser::{Expression, ParsedFormula};
use crate::symbols::{Variable, MAX_VARIABLES};
use crate::translate;
use rustc_hash::FxHashMap;
use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// A cell of a truth table, or a pattern over the result column.
///
/// Cells are always [`True`] or [`False`]. As a row filter, [`Any`] selects
/// every row and the other two select rows with that result.
///
/// [`Any`]: TruthTableEntry::Any
/// [`True`]: TruthTableEntry::True
/// [`False`]: TruthTableEntry::False
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthTableEntry {
    True,
    False,
    /// Either value; only meaningful as a filter
    Any,
}

impl TruthTableEntry {
    const fn variants<'a>() -> &'a [Self] {
        &[Self::True, Self::False, Self::Any]
    }

    fn matches(&self, s: &str) -> bool {
        match self {
            Self::True => matches!(s, "true" | "True" | "t" | "T" | "1"),
            Self::False => matches!(s, "false" | "False" | "f" | "F" | "0"),
            Self::Any => matches!(s, "any" | "Any" | "a" | "A" | "*"),
        }
    }

    pub const fn accepts(self, value: bool) -> bool {
        match self {
            Self::True => value,
            Self::False => !value,
            Self::Any => true,
        }
    }
}

impl From<bool> for TruthTableEntry {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl Display for TruthTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::True => "True",
            Self::False => "False",
            Self::Any => "Any",
        })
    }
}

impl FromStr for TruthTableEntry {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .find(|variant| variant.matches(s))
            .ok_or_else(|| anyhow::anyhow!("cannot parse {s} as truth-table entry"))
            .copied()
    }
}

/// Truth values for the variables of one table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: FxHashMap<Variable, bool>,
}

impl Assignment {
    /// Value of `var`; variables without a value read as false.
    pub fn value(&self, var: Variable) -> bool {
        self.values.get(&var).copied().unwrap_or(false)
    }
}

impl FromIterator<(Variable, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (Variable, bool)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Expression {
    /// Evaluates the formula under `assignment`.
    pub fn eval(&self, assignment: &Assignment) -> bool {
        match self {
            Self::Const(c) => *c,
            Self::Var(v) => assignment.value(*v),
            Self::Not(f) => !f.eval(assignment),
            Self::BinaryOp(op, l, r) => {
                let l = l.eval(assignment);
                let r = r.eval(assignment);
                op.apply(l, r)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// One value per table variable, in header order.
    pub values: Vec<bool>,
    pub result: bool,
}

impl Row {
    /// Variable values followed by the result.
    pub fn columns(&self) -> impl Iterator<Item = bool> + '_ {
        self.values.iter().copied().chain(std::iter::once(self.result))
    }

    /// Number of columns, including the result.
    pub fn width(&self) -> usize {
        self.values.len() + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    pub vars: Vec<Variable>,
    /// Variable names followed by the result column label.
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl TruthTable {
    /// Replaces the label of the result column.
    pub fn with_result_label(mut self, label: impl Into<String>) -> Self {
        if let Some(last) = self.headers.last_mut() {
            *last = label.into();
        }
        self
    }

    pub fn result_label(&self) -> &str {
        self.headers.last().map_or("", String::as_str)
    }

    /// Rows for which the formula holds.
    pub fn models(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.result)
    }

    pub fn filtered(&self, entry: TruthTableEntry) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(move |row| entry.accepts(row.result))
    }

    pub fn is_tautology(&self) -> bool {
        self.rows.iter().all(|row| row.result)
    }

    pub fn is_contradiction(&self) -> bool {
        !self.is_satisfiable()
    }

    pub fn is_satisfiable(&self) -> bool {
        self.rows.iter().any(|row| row.result)
    }
}

/// Enumerates every assignment of `vars` and evaluates `expr` under each.
///
/// Rows are ordered like counting down in binary: true before false, with
/// the first variable changing slowest. `vars` holds at most
/// [`MAX_VARIABLES`] entries, which the variable alphabet guarantees for
/// parsed formulas; with no variables a single row is produced.
pub fn evaluate_rows(expr: &Expression, vars: &[Variable]) -> Vec<Row> {
    debug_assert!(vars.len() <= MAX_VARIABLES);

    let n = vars.len();

    (0..1usize << n)
        .map(|i| {
            let values: Vec<bool> = (0..n).map(|j| (i >> (n - 1 - j)) & 1 == 0).collect();
            let assignment: Assignment = vars.iter().copied().zip(values.iter().copied()).collect();
            let result = expr.eval(&assignment);

            log::trace!("{values:?} => {result}");

            Row { values, result }
        })
        .collect()
}

/// Builds the complete truth table of `formula`. The result column is
/// labelled with the formula text in glyph notation.
pub fn generate_table(formula: &ParsedFormula) -> TruthTable {
    let rows = evaluate_rows(&formula.expr, &formula.vars);

    let headers = formula
        .vars
        .iter()
        .map(ToString::to_string)
        .chain(std::iter::once(translate::to_unicode(&formula.text)))
        .collect();

    TruthTable {
        vars: formula.vars.clone(),
        headers,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn table(text: &str) -> TruthTable {
        generate_table(&parse(text).expect("valid formula"))
    }

    fn results(text: &str) -> Vec<bool> {
        table(text).rows.iter().map(|row| row.result).collect()
    }

    #[test]
    fn entry_from_str() -> anyhow::Result<()> {
        assert_eq!("T".parse::<TruthTableEntry>()?, TruthTableEntry::True);
        assert_eq!("0".parse::<TruthTableEntry>()?, TruthTableEntry::False);
        assert_eq!("*".parse::<TruthTableEntry>()?, TruthTableEntry::Any);
        assert!("maybe".parse::<TruthTableEntry>().is_err());
        Ok(())
    }

    #[test]
    fn entry_display_pads() {
        assert_eq!(format!("{:<6}|", TruthTableEntry::True), "True  |");
        assert_eq!(format!("{:>6}|", TruthTableEntry::from(false)), " False|");
    }

    #[test]
    fn entry_accepts() {
        assert!(TruthTableEntry::True.accepts(true));
        assert!(!TruthTableEntry::True.accepts(false));
        assert!(TruthTableEntry::False.accepts(false));
        assert!(TruthTableEntry::Any.accepts(true) && TruthTableEntry::Any.accepts(false));
    }

    #[test]
    fn deepest_formula() {
        let negations = format!("{}A", "~".repeat(crate::parser::MAX_DEPTH));
        assert_eq!(results(&negations), vec![true, false]);
    }

    #[test]
    fn row_order() {
        let t = table("A & B");
        let values: Vec<Vec<bool>> = t.rows.iter().map(|row| row.values.clone()).collect();
        assert_eq!(
            values,
            vec![
                vec![true, true],
                vec![true, false],
                vec![false, true],
                vec![false, false]
            ]
        );
    }

    #[test]
    fn connectives() {
        assert_eq!(results("A & B"), vec![true, false, false, false]);
        assert_eq!(results("A | B"), vec![true, true, true, false]);
        assert_eq!(results("A >> B"), vec![true, false, true, true]);
        assert_eq!(results("A << B"), vec![true, false, false, true]);
        assert_eq!(results("~A"), vec![false, true]);
    }

    #[test]
    fn constant_only() {
        let t = table("True | False");
        assert_eq!(t.rows, vec![Row { values: vec![], result: true }]);
        assert_eq!(t.headers, vec!["True ∨ False".to_string()]);
    }

    #[test]
    fn unassigned_reads_false() {
        let expr = parse("A | ~B").expect("valid formula").expr;
        assert!(expr.eval(&Assignment::default()));
    }

    #[test]
    fn analysis() {
        assert!(table("A | ~A").is_tautology());
        assert!(table("A & ~A").is_contradiction());
        assert!(table("A >> B").is_satisfiable());
        assert_eq!(table("A | B").models().count(), 3);
        assert_eq!(table("A | B").filtered(TruthTableEntry::False).count(), 1);
        assert_eq!(table("A | B").filtered(TruthTableEntry::Any).count(), 4);
    }

    #[test]
    fn relabel_result() {
        let t = table("A >> B").with_result_label("A >> B");
        assert_eq!(t.headers, vec!["A", "B", "A >> B"]);
        assert_eq!(t.result_label(), "A >> B");
    }
}
