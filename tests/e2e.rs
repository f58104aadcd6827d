use pretty_assertions::assert_eq;
use rstt::truth_table::{generate_table, Row, TruthTable};
use rstt::{classify, parse, translate, MainOperator, ParseError};
use std::fs;
use std::path::Path;

/// Runs the full translate, parse, tabulate pipeline on glyph notation.
fn tabulate(input: &str) -> Result<TruthTable, ParseError> {
    let formula = parse(&translate::to_canonical(input))?;
    Ok(generate_table(&formula))
}

fn main_operator(input: &str) -> Result<MainOperator, ParseError> {
    Ok(classify(&parse(&translate::to_canonical(input))?.expr))
}

fn row(values: &[bool], result: bool) -> Row {
    Row {
        values: values.to_vec(),
        result,
    }
}

fn file_formulas<P: AsRef<Path>>(file: P) -> Vec<String> {
    fs::read_to_string(file)
        .expect("Could not read input file")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_and() -> Result<(), ParseError> {
    assert_eq!(translate::to_canonical("A ∧ B"), "A & B");

    let table = tabulate("A ∧ B")?;
    assert_eq!(table.headers, vec!["A", "B", "A ∧ B"]);
    assert_eq!(
        table.rows,
        vec![
            row(&[true, true], true),
            row(&[true, false], false),
            row(&[false, true], false),
            row(&[false, false], false),
        ]
    );
    assert_eq!(main_operator("A ∧ B")?, MainOperator::And);

    Ok(())
}

#[test]
fn test_implies_vacuous_truth() -> Result<(), ParseError> {
    assert_eq!(translate::to_canonical("A → B"), "A >> B");

    let table = tabulate("A → B")?;
    assert!(table.rows.contains(&row(&[false, true], true)));
    assert!(table.rows.contains(&row(&[true, false], false)));
    assert_eq!(main_operator("A → B")?, MainOperator::Implies);

    Ok(())
}

#[test]
fn test_not() -> Result<(), ParseError> {
    assert_eq!(translate::to_canonical("¬A"), "~A");

    let table = tabulate("¬A")?;
    assert_eq!(table.rows, vec![row(&[true], false), row(&[false], true)]);
    assert_eq!(main_operator("¬A")?, MainOperator::Not);

    Ok(())
}

#[test]
fn test_bare_variable() -> Result<(), ParseError> {
    assert_eq!(main_operator("A")?, MainOperator::None);
    assert_eq!(main_operator("A")?.to_string(), "None");
    Ok(())
}

#[test]
fn test_malformed() {
    assert!(tabulate("A ∧").is_err());
    assert!(tabulate("(A ∨ B").is_err());
    assert!(tabulate("A ⊕ B").is_err());
    assert!(tabulate("   ").is_err());
}

#[test]
fn test_eight_variables() -> Result<(), ParseError> {
    let table = tabulate("A ∧ B ∨ C → D ↔ ¬E ∧ (F ∨ G ∨ H)")?;

    assert_eq!(table.vars.len(), 8);
    assert_eq!(table.rows.len(), 256);
    assert_eq!(table.headers.len(), 9);
    assert!(table.rows.iter().all(|row| row.width() == 9));

    Ok(())
}

#[test]
fn test_row_count() -> Result<(), ParseError> {
    let inputs = ["True", "A", "A ∨ B", "(A ∧ B) → C", "A ↔ (B ∨ (C ∧ D))", "A → B → C → D → E"];

    for input in inputs {
        let table = tabulate(input)?;
        let n = table.vars.len();
        assert_eq!(table.rows.len(), 1 << n);
        assert!(table.rows.iter().all(|row| row.columns().count() == n + 1));
    }

    Ok(())
}

#[test]
fn test_repeated_variables() -> Result<(), ParseError> {
    let table = tabulate("B ∧ A ∧ B ∨ ¬A")?;
    assert_eq!(table.headers, vec!["A", "B", "B ∧ A ∧ B ∨ ¬A"]);
    assert_eq!(table.rows.len(), 4);
    Ok(())
}

#[test]
fn test_result_label_round_trip() -> Result<(), ParseError> {
    let inputs = ["A ∧ B → ¬C", "(A ↔ B) ∨ ¬(C ∧ D)", "¬¬A"];

    for input in inputs {
        let table = tabulate(input)?;
        assert_eq!(table.result_label(), input);
    }

    // canonical input is shown with glyphs
    assert_eq!(tabulate("A & ~B")?.result_label(), "A ∧ ¬B");

    Ok(())
}

#[test]
fn test_files_tautology() -> Result<(), ParseError> {
    for file in glob::glob("tests/data/*_is_tautology.txt").expect("valid glob") {
        let f = file.expect("readable path");
        println!("testing {}", f.display());
        for formula in file_formulas(&f) {
            assert!(tabulate(&formula)?.is_tautology(), "{formula}");
        }
    }
    Ok(())
}

#[test]
fn test_files_contradiction() -> Result<(), ParseError> {
    for file in glob::glob("tests/data/*_is_contradiction.txt").expect("valid glob") {
        let f = file.expect("readable path");
        println!("testing {}", f.display());
        for formula in file_formulas(&f) {
            assert!(tabulate(&formula)?.is_contradiction(), "{formula}");
        }
    }
    Ok(())
}
