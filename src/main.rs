use anyhow::Context;
use clap::Parser;
use rstt::parser_io::ParseTree;
use rstt::table_io::{write_table, TableFormat};
use rstt::{classify, generate_table, parse, translate, TruthTableEntry};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Prints truth tables of propositional formulas over the variables A to H", long_about = None)]
struct Args {
    #[clap(value_parser, value_name = "EXPRESSION")]
    /// Formulas to tabulate, e.g. "A ∧ B → ¬C" or "A & B >> ~C"
    expressions: Vec<String>,

    #[clap(short, long, value_parser, value_name = "FILE")]
    /// Read formulas from a file, one per line ('#' starts a comment line)
    input: Option<PathBuf>,

    #[clap(short, long, value_enum, default_value_t = TableFormat::Table)]
    /// Output format of the tables
    format: TableFormat,

    #[clap(long)]
    /// Label the result column in ASCII notation instead of logic glyphs
    ascii: bool,

    #[clap(long, value_parser, default_value = "any")]
    /// Only print rows with this result (true, false or any)
    filter: TruthTableEntry,

    #[clap(short, long, value_parser, value_name = "FILE")]
    /// Write the parse tree of the last valid formula to FILE in dot (GraphViz) format
    parse_tree: Option<PathBuf>,

    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Increase log verbosity (-v, -vv, -vvv)
    verbose: u8,
}

fn init_logger(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("could not initialize logger")
}

fn read_expressions(args: &Args) -> anyhow::Result<Vec<String>> {
    let mut expressions = args.expressions.clone();

    if let Some(path) = &args.input {
        let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;

        for line in BufReader::new(file).lines() {
            let line = line?;
            let line = line.trim();
            if !line.is_empty() && !line.starts_with('#') {
                expressions.push(line.to_string());
            }
        }
    }

    Ok(expressions)
}

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args_from(wild::args_os(), argfile::parse_fromfile, argfile::PREFIX)?;
    let args = Args::parse_from(args);

    init_logger(args.verbose)?;

    let expressions = read_expressions(&args)?;
    if expressions.is_empty() {
        anyhow::bail!("no expressions given");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failures = 0usize;
    let mut last_tree = None;

    for (i, text) in expressions.iter().enumerate() {
        let canonical = translate::to_canonical(text);

        let formula = match parse(&canonical) {
            Ok(formula) => formula,
            Err(err) => {
                log::info!("skipping table for {canonical:?}");
                eprintln!("Parsing failed for expression: {canonical}. {err}");
                failures += 1;
                continue;
            }
        };

        let mut table = generate_table(&formula);
        if args.ascii {
            table = table.with_result_label(formula.text.clone());
        }

        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "Main Logical Operator: {}", classify(&formula.expr))?;
        write_table(&mut out, &table, args.format, args.filter)?;

        let verdict = if table.is_tautology() {
            "tautology"
        } else if table.is_contradiction() {
            "contradiction"
        } else {
            "contingent"
        };
        writeln!(
            out,
            "{} of {} rows true ({verdict})",
            table.models().count(),
            table.rows.len()
        )?;

        last_tree = Some(ParseTree::new(&formula.expr));
    }

    if let (Some(path), Some(tree)) = (&args.parse_tree, &last_tree) {
        let mut f = File::create(path).with_context(|| format!("could not create {}", path.display()))?;
        tree.render_dot(&mut f)?;
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} expressions could not be parsed", expressions.len());
    }

    Ok(())
}
