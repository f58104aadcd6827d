use crate::truth_table::{TruthTable, TruthTableEntry};
use std::io;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TableFormat {
    /// Aligned plain-text columns
    #[default]
    Table,
    /// Comma separated values with a header record
    Csv,
    /// GitHub flavoured markdown table
    Markdown,
}

/// Writes the rows of `table` selected by `filter` in the requested format.
pub fn write_table<W: Write>(
    writer: &mut W,
    table: &TruthTable,
    format: TableFormat,
    filter: TruthTableEntry,
) -> io::Result<()> {
    match format {
        TableFormat::Table => write_plain(writer, table, filter),
        TableFormat::Csv => write_csv(writer, table, filter),
        TableFormat::Markdown => write_markdown(writer, table, filter),
    }
}

fn column_widths(table: &TruthTable) -> Vec<usize> {
    let value_width = TruthTableEntry::False.to_string().len();

    table
        .headers
        .iter()
        .map(|header| header.chars().count().max(value_width))
        .collect()
}

fn write_plain<W: Write>(
    writer: &mut W,
    table: &TruthTable,
    filter: TruthTableEntry,
) -> io::Result<()> {
    let widths = column_widths(table);

    let header = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(writer, "{}", header.trim_end())?;

    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    writeln!(writer, "{rule}")?;

    for row in table.filtered(filter) {
        let line = row
            .columns()
            .zip(&widths)
            .map(|(value, &w)| format!("{:<w$}", TruthTableEntry::from(value)))
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

fn write_csv<W: Write>(writer: &mut W, table: &TruthTable, filter: TruthTableEntry) -> io::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(&table.headers)?;

    for row in table.filtered(filter) {
        csv_writer.write_record(row.columns().map(|value| TruthTableEntry::from(value).to_string()))?;
    }

    csv_writer.flush()
}

fn write_markdown<W: Write>(
    writer: &mut W,
    table: &TruthTable,
    filter: TruthTableEntry,
) -> io::Result<()> {
    let escape = |s: &str| s.replace('|', "\\|");

    writeln!(
        writer,
        "| {} |",
        table.headers.iter().map(|h| escape(h.as_str())).collect::<Vec<_>>().join(" | ")
    )?;
    writeln!(writer, "|{}", ":-:|".repeat(table.headers.len()))?;

    for row in table.filtered(filter) {
        writeln!(
            writer,
            "| {} |",
            row.columns()
                .map(|value| TruthTableEntry::from(value).to_string())
                .collect::<Vec<_>>()
                .join(" | ")
        )?;
    }

    Ok(())
}
