use super::classify_file;
use crate::cli::{TableArgs, TableFormat};
use anyhow::Result;
use effectoro_core::ClassificationTable;
use std::io::{self, Write};

pub fn execute(args: TableArgs) -> Result<()> {
    let (_, run) = classify_file(&args.input, &args.model.model, args.precision)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        TableFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &run.table)?;
            writeln!(out)?;
        }
        TableFormat::Tsv => write_tsv(&run.table, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn write_tsv<W: Write>(table: &ClassificationTable, mut out: W) -> io::Result<()> {
    writeln!(out, "Protein ID\tProbability\tClassification\tPrediction")?;
    for record in table {
        writeln!(
            out,
            "{}\t{:?}\t{}\t{}",
            record.protein_id,
            record.probability,
            record.predicted_class.as_raw(),
            record.label()
        )?;
    }
    Ok(())
}
