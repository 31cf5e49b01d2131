use super::classify_file;
use crate::cli::PredictArgs;
use anyhow::Result;
use effectoro_io::write_outputs;

pub fn execute(args: PredictArgs) -> Result<()> {
    let (sequences, run) = classify_file(&args.input, &args.model.model, args.precision)?;
    write_outputs(&run.table, &sequences, &args.out_dir)?;
    Ok(())
}
