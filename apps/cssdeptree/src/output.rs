use anyhow::Result;
use cssdeptree_core::AggregateOutput;
use std::io::Write;

pub enum Output {
    Aggregate(AggregateOutput),
    Lines(Vec<String>),
}

/// Writes an aggregate as pretty (2-space) or compact JSON, and a bare list
/// one entry per line.
pub fn write_output<W: Write>(writer: &mut W, output: &Output, compress: bool) -> Result<()> {
    match output {
        Output::Aggregate(aggregate) => {
            if compress {
                serde_json::to_writer(&mut *writer, aggregate)?;
            } else {
                serde_json::to_writer_pretty(&mut *writer, aggregate)?;
            }
            writeln!(writer)?;
        }
        Output::Lines(lines) => {
            for line in lines {
                writeln!(writer, "{}", line)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}
