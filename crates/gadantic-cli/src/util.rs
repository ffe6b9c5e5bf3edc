use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::Context;
use gadantic_engine::Genotype;
use gadantic_evaluator::fitness::FitnessWeights;

/// Path that stands for standard input.
const STDIN_PATH: &str = "-";

/// Destination of a command's JSON result: a file, or standard output when no path is given.
pub struct Output {
    writer: Box<dyn Write>,
    label: String,
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => Output::create(path)?,
            None => Output::stdout(),
        };
        output.write_json(value)
    }

    pub fn stdout() -> Self {
        Self {
            writer: Box::new(io::stdout().lock()),
            label: "stdout".to_owned(),
        }
    }

    pub fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            label: path.display().to_string(),
        })
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let Self { writer, label } = self;
        serde_json::to_writer_pretty(&mut *writer, value)
            .with_context(|| format!("Failed to write JSON to {label}"))?;
        writeln!(writer)
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to finish writing {label}"))?;
        Ok(())
    }
}

/// Reads a JSON value from `path`, or from standard input when `path` is `-`.
pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    tracing::debug!(kind = file_kind, path = %path.display(), "reading JSON input");
    let reader: Box<dyn Read> = if path == Path::new(STDIN_PATH) {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;
        Box::new(BufReader::new(file))
    };

    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a genotype: a JSON array of 81 crop ids in row-major order.
///
/// # Errors
///
/// Returns error if the file cannot be read, is not JSON, or does not hold exactly 81 ids
/// in the catalog range.
pub fn read_genotype_file<P>(path: P) -> anyhow::Result<Genotype>
where
    P: AsRef<Path>,
{
    read_json_file("genotype", path)
}

/// Reads fitness weights; fields missing from the file keep their defaults.
pub fn read_weights_file<P>(path: P) -> anyhow::Result<FitnessWeights>
where
    P: AsRef<Path>,
{
    read_json_file("weights", path)
}
