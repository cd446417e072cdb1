pub mod compliance;
pub mod deductions;
pub mod export;
pub mod invoice;
pub mod pricing;
pub mod records;
pub mod report;
pub mod schema;
pub mod summary;
pub mod validate;

use crate::records::Records;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read records from a CSV or JSON file (or stdin with "-", JSON only)
pub fn read_records(path: &Path) -> anyhow::Result<Records> {
    if path.as_os_str() == "-" {
        return read_from_stdin();
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    if path.extension().is_some_and(|ext| ext == "json") {
        crate::records::read_json(reader)
    } else {
        crate::records::read_csv(reader)
    }
}

fn read_from_stdin() -> anyhow::Result<Records> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    crate::records::read_json(io::Cursor::new(buffer))
}
