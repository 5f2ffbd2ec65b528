//! # Result Writers
//!
//! Persists scan results as text lines or a JSON array. Both formats are
//! sorted by name, record type and address so runs can be diffed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cloudrip_common::config::OutputFormat;
use cloudrip_common::error::OutputError;
use cloudrip_common::network::record::ResultEntry;
use cloudrip_common::scan::ResultMap;

/// All entries in output order. `results` itself is left untouched.
pub fn flatten_sorted(results: &ResultMap) -> Vec<&ResultEntry> {
    let mut entries: Vec<&ResultEntry> = results.values().flatten().collect();
    entries.sort_by(|a, b| {
        a.fqdn
            .cmp(&b.fqdn)
            .then(a.record_type.cmp(&b.record_type))
            .then(a.ip.cmp(&b.ip))
    });
    entries
}

pub fn write_text<W: Write>(out: &mut W, entries: &[&ResultEntry]) -> Result<(), OutputError> {
    for entry in entries {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, entries: &[&ResultEntry]) -> Result<(), OutputError> {
    serde_json::to_writer_pretty(&mut *out, entries)?;
    writeln!(out)?;
    Ok(())
}

pub fn save(results: &ResultMap, path: &Path, format: OutputFormat) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);
    let entries = flatten_sorted(results);

    match format {
        OutputFormat::Text => write_text(&mut out, &entries)?,
        OutputFormat::Json => write_json(&mut out, &entries)?,
    }
    out.flush()?;
    Ok(())
}
