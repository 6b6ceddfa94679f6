//! Write operations for wall loading fields

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::field::NwlField;

/// Write a [NwlField] to a JSON file
///
/// A direct serialisation of the field, including the bin grid, the raw
/// counts, the normalisation factor, and the fit audit.
///
/// ```rust, no_run
/// # use nwl_loading::{write_json, NwlField};
/// # fn example(field: &NwlField) {
/// write_json(field, "nwl.json").unwrap();
/// # }
/// ```
pub fn write_json<P: AsRef<Path>>(field: &NwlField, path: P) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, field)?;
    Ok(())
}

/// Read a [NwlField] back from a JSON file written by [write_json()]
///
/// The field is checked against its own bin grid before it is returned, see
/// [NwlField::validate()].
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<NwlField> {
    let reader = BufReader::new(File::open(path)?);
    let field: NwlField = serde_json::from_reader(reader)?;
    field.validate()?;
    Ok(field)
}
