//! Read and write source strength profiles
//!
//! A profile is a plain text file with one strength (n/s) per line, one line
//! per source element, in source element order.

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::parsers::single_f64;

// external crates
use log::debug;

/// Read a source strength profile from a text file
///
/// Every line must hold exactly one finite, non-negative number. Surrounding
/// whitespace is ignored. Values are returned in file order.
///
/// ```rust, no_run
/// # use nwl_source::read_strengths;
/// let strengths = read_strengths("strengths.txt").unwrap();
/// println!("{} source elements", strengths.len());
/// ```
///
/// Fails on a missing or unreadable file, an empty file, any line that is
/// not a single number, and any negative or non-finite value.
pub fn read_strengths<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let strengths = parse_strengths(&content)?;
    debug!("Read {} source strengths from {}", strengths.len(), path.display());
    Ok(strengths)
}

/// Parse a source strength profile held in memory
///
/// Same rules as [read_strengths()], useful when the profile did not come
/// from a file.
///
/// ```rust
/// # use nwl_source::{parse_strengths, Error};
/// assert_eq!(parse_strengths("1.0\n 2.5e3 \n").unwrap(), vec![1.0, 2500.0]);
///
/// // line numbers start at 1
/// assert!(matches!(
///     parse_strengths("1.0\n-2.0\n"),
///     Err(Error::InvalidStrength { line: 2, .. })
/// ));
/// ```
pub fn parse_strengths(content: &str) -> Result<Vec<f64>> {
    let strengths = content
        .lines()
        .enumerate()
        .map(|(i, line)| parse_line(i + 1, line))
        .collect::<Result<Vec<f64>>>()?;

    if strengths.is_empty() {
        return Err(Error::EmptyStrengths);
    }

    Ok(strengths)
}

/// Interpret a single 1-based line of a profile
fn parse_line(line: usize, content: &str) -> Result<f64> {
    let (_, value) = single_f64(content).map_err(|_| Error::InvalidLine {
        line,
        content: content.to_string(),
    })?;

    check_strength(line, value)
}

/// Write a source strength profile to a text file
///
/// One value per line, newline terminated. Values are written with the
/// shortest representation that parses back to the identical `f64`, so
/// [read_strengths()] recovers exactly what was written.
///
/// ```rust, no_run
/// # use nwl_source::write_strengths;
/// write_strengths("strengths.txt", &[1.2e17, 8.4e16]).unwrap();
/// ```
pub fn write_strengths<P: AsRef<Path>>(path: P, strengths: &[f64]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for strength in strengths {
        writeln!(writer, "{strength:?}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Total source strength of a profile (n/s)
///
/// ```rust
/// # use nwl_source::total_strength;
/// assert_eq!(total_strength(&[1.0, 2.0, 0.5]).unwrap(), 3.5);
/// assert!(total_strength(&[]).is_err());
///
/// // values are held to the same rules as a strength file
/// assert!(total_strength(&[1.0, -2.0]).is_err());
/// ```
pub fn total_strength(strengths: &[f64]) -> Result<f64> {
    if strengths.is_empty() {
        return Err(Error::EmptyStrengths);
    }

    strengths
        .iter()
        .enumerate()
        .map(|(index, value)| check_strength(index + 1, *value))
        .sum()
}

/// Strengths must be finite and non-negative, `line` is 1-based
fn check_strength(line: usize, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidStrength { line, value });
    }
    Ok(value)
}
