//! JSON persistence for [FourierEquilibrium]

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::fourier::FourierEquilibrium;

/// Read a [FourierEquilibrium] from a JSON file
///
/// The `path` takes anything that can be turned into a `Path` reference, such
/// as a [&str], [String], [Path], etc...
///
/// The equilibrium is validated before being returned.
///
/// ```json
/// {
///     "nfp": 1,
///     "boundary": [
///         { "m": 0, "n": 0, "rmnc": 5.0 },
///         { "m": 1, "n": 0, "rmnc": 1.0, "zmns": 1.0 }
///     ]
/// }
/// ```
///
/// ```rust, no_run
/// # use nwl_equilibrium::{read_json, FourierEquilibrium};
/// let equilibrium: FourierEquilibrium = read_json("path/to/equilibrium.json").unwrap();
/// ```
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<FourierEquilibrium> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let equilibrium: FourierEquilibrium = serde_json::from_reader(reader)?;
    equilibrium.validate()?;
    Ok(equilibrium)
}

/// Write a [FourierEquilibrium] to a pretty JSON file
///
/// ```rust, no_run
/// # use nwl_equilibrium::{write_json, FourierEquilibrium};
/// let torus = FourierEquilibrium::circular(5.0, 1.0);
/// write_json(&torus, "torus.json").unwrap();
/// ```
pub fn write_json<P: AsRef<Path>>(equilibrium: &FourierEquilibrium, path: P) -> Result<()> {
    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(writer, equilibrium)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn json_round_trip() {
        let path = std::env::temp_dir().join("nwl_equilibrium_round_trip.json");
        let torus = FourierEquilibrium::elliptical(6.2, 2.0, 1.7);

        write_json(&torus, &path).unwrap();
        let read = read_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(torus, read);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let text = r#"{ "boundary": [ { "m": 0, "n": 0, "rmnc": 5.0 } ] }"#;
        let eq: FourierEquilibrium = serde_json::from_str(text).unwrap();
        assert_eq!(eq.nfp, 1);
        assert!(eq.axis.is_empty());
        assert_eq!(eq.boundary[0].zmns, 0.0);
    }

    #[test]
    fn empty_boundary_rejected_on_read() {
        let path = std::env::temp_dir().join("nwl_equilibrium_empty.json");
        std::fs::write(&path, r#"{ "nfp": 3, "boundary": [] }"#).unwrap();
        let result = read_json(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(Error::NoBoundaryModes)));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_json("/definitely/not/a/real/equilibrium.json"),
            Err(Error::IOError(_))
        ));
    }
}
