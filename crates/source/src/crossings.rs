//! Surface crossing datasets exported to CSV
//!
//! Each record is the Cartesian position (cm) at which a particle crossed the
//! wall surface. Only the position is needed for wall loading, so any other
//! columns in the export are ignored.

// standard library
use std::io::Read;
use std::path::Path;

// crate modules
use crate::error::{Error, Result};

// external crates
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One row of the crossing dataset
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Crossing {
    x: f64,
    y: f64,
    z: f64,
}

/// Read surface crossing points from a CSV file
///
/// The file needs a header row naming the `x`, `y`, and `z` columns, in any
/// order. Values are in cm. Whitespace around fields is trimmed.
///
/// ```text
/// x,y,z
/// 612.4,10.2,-35.7
/// -580.1,144.9,88.0
/// ```
///
/// ```rust, no_run
/// # use nwl_source::read_crossings;
/// let points = read_crossings("crossings.csv").unwrap();
/// println!("{} crossings", points.len());
/// ```
///
/// An empty dataset is returned as-is. Rejecting it is left to the consumer.
pub fn read_crossings<P: AsRef<Path>>(path: P) -> Result<Vec<Vector3<f64>>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let points = deserialise_crossings(file)?;
    debug!("Read {} crossings from {}", points.len(), path.display());
    Ok(points)
}

/// Write surface crossing points to a CSV file with an `x,y,z` header
///
/// ```rust, no_run
/// # use nwl_source::write_crossings;
/// # use nalgebra::Vector3;
/// write_crossings("crossings.csv", &[Vector3::new(612.4, 10.2, -35.7)]).unwrap();
/// ```
pub fn write_crossings<P: AsRef<Path>>(path: P, points: &[Vector3<f64>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for point in points {
        writer.serialize(Crossing {
            x: point.x,
            y: point.y,
            z: point.z,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn deserialise_crossings<R: Read>(reader: R) -> Result<Vec<Vector3<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    reader
        .deserialize::<Crossing>()
        .enumerate()
        .map(|(record, crossing)| {
            let c = crossing?;
            if !(c.x.is_finite() && c.y.is_finite() && c.z.is_finite()) {
                return Err(Error::InvalidCrossing { record: record + 1 });
            }
            Ok(Vector3::new(c.x, c.y, c.z))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_in_any_order() {
        let text = "z, x, y, energy\n3.0, 1.0, 2.0, 14.1\n-1, 0.5, 7, 2.45\n";
        let points = deserialise_crossings(text.as_bytes()).unwrap();
        assert_eq!(
            points,
            vec![Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.5, 7.0, -1.0)]
        );
    }

    #[test]
    fn header_only_is_empty() {
        let points = deserialise_crossings("x,y,z\n".as_bytes()).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn missing_column() {
        let result = deserialise_crossings("x,y\n1,2\n".as_bytes());
        assert!(matches!(result, Err(Error::CSVError(_))));
    }

    #[test]
    fn non_finite_coordinates() {
        let result = deserialise_crossings("x,y,z\n1,2,3\n1,NaN,3\n".as_bytes());
        assert!(matches!(result, Err(Error::InvalidCrossing { record: 2 })));
    }
}
