// standard library
use std::ops::RangeInclusive;

// crate modules
use crate::field::NwlField;
use crate::vtk::builder::FieldToVtkBuilder;

// external crates
use vtkio::model::{
    Attribute, Attributes, ByteOrder, Coordinates, DataArray, DataSet, ElementType, Extent,
    IOBuffer, RangeExtent, RectilinearGridPiece, Version, Vtk,
};

/// Convert wall loading fields to a VTK rectilinear grid
///
/// The grid is flat, with toroidal angle along x and poloidal angle along y,
/// both in degrees. Every bin is one cell spanning its window, so the cell
/// edges sit half a bin width either side of the bin centres.
///
/// Two cell data arrays are written:
/// - `NWL (MW)` - wall loading
/// - `counts` - raw crossing counts
///
/// ```rust
/// # use nwl_loading::vtk::FieldToVtk;
/// # use nwl_loading::{BinGrid, CountMatrix, FitAudit, NwlField};
/// let grid = BinGrid::new(1.0, 2.0, 3, 4).unwrap();
/// let field = NwlField::new(grid, CountMatrix::zeros(3, 4), 1.0, FitAudit::default());
///
/// let vtk = FieldToVtk::new().convert(&field);
/// assert_eq!(vtk.title, "Neutron wall loading");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldToVtk {
    /// Byte ordering as big or little endian
    pub byte_order: ByteOrder,
    /// Title written to the file header
    pub title: String,
}

impl FieldToVtk {
    /// Start with the default configuration
    pub fn new() -> FieldToVtk {
        Default::default()
    }

    /// Get an instance of the [FieldToVtkBuilder]
    pub fn builder() -> FieldToVtkBuilder {
        FieldToVtkBuilder::default()
    }

    /// Convert a [NwlField] to a Vtk object ready for writing
    pub fn convert(&self, field: &NwlField) -> Vtk {
        Vtk {
            version: Version::Auto,
            title: self.title.clone(),
            byte_order: self.byte_order,
            file_path: None,
            data: DataSet::inline(RectilinearGridPiece {
                extent: Self::extent(field),
                coords: Self::coordinates(field),
                data: Self::collect_attributes(field),
            }),
        }
    }
}

impl Default for FieldToVtk {
    fn default() -> Self {
        FieldToVtkBuilder::default().build()
    }
}

impl FieldToVtk {
    /// Number of cells in each direction, flat in z
    fn extent(field: &NwlField) -> Extent {
        let (phi_bins, theta_bins) = field.shape();
        let range_ext: RangeExtent = [
            RangeInclusive::new(0, phi_bins as i32),
            RangeInclusive::new(0, theta_bins as i32),
            RangeInclusive::new(0, 0),
        ];
        Extent::Ranges(range_ext)
    }

    /// Cell edges in degrees from the bin centres
    fn coordinates(field: &NwlField) -> Coordinates {
        Coordinates {
            x: IOBuffer::F64(Self::edges(field.phi(), field.grid.half_phi)),
            y: IOBuffer::F64(Self::edges(field.theta(), field.grid.half_theta)),
            z: IOBuffer::F64(vec![0.0]),
        }
    }

    fn edges(centres: &[f64], half_width: f64) -> Vec<f64> {
        centres
            .iter()
            .map(|c| c - half_width)
            .chain(centres.last().map(|c| c + half_width))
            .map(f64::to_degrees)
            .collect()
    }

    /// Cell data with x (toroidal) varying fastest
    fn collect_attributes(field: &NwlField) -> Attributes {
        let nwl = field.theta_major().concat();

        let (phi_bins, theta_bins) = field.shape();
        let counts = (0..theta_bins)
            .flat_map(|j| (0..phi_bins).map(move |i| (i, j)))
            .map(|(i, j)| field.counts.get(i, j))
            .collect::<Vec<f64>>();

        let mut attributes = Attributes::new();
        for (name, values) in [("NWL (MW)", nwl), ("counts", counts)] {
            attributes.cell.push(Attribute::DataArray(DataArray {
                name: name.to_string(),
                elem: ElementType::Scalars {
                    num_comp: 1,
                    lookup_table: None,
                },
                data: IOBuffer::F64(values),
            }));
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinGrid, CountMatrix, FitAudit};
    use vtkio::model::Piece;

    fn field() -> NwlField {
        let grid = BinGrid::new(1.0, 2.0, 2, 3).unwrap();
        let mut counts = CountMatrix::zeros(2, 3);
        counts.apply(&[(1, 0), (0, 2)]);
        NwlField::new(grid, counts, 3.0, FitAudit::default())
    }

    #[test]
    fn cell_edges_span_the_windows() {
        let edges = FieldToVtk::edges(&[0.0, 0.5, 1.0], 0.25);
        let expected = [-0.25_f64, 0.25, 0.75, 1.25].map(f64::to_degrees);
        assert_eq!(edges, expected.to_vec());
    }

    #[test]
    fn toroidal_index_varies_fastest() {
        let vtk = FieldToVtk::new().convert(&field());
        let DataSet::RectilinearGrid { pieces, .. } = vtk.data else {
            panic!("expected a rectilinear grid");
        };

        let Piece::Inline(piece) = &pieces[0] else {
            panic!("expected inline piece data");
        };
        let Attribute::DataArray(nwl) = &piece.data.cell[0] else {
            panic!("expected a data array");
        };

        assert_eq!(nwl.name, "NWL (MW)");
        assert_eq!(
            nwl.data,
            IOBuffer::F64(vec![0.0, 3.0, 0.0, 0.0, 3.0, 0.0])
        );
        assert_eq!(piece.data.cell.len(), 2);
    }
}
