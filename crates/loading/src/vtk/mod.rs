//! Conversion of wall loading fields to VTK for ParaView and VisIt

// Split into subfiles for development, but anything important is re-exported
mod builder;
mod convert;

// standard library
use std::path::Path;

// crate modules
use crate::error::Result;
use crate::field::NwlField;

#[doc(inline)]
pub use builder::FieldToVtkBuilder;

#[doc(inline)]
pub use convert::FieldToVtk;

// Re-exports of the vtkio types needed for configuration
pub use vtkio::model::{ByteOrder, Vtk};

/// Available VTK output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VtkFormat {
    /// XML rectilinear grid (`.vtr`)
    #[default]
    Xml,
    /// Legacy ASCII (`.vtk`)
    LegacyAscii,
    /// Legacy binary (`.vtk`)
    LegacyBinary,
}

impl VtkFormat {
    /// File extension conventionally used for the format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xml => "vtr",
            Self::LegacyAscii | Self::LegacyBinary => "vtk",
        }
    }
}

/// Convert a field to a VTK rectilinear grid with the default settings
///
/// See [FieldToVtk] for the available options.
pub fn field_to_vtk(field: &NwlField) -> Vtk {
    FieldToVtk::default().convert(field)
}

/// Write a VTK object to `path` in the requested format
///
/// The extension of `path` is replaced with the one expected for the format.
///
/// ```rust, no_run
/// # use nwl_loading::vtk::{field_to_vtk, write_vtk, VtkFormat};
/// # use nwl_loading::NwlField;
/// # fn example(field: &NwlField) {
/// let vtk = field_to_vtk(field);
/// write_vtk(vtk, "nwl", VtkFormat::Xml).unwrap();
/// # }
/// ```
pub fn write_vtk<P: AsRef<Path>>(vtk: Vtk, path: P, format: VtkFormat) -> Result<()> {
    let path = path.as_ref().with_extension(format.extension());
    match format {
        VtkFormat::Xml | VtkFormat::LegacyBinary => vtk.export(&path)?,
        VtkFormat::LegacyAscii => vtk.export_ascii(&path)?,
    }
    Ok(())
}
