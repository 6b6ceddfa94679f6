// crate modules
use crate::vtk::convert::FieldToVtk;
use crate::vtk::ByteOrder;

/// Builder implementation for [FieldToVtk] configuration
///
/// Chain any number of setters and call [build()](FieldToVtkBuilder::build)
/// for the final converter.
///
/// ```rust
/// # use nwl_loading::vtk::{ByteOrder, FieldToVtk};
/// let converter = FieldToVtk::builder()
///     .byte_order(ByteOrder::LittleEndian)
///     .title("NWL for the 90 degree sector")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct FieldToVtkBuilder {
    /// Byte ordering as big or little endian
    byte_order: ByteOrder,
    /// Title written to the file header
    title: String,
}

impl FieldToVtkBuilder {
    /// Create a new instance of the builder with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the [FieldToVtk] type
    pub fn build(self) -> FieldToVtk {
        FieldToVtk {
            byte_order: self.byte_order,
            title: self.title,
        }
    }

    /// Set the byte ordering
    ///
    /// VisIt only reads big endian binary files, which is the default.
    /// ParaView does not care.
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = order;
        self
    }

    /// Set the title written to the file header
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

impl Default for FieldToVtkBuilder {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            title: "Neutron wall loading".to_string(),
        }
    }
}
