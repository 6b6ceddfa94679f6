//! `nwl` is a modular toolkit for mapping neutron wall loading onto the first
//! wall of a toroidal fusion device
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use nwl_utils as utils;

#[cfg(feature = "equilibrium")]
#[cfg_attr(docsrs, doc(cfg(feature = "equilibrium")))]
#[doc(inline)]
pub use nwl_equilibrium as equilibrium;

#[cfg(feature = "flux")]
#[cfg_attr(docsrs, doc(cfg(feature = "flux")))]
#[doc(inline)]
pub use nwl_flux as flux;

#[cfg(feature = "loading")]
#[cfg_attr(docsrs, doc(cfg(feature = "loading")))]
#[doc(inline)]
pub use nwl_loading as loading;

#[cfg(feature = "source")]
#[cfg_attr(docsrs, doc(cfg(feature = "source")))]
#[doc(inline)]
pub use nwl_source as source;
