//! Background baseline module

mod model;
mod store;
mod tiff_store;

pub use model::BackgroundModel;
pub use store::BaselineStore;
pub use tiff_store::TiffBaselineStore;
