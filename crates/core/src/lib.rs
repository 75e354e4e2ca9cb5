//! Domain logic for the wine inventory backend.
//!
//! Everything in this crate is pure: field schemas, the normalization
//! pipeline shared by create and partial-update writes, spreadsheet
//! encoding, import row mapping, and image upload rules. No module here
//! touches the database or the network.

pub mod error;
pub mod image;
pub mod ingredient;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod product;
pub mod schema;
pub mod spreadsheet;
pub mod transfer;
pub mod types;
pub mod validation;
