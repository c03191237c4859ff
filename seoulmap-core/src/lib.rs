//! Browser-free logic for the Seoul tourism map: catalog filtering, name
//! normalization, image candidate resolution and the page state machines.

pub mod carousel;
pub mod catalog;
pub mod filter;
pub mod images;
pub mod labels;
pub mod navigator;
pub mod normalize;
pub mod query;
pub mod scroll;
