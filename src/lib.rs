pub mod config;
pub mod paths;
pub mod raster;
pub mod rle;

mod parse_util;
