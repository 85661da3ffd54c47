pub mod gps;
pub mod orientation;
pub mod reader;
pub mod tags;
pub mod value;

pub use gps::{convert, extract, Coordinate, GpsBlock, GpsKey};
pub use orientation::{apply_orientation, correct, correct_with, Rotation};
pub use reader::{read, try_read};
pub use value::{ExifValue, TagMap};
