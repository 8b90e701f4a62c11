mod photo;

pub use photo::{Photo, PhotoWithStatistics};
