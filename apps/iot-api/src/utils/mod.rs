pub mod response;

pub use response::{reading_to_dto, sensor_to_dto};
