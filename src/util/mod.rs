pub mod bson_utils;
pub mod dates;
