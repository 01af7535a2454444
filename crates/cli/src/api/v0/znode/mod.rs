pub mod get;
pub mod set_data;
