pub mod driver;
pub mod report_descriptor;
