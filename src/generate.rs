use std::fs::{self, File};
use std::io::Write;

use hid_fixup::config::ReportFixupConfig;
use schemars::schema_for;

const SCHEMA_DIR: &str = "./rootfs/usr/share/hid-fixup/schema";

fn main() {
    let report_fixup_schema = schema_for!(ReportFixupConfig);
    fs::create_dir_all(SCHEMA_DIR).expect("Failed to create schema directory");
    let mut file = File::create(format!("{SCHEMA_DIR}/report_fixup_v1.json"))
        .expect("Failed to create schema file");
    write!(
        file,
        "{}",
        serde_json::to_string_pretty(&report_fixup_schema).unwrap()
    )
    .expect("Failed to write schema");
}
