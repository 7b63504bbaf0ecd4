pub mod rakk_bulus;

use crate::fixup::ReportFixup;

/// Returns the report descriptor fixups compiled into this binary
pub fn builtin_fixups() -> Vec<ReportFixup> {
    vec![
        rakk_bulus::driver::FIXUP.clone(),
        rakk_bulus::driver::BLUETOOTH_FIXUP.clone(),
    ]
}
