pub mod item;

#[cfg(test)]
pub mod item_test;

pub use item::{Item, ItemError, ItemType, Items};

pub const USAGE_PAGE_GENERIC_DESKTOP: u32 = 0x01;
pub const USAGE_PAGE_BUTTON: u32 = 0x09;

const TAG_USAGE_PAGE: u8 = 0x04;
const TAG_REPORT_ID: u8 = 0x84;
const TAG_USAGE_MAXIMUM: u8 = 0x28;

/// Returns an iterator over the items in the given report descriptor
pub fn items(rdesc: &[u8]) -> Items<'_> {
    Items::new(rdesc)
}

/// Returns the first Usage Maximum declared on the given usage page. Extended
/// (4 byte) usages carry their own page in the upper 16 bits.
pub fn usage_maximum(rdesc: &[u8], usage_page: u32) -> Option<u32> {
    let mut current_page = 0;
    for item in items(rdesc) {
        let item = item.ok()?;
        match item.tag() {
            Some(TAG_USAGE_PAGE) => current_page = item.unsigned(),
            Some(TAG_USAGE_MAXIMUM) => {
                let value = item.unsigned();
                let (page, usage) = if item.data.len() == 4 {
                    (value >> 16, value & 0xFFFF)
                } else {
                    (current_page, value)
                };
                if page == usage_page {
                    return Some(usage);
                }
            }
            _ => (),
        }
    }
    None
}

/// Returns all report IDs declared in the given report descriptor
pub fn report_ids(rdesc: &[u8]) -> Vec<u8> {
    items(rdesc)
        .map_while(Result::ok)
        .filter(|item| item.tag() == Some(TAG_REPORT_ID))
        .map(|item| item.unsigned() as u8)
        .collect()
}
