use crate::hid::{
    items, report_ids, usage_maximum, ItemError, ItemType, USAGE_PAGE_BUTTON,
    USAGE_PAGE_GENERIC_DESKTOP,
};

#[test]
fn test_short_items() {
    let rdesc = [
        0x05, 0x01, // Usage Page (Generic Desktop)
        0x16, 0x01, 0x80, // Logical Minimum (-32767)
        0x27, 0xff, 0xff, 0x00, 0x00, // Logical Maximum (65535)
        0xc0, // End Collection
    ];
    let parsed: Vec<_> = items(&rdesc).map(|item| item.unwrap()).collect();
    assert_eq!(parsed.len(), 4);

    assert_eq!(parsed[0].offset, 0);
    assert_eq!(parsed[0].tag(), Some(0x04));
    assert_eq!(parsed[0].long_tag(), None);
    assert_eq!(parsed[0].item_type(), ItemType::Global);
    assert_eq!(parsed[0].name(), "Usage Page");
    assert_eq!(parsed[0].unsigned(), 1);

    assert_eq!(parsed[1].offset, 2);
    assert_eq!(parsed[1].data, &[0x01, 0x80]);
    assert_eq!(parsed[1].signed(), -32767);
    assert_eq!(parsed[1].unsigned(), 0x8001);

    // Size bits 0b11 means four bytes of data
    assert_eq!(parsed[2].offset, 5);
    assert_eq!(parsed[2].data.len(), 4);
    assert_eq!(parsed[2].signed(), 65535);

    assert_eq!(parsed[3].item_type(), ItemType::Main);
    assert_eq!(parsed[3].name(), "End Collection");
    assert!(parsed[3].data.is_empty());
    assert_eq!(parsed[3].signed(), 0);
}

#[test]
fn test_local_items() {
    let rdesc = [0x09, 0x30, 0x19, 0x01, 0x29, 0x05];
    let names: Vec<_> = items(&rdesc)
        .map(|item| item.unwrap())
        .map(|item| {
            assert_eq!(item.item_type(), ItemType::Local);
            item.name()
        })
        .collect();
    assert_eq!(names, vec!["Usage", "Usage Minimum", "Usage Maximum"]);
}

#[test]
fn test_long_item_is_skipped() {
    let rdesc = [
        0xfe, 0x02, 0xf0, 0xaa, 0xbb, // Long item, 2 bytes of data, tag 0xf0
        0x85, 0x02, // Report ID (2)
    ];
    let parsed: Vec<_> = items(&rdesc).map(|item| item.unwrap()).collect();
    assert_eq!(parsed.len(), 2);
    assert!(parsed[0].is_long());
    assert_eq!(parsed[0].tag(), None);
    assert_eq!(parsed[0].long_tag(), Some(0xf0));
    assert_eq!(parsed[0].data, &[0xaa, 0xbb]);
    assert_eq!(parsed[0].item_type(), ItemType::Reserved);
    assert_eq!(parsed[1].offset, 5);
    assert_eq!(report_ids(&rdesc), vec![0x02]);
}

#[test]
fn test_long_item_tags_do_not_alias_short_items() {
    // Long items tagged 0x84 and 0x28 are not Report ID or Usage Maximum
    let rdesc = [0xfe, 0x01, 0x84, 0x07, 0x85, 0x02];
    assert_eq!(report_ids(&rdesc), vec![0x02]);

    let rdesc = [
        0x05, 0x09, // Usage Page (Button)
        0xfe, 0x01, 0x28, 0x07, // Long item, tag 0x28
        0x29, 0x05, // Usage Maximum (5)
    ];
    assert_eq!(usage_maximum(&rdesc, USAGE_PAGE_BUTTON), Some(5));

    let rdesc = [0xfe, 0x01, 0x04, 0x09, 0x29, 0x05];
    assert_eq!(usage_maximum(&rdesc, USAGE_PAGE_BUTTON), None);

    let item = items(&rdesc).next().unwrap().unwrap();
    assert_eq!(item.name(), "Long Item");
    assert_eq!(item.to_string(), "Long Item");
}

#[test]
fn test_truncated_item() {
    let rdesc = [0x05, 0x01, 0x26, 0xff];
    let mut iter = items(&rdesc);
    assert!(iter.next().unwrap().is_ok());
    assert_eq!(
        iter.next().unwrap(),
        Err(ItemError::Truncated {
            offset: 2,
            needed: 3,
            available: 2,
        })
    );
    assert!(iter.next().is_none());
}

#[test]
fn test_truncated_long_item_header() {
    let rdesc = [0xfe, 0x10];
    let mut iter = items(&rdesc);
    assert!(matches!(
        iter.next(),
        Some(Err(ItemError::Truncated { offset: 0, .. }))
    ));
    assert!(iter.next().is_none());
}

#[test]
fn test_item_display() {
    let rdesc = [0x15, 0x81, 0x09, 0x38, 0xc0];
    let lines: Vec<String> = items(&rdesc)
        .map(|item| item.unwrap().to_string())
        .collect();
    assert_eq!(
        lines,
        vec!["Logical Minimum (-127)", "Usage (0x38)", "End Collection"]
    );
}

#[test]
fn test_usage_maximum_by_page() {
    let rdesc = [
        0x05, 0x01, // Usage Page (Generic Desktop)
        0x19, 0x30, // Usage Minimum (X)
        0x29, 0x32, // Usage Maximum (Z)
        0x05, 0x09, // Usage Page (Button)
        0x19, 0x01, // Usage Minimum (1)
        0x29, 0x03, // Usage Maximum (3)
    ];
    assert_eq!(usage_maximum(&rdesc, USAGE_PAGE_BUTTON), Some(3));
    assert_eq!(usage_maximum(&rdesc, USAGE_PAGE_GENERIC_DESKTOP), Some(0x32));
    assert_eq!(usage_maximum(&rdesc, 0x0C), None);
}

#[test]
fn test_usage_maximum_extended_usage() {
    // Usage Maximum (Button 8) as an extended usage with the page inline
    let rdesc = [0x05, 0x01, 0x2b, 0x08, 0x00, 0x09, 0x00];
    assert_eq!(usage_maximum(&rdesc, USAGE_PAGE_BUTTON), Some(8));
    assert_eq!(usage_maximum(&rdesc, USAGE_PAGE_GENERIC_DESKTOP), None);
}

#[test]
fn test_empty_descriptor() {
    assert!(items(&[]).next().is_none());
    assert!(report_ids(&[]).is_empty());
    assert_eq!(usage_maximum(&[], USAGE_PAGE_BUTTON), None);
}
