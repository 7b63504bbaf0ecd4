//! Corrected report descriptors for the Rakk Bulus.
//!
//! The stock firmware declares Usage Maximum (3) on the Button page even
//! though the mouse has five buttons. These tables are the stock descriptors
//! with only that field widened to 5.

/// Fixed report descriptor for the wired and 2.4GHz dongle variants
pub static REPORT_DESCRIPTOR: [u8; 66] = [
    0x05, 0x01, // Usage Page (Generic Desktop)              0
    0x09, 0x02, // Usage (Mouse)                             2
    0xa1, 0x01, // Collection (Application)                  4
    0x85, 0x01, //  Report ID (1)                            6
    0x09, 0x01, //  Usage (Pointer)                          8
    0xa1, 0x00, //  Collection (Physical)                    10
    0x05, 0x09, //   Usage Page (Button)                     12
    0x19, 0x01, //   Usage Minimum (1)                       14
    0x29, 0x05, //   Usage Maximum (5) (stock: 3)            16
    0x15, 0x00, //   Logical Minimum (0)                     18
    0x25, 0x01, //   Logical Maximum (1)                     20
    0x75, 0x01, //   Report Size (1)                         22
    0x95, 0x05, //   Report Count (5)                        24
    0x81, 0x02, //   Input (Data,Var,Abs)                    26
    0x75, 0x03, //   Report Size (3)                         28
    0x95, 0x01, //   Report Count (1)                        30
    0x81, 0x01, //   Input (Cnst,Arr,Abs)                    32
    0x05, 0x01, //   Usage Page (Generic Desktop)            34
    0x09, 0x30, //   Usage (X)                               36
    0x09, 0x31, //   Usage (Y)                               38
    0x16, 0x01, 0x80, //   Logical Minimum (-32767)          40
    0x26, 0xff, 0x7f, //   Logical Maximum (32767)           43
    0x75, 0x10, //   Report Size (16)                        46
    0x95, 0x02, //   Report Count (2)                        48
    0x81, 0x06, //   Input (Data,Var,Rel)                    50
    0x09, 0x38, //   Usage (Wheel)                           52
    0x15, 0x81, //   Logical Minimum (-127)                  54
    0x25, 0x7f, //   Logical Maximum (127)                   56
    0x75, 0x08, //   Report Size (8)                         58
    0x95, 0x01, //   Report Count (1)                        60
    0x81, 0x06, //   Input (Data,Var,Rel)                    62
    0xc0, //  End Collection                                 64
    0xc0, // End Collection                                  65
];

/// Fixed report descriptor for the Bluetooth variant
pub static BLUETOOTH_REPORT_DESCRIPTOR: [u8; 66] = [
    0x05, 0x01, // Usage Page (Generic Desktop)              0
    0x09, 0x02, // Usage (Mouse)                             2
    0xa1, 0x01, // Collection (Application)                  4
    0x85, 0x03, //  Report ID (3)                            6
    0x09, 0x01, //  Usage (Pointer)                          8
    0xa1, 0x00, //  Collection (Physical)                    10
    0x05, 0x09, //   Usage Page (Button)                     12
    0x19, 0x01, //   Usage Minimum (1)                       14
    0x29, 0x05, //   Usage Maximum (5) (stock: 3)            16
    0x15, 0x00, //   Logical Minimum (0)                     18
    0x25, 0x01, //   Logical Maximum (1)                     20
    0x75, 0x01, //   Report Size (1)                         22
    0x95, 0x05, //   Report Count (5)                        24
    0x81, 0x02, //   Input (Data,Var,Abs)                    26
    0x75, 0x03, //   Report Size (3)                         28
    0x95, 0x01, //   Report Count (1)                        30
    0x81, 0x01, //   Input (Cnst,Arr,Abs)                    32
    0x05, 0x01, //   Usage Page (Generic Desktop)            34
    0x09, 0x30, //   Usage (X)                               36
    0x09, 0x31, //   Usage (Y)                               38
    0x16, 0x01, 0x80, //   Logical Minimum (-32767)          40
    0x26, 0xff, 0x7f, //   Logical Maximum (32767)           43
    0x75, 0x10, //   Report Size (16)                        46
    0x95, 0x02, //   Report Count (2)                        48
    0x81, 0x06, //   Input (Data,Var,Rel)                    50
    0x09, 0x38, //   Usage (Wheel)                           52
    0x15, 0x81, //   Logical Minimum (-127)                  54
    0x25, 0x7f, //   Logical Maximum (127)                   56
    0x75, 0x08, //   Report Size (8)                         58
    0x95, 0x01, //   Report Count (1)                        60
    0x81, 0x06, //   Input (Data,Var,Rel)                    62
    0xc0, //  End Collection                                 64
    0xc0, // End Collection                                  65
];
