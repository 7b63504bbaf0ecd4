use std::borrow::Cow;

use crate::drivers::rakk_bulus::{
    driver::{PID, PID_BLUETOOTH, PID_DONGLE, VID},
    report_descriptor::{BLUETOOTH_REPORT_DESCRIPTOR, REPORT_DESCRIPTOR},
};
use crate::fixup::{BusType, Descriptor, DeviceId, FixupRegistry, FixupStatus, ReportFixup};

fn stock_descriptor(fixed: &[u8], len: usize) -> Vec<u8> {
    let mut rdesc = fixed.to_vec();
    rdesc[17] = 0x03;
    rdesc.resize(len, 0x00);
    rdesc
}

fn custom_fixup() -> ReportFixup {
    ReportFixup {
        name: Cow::Borrowed("Test Mouse"),
        matches: Cow::Owned(vec![DeviceId::usb(0x1234, 0x5678)]),
        original_lengths: Cow::Owned(vec![8]),
        fingerprint_len: 2,
        rdesc: Cow::Owned(vec![0x05, 0x01, 0x09, 0x02]),
    }
}

#[test]
fn test_bus_type_conversion() {
    assert_eq!(BusType::from(0x03), BusType::Usb);
    assert_eq!(BusType::from(0x05), BusType::Bluetooth);
    assert_eq!(BusType::from(0x18), BusType::Other(0x18));
    assert_eq!(u16::from(BusType::Bluetooth), 0x05);
    assert_eq!(u16::from(BusType::Other(0x18)), 0x18);
}

#[test]
fn test_bus_type_from_str() {
    assert_eq!("usb".parse::<BusType>(), Ok(BusType::Usb));
    assert_eq!("USB".parse::<BusType>(), Ok(BusType::Usb));
    assert_eq!("bluetooth".parse::<BusType>(), Ok(BusType::Bluetooth));
    assert_eq!("0x05".parse::<BusType>(), Ok(BusType::Bluetooth));
    assert_eq!("3".parse::<BusType>(), Ok(BusType::Usb));
    assert_eq!("0x18".parse::<BusType>(), Ok(BusType::Other(0x18)));
    assert!("serial".parse::<BusType>().is_err());
}

#[test]
fn test_device_id_display() {
    let id = DeviceId::bluetooth(VID, PID_BLUETOOTH);
    assert_eq!(id.to_string(), "bluetooth:248a:8266");
    let id = DeviceId::new(BusType::Other(0x18), 0x1, 0x2);
    assert_eq!(id.to_string(), "0x0018:0001:0002");
}

#[test]
fn test_builtin_registry() {
    let registry = FixupRegistry::builtin();
    assert_eq!(registry.len(), 2);

    let wired = registry.find(&DeviceId::usb(VID, PID)).unwrap();
    let dongle = registry.find(&DeviceId::usb(VID, PID_DONGLE)).unwrap();
    assert_eq!(wired, dongle);
    assert_eq!(wired.name, "Rakk Bulus (Wired/Dongle)");

    let bluetooth = registry.find(&DeviceId::bluetooth(VID, PID_BLUETOOTH)).unwrap();
    assert_eq!(bluetooth.name, "Rakk Bulus (Bluetooth)");
    assert!(registry.find(&DeviceId::usb(VID, PID_BLUETOOTH)).is_none());
}

#[test]
fn test_registry_report_fixup() {
    let registry = FixupRegistry::builtin();
    let rdesc = stock_descriptor(&REPORT_DESCRIPTOR, 150);

    let result = registry.report_fixup(&DeviceId::usb(VID, PID), &rdesc);
    assert!(result.is_fixed());
    assert_eq!(result.len(), 66);
    assert!(std::ptr::eq(
        result.as_bytes().as_ptr(),
        REPORT_DESCRIPTOR.as_ptr()
    ));
    assert_eq!(
        result,
        Descriptor::Fixed {
            name: "Rakk Bulus (Wired/Dongle)",
            rdesc: &REPORT_DESCRIPTOR,
        }
    );

    let rdesc = stock_descriptor(&BLUETOOTH_REPORT_DESCRIPTOR, 89);
    let result = registry.report_fixup(&DeviceId::bluetooth(VID, PID_BLUETOOTH), &rdesc);
    assert!(std::ptr::eq(
        result.as_bytes().as_ptr(),
        BLUETOOTH_REPORT_DESCRIPTOR.as_ptr()
    ));
}

#[test]
fn test_registry_unknown_device() {
    let registry = FixupRegistry::builtin();
    let rdesc = stock_descriptor(&REPORT_DESCRIPTOR, 150);
    let result = registry.report_fixup(&DeviceId::usb(0x046D, 0xC52B), &rdesc);
    assert_eq!(result, Descriptor::Original(&rdesc));
    assert!(!result.is_fixed());
    assert_eq!(result.len(), 150);
}

#[test]
fn test_empty_descriptor_passes_through() {
    let registry = FixupRegistry::builtin();
    let result = registry.report_fixup(&DeviceId::usb(VID, PID), &[]);
    assert!(result.is_empty());
    assert!(!result.is_fixed());
    assert!(!registry
        .report_fixup(&DeviceId::usb(VID, PID), &REPORT_DESCRIPTOR)
        .is_empty());
}

#[test]
fn test_empty_registry_passes_through() {
    let registry = FixupRegistry::new();
    assert!(registry.is_empty());
    let rdesc = stock_descriptor(&REPORT_DESCRIPTOR, 150);
    let result = registry.report_fixup(&DeviceId::usb(VID, PID), &rdesc);
    assert_eq!(result.as_bytes(), rdesc.as_slice());
}

#[test]
fn test_fixup_status() {
    let fixup = &crate::drivers::rakk_bulus::driver::FIXUP;
    let stock = stock_descriptor(&REPORT_DESCRIPTOR, 172);
    assert_eq!(fixup.status(&stock), FixupStatus::Applies);
    assert_eq!(fixup.status(&REPORT_DESCRIPTOR), FixupStatus::AlreadyFixed);
    assert_eq!(
        fixup.status(&BLUETOOTH_REPORT_DESCRIPTOR),
        FixupStatus::Unrecognized
    );
    assert_eq!(fixup.status(&[]), FixupStatus::Unrecognized);
    assert_eq!(FixupStatus::Applies.to_string(), "needs fixup");
}

#[test]
fn test_custom_fixup() {
    let registry = FixupRegistry::builtin().with_fixups(vec![custom_fixup()]);
    assert_eq!(registry.len(), 3);

    let id = DeviceId::usb(0x1234, 0x5678);
    let rdesc = [0x05, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    let result = registry.report_fixup(&id, &rdesc);
    assert_eq!(result.as_bytes(), &[0x05, 0x01, 0x09, 0x02]);

    // Fingerprint mismatch
    let rdesc = [0x05, 0x02, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
    let result = registry.report_fixup(&id, &rdesc);
    assert_eq!(result, Descriptor::Original(&rdesc));
}

#[test]
fn test_builtin_fixups_take_precedence() {
    let mut shadow = custom_fixup();
    shadow.matches = Cow::Owned(vec![DeviceId::usb(VID, PID)]);
    let registry = FixupRegistry::builtin().with_fixups(vec![shadow]);
    let fixup = registry.find(&DeviceId::usb(VID, PID)).unwrap();
    assert_eq!(fixup.name, "Rakk Bulus (Wired/Dongle)");
}

#[test]
fn test_invalid_fixups_are_skipped() {
    let mut too_long_fingerprint = custom_fixup();
    too_long_fingerprint.fingerprint_len = 4;
    assert!(too_long_fingerprint.validate().is_err());

    let mut short_original = custom_fixup();
    short_original.original_lengths = Cow::Owned(vec![2]);
    assert!(short_original.validate().is_err());

    let mut not_idempotent = custom_fixup();
    not_idempotent.original_lengths = Cow::Owned(vec![4, 8]);
    assert!(not_idempotent.validate().is_err());

    let mut no_devices = custom_fixup();
    no_devices.matches = Cow::Owned(vec![]);
    assert!(no_devices.validate().is_err());

    let mut no_fingerprint = custom_fixup();
    no_fingerprint.fingerprint_len = 0;
    assert!(no_fingerprint.validate().is_err());

    let registry = FixupRegistry::new().with_fixups(vec![
        too_long_fingerprint,
        short_original,
        not_idempotent,
        no_devices,
        no_fingerprint,
        custom_fixup(),
    ]);
    assert_eq!(registry.len(), 1);
}
