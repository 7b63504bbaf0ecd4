use std::borrow::Cow;

use crate::fixup::{Descriptor, DeviceId, ReportFixup};

use super::report_descriptor::{BLUETOOTH_REPORT_DESCRIPTOR, REPORT_DESCRIPTOR};

pub const VID: u16 = 0x248A;
pub const PID: u16 = 0x5B49;
pub const PID_DONGLE: u16 = 0x5B4A;
pub const PID_BLUETOOTH: u16 = 0x8266;

// Lengths of the faulty descriptors reported by the stock firmware
pub const ORIG_RDESC_LENGTH: usize = 150;
pub const DONGLE_ORIG_RDESC_LENGTH: usize = 172;
pub const BLUETOOTH_ORIG_RDESC_LENGTH: usize = 89;

/// Number of leading bytes shared by the faulty and the fixed descriptors.
/// This ends right before the Usage Maximum value.
pub const FAULT_OFFSET: usize = 17;

/// Physical and transport configurations of the Rakk Bulus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceVariant {
    Wired,
    Dongle,
    Bluetooth,
}

/// Maps each device identity to its variant
pub static DEVICE_TABLE: [(DeviceId, DeviceVariant); 3] = [
    (DeviceVariant::Wired.id(), DeviceVariant::Wired),
    (DeviceVariant::Dongle.id(), DeviceVariant::Dongle),
    (DeviceVariant::Bluetooth.id(), DeviceVariant::Bluetooth),
];

static DEVICES: [DeviceId; 2] = [DeviceVariant::Wired.id(), DeviceVariant::Dongle.id()];
static ORIG_RDESC_LENGTHS: [usize; 2] = [ORIG_RDESC_LENGTH, DONGLE_ORIG_RDESC_LENGTH];

static BLUETOOTH_DEVICES: [DeviceId; 1] = [DeviceVariant::Bluetooth.id()];
static BLUETOOTH_ORIG_RDESC_LENGTHS: [usize; 1] = [BLUETOOTH_ORIG_RDESC_LENGTH];

/// Fixup shared by the wired and dongle variants
pub static FIXUP: ReportFixup = ReportFixup {
    name: Cow::Borrowed("Rakk Bulus (Wired/Dongle)"),
    matches: Cow::Borrowed(&DEVICES),
    original_lengths: Cow::Borrowed(&ORIG_RDESC_LENGTHS),
    fingerprint_len: FAULT_OFFSET,
    rdesc: Cow::Borrowed(&REPORT_DESCRIPTOR),
};

/// Fixup for the Bluetooth variant
pub static BLUETOOTH_FIXUP: ReportFixup = ReportFixup {
    name: Cow::Borrowed("Rakk Bulus (Bluetooth)"),
    matches: Cow::Borrowed(&BLUETOOTH_DEVICES),
    original_lengths: Cow::Borrowed(&BLUETOOTH_ORIG_RDESC_LENGTHS),
    fingerprint_len: FAULT_OFFSET,
    rdesc: Cow::Borrowed(&BLUETOOTH_REPORT_DESCRIPTOR),
};

impl DeviceVariant {
    /// Returns the variant for the given device, or None if the device is
    /// not a Rakk Bulus.
    pub fn from_id(id: &DeviceId) -> Option<Self> {
        DEVICE_TABLE
            .iter()
            .find(|(device, _)| device == id)
            .map(|(_, variant)| *variant)
    }

    /// Returns the identity this variant enumerates with
    pub const fn id(&self) -> DeviceId {
        match self {
            DeviceVariant::Wired => DeviceId::usb(VID, PID),
            DeviceVariant::Dongle => DeviceId::usb(VID, PID_DONGLE),
            DeviceVariant::Bluetooth => DeviceId::bluetooth(VID, PID_BLUETOOTH),
        }
    }

    /// Returns the fixup that applies to this variant
    pub fn report_fixup(&self) -> &'static ReportFixup {
        match self {
            DeviceVariant::Wired | DeviceVariant::Dongle => &FIXUP,
            DeviceVariant::Bluetooth => &BLUETOOTH_FIXUP,
        }
    }

    /// Replace the given descriptor if it is the faulty one for this variant
    pub fn fixup<'a>(&self, rdesc: &'a [u8]) -> Descriptor<'a> {
        self.report_fixup().fixup(rdesc)
    }
}

/// Returns the corrected report descriptor for the given variant if `rdesc`
/// is the known-faulty one, otherwise returns `rdesc` unchanged. The length
/// of the returned slice is the length of the descriptor to use.
pub fn correct(variant: DeviceVariant, rdesc: &[u8]) -> &[u8] {
    variant.fixup(rdesc).as_bytes()
}

/// Same as [correct], selecting the variant from the device identity. Devices
/// that are not a known variant get their descriptor back unchanged.
pub fn report_fixup<'a>(id: &DeviceId, rdesc: &'a [u8]) -> &'a [u8] {
    match DeviceVariant::from_id(id) {
        Some(variant) => correct(variant, rdesc),
        None => rdesc,
    }
}
