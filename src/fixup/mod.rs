//! Table-driven report descriptor fixups.
//!
//! A [ReportFixup] describes one known-faulty report descriptor: the devices
//! it ships on, the lengths the faulty descriptor is known to have, and the
//! corrected descriptor that replaces it. A faulty descriptor is recognized by
//! its length plus a fingerprint: the first `fingerprint_len` bytes must match
//! the first bytes of the corrected descriptor. Anything else passes through
//! untouched.

#[cfg(test)]
pub mod fixup_test;

use std::{borrow::Cow, fmt::Display, str::FromStr};

use crate::drivers;

/// Linux bus type as found in the `HID_ID` uevent property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusType {
    Usb,
    Bluetooth,
    Other(u16),
}

impl BusType {
    pub const fn from_u16(value: u16) -> Self {
        match value {
            0x03 => Self::Usb,
            0x05 => Self::Bluetooth,
            _ => Self::Other(value),
        }
    }

    pub const fn as_u16(&self) -> u16 {
        match *self {
            Self::Usb => 0x03,
            Self::Bluetooth => 0x05,
            Self::Other(value) => value,
        }
    }
}

impl From<u16> for BusType {
    fn from(value: u16) -> Self {
        Self::from_u16(value)
    }
}

impl From<BusType> for u16 {
    fn from(value: BusType) -> Self {
        value.as_u16()
    }
}

impl Display for BusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusType::Usb => write!(f, "usb"),
            BusType::Bluetooth => write!(f, "bluetooth"),
            BusType::Other(value) => write!(f, "{value:#06x}"),
        }
    }
}

impl FromStr for BusType {
    type Err = String;

    /// Parses "usb", "bluetooth" or a numeric bus type (e.g. "0x05" or "5")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        match value.as_str() {
            "usb" => return Ok(Self::Usb),
            "bluetooth" | "bt" => return Ok(Self::Bluetooth),
            _ => (),
        }
        let parsed = match value.strip_prefix("0x") {
            Some(hex) => u16::from_str_radix(hex, 16),
            None => value.parse::<u16>(),
        };
        parsed
            .map(Self::from_u16)
            .map_err(|e| format!("Invalid bus type '{s}': {e}"))
    }
}

/// Identity of a HID device used to select a fixup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId {
    pub bus: BusType,
    pub vendor_id: u16,
    pub product_id: u16,
}

impl DeviceId {
    pub const fn new(bus: BusType, vendor_id: u16, product_id: u16) -> Self {
        Self {
            bus,
            vendor_id,
            product_id,
        }
    }

    pub const fn usb(vendor_id: u16, product_id: u16) -> Self {
        Self::new(BusType::Usb, vendor_id, product_id)
    }

    pub const fn bluetooth(vendor_id: u16, product_id: u16) -> Self {
        Self::new(BusType::Bluetooth, vendor_id, product_id)
    }
}

impl Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:04x}:{:04x}",
            self.bus, self.vendor_id, self.product_id
        )
    }
}

/// Result of running a report descriptor through a fixup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor<'a> {
    /// The descriptor was replaced with the named fixup's corrected descriptor
    Fixed { name: &'a str, rdesc: &'a [u8] },
    /// The descriptor was left untouched
    Original(&'a [u8]),
}

impl<'a> Descriptor<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        match *self {
            Descriptor::Fixed { rdesc, .. } => rdesc,
            Descriptor::Original(rdesc) => rdesc,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Descriptor::Fixed { .. })
    }
}

/// How a report descriptor relates to a fixup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixupStatus {
    /// The descriptor is the known-faulty one and would be replaced
    Applies,
    /// The descriptor already is the corrected one
    AlreadyFixed,
    /// The descriptor is neither the faulty nor the corrected one
    Unrecognized,
}

impl Display for FixupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            FixupStatus::Applies => "needs fixup",
            FixupStatus::AlreadyFixed => "fixed",
            FixupStatus::Unrecognized => "unrecognized",
        };
        write!(f, "{value}")
    }
}

/// A known-faulty report descriptor and its replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFixup {
    /// Human readable name used in log messages (e.g. "Rakk Bulus (Bluetooth)")
    pub name: Cow<'static, str>,
    /// Devices that ship the faulty descriptor
    pub matches: Cow<'static, [DeviceId]>,
    /// Known lengths of the faulty descriptor
    pub original_lengths: Cow<'static, [usize]>,
    /// Number of leading bytes that must equal the corrected descriptor
    pub fingerprint_len: usize,
    /// Corrected report descriptor
    pub rdesc: Cow<'static, [u8]>,
}

impl ReportFixup {
    /// Returns true if this fixup is defined for the given device
    pub fn matches_device(&self, id: &DeviceId) -> bool {
        self.matches.contains(id)
    }

    /// Returns true if the given descriptor is the known-faulty one. The
    /// length is checked before the fingerprint, and the fingerprint is
    /// compared through bounds-checked slices so short input never matches.
    pub fn applies_to(&self, rdesc: &[u8]) -> bool {
        if !self.original_lengths.contains(&rdesc.len()) {
            return false;
        }
        match (
            rdesc.get(..self.fingerprint_len),
            self.rdesc.get(..self.fingerprint_len),
        ) {
            (Some(fingerprint), Some(expected)) => fingerprint == expected,
            _ => false,
        }
    }

    /// Returns the corrected descriptor if the given descriptor is the
    /// known-faulty one, otherwise returns the given descriptor unchanged.
    pub fn fixup<'a>(&'a self, rdesc: &'a [u8]) -> Descriptor<'a> {
        if !self.applies_to(rdesc) {
            return Descriptor::Original(rdesc);
        }
        log::info!("Fixing up {} report descriptor", self.name);
        Descriptor::Fixed {
            name: &self.name,
            rdesc: &self.rdesc,
        }
    }

    /// Classify the given descriptor without applying the fixup
    pub fn status(&self, rdesc: &[u8]) -> FixupStatus {
        if self.applies_to(rdesc) {
            FixupStatus::Applies
        } else if rdesc == self.rdesc.as_ref() {
            FixupStatus::AlreadyFixed
        } else {
            FixupStatus::Unrecognized
        }
    }

    /// Checks that the fingerprint can never read past either descriptor and
    /// that the corrected descriptor cannot itself be mistaken for a faulty one.
    pub fn validate(&self) -> Result<(), String> {
        if self.matches.is_empty() {
            return Err(format!("Fixup '{}' does not match any device", self.name));
        }
        if self.original_lengths.is_empty() {
            return Err(format!("Fixup '{}' has no original lengths", self.name));
        }
        if self.fingerprint_len == 0 {
            return Err(format!("Fixup '{}' has an empty fingerprint", self.name));
        }
        if self.fingerprint_len >= self.rdesc.len() {
            return Err(format!(
                "Fixup '{}' fingerprint length {} must be shorter than the fixed descriptor ({} bytes)",
                self.name,
                self.fingerprint_len,
                self.rdesc.len()
            ));
        }
        if let Some(len) = self
            .original_lengths
            .iter()
            .find(|len| **len <= self.fingerprint_len)
        {
            return Err(format!(
                "Fixup '{}' fingerprint length {} must be shorter than original length {len}",
                self.name, self.fingerprint_len
            ));
        }
        if self.original_lengths.contains(&self.rdesc.len()) {
            return Err(format!(
                "Fixup '{}' fixed descriptor length {} collides with an original length",
                self.name,
                self.rdesc.len()
            ));
        }
        Ok(())
    }
}

/// Ordered set of [ReportFixup] entries. The first entry defined for a device
/// wins.
#[derive(Debug, Clone, Default)]
pub struct FixupRegistry {
    fixups: Vec<ReportFixup>,
}

impl FixupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry containing only the fixups compiled into this binary
    pub fn builtin() -> Self {
        Self {
            fixups: drivers::builtin_fixups(),
        }
    }

    /// Appends the given fixups after the existing entries. Invalid entries
    /// are skipped.
    pub fn with_fixups<I>(mut self, fixups: I) -> Self
    where
        I: IntoIterator<Item = ReportFixup>,
    {
        for fixup in fixups {
            if let Err(e) = fixup.validate() {
                log::warn!("Ignoring report fixup: {e}");
                continue;
            }
            log::debug!("Registered report fixup: {}", fixup.name);
            self.fixups.push(fixup);
        }
        self
    }

    /// Returns the fixup defined for the given device, if any
    pub fn find(&self, id: &DeviceId) -> Option<&ReportFixup> {
        self.fixups.iter().find(|fixup| fixup.matches_device(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReportFixup> {
        self.fixups.iter()
    }

    pub fn len(&self) -> usize {
        self.fixups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixups.is_empty()
    }

    /// Run the given descriptor of the given device through its fixup.
    /// Devices without a fixup get their descriptor back unchanged.
    pub fn report_fixup<'a>(&'a self, id: &DeviceId, rdesc: &'a [u8]) -> Descriptor<'a> {
        match self.find(id) {
            Some(fixup) => fixup.fixup(rdesc),
            None => {
                log::trace!("No report fixup defined for {id}");
                Descriptor::Original(rdesc)
            }
        }
    }
}
