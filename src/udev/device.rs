use std::{
    collections::HashMap,
    error::Error,
    ffi::OsStr,
    fs, io,
    os::unix::fs::{FileTypeExt, MetadataExt},
    path::{Path, PathBuf},
};

use crate::fixup::{BusType, DeviceId};

/// Name of the sysfs attribute holding the report descriptor
const REPORT_DESCRIPTOR_ATTRIBUTE: &str = "report_descriptor";

/// A device on the HID bus (e.g. /sys/bus/hid/devices/0005:248A:8266.0001)
#[derive(Debug, Clone, Default)]
pub struct HidDevice {
    syspath: String,
    sysname: String,
    driver: String,
    properties: HashMap<String, String>,
}

impl HidDevice {
    /// Returns the HID device for the given path. The path can either be a
    /// sysfs path or a device node of a child device (e.g. /dev/hidraw0).
    pub fn from_path(path: &str) -> Result<Self, Box<dyn Error>> {
        let device = if path.starts_with("/dev/") {
            let metadata = fs::metadata(path)?;
            if !metadata.file_type().is_char_device() {
                return Err(format!("{path} is not a character device").into());
            }
            ::udev::Device::from_devnum(::udev::DeviceType::Character, metadata.rdev())?
        } else {
            ::udev::Device::from_syspath(Path::new(path))?
        };

        if device.subsystem() == Some(OsStr::new("hid")) {
            return Ok(Self::from(device));
        }
        let Some(parent) = device.parent_with_subsystem("hid")? else {
            return Err(format!("{path} is not a HID device").into());
        };

        Ok(Self::from(parent))
    }

    /// Returns the device identity parsed from the HID_ID property
    pub fn id(&self) -> Option<DeviceId> {
        parse_hid_id(self.property("HID_ID")?)
    }

    pub fn name(&self) -> String {
        self.property("HID_NAME").unwrap_or_default().to_string()
    }

    pub fn driver(&self) -> String {
        self.driver.clone()
    }

    pub fn syspath(&self) -> String {
        self.syspath.clone()
    }

    pub fn sysname(&self) -> String {
        self.sysname.clone()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Path to the report descriptor of this device in sysfs
    pub fn report_descriptor_path(&self) -> PathBuf {
        Path::new(self.syspath.as_str()).join(REPORT_DESCRIPTOR_ATTRIBUTE)
    }

    /// Reads the report descriptor of this device from sysfs
    pub fn report_descriptor(&self) -> Result<Vec<u8>, io::Error> {
        fs::read(self.report_descriptor_path())
    }
}

impl From<::udev::Device> for HidDevice {
    fn from(device: ::udev::Device) -> Self {
        let syspath = device.syspath().to_string_lossy().to_string();
        let sysname = device.sysname().to_string_lossy().to_string();
        let driver = device
            .driver()
            .unwrap_or(OsStr::new(""))
            .to_string_lossy()
            .to_string();
        let properties = device
            .properties()
            .map(|p| {
                (
                    p.name().to_string_lossy().to_string(),
                    p.value().to_string_lossy().to_string(),
                )
            })
            .collect();

        Self {
            syspath,
            sysname,
            driver,
            properties,
        }
    }
}

/// Parses the HID_ID uevent property (e.g. "0005:0000248A:00008266") into a
/// [DeviceId]. All fields are hexadecimal.
pub fn parse_hid_id(value: &str) -> Option<DeviceId> {
    let mut parts = value.trim().split(':');
    let bus = u16::try_from(u32::from_str_radix(parts.next()?, 16).ok()?).ok()?;
    let vendor_id = u16::try_from(u32::from_str_radix(parts.next()?, 16).ok()?).ok()?;
    let product_id = u16::try_from(u32::from_str_radix(parts.next()?, 16).ok()?).ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(DeviceId::new(BusType::from(bus), vendor_id, product_id))
}
