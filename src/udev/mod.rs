
pub mod device;

use std::error::Error;

use ::udev::Enumerator;

use self::device::HidDevice;

/// Returns a list of devices in the given subsystem.
pub fn discover_devices(subsystem: &str) -> Result<Vec<::udev::Device>, Box<dyn Error>> {
    let mut enumerator = Enumerator::new()?;
    enumerator.match_subsystem(subsystem)?;

    log::debug!("Started udev {subsystem} enumerator.");

    Ok(enumerator.scan_devices()?.collect())
}

/// Returns all devices on the HID bus
pub fn discover_hid_devices() -> Result<Vec<HidDevice>, Box<dyn Error>> {
    let devices = discover_devices("hid")?
        .into_iter()
        .map(HidDevice::from)
        .collect();

    Ok(devices)
}
