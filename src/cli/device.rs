use std::error::Error;

use tabled::settings::{Panel, Style};
use tabled::{Table, Tabled};

use crate::fixup::{FixupRegistry, FixupStatus};
use crate::hid::{usage_maximum, USAGE_PAGE_BUTTON};
use crate::udev::device::HidDevice;
use crate::udev::discover_hid_devices;

#[derive(Tabled)]
struct FixupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Bus")]
    bus: String,
    #[tabled(rename = "Vendor")]
    vendor_id: String,
    #[tabled(rename = "Product")]
    product_id: String,
    #[tabled(rename = "Faulty Lengths")]
    original_lengths: String,
    #[tabled(rename = "Fixed Length")]
    fixed_length: usize,
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Device")]
    sysname: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Driver")]
    driver: String,
    #[tabled(rename = "Length")]
    length: String,
    #[tabled(rename = "Buttons")]
    buttons: String,
    #[tabled(rename = "Fixup")]
    fixup: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Print every device with a known report descriptor fixup
pub fn handle_devices(registry: &FixupRegistry) -> Result<(), Box<dyn Error>> {
    let mut rows = Vec::new();
    for fixup in registry.iter() {
        let original_lengths = fixup
            .original_lengths
            .iter()
            .map(|len| len.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        for id in fixup.matches.iter() {
            rows.push(FixupRow {
                name: fixup.name.to_string(),
                bus: id.bus.to_string(),
                vendor_id: format!("{:04x}", id.vendor_id),
                product_id: format!("{:04x}", id.product_id),
                original_lengths: original_lengths.clone(),
                fixed_length: fixup.rdesc.len(),
            });
        }
    }

    let mut table = Table::new(rows);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("Supported Devices"));
    println!("{table}");

    Ok(())
}

/// Check the report descriptors of connected HID devices
pub fn handle_check(
    registry: &FixupRegistry,
    all: bool,
    paths: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    let devices = if paths.is_empty() {
        discover_hid_devices()?
    } else {
        paths
            .iter()
            .map(|path| HidDevice::from_path(path))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut rows = Vec::new();
    for device in devices {
        let Some(id) = device.id() else {
            log::debug!("Unable to determine id of {}", device.sysname());
            continue;
        };
        log::debug!("Checking {id} at {}", device.syspath());
        let fixup = registry.find(&id);
        if fixup.is_none() && !all {
            continue;
        }

        let rdesc = match device.report_descriptor() {
            Ok(rdesc) => Some(rdesc),
            Err(e) => {
                log::debug!(
                    "Unable to read {}: {e}",
                    device.report_descriptor_path().display()
                );
                None
            }
        };

        let status = match (fixup, rdesc.as_ref()) {
            (Some(fixup), Some(rdesc)) => fixup.status(rdesc).to_string(),
            (Some(_), None) => "unreadable".to_string(),
            (None, _) => "-".to_string(),
        };
        let buttons = rdesc
            .as_ref()
            .and_then(|rdesc| usage_maximum(rdesc, USAGE_PAGE_BUTTON))
            .map(|value| value.to_string())
            .unwrap_or("-".to_string());

        rows.push(DeviceRow {
            sysname: device.sysname(),
            name: device.name(),
            driver: device.driver(),
            length: rdesc
                .as_ref()
                .map(|rdesc| rdesc.len().to_string())
                .unwrap_or("-".to_string()),
            buttons,
            fixup: fixup.map(|f| f.name.to_string()).unwrap_or("-".to_string()),
            status,
        });
    }

    if rows.is_empty() {
        println!("No supported devices found");
        return Ok(());
    }

    let needs_fixup = rows
        .iter()
        .filter(|row| row.status == FixupStatus::Applies.to_string())
        .count();

    let mut table = Table::new(rows);
    table
        .with(Style::modern_rounded())
        .with(Panel::header("HID Devices"));
    println!("{table}");

    if needs_fixup > 0 {
        log::warn!("{needs_fixup} device(s) report a faulty report descriptor");
    }

    Ok(())
}
