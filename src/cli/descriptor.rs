use std::error::Error;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::fixup::{BusType, DeviceId, FixupRegistry};
use crate::hid::items;

use super::parse_hex_u16;

#[derive(clap::Args, Debug, Clone)]
pub struct FixupArgs {
    /// Bus the device enumerates on ("usb", "bluetooth" or a numeric bus type)
    #[arg(long, default_value = "usb")]
    pub bus: BusType,
    /// Vendor ID in hex (e.g. 248a)
    #[arg(long, value_parser = parse_hex_u16)]
    pub vid: u16,
    /// Product ID in hex (e.g. 5b49)
    #[arg(long, value_parser = parse_hex_u16)]
    pub pid: u16,
    /// Report descriptor to read. Reads from stdin if omitted or "-".
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Where to write the resulting report descriptor. Writes to stdout if
    /// omitted or "-".
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Apply the matching fixup to a report descriptor dump
pub async fn handle_fixup(registry: &FixupRegistry, args: FixupArgs) -> Result<(), Box<dyn Error>> {
    let id = DeviceId::new(args.bus, args.vid, args.pid);
    let rdesc = read_input(args.input.as_deref()).await?;

    let result = registry.report_fixup(&id, &rdesc);
    if result.is_empty() {
        return Err("Report descriptor is empty".into());
    }
    if result.is_fixed() {
        log::info!(
            "Report descriptor of {id} replaced: {} -> {} bytes",
            rdesc.len(),
            result.len()
        );
    } else if registry.find(&id).is_some() {
        log::info!("Report descriptor of {id} does not need a fixup");
    } else {
        log::warn!("No report fixup defined for {id}, descriptor left unchanged");
    }

    write_output(args.output.as_deref(), result.as_bytes()).await?;

    Ok(())
}

/// Print each item of a report descriptor dump
pub async fn handle_inspect(path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let rdesc = read_input(path.as_deref()).await?;

    let mut depth: usize = 0;
    for item in items(&rdesc) {
        let item = item?;
        if item.name() == "End Collection" {
            depth = depth.saturating_sub(1);
        }
        let raw = item
            .bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<String>>()
            .join(" ");
        println!("{:4}  {raw:<15} {}{item}", item.offset, "  ".repeat(depth));
        if item.name() == "Collection" {
            depth += 1;
        }
    }
    println!("{} bytes", rdesc.len());

    Ok(())
}

async fn read_input(path: Option<&Path>) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut data = Vec::new();
    match path {
        Some(path) if path.as_os_str() != "-" => {
            data = tokio::fs::read(path)
                .await
                .map_err(|e| format!("Unable to read {}: {e}", path.display()))?;
        }
        _ => {
            tokio::io::stdin().read_to_end(&mut data).await?;
        }
    }

    Ok(data)
}

async fn write_output(path: Option<&Path>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            tokio::fs::write(path, data)
                .await
                .map_err(|e| format!("Unable to write {}: {e}", path.display()))?;
        }
        _ => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(data).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
