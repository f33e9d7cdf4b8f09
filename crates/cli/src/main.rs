//! anker-mouse CLI: command-line mouse configuration tool.

use std::path::PathBuf;

use anker_mouse_core::buttons::{parse_button_assignment, ButtonBinding};
use anker_mouse_core::color::Rgb;
use anker_mouse_core::config::Config;
use anker_mouse_core::device;
use anker_mouse_core::dpi::{parse_dpi_spec, DpiSpec};
use anker_mouse_core::error::Error;
use anker_mouse_core::light::LightSetting;
use anker_mouse_core::profile::ProfileSlot;
use anker_mouse_core::report::Report;
use anker_mouse_core::safety::PARTIAL_WRITE_WARNING;
use anker_mouse_core::sequence::FirmwareVariant;
use anker_mouse_core::transport::{self, FeatureReportTransport};
use anker_mouse_core::{pids, HOLTEK_VID};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};

struct CliHidTransport {
    device: hidapi::HidDevice,
}

impl CliHidTransport {
    fn open() -> anker_mouse_core::error::Result<Self> {
        let api = hidapi::HidApi::new().map_err(|e| Error::Hid(format!("hidapi init: {e}")))?;
        let device = api
            .open(HOLTEK_VID, pids::ANKER_MOUSE)
            .map_err(|e| device::open_error(&e.to_string()))?;
        Ok(Self { device })
    }
}

impl FeatureReportTransport for CliHidTransport {
    fn send_feature_report(&self, data: &[u8]) -> anker_mouse_core::error::Result<()> {
        self.device
            .send_feature_report(data)
            .map_err(|e| Error::Hid(format!("send_feature_report: {e}")))
    }
}

#[derive(Parser)]
#[command(
    name = "anker-mouse",
    version,
    about = "Configure the Anker gaming mouse over USB HID"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected mouse HID interfaces.
    ListDevices,
    /// Change the light immediately, without touching stored profiles.
    SetLight {
        /// Color as #rrggbb, rrggbb or #rgb.
        #[arg(long, value_parser = Rgb::from_hex, default_value = "#0000ff")]
        color: Rgb,
        /// Brightness 0-3 (0 = off).
        #[arg(long, default_value_t = 2)]
        brightness: u32,
        /// Breathing speed 0-3 (0 = steady).
        #[arg(long, default_value_t = 0)]
        breath_speed: u32,
    },
    /// Make profile 1 or 2 the active profile.
    SetProfile {
        /// Profile number.
        profile: u32,
    },
    /// Write the complete configuration of both profiles.
    Apply {
        #[command(flatten)]
        settings: SettingsArgs,
        /// Print the reports as hex instead of sending them.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the resolved settings as JSON.
    DumpSettings {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// JSON settings file; flags below override it.
    #[arg(long)]
    from: Option<PathBuf>,
    /// Firmware command script: full or light-and-dpi.
    #[arg(long, value_parser = FirmwareVariant::from_name)]
    firmware: Option<FirmwareVariant>,
    /// Profile 1 light as color:brightness:breath, e.g. #0000ff:2:0.
    #[arg(long, value_parser = LightSetting::parse)]
    profile1_light: Option<LightSetting>,
    /// Profile 2 light as color:brightness:breath.
    #[arg(long, value_parser = LightSetting::parse)]
    profile2_light: Option<LightSetting>,
    /// Profile 1 DPI levels, four entries of X or X:Y, e.g. 1000:800,2000,,8200.
    #[arg(long, value_parser = parse_dpi_spec)]
    profile1_dpi: Option<DpiSpec>,
    /// Profile 2 DPI levels.
    #[arg(long, value_parser = parse_dpi_spec)]
    profile2_dpi: Option<DpiSpec>,
    /// Profile 1 button as N=ACTION (N 1-9). Repeatable.
    #[arg(long, value_parser = parse_button_assignment)]
    profile1_button: Vec<(usize, ButtonBinding)>,
    /// Profile 2 button as N=ACTION. Repeatable.
    #[arg(long, value_parser = parse_button_assignment)]
    profile2_button: Vec<(usize, ButtonBinding)>,
}

impl SettingsArgs {
    /// Start from the file (or factory settings) and apply flag overrides.
    fn resolve(&self) -> Result<Config> {
        let mut config = match &self.from {
            Some(path) => Config::load(path)
                .with_context(|| format!("reading settings from {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(variant) = self.firmware {
            config.set_variant(variant);
        }

        let overrides = [
            (
                ProfileSlot::One,
                &self.profile1_light,
                &self.profile1_dpi,
                &self.profile1_button,
            ),
            (
                ProfileSlot::Two,
                &self.profile2_light,
                &self.profile2_dpi,
                &self.profile2_button,
            ),
        ];
        for (slot, light, dpi, buttons) in overrides {
            let profile = config.profile_mut(slot);
            if let Some(light) = light {
                profile.set_light(*light);
            }
            if let Some(dpi) = dpi {
                profile
                    .set_dpi(dpi)
                    .with_context(|| format!("{slot} DPI levels"))?;
            }
            for (index, binding) in buttons {
                debug!(%slot, button = index + 1, action = %binding.event, "Button override");
                profile
                    .set_button(*index, *binding)
                    .with_context(|| format!("{slot} button {}", index + 1))?;
            }
        }

        let has_buttons = !self.profile1_button.is_empty() || !self.profile2_button.is_empty();
        if has_buttons && !config.variant().writes_buttons() {
            warn!(
                firmware = %config.variant(),
                "Button settings are not written by this firmware script"
            );
        }
        Ok(config)
    }
}

/// Hex dump with trailing zero padding collapsed.
fn hex(report: &[u8]) -> String {
    let used = report
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    let mut out = report[..used]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ");
    let padding = report.len() - used;
    if padding > 0 {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&format!("(+{padding} zero bytes)"));
    }
    out
}

fn write_config(config: &Config) -> Result<()> {
    let transport = CliHidTransport::open().context("opening the mouse")?;
    if let Err(e) = config.write(&transport) {
        if matches!(e, Error::ReportWrite { .. }) {
            eprintln!("{PARTIAL_WRITE_WARNING}");
        }
        return Err(e).context("writing configuration");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListDevices => {
            let devices = device::discover_devices()?;
            if devices.is_empty() {
                println!("No Anker mouse found.");
                println!("Ensure the mouse is connected and you have access to its HID device.");
            } else {
                for dev in &devices {
                    println!(
                        "{} ({}, interface: {}, path: {})",
                        dev.product.as_deref().unwrap_or("Anker mouse"),
                        dev.id(),
                        dev.interface_number,
                        dev.path
                    );
                }
            }
        }
        Commands::SetLight {
            color,
            brightness,
            breath_speed,
        } => {
            let light = LightSetting::from_raw(color, brightness, breath_speed)?;
            let transport = CliHidTransport::open().context("opening the mouse")?;
            transport::send_report(&transport, &Report::Light(light))?;
            println!(
                "Light set to {color}, brightness {brightness}, breath speed {breath_speed}"
            );
        }
        Commands::SetProfile { profile } => {
            let slot = ProfileSlot::from_number(profile)?;
            let transport = CliHidTransport::open().context("opening the mouse")?;
            transport::send_reports(&transport, &Report::profile_switch(slot))
                .context("switching profile")?;
            println!("Switched to {slot}");
        }
        Commands::Apply { settings, dry_run } => {
            let config = settings.resolve()?;
            if dry_run {
                for (index, report) in config.reports().iter().enumerate() {
                    println!("{index:2} [{:4}] {}", report.len(), hex(report));
                }
            } else {
                write_config(&config)?;
                println!(
                    "Configuration written ({} reports, {} firmware)",
                    config.reports().len(),
                    config.variant()
                );
            }
        }
        Commands::DumpSettings { settings } => {
            let config = settings.resolve()?;
            println!("{}", config.to_json()?);
        }
    }

    Ok(())
}
