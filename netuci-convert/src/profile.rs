//! Device profiles: which packages a device class exposes and how its
//! output is cleaned up.
//!
//! A profile is plain data composing the shared section mappers with a
//! [`CleanupPolicy`]; the Canonical Domain Tables are shared as data, not
//! inherited behavior.

use thiserror::Error;

use uci_text_core::{parse, render, CleanupPolicy, ParseError, ParseOptions, UciPackage};

use crate::model::Config;
use crate::{firewall, network, system, tables};

/// Errors raised when native text cannot be mapped back to a Config Object.
#[derive(Debug, Error)]
pub enum NativeParseError {
    /// The text does not match the grammar.
    #[error(transparent)]
    Grammar(#[from] ParseError),
    /// The text contains a package this device profile does not expose.
    #[error("package '{0}' is not supported by this device profile")]
    UnsupportedPackage(String),
    /// A known package contained a section type no mapper understands.
    #[error("unsupported section type '{section}' in package '{package}'")]
    UnsupportedSection { package: String, section: String },
    /// A known section lacked a mandatory identity field.
    #[error("section '{section}' in package '{package}' is missing required field '{field}'")]
    MissingField {
        package: String,
        section: String,
        field: String,
    },
    /// A month-day token was not a number.
    #[error("invalid month-day value '{0}'")]
    InvalidMonthday(String),
}

/// The native-text packages a profile can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Package {
    Firewall,
    Network,
    System,
}

impl Package {
    fn name(self) -> &'static str {
        match self {
            Package::Firewall => "firewall",
            Package::Network => "network",
            Package::System => "system",
        }
    }
}

/// A device class: exposed packages plus an output cleanup policy.
#[derive(Debug, Clone)]
pub struct DeviceProfile {
    pub name: &'static str,
    packages: &'static [Package],
    cleanup: CleanupPolicy,
}

impl DeviceProfile {
    /// Full router firmware profile: firewall, network, and system packages,
    /// block-separated output.
    pub fn router() -> Self {
        Self {
            name: "router",
            packages: &[Package::Firewall, Package::Network, Package::System],
            cleanup: CleanupPolicy::BlockSeparated,
        }
    }

    /// Reduced CPE radio profile: network and system only, dense output with
    /// every blank line stripped.
    pub fn cpe() -> Self {
        Self {
            name: "cpe",
            packages: &[Package::Network, Package::System],
            cleanup: CleanupPolicy::Dense,
        }
    }

    /// Render a Config Object to native text.
    ///
    /// Assumes externally validated input; structurally absent optional
    /// attributes simply emit nothing. Packages with no sections are
    /// omitted entirely.
    pub fn render(&self, config: &Config) -> String {
        let mut packages = Vec::new();
        for package in self.packages {
            let sections = match package {
                Package::Firewall => config
                    .firewall
                    .as_ref()
                    .map(firewall::to_sections)
                    .unwrap_or_default(),
                Package::Network => network::to_sections(&config.interfaces),
                Package::System => system::to_sections(config),
            };
            if sections.is_empty() {
                continue;
            }
            let mut out = UciPackage::new(package.name());
            out.sections = sections;
            packages.push(out);
        }
        render(&packages, self.cleanup)
    }

    /// Parse native text, not necessarily produced by [`render`](Self::render),
    /// back into a Config Object.
    pub fn parse(&self, text: &str) -> Result<Config, NativeParseError> {
        let options = ParseOptions::with_always_list(tables::ALWAYS_LIST);
        let parsed = parse(text, &options)?;

        let mut config = Config::default();
        for package in &parsed {
            match self.lookup(&package.name) {
                Some(Package::Firewall) => {
                    config.firewall = Some(firewall::from_sections(&package.sections)?);
                }
                Some(Package::Network) => {
                    config.interfaces = network::from_sections(&package.sections)?;
                }
                Some(Package::System) => {
                    system::apply_sections(&mut config, &package.sections)?;
                }
                None => {
                    return Err(NativeParseError::UnsupportedPackage(package.name.clone()));
                }
            }
        }
        Ok(config)
    }

    fn lookup(&self, name: &str) -> Option<Package> {
        self.packages
            .iter()
            .copied()
            .find(|package| package.name() == name)
    }
}
