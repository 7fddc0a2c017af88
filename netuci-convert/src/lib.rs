//! Vendor-neutral network configuration to router-native UCI text and back.
//!
//! Embedded router firmware consumes a line-oriented, section-based native
//! configuration format; management systems prefer one hierarchical,
//! device-independent description. This library translates between the two
//! in both directions: a [`model::Config`] renders to canonical native text,
//! and native text (including hand-authored text) parses back into a
//! [`model::Config`].
//!
//! # Architecture
//!
//! - [`model`] — the typed Config Object: firewall rules/zones/forwardings/
//!   redirects, interfaces, DNS servers, system settings, users
//! - [`tables`] — canonical per-section metadata: fixed field order,
//!   always-list keys, space-joined keys, enumerable value domains
//! - [`firewall`], [`network`], [`system`] — per-domain section mappers,
//!   each with a forward (config → sections) and inverse direction
//! - [`profile`] — device profiles composing the shared mappers with a
//!   whitespace-cleanup policy per device class
//!
//! The grammar itself (section tree, text parser, text writer) lives in the
//! `uci-text-core` crate; everything domain-specific is in this one.
//!
//! # Example
//!
//! ```ignore
//! use netuci_convert::{Config, DeviceProfile};
//!
//! let profile = DeviceProfile::router();
//! let text = profile.render(&config);
//! let restored = profile.parse(&text)?;
//! assert_eq!(restored, config);
//! ```
//!
//! Rendering assumes externally validated input; this crate performs no
//! semantic validation and renders structurally valid data as-is.

mod fields;
pub mod firewall;
pub mod model;
pub mod network;
pub mod profile;
pub mod system;
pub mod tables;

pub use model::Config;
pub use profile::{DeviceProfile, NativeParseError};
