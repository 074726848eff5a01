//! # INFINITE
//!
//! Client core facade: the built-in feature catalog, the decision points a
//! host's patched call sites consult, and the events the host must act on.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       InfiniteClient                         │
//! │                                                              │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌──────────────┐  │
//! │  │ infinite_core│──>│ infinite_render  │   │infinite_combat│ │
//! │  │  registry    │   │ VisibilityResolver│  │TargetSelector│  │
//! │  │  profiles    │──────────────────────────>│              │  │
//! │  └──────────────┘   └──────────────────┘   └──────────────┘  │
//! │          │                                        │          │
//! │          └──────────────> EventBus <──────────────┘          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use infinite::{catalog, ClientConfig, ClientEvent, InfiniteClient};
//!
//! let client = InfiniteClient::new(ClientConfig::default()).unwrap();
//! let events = client.events();
//! client.enable(catalog::XRAY).unwrap();
//! assert!(events.drain().contains(&ClientEvent::ReloadWorldRenderer));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod events;

pub use catalog::{builtin_features, builtin_registry};
pub use client::InfiniteClient;
pub use config::ClientConfig;
pub use events::{ClientEvent, EventBus, EventReceiver, EventSender};
