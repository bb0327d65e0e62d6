//! Client-side navigation for the single-page shell.
//!
//! A page is a `#root` container whose direct children are *app* panels;
//! elements marked as sections inside an app are *section* panels. At most
//! one app, and at most one section inside it, carries the visibility
//! marker at any time.
//!
//! # Architecture
//!
//! - [`Registry`] - snapshot of the page structure, built once at startup
//! - [`NavigationController`] - the state machine; owns the registry, the
//!   visibility [`Surface`] and the [`LocationStore`](spa_store::LocationStore)
//! - [`bootstrap`] - builds everything, wires the page's links and picks
//!   the entry location from the session
//!
//! The controller only needs something that can show and hide handles, so
//! it runs against [`DomSurface`] in the shell and against plain sets in
//! tests.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use spa_dom::Document;
//! use spa_nav::{NavConfig, bootstrap};
//! use spa_store::FileStore;
//!
//! let page = Document::parse(&std::fs::read_to_string("index.html")?)?;
//! let store = Arc::new(FileStore::open("storage.json")?);
//! let mut shell = bootstrap(page, store, &NavConfig::default())?;
//! shell.click_path("/billing/invoices/")?;
//! ```

mod bootstrap;
mod config;
mod controller;
mod error;
mod link;
mod registry;
mod surface;

pub use bootstrap::{ClickOutcome, Entry, Shell, WiredLink, bootstrap, enter};
pub use config::{NavConfig, NavigationMode};
pub use controller::{NavigationController, NavigationState, Transition};
pub use error::{BootError, NavError, RegistryError};
pub use link::{LinkTarget, parse_link_path};
pub use registry::{PageEntry, Registry};
pub use surface::{DomSurface, Surface};
