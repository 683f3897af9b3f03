#![forbid(unsafe_code)]

//! WASM/DOM host for the page stack.
//!
//! The host reads the page markup, builds a
//! [`PageStack`](pagestack_core::PageStack), and wires browser events into
//! it:
//!
//! - style channels and class markers are written through a DOM
//!   [`Surface`](pagestack_core::Surface)
//! - `transitionend` (or `webkitTransitionEnd`) on the target panel completes
//!   page transitions; browsers without CSS transitions complete them
//!   synchronously
//! - clicks on the menu button, nav items, shortcut triggers and panels, and
//!   Escape on the document, go through the
//!   [`InputBinder`](pagestack_core::InputBinder)
//!
//! The DOM parts only build for `wasm32`; options, errors and the style
//! mapping are platform independent.
//!
//! # Example
//!
//! ```ignore
//! // JS: import init, { mount } from "./pagestack_web.js";
//! //     await init(); const app = mount();
//! let app = pagestack_web::mount_with(
//!     MountOptions::default().with_shortcut("about-us", "page-docu"),
//! )?;
//! ```

mod error;
mod options;
pub mod style;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use error::MountError;
pub use options::MountOptions;

#[cfg(target_arch = "wasm32")]
pub use dom::{Mounted, PageStackApp, mount, mount_app, mount_with};
