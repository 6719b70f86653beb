//! # Family Site
//!
//! Client-side state layer of a family website: the family tree, the event
//! calendar, the photo gallery, news articles and the contact directory, each
//! kept in its own store and persisted as a JSON document per store.
//!
//! ## Layout:
//! - [`domain`]: the stores, the contact form and seed content
//! - [`state`]: modal dialog and lightbox cursor
//! - [`storage`]: where store documents are kept
//! - [`site`]: [`FamilySite`], which owns everything above
//! - [`config`] and [`logging`]: runtime settings and log setup
//!
//! ```no_run
//! use family_site::{logging, FamilySite, SiteConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SiteConfig::load_or_default("site_config.yaml".as_ref())?;
//! logging::init_logging(&config.log_level);
//! let mut site = FamilySite::open(config)?;
//! site.members.set_search_query("dupont");
//! for member in site.members.filtered_members() {
//!     println!("{} ({})", member.name, member.role);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod site;
pub mod state;
pub mod storage;

#[cfg(test)]
mod test_utils;

pub use config::SiteConfig;
pub use error::{FormError, StoreError};
pub use site::FamilySite;
