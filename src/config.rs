//! Process-wide attribute names and defaults.
//!
//! The configuration is read by every binding pass. It can be replaced exactly once, before the first
//! [`apply`](`crate::apply`) or [`render`](`crate::render`) call, through [`install`].

use crate::Error;
use once_cell::sync::OnceCell;
use tracing::{debug, instrument};

static CONFIG: OnceCell<Config> = OnceCell::new();

/// Attribute names and defaults used while binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	/// Attribute holding the whitespace-separated binding names. `"class"` by default.
	pub class_attr: String,
	/// Targets used when an element's [`map_attr`](`Config::map_attr`) has no entry for a binding. `["text"]` by default.
	pub default_map_target: Vec<String>,
	/// Attribute naming the key under which the current sequence index is exposed. `"data-index"` by default.
	pub index_attr: String,
	/// Attribute holding per-element target overrides (`name:target,target;name2:target`). `"data-map"` by default.
	pub map_attr: String,
	/// Attribute naming the key a sequence is rebound to instead of being fanned out here. `"data-member"` by default.
	pub member_attr: String,
	/// Tag of the element [`render`](`crate::render`) wraps markup in before parsing. `"div"` by default.
	pub template_wrapper_tag: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			class_attr: "class".to_owned(),
			default_map_target: vec!["text".to_owned()],
			index_attr: "data-index".to_owned(),
			map_attr: "data-map".to_owned(),
			member_attr: "data-member".to_owned(),
			template_wrapper_tag: "div".to_owned(),
		}
	}
}

/// Installs `config` as the process-wide configuration.
///
/// # Errors
///
/// Iff a configuration was already installed, or [`get`] was already called (which freezes the default).
#[instrument]
pub fn install(config: Config) -> Result<(), Error> {
	CONFIG.set(config).map_err(|_| Error::ConfigAlreadyInstalled)?;
	debug!("Installed configuration.");
	Ok(())
}

/// The installed configuration, or [`Config::default`] if none was installed.
pub fn get() -> &'static Config {
	CONFIG.get_or_init(Config::default)
}
