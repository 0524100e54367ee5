//! # contour-conf
//!
//! Process-wide configuration for Contour.
//!
//! Settings are an explicit value constructed once during startup and passed
//! into the orchestrator; nothing here is a hidden global. Values are layered:
//! defaults, then an optional TOML file, then `CONTOUR_*` environment
//! variables.
//!
//! | Key | Env | Default |
//! |---|---|---|
//! | `camelize` | `CONTOUR_CAMELIZE` | `true` |
//! | `encoder` | `CONTOUR_ENCODER` | `json` |
//! | `max_depth` | `CONTOUR_MAX_DEPTH` | `10` |

pub mod env;
pub mod settings;

pub use env::{Env, EnvError};
pub use settings::{DEFAULT_MAX_DEPTH, EncoderKind, Settings, SettingsError};
