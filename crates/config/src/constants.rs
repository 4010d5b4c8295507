//! Names that stay fixed across releases: config location and env overrides

pub const APP_DIR: &str = "parklot";
pub const CONFIG_FILE: &str = "config.toml";

pub const ENV_CAPACITY: &str = "PARKLOT_CAPACITY";
pub const ENV_NAME: &str = "PARKLOT_NAME";
pub const ENV_LOG_LEVEL: &str = "PARKLOT_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "PARKLOT_LOG_JSON";
