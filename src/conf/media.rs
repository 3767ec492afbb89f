use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MediaConfig {
    /// Directory whose immediate subdirectories are the categories.
    #[serde(default = "MediaConfig::default_root")]
    pub root: PathBuf,
    /// Categories whose access is logged at warn level.
    #[serde(default = "MediaConfig::default_sensitive_categories")]
    pub sensitive_categories: Vec<String>,
}

impl MediaConfig {
    fn default_root() -> PathBuf {
        PathBuf::from("/media")
    }

    fn default_sensitive_categories() -> Vec<String> {
        vec![String::from("private")]
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            sensitive_categories: Self::default_sensitive_categories(),
        }
    }
}
