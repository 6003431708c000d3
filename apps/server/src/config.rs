// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server configuration loaded from environment variables.

use ifc_slicer_processing::{ClassifyOptions, DEFAULT_MAX_DEPTH, DEFAULT_PARALLEL_THRESHOLD};
use std::fmt;
use std::str::FromStr;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" | "local" => Environment::Development,
            _ => Environment::Production,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("dev"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment; development raises the default log level.
    pub environment: Environment,
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Maximum upload size in MB.
    pub max_file_size_mb: usize,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Number of rayon worker threads.
    pub worker_threads: usize,
    /// Element count at which classification runs in parallel.
    pub parallel_threshold: usize,
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            environment: Environment::parse(
                &lookup("ENVIRONMENT").unwrap_or_else(|| "production".into()),
            ),
            host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port: parse_or(lookup("SERVER_PORT"), 8800),
            max_file_size_mb: parse_or(lookup("MAX_FILE_SIZE_MB"), 100),
            request_timeout_secs: parse_or(lookup("REQUEST_TIMEOUT_SECS"), 120),
            worker_threads: parse_or(lookup("WORKER_THREADS"), num_cpus::get()).max(1),
            parallel_threshold: parse_or(lookup("PARALLEL_THRESHOLD"), DEFAULT_PARALLEL_THRESHOLD),
        }
    }

    pub fn is_dev(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    /// Options handed to the classifier for each upload.
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            parallel_threshold: self.parallel_threshold,
            max_flatten_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_dev() {
            "debug,tower_http=debug"
        } else {
            "info,tower_http=info"
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
