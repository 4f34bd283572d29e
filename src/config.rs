//! Configuration for the condense pipeline
//!
//! Options are built in code with the `with_*` methods, or loaded from TOML:
//!
//! ```toml
//! format = "html"
//!
//! [optimize]
//! level = "granular"
//! inline-static = true
//! preserve-empty-whitespace = false
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::format::{CompactFormat, Format, FormatKind};

/// Errors that can occur when loading options
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How aggressively templates are inlined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizeLevel {
    /// Keep every template as a named definition
    None,
    /// Inline every template: a plain reformat with no abstraction
    FormatOnly,
    /// Pick the inlining passes individually
    Granular {
        /// Inline slots whose value is identical across all uses of a template
        inline_static: bool,
        /// Inline whole templates when expanding them is shorter
        inline_short_templates: bool,
    },
    /// Both granular passes
    #[default]
    Full,
}

impl OptimizeLevel {
    /// The granular flags this level implies, `None` for the non-granular levels
    pub fn passes(self) -> Option<(bool, bool)> {
        match self {
            OptimizeLevel::None | OptimizeLevel::FormatOnly => None,
            OptimizeLevel::Granular {
                inline_static,
                inline_short_templates,
            } => Some((inline_static, inline_short_templates)),
            OptimizeLevel::Full => Some((true, true)),
        }
    }
}

/// Optimization settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptimizeOptions {
    pub level: OptimizeLevel,
    /// Keep whitespace-only text nodes as ordinary placeholders
    pub preserve_empty_whitespace: bool,
}

impl OptimizeOptions {
    pub fn new(level: OptimizeLevel) -> Self {
        Self {
            level,
            preserve_empty_whitespace: false,
        }
    }

    pub fn with_preserve_empty_whitespace(mut self, preserve: bool) -> Self {
        self.preserve_empty_whitespace = preserve;
        self
    }
}

/// Configuration for one extraction
#[derive(Clone)]
pub struct CondenseOptions {
    pub optimize: OptimizeOptions,
    /// Output syntax
    pub format: Arc<dyn Format>,
    /// Treat the root as a discarded container and emit only its children
    pub ignore_root: bool,
}

impl Default for CondenseOptions {
    fn default() -> Self {
        Self {
            optimize: OptimizeOptions::default(),
            format: Arc::new(CompactFormat),
            ignore_root: false,
        }
    }
}

impl fmt::Debug for CondenseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CondenseOptions")
            .field("optimize", &self.optimize)
            .field("ignore_root", &self.ignore_root)
            .finish_non_exhaustive()
    }
}

/// TOML structure for deserializing options
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TomlOptions {
    format: Option<FormatKind>,
    optimize: Option<TomlOptimize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct TomlOptimize {
    level: Option<TomlLevel>,
    #[serde(default)]
    inline_static: bool,
    #[serde(default)]
    inline_short_templates: bool,
    #[serde(default)]
    preserve_empty_whitespace: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
enum TomlLevel {
    None,
    FormatOnly,
    Granular,
    Full,
}

impl CondenseOptions {
    /// Create options with defaults: full optimization, compact syntax
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load options from a TOML string; anything unset keeps its default
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlOptions = toml::from_str(content)?;
        let mut options = Self::default();

        if let Some(kind) = parsed.format {
            options.format = kind.strategy();
        }
        if let Some(optimize) = parsed.optimize {
            let level = match optimize.level {
                Some(TomlLevel::None) => OptimizeLevel::None,
                Some(TomlLevel::FormatOnly) => OptimizeLevel::FormatOnly,
                Some(TomlLevel::Granular) => OptimizeLevel::Granular {
                    inline_static: optimize.inline_static,
                    inline_short_templates: optimize.inline_short_templates,
                },
                Some(TomlLevel::Full) | None => OptimizeLevel::Full,
            };
            options.optimize = OptimizeOptions::new(level)
                .with_preserve_empty_whitespace(optimize.preserve_empty_whitespace);
        }
        Ok(options)
    }

    /// Set the optimization settings
    pub fn with_optimize(mut self, optimize: OptimizeOptions) -> Self {
        self.optimize = optimize;
        self
    }

    /// Set only the optimization level
    pub fn with_level(mut self, level: OptimizeLevel) -> Self {
        self.optimize.level = level;
        self
    }

    /// Set the output syntax
    pub fn with_format(mut self, format: impl Format + 'static) -> Self {
        self.format = Arc::new(format);
        self
    }

    /// Set the output syntax to a shared strategy
    pub fn with_shared_format(mut self, format: Arc<dyn Format>) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable fragment mode
    pub fn with_ignore_root(mut self, ignore_root: bool) -> Self {
        self.ignore_root = ignore_root;
        self
    }
}
