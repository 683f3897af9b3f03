//! Geometric constants and scheduling policy for a page stack.
//!
//! [`DeckConfig::default()`] reproduces the stock look: waiting panels sit a
//! full panel height below the viewport, hidden panels sink to 75% with a
//! 300px push back, and the open menu fans the stack out 200px deep with a
//! 50px step per position.
//!
//! With the `policy-config` feature the config can be loaded from TOML or
//! JSON. Missing keys take their default values.

/// What the machine does with a request that arrives while a transition is
/// still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BusyPolicy {
    /// Keep the latest request in a single slot and replay it once the
    /// in-flight transition has finalized.
    #[default]
    Queue,
    /// Drop requests until the in-flight transition has finalized.
    Ignore,
}

/// Errors from loading or validating a [`DeckConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The TOML/JSON source could not be parsed.
    Parse(String),
    /// A value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Placement constants for every panel position, plus the busy policy.
///
/// Percentages are relative to the panel's own size; depths are CSS pixels
/// (negative values move away from the viewer).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DeckConfig {
    /// Vertical offset of panels waiting in the stack, and of the receding
    /// set during a transition.
    pub reveal_y_pct: f32,
    /// Vertical offset of panels outside the stack.
    pub hidden_y_pct: f32,
    /// Depth of panels outside the stack.
    pub hidden_z_px: f32,
    /// Vertical offset of stack panels while the menu is open.
    pub receding_y_pct: f32,
    /// Depth of the front stack position while the menu is open.
    pub receding_base_z_px: f32,
    /// Additional depth per stack position while the menu is open.
    pub receding_step_z_px: f32,
    /// Opacity lost per stack position.
    pub opacity_step: f32,
    /// Handling of requests that arrive mid-transition.
    pub busy_policy: BusyPolicy,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            reveal_y_pct: 100.0,
            hidden_y_pct: 75.0,
            hidden_z_px: -300.0,
            receding_y_pct: 75.0,
            receding_base_z_px: -200.0,
            receding_step_z_px: -50.0,
            opacity_step: 0.1,
            busy_policy: BusyPolicy::Queue,
        }
    }
}

impl DeckConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertical offset used for waiting panels.
    #[must_use]
    pub fn with_reveal_offset(mut self, y_pct: f32) -> Self {
        self.reveal_y_pct = y_pct;
        self
    }

    /// Set the offset used for panels outside the stack.
    #[must_use]
    pub fn with_hidden_offset(mut self, y_pct: f32, z_px: f32) -> Self {
        self.hidden_y_pct = y_pct;
        self.hidden_z_px = z_px;
        self
    }

    /// Set the open-menu fan out: vertical offset, base depth, depth step.
    #[must_use]
    pub fn with_receding(mut self, y_pct: f32, base_z_px: f32, step_z_px: f32) -> Self {
        self.receding_y_pct = y_pct;
        self.receding_base_z_px = base_z_px;
        self.receding_step_z_px = step_z_px;
        self
    }

    /// Set the opacity lost per stack position.
    #[must_use]
    pub fn with_opacity_step(mut self, step: f32) -> Self {
        self.opacity_step = step;
        self
    }

    /// Set the busy policy.
    #[must_use]
    pub fn with_busy_policy(mut self, policy: BusyPolicy) -> Self {
        self.busy_policy = policy;
        self
    }

    /// Check that every value is finite and the opacity ramp stays within
    /// `[0, 1]` for all three stack positions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("reveal_y_pct", self.reveal_y_pct),
            ("hidden_y_pct", self.hidden_y_pct),
            ("hidden_z_px", self.hidden_z_px),
            ("receding_y_pct", self.receding_y_pct),
            ("receding_base_z_px", self.receding_base_z_px),
            ("receding_step_z_px", self.receding_step_z_px),
            ("opacity_step", self.opacity_step),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if !(0.0..=0.5).contains(&self.opacity_step) {
            return Err(ConfigError::Invalid(format!(
                "opacity_step must be within [0, 0.5], got {}",
                self.opacity_step
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed input, [`ConfigError::Invalid`]
    /// for out-of-range values.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed input, [`ConfigError::Invalid`]
    /// for out-of-range values.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
