//! Top-level engine configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    CoherenceConfig, ConfidenceConfig, NormalityTestKind, OutlierConfig, PipelineConfig,
    RangeConfig, RepairConfig, SelectorConfig, MEAN_SAMPLE_FLOOR,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`CASA_*`)
/// 3. Project config (`casa.toml` in the project root)
/// 4. User config (`~/.casa/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub repair: RepairConfig,
    pub coherence: CoherenceConfig,
    pub ranges: RangeConfig,
    pub outliers: OutlierConfig,
    pub selector: SelectorConfig,
    pub confidence: ConfidenceConfig,
    pub pipeline: PipelineConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub reference_year: Option<i32>,
    pub threads: Option<usize>,
    pub normality_test: Option<NormalityTestKind>,
    pub z_threshold: Option<f64>,
    pub mad_threshold: Option<f64>,
}

impl EngineConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("casa.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(root = %root.display(), "engine configuration resolved");

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
        let positive = [
            ("outliers.iqr_multiplier", config.outliers.iqr_multiplier),
            ("outliers.extreme_iqr_multiplier", config.outliers.extreme_iqr_multiplier),
            ("outliers.z_threshold", config.outliers.z_threshold),
            ("outliers.mad_threshold", config.outliers.mad_threshold),
            ("repair.area_per_bedroom", config.repair.area_per_bedroom),
            ("selector.strong_skew", config.selector.strong_skew),
            ("selector.max_cv", config.selector.max_cv),
        ];
        for (field, value) in positive {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(validation(field, "must be a positive number"));
                }
            }
        }

        if let Some(k) = config.outliers.consensus_threshold {
            if !(1..=4).contains(&k) {
                return Err(validation("outliers.consensus_threshold", "must be between 1 and 4"));
            }
        }
        for bound in &config.outliers.logical {
            if bound.min > bound.max {
                return Err(validation(
                    "outliers.logical",
                    &format!("min exceeds max for {}", bound.variable),
                ));
            }
        }

        if let Some(alpha) = config.selector.normality_alpha {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(validation("selector.normality_alpha", "must be between 0.0 and 1.0"));
            }
        }
        if let Some(skew) = config.selector.normal_max_abs_skew {
            if !(skew.is_finite() && skew >= 0.0) {
                return Err(validation("selector.normal_max_abs_skew", "must not be negative"));
            }
        }
        let min_n = config.selector.effective_min_n();
        let small_n = config.selector.effective_small_n();
        let mean_min_n = config.selector.effective_mean_min_n();
        if min_n == 0 {
            return Err(validation("selector.min_n", "must be greater than 0"));
        }
        if mean_min_n < MEAN_SAMPLE_FLOOR {
            return Err(validation(
                "selector.mean_min_n",
                &format!("must be at least {MEAN_SAMPLE_FLOOR}"),
            ));
        }
        if !(min_n <= small_n && small_n <= mean_min_n) {
            return Err(validation(
                "selector",
                "sample-size thresholds must satisfy min_n <= small_n <= mean_min_n",
            ));
        }

        if config.coherence.effective_min_surface_ratio()
            >= config.coherence.effective_max_surface_ratio()
        {
            return Err(validation(
                "coherence.min_surface_ratio",
                "must be lower than coherence.max_surface_ratio",
            ));
        }

        for entry in &config.ranges.entries {
            if let Some(field) = entry.limits.inverted_bounds().first() {
                return Err(validation(
                    "ranges.entries",
                    &format!(
                        "{} bounds inverted for {}/{}",
                        field, entry.property_type, entry.operation
                    ),
                ));
            }
        }
        if let Some(default) = &config.ranges.default {
            if let Some(field) = default.inverted_bounds().first() {
                return Err(validation("ranges.default", &format!("{} bounds inverted", field)));
            }
        }

        if let Some(score) = config.confidence.base_score {
            if !(0.0..=100.0).contains(&score) {
                return Err(validation("confidence.base_score", "must be between 0 and 100"));
            }
        }
        if config.pipeline.threads == Some(0) {
            return Err(validation("pipeline.threads", "must be greater than 0"));
        }
        Ok(())
    }

    /// Returns the user config path: `~/.casa/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".casa").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut EngineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EngineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only values present in `other` override.
    fn merge(base: &mut EngineConfig, other: &EngineConfig) {
        base.repair.merge_from(&other.repair);
        base.coherence.merge_from(&other.coherence);
        base.ranges.merge_from(&other.ranges);
        base.outliers.merge_from(&other.outliers);
        base.selector.merge_from(&other.selector);
        base.confidence.merge_from(&other.confidence);
        base.pipeline.merge_from(&other.pipeline);
    }

    /// Apply environment variable overrides.
    /// Pattern: `CASA_OUTLIER_Z_THRESHOLD`, `CASA_PIPELINE_THREADS`, etc.
    /// A set but unparseable variable is an error rather than a silent default.
    fn apply_env_overrides(config: &mut EngineConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<i32>("CASA_REFERENCE_YEAR")? {
            config.repair.reference_year = Some(v);
        }
        if let Some(v) = env_parse::<f64>("CASA_OUTLIER_IQR_MULTIPLIER")? {
            config.outliers.iqr_multiplier = Some(v);
        }
        if let Some(v) = env_parse::<f64>("CASA_OUTLIER_Z_THRESHOLD")? {
            config.outliers.z_threshold = Some(v);
        }
        if let Some(v) = env_parse::<f64>("CASA_OUTLIER_MAD_THRESHOLD")? {
            config.outliers.mad_threshold = Some(v);
        }
        if let Some(v) = env_parse::<usize>("CASA_SELECTOR_MEAN_MIN_N")? {
            config.selector.mean_min_n = Some(v);
        }
        if let Ok(val) = std::env::var("CASA_SELECTOR_NORMALITY_TEST") {
            let kind = NormalityTestKind::from_name(&val).ok_or_else(|| {
                ConfigError::InvalidValue {
                    field: "CASA_SELECTOR_NORMALITY_TEST".to_string(),
                    message: format!("unknown normality test `{val}`"),
                }
            })?;
            config.selector.normality_test = Some(kind);
        }
        if let Some(v) = env_parse::<f64>("CASA_CONFIDENCE_BASE_SCORE")? {
            config.confidence.base_score = Some(v);
        }
        if let Some(v) = env_parse::<usize>("CASA_PIPELINE_THREADS")? {
            config.pipeline.threads = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut EngineConfig, cli: &CliOverrides) {
        if let Some(v) = cli.reference_year {
            config.repair.reference_year = Some(v);
        }
        if let Some(v) = cli.threads {
            config.pipeline.threads = Some(v);
        }
        if let Some(v) = cli.normality_test {
            config.selector.normality_test = Some(v);
        }
        if let Some(v) = cli.z_threshold {
            config.outliers.z_threshold = Some(v);
        }
        if let Some(v) = cli.mad_threshold {
            config.outliers.mad_threshold = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn validation(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                field: key.to_string(),
                message: format!("cannot parse `{val}`"),
            }),
        Err(_) => Ok(None),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
