use std::env;
use std::time::Duration;

/// Safety settings shared by the dispatcher and the input layer.
///
/// Built once at startup and never mutated afterwards. `pause` is the
/// minimum delay enforced after each OS-touching action; `fail_safe` aborts
/// an in-flight pointer operation when the cursor reaches a screen corner.
#[derive(Debug, Clone)]
pub struct SafetyConfig {
    pub pause: Duration,
    pub fail_safe: bool,
}

const DEFAULT_PAUSE_SECS: f64 = 0.1;

impl SafetyConfig {
    pub fn from_env() -> Self {
        let pause = env::var("GUI_SIDECAR_PAUSE")
            .ok()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(Duration::from_secs_f64)
            .unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_PAUSE_SECS));

        let fail_safe = env::var("GUI_SIDECAR_FAILSAFE")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "off" | "no"))
            .unwrap_or(true);

        Self { pause, fail_safe }
    }

    /// Settings for tests: no pacing, no corner abort.
    #[cfg(test)]
    pub fn disabled() -> Self {
        Self {
            pause: Duration::ZERO,
            fail_safe: false,
        }
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            pause: Duration::from_secs_f64(DEFAULT_PAUSE_SECS),
            fail_safe: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SafetyConfig::default();
        assert_eq!(config.pause, Duration::from_millis(100));
        assert!(config.fail_safe);
    }
}
