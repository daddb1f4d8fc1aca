//! Weather variables that can be analysed, bound to Meteomatics parameter codes.

use serde::{Deserialize, Serialize};

/// A named weather quantity, the provider parameter it maps to, and the threshold
/// an exceedance is measured against.
///
/// # Examples
///
/// ```
/// use nimbus::VariableSpec;
///
/// let hot_days = VariableSpec::temperature().with_threshold(32.5);
/// assert_eq!(hot_days.parameter, "t_2m:C");
/// assert_eq!(hot_days.threshold, 32.5);
///
/// let custom = VariableSpec::new("Dew point (°C)", "dew_point_2m:C", 18.0);
/// assert_eq!(custom.label, "Dew point (°C)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    /// Human readable name, also used as the column name on export.
    pub label: String,
    /// Opaque provider-specific parameter code, e.g. `precip_24h:mm`.
    pub parameter: String,
    pub threshold: f64,
}

impl VariableSpec {
    pub fn new(label: impl Into<String>, parameter: impl Into<String>, threshold: f64) -> Self {
        Self {
            label: label.into(),
            parameter: parameter.into(),
            threshold,
        }
    }

    /// Air temperature 2 m above ground, default threshold 30 °C.
    pub fn temperature() -> Self {
        Self::new("Temperature (°C)", "t_2m:C", 30.0)
    }

    /// Precipitation accumulated over 24 hours, default threshold 10 mm.
    pub fn precipitation() -> Self {
        Self::new("Precipitation (mm, 24h)", "precip_24h:mm", 10.0)
    }

    /// Wind speed 10 m above ground, default threshold 10 km/h.
    pub fn wind_speed() -> Self {
        Self::new("Windspeed (km/h)", "wind_speed_10m:kmh", 10.0)
    }

    /// All built-in variables with their default thresholds.
    pub fn presets() -> Vec<Self> {
        vec![Self::temperature(), Self::precipitation(), Self::wind_speed()]
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_have_distinct_parameters() {
        let presets = VariableSpec::presets();
        assert_eq!(presets.len(), 3);
        assert_eq!(presets[0].threshold, 30.0);
        assert_eq!(presets[1].parameter, "precip_24h:mm");
        assert_eq!(presets[2].threshold, 10.0);
    }
}
