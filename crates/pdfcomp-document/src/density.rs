// SPDX-License-Identifier: MIT
//
// Density — ImageMagick-style sampling-resolution strings ("150", "150x150",
// "100%x100%") parsed into horizontal/vertical DPI for rasterization.

use tracing::warn;

/// Baseline DPI that percentage densities scale against.
const BASE_DPI: f64 = 96.0;

/// Default density string applied when the caller passes nothing useful.
pub const DEFAULT_DENSITY: &str = "100%x100%";

/// Rasterization resolution for a document load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    pub horizontal_dpi: f64,
    pub vertical_dpi: f64,
}

impl Default for Density {
    fn default() -> Self {
        Self {
            horizontal_dpi: BASE_DPI,
            vertical_dpi: BASE_DPI,
        }
    }
}

impl Density {
    /// Parse a density string.
    ///
    /// Accepted forms: a bare DPI value (`"150"`), an anisotropic pair
    /// (`"150x200"`), and percentage geometry (`"100%x100%"`, scaling the
    /// 96 DPI baseline). An unparseable string falls back to the default with
    /// a warning rather than failing the load.
    pub fn parse(spec: &str) -> Self {
        match try_parse(spec) {
            Some(density) => density,
            None => {
                warn!(spec, "unparseable density, using default");
                Self::default()
            }
        }
    }
}

fn try_parse(spec: &str) -> Option<Density> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    let mut parts = spec.splitn(2, ['x', 'X']);
    let horizontal = parse_component(parts.next()?)?;
    let vertical = match parts.next() {
        Some(token) => parse_component(token)?,
        None => horizontal,
    };
    Some(Density {
        horizontal_dpi: horizontal,
        vertical_dpi: vertical,
    })
}

fn parse_component(token: &str) -> Option<f64> {
    let token = token.trim();
    let (value, percent) = match token.strip_suffix('%') {
        Some(number) => (number.trim().parse::<f64>().ok()?, true),
        None => (token.parse::<f64>().ok()?, false),
    };
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    Some(if percent { BASE_DPI * value / 100.0 } else { value })
}
