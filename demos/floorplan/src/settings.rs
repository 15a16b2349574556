//! Optional TOML settings file.
//!
//! ```toml
//! [routing]
//! weight0   = 1.0
//! alpha     = 2.0
//! modulo    = 10
//! downscale = "auto"   # or "4"
//!
//! [session]
//! inflate        = 1
//! snap_endpoints = true
//! sweep_alpha    = [0.0, 1.0, 4.0]
//! ```
//!
//! Command-line flags override values read here.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use cf_core::RoutingConfig;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub routing: RoutingConfig,
    pub session: SessionSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSettings {
    /// Obstacle growth in cells after downscaling.
    pub inflate:        u32,
    /// Snap blocked or out-of-bounds endpoints to the nearest free cell.
    pub snap_endpoints: bool,
    /// Extra sessions, one per alpha, compared after the main run.
    pub sweep_alpha:    Vec<f64>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing settings {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use cf_core::Downscale;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let s = Settings::parse("").unwrap();
        assert_eq!(s.routing, RoutingConfig::default());
        assert_eq!(s.session.inflate, 0);
        assert!(!s.session.snap_endpoints);
        assert!(s.session.sweep_alpha.is_empty());
    }

    #[test]
    fn full_file() {
        let s = Settings::parse(
            r#"
            [routing]
            weight0 = 2.0
            alpha = 0.5
            modulo = 4
            downscale = "auto"

            [session]
            inflate = 1
            snap_endpoints = true
            sweep_alpha = [0.0, 3.0]
            "#,
        )
        .unwrap();
        assert_eq!(s.routing.weight0, 2.0);
        assert_eq!(s.routing.alpha, 0.5);
        assert_eq!(s.routing.modulo, 4);
        assert_eq!(s.routing.downscale, Downscale::Auto);
        assert_eq!(s.session.inflate, 1);
        assert!(s.session.snap_endpoints);
        assert_eq!(s.session.sweep_alpha, vec![0.0, 3.0]);
    }

    #[test]
    fn partial_routing_table_keeps_defaults() {
        let s = Settings::parse("[routing]\ndownscale = \"3\"\n").unwrap();
        assert_eq!(s.routing.downscale, Downscale::Factor(3));
        assert_eq!(s.routing.modulo, RoutingConfig::default().modulo);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(Settings::parse("[session]\nsnap = true\n").is_err());
        assert!(Settings::parse("[routing]\ndownscale = \"half\"\n").is_err());
    }
}
