//! Configuration validation.
//!
//! Runs before any data is fetched so a bad config fails fast.

use crate::domain::error::SwingError;
use crate::domain::fundamentals::SectorThresholds;
use crate::ports::config_port::ConfigPort;

pub const SECTOR_SECTION_PREFIX: &str = "sector:";

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), SwingError> {
    validate_data_paths(config)?;
    validate_lookback(config)?;
    validate_evaluator(config)?;
    validate_sectors(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> SwingError {
    SwingError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_data_paths(config: &dyn ConfigPort) -> Result<(), SwingError> {
    for key in ["prices_dir", "fundamentals"] {
        match config.get_string("data", key) {
            Some(s) if !s.trim().is_empty() => {}
            _ => {
                return Err(SwingError::ConfigMissing {
                    section: "data".to_string(),
                    key: key.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), SwingError> {
    if config.get_int("data", "lookback_days", 100) < 1 {
        return Err(invalid("data", "lookback_days", "lookback_days must be at least 1"));
    }
    Ok(())
}

/// Rejects keys that are present but not numbers, which `get_double` would
/// otherwise silently replace with the default.
fn read_number(config: &dyn ConfigPort, section: &str, key: &str, default: f64) -> Result<f64, SwingError> {
    match config.get_string(section, key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(section, key, &format!("{:?} is not a finite number", raw))),
    }
}

fn validate_evaluator(config: &dyn ConfigPort) -> Result<(), SwingError> {
    let adx = read_number(config, "evaluator", "adx_threshold", 25.0)?;
    let weak = read_number(config, "evaluator", "weak_trend_threshold", 20.0)?;
    let volume = read_number(config, "evaluator", "volume_threshold", 1.5)?;
    let stop = read_number(config, "evaluator", "stop_atr_multiple", 2.0)?;
    let target = read_number(config, "evaluator", "target_atr_multiple", 4.0)?;

    if !(0.0..=100.0).contains(&adx) {
        return Err(invalid("evaluator", "adx_threshold", "adx_threshold must be between 0 and 100"));
    }
    if !(0.0..=100.0).contains(&weak) {
        return Err(invalid(
            "evaluator",
            "weak_trend_threshold",
            "weak_trend_threshold must be between 0 and 100",
        ));
    }
    if weak > adx {
        return Err(invalid(
            "evaluator",
            "weak_trend_threshold",
            "weak_trend_threshold must not exceed adx_threshold",
        ));
    }
    if volume < 0.0 {
        return Err(invalid("evaluator", "volume_threshold", "volume_threshold must be non-negative"));
    }
    if stop <= 0.0 {
        return Err(invalid("evaluator", "stop_atr_multiple", "stop_atr_multiple must be positive"));
    }
    if target <= 0.0 {
        return Err(invalid("evaluator", "target_atr_multiple", "target_atr_multiple must be positive"));
    }
    Ok(())
}

fn validate_sectors(config: &dyn ConfigPort) -> Result<(), SwingError> {
    for section in config.sections() {
        if section.starts_with(SECTOR_SECTION_PREFIX) {
            read_sector(config, &section)?;
        }
    }
    Ok(())
}

/// Reads one `[sector:<name>]` section. Both keys are required.
pub fn read_sector(config: &dyn ConfigPort, section: &str) -> Result<SectorThresholds, SwingError> {
    let mut values = [0.0; 2];
    for (slot, key) in values.iter_mut().zip(["debt_equity_max", "pe_max"]) {
        if config.get_string(section, key).is_none() {
            return Err(SwingError::ConfigMissing {
                section: section.to_string(),
                key: key.to_string(),
            });
        }
        *slot = read_number(config, section, key, 0.0)?;
        if *slot <= 0.0 {
            return Err(invalid(section, key, "sector thresholds must be positive"));
        }
    }
    Ok(SectorThresholds::new(values[0], values[1]))
}
