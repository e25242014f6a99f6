//! Configuration validation

use super::Settings;

/// Validate settings, collecting every problem rather than stopping at the first
pub fn validate(settings: &Settings) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if settings.server.host.trim().is_empty() {
        errors.push("server.host must not be empty".to_string());
    }

    if settings.model.default.trim().is_empty() {
        errors.push("model.default must not be empty".to_string());
    }

    if settings.model.max_tokens == 0 {
        errors.push("model.max_tokens must be greater than zero".to_string());
    }

    if settings.search.max_results == 0 {
        errors.push("search.max_results must be greater than zero".to_string());
    }

    if settings.search.default_retailers.is_empty() {
        errors.push("search.default_retailers must name at least one retailer".to_string());
    }

    if settings
        .search
        .default_retailers
        .iter()
        .any(|r| r.trim().is_empty())
    {
        errors.push("search.default_retailers must not contain blank names".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
