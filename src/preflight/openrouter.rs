//! OpenRouter preflight check.

use super::CheckResult;
use crate::models::config::OpenRouterConfig;

/// Report whether AI naming is enabled. Never fails: naming is optional.
pub fn check(config: &OpenRouterConfig) -> CheckResult {
    if config.is_enabled() {
        CheckResult::ok(
            "OpenRouter",
            &format!("naming enabled (model: {})", config.model),
        )
    } else {
        CheckResult::ok("OpenRouter", "API key not set, naming disabled")
    }
}
