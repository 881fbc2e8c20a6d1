//! Picking a default model from the models a key can use.

use once_cell::sync::Lazy;
use regex::Regex;

/// Model used when nothing is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

static DOTTED_FLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"gemini-(\d+)\.(\d+)-flash").expect("valid regex"));
static DASHED_FLASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"gemini-(\d+)-(\d+)-flash").expect("valid regex"));

/// Preference score for a model name; higher is better.
///
/// Versioned flash models rank first (newest version wins), then any other
/// gemini flash model, then any gemini model.
pub fn model_score(name: &str) -> (u8, u32, u32) {
    for pattern in [&*DOTTED_FLASH, &*DASHED_FLASH] {
        if let Some(caps) = pattern.captures(name) {
            let major = caps[1].parse().unwrap_or(0);
            let minor = caps[2].parse().unwrap_or(0);
            return (3, major, minor);
        }
    }
    if name.contains("gemini") && name.contains("flash") {
        (2, 0, 0)
    } else if name.contains("gemini") {
        (1, 0, 0)
    } else {
        (0, 0, 0)
    }
}

/// Best model among `models`, without the `models/` prefix.
///
/// Among equal scores the first listed model wins.
pub fn recommend_model<S: AsRef<str>>(models: &[S]) -> Option<String> {
    models
        .iter()
        .map(|m| m.as_ref())
        .enumerate()
        .max_by(|(ia, a), (ib, b)| model_score(a).cmp(&model_score(b)).then(ib.cmp(ia)))
        .map(|(_, name)| name.strip_prefix("models/").unwrap_or(name).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores() {
        assert_eq!(model_score("models/gemini-2.5-flash"), (3, 2, 5));
        assert_eq!(model_score("gemini-1-5-flash-latest"), (3, 1, 5));
        assert_eq!(model_score("gemini-flash-latest"), (2, 0, 0));
        assert_eq!(model_score("gemini-2.5-pro"), (1, 0, 0));
        assert_eq!(model_score("gemma-3-27b-it"), (0, 0, 0));
    }

    #[test]
    fn test_recommend_newest_flash() {
        let models = [
            "models/gemini-1.5-flash",
            "models/gemini-2.5-pro",
            "models/gemini-2.5-flash",
            "models/gemini-2.0-flash",
        ];
        assert_eq!(recommend_model(&models).as_deref(), Some("gemini-2.5-flash"));
    }

    #[test]
    fn test_recommend_ties_keep_first() {
        let models = ["gemini-pro", "gemini-ultra"];
        assert_eq!(recommend_model(&models).as_deref(), Some("gemini-pro"));
    }

    #[test]
    fn test_recommend_empty() {
        let models: [&str; 0] = [];
        assert_eq!(recommend_model(&models), None);
    }
}
