//! `apilens config` and `apilens providers` commands.

use std::path::Path;

use al_llm::{LlmConfig, Provider, API_KEY_ENV};
use anyhow::{Context, Result};

use crate::cli::SetArgs;

/// Print the effective configuration, environment overrides included.
pub fn show(project: &Path) -> Result<()> {
    let config = LlmConfig::load(project)?;
    print!("{}", describe(&config, &LlmConfig::path(project).display().to_string()));
    Ok(())
}

/// Apply the given changes to the stored configuration and save it.
///
/// The stored file is edited, so a key supplied through the environment is
/// never written to disk.
pub fn set(args: &SetArgs) -> Result<()> {
    let path = LlmConfig::path(&args.project);
    let mut config = LlmConfig::load_file(&path)?;
    apply(&mut config, args);
    let saved = config
        .save(&args.project)
        .with_context(|| format!("cannot save configuration under {}", args.project.display()))?;
    println!("Saved {}", saved.display());
    print!("{}", describe(&config, &saved.display().to_string()));
    Ok(())
}

pub fn providers() {
    for provider in Provider::ALL {
        println!(
            "{:<9} {:<22} {:<14} {}",
            provider.id(),
            provider.display_name(),
            provider.default_model(),
            provider.default_api_url()
        );
    }
}

/// Provider selection runs first so explicit URL and model values win over
/// the provider defaults.
fn apply(config: &mut LlmConfig, args: &SetArgs) {
    if let Some(provider) = args.provider {
        config.select_provider(provider);
    }
    if let Some(key) = &args.api_key {
        config.api_key = key.trim().to_string();
    }
    if let Some(url) = &args.api_url {
        config.api_url = url.trim().to_string();
    }
    if let Some(model) = &args.model {
        config.model = model.trim().to_string();
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_secs = secs;
    }
}

fn describe(config: &LlmConfig, path: &str) -> String {
    let key_source = if std::env::var(API_KEY_ENV).is_ok_and(|v| !v.trim().is_empty()) {
        format!(" (from {API_KEY_ENV})")
    } else {
        String::new()
    };
    format!(
        "Provider: {} ({})\nAPI URL:  {}\nModel:    {}\nAPI key:  {}{}\nTimeout:  {}s\nFile:     {}\n",
        config.provider.display_name(),
        config.provider.id(),
        config.api_url,
        config.model,
        config.masked_api_key(),
        key_source,
        config.timeout_secs,
        path
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn set_args(project: PathBuf) -> SetArgs {
        SetArgs {
            project,
            provider: None,
            api_key: None,
            api_url: None,
            model: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn explicit_model_wins_over_provider_default() {
        let mut config = LlmConfig::default();
        let args = SetArgs {
            provider: Some(Provider::Glm),
            model: Some("glm-4-air".to_string()),
            ..set_args(PathBuf::from("."))
        };
        apply(&mut config, &args);
        assert_eq!(config.provider, Provider::Glm);
        assert_eq!(config.api_url, Provider::Glm.default_api_url());
        assert_eq!(config.model, "glm-4-air");
    }

    #[test]
    fn set_persists_and_keeps_other_values() {
        let tmp = tempfile::TempDir::new().unwrap();
        let first = SetArgs {
            api_key: Some(" sk-0123456789 ".to_string()),
            timeout_secs: Some(30),
            ..set_args(tmp.path().to_path_buf())
        };
        set(&first).unwrap();

        let second = SetArgs {
            provider: Some(Provider::Qwen),
            ..set_args(tmp.path().to_path_buf())
        };
        set(&second).unwrap();

        let stored = LlmConfig::load_file(&LlmConfig::path(tmp.path())).unwrap();
        assert_eq!(stored.provider, Provider::Qwen);
        assert_eq!(stored.model, "qwen-plus");
        assert_eq!(stored.api_key, "sk-0123456789");
        assert_eq!(stored.timeout_secs, 30);
    }

    #[test]
    fn describe_masks_key() {
        let config = LlmConfig {
            api_key: "sk-0123456789abcdef".to_string(),
            ..LlmConfig::default()
        };
        let text = describe(&config, ".apilens.json");
        assert!(text.contains("Provider: DeepSeek (DEEPSEEK)"));
        assert!(text.contains("API key:  sk-0...cdef"));
        assert!(!text.contains("0123456789abcdef"));
    }
}
