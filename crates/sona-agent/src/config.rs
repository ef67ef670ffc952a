use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SonaConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub region: String,
    /// S3 bucket used to stage utterances for transcription.
    pub bucket: String,
    /// Bedrock model id for classification, intent routing, and chat.
    pub model_id: String,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    /// How long each microphone capture runs, in seconds.
    #[serde(default = "default_listen_duration_secs")]
    pub listen_duration_secs: u64,
    /// Saying this ends the conversation. Matched case-insensitively.
    #[serde(default = "default_exit_phrase")]
    pub exit_phrase: String,
    /// Cap on silent re-asks per question. `None` keeps asking forever.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_attempts: Option<u32>,
    /// argv for the external emotion classifier. `None` disables sampling.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub emotion_command: Option<Vec<String>>,
    pub created_at: jiff::Timestamp,
    pub credentials: CredentialSource,
}

fn default_voice_id() -> String {
    "Joanna".to_string()
}

fn default_language_code() -> String {
    "en-US".to_string()
}

fn default_listen_duration_secs() -> u64 {
    8
}

fn default_exit_phrase() -> String {
    "goodbye".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Inline {
        access_key_id: String,
        secret_access_key: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        session_token: Option<String>,
    },
    Profile {
        profile_name: String,
    },
    DefaultChain,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.sona.agent"))
}

fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> eyre::Result<SonaConfig> {
    let path = config_path()?;
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: SonaConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Sona."
        ));
    }

    // v0 → v1: stamp the version on pre-versioned configs. Field additions
    // since then are covered by serde defaults.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(config: &SonaConfig) -> eyre::Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Set restrictive permissions on Unix before renaming
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config() -> eyre::Result<()> {
    let path = config_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_config_json() -> serde_json::Value {
        serde_json::json!({
            "region": "us-east-1",
            "bucket": "sona-utterances",
            "model_id": "anthropic.claude-3-haiku-20240307-v1:0",
            "created_at": "2026-08-01T00:00:00Z",
            "credentials": { "type": "default_chain" },
        })
    }

    #[test]
    fn pre_versioned_config_migrates_and_gets_defaults() {
        let migrated = migrate(minimal_config_json(), 0).unwrap();
        let config: SonaConfig = serde_json::from_value(migrated).unwrap();
        assert_eq!(config.config_version, 1);
        assert_eq!(config.voice_id, "Joanna");
        assert_eq!(config.language_code, "en-US");
        assert_eq!(config.exit_phrase, "goodbye");
        assert_eq!(config.listen_duration_secs, 8);
        assert!(config.max_attempts.is_none());
        assert!(config.emotion_command.is_none());
    }

    #[test]
    fn future_version_is_rejected() {
        let mut json = minimal_config_json();
        json["config_version"] = serde_json::json!(99);
        assert!(migrate(json, 99).is_err());
    }
}
