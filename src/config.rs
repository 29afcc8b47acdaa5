use serde::Deserialize;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default location of the "current toolchain" symlink
pub const DEFAULT_GO_BIN: &str = "/usr/local/bin/go";

/// Default repository whose tags make up the remote catalog
pub const DEFAULT_REPOSITORY: &str = "https://github.com/golang/go";

/// Releases older than this are hidden from the remote catalog by default
pub const DEFAULT_FLOOR_VERSION: &str = "1.13.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration file structure
///
/// Directory fields left out of the file are resolved from the environment by
/// [`Config::resolve`].
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub go_bin: Option<PathBuf>,
    pub go_command: Option<PathBuf>,
    pub installer_dir: Option<PathBuf>,
    pub editor_dir: Option<PathBuf>,
    pub sdk_dir: Option<PathBuf>,
    pub remote: RemoteConfig,
    pub log_file: Option<PathBuf>,
}

/// Remote catalog configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteConfig {
    pub repository: String,
    pub floor_version: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            repository: DEFAULT_REPOSITORY.to_string(),
            floor_version: DEFAULT_FLOOR_VERSION.to_string(),
        }
    }
}

/// Fully resolved settings used by the commands
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Symlink designating the active toolchain
    pub go_bin: PathBuf,
    /// `go` command used to install wrappers and edit modules
    pub go_command: PathBuf,
    /// Where `go install` places golang.org/dl wrappers
    pub installer_dir: PathBuf,
    /// Where the IDE downloads SDKs
    pub editor_dir: PathBuf,
    /// Where golang.org/dl wrappers unpack SDKs
    pub sdk_dir: PathBuf,
    pub remote: RemoteConfig,
    pub log_file: Option<PathBuf>,
    /// Home directory, if known; used for `$USER_HOME$` substitution
    pub home_dir: Option<PathBuf>,
}

/// Environment inputs for path resolution
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub home_dir: Option<PathBuf>,
    pub go_path: Option<String>,
    pub xdg_config_home: Option<String>,
}

impl Env {
    pub fn from_process() -> Self {
        Self {
            home_dir: dirs::home_dir(),
            go_path: std::env::var("GOPATH").ok(),
            xdg_config_home: std::env::var("XDG_CONFIG_HOME").ok(),
        }
    }
}

impl Config {
    /// Loads the file at `path` (defaults when it does not exist) and resolves it.
    pub fn load(path: &Path, env: &Env) -> Result<Self, ConfigError> {
        let file = match std::fs::read_to_string(path) {
            Ok(content) => {
                serde_json::from_str::<FileConfig>(&content).map_err(|source| {
                    ConfigError::Parse {
                        path: path.to_path_buf(),
                        source,
                    }
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(Self::resolve(file, env))
    }

    /// Fills every unset field from `env`
    pub fn resolve(file: FileConfig, env: &Env) -> Self {
        let home = env.home_dir.clone().unwrap_or_else(|| PathBuf::from("."));

        Self {
            go_bin: file.go_bin.unwrap_or_else(|| PathBuf::from(DEFAULT_GO_BIN)),
            go_command: file.go_command.unwrap_or_else(|| PathBuf::from("go")),
            installer_dir: file
                .installer_dir
                .unwrap_or_else(|| installer_dir_with_env(env.go_path.as_deref(), &home)),
            editor_dir: file.editor_dir.unwrap_or_else(|| home.join("go")),
            sdk_dir: file.sdk_dir.unwrap_or_else(|| home.join("sdk")),
            remote: file.remote,
            log_file: file.log_file,
            home_dir: env.home_dir.clone(),
        }
    }
}

/// Returns the path to the configuration file.
/// Uses $XDG_CONFIG_HOME/golangver/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/golangver/config.json,
/// or ./golangver/config.json if neither is available.
pub fn config_path(env: &Env) -> PathBuf {
    config_dir_with_env(env.xdg_config_home.clone(), env.home_dir.clone()).join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("golangver")
}

/// `bin` under the first GOPATH entry, or `~/go/bin` when GOPATH is unset
fn installer_dir_with_env(go_path: Option<&str>, home: &Path) -> PathBuf {
    go_path
        .and_then(|paths| std::env::split_paths(paths).find(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| home.join("go"))
        .join("bin")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn env() -> Env {
        Env {
            home_dir: Some(PathBuf::from("/home/gopher")),
            go_path: None,
            xdg_config_home: None,
        }
    }

    #[test]
    fn file_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<FileConfig>(json!({
            "goBin": "/opt/bin/go",
            "remote": {
                "floorVersion": "1.20.0"
            }
        }))
        .unwrap();

        assert_eq!(result.go_bin, Some(PathBuf::from("/opt/bin/go")));
        assert_eq!(result.remote.floor_version, "1.20.0");
        assert_eq!(result.remote.repository, DEFAULT_REPOSITORY);
        assert_eq!(result.installer_dir, None);
    }

    #[test]
    fn resolve_uses_defaults_for_empty_file() {
        let config = Config::resolve(FileConfig::default(), &env());

        assert_eq!(
            config,
            Config {
                go_bin: PathBuf::from("/usr/local/bin/go"),
                go_command: PathBuf::from("go"),
                installer_dir: PathBuf::from("/home/gopher/go/bin"),
                editor_dir: PathBuf::from("/home/gopher/go"),
                sdk_dir: PathBuf::from("/home/gopher/sdk"),
                remote: RemoteConfig::default(),
                log_file: None,
                home_dir: Some(PathBuf::from("/home/gopher")),
            }
        );
    }

    #[test]
    fn resolve_keeps_explicit_values() {
        let file = serde_json::from_value::<FileConfig>(json!({
            "goCommand": "/usr/lib/go/bin/go",
            "installerDir": "/opt/gobin",
            "editorDir": "/opt/ide-sdks",
            "sdkDir": "/opt/sdk",
            "logFile": "/tmp/golangver.log"
        }))
        .unwrap();

        let config = Config::resolve(file, &env());

        assert_eq!(config.go_command, PathBuf::from("/usr/lib/go/bin/go"));
        assert_eq!(config.installer_dir, PathBuf::from("/opt/gobin"));
        assert_eq!(config.editor_dir, PathBuf::from("/opt/ide-sdks"));
        assert_eq!(config.sdk_dir, PathBuf::from("/opt/sdk"));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/golangver.log")));
    }

    #[test]
    fn installer_dir_uses_first_gopath_entry() {
        let env = Env {
            go_path: Some("/work/go:/other/go".to_string()),
            ..env()
        };
        let config = Config::resolve(FileConfig::default(), &env);

        assert_eq!(config.installer_dir, PathBuf::from("/work/go/bin"));
    }

    #[test]
    fn load_returns_defaults_when_file_is_missing() {
        let temp_dir = TempDir::new().unwrap();

        let config = Config::load(&temp_dir.path().join("config.json"), &env()).unwrap();
        assert_eq!(config, Config::resolve(FileConfig::default(), &env()));
    }

    #[test]
    fn load_reports_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ goBin: ").unwrap();

        let result = Config::load(&path, &env());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn config_dir_with_env_uses_xdg_config_home_when_set() {
        let path = config_dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/golangver"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_home_config() {
        let path = config_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.config/golangver"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = config_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./golangver"));
    }
}
