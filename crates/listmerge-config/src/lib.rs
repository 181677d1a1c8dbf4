use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use listmerge_core::{CoreError, FieldNames};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "listmerge";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_FILE_PATTERN: &str = r"business_data_(\d+)";
pub const DEFAULT_WITH_EMAIL_FILE: &str = "records_with_email.json";
pub const DEFAULT_WITHOUT_EMAIL_FILE: &str = "records_without_email.json";
pub const DEFAULT_ALL_UNIQUE_FILE: &str = "all_unique_records.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub fields: FieldNames,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// Regex matched against file names; capture group 1 is the file number.
    pub file_pattern: String,
    pub start: Option<u64>,
    pub end: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub with_email: PathBuf,
    pub without_email: PathBuf,
    pub all_unique: PathBuf,
}

impl OutputConfig {
    pub fn with_email_path(&self) -> PathBuf {
        self.dir.join(&self.with_email)
    }

    pub fn without_email_path(&self) -> PathBuf {
        self.dir.join(&self.without_email)
    }

    pub fn all_unique_path(&self) -> PathBuf {
        self.dir.join(&self.all_unique)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                file_pattern: DEFAULT_FILE_PATTERN.to_string(),
                start: None,
                end: None,
            },
            output: OutputConfig {
                dir: PathBuf::from("."),
                with_email: PathBuf::from(DEFAULT_WITH_EMAIL_FILE),
                without_email: PathBuf::from(DEFAULT_WITHOUT_EMAIL_FILE),
                all_unique: PathBuf::from(DEFAULT_ALL_UNIQUE_FILE),
            },
            fields: FieldNames::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid file range: start {start} is greater than end {end}")]
    InvalidRange { start: u64, end: u64 },
    #[error("invalid output.{field}: file name cannot be empty")]
    EmptyOutputName { field: &'static str },
    #[error("invalid fields: {0}")]
    InvalidFields(#[source] CoreError),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    input: Option<InputFile>,
    output: Option<OutputFile>,
    fields: Option<FieldsFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputFile {
    file_pattern: Option<String>,
    start: Option<u64>,
    end: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputFile {
    dir: Option<PathBuf>,
    with_email: Option<PathBuf>,
    without_email: Option<PathBuf>,
    all_unique: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldsFile {
    business_name: Option<String>,
    phone_number: Option<String>,
    emails: Option<String>,
    postcode: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(input) = parsed.input {
        if let Some(pattern) = input.file_pattern {
            config.input.file_pattern = pattern;
        }
        config.input.start = input.start;
        config.input.end = input.end;
    }

    if let Some(output) = parsed.output {
        if let Some(dir) = output.dir {
            config.output.dir = dir;
        }
        if let Some(name) = output.with_email {
            config.output.with_email = name;
        }
        if let Some(name) = output.without_email {
            config.output.without_email = name;
        }
        if let Some(name) = output.all_unique {
            config.output.all_unique = name;
        }
    }

    if let Some(fields) = parsed.fields {
        if let Some(name) = fields.business_name {
            config.fields.business_name = name;
        }
        if let Some(name) = fields.phone_number {
            config.fields.phone_number = name;
        }
        if let Some(name) = fields.emails {
            config.fields.emails = name;
        }
        if let Some(name) = fields.postcode {
            config.fields.postcode = name;
        }
    }

    config.validate()?;
    Ok(config)
}

impl AppConfig {
    /// Re-checked by callers after command-line overrides are applied.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.input.start, self.input.end) {
            if start > end {
                return Err(ConfigError::InvalidRange { start, end });
            }
        }

        let outputs = [
            ("with_email", &self.output.with_email),
            ("without_email", &self.output.without_email),
            ("all_unique", &self.output.all_unique),
        ];
        for (field, name) in outputs {
            if name.as_os_str().is_empty() {
                return Err(ConfigError::EmptyOutputName { field });
            }
        }

        self.fields.validate().map_err(ConfigError::InvalidFields)
    }
}
