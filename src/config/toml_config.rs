use crate::domain::ports::ConfigProvider;
use crate::utils::error::{MorningError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DOG_API_ENDPOINT: &str = "https://dog.ceo/api/breeds/image/random";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Write a sweet good morning paragraph to my girlfriend. \
Make up a dog name and center the message around the dog. The dog's breed is {breed}.  \
The message should be short and sweet and should be around one paragraph.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MorningConfig {
    pub dog_api: DogApiConfig,
    pub generator: GeneratorConfig,
    pub email: EmailConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DogApiConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    /// 0 turns thinking off.
    pub thinking_budget: i32,
    pub prompt_template: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmtpSecurity {
    /// TLS from the first byte (SMTPS).
    #[default]
    Implicit,
    #[serde(rename = "starttls")]
    StartTls,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub security: SmtpSecurity,
    pub username: String,
    pub password: String,
    /// Defaults to `username` when left empty.
    pub from: String,
    pub to: Vec<String>,
    /// `{date}` expands to the local date.
    pub subject: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub image_filename: String,
    pub keep_image: bool,
}

impl Default for DogApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DOG_API_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            thinking_budget: 0,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
            security: SmtpSecurity::Implicit,
            username: String::new(),
            password: String::new(),
            from: String::new(),
            to: Vec::new(),
            subject: "Good Morning Da Wuv".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            image_filename: "random_dog.jpg".to_string(),
            keep_image: true,
        }
    }
}

impl MorningConfig {
    /// Loads a config file, substituting `${VAR}` placeholders first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MorningError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MorningError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MorningError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Fills credentials the file left empty or unresolved from the process environment.
    pub fn apply_env_fallbacks(&mut self) {
        self.apply_fallbacks(|name| std::env::var(name).ok());
    }

    fn apply_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup_non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for value in [
            &mut self.generator.api_key,
            &mut self.email.username,
            &mut self.email.password,
            &mut self.email.from,
        ] {
            if is_unresolved(value) {
                value.clear();
            }
        }
        self.email.to.retain(|recipient| !is_unresolved(recipient));

        if self.generator.api_key.is_empty() {
            if let Some(key) =
                lookup_non_empty("GEMINI_API_KEY").or_else(|| lookup_non_empty("GOOGLE_API_KEY"))
            {
                self.generator.api_key = key;
            }
        }
        if self.email.username.is_empty() {
            if let Some(username) = lookup_non_empty("SMTP_USERNAME") {
                self.email.username = username;
            }
        }
        if self.email.password.is_empty() {
            if let Some(password) = lookup_non_empty("SMTP_PASSWORD") {
                self.email.password = password;
            }
        }
        if self.email.to.is_empty() {
            if let Some(to) = lookup_non_empty("MORNING_RECIPIENT") {
                self.email.to = vec![to];
            }
        }
        if self.email.from.is_empty() {
            self.email.from = self.email.username.clone();
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("dog_api.endpoint", &self.dog_api.endpoint)?;

        validation::validate_url("generator.endpoint", &self.generator.endpoint)?;
        validation::validate_non_empty_string("generator.model", &self.generator.model)?;
        validation::validate_required_secret("generator.api_key", &self.generator.api_key)?;
        if !self.generator.prompt_template.contains("{breed}") {
            return Err(MorningError::InvalidConfigValueError {
                field: "generator.prompt_template".to_string(),
                value: self.generator.prompt_template.clone(),
                reason: "Template must contain the {breed} placeholder".to_string(),
            });
        }

        validation::validate_non_empty_string("email.smtp_host", &self.email.smtp_host)?;
        validation::validate_range("email.smtp_port", self.email.smtp_port, 1, u16::MAX)?;
        if self.email.security != SmtpSecurity::None {
            validation::validate_required_secret("email.username", &self.email.username)?;
            validation::validate_required_secret("email.password", &self.email.password)?;
        }
        validation::validate_required_secret("email.from", &self.email.from)?;
        validation::validate_mailbox("email.from", &self.email.from)?;
        if self.email.to.is_empty() {
            return Err(MorningError::MissingConfigError {
                field: "email.to".to_string(),
            });
        }
        for recipient in &self.email.to {
            validation::validate_mailbox("email.to", recipient)?;
        }
        validation::validate_non_empty_string("email.subject", &self.email.subject)?;

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_path("output.image_filename", &self.output.image_filename)?;

        Ok(())
    }
}

/// True for blank values and `${VAR}` placeholders nothing substituted.
fn is_unresolved(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || (value.starts_with("${") && value.ends_with('}'))
}

impl ConfigProvider for MorningConfig {
    fn image_filename(&self) -> &str {
        &self.output.image_filename
    }

    fn keep_image(&self) -> bool {
        self.output.keep_image
    }

    fn prompt_template(&self) -> &str {
        &self.generator.prompt_template
    }

    fn sender(&self) -> &str {
        &self.email.from
    }

    fn recipients(&self) -> &[String] {
        &self.email.to
    }

    fn subject_template(&self) -> &str {
        &self.email.subject
    }
}

impl Validate for MorningConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
