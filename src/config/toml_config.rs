use crate::adapters::roster::load_roster;
use crate::core::MailSettings;
use crate::domain::model::{ExchangeRequest, Language, Participant};
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::{
    is_valid_email, validate_non_empty_string, validate_path, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTBOX_DIR: &str = "./outbox";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default)]
    pub exchange: ExchangeSection,
    #[serde(default)]
    pub participants: Vec<Participant>,
    pub mail: MailConfig,
    /// 設定檔所在目錄，用於解析相對路徑的 roster_file
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeSection {
    pub name: Option<String>,
    pub language: Option<String>,
    pub budget: Option<String>,
    pub notes: Option<String>,
    pub seed: Option<u64>,
    pub roster_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub sender: String,
    pub outbox_dir: Option<String>,
}

impl ExchangeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.as_ref().parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SantaError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EMAIL_USER})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn language(&self) -> Language {
        self.exchange
            .language
            .as_deref()
            .map(Language::from_tag)
            .unwrap_or_default()
    }

    pub fn seed(&self) -> Option<u64> {
        self.exchange.seed
    }

    pub fn display_name(&self) -> &str {
        self.exchange.name.as_deref().unwrap_or("Secret Santa")
    }

    fn roster_path(&self, roster_file: &str) -> PathBuf {
        let path = Path::new(roster_file);
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// 合併設定檔內的參與者與 CSV 名單，組成交換請求
    pub fn to_request(&self) -> Result<ExchangeRequest> {
        let mut participants: Vec<Participant> = self
            .participants
            .iter()
            .map(|p| Participant::new(p.name.as_str(), p.email.as_str()))
            .collect();

        if let Some(roster_file) = &self.exchange.roster_file {
            participants.extend(load_roster(self.roster_path(roster_file))?);
        }

        Ok(ExchangeRequest {
            participants,
            budget: self.exchange.budget.clone(),
            notes: self.exchange.notes.clone(),
            language: self.language(),
        })
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("mail.sender", &self.mail.sender)?;

        if self.mail.sender.contains("${") {
            return Err(SantaError::MissingConfigError {
                field: format!("mail.sender ({})", self.mail.sender),
            });
        }

        // 寄件者會直接寫入 From 標頭，不允許空白或換行
        if !is_valid_email(&self.mail.sender) || self.mail.sender.trim() != self.mail.sender {
            return Err(SantaError::InvalidConfigValueError {
                field: "mail.sender".to_string(),
                value: self.mail.sender.clone(),
                reason: "Sender must be a single email address".to_string(),
            });
        }

        if let Some(dir) = &self.mail.outbox_dir {
            validate_path("mail.outbox_dir", dir)?;
        }

        if let Some(roster_file) = &self.exchange.roster_file {
            validate_path("exchange.roster_file", roster_file)?;
        }

        Ok(())
    }
}

impl MailSettings for ExchangeConfig {
    fn sender(&self) -> &str {
        &self.mail.sender
    }

    fn outbox_dir(&self) -> &str {
        self.mail.outbox_dir.as_deref().unwrap_or(DEFAULT_OUTBOX_DIR)
    }
}

impl Validate for ExchangeConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[exchange]
name = "Office"
language = "en"
budget = "$25-50"
seed = 42

[[participants]]
name = "Ana"
email = "ana@example.com"

[[participants]]
name = " Ben "
email = "ben@example.com"

[mail]
sender = "santa@example.com"
"#;

        let config = ExchangeConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.display_name(), "Office");
        assert_eq!(config.language(), Language::En);
        assert_eq!(config.seed(), Some(42));
        assert_eq!(config.outbox_dir(), DEFAULT_OUTBOX_DIR);

        let request = config.to_request().unwrap();
        assert_eq!(request.participants[1].name, "Ben");
        assert_eq!(request.budget(), Some("$25-50"));
        assert_eq!(request.notes(), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SECRET_SANTA_TEST_SENDER", "organizer@example.com");

        let toml_content = r#"
[mail]
sender = "${SECRET_SANTA_TEST_SENDER}"
"#;

        let config = ExchangeConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.sender(), "organizer@example.com");
        assert_eq!(config.language(), Language::Es);
        assert!(config.validate().is_ok());

        std::env::remove_var("SECRET_SANTA_TEST_SENDER");
    }

    #[test]
    fn test_unresolved_sender_fails_validation() {
        let toml_content = r#"
[mail]
sender = "${SECRET_SANTA_SURELY_UNSET_VAR}"
"#;

        let config = ExchangeConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SantaError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_sender_with_header_break_is_rejected() {
        let toml_content = r#"
[mail]
sender = "santa@example.com\nBcc: someone@example.com"
"#;

        let config = ExchangeConfig::from_toml_str(toml_content).unwrap();
        assert!(config.sender().contains('\n'));
        assert!(matches!(
            config.validate(),
            Err(SantaError::InvalidConfigValueError { ref field, .. }) if field == "mail.sender"
        ));

        let config = ExchangeConfig::from_toml_str("[mail]\nsender = \"Santa\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_mail_section_is_parse_error() {
        assert!(matches!(
            ExchangeConfig::from_toml_str("[exchange]\nname = \"x\"\n"),
            Err(SantaError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_roster_file_relative_to_config() {
        let temp_dir = TempDir::new().unwrap();
        let mut roster = std::fs::File::create(temp_dir.path().join("people.csv")).unwrap();
        roster
            .write_all(b"name,email\nCai,cai@example.com\nDee,dee@example.com\n")
            .unwrap();

        let config_path = temp_dir.path().join("exchange.toml");
        std::fs::write(
            &config_path,
            r#"
[exchange]
roster_file = "people.csv"

[[participants]]
name = "Ana"
email = "ana@example.com"

[mail]
sender = "santa@example.com"
"#,
        )
        .unwrap();

        let config = ExchangeConfig::from_file(&config_path).unwrap();
        let request = config.to_request().unwrap();
        let names: Vec<_> = request.participants.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Cai", "Dee"]);
    }
}
