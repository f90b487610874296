use serde::{Deserialize, Serialize};
use std::fmt;

/// 參與者。身分以 email 判定，不分大小寫。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub email: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            email: email.into().trim().to_string(),
        }
    }

    /// Normalized identity key. Every identity check goes through here.
    pub fn identity(&self) -> String {
        self.email.trim().to_lowercase()
    }

    pub fn same_identity(&self, other: &Participant) -> bool {
        self.identity() == other.identity()
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub giver: Participant,
    pub recipient: Participant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Es,
}

impl Language {
    /// 解析語言標籤（"en"、"es-MX"…），無法辨識時回到西班牙文
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Language::En,
            _ => Language::Es,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeRequest {
    pub participants: Vec<Participant>,
    pub budget: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub language: Language,
}

impl ExchangeRequest {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            ..Default::default()
        }
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// 空白字串視為未填寫
    pub fn budget(&self) -> Option<&str> {
        non_blank(self.budget.as_deref())
    }

    pub fn notes(&self) -> Option<&str> {
        non_blank(self.notes.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOutcome {
    pub assignment_count: usize,
    /// Givers that were sent a notification, in send order. Empty on dry runs.
    pub notified: Vec<String>,
    pub message: String,
}
