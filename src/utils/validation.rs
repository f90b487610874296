use crate::core::assignment::MIN_PARTICIPANTS;
use crate::domain::model::{ExchangeRequest, Participant};
use crate::utils::error::{Result, SantaError};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email.trim())
}

pub fn validate_participant(index: usize, participant: &Participant) -> Result<()> {
    if participant.name.trim().is_empty() {
        return Err(SantaError::InvalidParticipant {
            index,
            reason: "name cannot be empty".to_string(),
        });
    }

    if participant.email.trim().is_empty() {
        return Err(SantaError::InvalidParticipant {
            index,
            reason: "email cannot be empty".to_string(),
        });
    }

    if !is_valid_email(&participant.email) {
        return Err(SantaError::InvalidParticipant {
            index,
            reason: format!("'{}' is not a valid email address", participant.email),
        });
    }

    Ok(())
}

/// 呼叫分配引擎前的完整檢查：人數、欄位、email 不可重複
pub fn validate_participants(participants: &[Participant]) -> Result<()> {
    if participants.len() < MIN_PARTICIPANTS {
        return Err(SantaError::InsufficientParticipants {
            count: participants.len(),
        });
    }

    let mut seen = HashSet::with_capacity(participants.len());
    for (index, participant) in participants.iter().enumerate() {
        validate_participant(index, participant)?;
        if !seen.insert(participant.identity()) {
            return Err(SantaError::DuplicateEmail {
                email: participant.email.clone(),
            });
        }
    }

    Ok(())
}

pub fn validate_request(request: &ExchangeRequest) -> Result<()> {
    validate_participants(&request.participants)
}

impl Validate for ExchangeRequest {
    fn validate(&self) -> Result<()> {
        validate_request(self)
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SantaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, email: &str) -> Participant {
        Participant::new(name, email)
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email(" ana.b@mail.example.org "));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana example@x.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_participants_count() {
        assert!(matches!(
            validate_participants(&[p("Ana", "ana@example.com")]),
            Err(SantaError::InsufficientParticipants { count: 1 })
        ));
    }

    #[test]
    fn test_validate_participants_fields() {
        let result = validate_participants(&[p("Ana", "ana@example.com"), p(" ", "ben@example.com")]);
        assert!(matches!(
            result,
            Err(SantaError::InvalidParticipant { index: 1, .. })
        ));

        let result = validate_participants(&[p("Ana", ""), p("Ben", "ben@example.com")]);
        assert!(matches!(
            result,
            Err(SantaError::InvalidParticipant { index: 0, .. })
        ));
    }

    #[test]
    fn test_validate_participants_duplicates_ignore_case() {
        let result = validate_participants(&[
            p("Ana", "ana@example.com"),
            p("Ben", "ben@example.com"),
            p("Ana 2", "ANA@Example.com"),
        ]);
        match result {
            Err(SantaError::DuplicateEmail { email }) => assert_eq!(email, "ANA@Example.com"),
            other => panic!("expected duplicate error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("mail.outbox_dir", "./outbox").is_ok());
        assert!(validate_path("mail.outbox_dir", "").is_err());
        assert!(validate_non_empty_string("mail.sender", "  ").is_err());
    }
}
