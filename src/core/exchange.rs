use crate::core::assignment::{assign_with_rng, is_derangement};
use crate::core::messages::Messages;
use crate::core::notification::compose;
use crate::domain::model::{ExchangeOutcome, ExchangeRequest, Language};
use crate::domain::ports::Mailer;
use crate::utils::error::{Result, SantaError};
use crate::utils::validation::Validate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Runs one gift exchange: validate, assign, notify.
pub struct ExchangeService<M: Mailer> {
    mailer: M,
    sender: String,
    seed: Option<u64>,
    dry_run: bool,
}

impl<M: Mailer> ExchangeService<M> {
    pub fn new(mailer: M, sender: impl Into<String>) -> Self {
        Self {
            mailer,
            sender: sender.into(),
            seed: None,
            dry_run: false,
        }
    }

    /// 固定亂數種子，方便重現同一組分配
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    pub async fn run(&self, request: &ExchangeRequest) -> Result<ExchangeOutcome> {
        let messages = Messages::for_language(request.language);

        tracing::info!(
            "🎄 Starting exchange with {} participants (language: {})",
            request.participants.len(),
            request.language.tag()
        );

        request.validate()?;
        tracing::debug!("Participant list passed validation");

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let assignments = assign_with_rng(&request.participants, &mut rng)?;

        if !is_derangement(&request.participants, &assignments) {
            return Err(SantaError::InvalidAssignment {
                message: "assignment set is not a derangement of the participants".to_string(),
            });
        }
        tracing::info!("🎲 Created {} assignments", assignments.len());

        if self.dry_run {
            tracing::info!("🔍 Dry run, no notifications sent");
            return Ok(ExchangeOutcome {
                assignment_count: assignments.len(),
                notified: Vec::new(),
                message: messages.planned(assignments.len()),
            });
        }

        let mut notified = Vec::with_capacity(assignments.len());
        for assignment in &assignments {
            let notification = compose(
                assignment,
                request.budget(),
                request.notes(),
                request.language,
            );

            if let Err(e) = self.mailer.send(&self.sender, &notification).await {
                tracing::error!("❌ Error sending notification to {}: {}", notification.to, e);
                return Err(match e {
                    err @ SantaError::DeliveryError { .. } => err,
                    other => SantaError::DeliveryError {
                        recipient: notification.to.clone(),
                        message: other.to_string(),
                    },
                });
            }

            tracing::info!("📧 Notification sent to {}", notification.to);
            notified.push(notification.to);
        }

        Ok(ExchangeOutcome {
            assignment_count: assignments.len(),
            notified,
            message: messages.sent(assignments.len()),
        })
    }
}

/// API 回應格式，與網頁前端約定的 JSON 欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExchangeResponse {
    Success {
        success: bool,
        message: String,
        #[serde(rename = "assignmentCount")]
        assignment_count: usize,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl ExchangeResponse {
    pub fn from_result(result: &Result<ExchangeOutcome>, language: Language) -> Self {
        let messages = Messages::for_language(language);
        match result {
            Ok(outcome) => ExchangeResponse::Success {
                success: true,
                message: outcome.message.clone(),
                assignment_count: outcome.assignment_count,
            },
            Err(e) => {
                let error = match e {
                    SantaError::InsufficientParticipants { .. } => messages.error_min_participants,
                    SantaError::InvalidParticipant { .. } => messages.error_participant_fields,
                    SantaError::DuplicateEmail { .. } => messages.error_duplicate_email,
                    _ => messages.error_generic,
                };
                ExchangeResponse::Failure {
                    success: false,
                    error: error.to_string(),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExchangeResponse::Success { .. })
    }

    /// HTTP 狀態碼：驗證錯誤 400，其餘錯誤 500
    pub fn status_code(result: &Result<ExchangeOutcome>) -> u16 {
        match result {
            Ok(_) => 200,
            Err(e) if e.is_validation() => 400,
            Err(_) => 500,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let outcome = ExchangeOutcome {
            assignment_count: 3,
            notified: vec![],
            message: "done".to_string(),
        };
        let response = ExchangeResponse::from_result(&Ok(outcome), Language::En);
        let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "done", "assignmentCount": 3})
        );
    }

    #[test]
    fn test_failure_response_is_localized() {
        let result: Result<ExchangeOutcome> =
            Err(SantaError::InsufficientParticipants { count: 1 });
        let response = ExchangeResponse::from_result(&result, Language::Es);
        assert_eq!(
            response,
            ExchangeResponse::Failure {
                success: false,
                error: "Se necesitan al menos 2 participantes con nombre y correo".to_string(),
            }
        );
        assert_eq!(ExchangeResponse::status_code(&result), 400);
    }

    #[test]
    fn test_delivery_failure_maps_to_generic_error() {
        let result: Result<ExchangeOutcome> = Err(SantaError::DeliveryError {
            recipient: "ana@example.com".to_string(),
            message: "boom".to_string(),
        });
        let response = ExchangeResponse::from_result(&result, Language::En);
        assert!(!response.is_success());
        assert_eq!(ExchangeResponse::status_code(&result), 500);
        let json = response.to_json().unwrap();
        assert!(json.contains("Please try again"));
    }
}
