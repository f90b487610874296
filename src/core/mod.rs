pub mod assignment;
pub mod exchange;
pub mod messages;
pub mod notification;

pub use crate::domain::model::{Assignment, ExchangeOutcome, ExchangeRequest, Language, Participant};
pub use crate::domain::ports::{MailSettings, Mailer};
pub use crate::utils::error::Result;
