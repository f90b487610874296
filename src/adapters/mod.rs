// Adapters layer: concrete implementations for external systems (mail delivery, roster files).

pub mod outbox;
pub mod roster;

pub use outbox::OutboxMailer;
pub use roster::load_roster;
