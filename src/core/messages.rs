use crate::domain::model::Language;

/// Localized strings shared by notifications and exchange responses.
pub struct Messages {
    pub subject: &'static str,
    pub heading: &'static str,
    pub greeting: &'static str,
    pub assigned_to: &'static str,
    pub budget_label: &'static str,
    pub notes_label: &'static str,
    pub keep_secret: &'static str,
    pub closing: &'static str,
    pub error_min_participants: &'static str,
    pub error_participant_fields: &'static str,
    pub error_duplicate_email: &'static str,
    pub error_generic: &'static str,
    sent_template: &'static str,
    planned_template: &'static str,
}

static EN: Messages = Messages {
    subject: "🎅 Your Secret Santa Assignment!",
    heading: "🎄 Secret Santa Assignment 🎄",
    greeting: "Ho ho ho, {name}!",
    assigned_to: "You have been chosen to be the Secret Santa of:",
    budget_label: "Budget:",
    notes_label: "Notes:",
    keep_secret: "Remember, this is a secret! Don't tell {name} that you are their Secret Santa. 🤫",
    closing: "Merry Christmas! 🎅🎄",
    error_min_participants: "At least 2 participants with a name and email are needed",
    error_participant_fields: "Each participant must have a name and email",
    error_duplicate_email: "Each participant must have a different email",
    error_generic: "Error creating Secret Santa assignments. Please try again.",
    sent_template: "Secret Santa emails sent to {count} participants!",
    planned_template: "Secret Santa assignments created for {count} participants (no emails sent)",
};

static ES: Messages = Messages {
    subject: "🎅 ¡Tu Asignación de Amigo Secreto!",
    heading: "🎄 Asignación de Amigo Secreto 🎄",
    greeting: "¡Ho ho ho, {name}!",
    assigned_to: "Has sido asignado(a) para ser el Amigo Secreto de:",
    budget_label: "Presupuesto:",
    notes_label: "Notas:",
    keep_secret: "¡Recuerda, esto es un secreto! No le digas a {name} que eres su Amigo Secreto. 🤫",
    closing: "¡Feliz Navidad! 🎅🎄",
    error_min_participants: "Se necesitan al menos 2 participantes con nombre y correo",
    error_participant_fields: "Cada participante debe tener un nombre y correo",
    error_duplicate_email: "Cada participante debe tener un correo diferente",
    error_generic: "Error al crear las asignaciones de Amigo Secreto. Por favor intenta de nuevo.",
    sent_template: "¡Correos de Amigo Secreto enviados a {count} participantes!",
    planned_template: "Asignaciones de Amigo Secreto creadas para {count} participantes (sin enviar correos)",
};

impl Messages {
    pub fn for_language(language: Language) -> &'static Messages {
        match language {
            Language::En => &EN,
            Language::Es => &ES,
        }
    }

    pub fn sent(&self, count: usize) -> String {
        self.sent_template.replace("{count}", &count.to_string())
    }

    pub fn planned(&self, count: usize) -> String {
        self.planned_template.replace("{count}", &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_templates() {
        assert_eq!(
            Messages::for_language(Language::En).sent(4),
            "Secret Santa emails sent to 4 participants!"
        );
        assert_eq!(
            Messages::for_language(Language::Es).sent(3),
            "¡Correos de Amigo Secreto enviados a 3 participantes!"
        );
        assert!(Messages::for_language(Language::En)
            .planned(2)
            .contains("2 participants"));
    }
}
