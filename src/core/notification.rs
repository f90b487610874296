use crate::core::messages::Messages;
use crate::domain::model::{Assignment, Language, Notification};

/// 組出寄給送禮者的通知信
pub fn compose(
    assignment: &Assignment,
    budget: Option<&str>,
    notes: Option<&str>,
    language: Language,
) -> Notification {
    let messages = Messages::for_language(language);
    let giver = escape_html(&assignment.giver.name);
    let recipient = escape_html(&assignment.recipient.name);

    let mut body = String::new();
    body.push_str(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">"#,
    );
    body.push_str(&format!(
        r#"<h2 style="color: #d32f2f; text-align: center;">{}</h2>"#,
        messages.heading
    ));
    body.push_str(&format!(
        r#"<p style="font-size: 18px;">{}</p>"#,
        messages.greeting.replace("{name}", &giver)
    ));
    body.push_str(&format!("<p>{}</p>", messages.assigned_to));
    body.push_str(&format!(
        r#"<div style="background-color: #f5f5f5; padding: 20px; border-radius: 10px; text-align: center; margin: 20px 0;"><h3 style="color: #2e7d32; margin: 0; font-size: 24px;">🎁 {} 🎁</h3></div>"#,
        recipient
    ));

    if let Some(budget) = budget.map(str::trim).filter(|b| !b.is_empty()) {
        body.push_str(&format!(
            "<p><strong>{}</strong> {}</p>",
            messages.budget_label,
            escape_html(budget)
        ));
    }
    if let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) {
        body.push_str(&format!(
            "<p><strong>{}</strong> {}</p>",
            messages.notes_label,
            escape_html(notes)
        ));
    }

    body.push_str(&format!(
        r#"<p style="margin-top: 30px; font-style: italic; color: #666;">{}</p>"#,
        messages.keep_secret.replace("{name}", &recipient)
    ));
    body.push_str(&format!(
        r#"<p style="text-align: center; color: #d32f2f;">{}</p>"#,
        messages.closing
    ));
    body.push_str("</div>");

    Notification {
        to: assignment.giver.email.clone(),
        subject: messages.subject.to_string(),
        html_body: body,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Participant;

    fn sample() -> Assignment {
        Assignment {
            giver: Participant::new("Ana", "ana@example.com"),
            recipient: Participant::new("Ben", "ben@example.com"),
        }
    }

    #[test]
    fn test_spanish_notification() {
        let n = compose(&sample(), Some("$25-50"), Some("Hecho a mano"), Language::Es);
        assert_eq!(n.to, "ana@example.com");
        assert_eq!(n.subject, "🎅 ¡Tu Asignación de Amigo Secreto!");
        assert!(n.html_body.contains("¡Ho ho ho, Ana!"));
        assert!(n.html_body.contains("🎁 Ben 🎁"));
        assert!(n.html_body.contains("<strong>Presupuesto:</strong> $25-50"));
        assert!(n.html_body.contains("<strong>Notas:</strong> Hecho a mano"));
        assert!(n.html_body.contains("No le digas a Ben"));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let n = compose(&sample(), None, Some("  "), Language::En);
        assert_eq!(n.subject, "🎅 Your Secret Santa Assignment!");
        assert!(!n.html_body.contains("Budget:"));
        assert!(!n.html_body.contains("Notes:"));
        assert!(n.html_body.contains("Don't tell Ben"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let assignment = Assignment {
            giver: Participant::new("<b>Ana</b>", "ana@example.com"),
            recipient: Participant::new("Ben & Co", "ben@example.com"),
        };
        let n = compose(&assignment, Some("<script>"), None, Language::En);
        assert!(n.html_body.contains("&lt;b&gt;Ana&lt;/b&gt;"));
        assert!(n.html_body.contains("Ben &amp; Co"));
        assert!(!n.html_body.contains("<script>"));
    }
}
