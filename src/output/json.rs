//! JSON output renderer.
//!
//! Outputs the full published record, or `null` when there is none.

use crate::models::User;
use crate::output::UserRenderer;

/// JSON output renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl UserRenderer for JsonRenderer {
    fn render(&self, user: Option<&User>) -> String {
        serde_json::to_string_pretty(&user).unwrap_or_else(|_| "null".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_json() {
        let user: User = serde_json::from_str(
            r#"{"id": 3, "name": "Ervin Howell", "phone": "010-692-6593 x09125",
                "company": {"name": "Deckow-Crist", "catchPhrase": "Proactive", "bs": "synergize"}}"#,
        )
        .unwrap();

        let output = JsonRenderer.render(Some(&user));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["id"], 3);
        assert_eq!(parsed["name"], "Ervin Howell");
        assert_eq!(parsed["company"]["catchPhrase"], "Proactive");
    }

    #[test]
    fn render_empty_json() {
        let parsed: serde_json::Value =
            serde_json::from_str(&JsonRenderer.render(None)).unwrap();
        assert!(parsed.is_null());
    }
}
