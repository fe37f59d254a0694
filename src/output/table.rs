//! Terminal table renderer: the two-column identity table.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

use crate::models::User;
use crate::output::UserRenderer;

/// Renders `Username | Phone number` for the published record.
///
/// Renders an empty string when nothing has been published yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl UserRenderer for TableRenderer {
    fn render(&self, user: Option<&User>) -> String {
        let Some(user) = user else {
            return String::new();
        };

        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Username").add_attribute(Attribute::Bold),
                Cell::new("Phone number").add_attribute(Attribute::Bold),
            ])
            .add_row(vec![Cell::new(&user.name), Cell::new(&user.phone)]);

        format!("{table}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ervin() -> User {
        serde_json::from_str(
            r#"{"id": 3, "name": "Ervin Howell", "phone": "010-692-6593 x09125"}"#,
        )
        .unwrap()
    }

    #[test]
    fn render_nothing_before_first_publish() {
        assert_eq!(TableRenderer.render(None), "");
    }

    #[test]
    fn render_name_and_phone() {
        let output = TableRenderer.render(Some(&ervin()));
        assert!(output.contains("Username"));
        assert!(output.contains("Phone number"));
        assert!(output.contains("Ervin Howell"));
        assert!(output.contains("010-692-6593 x09125"));
    }

    #[test]
    fn render_is_deterministic() {
        let user = ervin();
        assert_eq!(TableRenderer.render(Some(&user)), TableRenderer.render(Some(&user)));
    }
}
