//! CSV export of workproofs

use uuid::Uuid;

use crate::{models::Workproof, utils::format_timestamp};

const HEADER: &str = "author,created,description,imageUrl";

/// One row per workproof, in the order given. Every field is quoted.
pub fn workproofs_to_csv(workproofs: &[Workproof]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + workproofs.len() * 128);
    out.push_str(HEADER);
    out.push('\n');

    for w in workproofs {
        let created = format_timestamp(&w.created_at);
        let row = [
            w.author.as_str(),
            created.as_str(),
            w.description.as_str(),
            w.image_url().unwrap_or_default(),
        ];
        let fields: Vec<String> = row.iter().map(|f| quote(f)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Attachment filename for a challenge export
pub fn csv_filename(challenge_id: &Uuid) -> String {
    format!("workproofs-{}.csv", challenge_id)
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use sqlx::types::Json;

    use crate::models::Verifications;

    fn workproof(description: &str, image: Option<&str>) -> Workproof {
        Workproof {
            id: Uuid::nil(),
            author: "ab".repeat(32),
            room_id: Uuid::nil(),
            challenge_id: Uuid::nil(),
            description: description.to_string(),
            image_urls: image.map(|i| vec![i.to_string()]).unwrap_or_default(),
            weight: 5,
            verifications: Json(Verifications::new()),
            created_at: DateTime::parse_from_rfc3339("2024-03-01T09:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn test_header_only_for_empty_list() {
        assert_eq!(workproofs_to_csv(&[]), "author,created,description,imageUrl\n");
    }

    #[test]
    fn test_rows_are_quoted() {
        let csv = workproofs_to_csv(&[workproof("wrote docs", Some("https://x/a.png"))]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            format!(
                "\"{}\",\"2024-03-01T09:30:00Z\",\"wrote docs\",\"https://x/a.png\"",
                "ab".repeat(32)
            )
        );
    }

    #[test]
    fn test_embedded_quotes_and_commas() {
        let csv = workproofs_to_csv(&[workproof("said \"hi\", twice", None)]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with(",\"said \"\"hi\"\", twice\",\"\""));
    }

    #[test]
    fn test_row_order_is_preserved() {
        let csv = workproofs_to_csv(&[workproof("first", None), workproof("second", None)]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("first"));
        assert!(lines[2].contains("second"));
    }

    #[test]
    fn test_filename() {
        assert_eq!(
            csv_filename(&Uuid::nil()),
            "workproofs-00000000-0000-0000-0000-000000000000.csv"
        );
    }
}
