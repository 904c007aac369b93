//! Contact cards: vCard 3.0 and MECARD

use crate::fields::{Field, FieldSource};

const DEFAULT_NAME: &str = "John Doe";

/// Split a display name into `(family, given)`.
///
/// The last space-separated token is the family name. A single token is all
/// given name.
fn split_name(name: &str) -> (String, String) {
    let mut parts: Vec<&str> = name.split(' ').collect();
    let family = if parts.len() > 1 {
        parts.pop().unwrap_or_default()
    } else {
        ""
    };
    let given = parts.join(" ");
    let given = if given.is_empty() {
        name.to_string()
    } else {
        given
    };
    (family.to_string(), given)
}

/// vCard 3.0 block with `\n` line endings and no trailing newline.
pub fn vcard(fields: &dyn FieldSource) -> String {
    let name = fields
        .present(Field::VcardName)
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let (family, given) = split_name(&name);

    let mut card = format!("BEGIN:VCARD\nVERSION:3.0\nN:{family};{given};;;\nFN:{name}\n");

    let optional = [
        (Field::VcardOrg, "ORG:", ""),
        (Field::VcardTitle, "TITLE:", ""),
        (Field::VcardPhone, "TEL:", ""),
        (Field::VcardEmail, "EMAIL:", ""),
        (Field::VcardUrl, "URL:", ""),
        (Field::VcardAddress, "ADR:;;", ";;;;"),
    ];
    for (field, prefix, suffix) in optional {
        if let Some(value) = fields.present(field) {
            card.push_str(prefix);
            card.push_str(&value);
            card.push_str(suffix);
            card.push('\n');
        }
    }

    card.push_str("END:VCARD");
    card
}

/// `MECARD:` followed by the present fields as `TAG:value;`.
pub fn mecard(fields: &dyn FieldSource) -> String {
    let tagged = [
        (Field::MecardName, "N"),
        (Field::MecardPhone, "TEL"),
        (Field::MecardEmail, "EMAIL"),
        (Field::MecardUrl, "URL"),
        (Field::MecardAddress, "ADR"),
        (Field::MecardBirthday, "BDAY"),
        (Field::MecardNote, "NOTE"),
    ];

    let entries: Vec<String> = tagged
        .into_iter()
        .filter_map(|(field, tag)| fields.present(field).map(|value| format!("{tag}:{value}")))
        .collect();

    format!("MECARD:{};", entries.join(";"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldMap;

    #[test]
    fn test_name_splitting() {
        assert_eq!(
            split_name("Ada Lovelace"),
            ("Lovelace".to_string(), "Ada".to_string())
        );
        assert_eq!(split_name("Prince"), (String::new(), "Prince".to_string()));
        assert_eq!(
            split_name("Mary Ann Evans"),
            ("Evans".to_string(), "Mary Ann".to_string())
        );
    }

    #[test]
    fn test_vcard_minimal() {
        let fields = FieldMap::new().with(Field::VcardName, "Ada Lovelace");
        assert_eq!(
            vcard(&fields),
            "BEGIN:VCARD\nVERSION:3.0\nN:Lovelace;Ada;;;\nFN:Ada Lovelace\nEND:VCARD"
        );
    }

    #[test]
    fn test_vcard_single_token_name() {
        let fields = FieldMap::new().with(Field::VcardName, "Prince");
        assert_eq!(
            vcard(&fields),
            "BEGIN:VCARD\nVERSION:3.0\nN:;Prince;;;\nFN:Prince\nEND:VCARD"
        );
    }

    #[test]
    fn test_vcard_optional_lines_keep_fixed_order() {
        let fields = FieldMap::new()
            .with(Field::VcardName, "Grace Hopper")
            .with(Field::VcardAddress, "1 Navy Way")
            .with(Field::VcardEmail, "grace@navy.mil")
            .with(Field::VcardOrg, "US Navy")
            .with(Field::VcardTitle, "")
            .with(Field::VcardPhone, "+15550100")
            .with(Field::VcardUrl, "https://navy.mil");

        assert_eq!(
            vcard(&fields),
            "BEGIN:VCARD\n\
             VERSION:3.0\n\
             N:Hopper;Grace;;;\n\
             FN:Grace Hopper\n\
             ORG:US Navy\n\
             TEL:+15550100\n\
             EMAIL:grace@navy.mil\n\
             URL:https://navy.mil\n\
             ADR:;;1 Navy Way;;;;\n\
             END:VCARD"
        );
    }

    #[test]
    fn test_mecard_only_present_fields() {
        let fields = FieldMap::new()
            .with(Field::MecardNote, "met at conf")
            .with(Field::MecardName, "Lovelace,Ada")
            .with(Field::MecardEmail, "ada@example.org");
        assert_eq!(
            mecard(&fields),
            "MECARD:N:Lovelace,Ada;EMAIL:ada@example.org;NOTE:met at conf;"
        );
    }

    #[test]
    fn test_mecard_all_fields_in_order() {
        let fields = FieldMap::new()
            .with(Field::MecardName, "A")
            .with(Field::MecardPhone, "1")
            .with(Field::MecardEmail, "e")
            .with(Field::MecardUrl, "u")
            .with(Field::MecardAddress, "r")
            .with(Field::MecardBirthday, "19700101")
            .with(Field::MecardNote, "n");
        assert_eq!(
            mecard(&fields),
            "MECARD:N:A;TEL:1;EMAIL:e;URL:u;ADR:r;BDAY:19700101;NOTE:n;"
        );
    }
}
