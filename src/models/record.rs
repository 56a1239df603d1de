//! Bibliographic record model, translated from registry MARCXML.
//!
//! Field mapping follows MARC21: 245 title/subtitle, 100/700 authors,
//! 260/264 publication statement, 020 ISBN, 300 physical description,
//! 650 subjects, language from 008 positions 35-37 falling back to 041.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::marcxml::MarcxmlRecord;

/// A bibliographic record fetched from the ISBN registry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BiblioRecord {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub language_code: Option<String>,
    pub pages: Option<i32>,
    pub subjects: Vec<String>,
}

impl BiblioRecord {
    /// Translate a parsed MARCXML record into a bibliographic record
    pub fn from_marcxml(record: &MarcxmlRecord) -> Self {
        let title = record
            .get_subfield("245", 'a')
            .map(|t| trim_punctuation(t).to_string());
        let subtitle = record
            .get_subfield("245", 'b')
            .map(|t| trim_punctuation(t).to_string());

        let mut authors: Vec<String> = Vec::new();
        for tag in ["100", "700"] {
            for name in record.get_all_subfields(tag, 'a') {
                let name = trim_punctuation(name).to_string();
                if !name.is_empty() && !authors.contains(&name) {
                    authors.push(name);
                }
            }
        }

        let publisher = record
            .get_subfield("260", 'b')
            .or_else(|| record.get_subfield("264", 'b'))
            .map(|p| trim_punctuation(p).to_string());

        let publication_year = record
            .get_subfield("260", 'c')
            .or_else(|| record.get_subfield("264", 'c'))
            .and_then(first_year);

        let isbn = record
            .get_subfield("020", 'a')
            .map(normalize_isbn)
            .filter(|s| !s.is_empty());

        // 008 positions 35-37 carry the language code; 041 $a overrides
        // nothing, it is the fallback for records without an 008.
        let language_code = record
            .get_control_field("008")
            .and_then(|f| f.get(35..38))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .or_else(|| record.get_subfield("041", 'a').map(String::from));

        let pages = record.get_subfield("300", 'a').and_then(first_number);

        let subjects = record
            .get_all_subfields("650", 'a')
            .into_iter()
            .map(|s| trim_punctuation(s).to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            isbn,
            title,
            subtitle,
            authors,
            publisher,
            publication_year,
            language_code,
            pages,
            subjects,
        }
    }
}

/// Registry import request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImportRequest {
    #[validate(length(min = 10, max = 17))]
    pub isbn: String,
}

/// Strip trailing ISBD punctuation from a MARC value
fn trim_punctuation(value: &str) -> &str {
    value.trim().trim_end_matches(['/', ':', ';', ',', '.', '=']).trim_end()
}

/// Keep only digits and a trailing X check digit
fn normalize_isbn(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .collect::<String>()
        .to_uppercase()
}

/// First 4-digit run in the value, read as a year
fn first_year(value: &str) -> Option<i32> {
    let digits: Vec<char> = value.chars().collect();
    for window_start in 0..digits.len() {
        let run: String = digits[window_start..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if run.len() >= 4 {
            return run[..4].parse().ok();
        }
    }
    None
}

/// First digit run in the value, read as a count
fn first_number(value: &str) -> Option<i32> {
    let start = value.find(|c: char| c.is_ascii_digit())?;
    let run: String = value[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    run.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<record>
      <leader>00714cam a2200205 a 4500</leader>
      <controlfield tag="008">990101s1965    xxu           000 1 eng  </controlfield>
      <datafield tag="020" ind1=" " ind2=" ">
        <subfield code="a">978-0-441-01359-3 (pbk.)</subfield>
      </datafield>
      <datafield tag="100" ind1="1" ind2=" ">
        <subfield code="a">Herbert, Frank,</subfield>
      </datafield>
      <datafield tag="245" ind1="1" ind2="0">
        <subfield code="a">Dune /</subfield>
        <subfield code="b">a novel :</subfield>
      </datafield>
      <datafield tag="260" ind1=" " ind2=" ">
        <subfield code="a">New York :</subfield>
        <subfield code="b">Ace Books,</subfield>
        <subfield code="c">c1965.</subfield>
      </datafield>
      <datafield tag="300" ind1=" " ind2=" ">
        <subfield code="a">412 p. ;</subfield>
      </datafield>
      <datafield tag="650" ind1=" " ind2="0">
        <subfield code="a">Science fiction.</subfield>
      </datafield>
      <datafield tag="700" ind1="1" ind2=" ">
        <subfield code="a">Herbert, Frank,</subfield>
      </datafield>
    </record>"#;

    #[test]
    fn test_translation_from_marcxml() {
        let marc = MarcxmlRecord::parse(SAMPLE).expect("record");
        let record = BiblioRecord::from_marcxml(&marc);

        assert_eq!(record.title.as_deref(), Some("Dune"));
        assert_eq!(record.subtitle.as_deref(), Some("a novel"));
        assert_eq!(record.authors, vec!["Herbert, Frank"]);
        assert_eq!(record.publisher.as_deref(), Some("Ace Books"));
        assert_eq!(record.publication_year, Some(1965));
        assert_eq!(record.isbn.as_deref(), Some("9780441013593"));
        assert_eq!(record.language_code.as_deref(), Some("eng"));
        assert_eq!(record.pages, Some(412));
        assert_eq!(record.subjects, vec!["Science fiction"]);
    }

    #[test]
    fn test_empty_record_translates_to_empty_fields() {
        let marc = MarcxmlRecord::parse("<record></record>").expect("record");
        let record = BiblioRecord::from_marcxml(&marc);
        assert!(record.title.is_none());
        assert!(record.authors.is_empty());
        assert!(record.publication_year.is_none());
    }

    #[test]
    fn test_year_extraction() {
        assert_eq!(first_year("c1965."), Some(1965));
        assert_eq!(first_year("[2003]"), Some(2003));
        assert_eq!(first_year("n.d."), None);
        assert_eq!(first_year("19"), None);
    }

    #[test]
    fn test_isbn_normalization() {
        assert_eq!(normalize_isbn("978-0-441-01359-3 (pbk.)"), "9780441013593");
        assert_eq!(normalize_isbn("0-8044-2957-x"), "080442957X");
    }
}
