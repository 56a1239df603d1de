//! MARCXML record scanner.
//!
//! Parses the MARCXML payload returned by the ISBN registry into a
//! structured record. The registry emits a well-formed, flat subset of
//! MARCXML (leader, controlfield, datafield, subfield), so a small cursor
//! scanner over the element stream is sufficient; namespace prefixes on the
//! element names are accepted and ignored.

/// A parsed MARCXML record
#[derive(Debug, Clone, Default)]
pub struct MarcxmlRecord {
    /// The 24-character record leader, when present
    pub leader: Option<String>,
    /// Control fields (00X) as (tag, value)
    pub control_fields: Vec<(String, String)>,
    /// Data fields with indicators and subfields
    pub data_fields: Vec<DataField>,
}

/// A MARC data field (010-999)
#[derive(Debug, Clone)]
pub struct DataField {
    pub tag: String,
    pub ind1: char,
    pub ind2: char,
    pub subfields: Vec<Subfield>,
}

/// A MARC subfield
#[derive(Debug, Clone)]
pub struct Subfield {
    pub code: char,
    pub value: String,
}

impl MarcxmlRecord {
    /// Parse the first record element in a MARCXML document
    pub fn parse(xml: &str) -> Option<Self> {
        Self::parse_all(xml).into_iter().next()
    }

    /// Parse every record element in a MARCXML document (SRU responses may
    /// carry several)
    pub fn parse_all(xml: &str) -> Vec<Self> {
        let mut records = Vec::new();
        let mut rest = xml;
        while let Some((element, next)) = read_element(rest, "record") {
            records.push(Self::from_body(element.body));
            rest = &rest[next..];
        }
        records
    }

    fn from_body(body: &str) -> Self {
        let leader = read_element(body, "leader").map(|(e, _)| unescape(e.body.trim()));

        let mut control_fields = Vec::new();
        let mut rest = body;
        while let Some((element, next)) = read_element(rest, "controlfield") {
            if let Some(tag) = attr_value(element.attrs, "tag") {
                control_fields.push((tag.to_string(), unescape(element.body.trim())));
            }
            rest = &rest[next..];
        }

        let mut data_fields = Vec::new();
        let mut rest = body;
        while let Some((element, next)) = read_element(rest, "datafield") {
            if let Some(field) = parse_data_field(&element) {
                data_fields.push(field);
            }
            rest = &rest[next..];
        }

        Self {
            leader,
            control_fields,
            data_fields,
        }
    }

    /// Get a subfield value by tag and subfield code
    pub fn get_subfield(&self, tag: &str, code: char) -> Option<&str> {
        self.data_fields
            .iter()
            .filter(|f| f.tag == tag)
            .find_map(|f| f.get_subfield(code))
    }

    /// Get all subfield values for a tag and code
    pub fn get_all_subfields(&self, tag: &str, code: char) -> Vec<&str> {
        self.data_fields
            .iter()
            .filter(|f| f.tag == tag)
            .flat_map(|f| f.get_all_subfields(code))
            .collect()
    }

    /// Get a control field value
    pub fn get_control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    /// Get all data fields with a specific tag
    pub fn get_fields(&self, tag: &str) -> Vec<&DataField> {
        self.data_fields.iter().filter(|f| f.tag == tag).collect()
    }
}

impl DataField {
    /// Get a subfield value by code
    pub fn get_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Get all subfield values for a code
    pub fn get_all_subfields(&self, code: char) -> Vec<&str> {
        self.subfields
            .iter()
            .filter(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
            .collect()
    }
}

fn parse_data_field(element: &RawElement<'_>) -> Option<DataField> {
    let tag = attr_value(element.attrs, "tag")?;
    let ind1 = attr_value(element.attrs, "ind1")
        .and_then(|v| v.chars().next())
        .unwrap_or(' ');
    let ind2 = attr_value(element.attrs, "ind2")
        .and_then(|v| v.chars().next())
        .unwrap_or(' ');

    let mut subfields = Vec::new();
    let mut rest = element.body;
    while let Some((sub, next)) = read_element(rest, "subfield") {
        if let Some(code) = attr_value(sub.attrs, "code").and_then(|v| v.chars().next()) {
            subfields.push(Subfield {
                code,
                value: unescape(sub.body.trim()),
            });
        }
        rest = &rest[next..];
    }

    Some(DataField {
        tag: tag.to_string(),
        ind1,
        ind2,
        subfields,
    })
}

/// A raw element slice: attribute text and inner body
struct RawElement<'a> {
    attrs: &'a str,
    body: &'a str,
}

/// Find the next element with the given local name. Returns the element and
/// the offset just past its closing tag.
fn read_element<'a>(input: &'a str, name: &str) -> Option<(RawElement<'a>, usize)> {
    let (_, name_end) = find_open(input, name)?;
    let after_name = &input[name_end..];
    let close_off = after_name.find('>')?;
    let raw_attrs = &after_name[..close_off];
    let self_closing = raw_attrs.trim_end().ends_with('/');
    let attrs = raw_attrs.trim_end().trim_end_matches('/').trim();

    let body_start = name_end + close_off + 1;
    if self_closing {
        return Some((RawElement { attrs, body: "" }, body_start));
    }

    let body_rest = &input[body_start..];
    let (close_start, close_end) = find_close(body_rest, name)?;
    let body = &body_rest[..close_start];

    Some((RawElement { attrs, body }, body_start + close_end))
}

/// Find the next opening tag with the given local name (namespace prefix
/// ignored). Returns (offset of '<', offset just past the tag name).
fn find_open(input: &str, name: &str) -> Option<(usize, usize)> {
    let mut i = 0;
    while let Some(off) = input[i..].find('<') {
        let start = i + off;
        let after = &input[start + 1..];
        if after.starts_with('/') || after.starts_with('?') || after.starts_with('!') {
            i = start + 1;
            continue;
        }
        let name_len = after
            .find(|c: char| c == ' ' || c == '>' || c == '/' || c == '\t' || c == '\n' || c == '\r')
            .unwrap_or(after.len());
        let full = &after[..name_len];
        let local = full.rsplit(':').next().unwrap_or(full);
        if local == name {
            return Some((start, start + 1 + name_len));
        }
        i = start + 1;
    }
    None
}

/// Find the closing tag for the given local name. Returns (offset of '<',
/// offset just past '>').
fn find_close(input: &str, name: &str) -> Option<(usize, usize)> {
    let mut i = 0;
    while let Some(off) = input[i..].find("</") {
        let start = i + off;
        let after = &input[start + 2..];
        let end = after.find('>')?;
        let full = after[..end].trim();
        let local = full.rsplit(':').next().unwrap_or(full);
        if local == name {
            return Some((start, start + 2 + end + 1));
        }
        i = start + 2;
    }
    None
}

/// Extract an attribute value from an element's attribute text
fn attr_value<'a>(attrs: &'a str, key: &str) -> Option<&'a str> {
    let mut rest = attrs;
    let mut consumed = 0;
    while let Some(pos) = rest.find(key) {
        let boundary_ok = {
            let abs = consumed + pos;
            abs == 0 || !attrs.as_bytes()[abs - 1].is_ascii_alphanumeric()
        };
        let after = rest[pos + key.len()..].trim_start();
        if boundary_ok && after.starts_with('=') {
            let after = after[1..].trim_start();
            let quote = after.chars().next()?;
            if quote == '"' || quote == '\'' {
                let value = &after[1..];
                let end = value.find(quote)?;
                return Some(&value[..end]);
            }
        }
        consumed += pos + key.len();
        rest = &rest[pos + key.len()..];
    }
    None
}

/// Resolve the five predefined XML entities
fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<searchRetrieveResponse>
  <numberOfRecords>1</numberOfRecords>
  <records>
    <record>
      <leader>00714cam a2200205 a 4500</leader>
      <controlfield tag="001">12345678</controlfield>
      <controlfield tag="008">990101s1965    xxu           000 1 eng  </controlfield>
      <datafield tag="020" ind1=" " ind2=" ">
        <subfield code="a">9780441013593</subfield>
      </datafield>
      <datafield tag="100" ind1="1" ind2=" ">
        <subfield code="a">Herbert, Frank</subfield>
      </datafield>
      <datafield tag="245" ind1="1" ind2="0">
        <subfield code="a">Dune</subfield>
        <subfield code="b">a novel</subfield>
      </datafield>
      <datafield tag="260" ind1=" " ind2=" ">
        <subfield code="a">New York :</subfield>
        <subfield code="b">Ace Books,</subfield>
        <subfield code="c">1965.</subfield>
      </datafield>
      <datafield tag="300" ind1=" " ind2=" ">
        <subfield code="a">412 p. ;</subfield>
      </datafield>
      <datafield tag="650" ind1=" " ind2="0">
        <subfield code="a">Science fiction</subfield>
      </datafield>
      <datafield tag="650" ind1=" " ind2="0">
        <subfield code="a">Dune (Imaginary place) &amp; environs</subfield>
      </datafield>
    </record>
  </records>
</searchRetrieveResponse>"#;

    #[test]
    fn test_parse_empty_input() {
        assert!(MarcxmlRecord::parse("").is_none());
        assert!(MarcxmlRecord::parse("<searchRetrieveResponse/>").is_none());
    }

    #[test]
    fn test_parse_leader_and_control_fields() {
        let record = MarcxmlRecord::parse(SAMPLE).expect("record");
        assert_eq!(record.leader.as_deref(), Some("00714cam a2200205 a 4500"));
        assert_eq!(record.get_control_field("001"), Some("12345678"));
        assert!(record.get_control_field("008").is_some());
    }

    #[test]
    fn test_parse_data_fields() {
        let record = MarcxmlRecord::parse(SAMPLE).expect("record");
        assert_eq!(record.get_subfield("245", 'a'), Some("Dune"));
        assert_eq!(record.get_subfield("245", 'b'), Some("a novel"));
        assert_eq!(record.get_subfield("100", 'a'), Some("Herbert, Frank"));
        assert_eq!(record.get_subfield("020", 'a'), Some("9780441013593"));

        let field = record.get_fields("245")[0];
        assert_eq!(field.ind1, '1');
        assert_eq!(field.ind2, '0');
    }

    #[test]
    fn test_repeated_fields_and_entities() {
        let record = MarcxmlRecord::parse(SAMPLE).expect("record");
        let subjects = record.get_all_subfields("650", 'a');
        assert_eq!(
            subjects,
            vec!["Science fiction", "Dune (Imaginary place) & environs"]
        );
    }

    #[test]
    fn test_namespace_prefixes_are_ignored() {
        let xml = r#"<zs:records><marc:record>
            <marc:leader>00000nam</marc:leader>
            <marc:datafield tag="245" ind1="0" ind2="0">
              <marc:subfield code="a">Prefixed</marc:subfield>
            </marc:datafield>
        </marc:record></zs:records>"#;
        let record = MarcxmlRecord::parse(xml).expect("record");
        assert_eq!(record.get_subfield("245", 'a'), Some("Prefixed"));
    }

    #[test]
    fn test_parse_all_multiple_records() {
        let xml = r#"<records>
          <record><datafield tag="245" ind1=" " ind2=" ">
            <subfield code="a">One</subfield></datafield></record>
          <record><datafield tag="245" ind1=" " ind2=" ">
            <subfield code="a">Two</subfield></datafield></record>
        </records>"#;
        let records = MarcxmlRecord::parse_all(xml);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get_subfield("245", 'a'), Some("Two"));
    }
}
