//! Popup text shown when a marker is clicked.

use crate::dataset::LocationRecord;

/// Fractional digits used when rendering coordinates.
pub const COORDINATE_PRECISION: usize = 6;

/// Build the popup HTML for a record.
///
/// Text values are HTML-escaped; coordinates are rendered with
/// [`COORDINATE_PRECISION`] fractional digits.
pub fn popup_html(record: &LocationRecord) -> String {
    format!(
        "<div class=\"popup-title\">{name}</div>\n\
         <div class=\"popup-info\"><strong>Județ:</strong> {county}</div>\n\
         <div class=\"popup-info\"><strong>Tip:</strong> {kind}</div>\n\
         <div class=\"popup-info\"><strong>Coordonate:</strong><br>\
         Lat: {lat:.prec$}<br>Lng: {lng:.prec$}</div>",
        name = escape_html(&record.name),
        county = escape_html(&record.county),
        kind = escape_html(&record.kind),
        lat = record.latitude,
        lng = record.longitude,
        prec = COORDINATE_PRECISION,
    )
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_contains_fields_and_fixed_precision() {
        let record = LocationRecord::new(
            "Cluj",
            "Liceul Teoretic Ion Agârbiceanu",
            "Liceu",
            46.55,
            23.57,
        );
        let html = popup_html(&record);

        assert!(html.contains("<div class=\"popup-title\">Liceul Teoretic Ion Agârbiceanu</div>"));
        assert!(html.contains("<strong>Județ:</strong> Cluj"));
        assert!(html.contains("<strong>Tip:</strong> Liceu"));
        assert!(html.contains("Lat: 46.550000"));
        assert!(html.contains("Lng: 23.570000"));
    }

    #[test]
    fn test_popup_rounds_to_six_digits() {
        let record = LocationRecord::new("Cluj", "A", "Liceu", 46.0623309, 23.76543219);
        let html = popup_html(&record);
        assert!(html.contains("Lat: 46.062331"));
        assert!(html.contains("Lng: 23.765432"));
    }

    #[test]
    fn test_popup_escapes_text() {
        let record = LocationRecord::new("Cluj", "Școala <b>\"Unirea\"</b> & Co", "Liceu", 46.5, 23.5);
        let html = popup_html(&record);
        assert!(html.contains("Școala &lt;b&gt;&quot;Unirea&quot;&lt;/b&gt; &amp; Co"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_escape_html_passthrough() {
        assert_eq!(escape_html("Grădiniță nr. 5"), "Grădiniță nr. 5");
        assert_eq!(escape_html("O'Neil"), "O&#39;Neil");
    }
}
