/// CSV export: pure document building plus the browser download
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// One CSV field. Text is always quoted; raw values (ids, dates, amounts)
/// are written as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvCell {
    Text(String),
    Raw(String),
}

impl CsvCell {
    fn render(&self) -> String {
        match self {
            CsvCell::Text(s) => format!("\"{}\"", s.replace('"', "\"\"")),
            CsvCell::Raw(s) => s.clone(),
        }
    }
}

/// Trait for rows that can be exported to CSV
pub trait CsvExportable {
    /// Column headers
    fn headers() -> Vec<&'static str>;

    /// Row values in header order
    fn to_csv_row(&self) -> Vec<CsvCell>;
}

/// Builds a comma-separated document: header line plus one line per row.
pub fn build_csv<T: CsvExportable>(rows: &[T]) -> String {
    let mut csv_content = T::headers().join(",");
    csv_content.push('\n');

    for row in rows {
        let line: Vec<String> = row.to_csv_row().iter().map(CsvCell::render).collect();
        csv_content.push_str(&line.join(","));
        csv_content.push('\n');
    }

    csv_content
}

/// Hands the document to the browser as a file download.
pub fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    // UTF-8 BOM so spreadsheet apps detect the encoding of accented text
    let with_bom = format!("\u{FEFF}{}", content);
    let blob = create_csv_blob(&with_bom)?;
    download_blob(&blob, filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line(&'static str, f64);

    impl CsvExportable for Line {
        fn headers() -> Vec<&'static str> {
            vec!["nome", "valor"]
        }
        fn to_csv_row(&self) -> Vec<CsvCell> {
            vec![
                CsvCell::Text(self.0.to_string()),
                CsvCell::Raw(format!("{:.2}", self.1)),
            ]
        }
    }

    #[test]
    fn test_build_csv_quotes_text() {
        let csv = build_csv(&[Line("Papel \"A4\", caixa", 12.5)]);
        assert_eq!(csv, "nome,valor\n\"Papel \"\"A4\"\", caixa\",12.50\n");
    }

    #[test]
    fn test_build_csv_empty_has_header_only() {
        assert_eq!(build_csv::<Line>(&[]), "nome,valor\n");
    }
}
