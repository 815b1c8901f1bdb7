//! Multipart form assembly for [`ApiClient::upload`](crate::ApiClient::upload).

use reqwest::multipart::{Form, Part};

use crate::error::FetchError;

/// A single multipart field value: either a plain text field or a binary
/// file part.
#[derive(Clone, Debug)]
pub enum FormValue {
    /// Plain scalar field sent as text under its field name.
    Text(String),
    /// Binary file part.
    File(FilePart),
}

impl FormValue {
    /// Plain text field.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// File part from raw bytes; filename and MIME type can be attached via
    /// [`FilePart`] builder methods.
    pub fn file(bytes: impl Into<Vec<u8>>) -> Self {
        Self::File(FilePart::new(bytes))
    }
}

/// Binary payload for a multipart field.
#[derive(Clone, Debug)]
pub struct FilePart {
    bytes: Vec<u8>,
    file_name: Option<String>,
    mime: Option<String>,
}

impl FilePart {
    /// Create a file part from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: None,
            mime: None,
        }
    }

    /// Attach an inherent filename, used verbatim in the form.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Attach a MIME type such as `image/png`.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Build a reqwest multipart form from ordered `(name, value)` pairs.
///
/// File parts without an inherent filename get one synthesized from the
/// field name and the MIME subtype (`file` + `image/png` becomes
/// `file.png`), so servers that require a filename still accept the part.
pub fn build_form(fields: Vec<(String, FormValue)>) -> Result<Form, FetchError> {
    let mut form = Form::new();
    for (name, value) in fields {
        form = match value {
            FormValue::Text(text) => form.text(name, text),
            FormValue::File(file) => {
                let part = file_part(&name, file)?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

fn file_part(name: &str, file: FilePart) -> Result<Part, FetchError> {
    // Without an explicit MIME type, an inherent filename is the next best
    // source for one.
    let mime = file.mime.clone().or_else(|| {
        file.file_name
            .as_deref()
            .and_then(|f| mime_guess::from_path(f).first_raw().map(|s| s.to_string()))
    });
    let file_name = match file.file_name {
        Some(name) => name,
        None => synthesize_file_name(name, mime.as_deref()),
    };
    let mut part = Part::bytes(file.bytes).file_name(file_name);
    if let Some(m) = &mime {
        part = part
            .mime_str(m)
            .map_err(|e| FetchError::config(format!("Invalid MIME type '{m}': {e}")))?;
    }
    Ok(part)
}

/// Filename for a file part that has none: `<field>.<ext>`, where the
/// extension is the MIME subtype, or `bin` when no type is known.
fn synthesize_file_name(field: &str, mime: Option<&str>) -> String {
    format!("{field}.{}", extension_for(mime))
}

fn extension_for(mime: Option<&str>) -> String {
    mime.and_then(|m| m.split('/').nth(1))
        .map(|subtype| subtype.split(';').next().unwrap_or(subtype).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "bin".to_string())
}
