//! Request bodies: `multipart/form-data` parts for photo uploads and
//! `application/x-www-form-urlencoded` for plain pet fields.

use std::path::Path;

use tracing::debug;

use crate::error::ApiError;

/// An image file to upload as the `pet_photo` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Photo {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a photo from disk. The declared content type follows the
    /// extension; the service inspects the bytes on its own.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path).map_err(|source| ApiError::Photo {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        debug!(file = %file_name, size = bytes.len(), "loaded photo");
        Ok(Self::new(file_name, bytes))
    }

    /// File name as it may appear inside `filename="..."`.
    ///
    /// Quotes and line breaks are percent-encoded the way browsers do, so a
    /// name taken from disk cannot end the parameter or the header line.
    pub fn disposition_file_name(&self) -> String {
        let mut out = String::with_capacity(self.file_name.len());
        for c in self.file_name.chars() {
            match c {
                '"' => out.push_str("%22"),
                '\r' => out.push_str("%0D"),
                '\n' => out.push_str("%0A"),
                c => out.push(c),
            }
        }
        out
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
}

/// A `multipart/form-data` form described as named parts.
///
/// The form is not encoded here: `UreqTransport` renders it with
/// `ureq::unversioned::multipart`, which picks the boundary and writes the
/// part headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text(String),
    File(Photo),
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts
            .push((name.to_string(), FormPart::Text(value.to_string())));
        self
    }

    pub fn file(mut self, name: &str, photo: &Photo) -> Self {
        self.parts
            .push((name.to_string(), FormPart::File(photo.clone())));
        self
    }

    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }

    /// The text value of part `name`, if it is a text part.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, part)| match part {
            FormPart::Text(value) if n == name => Some(value.as_str()),
            _ => None,
        })
    }
}

/// Encode `pairs` as `application/x-www-form-urlencoded`.
pub fn urlencoded(pairs: &[(&str, &str)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
