use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named evidence-photo slot on a record.
pub trait ImageSlot: Copy + Eq + std::fmt::Debug + 'static {
    /// Multipart field name and validation key, e.g. `setup_image`.
    fn field_name(&self) -> &'static str;

    /// Human label used in validation messages.
    fn label(&self) -> &'static str;
}

/// A photo picked on the device but not yet uploaded.
#[derive(Clone, PartialEq)]
pub struct PhotoAttachment {
    /// Multipart field name of the slot this photo fills.
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoAttachment {
    pub fn new(slot: impl ImageSlot, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).to_string();
        Self {
            field: slot.field_name().to_string(),
            file_name,
            content_type,
            bytes,
        }
    }
}

// Manual impl so logs never dump image bytes.
impl std::fmt::Debug for PhotoAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoAttachment")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "image/jpeg",
    }
}

/// `data` of an upload response: multipart field name -> stored URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedImages {
    #[serde(flatten)]
    pub urls: HashMap<String, String>,
}

impl UploadedImages {
    pub fn url_for(&self, slot: impl ImageSlot) -> Option<&str> {
        self.urls.get(slot.field_name()).map(String::as_str)
    }
}
