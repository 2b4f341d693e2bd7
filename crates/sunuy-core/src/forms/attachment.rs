use serde::{Deserialize, Serialize};

/// Upload ceiling advertised on every file input.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata for a file picked in a form. File contents never leave the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Advertised accept list and size limit for one file input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentRule {
    pub label: &'static str,
    pub accept: &'static [&'static str],
    pub max_bytes: u64,
}

impl AttachmentRule {
    pub const IMAGES: &'static [&'static str] = &["image/"];
    pub const IMAGES_OR_PDF: &'static [&'static str] = &["image/", "application/pdf"];

    #[must_use]
    pub const fn new(label: &'static str, accept: &'static [&'static str]) -> Self {
        Self {
            label,
            accept,
            max_bytes: MAX_ATTACHMENT_BYTES,
        }
    }

    fn accepts(&self, content_type: &str) -> bool {
        self.accept.iter().any(|prefix| content_type.starts_with(prefix))
    }

    /// Cosmetic hints for `attachment`; never a reason to reject the form.
    #[must_use]
    pub fn hints(&self, attachment: &Attachment) -> Vec<String> {
        let mut hints = Vec::new();
        if !self.accepts(&attachment.content_type) {
            hints.push(format!(
                "{}: '{}' has unexpected type {}",
                self.label, attachment.file_name, attachment.content_type
            ));
        }
        if attachment.size_bytes > self.max_bytes {
            hints.push(format!(
                "{}: '{}' exceeds {} MB",
                self.label,
                attachment.file_name,
                self.max_bytes / (1024 * 1024)
            ));
        }
        hints
    }

    pub(crate) fn hints_all<'a>(
        &self,
        attachments: impl IntoIterator<Item = &'a Attachment>,
    ) -> Vec<String> {
        attachments
            .into_iter()
            .flat_map(|a| self.hints(a))
            .collect()
    }
}
