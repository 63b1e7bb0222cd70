use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dog breed as it appears in the image URL path, e.g. `hound-afghan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breed(String);

impl Breed {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn new_unchecked(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Image written to storage during the fetch step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Name relative to the storage root.
    pub file_name: String,
    pub location: String,
    pub content_type: String,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct FetchedDog {
    pub image_url: String,
    pub breed: Breed,
    /// `None` when the best-effort download failed.
    pub image: Option<StoredImage>,
}

#[derive(Debug, Clone)]
pub struct MorningMessage {
    pub breed: Breed,
    pub text: String,
    pub image: Option<StoredImage>,
}

#[derive(Debug, Clone)]
pub struct MailAttachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachment: Option<MailAttachment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    pub recipients: Vec<String>,
    pub subject: String,
    pub attachment_bytes: Option<usize>,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub breed: Breed,
    pub message: String,
    /// Absent on a dry run.
    pub delivery: Option<DeliveryReport>,
}
