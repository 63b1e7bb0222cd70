use crate::domain::model::Breed;
use crate::utils::error::{MorningError, Result};

/// Index of the breed once the URL is split on `/`:
/// `https:` / `` / `images.dog.ceo` / `breeds` / `<breed>` / `<file>`.
const BREED_SEGMENT: usize = 4;

impl Breed {
    /// Reads the breed from a Dog CEO image URL. This relies on the image host
    /// keeping its `/breeds/<breed>/<file>` layout.
    pub fn from_image_url(image_url: &str) -> Result<Self> {
        let segment = image_url.split('/').nth(BREED_SEGMENT).ok_or_else(|| {
            MorningError::MalformedImageUrl {
                url: image_url.to_string(),
                reason: format!(
                    "expected at least {} '/'-separated segments",
                    BREED_SEGMENT + 1
                ),
            }
        })?;

        if segment.trim().is_empty() {
            return Err(MorningError::MalformedImageUrl {
                url: image_url.to_string(),
                reason: "breed segment is empty".to_string(),
            });
        }

        Ok(Breed::new_unchecked(segment.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breed_from_dog_ceo_url() {
        let breed =
            Breed::from_image_url("https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg")
                .unwrap();
        assert_eq!(breed.as_str(), "hound-afghan");
    }

    #[test]
    fn test_breed_from_url_with_port() {
        let breed = Breed::from_image_url("http://127.0.0.1:5000/breeds/pug/pug_1.jpg").unwrap();
        assert_eq!(breed.to_string(), "pug");
    }

    #[test]
    fn test_short_url_is_rejected() {
        let err = Breed::from_image_url("https://images.dog.ceo/breeds").unwrap_err();
        assert!(matches!(err, MorningError::MalformedImageUrl { .. }));
    }

    #[test]
    fn test_empty_breed_segment_is_rejected() {
        let err = Breed::from_image_url("https://images.dog.ceo/breeds//x.jpg").unwrap_err();
        match err {
            MorningError::MalformedImageUrl { reason, .. } => assert!(reason.contains("empty")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
