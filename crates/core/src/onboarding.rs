//! Profile completion rules for newly signed-in students.

use crate::error::CoreError;

/// Minimum number of whitespace-separated words in a profile bio.
pub const MIN_BIO_WORDS: usize = 30;

/// Fields a principal submits to complete their profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: Option<String>,
    pub course: Option<String>,
    pub batch: Option<String>,
    pub bio: Option<String>,
}

/// A validated profile update. `name: None` keeps the stored name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub course: Option<String>,
    pub batch: Option<String>,
    pub bio: String,
}

pub fn bio_word_count(bio: &str) -> usize {
    bio.split_whitespace().count()
}

impl ProfileDraft {
    pub fn validate(self) -> Result<ProfileUpdate, CoreError> {
        let bio = self.bio.unwrap_or_default().trim().to_string();
        let words = bio_word_count(&bio);
        if words < MIN_BIO_WORDS {
            return Err(CoreError::Validation(format!(
                "Bio must be at least {MIN_BIO_WORDS} words. Currently: {words}."
            )));
        }

        Ok(ProfileUpdate {
            name: self.name.filter(|n| !n.trim().is_empty()),
            course: self.course,
            batch: self.batch,
            bio,
        })
    }
}
