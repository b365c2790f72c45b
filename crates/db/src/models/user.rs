//! Member entity model and DTOs.

use chrono::NaiveDate;
use majlis_core::draft::{EducationLevel, ProfileDraft};
use majlis_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full member row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: UserId,
    /// Opaque subject id from the identity provider.
    pub auth_subject: String,
    /// Organization email used to sign in (domain-restricted).
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub personal_email: Option<String>,
    pub ethnicity: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub education_level: Option<String>,
    pub skills: Vec<String>,
    pub onboarding_completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The parsed education level, if one is stored.
    ///
    /// An unparseable stored value is treated as unset rather than
    /// poisoning every profile load.
    pub fn education_level(&self) -> Option<EducationLevel> {
        self.education_level
            .as_deref()
            .and_then(|s| EducationLevel::from_str_db(s).ok())
    }
}

/// Safe member representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub onboarding_completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            onboarding_completed_at: user.onboarding_completed_at,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a member at first sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub auth_subject: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// The scalar profile fields written on save, drawn from a draft.
#[derive(Debug, Clone)]
pub struct ProfileScalars {
    pub phone: Option<String>,
    pub personal_email: Option<String>,
    pub ethnicity: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub education_level: Option<&'static str>,
    pub skills: Vec<String>,
}

impl ProfileScalars {
    pub fn from_draft(draft: &ProfileDraft) -> Self {
        Self {
            phone: draft.phone.clone(),
            personal_email: draft.personal_email.clone(),
            ethnicity: draft.ethnicity.clone(),
            date_of_birth: draft.birth_date,
            education_level: draft.education_level.map(|l| l.as_str()),
            skills: draft.skills.clone(),
        }
    }
}
