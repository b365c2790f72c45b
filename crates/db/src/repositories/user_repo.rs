//! Repository for the `users` table.

use majlis_core::types::UserId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, ProfileScalars, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, auth_subject, email, first_name, last_name, phone, personal_email, \
     ethnicity, date_of_birth, education_level, skills, onboarding_completed_at, \
     created_at, updated_at";

/// Provides CRUD operations for members.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new member at first sign-in, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (auth_subject, email, first_name, last_name) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.auth_subject)
            .bind(&input.email)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(pool)
            .await
    }

    /// Find a member by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a member by the identity provider's subject id.
    pub async fn find_by_auth_subject(
        pool: &PgPool,
        auth_subject: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE auth_subject = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(auth_subject)
            .fetch_optional(pool)
            .await
    }

    /// Find a member by organization email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Write the scalar profile fields in one statement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile_scalars(
        pool: &PgPool,
        id: UserId,
        scalars: &ProfileScalars,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                phone = $2, \
                personal_email = $3, \
                ethnicity = $4, \
                date_of_birth = $5, \
                education_level = $6, \
                skills = $7, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&scalars.phone)
            .bind(&scalars.personal_email)
            .bind(&scalars.ethnicity)
            .bind(scalars.date_of_birth)
            .bind(scalars.education_level)
            .bind(&scalars.skills)
            .fetch_optional(pool)
            .await
    }

    /// Write only the personal-info fields (wizard step 1).
    pub async fn update_personal_info(
        pool: &PgPool,
        id: UserId,
        phone: Option<&str>,
        personal_email: Option<&str>,
        ethnicity: Option<&str>,
        date_of_birth: Option<chrono::NaiveDate>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                phone = $2, \
                personal_email = $3, \
                ethnicity = $4, \
                date_of_birth = $5, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(phone)
            .bind(personal_email)
            .bind(ethnicity)
            .bind(date_of_birth)
            .fetch_optional(pool)
            .await
    }

    /// Write only the education level (wizard step 5).
    pub async fn update_education_level(
        pool: &PgPool,
        id: UserId,
        education_level: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET education_level = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(education_level)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Write only the selected skill set (wizard step 6).
    pub async fn update_skills(
        pool: &PgPool,
        id: UserId,
        skills: &[String],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET skills = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(skills)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Stamp `onboarding_completed_at`. Returns `true` if the row was
    /// updated (i.e. the flag was not already set).
    pub async fn mark_onboarding_complete(pool: &PgPool, id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET onboarding_completed_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND onboarding_completed_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
