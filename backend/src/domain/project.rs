//! Project document model.
//!
//! A project's lifecycle status doubles as its storage partition key, so a
//! status change is a physical relocation rather than an in-place write.
//! The repository owns that protocol; this module owns the shapes and the
//! field-level validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Longest accepted project title, in characters.
pub const TITLE_MAX: usize = 200;

/// Lifecycle status of a project; also the storage partition key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Not yet visible to the public site.
    Draft,
    /// Live on the public site.
    Published,
    /// Retired from the public site but retained.
    Archived,
}

impl ProjectStatus {
    /// Every partition, in probe order.
    pub const ALL: [Self; 3] = [Self::Draft, Self::Published, Self::Archived];

    /// Stable lowercase label, equal to the wire form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for caller-supplied project fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    /// Title was missing or blank once trimmed.
    EmptyTitle,
    /// Title exceeded [`TITLE_MAX`] characters.
    TitleTooLong {
        /// The configured maximum.
        max: usize,
    },
}

impl fmt::Display for ProjectValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "title must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for ProjectValidationError {}

/// Validate a caller-supplied title.
pub fn validate_title(title: &str) -> Result<(), ProjectValidationError> {
    if title.trim().is_empty() {
        return Err(ProjectValidationError::EmptyTitle);
    }
    if title.chars().count() > TITLE_MAX {
        return Err(ProjectValidationError::TitleTooLong { max: TITLE_MAX });
    }
    Ok(())
}

/// A stored project document.
///
/// ## Invariants
/// - `id` is generated at creation and immutable thereafter.
/// - At any point in time exactly one partition holds the live copy; during
///   a status move a transient duplicate may exist, and `updated_at` breaks
///   the tie (the most recent write is the live copy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Immutable document identifier.
    pub id: Uuid,
    /// Lifecycle status; determines the partition holding this document.
    pub status: ProjectStatus,
    /// Display title; non-empty.
    pub title: String,
    /// Optional short description for listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// When the document was first created.
    pub created_at: DateTime<Utc>,
    /// When the document was last written; maintained by the repository.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for creating a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ProjectDraft {
    /// Display title; must be non-empty.
    pub title: String,
    /// Optional short description.
    #[serde(default)]
    pub summary: Option<String>,
    /// Initial lifecycle status, choosing the initial partition.
    pub status: ProjectStatus,
}

/// Partial update applied to an existing project.
///
/// Absent fields are left unchanged. A present `status` that differs from
/// the current one triggers the partition move protocol in the repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ProjectPatch {
    /// Replacement title, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replacement summary, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Replacement status, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl Project {
    /// Return a copy with `patch` applied and `updated_at` restamped.
    ///
    /// The id and `created_at` are never touched by a patch.
    pub fn with_patch(&self, patch: &ProjectPatch, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            status: patch.status.unwrap_or(self.status),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            summary: patch.summary.clone().or_else(|| self.summary.clone()),
            created_at: self.created_at,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use rstest::rstest;

    fn sample(status: ProjectStatus) -> Project {
        Project {
            id: Uuid::new_v4(),
            status,
            title: "Observatory".to_owned(),
            summary: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("", ProjectValidationError::EmptyTitle)]
    #[case("   ", ProjectValidationError::EmptyTitle)]
    fn blank_titles_are_rejected(#[case] title: &str, #[case] expected: ProjectValidationError) {
        assert_eq!(validate_title(title).expect_err("must fail"), expected);
    }

    #[test]
    fn overlong_titles_are_rejected() {
        let title = "x".repeat(TITLE_MAX + 1);
        assert_eq!(
            validate_title(&title).expect_err("must fail"),
            ProjectValidationError::TitleTooLong { max: TITLE_MAX }
        );
    }

    #[test]
    fn titles_at_the_limit_pass() {
        let title = "x".repeat(TITLE_MAX);
        assert!(validate_title(&title).is_ok());
    }

    #[rstest]
    #[case(ProjectStatus::Draft, "draft")]
    #[case(ProjectStatus::Published, "published")]
    #[case(ProjectStatus::Archived, "archived")]
    fn status_labels_match_the_wire_form(#[case] status: ProjectStatus, #[case] label: &str) {
        assert_eq!(status.as_str(), label);
        let wire = serde_json::to_value(status).expect("status serialises");
        assert_eq!(wire, serde_json::json!(label));
    }

    #[test]
    fn out_of_range_status_values_fail_deserialisation() {
        let result = serde_json::from_value::<ProjectStatus>(serde_json::json!("retired"));
        assert!(result.is_err());
    }

    #[test]
    fn patch_preserves_unset_fields() {
        let project = sample(ProjectStatus::Draft);
        let now = Utc::now();
        let patched = project.with_patch(
            &ProjectPatch {
                status: Some(ProjectStatus::Published),
                ..ProjectPatch::default()
            },
            now,
        );
        assert_eq!(patched.id, project.id);
        assert_eq!(patched.title, project.title);
        assert_eq!(patched.status, ProjectStatus::Published);
        assert_eq!(patched.created_at, project.created_at);
        assert_eq!(patched.updated_at, now);
    }

    #[test]
    fn patch_replaces_present_fields() {
        let project = sample(ProjectStatus::Published);
        let patched = project.with_patch(
            &ProjectPatch {
                title: Some("Observatory II".to_owned()),
                summary: Some("Night-sky gallery".to_owned()),
                status: None,
            },
            Utc::now(),
        );
        assert_eq!(patched.title, "Observatory II");
        assert_eq!(patched.summary.as_deref(), Some("Night-sky gallery"));
        assert_eq!(patched.status, ProjectStatus::Published);
    }
}
