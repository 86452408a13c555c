//! Announcements shown on the TV dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::AnnouncementId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub body: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAnnouncement {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewAnnouncement {
    /// # Errors
    /// Returns [`DomainError::EmptyName`] for a blank title.
    pub fn into_announcement(self) -> Result<Announcement, DomainError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::EmptyName {
                entity: "announcement",
            });
        }
        Ok(Announcement {
            id: AnnouncementId::generate(),
            title,
            body: self.body,
            active: self.active,
            created_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub active: Option<bool>,
}

impl Announcement {
    /// # Errors
    /// Returns [`DomainError::EmptyName`] for a blank replacement title.
    pub fn apply(&mut self, update: AnnouncementUpdate) -> Result<(), DomainError> {
        if let Some(title) = update.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(DomainError::EmptyName {
                    entity: "announcement",
                });
            }
            self.title = title;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcements_are_active_by_default() {
        let input: NewAnnouncement = serde_json::from_str(r#"{"title":"Pizza Friday"}"#).unwrap();
        let announcement = input.into_announcement().unwrap();
        assert!(announcement.active);
        assert!(announcement.body.is_empty());
    }

    #[test]
    fn apply_can_deactivate() {
        let mut announcement = NewAnnouncement {
            title: "Contest".into(),
            body: "Top closer wins".into(),
            active: true,
        }
        .into_announcement()
        .unwrap();

        announcement
            .apply(AnnouncementUpdate {
                active: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert!(!announcement.active);
        assert_eq!(announcement.title, "Contest");
    }
}
