use crate::enums::GithubLink;
use serde::{Deserialize, Serialize};

/// A single commit as reported by the commit source.
///
/// The author timestamp is kept as the raw ISO 8601 string from the wire;
/// normalization to a UTC calendar day happens in the streak engine, which
/// treats unparseable timestamps as a recoverable per-item condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    pub sha: String,
    pub author: CommitAuthor,
    pub message: String,
    pub html_url: String,
    /// The repository the commit belongs to, when the source resolved it.
    pub repository: Option<RepoRef>,
    /// The branch the commit was found on, when the source resolved it.
    pub branch: Option<String>,
}

/// Commit authorship metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    /// ISO 8601 author timestamp, arbitrary time-of-day and offset.
    pub date: String,
}

/// A lightweight reference to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoRef {
    pub name: String,
    pub full_name: String,
}

/// The user's persisted game profile.
///
/// This is the record the profile store hydrates and the backend returns on
/// login. Field names on the wire are camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// The backend sends Mongo-style `_id`; the stored document uses `id`.
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    /// On the wire this is the nullable `githubId` string.
    #[serde(rename = "githubId", default, with = "github_link_wire")]
    pub github: GithubLink,
    pub display_name: String,
    pub total_experience: u64,
    #[serde(rename = "currentHP")]
    pub current_hp: u32,
    #[serde(rename = "maxHP")]
    pub max_hp: u32,
    #[serde(rename = "currentLevelXP")]
    pub current_level_xp: u64,
    #[serde(rename = "levelUpXP")]
    pub level_up_xp: u64,
    pub rank: u32,
    pub level: u32,
    pub streak: u32,
    pub tasks_completed: Vec<String>,
}

/// Maps `GithubLink` to the wire's nullable `githubId` string.
mod github_link_wire {
    use crate::enums::GithubLink;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(link: &GithubLink, serializer: S) -> Result<S::Ok, S::Error> {
        link.login().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GithubLink, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(login) => GithubLink::Linked { login },
            None => GithubLink::NotLinked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_round_trips_with_camel_case_keys() {
        let profile = UserProfile {
            id: "64f1c0ffee".to_string(),
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar_url: None,
            github: GithubLink::Linked {
                login: "ada-dev".to_string(),
            },
            display_name: "Ada".to_string(),
            total_experience: 8200,
            current_hp: 80,
            max_hp: 100,
            current_level_xp: 1200,
            level_up_xp: 1500,
            rank: 3,
            level: 12,
            streak: 4,
            tasks_completed: vec!["t1".to_string()],
        };

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"displayName\""));
        assert!(json.contains("\"currentHP\""));
        assert!(json.contains("\"levelUpXP\""));
        assert!(json.contains("\"githubId\":\"ada-dev\""));

        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn null_github_id_deserializes_to_not_linked() {
        let json = r#"{
            "id": "1", "username": "u", "email": "u@example.com",
            "avatarUrl": null, "githubId": null, "displayName": "U",
            "totalExperience": 0, "currentHP": 100, "maxHP": 100,
            "currentLevelXP": 0, "levelUpXP": 100,
            "rank": 0, "level": 1, "streak": 0, "tasksCompleted": []
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.github, GithubLink::NotLinked);
    }

    #[test]
    fn github_link_defaults_to_not_linked() {
        let json = r#"{
            "id": "1", "username": "u", "email": "u@example.com",
            "avatarUrl": null, "displayName": "U",
            "totalExperience": 0, "currentHP": 100, "maxHP": 100,
            "currentLevelXP": 0, "levelUpXP": 100,
            "rank": 0, "level": 1, "streak": 0, "tasksCompleted": []
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.github, GithubLink::NotLinked);
        assert!(profile.github.login().is_none());
    }
}
