//! User profiles and ranking data.

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// A player's account record: display data plus ranking points.
///
/// Owned by the account system; the settlement protocol only ever
/// touches `points`, and only through the store's atomic increment.
/// `points` is signed; a new player who only loses goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: PlayerId,
    pub name: String,
    pub age: u8,
    pub country: String,
    pub points: i64,
    pub created_at: u64,
}

impl UserProfile {
    /// A fresh profile with zero points.
    pub fn new(uid: PlayerId, name: &str, age: u8, country: &str) -> Self {
        Self {
            uid,
            name: name.to_string(),
            age,
            country: country.to_string(),
            points: 0,
            created_at: crate::now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_starts_at_zero_points() {
        let p = UserProfile::new(PlayerId::generate(), "Ana", 23, "Brasil");
        assert_eq!(p.points, 0);
        assert_eq!(p.name, "Ana");
    }

    #[test]
    fn test_profile_wire_format() {
        let p = UserProfile::new(PlayerId::generate(), "Ana", 23, "Brasil");
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("uid").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["country"], "Brasil");
        assert_eq!(json["points"], 0);
    }
}
