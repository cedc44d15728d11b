use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Moderation status shared by documents and exams.
///
/// Everything is created `Pending`; the transition to `Approved` happens
/// outside this service. Read paths only ever expose approved rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Pending,
    Approved,
}

impl ModerationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        assert_eq!(ModerationStatus::Pending.as_str(), "pending");
        assert_eq!(ModerationStatus::Approved.to_string(), "approved");
        assert_eq!(
            ModerationStatus::from_str("approved"),
            Ok(ModerationStatus::Approved)
        );
        assert!(ModerationStatus::from_str("rejected").is_err());
    }
}
