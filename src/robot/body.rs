//! Body parts and where they sit relative to a robot's center

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A recognised part of a robot's body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Head,
    Body,
    Arms,
    Legs,
}

impl BodyPart {
    pub const ALL: [BodyPart; 4] = [BodyPart::Head, BodyPart::Body, BodyPart::Arms, BodyPart::Legs];

    /// Offset of the part's anchor cell from the robot center
    pub fn offset(&self) -> (i32, i32) {
        match self {
            BodyPart::Head => (-2, -2),
            BodyPart::Body => (-1, 1),
            BodyPart::Arms => (-3, 1),
            BodyPart::Legs => (-1, 3),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Body => "body",
            BodyPart::Arms => "arms",
            BodyPart::Legs => "legs",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyPart {
    type Err = InvalidBodyPart;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(BodyPart::Head),
            "body" => Ok(BodyPart::Body),
            "arms" => Ok(BodyPart::Arms),
            "legs" => Ok(BodyPart::Legs),
            other => Err(InvalidBodyPart(other.to_string())),
        }
    }
}

/// Lookup of a body part name that is not head, body, arms or legs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid body part: {0:?}")]
pub struct InvalidBodyPart(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_parts() {
        for part in BodyPart::ALL {
            assert_eq!(part.name().parse::<BodyPart>(), Ok(part));
        }
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("tail".parse::<BodyPart>(), Err(InvalidBodyPart("tail".into())));
        // Lookup is exact, as typed at the prompt
        assert!("Head".parse::<BodyPart>().is_err());
        assert!(" head".parse::<BodyPart>().is_err());
        assert!("".parse::<BodyPart>().is_err());
    }

    #[test]
    fn test_error_message() {
        let err = "tail".parse::<BodyPart>().unwrap_err();
        assert_eq!(err.to_string(), "invalid body part: \"tail\"");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }
}
