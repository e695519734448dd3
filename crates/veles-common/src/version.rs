//! Unity engine version value.
//!
//! Every layout decision in the asset format is a "version >= threshold"
//! predicate over this value, so ordering must match the engine's own:
//! lexicographic over (major, minor, build, type, type number), with the
//! release type itself ordered alpha < beta < china < final < patch <
//! experimental.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Release type of a Unity version, in comparison order.
///
/// The letter is the one embedded in the version string (`2019.4.13f1`
/// has type `f` = Final).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnityVersionType {
    Alpha,
    Beta,
    China,
    Final,
    Patch,
    Experimental,
}

impl UnityVersionType {
    /// The letter used in the string form.
    pub const fn letter(self) -> char {
        match self {
            UnityVersionType::Alpha => 'a',
            UnityVersionType::Beta => 'b',
            UnityVersionType::China => 'c',
            UnityVersionType::Final => 'f',
            UnityVersionType::Patch => 'p',
            UnityVersionType::Experimental => 'x',
        }
    }

    /// Parse a type letter.
    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            'a' => Some(UnityVersionType::Alpha),
            'b' => Some(UnityVersionType::Beta),
            'c' => Some(UnityVersionType::China),
            'f' => Some(UnityVersionType::Final),
            'p' => Some(UnityVersionType::Patch),
            'x' => Some(UnityVersionType::Experimental),
            _ => None,
        }
    }
}

/// A structured Unity version, e.g. `2019.4.13f1`.
///
/// `Ord` is derived from field order, which gives exactly the tuple
/// comparison the format's layout gates are defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnityVersion {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub kind: UnityVersionType,
    pub type_number: u8,
}

impl UnityVersion {
    /// Create a fully specified version.
    pub const fn new(
        major: u16,
        minor: u16,
        build: u16,
        kind: UnityVersionType,
        type_number: u8,
    ) -> Self {
        Self {
            major,
            minor,
            build,
            kind,
            type_number,
        }
    }

    /// Create a version threshold from the numeric parts only.
    ///
    /// The trailing fields are filled with their minimum values, so
    /// `v >= UnityVersion::from_parts(2019, 1, 0)` means "2019.1 and
    /// greater" regardless of release type.
    pub const fn from_parts(major: u16, minor: u16, build: u16) -> Self {
        Self::new(major, minor, build, UnityVersionType::Alpha, 0)
    }

    /// Shorthand for `self >= from_parts(major, minor, build)`.
    pub fn is_at_least(&self, major: u16, minor: u16, build: u16) -> bool {
        *self >= Self::from_parts(major, minor, build)
    }
}

impl fmt::Display for UnityVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}{}{}",
            self.major,
            self.minor,
            self.build,
            self.kind.letter(),
            self.type_number
        )
    }
}

impl FromStr for UnityVersion {
    type Err = Error;

    /// Parse the string form, e.g. `2020.3.0f2`.
    fn from_str(s: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidVersion(s.to_string());

        let mut parts = s.splitn(3, '.');
        let major = parts.next().ok_or_else(invalid)?;
        let minor = parts.next().ok_or_else(invalid)?;
        let rest = parts.next().ok_or_else(invalid)?;

        let major: u16 = major.parse().map_err(|_| invalid())?;
        let minor: u16 = minor.parse().map_err(|_| invalid())?;

        // The last component is "<build><type letter><type number>".
        let letter_pos = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .ok_or_else(invalid)?;

        let build: u16 = rest[..letter_pos].parse().map_err(|_| invalid())?;
        let letter = rest[letter_pos..].chars().next().ok_or_else(invalid)?;
        let kind = UnityVersionType::from_letter(letter).ok_or_else(invalid)?;
        let type_number: u8 = rest[letter_pos + 1..].parse().map_err(|_| invalid())?;

        Ok(Self::new(major, minor, build, kind, type_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = UnityVersion::from_parts(2019, 4, 13);
        let b = UnityVersion::from_parts(2020, 0, 0);
        assert!(a < b);

        let c = UnityVersion::from_parts(2019, 4, 14);
        assert!(a < c);

        let d = UnityVersion::from_parts(2019, 5, 0);
        assert!(c < d);
    }

    #[test]
    fn test_release_type_ordering() {
        let alpha = UnityVersion::new(2020, 3, 0, UnityVersionType::Alpha, 1);
        let beta = UnityVersion::new(2020, 3, 0, UnityVersionType::Beta, 1);
        let final_1 = UnityVersion::new(2020, 3, 0, UnityVersionType::Final, 1);
        let final_2 = UnityVersion::new(2020, 3, 0, UnityVersionType::Final, 2);

        assert!(alpha < beta);
        assert!(beta < final_1);
        assert!(final_1 < final_2);
    }

    #[test]
    fn test_threshold_semantics() {
        // from_parts fills the minimum type, so any release of 2019.1.0
        // compares >= the threshold.
        let threshold = UnityVersion::from_parts(2019, 1, 0);
        let alpha = UnityVersion::new(2019, 1, 0, UnityVersionType::Alpha, 1);
        assert!(alpha >= threshold);

        let older = UnityVersion::new(2018, 4, 20, UnityVersionType::Final, 1);
        assert!(older < threshold);
    }

    #[test]
    fn test_parse_roundtrip() {
        let v: UnityVersion = "2019.4.13f1".parse().unwrap();
        assert_eq!(v, UnityVersion::new(2019, 4, 13, UnityVersionType::Final, 1));
        assert_eq!(v.to_string(), "2019.4.13f1");

        let v: UnityVersion = "2020.3.0f2".parse().unwrap();
        assert_eq!(v, UnityVersion::new(2020, 3, 0, UnityVersionType::Final, 2));

        let v: UnityVersion = "5.5.0b11".parse().unwrap();
        assert_eq!(v, UnityVersion::new(5, 5, 0, UnityVersionType::Beta, 11));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("2019".parse::<UnityVersion>().is_err());
        assert!("2019.4".parse::<UnityVersion>().is_err());
        assert!("2019.4.13".parse::<UnityVersion>().is_err());
        assert!("2019.4.13q1".parse::<UnityVersion>().is_err());
        assert!("".parse::<UnityVersion>().is_err());
    }

    #[test]
    fn test_is_at_least() {
        let v = UnityVersion::new(2018, 4, 0, UnityVersionType::Final, 1);
        assert!(v.is_at_least(2017, 1, 0));
        assert!(v.is_at_least(2018, 4, 0));
        assert!(!v.is_at_least(2019, 1, 0));
    }
}
