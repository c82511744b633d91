use crate::feature::Feature;
use std::fmt;

/// LAS version.
///
/// Versions are ordered, so `1.3 < 1.4 < 2.0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    ///
    /// Every las file we've seen in the wild has a major version of 1.
    pub major: u8,
    /// The minor version.
    pub minor: u8,
}

impl Version {
    /// Creates a new version.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_scene::Version;
    /// let version = Version::new(1, 2);
    /// ```
    pub fn new(major: u8, minor: u8) -> Version {
        Version { major, minor }
    }

    /// Does this version support the header feature?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Version;
    /// use las_scene::feature::Waveforms;
    /// assert!(!Version::new(1, 2).supports::<Waveforms>());
    /// assert!(Version::new(1, 3).supports::<Waveforms>());
    /// ```
    pub fn supports<F: Feature>(&self) -> bool {
        F::is_supported_by(*self)
    }

    /// Can we display point data written with this version?
    ///
    /// Only 1.0 through 1.3 are displayable.
    ///
    /// # Examples
    ///
    /// ```
    /// # use las_scene::Version;
    /// assert!(Version::new(1, 0).is_displayable());
    /// assert!(Version::new(1, 3).is_displayable());
    /// assert!(!Version::new(1, 4).is_displayable());
    /// assert!(!Version::new(2, 0).is_displayable());
    /// ```
    pub fn is_displayable(&self) -> bool {
        self.major == 1 && self.minor <= 3
    }
}

impl Default for Version {
    fn default() -> Version {
        Version::new(1, 2)
    }
}

impl From<(u8, u8)> for Version {
    fn from((major, minor): (u8, u8)) -> Version {
        Version::new(major, minor)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
