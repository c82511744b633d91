//! Programmatically determine whether a las version carries an optional header block.
//!
//! Features are structures that implement the [Feature] trait. The most common
//! way to use features is via [Version::supports]:
//!
//! ```
//! use las_scene::feature::{Evlrs, Waveforms};
//! use las_scene::Version;
//!
//! let las_1_3 = Version::new(1, 3);
//! assert!(las_1_3.supports::<Waveforms>());
//! assert!(!las_1_3.supports::<Evlrs>());
//! ```
//!
//! A feature introduced in some version stays present in every later version, so a
//! hypothetical las 1.5 file is still read with its 1.4 fields.

use crate::Version;

/// A trait implemented by each feature.
pub trait Feature {
    /// The first version that carries this feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::feature::{Waveforms, Feature};
    /// use las_scene::Version;
    /// assert_eq!(Version::new(1, 3), Waveforms::since());
    /// ```
    fn since() -> Version;

    /// Is this feature supported by this version?
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::feature::{Waveforms, Feature};
    /// use las_scene::Version;
    /// assert!(!Waveforms::is_supported_by(Version::new(1, 2)));
    /// assert!(Waveforms::is_supported_by(Version::new(1, 4)));
    /// ```
    fn is_supported_by(version: Version) -> bool {
        version >= Self::since()
    }

    /// Returns the name of this feature.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::feature::{Waveforms, Feature};
    /// assert_eq!("Waveforms", Waveforms::name());
    /// ```
    fn name() -> &'static str;
}

macro_rules! features {
    (   $(
            $(#[$meta:meta])*
            $name:ident ($major:expr, $minor:expr);
        )+
    ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug)]
            pub struct $name {}

            impl Feature for $name {
                fn since() -> Version {
                    Version::new($major, $minor)
                }

                fn name() -> &'static str {
                    stringify!($name)
                }
            }
        )+
    }
}

features! {
    /// Does the header hold the start of the waveform data packet record?
    Waveforms(1, 3);
    /// Does the header hold the location and count of extended variable length records?
    Evlrs(1, 4);
    /// Does the header hold 64-bit point counts?
    LargeFiles(1, 4);
}
