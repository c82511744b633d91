use crate::Vector;

/// Minimum and maximum bounds in three dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// The minimum values.
    pub min: Vector<f64>,

    /// The maximum values.
    pub max: Vector<f64>,
}

impl Bounds {
    /// Grows these bounds to encompass another bounds.
    ///
    /// Growing is idempotent, growing by the same bounds twice is the same as growing once.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::{Bounds, Vector};
    /// let mut bounds = Bounds::default();
    /// let other = Bounds {
    ///     min: Vector { x: 1., y: 2., z: 3. },
    ///     max: Vector { x: 4., y: 5., z: 6. },
    /// };
    /// bounds.grow(&other);
    /// assert_eq!(other, bounds);
    /// ```
    pub fn grow(&mut self, other: &Bounds) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Returns these bounds as `[min_x, max_x, min_y, max_y, min_z, max_z]`.
    ///
    /// This is the order the display model uses.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::{Bounds, Vector};
    /// let bounds = Bounds {
    ///     min: Vector { x: 1., y: 2., z: 3. },
    ///     max: Vector { x: 4., y: 5., z: 6. },
    /// };
    /// assert_eq!([1., 4., 2., 5., 3., 6.], bounds.to_array());
    /// ```
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }
}

impl Default for Bounds {
    fn default() -> Bounds {
        Bounds {
            min: Vector {
                x: f64::INFINITY,
                y: f64::INFINITY,
                z: f64::INFINITY,
            },
            max: Vector {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
                z: f64::NEG_INFINITY,
            },
        }
    }
}
