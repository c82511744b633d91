/// An xyz collection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector<T> {
    /// X
    pub x: T,
    /// Y
    pub y: T,
    /// Z
    pub z: T,
}

impl Vector<f64> {
    /// Takes the component-wise minimum of two vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_scene::Vector;
    /// let a = Vector { x: 1., y: 5., z: 3. };
    /// let b = Vector { x: 2., y: 4., z: 3. };
    /// assert_eq!(Vector { x: 1., y: 4., z: 3. }, a.min(b));
    /// ```
    pub fn min(self, other: Vector<f64>) -> Vector<f64> {
        Vector {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Takes the component-wise maximum of two vectors.
    pub fn max(self, other: Vector<f64>) -> Vector<f64> {
        Vector {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }
}
