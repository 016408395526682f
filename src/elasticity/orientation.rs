use crate::StrError;

/// Defines the tolerance for the row-orthonormality check
pub const ORIENTATION_TOL: f64 = 1e-6;

/// Holds an orthonormal crystallographic frame
///
/// The rows are the unit vectors of the new x/y/z axes expressed in the original
/// cubic basis. The frame is right-handed (determinant +1).
#[derive(Clone, Copy, Debug)]
pub struct Orientation {
    rows: [[f64; 3]; 3],
}

impl Orientation {
    /// Returns the identity frame (axes aligned with the cubic basis)
    pub fn identity() -> Self {
        Orientation {
            rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Creates a new frame from its rows, checking orthonormality
    ///
    /// Returns a configuration error if any entry of A·Aᵀ deviates from the
    /// identity by more than [ORIENTATION_TOL].
    pub fn new(rows: [[f64; 3]; 3]) -> Result<Self, StrError> {
        for i in 0..3 {
            for j in 0..3 {
                let target = if i == j { 1.0 } else { 0.0 };
                if f64::abs(dot(&rows[i], &rows[j]) - target) > ORIENTATION_TOL {
                    return Err("orientation matrix does not describe a rotation");
                }
            }
        }
        Ok(Orientation { rows })
    }

    /// Creates the frame of a crack from its crystallographic system
    ///
    /// * `crack_surface` -- direction (y-axis) normal to the free surface that forms
    ///   due to the crack
    /// * `crack_front` -- direction (z-axis) of the crack front
    ///
    /// The direction in which the crack runs (x-axis) is derived as the cross product
    /// surface × front; it is flipped if needed to keep the frame right-handed.
    /// The inputs need not be normalized, but they must be perpendicular.
    pub fn from_crack_system(crack_surface: [f64; 3], crack_front: [f64; 3]) -> Result<Self, StrError> {
        let mut third = cross(&crack_surface, &crack_front);
        let norm_third = norm(&third);
        if norm_third < ORIENTATION_TOL {
            return Err("crack surface and crack front directions are parallel");
        }
        for k in 0..3 {
            third[k] /= norm_third;
        }
        let surface = normalized(&crack_surface)?;
        let front = normalized(&crack_front)?;
        if determinant(&[third, surface, front]) < 0.0 {
            for k in 0..3 {
                third[k] = -third[k];
            }
        }
        Orientation::new([third, surface, front])
    }

    /// Returns the (i,j) entry (component j of axis i in the cubic basis)
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }

    /// Returns axis i as an array
    pub fn row(&self, i: usize) -> [f64; 3] {
        self.rows[i]
    }

    /// Returns the determinant of the frame matrix
    pub fn det(&self) -> f64 {
        determinant(&self.rows)
    }
}

/// Computes the inner product of two 3-vectors
fn dot(u: &[f64; 3], v: &[f64; 3]) -> f64 {
    u[0] * v[0] + u[1] * v[1] + u[2] * v[2]
}

/// Computes the cross product u × v
fn cross(u: &[f64; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ]
}

/// Computes the Euclidean norm of a 3-vector
fn norm(u: &[f64; 3]) -> f64 {
    f64::sqrt(dot(u, u))
}

/// Returns the unit vector along u
fn normalized(u: &[f64; 3]) -> Result<[f64; 3], StrError> {
    let n = norm(u);
    if n < ORIENTATION_TOL {
        return Err("direction vector is too small to normalize");
    }
    Ok([u[0] / n, u[1] / n, u[2] / n])
}

/// Computes the determinant of a 3×3 matrix given as rows
fn determinant(rows: &[[f64; 3]; 3]) -> f64 {
    dot(&rows[0], &cross(&rows[1], &rows[2]))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
