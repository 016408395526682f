use crate::StrError;
use russell_lab::{mat_inverse, solve_lin_sys, Matrix, Vector};

/// Holds the results of a nonlinear least-squares solve
pub struct LeastSquaresOutput {
    /// Optimal parameters
    pub params: Vector,

    /// Covariance matrix (JᵀJ)⁻¹ of the optimum (None if singular)
    pub covariance: Option<Matrix>,

    /// Final sum of squared residuals
    pub cost: f64,

    /// Number of accepted iterations
    pub iterations: usize,

    /// Number of residuals
    pub n_residuals: usize,
}

/// Implements a damped least-squares (Levenberg-Marquardt) solver
///
/// Minimizes ‖f(p)‖² for a vector-valued residual function f with a
/// forward-difference Jacobian. The damping multiplies the diagonal of the
/// normal matrix (Marquardt scaling), so steps interpolate between Gauss-Newton
/// and scaled gradient descent.
pub struct LeastSquares {
    /// Maximum number of outer iterations
    pub max_iterations: usize,

    /// Tolerance on the infinity norm of the gradient
    pub tol_gradient: f64,

    /// Tolerance on the relative cost reduction (stall detection)
    pub tol_step: f64,

    /// Initial damping factor
    pub initial_damping: f64,

    /// Prints convergence information
    pub verbose: bool,
}

impl LeastSquares {
    /// Allocates a new instance with default settings
    pub fn new() -> Self {
        LeastSquares {
            max_iterations: 100,
            tol_gradient: 1e-10,
            tol_step: 1e-12,
            initial_damping: 1e-3,
            verbose: false,
        }
    }

    /// Minimizes the sum of squared residuals
    ///
    /// The callback fills the residual vector (length `n_residuals`) for the
    /// given parameter vector.
    pub fn solve<F>(&self, initial: &Vector, n_residuals: usize, mut residuals: F) -> Result<LeastSquaresOutput, StrError>
    where
        F: FnMut(&mut Vector, &Vector) -> Result<(), StrError>,
    {
        let n = initial.dim();
        if n == 0 {
            return Err("there must be at least one free parameter");
        }
        if n_residuals < n {
            return Err("there must be at least as many residuals as free parameters");
        }
        let m = n_residuals;

        let mut params = initial.clone();
        let mut res = Vector::new(m);
        residuals(&mut res, &params)?;
        let mut cost = sum_sq(&res);

        let mut jj = Matrix::new(m, n);
        let mut res_pert = Vector::new(m);
        let mut lambda = self.initial_damping;
        let mut iterations = 0;

        for it in 0..self.max_iterations {
            iterations = it;
            self.jacobian(&mut jj, &mut res_pert, &res, &params, &mut residuals)?;

            // normal matrix and gradient
            let mut ata = Matrix::new(n, n);
            let mut grad = Vector::new(n);
            for a in 0..n {
                for b in 0..n {
                    let mut sum = 0.0;
                    for i in 0..m {
                        sum += jj.get(i, a) * jj.get(i, b);
                    }
                    ata.set(a, b, sum);
                }
                let mut sum = 0.0;
                for i in 0..m {
                    sum += jj.get(i, a) * res[i];
                }
                grad[a] = sum;
            }

            let grad_norm = (0..n).fold(0.0_f64, |acc, a| f64::max(acc, f64::abs(grad[a])));
            if grad_norm < self.tol_gradient {
                if self.verbose {
                    println!("least-squares: converged on gradient after {} iterations", it);
                }
                break;
            }

            // inner loop: grow the damping until a step reduces the cost
            let mut accepted = false;
            loop {
                let mut aa = ata.clone();
                for a in 0..n {
                    aa.set(a, a, ata.get(a, a) * (1.0 + lambda));
                }
                let mut step = Vector::new(n);
                for a in 0..n {
                    step[a] = -grad[a];
                }
                if solve_lin_sys(&mut step, &mut aa).is_err() {
                    lambda *= 10.0;
                    if lambda > 1e12 {
                        return Err("nonlinear least-squares solver did not converge");
                    }
                    continue;
                }
                let mut trial = params.clone();
                for a in 0..n {
                    trial[a] += step[a];
                }
                residuals(&mut res_pert, &trial)?;
                let trial_cost = sum_sq(&res_pert);
                if trial_cost < cost {
                    let reduction = (cost - trial_cost) / f64::max(cost, f64::EPSILON);
                    params = trial;
                    for i in 0..m {
                        res[i] = res_pert[i];
                    }
                    cost = trial_cost;
                    lambda = f64::max(lambda * 0.3, 1e-12);
                    accepted = true;
                    if self.verbose {
                        println!("least-squares: it = {}, cost = {:e}, lambda = {:e}", it, cost, lambda);
                    }
                    if reduction < self.tol_step {
                        accepted = false; // stalled; treat as converged
                    }
                    break;
                }
                lambda *= 10.0;
                if lambda > 1e12 {
                    // no downhill step exists at this point; treat as converged
                    break;
                }
            }
            if !accepted {
                break;
            }
            if it + 1 == self.max_iterations {
                return Err("nonlinear least-squares solver did not converge");
            }
        }

        // covariance from the Jacobian at the optimum
        self.jacobian(&mut jj, &mut res_pert, &res, &params, &mut residuals)?;
        let mut ata = Matrix::new(n, n);
        for a in 0..n {
            for b in 0..n {
                let mut sum = 0.0;
                for i in 0..m {
                    sum += jj.get(i, a) * jj.get(i, b);
                }
                ata.set(a, b, sum);
            }
        }
        let mut cov = Matrix::new(n, n);
        let covariance = match mat_inverse(&mut cov, &ata) {
            Ok(_) => Some(cov),
            Err(_) => None,
        };

        Ok(LeastSquaresOutput {
            params,
            covariance,
            cost,
            iterations,
            n_residuals: m,
        })
    }

    /// Fills the forward-difference Jacobian at the given point
    fn jacobian<F>(
        &self,
        jj: &mut Matrix,
        work: &mut Vector,
        res: &Vector,
        params: &Vector,
        residuals: &mut F,
    ) -> Result<(), StrError>
    where
        F: FnMut(&mut Vector, &Vector) -> Result<(), StrError>,
    {
        let (m, n) = jj.dims();
        let mut pert = params.clone();
        for a in 0..n {
            let h = f64::sqrt(f64::EPSILON) * f64::max(f64::abs(params[a]), 1.0);
            pert[a] = params[a] + h;
            residuals(work, &pert)?;
            for i in 0..m {
                jj.set(i, a, (work[i] - res[i]) / h);
            }
            pert[a] = params[a];
        }
        Ok(())
    }
}

/// Computes the sum of squared entries
fn sum_sq(v: &Vector) -> f64 {
    let mut sum = 0.0;
    for i in 0..v.dim() {
        sum += v[i] * v[i];
    }
    sum
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LeastSquares;
    use russell_lab::{vec_approx_eq, Vector};

    #[test]
    fn solve_recovers_exponential_parameters() {
        // data from y = 2 e^(-0.5 t) sampled without noise
        let t: Vec<f64> = (0..20).map(|i| 0.25 * (i as f64)).collect();
        let y: Vec<f64> = t.iter().map(|t| 2.0 * f64::exp(-0.5 * t)).collect();
        let solver = LeastSquares::new();
        let initial = Vector::from(&[1.0, 1.0]);
        let output = solver
            .solve(&initial, t.len(), |res, p| {
                for i in 0..t.len() {
                    res[i] = y[i] - p[0] * f64::exp(-p[1] * t[i]);
                }
                Ok(())
            })
            .unwrap();
        vec_approx_eq(&output.params, &[2.0, 0.5], 1e-6);
        assert!(output.cost < 1e-12);
        assert!(output.covariance.is_some());
    }

    #[test]
    fn solve_recovers_linear_parameters() {
        let t: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = t.iter().map(|t| 3.0 * t - 1.0).collect();
        let solver = LeastSquares::new();
        let output = solver
            .solve(&Vector::from(&[0.0, 0.0]), t.len(), |res, p| {
                for i in 0..t.len() {
                    res[i] = y[i] - (p[0] * t[i] + p[1]);
                }
                Ok(())
            })
            .unwrap();
        vec_approx_eq(&output.params, &[3.0, -1.0], 1e-8);
    }

    #[test]
    fn solve_reports_singular_covariance() {
        // the second parameter never enters the residuals
        let solver = LeastSquares::new();
        let output = solver
            .solve(&Vector::from(&[0.0, 0.0]), 4, |res, p| {
                for i in 0..4 {
                    res[i] = (i as f64) - p[0];
                }
                Ok(())
            })
            .unwrap();
        assert!(output.covariance.is_none());
    }

    #[test]
    fn solve_captures_underdetermined_problems() {
        let solver = LeastSquares::new();
        let err = solver.solve(&Vector::from(&[0.0, 0.0]), 1, |res, p| {
            res[0] = p[0] + p[1];
            Ok(())
        });
        assert_eq!(err.err(), Some("there must be at least as many residuals as free parameters"));
        let err = solver.solve(&Vector::new(0), 3, |_, _| Ok(()));
        assert_eq!(err.err(), Some("there must be at least one free parameter"));
    }
}
