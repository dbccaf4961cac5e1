/// Radial distortion polynomial in the squared radius.
///
/// $$
/// f(r^2, \vec β) = β_0 + β_1 ⋅ r^2 + β_2 ⋅ r^4 + ⋯ + β_n ⋅ r^{2n}
/// $$
///
/// The terms are summed in power form, lowest degree first, so that
/// `[1.0, k1, k2]` evaluates to exactly `1 + r2 * k1 + r2 * r2 * k2`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct RadialPolynomial<const N: usize>([f64; N]);

impl<const N: usize> RadialPolynomial<N> {
    pub fn from_parameters(parameters: [f64; N]) -> Self {
        Self(parameters)
    }

    pub fn parameters(&self) -> [f64; N] {
        self.0
    }

    /// Coefficient of `r2^degree`, zero past the last term.
    pub fn coefficient(&self, degree: usize) -> f64 {
        self.0.get(degree).copied().unwrap_or(0.0)
    }

    pub fn evaluate(&self, r2: f64) -> f64 {
        let mut coefficients = self.0.iter();
        let mut result = match coefficients.next() {
            Some(&constant) => constant,
            None => return 0.0,
        };
        let mut power = 1.0;
        for &coefficient in coefficients {
            power *= r2;
            result += power * coefficient;
        }
        result
    }
}

/// The `1 + k1⋅r² + k2⋅r⁴` factor of the simplified Brown model.
pub type BrownRadial = RadialPolynomial<3>;

impl BrownRadial {
    pub fn brown(k1: f64, k2: f64) -> Self {
        Self::from_parameters([1.0, k1, k2])
    }
}
