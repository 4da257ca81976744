// Special functions used by variational inference: digamma, trigamma and
// the expectation of log Dirichlet-distributed variables.

/// Digamma function ψ(x) for x > 0.
pub fn digamma(x: f64) -> f64 {
    let mut x = x;
    let mut result = 0.0;
    // Shift into the range where the asymptotic series is accurate
    while x < 6.0 {
        result -= 1.0 / x;
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result + x.ln() - 0.5 * inv
        - inv2
            * (1.0 / 12.0
                - inv2 * (1.0 / 120.0 - inv2 * (1.0 / 252.0 - inv2 * (1.0 / 240.0 - inv2 / 132.0))))
}

/// Trigamma function ψ'(x) for x > 0.
pub fn trigamma(x: f64) -> f64 {
    let mut x = x;
    let mut result = 0.0;
    while x < 6.0 {
        result += 1.0 / (x * x);
        x += 1.0;
    }
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    result
        + inv
        + 0.5 * inv2
        + inv * inv2 * (1.0 / 6.0 - inv2 * (1.0 / 30.0 - inv2 * (1.0 / 42.0 - inv2 / 30.0)))
}

/// E[log θ_k] for θ ~ Dirichlet(alpha).
pub fn dirichlet_expectation(alpha: &[f64]) -> Vec<f64> {
    let total = digamma(alpha.iter().sum());
    alpha.iter().map(|&a| digamma(a) - total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

    #[test]
    fn test_digamma_known_values() {
        assert!((digamma(1.0) + EULER_GAMMA).abs() < 1e-10);
        assert!((digamma(0.5) + EULER_GAMMA + 2.0 * 2f64.ln()).abs() < 1e-10);
        // ψ(x + 1) = ψ(x) + 1/x
        assert!((digamma(3.7) - digamma(2.7) - 1.0 / 2.7).abs() < 1e-10);
    }

    #[test]
    fn test_trigamma_known_values() {
        let pi2_over_6 = std::f64::consts::PI.powi(2) / 6.0;
        assert!((trigamma(1.0) - pi2_over_6).abs() < 1e-9);
        assert!((trigamma(0.5) - std::f64::consts::PI.powi(2) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dirichlet_expectation_is_negative() {
        for v in dirichlet_expectation(&[0.5, 1.0, 2.0]) {
            assert!(v < 0.0);
        }
    }
}
