/// Constants of one simulation.
///
/// The defaults are the classic values for an 800x800 window with unit masses:
/// `theta = 0.5`, `G = 0.1`, softening `15`, time step `1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    /// Opening angle. A node is approximated by its center of mass once
    /// `width / distance < theta`; `0` makes every interaction exact.
    pub theta: f32,
    pub gravity_constant: f32,
    /// Added in quadrature to every distance so forces stay finite at zero separation.
    pub softening: f32,
    pub time_step: f32,
    /// Deepest level the quadtree subdivides to.
    /// Leaves at this level keep every point they receive.
    pub max_depth: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            theta: 0.5,
            gravity_constant: 0.1,
            softening: 15.,
            time_step: 1.,
            max_depth: 24,
        }
    }
}

impl Parameters {
    #[must_use]
    pub fn theta(mut self, theta: f32) -> Self {
        assert!(theta >= 0., "theta has to be non-negative, got {theta}");
        self.theta = theta;
        self
    }

    #[must_use]
    pub fn gravity_constant(mut self, gravity_constant: f32) -> Self {
        assert!(gravity_constant.is_finite());
        self.gravity_constant = gravity_constant;
        self
    }

    #[must_use]
    pub fn softening(mut self, softening: f32) -> Self {
        assert!(
            softening >= 0. && softening.is_finite(),
            "softening has to be non-negative, got {softening}"
        );
        self.softening = softening;
        self
    }

    #[must_use]
    pub fn time_step(mut self, time_step: f32) -> Self {
        assert!(time_step.is_finite());
        self.time_step = time_step;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let params = Parameters::default().theta(0.).softening(1.).max_depth(3);

        assert_eq!(params.theta, 0.);
        assert_eq!(params.softening, 1.);
        assert_eq!(params.max_depth, 3);
        assert_eq!(params.gravity_constant, Parameters::default().gravity_constant);
    }

    #[test]
    #[should_panic]
    fn negative_theta() {
        let _ = Parameters::default().theta(-1.);
    }
}
