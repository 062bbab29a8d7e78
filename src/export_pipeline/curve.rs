//! Tone curve module
//!
//! Builds the 65536-entry lookup table for a two-segment gamma/toe response
//! curve: a linear toe below the crossover point, a power law above it. With
//! a zero toe slope the curve degenerates to a pure power law.

pub const CURVE_LEN: usize = 0x10000;

/// Encoding direction of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CurveDirection {
    /// Linear input to display-encoded output
    #[default]
    Forward,
    /// Display-encoded input back to linear output
    Inverse,
}

/// Immutable lookup table mapping linear 16-bit input to encoded output.
///
/// Built once per gamma request and never mutated afterwards. The output is
/// monotonic non-decreasing and bounded in `[0, 65535]`.
pub struct ToneCurve {
    table: Box<[u16; CURVE_LEN]>,
    normalization: f64,
}

impl ToneCurve {
    pub fn get(&self, input: u16) -> u16 {
        self.table[input as usize]
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.table[..]
    }

    /// The toe-segment normalization constant derived during construction.
    /// The table fill does not consume it; full-image renderers do.
    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    /// Maps every sample through the curve in place.
    pub fn apply(&self, samples: &mut [u16]) {
        for sample in samples.iter_mut() {
            *sample = self.table[*sample as usize];
        }
    }
}

/// Builder for ToneCurve
pub struct ToneCurveBuilder {
    gamma: f64,
    toe_slope: f64,
    direction: CurveDirection,
}

impl ToneCurveBuilder {
    pub fn new(gamma: f64) -> Self {
        Self {
            gamma,
            toe_slope: 0.0,
            direction: CurveDirection::Forward,
        }
    }

    pub fn toe_slope(mut self, slope: f64) -> Self {
        self.toe_slope = slope;
        self
    }

    pub fn direction(mut self, direction: CurveDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Builds the lookup table. Deterministic: the same parameters always
    /// produce the same table.
    pub fn build(self) -> ToneCurve {
        let power = 1.0 / self.gamma;
        let slope = self.toe_slope;

        let mut knee = 0.0_f64;
        let mut crossover = 0.0_f64;
        let mut offset = 0.0_f64;

        // Bisect for the boundary point where the linear toe meets the power
        // segment with matching value and slope.
        let mut bnd = [0.0_f64, 0.0_f64];
        bnd[usize::from(slope >= 1.0)] = 1.0;
        if slope != 0.0 && (slope - 1.0) * (power - 1.0) <= 0.0 {
            for _ in 0..48 {
                knee = (bnd[0] + bnd[1]) / 2.0;
                if power != 0.0 {
                    let above =
                        ((knee / slope).powf(-power) - 1.0) / power - 1.0 / knee > -1.0;
                    bnd[usize::from(above)] = knee;
                } else {
                    let below = knee / (1.0 - 1.0 / knee).exp() < slope;
                    bnd[usize::from(below)] = knee;
                }
            }
            crossover = knee / slope;
            if power != 0.0 {
                offset = knee * (1.0 / power - 1.0);
            }
        }

        let normalization = if power != 0.0 {
            1.0 / (slope * crossover * crossover / 2.0 - offset * (1.0 - crossover)
                + (1.0 - crossover.powf(1.0 + power)) * (1.0 + offset) / (1.0 + power))
                - 1.0
        } else {
            1.0 / (slope * crossover * crossover / 2.0 + 1.0
                - knee
                - crossover
                - knee * crossover * (crossover.ln() - 1.0))
                - 1.0
        };

        let mut table = Box::new([0u16; CURVE_LEN]);
        for (i, entry) in table.iter_mut().enumerate() {
            let r = i as f64 / 65535.0;
            *entry = if r >= 1.0 {
                0xffff
            } else {
                let value = match self.direction {
                    CurveDirection::Forward => {
                        if r < crossover {
                            r * slope
                        } else if power != 0.0 {
                            r.powf(power) * (1.0 + offset) - offset
                        } else {
                            r.ln() * knee + 1.0
                        }
                    }
                    CurveDirection::Inverse => {
                        if r < knee {
                            r / slope
                        } else if power != 0.0 {
                            ((r + offset) / (1.0 + offset)).powf(1.0 / power)
                        } else {
                            ((r - 1.0) / knee).exp()
                        }
                    }
                };
                (65536.0 * value).clamp(0.0, 65535.0) as u16
            };
        }

        ToneCurve {
            table,
            normalization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_non_decreasing(curve: &ToneCurve) {
        let table = curve.as_slice();
        for i in 1..table.len() {
            assert!(
                table[i] >= table[i - 1],
                "curve decreases at index {}: {} < {}",
                i,
                table[i],
                table[i - 1]
            );
        }
    }

    #[test]
    fn pure_power_curve_endpoints_and_monotonicity() {
        let curve = ToneCurveBuilder::new(2.2).build();
        assert_eq!(curve.get(0), 0);
        assert_eq!(curve.get(65535), 65535);
        assert_non_decreasing(&curve);
    }

    #[test]
    fn pure_power_curve_matches_closed_form() {
        let curve = ToneCurveBuilder::new(2.2).build();
        let power = 1.0 / 2.2;
        for i in [1usize, 100, 6553, 32768, 65534] {
            let r = i as f64 / 65535.0;
            let expected = (65536.0 * r.powf(power)).clamp(0.0, 65535.0) as u16;
            assert_eq!(curve.as_slice()[i], expected);
        }
    }

    #[test]
    fn toe_segment_is_linear_below_the_crossover() {
        // Rec.709-style parameters: the toe slope is 4.5 well below the knee.
        let curve = ToneCurveBuilder::new(1.0 / 0.45)
            .toe_slope(4.5)
            .build();
        let r = 100.0_f64 / 65535.0;
        let expected = (65536.0 * (r * 4.5)) as u16;
        assert_eq!(curve.as_slice()[100], expected);
        assert_eq!(curve.get(65535), 65535);
        assert_non_decreasing(&curve);
    }

    #[test]
    fn inverse_direction_is_monotonic_with_fixed_endpoints() {
        let curve = ToneCurveBuilder::new(2.2)
            .direction(CurveDirection::Inverse)
            .build();
        assert_eq!(curve.get(0), 0);
        assert_eq!(curve.get(65535), 65535);
        assert_non_decreasing(&curve);
    }

    #[test]
    fn same_gamma_yields_identical_tables() {
        let a = ToneCurveBuilder::new(1.8).build();
        let b = ToneCurveBuilder::new(1.8).build();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn apply_maps_samples_through_the_table() {
        let curve = ToneCurveBuilder::new(2.2).build();
        let mut samples = vec![0u16, 1000, 65535];
        curve.apply(&mut samples);
        assert_eq!(samples[0], curve.get(0));
        assert_eq!(samples[1], curve.get(1000));
        assert_eq!(samples[2], 65535);
    }
}
