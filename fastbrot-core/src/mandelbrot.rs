use crate::complex::Complex;
use crate::params::EscapeParams;

/// The Mandelbrot recurrence `z_{n+1} = z_n² + c`, seeded with `z₀ = c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mandelbrot {
    params: EscapeParams,
}

impl Mandelbrot {
    pub fn new(params: EscapeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EscapeParams {
        &self.params
    }

    /// Count steps until the orbit of `c = cr + ci·i` leaves the bailout disc.
    ///
    /// The result is always in `1..=iteration_limit`. Reaching the limit
    /// means the orbit never escaped and the point is treated as inside
    /// the set.
    #[inline]
    pub fn escape_count(&self, cr: f64, ci: f64) -> u32 {
        let limit = self.params.iteration_limit;
        let bailout_sq = self.params.bailout_sq;

        let mut zr = cr;
        let mut zi = ci;
        let mut count = 0;

        loop {
            count += 1;
            if count >= limit {
                break;
            }

            // The squares dominate |z|², so they double as the bailout test.
            let zr2 = zr * zr;
            let zi2 = zi * zi;
            if zr2 + zi2 > bailout_sq {
                break;
            }

            zi = 2.0 * zr * zi + ci;
            zr = zr2 - zi2 + cr;
        }

        count
    }

    /// `true` when `escape_count` ran to the limit.
    #[inline]
    pub fn is_interior(&self, count: u32) -> bool {
        count >= self.params.iteration_limit
    }

    /// Walk the orbit of `c`, yielding `(step, z_step)` for every point
    /// visited before the orbit escapes or `max_steps` is reached.
    pub fn orbit(&self, c: Complex, max_steps: u32) -> Orbit {
        Orbit {
            c,
            z: c,
            step: 0,
            max_steps,
            bailout_sq: self.params.bailout_sq,
        }
    }
}

/// Iterator over the points of a single orbit. See [`Mandelbrot::orbit`].
#[derive(Debug, Clone)]
pub struct Orbit {
    c: Complex,
    z: Complex,
    step: u32,
    max_steps: u32,
    bailout_sq: f64,
}

impl Iterator for Orbit {
    type Item = (u32, Complex);

    fn next(&mut self) -> Option<Self::Item> {
        self.step = self.step.saturating_add(1);
        if self.step >= self.max_steps || self.z.norm_sq() > self.bailout_sq {
            self.step = self.max_steps;
            return None;
        }
        self.z = self.z.square_add(self.c);
        Some((self.step, self.z))
    }
}
