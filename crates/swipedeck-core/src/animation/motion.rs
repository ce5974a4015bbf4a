//! Frame-stepped motions for the active card.
//!
//! Two kinds: a fixed-duration eased timing used to throw the card
//! off-screen, and a damped spring used to bring it back to rest.

use serde::{Deserialize, Serialize};

use crate::storage::SpringConfig;

/// A 2D displacement in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub const ORIGIN: Offset = Offset { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn lerp(self, to: Offset, t: f64) -> Offset {
        Offset {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Motion {
    Timing(Timing),
    Spring(Spring),
}

impl Motion {
    pub fn timing(from: Offset, to: Offset, duration_ms: u64) -> Self {
        Motion::Timing(Timing {
            from,
            to,
            duration_ms: duration_ms as f64,
            elapsed_ms: 0.0,
        })
    }

    pub fn spring(from: Offset, to: Offset, config: SpringConfig) -> Self {
        Motion::Spring(Spring {
            from,
            to,
            config,
            elapsed_ms: 0.0,
            settled: false,
        })
    }

    /// Advance by `dt_ms` and return the new position.
    pub fn step(&mut self, dt_ms: f64) -> Offset {
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        match self {
            Motion::Timing(t) => t.step(dt_ms),
            Motion::Spring(s) => s.step(dt_ms),
        }
    }

    pub fn position(&self) -> Offset {
        match self {
            Motion::Timing(t) => t.position(),
            Motion::Spring(s) => s.position(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Motion::Timing(t) => t.elapsed_ms >= t.duration_ms,
            Motion::Spring(s) => s.settled,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Timing {
    from: Offset,
    to: Offset,
    duration_ms: f64,
    elapsed_ms: f64,
}

impl Timing {
    fn step(&mut self, dt_ms: f64) -> Offset {
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        self.position()
    }

    fn position(&self) -> Offset {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.from.lerp(self.to, ease_in_out(t))
    }
}

#[derive(Debug, Clone)]
pub struct Spring {
    from: Offset,
    to: Offset,
    config: SpringConfig,
    elapsed_ms: f64,
    settled: bool,
}

impl Spring {
    fn step(&mut self, dt_ms: f64) -> Offset {
        if self.settled {
            return self.to;
        }
        self.elapsed_ms += dt_ms;
        let secs = self.elapsed_ms / 1000.0;
        let (x, vx) = spring_axis(self.from.x, self.to.x, secs, &self.config);
        let (y, vy) = spring_axis(self.from.y, self.to.y, secs, &self.config);

        let at_rest = (self.to.x - x).abs() <= self.config.rest_displacement
            && (self.to.y - y).abs() <= self.config.rest_displacement
            && vx.abs() <= self.config.rest_speed
            && vy.abs() <= self.config.rest_speed;
        if at_rest || self.elapsed_ms >= self.config.max_duration_ms as f64 {
            self.settled = true;
            return self.to;
        }
        Offset::new(x, y)
    }

    fn position(&self) -> Offset {
        if self.settled {
            return self.to;
        }
        let secs = self.elapsed_ms / 1000.0;
        Offset::new(
            spring_axis(self.from.x, self.to.x, secs, &self.config).0,
            spring_axis(self.from.y, self.to.y, secs, &self.config).0,
        )
    }
}

/// Closed-form damped harmonic oscillator starting at rest.
/// Returns (position, velocity) at `t` seconds.
fn spring_axis(from: f64, to: f64, t: f64, cfg: &SpringConfig) -> (f64, f64) {
    let x0 = to - from;
    if x0 == 0.0 {
        return (to, 0.0);
    }
    let (k, c, m) = (cfg.stiffness, cfg.damping, cfg.mass);
    let omega0 = (k / m).sqrt();
    let zeta = c / (2.0 * (k * m).sqrt());

    if (zeta - 1.0).abs() < 1e-9 {
        let envelope = (-omega0 * t).exp();
        let position = to - envelope * (x0 + omega0 * x0 * t);
        let velocity = envelope * t * x0 * omega0 * omega0;
        (position, velocity)
    } else if zeta < 1.0 {
        let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega0 * t).exp();
        let a = zeta * omega0 * x0 / omega1;
        let (sin, cos) = (omega1 * t).sin_cos();
        let position = to - envelope * (a * sin + x0 * cos);
        let velocity = zeta * omega0 * envelope * (a * sin + x0 * cos)
            - envelope * (a * omega1 * cos - x0 * omega1 * sin);
        (position, velocity)
    } else {
        // Overdamped: two real decay rates, slow root dominates.
        let root = omega0 * (zeta * zeta - 1.0).sqrt();
        let r1 = -zeta * omega0 + root;
        let r2 = -zeta * omega0 - root;
        let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
        let a = -x0 * r2 / (r2 - r1);
        let b = x0 * r1 / (r2 - r1);
        let position = to + a * e1 + b * e2;
        let velocity = a * r1 * e1 + b * r2 * e2;
        (position, velocity)
    }
}

/// Ease-in-out, cubic-bezier(0.42, 0, 0.58, 1).
pub fn ease_in_out(x: f64) -> f64 {
    cubic_bezier(0.42, 0.0, 0.58, 1.0, x)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let bez = |p1: f64, p2: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    };
    let slope = |p1: f64, p2: f64, t: f64| {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    };

    // Newton first, bisection if the slope flattens out.
    let mut t = x;
    for _ in 0..8 {
        let err = bez(x1, x2, t) - x;
        if err.abs() < 1e-7 {
            return bez(y1, y2, t);
        }
        let d = slope(x1, x2, t);
        if d.abs() < 1e-6 {
            break;
        }
        t -= err / d;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = x;
    for _ in 0..32 {
        let v = bez(x1, x2, t);
        if (v - x).abs() < 1e-7 {
            break;
        }
        if v < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    bez(y1, y2, t)
}
