use std::f64::consts::PI;
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Cap for the (pseudo)rapidity of momenta along the beam axis
pub const MAX_RAP: f64 = 1e5;

/// A four-momentum `(px, py, pz, E)`
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Deserialize, Serialize)]
pub struct FourMomentum {
    px: f64,
    py: f64,
    pz: f64,
    e: f64,
}

impl FourMomentum {
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Massless momentum with the given transverse momentum,
    /// pseudorapidity, and azimuthal angle
    pub fn from_pt_eta_phi(pt: f64, eta: f64, phi: f64) -> Self {
        Self::from_pt_eta_phi_m(pt, eta, phi, 0.)
    }

    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let p2 = px * px + py * py + pz * pz;
        Self::new(px, py, pz, (p2 + m * m).sqrt())
    }

    pub fn px(&self) -> f64 {
        self.px
    }

    pub fn py(&self) -> f64 {
        self.py
    }

    pub fn pz(&self) -> f64 {
        self.pz
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn pt2(&self) -> f64 {
        self.px * self.px + self.py * self.py
    }

    pub fn pt(&self) -> f64 {
        self.pt2().sqrt()
    }

    /// Transverse energy `E pt / |p|`
    pub fn et(&self) -> f64 {
        let p2 = self.pt2() + self.pz * self.pz;
        if p2 == 0. {
            0.
        } else {
            self.e * (self.pt2() / p2).sqrt()
        }
    }

    /// Azimuthal angle in `[0, 2π)`
    pub fn phi(&self) -> f64 {
        if self.px == 0. && self.py == 0. {
            return 0.;
        }
        let phi = self.py.atan2(self.px);
        if phi < 0. {
            phi + 2. * PI
        } else {
            phi
        }
    }

    /// Pseudorapidity
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt == 0. {
            return MAX_RAP.copysign(self.pz);
        }
        (self.pz / pt).asinh().clamp(-MAX_RAP, MAX_RAP)
    }

    /// Rapidity
    pub fn rap(&self) -> f64 {
        let ez = self.e - self.pz.abs();
        if ez <= 0. {
            return MAX_RAP.copysign(self.pz);
        }
        let y = 0.5 * ((self.e + self.pz.abs()) / ez).ln();
        y.min(MAX_RAP).copysign(self.pz)
    }

    pub fn m2(&self) -> f64 {
        self.e * self.e
            - self.px * self.px
            - self.py * self.py
            - self.pz * self.pz
    }

    /// Invariant mass, negative for spacelike momenta
    pub fn m(&self) -> f64 {
        let m2 = self.m2();
        if m2 < 0. {
            -(-m2).sqrt()
        } else {
            m2.sqrt()
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.px, self.py, self.pz, self.e].iter().all(|p| p.is_finite())
    }

    /// Azimuthal separation in `[0, π]`
    pub fn delta_phi(&self, other: &Self) -> f64 {
        let dphi = (self.phi() - other.phi()).abs();
        if dphi > PI {
            2. * PI - dphi
        } else {
            dphi
        }
    }

    /// Squared angular distance `Δη² + Δφ²`
    pub fn delta_r2(&self, other: &Self) -> f64 {
        let deta = self.eta() - other.eta();
        let dphi = self.delta_phi(other);
        deta * deta + dphi * dphi
    }

    pub fn delta_r(&self, other: &Self) -> f64 {
        self.delta_r2(other).sqrt()
    }
}

impl From<[f64; 4]> for FourMomentum {
    fn from(p: [f64; 4]) -> Self {
        let [px, py, pz, e] = p;
        Self::new(px, py, pz, e)
    }
}

impl From<FourMomentum> for [f64; 4] {
    fn from(p: FourMomentum) -> Self {
        [p.px, p.py, p.pz, p.e]
    }
}

impl Add for FourMomentum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.px + rhs.px,
            self.py + rhs.py,
            self.pz + rhs.pz,
            self.e + rhs.e,
        )
    }
}

impl AddAssign for FourMomentum {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl Zero for FourMomentum {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl Sum for FourMomentum {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, p| acc + p)
    }
}

impl<'a> Sum<&'a FourMomentum> for FourMomentum {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for FourMomentum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.px, self.py, self.pz, self.e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn kinematics() {
        let p = FourMomentum::new(3., 4., 0., 13.);
        assert_eq!(p.pt(), 5.);
        assert_eq!(p.m(), 12.);
        assert_eq!(p.eta(), 0.);
        assert_eq!(p.rap(), 0.);
        assert!((p.phi() - 4f64.atan2(3.)).abs() < EPS);
    }

    #[test]
    fn phi_range() {
        let p = FourMomentum::new(0., -1., 0., 1.);
        assert!((p.phi() - 1.5 * PI).abs() < EPS);
    }

    #[test]
    fn delta_phi_wraps() {
        let p1 = FourMomentum::from_pt_eta_phi(1., 0., 0.1);
        let p2 = FourMomentum::from_pt_eta_phi(1., 0., 2. * PI - 0.1);
        assert!((p1.delta_phi(&p2) - 0.2).abs() < 1e-9);
        assert!((p1.delta_r(&p2) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn pt_eta_phi_roundtrip() {
        let p = FourMomentum::from_pt_eta_phi_m(20., -1.3, 2.2, 5.);
        assert!((p.pt() - 20.).abs() < 1e-9);
        assert!((p.eta() + 1.3).abs() < 1e-9);
        assert!((p.phi() - 2.2).abs() < 1e-9);
        assert!((p.m() - 5.).abs() < 1e-9);
    }

    #[test]
    fn beam_axis() {
        let p = FourMomentum::new(0., 0., -10., 10.);
        assert_eq!(p.eta(), -MAX_RAP);
        assert_eq!(p.rap(), -MAX_RAP);
        assert_eq!(p.phi(), 0.);
        assert_eq!(p.et(), 0.);
    }

    #[test]
    fn sum() {
        let p: FourMomentum = [
            FourMomentum::new(1., 0., 0., 1.),
            FourMomentum::new(-1., 0., 0., 1.),
        ]
        .iter()
        .sum();
        assert_eq!(p, FourMomentum::new(0., 0., 0., 2.));
        assert_eq!(p.m(), 2.);
        assert!(FourMomentum::zero().is_zero());
    }

    #[test]
    fn non_finite() {
        assert!(!FourMomentum::new(f64::NAN, 0., 0., 1.).is_finite());
        assert!(!FourMomentum::new(0., 0., f64::INFINITY, 1.).is_finite());
        assert!(FourMomentum::new(0., 0., 1., 1.).is_finite());
    }
}
