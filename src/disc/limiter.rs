use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3, Zip};

use crate::error::HydroError;

/// Slope limiter applied to the left and right undivided differences of each cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Limiter {
    /// Central difference without limiting. Unstable; for testing only.
    None,
    MinMod,
    VanLeer,
    /// Monotonized central.
    MonotonizedCentral,
}
impl Limiter {
    pub fn limit(self, sl: f64, sr: f64) -> f64 {
        match self {
            Limiter::None => 0.5 * (sl + sr),
            Limiter::MinMod => {
                if sl * sr > 0.0 {
                    if sl.abs() <= sr.abs() { sl } else { sr }
                } else {
                    0.0
                }
            }
            Limiter::VanLeer => {
                if sl * sr > 0.0 {
                    2.0 * sl * sr / (sl + sr)
                } else {
                    0.0
                }
            }
            Limiter::MonotonizedCentral => {
                if sl * sr > 0.0 {
                    let sc = 0.5 * (sl + sr);
                    let slim = if sl.abs() <= sr.abs() { 2.0 * sl } else { 2.0 * sr };
                    if slim.abs() > sc.abs() { sc } else { slim }
                } else {
                    0.0
                }
            }
        }
    }
    pub fn limit_array(self, sl: ArrayView3<f64>, sr: ArrayView3<f64>) -> Array3<f64> {
        Zip::from(&sl)
            .and(&sr)
            .map_collect(|&l, &r| self.limit(l, r))
    }
}
impl FromStr for Limiter {
    type Err = HydroError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Limiter::None),
            "minmod" => Ok(Limiter::MinMod),
            "vanleer" | "van_leer" => Ok(Limiter::VanLeer),
            "mc" => Ok(Limiter::MonotonizedCentral),
            _ => Err(HydroError::unknown("limiter", s)),
        }
    }
}
impl fmt::Display for Limiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Limiter::None => "none",
            Limiter::MinMod => "minmod",
            Limiter::VanLeer => "vanleer",
            Limiter::MonotonizedCentral => "mc",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLOPES: [f64; 9] = [-3.0, -1.0, -0.25, -0.0, 0.0, 1e-8, 0.5, 2.0, 7.0];

    #[test]
    fn test_opposite_signs_give_zero() {
        for limiter in [Limiter::MinMod, Limiter::VanLeer, Limiter::MonotonizedCentral] {
            for &sl in SLOPES.iter() {
                for &sr in SLOPES.iter() {
                    if sl * sr <= 0.0 {
                        assert_eq!(limiter.limit(sl, sr), 0.0, "{limiter} {sl} {sr}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_minmod_never_exceeds_inputs() {
        for &sl in SLOPES.iter() {
            for &sr in SLOPES.iter() {
                let slim = Limiter::MinMod.limit(sl, sr);
                assert!(slim.abs() <= sl.abs() && slim.abs() <= sr.abs());
            }
        }
        assert_eq!(Limiter::MinMod.limit(1.0, 3.0), 1.0);
        assert_eq!(Limiter::MinMod.limit(-4.0, -2.0), -2.0);
    }

    #[test]
    fn test_van_leer_harmonic_mean() {
        assert!((Limiter::VanLeer.limit(1.0, 3.0) - 1.5).abs() < 1e-15);
        assert!((Limiter::VanLeer.limit(2.0, 2.0) - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_mc_prefers_central() {
        // central slope 2 is below twice the smaller slope
        assert_eq!(Limiter::MonotonizedCentral.limit(1.0, 3.0), 2.0);
        // twice the smaller slope 0.2 is below the central slope 2.05
        assert_eq!(Limiter::MonotonizedCentral.limit(0.1, 4.0), 0.2);
        assert_eq!(Limiter::MonotonizedCentral.limit(-4.0, -0.1), -0.2);
    }

    #[test]
    fn test_no_limiter_is_central() {
        assert_eq!(Limiter::None.limit(-1.0, 3.0), 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("mc".parse::<Limiter>().unwrap(), Limiter::MonotonizedCentral);
        assert_eq!("van_leer".parse::<Limiter>().unwrap(), Limiter::VanLeer);
        assert!(matches!(
            "superbee".parse::<Limiter>(),
            Err(HydroError::UnknownScheme { .. })
        ));
        for limiter in [
            Limiter::None,
            Limiter::MinMod,
            Limiter::VanLeer,
            Limiter::MonotonizedCentral,
        ] {
            assert_eq!(limiter.to_string().parse::<Limiter>().unwrap(), limiter);
        }
    }
}
