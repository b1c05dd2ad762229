use crate::common::{NonZeroUInt, UInt};
use rand::Rng;

/// Source of die draws.
pub trait Roller {
    /// Returns a value in `1..=faces`.
    fn roll(&mut self, faces: NonZeroUInt) -> UInt;
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, faces: NonZeroUInt) -> UInt {
        self.gen_range(1..=faces.get())
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_stays_in_range() {
        let mut rng = rand::thread_rng();
        for faces in 1..=12 {
            let faces = NonZeroUInt::new(faces).unwrap();
            for _ in 0..200 {
                let x = rng.roll(faces);
                assert!((1..=faces.get()).contains(&x));
            }
        }
    }

    #[test]
    fn test_step_roller_wraps() {
        let mut roller = StepRoller::new(5, 1);
        let six = NonZeroUInt::new(6).unwrap();
        let rolls: Vec<_> = (0..4).map(|_| roller.roll(six)).collect();
        assert_eq!(rolls, vec![5, 6, 1, 2]);
    }
}
