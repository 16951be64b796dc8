//! Number sources for random generation instructions
//!
//! Fields accept either a plain integer, a uniform range `U(lo:hi)` (both
//! ends inclusive) or a weighted choice `R(v1,v2,..;p1,p2,..)`.

use rand::Rng;

use crate::error::GenerationError;

/// Weighted pick from a fixed set of values
#[derive(Debug, Clone, PartialEq)]
pub struct Randomizer {
    values: Vec<i64>,
    probabilities: Vec<f64>,
}

impl Randomizer {
    /// Parse `R(v1,v2,..;p1,p2,..)`
    pub fn parse(s: &str) -> Result<Self, GenerationError> {
        let bad = || GenerationError::Randomizer(s.to_string());

        let inner = strip_parentheses(s).ok_or_else(bad)?;
        let (values, probabilities) = inner.split_once(';').ok_or_else(bad)?;
        let values = values
            .split(',')
            .map(|v| v.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| bad())?;
        let probabilities = probabilities
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| bad())?;

        if values.is_empty() || values.len() != probabilities.len() {
            return Err(bad());
        }
        Ok(Self {
            values,
            probabilities,
        })
    }

    /// Walk the cumulative probabilities; falls back to the first value if
    /// they sum to less than one
    pub fn sample(&self, rng: &mut impl Rng) -> i64 {
        let roll: f64 = rng.random();
        let mut cumulative = 0.0;
        for (value, probability) in self.values.iter().zip(&self.probabilities) {
            cumulative += probability;
            if roll < cumulative {
                return *value;
            }
        }
        self.values[0]
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// Integer source for one instruction field
#[derive(Debug, Clone, PartialEq)]
pub enum Roll {
    Fixed(i64),
    Uniform { low: i64, high: i64 },
    Weighted(Randomizer),
}

impl Roll {
    pub fn parse(s: &str) -> Result<Self, GenerationError> {
        let s = s.trim();
        match s.chars().next() {
            Some('U') => parse_uniform(s),
            Some('R') => Randomizer::parse(s).map(Roll::Weighted),
            _ => s
                .parse::<i64>()
                .map(Roll::Fixed)
                .map_err(|_| GenerationError::Instruction(format!("not a number: {s:?}"))),
        }
    }

    pub fn sample(&self, rng: &mut impl Rng) -> i64 {
        match self {
            Roll::Fixed(value) => *value,
            Roll::Uniform { low, high } => rng.random_range(*low..=*high),
            Roll::Weighted(randomizer) => randomizer.sample(rng),
        }
    }
}

fn parse_uniform(s: &str) -> Result<Roll, GenerationError> {
    let bad = || GenerationError::Randomizer(s.to_string());
    let inner = strip_parentheses(s).ok_or_else(bad)?;
    let (low, high) = inner.split_once(':').ok_or_else(bad)?;
    let low = low.trim().parse::<i64>().map_err(|_| bad())?;
    let high = high.trim().parse::<i64>().map_err(|_| bad())?;
    if high < low {
        return Err(bad());
    }
    Ok(Roll::Uniform { low, high })
}

fn strip_parentheses(s: &str) -> Option<&str> {
    let open = s.find('(')?;
    let close = s.rfind(')')?;
    (open < close).then(|| &s[open + 1..close])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_weighted_stays_in_values() {
        let randomizer = Randomizer::parse("R(1,2,3;0.5,0.25,0.25)").unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..200 {
            assert!([1, 2, 3].contains(&randomizer.sample(&mut rng)));
        }
    }

    #[test]
    fn test_certain_value() {
        let randomizer = Randomizer::parse("R(4,9;0.0,1.0)").unwrap();
        let mut rng = Pcg32::seed_from_u64(2);
        for _ in 0..50 {
            assert_eq!(randomizer.sample(&mut rng), 9);
        }
    }

    #[test]
    fn test_short_probabilities_fall_back_to_first() {
        let randomizer = Randomizer::parse("R(7,8;0.0,0.0)").unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(randomizer.sample(&mut rng), 7);
    }

    #[test]
    fn test_malformed_randomizers() {
        for bad in ["R(1,2;0.5)", "R(1,2)", "R(a;1.0)", "R1;1.0", "R(;)"] {
            assert!(Randomizer::parse(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_uniform_bounds_inclusive() {
        let roll = Roll::parse("U(2:9)").unwrap();
        let mut rng = Pcg32::seed_from_u64(4);
        let samples: Vec<i64> = (0..500).map(|_| roll.sample(&mut rng)).collect();
        assert!(samples.iter().all(|v| (2..=9).contains(v)));
        assert!(samples.contains(&2));
        assert!(samples.contains(&9));
    }

    #[test]
    fn test_roll_kinds() {
        assert_eq!(Roll::parse(" 5 ").unwrap(), Roll::Fixed(5));
        assert!(matches!(Roll::parse("R(1;1.0)").unwrap(), Roll::Weighted(_)));
        assert!(Roll::parse("U(9:2)").is_err());
        assert!(Roll::parse("W").is_err());
    }
}
