//! Parser for the compact rule-string notations.
//!
//! Supported families:
//! - life: `23/3`, `S23/B3`, `B3/S23`, with an optional `M`/`V` neighborhood
//!   suffix and range (`1/1V2`)
//! - generations: `23/3/8`, `B2/S/C3`, same suffix
//! - cyclic: `R1/T3/C3/NM`, optionally followed by `/GH`
//! - wolfram: `W30`

use lazy_static::lazy_static;
use regex::Regex;

use super::Topology;
use super::rules::{CyclicRule, GenerationsRule, LifeRule, Transition, WolframRule};

lazy_static! {
    static ref TOTALISTIC: Regex =
        Regex::new(r"^([SB]?)(\d*)/([SB]?)(\d*)(?:/C?(\d+))?([MV]?)(\d*)$").unwrap();
    static ref CYCLIC: Regex = Regex::new(r"^R(\d+)/T(\d+)/C(\d+)/N([MNV])(/GH)?$").unwrap();
    static ref WOLFRAM: Regex = Regex::new(r"^W(\d{1,3})$").unwrap();
}

/// Parse a rule string. Returns `None` when no family accepts it.
pub fn parse(rule: &str) -> Option<Box<dyn Transition>> {
    let rule = rule.trim().to_ascii_uppercase();

    if let Some(caps) = WOLFRAM.captures(&rule) {
        let code = caps[1].parse::<u8>().ok()?;
        return Some(Box::new(WolframRule { code }));
    }

    if let Some(caps) = CYCLIC.captures(&rule) {
        let states = caps[3].parse::<u8>().ok().filter(|&c| c >= 2)?;
        let topology = match &caps[4] {
            "M" => Topology::Moore,
            _ => Topology::VonNeumann,
        };
        return Some(Box::new(CyclicRule {
            threshold: caps[2].parse().ok()?,
            states,
            greenberg_hastings: caps.get(5).is_some(),
            topology,
            range: caps[1].parse::<usize>().ok()?.max(1),
        }));
    }

    let caps = TOTALISTIC.captures(&rule)?;
    let birth_first = match (&caps[1], &caps[3]) {
        ("B", "S") | ("B", "") | ("", "S") => true,
        ("S", "B") | ("S", "") | ("", "B") | ("", "") => false,
        _ => return None,
    };
    let (birth, survival) = if birth_first {
        (counts(&caps[2]), counts(&caps[4]))
    } else {
        (counts(&caps[4]), counts(&caps[2]))
    };
    let topology = match &caps[6] {
        "V" => Topology::VonNeumann,
        _ => Topology::Moore,
    };
    let range = match &caps[7] {
        "" => 1,
        digits => digits.parse::<usize>().ok()?.max(1),
    };

    match caps.get(5) {
        Some(states) => {
            let states = states.as_str().parse::<u8>().ok().filter(|&c| c >= 2)?;
            Some(Box::new(GenerationsRule {
                survival,
                birth,
                states,
                topology,
                range,
            }))
        }
        None => Some(Box::new(LifeRule {
            survival,
            birth,
            topology,
            range,
        })),
    }
}

/// Each digit is one neighbor count
fn counts(digits: &str) -> Vec<usize> {
    digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evolve(rule: &str, current: u8, neighbors: &[u8]) -> u8 {
        parse(rule).unwrap().evolve(current, neighbors)
    }

    #[test]
    fn test_plain_life() {
        let rule = parse("23/3").unwrap();
        assert_eq!(rule.name(), "life");
        assert_eq!(rule.neighborhood(), (Topology::Moore, 1));
        assert_eq!(evolve("23/3", 0, &[1, 1, 1, 0, 0, 0, 0, 0]), 1);
        assert_eq!(evolve("23/3", 1, &[1, 1, 0, 0, 0, 0, 0, 0]), 1);
        assert_eq!(evolve("23/3", 1, &[1, 0, 0, 0, 0, 0, 0, 0]), 0);
    }

    #[test]
    fn test_von_neumann_suffix_and_range() {
        assert_eq!(parse("1/1V").unwrap().neighborhood(), (Topology::VonNeumann, 1));
        assert_eq!(parse("1/1V2").unwrap().neighborhood(), (Topology::VonNeumann, 2));
        assert_eq!(parse("23/3M3").unwrap().neighborhood(), (Topology::Moore, 3));
    }

    #[test]
    fn test_empty_survival() {
        // S/B12V: nothing survives, born on 1 or 2
        assert_eq!(evolve("S/B12V", 1, &[1, 0, 0, 0]), 0);
        assert_eq!(evolve("S/B12V", 0, &[1, 0, 0, 0]), 1);
        assert_eq!(evolve("S/B12V", 0, &[1, 1, 0, 0]), 1);
        assert_eq!(evolve("S/B12V", 0, &[1, 1, 1, 0]), 0);
    }

    #[test]
    fn test_birth_first_notation() {
        let a = format!("{:?}", parse("B3/S23").unwrap());
        let b = format!("{:?}", parse("S23/B3").unwrap());
        let c = format!("{:?}", parse("23/3").unwrap());
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_case_and_whitespace() {
        assert!(parse("  b3/s23 ").is_some());
        assert_eq!(parse("s/b12v").unwrap().neighborhood(), (Topology::VonNeumann, 1));
    }

    #[test]
    fn test_generations() {
        let rule = parse("23/3/8").unwrap();
        assert_eq!(rule.name(), "generations");
        assert_eq!(rule.evolve(1, &[0; 8]), 2);
        assert_eq!(rule.evolve(7, &[0; 8]), 0);
        assert_eq!(parse("B2/S/C3V").unwrap().neighborhood(), (Topology::VonNeumann, 1));
    }

    #[test]
    fn test_cyclic() {
        let rule = parse("R1/T3/C3/NM").unwrap();
        assert_eq!(rule.name(), "cyclic");
        assert_eq!(rule.neighborhood(), (Topology::Moore, 1));
        assert_eq!(rule.evolve(0, &[1, 1, 1, 0, 0, 0, 0, 0]), 1);
        assert_eq!(rule.evolve(0, &[1, 1, 0, 0, 0, 0, 0, 0]), 0);
        assert_eq!(parse("R2/T1/C4/NN").unwrap().neighborhood(), (Topology::VonNeumann, 2));
        assert!(parse("R1/T1/C3/NM/GH").is_some());
    }

    #[test]
    fn test_wolfram() {
        let rule = parse("W110").unwrap();
        assert_eq!(rule.name(), "wolfram");
        assert!(parse("W256").is_none());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse("").is_none());
        assert!(parse("hello").is_none());
        assert!(parse("S1/S2").is_none());
        assert!(parse("23/3/1").is_none());
        assert!(parse("R1/T1/C1/NM").is_none());
    }
}
