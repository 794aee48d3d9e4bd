// astro-report-service/src/pdf/chart.rs
//
// North-Indian chart geometry: a fixed diamond-in-square topology with
// 12 houses numbered clockwise from the top diamond. Only the labels
// vary with input; the line work is constant.

use crate::error::{ReportError, Result};

/// Planet occupancy and sign assignment for the 12 houses. Exactly 12
/// houses, contiguous 1..=12; each house shows one sign and zero or
/// more planet abbreviations.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHouseMap {
    houses: [HouseCell; 12],
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HouseCell {
    /// 1-based zodiac sign index shown in this house. Computed by the
    /// caller from the ascendant; never derived here.
    pub sign: u8,
    pub planets: Vec<String>,
}

impl ChartHouseMap {
    /// Signs follow the ascendant around the wheel: house 1 shows the
    /// ascendant sign, house 2 the next sign, and so on.
    pub fn from_ascendant(asc_sign: u8) -> Result<Self> {
        if !(1..=12).contains(&asc_sign) {
            return Err(ReportError::InvalidBody(format!(
                "ascendant sign must be 1-12, got {asc_sign}"
            )));
        }
        let houses = std::array::from_fn(|i| HouseCell {
            sign: ((asc_sign as usize - 1 + i) % 12 + 1) as u8,
            planets: Vec::new(),
        });
        Ok(Self { houses })
    }

    pub fn place_planet(&mut self, house: usize, abbrev: &str) {
        if (1..=12).contains(&house) {
            self.houses[house - 1].planets.push(abbrev.to_string());
        }
    }

    /// `None` for any house outside 1..=12.
    pub fn house(&self, house: usize) -> Option<&HouseCell> {
        (1..=12).contains(&house).then(|| &self.houses[house - 1])
    }
}

/// Hand-tuned planet-label centroids per house, as fractions of the
/// chart side from the top-left anchor. House 1 is the top diamond;
/// numbering proceeds clockwise.
pub const PLANET_ANCHORS: [(f32, f32); 12] = [
    (0.50, 0.25), // 1: top diamond
    (0.75, 0.12), // 2: top-right upper triangle
    (0.88, 0.25), // 3: right-top triangle
    (0.75, 0.50), // 4: right diamond
    (0.88, 0.75), // 5: right-bottom triangle
    (0.75, 0.88), // 6: bottom-right triangle
    (0.50, 0.75), // 7: bottom diamond
    (0.25, 0.88), // 8: bottom-left triangle
    (0.12, 0.75), // 9: left-bottom triangle
    (0.25, 0.50), // 10: left diamond
    (0.12, 0.25), // 11: left-top triangle
    (0.25, 0.12), // 12: top-left upper triangle
];

/// Sign-number anchors: each sits a fixed orthogonal offset (>= 3.5% of
/// the side) inside its house from the house's nearest intersection, so
/// the number never collides with the diagonal/diamond lines.
pub const SIGN_ANCHORS: [(f32, f32); 12] = [
    (0.50, 0.42), // 1
    (0.72, 0.17), // 2
    (0.83, 0.28), // 3
    (0.58, 0.50), // 4
    (0.83, 0.72), // 5
    (0.72, 0.83), // 6
    (0.50, 0.58), // 7
    (0.28, 0.83), // 8
    (0.17, 0.72), // 9
    (0.42, 0.50), // 10
    (0.17, 0.28), // 11
    (0.28, 0.17), // 12
];

/// Line segment in normalized chart coordinates (0..=1, y downward).
pub type Segment = ((f32, f32), (f32, f32));

/// The constant line work: outer square (4 edges), both diagonals, and
/// the four mid-edge lines forming the inner diamond.
pub fn topology() -> [Segment; 10] {
    [
        // outer square
        ((0.0, 0.0), (1.0, 0.0)),
        ((1.0, 0.0), (1.0, 1.0)),
        ((1.0, 1.0), (0.0, 1.0)),
        ((0.0, 1.0), (0.0, 0.0)),
        // main diagonals
        ((0.0, 0.0), (1.0, 1.0)),
        ((1.0, 0.0), (0.0, 1.0)),
        // inner diamond through the edge midpoints
        ((0.5, 0.0), (1.0, 0.5)),
        ((1.0, 0.5), (0.5, 1.0)),
        ((0.5, 1.0), (0.0, 0.5)),
        ((0.0, 0.5), (0.5, 0.0)),
    ]
}

/// Splits a house's planet list into one or two display lines. More
/// than 2 planets wrap into two stacked lines split roughly in half to
/// avoid horizontal overflow within the house.
pub fn wrap_planets(planets: &[String]) -> (String, Option<String>) {
    if planets.len() <= 2 {
        return (planets.join(" "), None);
    }
    let split = planets.len().div_ceil(2);
    (
        planets[..split].join(" "),
        Some(planets[split..].join(" ")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_is_deterministic() {
        assert_eq!(topology(), topology());
        assert_eq!(topology().len(), 10);
    }

    #[test]
    fn all_anchors_stay_inside_documented_range() {
        for (i, &(x, y)) in PLANET_ANCHORS.iter().chain(SIGN_ANCHORS.iter()).enumerate() {
            assert!(
                (0.12..=0.88).contains(&x) && (0.12..=0.88).contains(&y),
                "anchor {i} out of range: ({x}, {y})"
            );
        }
    }

    #[test]
    fn sign_anchors_keep_clearance_from_chart_lines() {
        // Distance from a point to the four diamond edges |x±y-c|/√2 and
        // the two diagonals must be at least the 3.5%-of-side offset.
        let min_offset = 0.035_f32;
        for &(x, y) in SIGN_ANCHORS.iter() {
            let d_diag1 = (x - y).abs() / f32::sqrt(2.0);
            let d_diag2 = (x + y - 1.0).abs() / f32::sqrt(2.0);
            let d_diamond = [
                (x + y - 0.5).abs(),
                (x + y - 1.5).abs(),
                (x - y - 0.5).abs(),
                (x - y + 0.5).abs(),
            ]
            .into_iter()
            .fold(f32::MAX, f32::min)
                / f32::sqrt(2.0);
            let clearance = d_diag1.min(d_diag2).min(d_diamond);
            assert!(
                clearance >= min_offset,
                "sign anchor ({x}, {y}) too close to a chart line: {clearance}"
            );
        }
    }

    #[test]
    fn signs_follow_ascendant() {
        let map = ChartHouseMap::from_ascendant(10).unwrap();
        assert_eq!(map.house(1).unwrap().sign, 10);
        assert_eq!(map.house(4).unwrap().sign, 1);
        assert_eq!(map.house(12).unwrap().sign, 9);
        assert!(ChartHouseMap::from_ascendant(0).is_err());
        assert!(ChartHouseMap::from_ascendant(13).is_err());
    }

    #[test]
    fn out_of_range_house_lookup_is_none() {
        let mut map = ChartHouseMap::from_ascendant(1).unwrap();
        assert!(map.house(0).is_none());
        assert!(map.house(13).is_none());
        assert!(map.house(usize::MAX).is_none());

        // Placement outside 1..=12 is dropped, never indexed.
        map.place_planet(0, "Su");
        map.place_planet(13, "Mo");
        assert!(map.house(1).unwrap().planets.is_empty());
    }

    #[test]
    fn crowded_houses_wrap_into_two_lines() {
        let two = vec!["Su".to_string(), "Mo".to_string()];
        assert_eq!(wrap_planets(&two), ("Su Mo".to_string(), None));

        let three = vec!["Su".to_string(), "Mo".to_string(), "Ma".to_string()];
        assert_eq!(
            wrap_planets(&three),
            ("Su Mo".to_string(), Some("Ma".to_string()))
        );

        let five: Vec<String> = ["Su", "Mo", "Ma", "Me", "Ju"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            wrap_planets(&five),
            ("Su Mo Ma".to_string(), Some("Me Ju".to_string()))
        );
    }

    #[test]
    fn empty_house_renders_blank() {
        assert_eq!(wrap_planets(&[]), (String::new(), None));
    }
}
