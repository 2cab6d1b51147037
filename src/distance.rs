//! Great-circle distances over the spherical Earth approximation.

use crate::models::LonLat;

/// Mean Earth diameter in meters.
pub const EARTH_DIAMETER_M: f64 = 12_742e3;

/// Great-circle distance in meters between two `[lon, lat]` degree pairs,
/// via the haversine formula.
pub fn distance_between(a: LonLat, b: LonLat) -> f64 {
    let phi1 = a[1].to_radians();
    let phi2 = b[1].to_radians();
    let dphi = phi2 - phi1;
    let dlambda = (b[0] - a[0]).to_radians();

    let sin_dphi = (dphi / 2.0).sin();
    let sin_dlambda = (dlambda / 2.0).sin();

    let h = sin_dphi * sin_dphi + phi1.cos() * phi2.cos() * sin_dlambda * sin_dlambda;
    EARTH_DIAMETER_M * h.sqrt().asin()
}

/// Total length in meters of an ordered coordinate sequence.
///
/// Sequences with fewer than two points have no segments and measure 0.
pub fn length_of(coordinates: &[LonLat]) -> f64 {
    coordinates
        .windows(2)
        .map(|pair| distance_between(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_same_point() {
        let point = [4.38, 50.81];
        assert_eq!(distance_between(point, point), 0.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let a = [5.0, 45.0];
        let b = [6.0, 46.0];
        assert_eq!(distance_between(a, b), distance_between(b, a));
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        // One degree of arc on a sphere of diameter 12742 km is ~111.2 km.
        let meters = distance_between([0.0, 0.0], [1.0, 0.0]);
        assert!((meters - 111_195.0).abs() < 10.0, "got {meters}");
    }

    #[test]
    fn test_length_of_empty_and_single() {
        assert_eq!(length_of(&[]), 0.0);
        assert_eq!(length_of(&[[5.0, 45.0]]), 0.0);
    }

    #[test]
    fn test_length_matches_segment_sum() {
        let coords = [[4.38, 50.81], [4.39, 50.81], [4.39, 50.82]];
        let expected =
            distance_between(coords[0], coords[1]) + distance_between(coords[1], coords[2]);
        assert_eq!(length_of(&coords), expected);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = LonLat> {
            (-180.0..180.0, -90.0..90.0).prop_map(|(lon, lat)| [lon, lat])
        }

        proptest! {
            #[test]
            fn distance_is_non_negative(a in valid_coord(), b in valid_coord()) {
                prop_assert!(distance_between(a, b) >= 0.0);
            }

            #[test]
            fn distance_is_symmetric(a in valid_coord(), b in valid_coord()) {
                prop_assert_eq!(distance_between(a, b), distance_between(b, a));
            }

            #[test]
            fn splitting_a_path_preserves_its_length(
                coords in proptest::collection::vec(valid_coord(), 2..20),
                split in any::<proptest::sample::Index>(),
            ) {
                let at = 1 + split.index(coords.len() - 1);
                let total = length_of(&coords);
                // The split point belongs to both halves, like a shared link
                // boundary.
                let halves = length_of(&coords[..=at.min(coords.len() - 1)])
                    + length_of(&coords[at.min(coords.len() - 1)..]);
                prop_assert!((total - halves).abs() <= 1e-6 * total.max(1.0));
            }

            #[test]
            fn reversed_path_has_same_length(
                coords in proptest::collection::vec(valid_coord(), 2..20),
            ) {
                let mut reversed = coords.clone();
                reversed.reverse();
                let forward = length_of(&coords);
                let backward = length_of(&reversed);
                prop_assert!((forward - backward).abs() <= 1e-9 * forward.max(1.0));
            }
        }
    }
}
