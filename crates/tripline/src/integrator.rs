use geo::{Distance, Euclidean};

use crate::{
    error::TripError,
    reproject::ProjectedCoordinate,
    units::{Meters, MetersPerSecond},
};

pub fn segment_length(from: ProjectedCoordinate, to: ProjectedCoordinate) -> Meters {
    Meters::new(Euclidean.distance(geo::Point::from(from), geo::Point::from(to)))
}

/// Cumulative visit time of every vertex, starting at `start_clock`.
///
/// Each hop adds `floor(length / speed)` seconds, so hops shorter than one
/// second of travel repeat the previous timestamp.
pub fn integrate(
    coordinates: &[ProjectedCoordinate],
    speed: MetersPerSecond,
    start_clock: i64,
) -> Result<Vec<i64>, TripError> {
    if !speed.is_valid() {
        return Err(TripError::InvalidSpeed(speed.value()));
    }

    if coordinates.is_empty() {
        return Err(TripError::EmptyPath);
    }

    let mut clock = start_clock;
    let mut timestamps = Vec::with_capacity(coordinates.len());
    timestamps.push(clock);

    for window in coordinates.windows(2) {
        clock = clock
            .checked_add(segment_length(window[0], window[1]) / speed)
            .ok_or(TripError::ClockOverflow { start: clock })?;
        timestamps.push(clock);
    }

    Ok(timestamps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[(f64, f64)]) -> Vec<ProjectedCoordinate> {
        points
            .iter()
            .map(|(x, y)| ProjectedCoordinate::new(*x, *y))
            .collect()
    }

    #[test]
    fn should_accumulate_truncated_hops() {
        let coordinates = line(&[(0.0, 0.0), (30.0, 40.0), (30.0, 140.0), (30.0, 145.0)]);
        let timestamps = integrate(&coordinates, MetersPerSecond::new(10.0), 0).unwrap();

        assert_eq!(timestamps, vec![0, 5, 15, 15]);
    }

    #[test]
    fn should_start_at_the_given_clock() {
        let coordinates = line(&[(0.0, 0.0), (100.0, 0.0)]);
        let timestamps = integrate(&coordinates, MetersPerSecond::new(40.0), 1_000).unwrap();

        assert_eq!(timestamps, vec![1_000, 1_002]);
    }

    #[test]
    fn should_truncate_not_round() {
        let coordinates = line(&[(0.0, 0.0), (79.9, 0.0), (159.8, 0.0)]);
        let timestamps = integrate(&coordinates, MetersPerSecond::new(40.0), 0).unwrap();

        assert_eq!(timestamps, vec![0, 1, 2]);
    }

    #[test]
    fn single_vertex_yields_start_clock() {
        let coordinates = line(&[(12.0, 34.0)]);
        assert_eq!(
            integrate(&coordinates, MetersPerSecond::new(40.0), 77).unwrap(),
            vec![77]
        );
    }

    #[test]
    fn identical_vertices_share_a_timestamp() {
        let coordinates = line(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        assert_eq!(
            integrate(&coordinates, MetersPerSecond::new(1.0), 3).unwrap(),
            vec![3, 3, 3]
        );
    }

    #[test]
    fn should_reject_empty_paths() {
        assert_eq!(
            integrate(&[], MetersPerSecond::new(40.0), 0),
            Err(TripError::EmptyPath)
        );
    }

    #[test]
    fn should_reject_invalid_speed() {
        let coordinates = line(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(
            integrate(&coordinates, MetersPerSecond::new(0.0), 0),
            Err(TripError::InvalidSpeed(0.0))
        );
        assert_eq!(
            integrate(&coordinates, MetersPerSecond::new(-40.0), 0),
            Err(TripError::InvalidSpeed(-40.0))
        );
    }

    #[test]
    fn timestamps_are_non_decreasing() {
        let coordinates = line(&[
            (0.0, 0.0),
            (3.0, 4.0),
            (3.0, 4.0),
            (-100.0, 20.0),
            (-100.5, 20.0),
            (250.0, -75.0),
        ]);
        let timestamps = integrate(&coordinates, MetersPerSecond::new(7.5), -50).unwrap();

        assert_eq!(timestamps.len(), coordinates.len());
        assert!(timestamps.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn should_fail_when_clock_overflows() {
        let coordinates = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(
            integrate(&coordinates, MetersPerSecond::new(1e-300), 0),
            Err(TripError::ClockOverflow { start: i64::MAX })
        );
        assert_eq!(
            integrate(&line(&[(3.0, 3.0), (3.0, 3.0)]), MetersPerSecond::new(1.0), i64::MAX),
            Ok(vec![i64::MAX, i64::MAX])
        );
    }

    #[test]
    fn segment_length_is_euclidean() {
        let length = segment_length(
            ProjectedCoordinate::new(0.0, 0.0),
            ProjectedCoordinate::new(3.0, 4.0),
        );
        assert_eq!(length, Meters::new(5.0));
    }
}
