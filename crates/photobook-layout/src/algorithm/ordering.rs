//! Photo ordering and date grouping

use chrono::NaiveDate;

use crate::recommend::group_photos_by_orientation;
use crate::types::PhotoMetadata;

/// Put photos in book order.
///
/// Photos are stably sorted by `sort_order`, so equal keys keep their input
/// order. Without `preserve_order` the sorted list is additionally
/// partitioned by orientation so similar photos share pages.
pub fn order_photos(photos: &[PhotoMetadata], preserve_order: bool) -> Vec<&PhotoMetadata> {
    let mut ordered: Vec<&PhotoMetadata> = photos.iter().collect();
    ordered.sort_by_key(|photo| photo.sort_order);

    if preserve_order {
        ordered
    } else {
        group_photos_by_orientation(ordered).into_ordered()
    }
}

/// Split photos into contiguous runs that are paginated independently.
///
/// With `group_by_date` a run is a maximal stretch of photos sharing a
/// capture date; photos without a date group with undated neighbours.
/// Order within and across runs is never changed.
pub fn group_runs<'a, 'p>(
    photos: &'a [&'p PhotoMetadata],
    group_by_date: bool,
) -> Vec<&'a [&'p PhotoMetadata]> {
    if photos.is_empty() {
        return Vec::new();
    }
    if !group_by_date {
        return vec![photos];
    }

    photos
        .chunk_by(|a, b| capture_date(a) == capture_date(b))
        .collect()
}

fn capture_date(photo: &PhotoMetadata) -> Option<NaiveDate> {
    photo.taken_at.map(|t| t.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PhotoOrientation;

    fn dated(id: &str, day: u32) -> PhotoMetadata {
        let taken = NaiveDate::from_ymd_opt(2024, 6, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        PhotoMetadata::new(id, Some(3000), Some(2000)).with_taken_at(taken)
    }

    fn ids(photos: &[&PhotoMetadata]) -> Vec<String> {
        photos.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_sort_order_is_stable() {
        let photos = vec![
            PhotoMetadata::new("b", None, None).with_sort_order(2),
            PhotoMetadata::new("a1", None, None).with_sort_order(1),
            PhotoMetadata::new("a2", None, None).with_sort_order(1),
        ];
        assert_eq!(ids(&order_photos(&photos, true)), vec!["a1", "a2", "b"]);
    }

    #[test]
    fn test_orientation_partition_when_order_not_preserved() {
        let photos = vec![
            PhotoMetadata::new("p1", Some(2000), Some(3000)),
            PhotoMetadata::new("l1", Some(3000), Some(2000)),
            PhotoMetadata::new("u1", None, None),
            PhotoMetadata::new("l2", Some(3000), Some(2000)),
        ];
        let ordered = order_photos(&photos, false);
        assert_eq!(ids(&ordered), vec!["l1", "l2", "p1", "u1"]);
        assert_eq!(ordered[3].orientation, PhotoOrientation::Unknown);
    }

    #[test]
    fn test_date_runs_are_contiguous() {
        let photos = vec![
            dated("a", 1),
            dated("b", 1),
            dated("c", 2),
            PhotoMetadata::new("x", None, None),
            dated("d", 1),
        ];
        let refs: Vec<&PhotoMetadata> = photos.iter().collect();
        let runs = group_runs(&refs, true);
        let run_ids: Vec<Vec<String>> = runs.iter().map(|r| ids(r)).collect();
        assert_eq!(
            run_ids,
            vec![vec!["a", "b"], vec!["c"], vec!["x"], vec!["d"]]
        );
    }

    #[test]
    fn test_no_grouping_is_one_run() {
        let photos = vec![dated("a", 1), dated("b", 2)];
        let refs: Vec<&PhotoMetadata> = photos.iter().collect();
        assert_eq!(group_runs(&refs, false).len(), 1);
        assert!(group_runs(&[], true).is_empty());
    }
}
