use chrono::NaiveDate;
use photobook_layout::*;

fn create_test_photos(count: usize) -> Vec<PhotoMetadata> {
    (0..count)
        .map(|i| {
            PhotoMetadata::new(format!("photo-{}", i), Some(3000), Some(2000))
                .with_sort_order(i as i64)
        })
        .collect()
}

fn dated_photo(id: &str, day: u32) -> PhotoMetadata {
    let taken = NaiveDate::from_ymd_opt(2024, 7, day)
        .and_then(|d| d.and_hms_opt(10, 30, 0))
        .unwrap();
    PhotoMetadata::new(id, Some(3000), Some(2000)).with_taken_at(taken)
}

fn template_ids(result: &LayoutResult) -> Vec<TemplateId> {
    result.pages.iter().map(|p| p.template_id).collect()
}

#[test]
fn test_empty_input_yields_no_pages() {
    let options = LayoutOptions::new(PageSize::Square8, LayoutStyle::Classic);
    let result = generate_layout(&[], &options).unwrap();

    assert!(result.pages.is_empty());
    assert_eq!(result.total_pages, 0);
    assert_eq!(result.photos_used, 0);
    assert!(result.photos_unused.is_empty());
}

#[test]
fn test_four_photos_classic_single_grid_page() {
    let photos = create_test_photos(4);
    let options = LayoutOptions::new(PageSize::Square8, LayoutStyle::Classic);
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(result.total_pages, 1);
    assert_eq!(result.pages[0].template_id, TemplateId::Grid2x2);
    assert_eq!(result.pages[0].photos.len(), 4);
    assert_eq!(result.photos_used, 4);
    assert!(result.photos_unused.is_empty());
}

#[test]
fn test_five_photos_minimalist_split() {
    let photos = create_test_photos(5);
    let options = LayoutOptions {
        layout_style: LayoutStyle::Minimalist,
        ..Default::default()
    };
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(
        template_ids(&result),
        vec![TemplateId::Double, TemplateId::Double, TemplateId::Single]
    );
    let per_page: Vec<_> = result.pages.iter().map(|p| p.photos.len()).collect();
    assert_eq!(per_page, vec![2, 2, 1]);
    assert!(result.photos_unused.is_empty());
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_slots_filled_in_order() {
    let photos = create_test_photos(4);
    let result = generate_layout(&photos, &LayoutOptions::default()).unwrap();
    let template = get_template(TemplateId::Grid2x2);

    for (i, (position, slot)) in result.pages[0]
        .photos
        .iter()
        .zip(&template.slots)
        .enumerate()
    {
        assert_eq!(position.photo_id, format!("photo-{}", i));
        assert_eq!((position.x, position.y), (slot.x, slot.y));
    }
}

#[test]
fn test_invariants_hold_across_counts() {
    for style in LayoutStyle::ALL {
        for count in 0..=40 {
            let photos = create_test_photos(count);
            let options = LayoutOptions::new(PageSize::Square10, style);
            let result = generate_layout(&photos, &options).unwrap();

            let violations = validate_layout_against(&result, &photos);
            assert!(
                violations.is_empty(),
                "{} with {} photos: {:?}",
                style,
                count,
                violations
            );

            let placed: usize = result.pages.iter().map(|p| p.photos.len()).sum();
            assert_eq!(placed + result.photos_unused.len(), count);

            let range = get_style_rules(style).photos_per_page_range;
            for page in result.content_pages().filter(|p| !p.fallback) {
                assert!(range.contains(get_template(page.template_id).photos_per_page));
            }
        }
    }
}

#[test]
fn test_collage_counts_fill_without_fallback() {
    // 5 is the only count above 3 that no mix of 3, 4, 6 and 9 adds up to
    for count in (3..=40).filter(|&n| n != 5) {
        let photos = create_test_photos(count);
        let options = LayoutOptions::new(PageSize::Square12, LayoutStyle::Collage);
        let result = generate_layout(&photos, &options).unwrap();
        assert!(
            result.pages.iter().all(|p| !p.fallback),
            "{} photos: {:?}",
            count,
            template_ids(&result)
        );
    }
}

#[test]
fn test_collage_looks_ahead_before_filling_pages() {
    let photos = create_test_photos(14);
    let options = LayoutOptions::new(PageSize::Square12, LayoutStyle::Collage);
    let result = generate_layout(&photos, &options).unwrap();

    let per_page: Vec<_> = result.pages.iter().map(|p| p.photos.len()).collect();
    assert_eq!(per_page, vec![6, 4, 4]);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_collage_of_five_strands_one_photo() {
    let photos = create_test_photos(5);
    let options = LayoutOptions::new(PageSize::Square12, LayoutStyle::Collage);
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(result.total_pages, 2);
    assert_eq!(result.pages[0].photos.len(), 4);
    assert!(result.pages[1].fallback);
    assert_eq!(result.photos_used, 5);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_generation_is_deterministic() {
    let photos = create_test_photos(23);
    let mut options = LayoutOptions::new(PageSize::Letter, LayoutStyle::Collage);
    options.allow_rotation = true;
    options.include_cover = true;

    let first = generate_layout(&photos, &options).unwrap();
    let second = generate_layout(&photos, &options).unwrap();

    assert_eq!(first.pages, second.pages);
    assert_eq!(first.photos_unused, second.photos_unused);
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_metadata_echoes_options() {
    let photos = create_test_photos(3);
    let options = LayoutOptions::new(PageSize::A4, LayoutStyle::Magazine);
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(result.metadata.algorithm, ALGORITHM_NAME);
    assert_eq!(result.metadata.options, options);
    assert!(result.metadata.generation_time_ms >= 0.0);
}

#[test]
fn test_forced_cover_photo() {
    let photos = create_test_photos(5);
    let options = LayoutOptions {
        cover_photo_id: Some("photo-3".to_string()),
        title: Some("Summer 2024".to_string()),
        ..Default::default()
    };
    let result = generate_layout(&photos, &options).unwrap();

    let cover = &result.pages[0];
    assert_eq!(cover.page_type, PageType::Cover);
    assert_eq!(cover.template_id, TemplateId::Single);
    assert_eq!(cover.photos[0].photo_id, "photo-3");
    assert_eq!(cover.text_elements[0].text, "Summer 2024");

    // Remaining four photos fill one grid page
    assert_eq!(result.pages[1].template_id, TemplateId::Grid2x2);
    assert!(
        result.pages[1]
            .photos
            .iter()
            .all(|p| p.photo_id != "photo-3")
    );
    assert!(validate_layout_against(&result, &photos).is_empty());
}

#[test]
fn test_missing_cover_photo_warns_and_uses_first() {
    let photos = create_test_photos(3);
    let options = LayoutOptions {
        cover_photo_id: Some("nope".to_string()),
        ..Default::default()
    };
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(result.pages[0].photos[0].photo_id, "photo-0");
    assert!(result.warnings.iter().any(|w| w.contains("nope")));
}

#[test]
fn test_cover_and_back_without_photos() {
    let options = LayoutOptions {
        include_cover: true,
        include_back_page: true,
        title: Some("Empty".to_string()),
        ..Default::default()
    };
    let result = generate_layout(&[], &options).unwrap();

    assert_eq!(result.total_pages, 2);
    assert_eq!(result.pages[0].page_type, PageType::Cover);
    assert_eq!(result.pages[0].template_id, TemplateId::Custom);
    assert!(result.pages[0].photos.is_empty());
    assert_eq!(result.pages[1].page_type, PageType::Back);
    assert_eq!(result.pages[1].page_number, 2);
    assert_eq!(result.content_pages().count(), 0);
}

#[test]
fn test_group_by_date_paginates_runs_separately() {
    let photos = vec![
        dated_photo("a", 1),
        dated_photo("b", 1),
        dated_photo("c", 1),
        dated_photo("d", 2),
    ];

    let ungrouped = generate_layout(&photos, &LayoutOptions::default()).unwrap();
    assert_eq!(template_ids(&ungrouped), vec![TemplateId::Grid2x2]);

    let options = LayoutOptions {
        group_by_date: true,
        ..Default::default()
    };
    let grouped = generate_layout(&photos, &options).unwrap();
    assert_eq!(
        template_ids(&grouped),
        vec![TemplateId::Double, TemplateId::Single, TemplateId::Single]
    );
    assert_eq!(grouped.pages[2].photos[0].photo_id, "d");
}

#[test]
fn test_max_pages_leaves_photos_unused() {
    let photos = create_test_photos(20);
    let options = LayoutOptions {
        max_pages: Some(2),
        ..Default::default()
    };
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(result.total_pages, 2);
    assert_eq!(result.photos_used, 8);
    assert_eq!(result.photos_unused.len(), 12);
    assert_eq!(result.photos_unused[0], "photo-8");
    assert_eq!(
        result
            .warnings
            .iter()
            .filter(|w| w.contains("not placed"))
            .count(),
        12
    );
    assert!(validate_layout_against(&result, &photos).is_empty());
}

#[test]
fn test_override_bounds_with_fallback_page() {
    let photos = create_test_photos(5);
    let options = LayoutOptions {
        photos_per_page: Some(PhotoRange::new(2, 2)),
        ..Default::default()
    };
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(
        template_ids(&result),
        vec![TemplateId::Double, TemplateId::Double, TemplateId::Single]
    );
    assert!(result.pages[2].fallback);
    assert_eq!(result.warnings.len(), 1);
    assert!(validate_layout(&result).is_empty());
}

#[test]
fn test_empty_spacing_override_leaves_pages_unchanged() {
    let photos: Vec<_> = (0..4)
        .map(|i| PhotoMetadata::new(format!("sq-{}", i), Some(3000), Some(3000)))
        .collect();
    let plain = generate_layout(&photos, &LayoutOptions::default()).unwrap();

    let options = LayoutOptions {
        spacing: Some(SpacingOverride::default()),
        ..Default::default()
    };
    let overridden = generate_layout(&photos, &options).unwrap();

    assert_eq!(plain.pages, overridden.pages);
    assert_eq!(plain.pages[0].photos[0].x, 0.05);
}

#[test]
fn test_too_few_photos_for_collage_degrade_to_single() {
    let photos = create_test_photos(2);
    let options = LayoutOptions::new(PageSize::Square8, LayoutStyle::Collage);
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(result.total_pages, 2);
    assert!(result.pages.iter().all(|p| p.fallback));
    assert!(result.pages.iter().all(|p| p.template_id == TemplateId::Single));
    assert_eq!(result.photos_used, 2);
    assert_eq!(result.warnings.len(), 2);
}

#[test]
fn test_unknown_dimensions_are_contained() {
    let photos = vec![
        PhotoMetadata::new("x", None, None),
        PhotoMetadata::new("y", None, None),
    ];
    let result = generate_layout(&photos, &LayoutOptions::default()).unwrap();

    assert_eq!(result.photos_used, 2);
    assert!(result.warnings.is_empty());
    for position in &result.pages[0].photos {
        assert_eq!(position.object_fit, Some(ObjectFit::Contain));
    }
}

#[test]
fn test_low_resolution_photo_is_still_placed() {
    let photos = vec![PhotoMetadata::new("tiny", Some(400), Some(300))];
    let options = LayoutOptions::new(PageSize::Square12, LayoutStyle::Minimalist);
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(result.photos_used, 1);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("tiny"));
}

#[test]
fn test_collage_rotation() {
    let photos = create_test_photos(9);
    let mut options = LayoutOptions::new(PageSize::Square12, LayoutStyle::Collage);
    options.allow_rotation = true;
    let result = generate_layout(&photos, &options).unwrap();

    assert_eq!(result.pages[0].template_id, TemplateId::Grid3x3);
    assert!(result.pages[0].photos.iter().all(|p| p.rotation.is_some()));
}

#[test]
fn test_orientation_grouping_when_order_not_preserved() {
    let photos = vec![
        PhotoMetadata::new("p", Some(2000), Some(3000)),
        PhotoMetadata::new("l", Some(3000), Some(2000)),
    ];
    let options = LayoutOptions {
        preserve_order: false,
        ..Default::default()
    };
    let result = generate_layout(&photos, &options).unwrap();
    let ids: Vec<_> = result.placed_photo_ids().collect();
    assert_eq!(ids, vec!["l", "p"]);
}

#[test]
fn test_background_applied_to_every_page() {
    let photos = create_test_photos(6);
    let background = PageBackground::Color {
        color: "#FAFAFA".to_string(),
    };
    let options = LayoutOptions {
        background: Some(background.clone()),
        include_back_page: true,
        ..Default::default()
    };
    let result = generate_layout(&photos, &options).unwrap();
    assert!(
        result
            .pages
            .iter()
            .all(|p| p.background.as_ref() == Some(&background))
    );
}

#[test]
fn test_invalid_options_are_rejected() {
    let options = LayoutOptions {
        photos_per_page: Some(PhotoRange::new(4, 2)),
        ..Default::default()
    };
    match generate_layout(&create_test_photos(3), &options) {
        Err(LayoutError::Config(msg)) => assert!(msg.contains("exceeds")),
        other => panic!("Expected Config error, got {:?}", other.map(|r| r.total_pages)),
    }
}
