use hq_defence_core::{PlacementError, Rectangle, TowerKind, Vector2, HQ_SIZE};
use hq_defence_system_builder::{
    blueprint_is_valid, can_place, footprint, placement_check, preview, BLUEPRINT_MIN_FUNDS,
};

const NO_TOWERS: [Rectangle; 0] = [];

fn hq_at(x: f32, y: f32) -> Rectangle {
    Rectangle::centered(Vector2::new(x, y), HQ_SIZE).expect("valid hq")
}

fn tower_at(kind: TowerKind, x: f32, y: f32) -> Rectangle {
    footprint(Vector2::new(x, y), kind).expect("valid footprint")
}

#[test]
fn footprint_is_centered_on_requested_point() {
    let rect = tower_at(TowerKind::Mg, 100.0, 100.0);
    assert_eq!(rect.upper_left(), Vector2::new(76.0, 76.0));
    assert_eq!(rect.width(), 48.0);
    assert_eq!(rect.height(), 48.0);
}

#[test]
fn placement_on_hq_is_rejected_for_every_kind() {
    let hq = hq_at(100.0, 100.0);

    for kind in [TowerKind::Mg, TowerKind::Sniper] {
        assert!(
            !can_place(Vector2::new(100.0, 100.0), kind, &hq, &NO_TOWERS, 1_000),
            "{kind:?} must not be placeable on the hq",
        );
        assert_eq!(
            placement_check(&tower_at(kind, 100.0, 100.0), kind.cost(), &hq, &NO_TOWERS, 1_000),
            Err(PlacementError::OverlapsHq),
        );
    }
}

#[test]
fn insufficient_funds_reject_otherwise_free_spot() {
    let hq = hq_at(100.0, 100.0);

    assert!(!can_place(Vector2::new(400.0, 400.0), TowerKind::Mg, &hq, &NO_TOWERS, 30));
    assert_eq!(
        placement_check(&tower_at(TowerKind::Mg, 400.0, 400.0), 60, &hq, &NO_TOWERS, 30),
        Err(PlacementError::InsufficientFunds { cost: 60, funds: 30 }),
    );
}

#[test]
fn overlapping_an_existing_tower_is_rejected() {
    let hq = hq_at(100.0, 100.0);
    let existing = [tower_at(TowerKind::Sniper, 300.0, 300.0)];

    assert!(!can_place(Vector2::new(320.0, 300.0), TowerKind::Mg, &hq, &existing, 500));
    assert_eq!(
        placement_check(&tower_at(TowerKind::Mg, 320.0, 300.0), 60, &hq, &existing, 500),
        Err(PlacementError::OverlapsTower),
    );
}

#[test]
fn towers_may_share_an_edge() {
    let hq = hq_at(100.0, 100.0);
    let existing = [tower_at(TowerKind::Sniper, 300.0, 300.0)];

    // Sniper spans 284..316; an Mg centered at 340 spans 316..364.
    assert!(can_place(Vector2::new(340.0, 300.0), TowerKind::Mg, &hq, &existing, 60));
}

#[test]
fn geometry_is_checked_before_funds() {
    let hq = hq_at(100.0, 100.0);
    assert_eq!(
        placement_check(&tower_at(TowerKind::Mg, 100.0, 100.0), 60, &hq, &NO_TOWERS, 0),
        Err(PlacementError::OverlapsHq),
    );
}

#[test]
fn exact_funds_are_enough() {
    let hq = hq_at(100.0, 100.0);
    assert!(can_place(Vector2::new(400.0, 400.0), TowerKind::Sniper, &hq, &NO_TOWERS, 40));
}

#[test]
fn blueprint_requires_minimum_display_funds() {
    let hq = hq_at(100.0, 100.0);
    let spot = Vector2::new(400.0, 400.0);

    assert!(blueprint_is_valid(spot, TowerKind::Sniper, &hq, &NO_TOWERS, BLUEPRINT_MIN_FUNDS));
    assert!(!blueprint_is_valid(spot, TowerKind::Sniper, &hq, &NO_TOWERS, BLUEPRINT_MIN_FUNDS - 1));
    assert!(!blueprint_is_valid(spot, TowerKind::Mg, &hq, &NO_TOWERS, 59));
}

#[test]
fn preview_reports_footprint_and_validity() {
    let hq = hq_at(100.0, 100.0);

    let valid = preview(Vector2::new(400.0, 400.0), TowerKind::Mg, &hq, &NO_TOWERS, 60).expect("preview");
    assert!(valid.placeable);
    assert_eq!(valid.rect, tower_at(TowerKind::Mg, 400.0, 400.0));

    let blocked = preview(Vector2::new(110.0, 90.0), TowerKind::Mg, &hq, &NO_TOWERS, 60).expect("preview");
    assert!(!blocked.placeable);
}
