use std::sync::Mutex;

use wards::config::GuardConfig;
use wards::messages::{MessageCatalog, CANNOT_PLACE_BARRICADE};
use wards::policy::{Actor, Decision, Notifier, PlacementGuard, PlacementRequest};
use wards::prefabs::BARRICADE_PREFABS;
use wards::zones::{MonumentZone, Vec3};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn reply(&self, actor: &Actor, message: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((actor.id.clone(), message.to_string()));
    }
}

fn world() -> Vec<MonumentZone> {
    vec![
        MonumentZone::new(
            "launch_site_1_display",
            Vec3::new(1000.0, 10.0, 1000.0),
            Vec3::new(150.0, 60.0, 150.0),
        ),
        MonumentZone::new(
            "harbor_1",
            Vec3::new(-1000.0, 0.0, -1000.0),
            Vec3::new(100.0, 40.0, 100.0),
        ),
        MonumentZone::new(
            "assets/bundled/prefabs/autospawn/monument/medium/sphere_tank.prefab",
            Vec3::new(0.0, 0.0, 2000.0),
            Vec3::new(60.0, 80.0, 60.0),
        )
        .with_yaw(45.0),
    ]
}

fn sample_positions() -> Vec<Vec3> {
    vec![
        Vec3::new(1000.0, 10.0, 1000.0),
        Vec3::new(-1000.0, 0.0, -1000.0),
        Vec3::new(0.0, 0.0, 2000.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(5000.0, -20.0, 5000.0),
    ]
}

fn player() -> Actor {
    Actor::new("76561198012345678")
}

#[test]
fn scenario_stone_barricade_inside_launch_site_is_denied_with_message() {
    let notifier = RecordingNotifier::default();
    let cfg = GuardConfig::new("1.0.0", vec!["launch_site_1".into()]);
    let guard = PlacementGuard::new(cfg, world(), &notifier);

    let req = PlacementRequest::new(player(), "barricade.stone.prefab", Vec3::new(1010.0, 12.0, 990.0));
    let decision = guard.evaluate(&req);

    assert!(matches!(decision, Decision::Deny(ref r) if r.zone == "launch_site_1_display"));
    let expected = MessageCatalog::with_defaults().get(CANNOT_PLACE_BARRICADE, None);
    assert_eq!(expected, "You cannot place barricades in this monument.");
    assert_eq!(notifier.sent(), vec![(player().id, expected)]);
}

#[test]
fn scenario_high_external_wall_is_always_allowed_silently() {
    let notifier = RecordingNotifier::default();
    let guard = PlacementGuard::new(GuardConfig::default(), world(), &notifier);

    for position in sample_positions() {
        let req = PlacementRequest::new(player(), "wall.external.high.stone", position);
        assert_eq!(guard.evaluate(&req), Decision::Allow);
    }
    assert!(notifier.sent().is_empty());
}

#[test]
fn unrestricted_prefabs_allowed_regardless_of_zone_config() {
    let notifier = RecordingNotifier::default();
    let cfg = GuardConfig::new("1.0.0", vec!["".into(), "_".into(), "1".into()]);
    let guard = PlacementGuard::new(cfg, world(), &notifier);

    for prefab in ["foundation", "door.hinged.toptier", "barricade.woodwire", "cupboard.tool.deployed"] {
        for position in sample_positions() {
            let req = PlacementRequest::new(player(), prefab, position);
            assert!(guard.evaluate(&req).is_allowed(), "{prefab} at {position:?}");
        }
    }
}

#[test]
fn every_barricade_denied_inside_blacklisted_zone() {
    let notifier = RecordingNotifier::default();
    let guard = PlacementGuard::new(GuardConfig::default(), world(), &notifier);

    for prefab in BARRICADE_PREFABS {
        let inside_launch = PlacementRequest::new(player(), prefab, Vec3::new(1100.0, 0.0, 900.0));
        assert!(!guard.evaluate(&inside_launch).is_allowed());
        // outside the sphere tank box unrotated, inside once yawed
        let inside_tank = PlacementRequest::new(player(), prefab, Vec3::new(0.0, 0.0, 2080.0));
        assert!(!guard.evaluate(&inside_tank).is_allowed());
    }
    assert_eq!(notifier.sent().len(), 2 * BARRICADE_PREFABS.len());
}

#[test]
fn restricted_prefab_outside_matching_zones_is_allowed() {
    let notifier = RecordingNotifier::default();
    let guard = PlacementGuard::new(GuardConfig::default(), world(), &notifier);

    // harbor_1 is not blacklisted; the others are but the points lie outside them
    for position in [
        Vec3::new(-1000.0, 0.0, -1000.0),
        Vec3::new(1000.0, 10.0, 1200.0),
        Vec3::new(1000.0, 100.0, 1000.0),
        Vec3::new(0.0, 0.0, 0.0),
    ] {
        let req = PlacementRequest::new(player(), "barricade.concrete.prefab", position);
        assert_eq!(guard.evaluate(&req), Decision::Allow, "{position:?}");
    }
    assert!(notifier.sent().is_empty());
}

#[test]
fn empty_blacklist_always_allows() {
    let notifier = RecordingNotifier::default();
    let guard = PlacementGuard::new(GuardConfig::new("1.0.0", Vec::new()), world(), &notifier);

    for prefab in BARRICADE_PREFABS {
        for position in sample_positions() {
            let req = PlacementRequest::new(player(), prefab, position);
            assert!(guard.evaluate(&req).is_allowed());
        }
    }
    assert!(notifier.sent().is_empty());
}

#[test]
fn evaluation_is_idempotent_and_duplicates_do_not_matter() {
    let notifier = RecordingNotifier::default();
    let cfg = GuardConfig::new(
        "1.0.0",
        vec!["launch_site_1".into(), "launch_site_1".into()],
    );
    let guard = PlacementGuard::new(cfg, world(), &notifier);
    let req = PlacementRequest::new(player(), "barricade.sandbags", Vec3::new(1000.0, 10.0, 1000.0));

    let first = guard.evaluate(&req);
    let second = guard.evaluate(&req);
    assert_eq!(first, second);
    assert!(!first.is_allowed());
    // one notification per denied attempt
    assert_eq!(notifier.sent().len(), 2);
}

#[test]
fn fragments_are_case_sensitive() {
    let notifier = RecordingNotifier::default();
    let cfg = GuardConfig::new("1.0.0", vec!["Launch_Site".into()]);
    let guard = PlacementGuard::new(cfg, world(), &notifier);

    let req = PlacementRequest::new(player(), "barricade.stone", Vec3::new(1000.0, 10.0, 1000.0));
    assert!(guard.evaluate(&req).is_allowed());
}

#[test]
fn denial_message_follows_player_language() {
    let notifier = RecordingNotifier::default();
    let mut catalog = MessageCatalog::with_defaults();
    catalog.register(
        "de",
        [(
            CANNOT_PLACE_BARRICADE.to_string(),
            "Du kannst hier keine Barrikaden platzieren.".to_string(),
        )]
        .into(),
    );
    let guard = PlacementGuard::new(GuardConfig::default(), world(), &notifier).with_messages(catalog);

    let german = player().with_language("de");
    let req = PlacementRequest::new(german, "barricade.stone", Vec3::new(1000.0, 10.0, 1000.0));
    assert!(!guard.evaluate(&req).is_allowed());
    assert_eq!(
        notifier.sent()[0].1,
        "Du kannst hier keine Barrikaden platzieren."
    );
}

#[test]
fn reload_changes_later_decisions() {
    let notifier = RecordingNotifier::default();
    let guard = PlacementGuard::new(GuardConfig::default(), world(), &notifier);
    let req = PlacementRequest::new(player(), "barricade.stone", Vec3::new(-1000.0, 0.0, -1000.0));

    assert!(guard.evaluate(&req).is_allowed());
    guard.reload(GuardConfig::new("1.0.0", vec!["harbor".into()]));
    assert!(!guard.evaluate(&req).is_allowed());
}
