use std::cell::RefCell;
use std::rc::Rc;

use dom_physics::core::{Pose, Rng, Vec2};
use dom_physics::physics::BodyInfo;
use dom_physics::sync::spawn::spawn_center;
use dom_physics::sync::{BoundaryLayout, ContainerSize, Synchronizer, VisualNode};
use dom_physics::{PhysicsConfig, SyncError};

struct Node {
    size: Vec2,
    attached: bool,
    transform: Option<String>,
}

/// In-memory stand-in for a DOM element
#[derive(Clone)]
struct Card(Rc<RefCell<Node>>);

impl Card {
    fn new(w: f32, h: f32) -> Self {
        Self(Rc::new(RefCell::new(Node {
            size: Vec2::new(w, h),
            attached: true,
            transform: None,
        })))
    }

    fn transform(&self) -> Option<String> {
        self.0.borrow().transform.clone()
    }
}

impl VisualNode for Card {
    fn size(&self) -> Vec2 {
        self.0.borrow().size
    }

    fn is_attached(&self) -> bool {
        self.0.borrow().attached
    }

    fn set_transform(&self, transform: &str) {
        self.0.borrow_mut().transform = Some(transform.to_string());
    }

    fn remove_from_document(&self) {
        self.0.borrow_mut().attached = false;
    }

    fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn seeded() -> PhysicsConfig {
    PhysicsConfig { seed: Some(2024), ..PhysicsConfig::default() }
}

fn world(w: f32, h: f32) -> Synchronizer<Card> {
    Synchronizer::new(ContainerSize::new(w, h), seeded()).unwrap()
}

#[test]
fn boundaries_enclose_visible_width_for_many_sizes() {
    let config = PhysicsConfig::default();
    for (w, h) in [(320.0, 480.0), (1920.0, 200.0), (50.0, 2000.0), (1.0, 1.0)] {
        let sync = world(w, h);
        assert_eq!(sync.boundary_count(), 3);

        let layout = BoundaryLayout::compute(ContainerSize::new(w, h), &config);
        assert!(layout.left.max().x <= 0.0);
        assert!(layout.right.min().x >= w);
        assert!(layout.ground.min().x <= 0.0 && layout.ground.max().x >= w);
        assert!(layout.ground.min().y <= h);
        for side in [layout.left, layout.right] {
            assert!(side.size.y >= 5.0 * h);
        }
    }
}

#[test]
fn dropped_cards_settle_inside_the_container() {
    let mut sync = world(400.0, 300.0);
    let cards: Vec<Card> = (0..6).map(|_| Card::new(80.0, 40.0)).collect();
    for card in &cards {
        sync.add_body(card.clone()).unwrap();
    }

    // Ten simulated seconds
    for _ in 0..600 {
        sync.step();
    }

    for card in &cards {
        let c = sync.pose_of(card).unwrap().center;
        assert!(c.x > -1.0 && c.x < 401.0, "escaped sideways: {:?}", c);
        assert!(c.y < 300.0, "fell through the ground: {:?}", c);
    }
}

#[test]
fn tracked_pairs_and_dynamic_bodies_stay_in_lock_step() {
    let mut sync = world(800.0, 600.0);
    let check = |s: &Synchronizer<Card>| {
        assert_eq!(s.dynamic_body_count(), s.tracked_count());
        for pair in s.pairs() {
            assert!(s.world().contains(pair.body));
        }
    };

    let cards: Vec<Card> = (0..5).map(|i| Card::new(40.0 + i as f32, 30.0)).collect();
    for card in &cards[..3] {
        sync.add_body(card.clone()).unwrap();
        check(&sync);
    }
    sync.clear_bodies();
    check(&sync);

    for card in &cards[3..] {
        sync.add_body(Card::new(20.0, 20.0)).unwrap();
        sync.add_body(card.clone()).unwrap();
        check(&sync);
    }
    sync.untrack(&cards[4]);
    check(&sync);
    sync.detach_bodies();
    check(&sync);
    assert_eq!(sync.tracked_count(), 0);
}

#[test]
fn clear_is_idempotent() {
    let mut sync = world(800.0, 600.0);
    let card = Card::new(100.0, 50.0);
    sync.add_body(card.clone()).unwrap();

    assert_eq!(sync.clear_bodies(), 1);
    assert_eq!(sync.tracked_count(), 0);
    assert!(!card.is_attached());

    let bodies_before = sync.world().body_count();
    assert_eq!(sync.clear_bodies(), 0);
    assert_eq!(sync.tracked_count(), 0);
    assert_eq!(sync.world().body_count(), bodies_before);
}

#[test]
fn detach_keeps_elements_in_document_and_frozen() {
    let mut sync = world(800.0, 600.0);
    let card = Card::new(100.0, 50.0);
    sync.add_body(card.clone()).unwrap();
    for _ in 0..5 {
        sync.step();
    }
    sync.sync();
    let last = card.transform();

    assert_eq!(sync.detach_bodies(), 1);
    assert!(card.is_attached());
    for _ in 0..5 {
        sync.step();
    }
    sync.sync();
    assert_eq!(card.transform(), last);
}

#[test]
fn repeated_resizes_never_duplicate_walls() {
    let mut sync = world(800.0, 600.0);
    for i in 0..50 {
        let w = 300.0 + (i * 37 % 900) as f32;
        let h = 200.0 + (i * 53 % 700) as f32;
        sync.resize(ContainerSize::new(w, h));
        assert_eq!(sync.boundary_count(), 3);
    }
    assert_eq!(sync.container(), ContainerSize::new(300.0 + (49 * 37 % 900) as f32, 200.0 + (49 * 53 % 700) as f32));

    let walls = sync.world().bodies_where(BodyInfo::is_wall);
    let right = walls.iter().map(|b| b.center.x).fold(f32::MIN, f32::max);
    assert_eq!(right, sync.container().width + 30.0);
}

#[test]
fn zero_sized_resize_keeps_previous_walls() {
    let mut sync = world(800.0, 600.0);
    sync.resize(ContainerSize::new(0.0, 0.0));
    assert_eq!(sync.container(), ContainerSize::new(800.0, 600.0));
    assert_eq!(sync.boundary_count(), 3);
}

#[test]
fn transform_string_matches_pose() {
    let mut sync = world(800.0, 600.0);
    let card = Card::new(120.0, 80.0);
    sync.add_body(card.clone()).unwrap();
    for _ in 0..3 {
        sync.step();
    }
    sync.sync();

    let pose = sync.pose_of(&card).unwrap();
    let expected = format!(
        "translate({}px, {}px) rotate({}rad) translate(-60px, -40px)",
        pose.center.x, pose.center.y, pose.angle
    );
    assert_eq!(card.transform(), Some(expected));
}

#[test]
fn known_pose_maps_element_corners() {
    let pose = Pose::new(10.0, 20.0, 0.0);
    let m = pose.element_matrix(Vec2::new(8.0, 4.0));
    assert_eq!(m.apply(Vec2::zero()), Vec2::new(6.0, 18.0));
    assert_eq!(m.apply(Vec2::new(8.0, 4.0)), Vec2::new(14.0, 22.0));
}

#[test]
fn spawns_within_columns_and_above_view() {
    let mut sync = world(600.0, 400.0);
    for _ in 0..40 {
        let card = Card::new(90.0, 60.0);
        sync.add_body(card.clone()).unwrap();
        let c = sync.pose_of(&card).unwrap().center;
        assert!(c.x >= 45.0 && c.x <= 555.0, "x = {}", c.x);
        assert!(c.y < 0.0, "y = {}", c.y);
    }

    let mut rng = Rng::new(3);
    for _ in 0..1_000 {
        let c = spawn_center(600.0, Vec2::new(90.0, 60.0), 500.0, &mut rng);
        assert!(c.x >= 45.0 && c.x <= 555.0);
        assert!(c.y < 0.0);
    }
}

#[test]
fn duplicate_tracking_is_rejected() {
    let mut sync = world(800.0, 600.0);
    let card = Card::new(100.0, 50.0);
    sync.add_body(card.clone()).unwrap();
    assert_eq!(sync.add_body(card.clone()), Err(SyncError::AlreadyTracked));
    assert_eq!(sync.tracked_count(), 1);
    assert_eq!(sync.dynamic_body_count(), 1);
}

#[test]
fn unlaid_container_is_reported() {
    let result = Synchronizer::<Card>::new(ContainerSize::new(0.0, 300.0), seeded());
    assert!(matches!(
        result,
        Err(SyncError::ContainerNotReady { width, height }) if width == 0.0 && height == 300.0
    ));
}

#[test]
fn independent_instances_do_not_share_state() {
    let mut a = world(800.0, 600.0);
    let b = world(400.0, 300.0);
    a.add_body(Card::new(50.0, 50.0)).unwrap();
    assert_eq!(a.tracked_count(), 1);
    assert_eq!(b.tracked_count(), 0);
    assert_eq!(b.world().body_count(), 3);
}
