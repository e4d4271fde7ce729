use canopy_core::{AnimationState, CounterAnimator, DomPort, MemoryDom, NodeId};

const FRAME_MS: f64 = 16.0;

fn counter_page(ids: &[&str]) -> (MemoryDom, Vec<NodeId>) {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let nodes = ids
        .iter()
        .map(|id| dom.append_new(body, "span", &[("id", *id)]).expect("counter"))
        .collect();
    (dom, nodes)
}

fn shown(dom: &MemoryDom, node: NodeId) -> u64 {
    dom.text(&node)
        .replace(',', "")
        .parse()
        .expect("counter text is a grouped integer")
}

#[test]
fn counts_up_monotonically_and_settles_on_target() {
    let (mut dom, nodes) = counter_page(&["counter-co2"]);
    let mut animator = CounterAnimator::new();
    let handle = animator
        .animate(&dom, "counter-co2", 370_000, 1500.0, 1_000.0)
        .expect("element exists");

    let mut now = 1_000.0;
    animator.frame(&mut dom, now).expect("first frame");
    assert_eq!(shown(&dom, nodes[0]), 0);

    let mut last = 0;
    let mut frames = 1;
    while animator.has_pending() {
        now += FRAME_MS;
        animator.frame(&mut dom, now).expect("frame");
        let value = shown(&dom, nodes[0]);
        assert!(value >= last);
        assert!(value <= 370_000);
        last = value;
        frames += 1;
        assert!(frames < 1_000, "animation never finished");
    }

    assert!(now >= 2_500.0);
    assert_eq!(dom.text(&nodes[0]), "370,000");
    assert!(handle.is_finished());
}

#[test]
fn late_frame_jumps_straight_to_target() {
    let (mut dom, nodes) = counter_page(&["counter-projects"]);
    let mut animator = CounterAnimator::new();
    animator
        .animate(&dom, "counter-projects", 24, 1500.0, 0.0)
        .expect("element exists");

    let remaining = animator.frame(&mut dom, 10_000.0).expect("frame");
    assert_eq!(remaining, 0);
    assert_eq!(shown(&dom, nodes[0]), 24);
    assert!(!animator.has_pending());
}

#[test]
fn missing_element_is_a_no_op() {
    let (mut dom, _) = counter_page(&[]);
    let mut animator = CounterAnimator::new();
    assert!(animator
        .animate(&dom, "counter-missing", 10, 1500.0, 0.0)
        .is_none());
    assert_eq!(animator.frame(&mut dom, 100.0).expect("frame"), 0);
}

#[test]
fn cancelled_animation_stops_writing() {
    let (mut dom, nodes) = counter_page(&["counter-communities"]);
    let mut animator = CounterAnimator::new();
    let handle = animator
        .animate(&dom, "counter-communities", 18, 1000.0, 0.0)
        .expect("element exists");

    animator.frame(&mut dom, 500.0).expect("frame");
    assert_eq!(shown(&dom, nodes[0]), 9);

    handle.cancel();
    assert_eq!(handle.state(), AnimationState::Cancelled);
    animator.frame(&mut dom, 2_000.0).expect("frame after cancel");
    assert_eq!(shown(&dom, nodes[0]), 9);
    assert!(!animator.has_pending());
}

#[test]
fn restarting_cancels_previous_animation_on_same_element() {
    let (mut dom, nodes) = counter_page(&["counter-co2"]);
    let mut animator = CounterAnimator::new();
    let first = animator
        .animate(&dom, "counter-co2", 1_000, 1000.0, 0.0)
        .expect("first");
    animator.frame(&mut dom, 500.0).expect("frame");

    let second = animator
        .animate(&dom, "counter-co2", 50, 1000.0, 500.0)
        .expect("second");
    assert!(first.is_cancelled());
    assert!(second.is_running());
    assert_eq!(animator.running().len(), 1);

    animator.frame(&mut dom, 1_500.0).expect("frame");
    assert_eq!(shown(&dom, nodes[0]), 50);
    assert!(second.is_finished());
}

#[test]
fn independent_counters_do_not_share_state() {
    let (mut dom, nodes) = counter_page(&["counter-a", "counter-b"]);
    let mut animator = CounterAnimator::new();
    let fast = animator
        .animate(&dom, "counter-a", 100, 100.0, 0.0)
        .expect("a");
    let slow = animator
        .animate(&dom, "counter-b", 100, 1000.0, 0.0)
        .expect("b");

    assert_eq!(animator.frame(&mut dom, 200.0).expect("frame"), 1);
    assert_eq!(shown(&dom, nodes[0]), 100);
    assert_eq!(shown(&dom, nodes[1]), 20);
    assert!(fast.is_finished());
    assert!(slow.is_running());

    slow.cancel();
    assert!(fast.is_finished());
    assert!(!animator.has_pending());
}

#[test]
fn zero_target_displays_zero() {
    let (mut dom, nodes) = counter_page(&["counter-zero"]);
    let mut animator = CounterAnimator::new();
    animator
        .animate(&dom, "counter-zero", 0, 1500.0, 0.0)
        .expect("element exists");
    animator.frame(&mut dom, 1_500.0).expect("frame");
    assert_eq!(dom.text(&nodes[0]), "0");
}
