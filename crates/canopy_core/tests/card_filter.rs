use canopy_core::{render, DomPort, FilterBar, MemoryDom, NodeId, ProjectRecord, Selector};

struct FilterPage {
    dom: MemoryDom,
    pills: Vec<NodeId>,
    cards: Vec<NodeId>,
}

fn filter_page(records: &[ProjectRecord], keys: &[Option<&str>]) -> FilterPage {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let bar = dom.append_new(body, "div", &[]).expect("filter bar");
    let mut pills = Vec::new();
    for key in keys {
        let pill = match key {
            Some(key) => dom.append_new(
                bar,
                "button",
                &[("class", "filter-pill"), ("data-filter", *key)],
            ),
            None => dom.append_new(bar, "button", &[("class", "filter-pill")]),
        }
        .expect("pill");
        pills.push(pill);
    }
    let list = dom.append_new(body, "div", &[]).expect("list");
    render(&mut dom, records, Some(&list)).expect("render");
    let cards = dom.element_children(list);
    FilterPage { dom, pills, cards }
}

fn visible(page: &FilterPage) -> Vec<NodeId> {
    page.cards
        .iter()
        .copied()
        .filter(|card| page.dom.is_displayed(*card))
        .collect()
}

fn active(page: &FilterPage) -> Vec<NodeId> {
    page.pills
        .iter()
        .copied()
        .filter(|pill| page.dom.has_class(pill, "active"))
        .collect()
}

fn two_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord::new(1, "Mangroves", "reforestation", "Kenya", 12_000, "Active"),
        ProjectRecord::new(2, "Solar", "renewable", "Ghana", 8_000, "Pipeline"),
    ]
}

#[test]
fn filtering_by_reforestation_shows_only_first_card() {
    let mut page = filter_page(
        &two_projects(),
        &[Some("all"), Some("reforestation"), Some("renewable")],
    );
    let bar = FilterBar::wire(&page.dom);
    assert_eq!(bar.controls(), page.pills.as_slice());

    let pill = page.pills[1];
    let shown = bar.activate(&mut page.dom, &pill).expect("activate");

    assert_eq!(shown, 1);
    assert_eq!(visible(&page), vec![page.cards[0]]);
    assert_eq!(
        page.dom.style(&page.cards[1], "display").as_deref(),
        Some("none")
    );
}

#[test]
fn wildcard_restores_every_card() {
    let mut page = filter_page(&two_projects(), &[Some("all"), Some("renewable")]);
    let bar = FilterBar::wire(&page.dom);

    let renewable = page.pills[1];
    bar.activate(&mut page.dom, &renewable).expect("renewable");
    assert_eq!(visible(&page), vec![page.cards[1]]);

    let all = page.pills[0];
    let shown = bar.activate(&mut page.dom, &all).expect("all");
    assert_eq!(shown, 2);
    assert_eq!(visible(&page), page.cards);
    assert_eq!(page.dom.style(&page.cards[0], "display"), None);
}

#[test]
fn exactly_one_control_is_active_after_each_activation() {
    let mut page = filter_page(
        &two_projects(),
        &[Some("all"), Some("reforestation"), Some("renewable"), Some("avoidance")],
    );
    let bar = FilterBar::wire(&page.dom);

    for pill in page.pills.clone() {
        bar.activate(&mut page.dom, &pill).expect("activate");
        assert_eq!(active(&page), vec![pill]);
    }
}

#[test]
fn unknown_category_hides_everything() {
    let mut page = filter_page(&two_projects(), &[Some("avoidance")]);
    let bar = FilterBar::wire(&page.dom);
    let pill = page.pills[0];

    assert_eq!(bar.activate(&mut page.dom, &pill).expect("activate"), 0);
    assert!(visible(&page).is_empty());
}

#[test]
fn control_without_key_hides_everything() {
    let mut page = filter_page(&two_projects(), &[Some("all"), None]);
    let bar = FilterBar::wire(&page.dom);
    let pill = page.pills[1];

    assert_eq!(bar.activate(&mut page.dom, &pill).expect("activate"), 0);
    assert_eq!(active(&page), vec![pill]);
}

#[test]
fn filter_sees_cards_added_after_wiring() {
    let mut page = filter_page(&two_projects(), &[Some("renewable")]);
    let bar = FilterBar::wire(&page.dom);

    let body = page.dom.body();
    let late_list = page.dom.append_new(body, "div", &[]).expect("late list");
    let late = vec![ProjectRecord::new(3, "Wind", "renewable", "Chile", 9_000, "Active")];
    render(&mut page.dom, &late, Some(&late_list)).expect("late render");

    let pill = page.pills[0];
    assert_eq!(bar.activate(&mut page.dom, &pill).expect("activate"), 2);
    assert_eq!(page.dom.query_all(Selector::Class("project-card")).len(), 3);
}

#[test]
fn filters_are_not_aria_annotated() {
    let mut page = filter_page(&two_projects(), &[Some("all")]);
    let bar = FilterBar::wire(&page.dom);
    let pill = page.pills[0];
    bar.activate(&mut page.dom, &pill).expect("activate");
    assert_eq!(page.dom.attribute(&pill, "aria-pressed"), None);
    assert_eq!(page.dom.attribute(&pill, "aria-expanded"), None);
}
