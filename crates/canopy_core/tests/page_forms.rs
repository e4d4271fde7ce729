use canopy_core::{
    DomPort, EventOutcome, FormError, FormKind, MemoryDom, NodeId, PageClock, PageError,
    PageEvent, PageTemplate, SiteConfig, SitePage,
};

const CLOCK: PageClock = PageClock {
    year: 2026,
    now_ms: 0.0,
};

fn contact_page() -> (MemoryDom, SitePage<NodeId>) {
    let mut dom = PageTemplate::Contact.build().expect("contact template");
    let page = SitePage::init(&mut dom, &SiteConfig::default(), CLOCK).expect("init");
    (dom, page)
}

fn type_into(dom: &mut MemoryDom, id: &str, value: &str) {
    let node = dom.find_by_id(id).expect("field exists");
    dom.set_field_value(node, value).expect("type value");
}

fn value_of(dom: &MemoryDom, id: &str) -> String {
    let node = dom.find_by_id(id).expect("field exists");
    dom.field_value(&node)
}

fn submit(dom: &mut MemoryDom, page: &mut SitePage<NodeId>, form_id: &str) -> EventOutcome {
    let form = dom.find_by_id(form_id).expect("form exists");
    page.handle(dom, PageEvent::Submit(form)).expect("submit handled")
}

#[test]
fn malformed_contact_email_shows_error_and_keeps_values() {
    let (mut dom, mut page) = contact_page();
    type_into(&mut dom, "name", "Ada");
    type_into(&mut dom, "email", "not-an-email");
    type_into(&mut dom, "message", "Tell me more");

    let outcome = match submit(&mut dom, &mut page, "contact-form") {
        EventOutcome::FormHandled(outcome) => outcome,
        other => panic!("expected form outcome, got {other:?}"),
    };
    assert_eq!(outcome.kind, FormKind::Contact);
    assert_eq!(outcome.result, Err(FormError::InvalidContactEmail));

    let msg = dom.find_by_id("contact-msg").expect("message element");
    assert_eq!(dom.text(&msg), "Enter a valid email.");
    assert_eq!(dom.style(&msg, "color").as_deref(), Some("#b33"));
    assert_eq!(value_of(&dom, "name"), "Ada");
    assert_eq!(value_of(&dom, "email"), "not-an-email");
    assert_eq!(value_of(&dom, "message"), "Tell me more");
}

#[test]
fn blank_contact_field_is_reported_first() {
    let (mut dom, mut page) = contact_page();
    type_into(&mut dom, "name", "   ");
    type_into(&mut dom, "email", "also-bad");
    type_into(&mut dom, "message", "hi");

    submit(&mut dom, &mut page, "contact-form");
    let msg = dom.find_by_id("contact-msg").expect("message element");
    assert_eq!(dom.text(&msg), "Please fill all required fields.");
    assert_eq!(value_of(&dom, "email"), "also-bad");
}

#[test]
fn valid_contact_submission_shows_success_and_clears_fields() {
    let (mut dom, mut page) = contact_page();
    type_into(&mut dom, "name", "Ada Lovelace");
    type_into(&mut dom, "email", "ada@example.org");
    type_into(&mut dom, "message", "Interested in the mangrove project.");

    let outcome = submit(&mut dom, &mut page, "contact-form");
    assert!(matches!(outcome, EventOutcome::FormHandled(ref o) if o.accepted()));

    let msg = dom.find_by_id("contact-msg").expect("message element");
    assert_eq!(dom.text(&msg), "Message sent. We will contact you soon.");
    assert_eq!(dom.style(&msg, "color").as_deref(), Some("#064"));
    assert_eq!(value_of(&dom, "name"), "");
    assert_eq!(value_of(&dom, "email"), "");
    assert_eq!(value_of(&dom, "message"), "");
}

#[test]
fn error_then_success_replaces_message_and_color() {
    let (mut dom, mut page) = contact_page();
    type_into(&mut dom, "name", "Ada");
    type_into(&mut dom, "email", "ada@");
    type_into(&mut dom, "message", "hi");
    submit(&mut dom, &mut page, "contact-form");

    type_into(&mut dom, "email", "ada@example.org");
    submit(&mut dom, &mut page, "contact-form");

    let msg = dom.find_by_id("contact-msg").expect("message element");
    assert_eq!(dom.text(&msg), "Message sent. We will contact you soon.");
    assert_eq!(dom.style(&msg, "color").as_deref(), Some("#064"));
}

#[test]
fn newsletter_rejects_bad_email_and_accepts_good_one() {
    let mut dom = PageTemplate::Index.build().expect("index template");
    let mut page = SitePage::init(&mut dom, &SiteConfig::default(), CLOCK).expect("init");

    type_into(&mut dom, "nl-email", "someone@example");
    submit(&mut dom, &mut page, "newsletter-form");
    let msg = dom.find_by_id("nl-msg").expect("message element");
    assert_eq!(dom.text(&msg), "Please enter a valid email.");
    assert_eq!(value_of(&dom, "nl-email"), "someone@example");

    type_into(&mut dom, "nl-email", "someone@example.com");
    submit(&mut dom, &mut page, "newsletter-form");
    assert_eq!(dom.text(&msg), "Thanks! You are subscribed.");
    assert_eq!(dom.style(&msg, "color").as_deref(), Some("#064"));
    assert_eq!(value_of(&dom, "nl-email"), "");
}

#[test]
fn form_missing_a_field_surfaces_missing_element() {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    let form = dom
        .append_new(body, "form", &[("id", "contact-form")])
        .expect("form");
    dom.append_new(form, "input", &[("id", "name")])
        .expect("name");
    let mut page = SitePage::init(&mut dom, &SiteConfig::default(), CLOCK).expect("init");

    let err = page
        .handle(&mut dom, PageEvent::Submit(form))
        .expect_err("missing email field must fail");
    assert_eq!(err, PageError::MissingElement("email"));
}

#[test]
fn submit_on_unwired_form_is_ignored() {
    let (mut dom, mut page) = contact_page();
    let body = dom.body();
    let stray = dom
        .append_new(body, "form", &[("id", "search-form")])
        .expect("stray form");
    let outcome = page
        .handle(&mut dom, PageEvent::Submit(stray))
        .expect("ignored");
    assert_eq!(outcome, EventOutcome::Ignored);
}
