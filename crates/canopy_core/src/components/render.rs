//! Project card rendering.
//!
//! # Responsibility
//! - Turn project records into `article.project-card` elements.
//! - Append them to a container in input order.
//!
//! # Invariants
//! - Every record text field is escaped before it is placed in markup.
//! - Each card carries its category in `data-type`; it is never changed later.
//! - Rendering is append-only: a second call duplicates cards.

use crate::dom::{DomPort, DomResult};
use crate::model::project::ProjectRecord;
use crate::text::{escape_html, format_grouped};
use log::debug;

/// Class carried by every rendered card; filters select on it.
pub const CARD_CLASS: &str = "project-card";
/// Attribute holding the card's category tag.
pub const CARD_TYPE_ATTR: &str = "data-type";
/// Featured grid on the landing page.
pub const PROJECT_GRID_ID: &str = "project-grid";
/// Full list on the projects page.
pub const PROJECTS_LIST_ID: &str = "projects-list";

/// Renders records as cards into `container`.
///
/// Returns the number of cards appended; an absent container is a no-op
/// returning `0`.
pub fn render<D: DomPort>(
    dom: &mut D,
    records: &[ProjectRecord],
    container: Option<&D::Node>,
) -> DomResult<usize> {
    let Some(container) = container else {
        return Ok(0);
    };

    for record in records {
        let card = create_card(dom, record)?;
        dom.append_child(container, &card)?;
    }
    debug!(
        "event=cards_rendered module=render status=ok count={}",
        records.len()
    );
    Ok(records.len())
}

/// Renders into the element with `container_id`, if the page has one.
pub fn render_into<D: DomPort>(
    dom: &mut D,
    records: &[ProjectRecord],
    container_id: &str,
) -> DomResult<usize> {
    let container = dom.find_by_id(container_id);
    render(dom, records, container.as_ref())
}

/// Builds one detached card element.
pub fn create_card<D: DomPort>(dom: &mut D, record: &ProjectRecord) -> DomResult<D::Node> {
    let card = dom.create_element("article")?;
    dom.set_attribute(&card, "class", CARD_CLASS)?;
    dom.set_attribute(&card, CARD_TYPE_ATTR, &record.category)?;
    dom.set_inner_html(&card, &card_markup(record))?;
    Ok(card)
}

/// Inner markup of one card with all record text escaped.
pub fn card_markup(record: &ProjectRecord) -> String {
    format!(
        concat!(
            "<div class=\"meta\">{location} \u{2022} {status}</div>",
            "<h3>{title}</h3>",
            "<p class=\"small\">Estimated tCO\u{2082}e: <strong>{co2}</strong></p>",
            "<p><a class=\"btn small\" href=\"contact.html\">Request Info</a></p>"
        ),
        location = escape_html(&record.location),
        status = escape_html(&record.status),
        title = escape_html(&record.title),
        co2 = format_grouped(record.co2),
    )
}

#[cfg(test)]
mod tests {
    use super::{card_markup, render, CARD_CLASS, CARD_TYPE_ATTR};
    use crate::dom::{DomPort, MemoryDom, Selector};
    use crate::model::project::ProjectRecord;

    #[test]
    fn card_markup_formats_quantity_and_meta() {
        let record = ProjectRecord::new(1, "Mangroves", "reforestation", "Kenya", 12_000, "Active");
        let markup = card_markup(&record);
        assert!(markup.contains("<h3>Mangroves</h3>"));
        assert!(markup.contains("Kenya \u{2022} Active"));
        assert!(markup.contains("<strong>12,000</strong>"));
        assert!(markup.contains("href=\"contact.html\""));
    }

    #[test]
    fn card_markup_escapes_location_and_status() {
        let record = ProjectRecord::new(1, "t", "c", "<b>Nairobi</b>", 1, "\"Live\"");
        let markup = card_markup(&record);
        assert!(markup.contains("&lt;b&gt;Nairobi&lt;/b&gt;"));
        assert!(markup.contains("&quot;Live&quot;"));
    }

    #[test]
    fn absent_container_renders_nothing() {
        let mut dom = MemoryDom::new();
        let records = vec![ProjectRecord::new(1, "t", "c", "l", 1, "s")];
        let count = render(&mut dom, &records, None).expect("render");
        assert_eq!(count, 0);
        assert!(dom.query_all(Selector::Class(CARD_CLASS)).is_empty());
    }

    #[test]
    fn cards_carry_category_attribute() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let list = dom.append_new(body, "div", &[]).expect("list");
        let records = vec![ProjectRecord::new(7, "t", "renewable", "l", 1, "s")];
        render(&mut dom, &records, Some(&list)).expect("render");

        let cards = dom.query_all(Selector::Class(CARD_CLASS));
        assert_eq!(cards.len(), 1);
        assert_eq!(
            dom.attribute(&cards[0], CARD_TYPE_ATTR).as_deref(),
            Some("renewable")
        );
        assert_eq!(dom.tag_name(cards[0]), Some("article"));
    }
}
