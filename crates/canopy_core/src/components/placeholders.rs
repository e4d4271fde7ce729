//! Static placeholder content: year stamps and gallery tiles.

use crate::dom::{DomPort, DomResult, Selector};
use chrono::Datelike;

/// Id prefix of elements that show the current year.
pub const YEAR_ID_PREFIX: &str = "year";
pub const GALLERY_GRID_ID: &str = "gallery-grid";
pub const GALLERY_TILE_CLASS: &str = "img";

/// Current year from the local clock.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Writes `year` into every element whose id starts with `year`.
///
/// Returns the number of stamped elements.
pub fn stamp_years<D: DomPort>(dom: &mut D, year: i32) -> DomResult<usize> {
    let targets = dom.query_all(Selector::IdPrefix(YEAR_ID_PREFIX));
    let text = year.to_string();
    for node in &targets {
        dom.set_text(node, &text)?;
    }
    Ok(targets.len())
}

/// Appends `count` numbered tiles to `#gallery-grid`, if present.
pub fn fill_gallery<D: DomPort>(dom: &mut D, count: u32) -> DomResult<u32> {
    let Some(gallery) = dom.find_by_id(GALLERY_GRID_ID) else {
        return Ok(0);
    };
    for index in 1..=count {
        let tile = dom.create_element("div")?;
        dom.set_attribute(&tile, "class", GALLERY_TILE_CLASS)?;
        dom.set_text(&tile, &format!("Image {index}"))?;
        dom.append_child(&gallery, &tile)?;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::{current_year, fill_gallery, stamp_years, GALLERY_GRID_ID};
    use crate::dom::{DomPort, MemoryDom};

    #[test]
    fn current_year_is_plausible() {
        assert!(current_year() >= 2024);
    }

    #[test]
    fn stamps_every_year_prefixed_element() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let header = dom.append_new(body, "span", &[("id", "year")]).expect("a");
        let footer = dom
            .append_new(body, "span", &[("id", "year-footer")])
            .expect("b");
        let other = dom.append_new(body, "span", &[("id", "copyright")]).expect("c");

        assert_eq!(stamp_years(&mut dom, 2026).expect("stamp"), 2);
        assert_eq!(dom.text(&header), "2026");
        assert_eq!(dom.text(&footer), "2026");
        assert_eq!(dom.text(&other), "");
    }

    #[test]
    fn gallery_gets_numbered_tiles() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let gallery = dom
            .append_new(body, "div", &[("id", GALLERY_GRID_ID)])
            .expect("gallery");

        assert_eq!(fill_gallery(&mut dom, 8).expect("fill"), 8);
        let tiles = dom.element_children(gallery);
        assert_eq!(tiles.len(), 8);
        assert_eq!(dom.text(&tiles[0]), "Image 1");
        assert_eq!(dom.text(&tiles[7]), "Image 8");
        assert!(dom.has_class(&tiles[3], "img"));
    }

    #[test]
    fn missing_gallery_is_a_no_op() {
        let mut dom = MemoryDom::new();
        assert_eq!(fill_gallery(&mut dom, 8).expect("fill"), 0);
    }
}
