//! In-memory skeletons of the site's static pages.
//!
//! Each builder returns a `MemoryDom` holding the elements the page script
//! expects, before any behavior has run. Used by the preview CLI and tests.

use crate::dom::{DomResult, MemoryDom, NodeId};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Site page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTemplate {
    Index,
    Projects,
    Contact,
    Gallery,
}

impl PageTemplate {
    pub const ALL: [PageTemplate; 4] = [Self::Index, Self::Projects, Self::Contact, Self::Gallery];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Projects => "projects",
            Self::Contact => "contact",
            Self::Gallery => "gallery",
        }
    }

    /// Builds the page skeleton.
    pub fn build(self) -> DomResult<MemoryDom> {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        site_header(&mut dom, body)?;
        let main = dom.append_new(body, "main", &[])?;
        match self {
            Self::Index => index_main(&mut dom, main)?,
            Self::Projects => projects_main(&mut dom, main)?,
            Self::Contact => contact_main(&mut dom, main)?,
            Self::Gallery => {
                dom.append_new(main, "div", &[("id", "gallery-grid"), ("class", "gallery")])?;
            }
        }
        site_footer(&mut dom, body)?;
        Ok(dom)
    }
}

impl Display for PageTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageTemplate {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|template| template.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown page `{value}`; expected index|projects|contact|gallery")
            })
    }
}

fn site_header(dom: &mut MemoryDom, body: NodeId) -> DomResult<()> {
    let header = dom.append_new(body, "header", &[("class", "site-header")])?;
    let nav = dom.append_new(header, "nav", &[("class", "site-nav")])?;
    for (href, label) in [
        ("index.html", "Home"),
        ("projects.html", "Projects"),
        ("gallery.html", "Gallery"),
        ("contact.html", "Contact"),
    ] {
        let link = dom.append_new(nav, "a", &[("href", href)])?;
        dom.append_text(link, label)?;
    }
    let toggle = dom.append_new(
        header,
        "button",
        &[("class", "nav-toggle"), ("aria-expanded", "false")],
    )?;
    dom.append_text(toggle, "Menu")?;
    let stamp = dom.append_new(header, "span", &[("id", "year")])?;
    dom.append_text(stamp, "2000")?;
    Ok(())
}

fn site_footer(dom: &mut MemoryDom, body: NodeId) -> DomResult<()> {
    let footer = dom.append_new(body, "footer", &[])?;
    let small = dom.append_new(footer, "small", &[])?;
    dom.append_text(small, "\u{a9} ")?;
    dom.append_new(small, "span", &[("id", "year-footer")])?;
    Ok(())
}

fn index_main(dom: &mut MemoryDom, main: NodeId) -> DomResult<()> {
    let stats = dom.append_new(main, "section", &[("class", "stats")])?;
    for id in ["counter-co2", "counter-projects", "counter-communities"] {
        let stat = dom.append_new(stats, "strong", &[("id", id)])?;
        dom.append_text(stat, "0")?;
    }
    dom.append_new(main, "div", &[("id", "project-grid"), ("class", "grid")])?;
    newsletter_form(dom, main)
}

fn projects_main(dom: &mut MemoryDom, main: NodeId) -> DomResult<()> {
    let filters = dom.append_new(main, "div", &[("class", "filters")])?;
    for (key, label) in [
        ("all", "All"),
        ("reforestation", "Reforestation"),
        ("renewable", "Renewable"),
        ("avoidance", "Avoidance"),
    ] {
        let class = if key == "all" {
            "filter-pill active"
        } else {
            "filter-pill"
        };
        let pill = dom.append_new(filters, "button", &[("class", class), ("data-filter", key)])?;
        dom.append_text(pill, label)?;
    }
    dom.append_new(main, "div", &[("id", "projects-list"), ("class", "grid")])?;
    Ok(())
}

fn contact_main(dom: &mut MemoryDom, main: NodeId) -> DomResult<()> {
    let form = dom.append_new(main, "form", &[("id", "contact-form")])?;
    dom.append_new(form, "input", &[("id", "name"), ("name", "name")])?;
    dom.append_new(
        form,
        "input",
        &[("id", "email"), ("name", "email"), ("type", "email")],
    )?;
    dom.append_new(form, "textarea", &[("id", "message"), ("name", "message")])?;
    let submit = dom.append_new(form, "button", &[("type", "submit")])?;
    dom.append_text(submit, "Send")?;
    dom.append_new(form, "p", &[("id", "contact-msg")])?;
    Ok(())
}

fn newsletter_form(dom: &mut MemoryDom, parent: NodeId) -> DomResult<()> {
    let form = dom.append_new(parent, "form", &[("id", "newsletter-form")])?;
    dom.append_new(form, "input", &[("id", "nl-email"), ("type", "email")])?;
    let submit = dom.append_new(form, "button", &[("type", "submit")])?;
    dom.append_text(submit, "Subscribe")?;
    dom.append_new(form, "p", &[("id", "nl-msg")])?;
    Ok(())
}
