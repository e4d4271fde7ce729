//! Page bootstrap and event routing.
//!
//! # Responsibility
//! - Run the one-time startup sequence against a document.
//! - Hold the wired state (toggles, filters, forms, counters) and route host
//!   events to it.
//!
//! # Invariants
//! - Startup order: years, nav, cards, filters, gallery, counters, forms.
//!   Filters are wired after cards exist.
//! - Events for nodes the page did not wire are ignored.
//! - The page never reads a clock; hosts pass time in through `PageClock`
//!   and `frame`.

use crate::components::counter::{AnimationHandle, CounterAnimator};
use crate::components::filter::FilterBar;
use crate::components::forms::{FormOutcome, Forms};
use crate::components::nav::NavToggles;
use crate::components::placeholders::{current_year, fill_gallery, stamp_years};
use crate::components::render::{render_into, PROJECTS_LIST_ID, PROJECT_GRID_ID};
use crate::config::SiteConfig;
use crate::dom::DomPort;
use crate::error::PageResult;
use log::{debug, info};

/// Time inputs for startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageClock {
    /// Year written into `[id^="year"]` elements.
    pub year: i32,
    /// Frame timestamp counters start from, in ms.
    pub now_ms: f64,
}

impl PageClock {
    /// Uses the local calendar year.
    pub fn local(now_ms: f64) -> Self {
        Self {
            year: current_year(),
            now_ms,
        }
    }
}

/// Host input routed to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<N> {
    Click(N),
    Submit(N),
}

/// What handling one event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    NavToggled { open: bool },
    FilterApplied { visible: usize },
    FormHandled(FormOutcome),
    /// The target is not something this page wired.
    Ignored,
}

/// Counts of what startup produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    pub years_stamped: usize,
    pub nav_toggles: usize,
    pub featured_cards: usize,
    pub listed_cards: usize,
    pub filter_controls: usize,
    pub gallery_tiles: u32,
    pub counters_started: usize,
}

/// One initialized page.
#[derive(Debug)]
pub struct SitePage<N> {
    nav: NavToggles<N>,
    filters: FilterBar<N>,
    forms: Forms<N>,
    counters: CounterAnimator<N>,
    report: InitReport,
}

impl<N: Clone + PartialEq> SitePage<N> {
    /// Runs the startup sequence once.
    pub fn init<D: DomPort<Node = N>>(
        dom: &mut D,
        config: &SiteConfig,
        clock: PageClock,
    ) -> PageResult<Self> {
        let years_stamped = stamp_years(dom, clock.year)?;
        let nav = NavToggles::wire(dom);

        let featured_cards = render_into(dom, config.featured_projects(), PROJECT_GRID_ID)?;
        let listed_cards = render_into(dom, &config.projects, PROJECTS_LIST_ID)?;
        let filters = FilterBar::wire(dom);

        let gallery_tiles = fill_gallery(dom, config.gallery_placeholders)?;

        let mut counters = CounterAnimator::new();
        let mut counters_started = 0;
        for spec in &config.counters {
            if counters
                .animate(&*dom, &spec.id, spec.target, spec.duration_ms, clock.now_ms)
                .is_some()
            {
                counters_started += 1;
            }
        }

        let forms = Forms::wire(dom);

        let report = InitReport {
            years_stamped,
            nav_toggles: nav.buttons().len(),
            featured_cards,
            listed_cards,
            filter_controls: filters.controls().len(),
            gallery_tiles,
            counters_started,
        };
        info!(
            "event=page_ready module=page status=ok cards={} filters={} counters={}",
            featured_cards + listed_cards,
            report.filter_controls,
            counters_started
        );

        Ok(Self {
            nav,
            filters,
            forms,
            counters,
            report,
        })
    }

    pub fn report(&self) -> InitReport {
        self.report
    }

    pub fn filters(&self) -> &FilterBar<N> {
        &self.filters
    }

    pub fn nav(&self) -> &NavToggles<N> {
        &self.nav
    }

    pub fn forms(&self) -> &Forms<N> {
        &self.forms
    }

    /// Routes one host event.
    pub fn handle<D: DomPort<Node = N>>(
        &mut self,
        dom: &mut D,
        event: PageEvent<N>,
    ) -> PageResult<EventOutcome> {
        match event {
            PageEvent::Click(target) => {
                if self.nav.contains(&target) {
                    let open = self.nav.toggle(dom, &target)?;
                    return Ok(EventOutcome::NavToggled { open });
                }
                if self.filters.contains(&target) {
                    let visible = self.filters.activate(dom, &target)?;
                    return Ok(EventOutcome::FilterApplied { visible });
                }
                Ok(EventOutcome::Ignored)
            }
            PageEvent::Submit(target) => {
                let Some(kind) = self.forms.kind_of(&target) else {
                    debug!("event=submit_ignored module=page status=skip");
                    return Ok(EventOutcome::Ignored);
                };
                match self.forms.submit(dom, kind)? {
                    Some(outcome) => Ok(EventOutcome::FormHandled(outcome)),
                    None => Ok(EventOutcome::Ignored),
                }
            }
        }
    }

    /// (Re)starts a counter; a counter already running on the element is
    /// cancelled.
    pub fn animate_counter<D: DomPort<Node = N>>(
        &mut self,
        dom: &D,
        element_id: &str,
        target: u64,
        duration_ms: f64,
        now_ms: f64,
    ) -> Option<AnimationHandle> {
        self.counters
            .animate(dom, element_id, target, duration_ms, now_ms)
    }

    /// Advances every running counter to `now_ms`. Returns how many still
    /// need frames.
    pub fn frame<D: DomPort<Node = N>>(&mut self, dom: &mut D, now_ms: f64) -> PageResult<usize> {
        Ok(self.counters.frame(dom, now_ms)?)
    }

    /// Whether the host should schedule another animation frame.
    pub fn has_pending_frames(&self) -> bool {
        self.counters.has_pending()
    }
}
