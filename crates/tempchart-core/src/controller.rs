// File: crates/tempchart-core/src/controller.rs
// Summary: Session controller: drives pagination, builds frames per pass, and discards stale loads.
// Notes:
// - A pass is split into request (ticket) and complete (rows in hand) so callers
//   with an asynchronous loader can interleave navigation. Only the newest
//   ticket may render; older completions are dropped.
// - The page index commits only when its pass renders, so the state always
//   describes the frame that is actually on screen.

use log::{debug, info, warn};

use crate::annotate::{find_repeats, global_readout, repeat_lines};
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::rank::{AppearanceHistory, Ranker};
use crate::render::{Bar, Frame, FrameKind, Renderer};
use crate::scale::{dynamic_domain, fixed_domain};
use crate::source::DataSource;
use crate::types::{find_row, Row};
use crate::view::{Nav, Page, ViewState};

/// Handle for one requested pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassTicket {
    generation: u64,
    index: usize,
    entity: Option<String>,
}

impl PassTicket {
    pub fn generation(&self) -> u64 { self.generation }

    /// Page index the pass renders.
    pub fn index(&self) -> usize { self.index }

    /// Entity for an interactive pass.
    pub fn entity(&self) -> Option<&str> { self.entity.as_deref() }
}

/// Result of one navigation or selection event.
#[derive(Debug)]
pub enum PassOutcome {
    /// A frame was rendered and the page is now current.
    Rendered(Page),
    /// Navigation at a boundary; nothing happened.
    Unchanged,
    /// A newer request superseded this one; its data was discarded.
    Stale,
    /// The pass failed and was reported; the previous frame and page remain.
    Failed(ChartError),
}

impl PassOutcome {
    pub fn is_rendered(&self) -> bool { matches!(self, PassOutcome::Rendered(_)) }
}

/// Owns the session state: page index, selected entity and appearance history.
pub struct Controller {
    config: ChartConfig,
    ranker: Ranker,
    view: ViewState,
    history: Option<AppearanceHistory>,
    selected: String,
    generation: u64,
}

impl Controller {
    pub fn new(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let ranker = Ranker::new(config.top_k, config.aggregate_entity.clone());
        let view = ViewState::new(config.page_count());
        let selected = config.aggregate_entity.clone();
        Ok(Self { config, ranker, view, history: None, selected, generation: 0 })
    }

    pub fn config(&self) -> &ChartConfig { &self.config }

    pub fn view(&self) -> &ViewState { &self.view }

    pub fn page(&self) -> Page { self.view.page() }

    pub fn selected_entity(&self) -> &str { &self.selected }

    /// Appearance history, available after the first successful load.
    pub fn history(&self) -> Option<&AppearanceHistory> { self.history.as_ref() }

    pub fn has_next(&self) -> bool { self.view.has_next() }

    pub fn has_prev(&self) -> bool { self.view.has_prev() }

    // ---- ticketed passes ----------------------------------------------------

    /// Request a pass for the page currently in the view state.
    pub fn request_current(&mut self) -> PassTicket {
        let entity = match self.view.page() {
            Page::Interactive => Some(self.selected.clone()),
            Page::Snapshot(_) => None,
        };
        self.issue(self.view.index(), entity)
    }

    /// Request a navigation pass. `None` when already at the boundary.
    pub fn request_nav(&mut self, nav: Nav) -> Option<PassTicket> {
        let target = self.view.target(nav);
        if target == self.view.index() {
            debug!("{nav:?} at boundary, ignored");
            return None;
        }
        // entering the interactive page always starts from the aggregate
        let entity = match self.view.peek(nav) {
            Page::Interactive => Some(self.config.aggregate_entity.clone()),
            Page::Snapshot(_) => None,
        };
        Some(self.issue(target, entity))
    }

    /// Request a re-render of the interactive page for `entity`.
    pub fn request_selection(&mut self, entity: &str) -> Result<PassTicket> {
        if self.view.page() != Page::Interactive {
            return Err(ChartError::NotInteractive);
        }
        Ok(self.issue(self.view.index(), Some(entity.to_string())))
    }

    fn issue(&mut self, index: usize, entity: Option<String>) -> PassTicket {
        self.generation += 1;
        PassTicket { generation: self.generation, index, entity }
    }

    /// Finish a pass with the loaded rows. Stale tickets are discarded unrendered.
    pub fn complete(
        &mut self,
        ticket: PassTicket,
        rows: Result<Vec<Row>>,
        renderer: &mut dyn Renderer,
    ) -> PassOutcome {
        if ticket.generation != self.generation {
            warn!("discarding stale pass {} (latest {})", ticket.generation, self.generation);
            return PassOutcome::Stale;
        }
        let pass = rows.and_then(|rows| {
            let frame = self.build_frame(&rows, ticket.index, ticket.entity.as_deref())?;
            renderer.render(&frame)?;
            Ok(())
        });
        match pass {
            Ok(()) => {
                self.view.set_index(ticket.index);
                if let Some(e) = ticket.entity {
                    self.selected = e;
                }
                info!("now showing {:?}", self.view.page());
                PassOutcome::Rendered(self.view.page())
            }
            Err(e) => {
                warn!("pass for page {} failed: {e}", ticket.index);
                renderer.report_error(&e);
                PassOutcome::Failed(e)
            }
        }
    }

    // ---- synchronous conveniences --------------------------------------------

    /// Render the current page (initially `Snapshot(0)`).
    pub fn start(&mut self, source: &mut dyn DataSource, renderer: &mut dyn Renderer) -> PassOutcome {
        let ticket = self.request_current();
        self.complete(ticket, source.load_rows(), renderer)
    }

    pub fn navigate(&mut self, nav: Nav, source: &mut dyn DataSource, renderer: &mut dyn Renderer) -> PassOutcome {
        match self.request_nav(nav) {
            Some(ticket) => self.complete(ticket, source.load_rows(), renderer),
            None => PassOutcome::Unchanged,
        }
    }

    pub fn next(&mut self, source: &mut dyn DataSource, renderer: &mut dyn Renderer) -> PassOutcome {
        self.navigate(Nav::Next, source, renderer)
    }

    pub fn prev(&mut self, source: &mut dyn DataSource, renderer: &mut dyn Renderer) -> PassOutcome {
        self.navigate(Nav::Prev, source, renderer)
    }

    /// Switch the interactive view to `entity`. Errors outside the interactive page.
    pub fn select_entity(
        &mut self,
        entity: &str,
        source: &mut dyn DataSource,
        renderer: &mut dyn Renderer,
    ) -> Result<PassOutcome> {
        let ticket = self.request_selection(entity)?;
        Ok(self.complete(ticket, source.load_rows(), renderer))
    }

    // ---- frame building ------------------------------------------------------

    /// Build the frame for page `index`. The first call fixes the appearance history.
    pub fn build_frame(&mut self, rows: &[Row], index: usize, entity: Option<&str>) -> Result<Frame> {
        if self.history.is_none() {
            let h = self.ranker.history(rows, &self.config.snapshot_years);
            debug!("appearance history over {} entities", h.len());
            self.history = Some(h);
        }
        match self.config.snapshot_years.get(index) {
            Some(&year) => self.snapshot_frame(rows, year),
            None => {
                let entity = entity.unwrap_or(self.config.aggregate_entity.as_str());
                self.interactive_frame(rows, entity)
            }
        }
    }

    fn snapshot_frame(&self, rows: &[Row], year: i32) -> Result<Frame> {
        let cfg = &self.config;
        let ranked = self.ranker.rank(rows, year);
        let bars: Vec<Bar> = ranked
            .top_entities
            .iter()
            .filter_map(|e| {
                find_row(rows, e).map(|r| Bar::with_display(e.clone(), r.value(year), r.display_value(year)))
            })
            .collect();

        let mut annotations = Vec::new();
        if cfg.show_global_readout {
            let agg = find_row(rows, &cfg.aggregate_entity).ok_or_else(|| ChartError::MissingEntity {
                entity: cfg.aggregate_entity.clone(),
                year: Some(year),
            })?;
            if agg.defined_value(year).is_some() {
                annotations.push(global_readout(&agg.display_value(year), year, &cfg.baseline_label));
            }
        }
        if let Some(history) = &self.history {
            let repeats = find_repeats(history, &ranked.top_entities);
            annotations.extend(repeat_lines(&repeats, &ranked.top_entities, cfg.top_k, cfg.window_bounds()));
        }

        Ok(Frame {
            kind: FrameKind::Snapshot { year },
            title: format!("Top {} Countries with Highest Temperature Change in {year}", cfg.top_k),
            bars,
            domain: fixed_domain(cfg.fixed_domain_high),
            tick_count: cfg.tick_count,
            y_label: cfg.axis_label(),
            x_tick_labels: None,
            annotations,
        })
    }

    fn interactive_frame(&self, rows: &[Row], entity: &str) -> Result<Frame> {
        let cfg = &self.config;
        let row = find_row(rows, entity)
            .ok_or_else(|| ChartError::MissingEntity { entity: entity.to_string(), year: None })?;
        let series = row.series(cfg.first_year, cfg.last_year);
        let values: Vec<f64> = series.iter().map(|&(_, v)| v).collect();
        let domain = dynamic_domain(entity, &values)?;

        // one slot per year, gaps included
        let bars = series
            .iter()
            .map(|&(y, v)| Bar::with_display(y.to_string(), v, row.display_value(y)))
            .collect();
        let x_tick_labels = (cfg.first_year..=cfg.last_year)
            .filter(|y| (y - cfg.first_year) % 3 == 0)
            .map(|y| y.to_string())
            .collect();

        Ok(Frame {
            kind: FrameKind::Interactive { entity: entity.to_string() },
            title: "Mean Temperature Change by Country".to_string(),
            bars,
            domain,
            tick_count: cfg.tick_count,
            y_label: cfg.axis_label(),
            x_tick_labels: Some(x_tick_labels),
            annotations: Vec::new(),
        })
    }
}
