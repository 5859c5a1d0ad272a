// File: crates/tempchart-core/tests/controller.rs
// Purpose: End-to-end passes through the controller with an in-memory source and a recording renderer.

use tempchart_core::source::read_rows;
use tempchart_core::{
    AnnotationKind, ChartConfig, ChartError, Controller, DataSource, Frame, FrameKind, MemorySource, Nav, Page,
    PassOutcome, Renderer, Row,
};

#[derive(Default)]
struct Recorder {
    frames: Vec<Frame>,
    errors: Vec<String>,
}

impl Renderer for Recorder {
    fn render(&mut self, frame: &Frame) -> tempchart_core::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn report_error(&mut self, err: &ChartError) { self.errors.push(err.to_string()); }
}

struct Broken;

impl DataSource for Broken {
    fn load_rows(&mut self) -> tempchart_core::Result<Vec<Row>> {
        Err(ChartError::DataLoad("connection reset".into()))
    }
}

fn config() -> ChartConfig {
    ChartConfig {
        snapshot_years: vec![2018, 2019, 2020],
        top_k: 2,
        first_year: 2016,
        last_year: 2020,
        ..ChartConfig::default()
    }
}

fn rows() -> Vec<Row> {
    vec![
        Row::new("World")
            .with_value(2016, 0.5)
            .with_value(2017, 0.6)
            .with_value(2018, 0.8)
            .with_value(2019, 0.9)
            .with_value(2020, 1.0),
        Row::new("A").with_value(2016, -0.3).with_value(2018, 1.5).with_value(2019, 0.2).with_value(2020, 1.4),
        Row::new("B").with_value(2018, 1.2).with_value(2019, 1.3).with_value(2020, 0.1),
        Row::new("C").with_value(2018, 0.4).with_value(2019, 1.1).with_value(2020, 1.2),
        Row::new("D"),
    ]
}

fn labels(frame: &Frame) -> Vec<&str> { frame.bars.iter().map(|b| b.label.as_str()).collect() }

#[test]
fn first_snapshot_has_bars_readout_and_repeats() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(rows());
    let mut out = Recorder::default();

    assert!(ctl.start(&mut src, &mut out).is_rendered());
    let f = &out.frames[0];
    assert_eq!(f.kind, FrameKind::Snapshot { year: 2018 });
    assert_eq!(f.title, "Top 2 Countries with Highest Temperature Change in 2018");
    assert_eq!(labels(f), vec!["A", "B"]);
    assert_eq!(f.bars[0].value, 1.5);
    assert_eq!(f.bar("B").map(|b| b.value), Some(1.2));
    assert_eq!(f.domain.low, 0.0);
    assert_eq!(f.domain.high, 4.0);
    assert_eq!(f.y_label, "Change °C from 1951-1980 baseline");
    assert_eq!(
        f.annotation_text(),
        vec![
            "The global temperature has risen by 0.8°C for the year of 2018 compared to the 1951-1980 baseline.",
            "Countries Repeatedly Ranking in the Top 2 for Temperature Increase (2018-2020):",
            "A: 2018, 2020",
            "B: 2018, 2019",
        ]
    );
    let kinds: Vec<AnnotationKind> = f.annotations.iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        vec![AnnotationKind::Readout, AnnotationKind::Heading, AnnotationKind::Entry, AnnotationKind::Entry]
    );
}

#[test]
fn walking_forward_ends_on_the_aggregate_time_series() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(rows());
    let mut out = Recorder::default();
    ctl.start(&mut src, &mut out);

    assert!(matches!(ctl.next(&mut src, &mut out), PassOutcome::Rendered(Page::Snapshot(1))));
    assert_eq!(labels(out.frames.last().unwrap()), vec!["B", "C"]);
    assert!(matches!(ctl.next(&mut src, &mut out), PassOutcome::Rendered(Page::Snapshot(2))));
    assert!(matches!(ctl.next(&mut src, &mut out), PassOutcome::Rendered(Page::Interactive)));

    let f = out.frames.last().unwrap();
    assert_eq!(f.kind, FrameKind::Interactive { entity: "World".into() });
    assert_eq!(f.title, "Mean Temperature Change by Country");
    assert_eq!(f.domain.low, 0.0);
    assert_eq!(f.domain.high, 1.0);
    assert_eq!(labels(f), vec!["2016", "2017", "2018", "2019", "2020"]);
    assert!(f.annotations.is_empty());
    assert!(f.shows_x_tick("2016") && f.shows_x_tick("2019") && !f.shows_x_tick("2017"));

    let rendered = out.frames.len();
    assert!(matches!(ctl.next(&mut src, &mut out), PassOutcome::Unchanged));
    assert_eq!(out.frames.len(), rendered);
    assert!(!ctl.has_next());
    assert!(ctl.has_prev());
    assert_eq!(ctl.config().page_count(), 3);

    assert!(matches!(ctl.prev(&mut src, &mut out), PassOutcome::Rendered(Page::Snapshot(2))));
}

#[test]
fn selecting_an_entity_rerenders_without_moving() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(rows());
    let mut out = Recorder::default();
    ctl.start(&mut src, &mut out);
    for _ in 0..3 {
        ctl.next(&mut src, &mut out);
    }

    let outcome = ctl.select_entity("A", &mut src, &mut out).expect("interactive");
    assert!(matches!(outcome, PassOutcome::Rendered(Page::Interactive)));
    assert_eq!(ctl.selected_entity(), "A");
    assert_eq!(ctl.view().index(), 3);

    let f = out.frames.last().unwrap();
    assert_eq!(f.domain.low, -0.3);
    assert_eq!(f.domain.high, 1.5);
    assert_eq!(labels(f), vec!["2016", "2017", "2018", "2019", "2020"]);
    assert!(f.bar("2017").is_some_and(|b| b.value.is_nan()));
}

#[test]
fn late_starting_entity_keeps_every_year_slot() {
    let mut data = rows();
    data.push(Row::new("E").with_value(2019, 0.7).with_value(2020, 0.9));
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(data);
    let mut out = Recorder::default();
    ctl.start(&mut src, &mut out);
    for _ in 0..3 {
        ctl.next(&mut src, &mut out);
    }
    ctl.select_entity("E", &mut src, &mut out).expect("interactive");

    let f = out.frames.last().unwrap();
    assert_eq!(f.kind, FrameKind::Interactive { entity: "E".into() });
    assert_eq!(labels(f), vec!["2016", "2017", "2018", "2019", "2020"]);
    let defined: Vec<bool> = f.bars.iter().map(|b| b.value.is_finite()).collect();
    assert_eq!(defined, vec![false, false, false, true, true]);
    assert_eq!(f.bar("2019").map(|b| b.value), Some(0.7));
    assert!(f.shows_x_tick("2016") && f.shows_x_tick("2019"));
    assert_eq!(f.domain.low, 0.0);
    assert_eq!(f.domain.high, 0.9);
}

#[test]
fn labels_keep_the_cell_text_from_the_file() {
    let csv = "Country,F2016,F2017,F2018,F2019,F2020\n\
               World,0.5,0.6,0.380,0.9,1.0\n\
               A,-0.3,,1.50,0.2,1.4\n\
               B,,,1.2,1.3,0.1\n";
    let data = read_rows(csv.as_bytes()).expect("csv");
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(data);
    let mut out = Recorder::default();
    ctl.start(&mut src, &mut out);

    let f = &out.frames[0];
    assert_eq!(
        f.annotations[0].text,
        "The global temperature has risen by 0.380°C for the year of 2018 compared to the 1951-1980 baseline."
    );
    assert_eq!(f.bar("A").map(|b| b.value_label()), Some("1.50°C".to_string()));
    assert_eq!(f.bar("B").map(|b| b.value_label()), Some("1.2°C".to_string()));
}

#[test]
fn reentering_interactive_resets_to_aggregate() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(rows());
    let mut out = Recorder::default();
    ctl.start(&mut src, &mut out);
    for _ in 0..3 {
        ctl.next(&mut src, &mut out);
    }
    ctl.select_entity("B", &mut src, &mut out).expect("interactive");
    ctl.prev(&mut src, &mut out);
    ctl.next(&mut src, &mut out);
    assert_eq!(ctl.selected_entity(), "World");
}

#[test]
fn selection_outside_interactive_is_rejected() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(rows());
    let mut out = Recorder::default();
    ctl.start(&mut src, &mut out);
    assert!(matches!(ctl.select_entity("A", &mut src, &mut out), Err(ChartError::NotInteractive)));
    assert_eq!(ctl.page(), Page::Snapshot(0));
    assert_eq!(out.frames.len(), 1);
}

#[test]
fn entity_without_values_fails_and_keeps_previous_view() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(rows());
    let mut out = Recorder::default();
    ctl.start(&mut src, &mut out);
    for _ in 0..3 {
        ctl.next(&mut src, &mut out);
    }
    let before = out.frames.len();

    let outcome = ctl.select_entity("D", &mut src, &mut out).expect("interactive");
    assert!(matches!(outcome, PassOutcome::Failed(ChartError::MissingSeries { .. })));
    assert_eq!(out.frames.len(), before);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(ctl.selected_entity(), "World");

    let outcome = ctl.select_entity("Nowhere", &mut src, &mut out).expect("interactive");
    assert!(matches!(outcome, PassOutcome::Failed(ChartError::MissingEntity { year: None, .. })));
}

#[test]
fn missing_aggregate_aborts_snapshot_pass() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(rows().into_iter().filter(|r| r.entity != "World").collect());
    let mut out = Recorder::default();

    match ctl.start(&mut src, &mut out) {
        PassOutcome::Failed(ChartError::MissingEntity { entity, year }) => {
            assert_eq!(entity, "World");
            assert_eq!(year, Some(2018));
        }
        other => panic!("expected MissingEntity, got {other:?}"),
    }
    assert!(out.frames.is_empty());
    assert_eq!(ctl.page(), Page::Snapshot(0));
}

#[test]
fn readout_is_skipped_when_aggregate_value_is_undefined() {
    let mut data = rows();
    data[0] = Row::new("World").with_value(2019, 0.9);
    let mut ctl = Controller::new(config()).expect("config");
    let mut src = MemorySource::new(data);
    let mut out = Recorder::default();
    ctl.start(&mut src, &mut out);
    let f = &out.frames[0];
    assert!(f.annotations.iter().all(|a| a.kind != AnnotationKind::Readout));
    assert!(!f.annotations.is_empty());
}

#[test]
fn load_failure_leaves_navigation_usable() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut out = Recorder::default();
    ctl.start(&mut MemorySource::new(rows()), &mut out);

    let outcome = ctl.next(&mut Broken, &mut out);
    assert!(matches!(outcome, PassOutcome::Failed(ChartError::DataLoad(_))));
    assert_eq!(ctl.page(), Page::Snapshot(0));
    assert_eq!(out.errors, vec!["failed to load data: connection reset".to_string()]);

    // retry by navigating again
    assert!(ctl.next(&mut MemorySource::new(rows()), &mut out).is_rendered());
    assert_eq!(ctl.page(), Page::Snapshot(1));
}

#[test]
fn superseded_load_is_discarded() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut out = Recorder::default();
    ctl.start(&mut MemorySource::new(rows()), &mut out);

    let older = ctl.request_nav(Nav::Next).expect("not at boundary");
    let newer = ctl.request_nav(Nav::Next).expect("not at boundary");
    assert!(newer.generation() > older.generation());
    assert_eq!((older.index(), newer.index()), (1, 1));
    assert_eq!(newer.entity(), None);

    assert!(matches!(ctl.complete(newer, Ok(rows()), &mut out), PassOutcome::Rendered(Page::Snapshot(1))));
    assert!(matches!(ctl.complete(older, Ok(rows()), &mut out), PassOutcome::Stale));
    assert_eq!(out.frames.len(), 2);
    assert_eq!(ctl.page(), Page::Snapshot(1));
}

#[test]
fn history_is_fixed_after_first_load() {
    let mut ctl = Controller::new(config()).expect("config");
    let mut out = Recorder::default();
    assert!(ctl.history().is_none());
    ctl.start(&mut MemorySource::new(rows()), &mut out);
    let first = ctl.history().cloned().expect("history");

    let shifted: Vec<Row> = rows()
        .into_iter()
        .map(|r| if r.entity == "C" { r.with_value(2018, 9.0) } else { r })
        .collect();
    ctl.next(&mut MemorySource::new(shifted), &mut out);
    assert_eq!(ctl.history(), Some(&first));
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = ChartConfig { top_k: 0, ..ChartConfig::default() };
    assert!(matches!(Controller::new(cfg), Err(ChartError::Config(_))));
}
