// File: crates/tempchart-core/src/lib.rs
// Summary: Core library entry point; exports ranking, scaling, pagination and the renderer boundary.

pub mod types;
pub mod error;
pub mod config;
pub mod source;
pub mod rank;
pub mod annotate;
pub mod scale;
pub mod view;
pub mod render;
pub mod controller;

pub use types::{Row, AGGREGATE_ENTITY};
pub use error::{ChartError, Result};
pub use config::ChartConfig;
pub use source::{CsvSource, DataSource, MemorySource};
pub use rank::{rank, AppearanceHistory, RankedYear, Ranker};
pub use annotate::{find_repeats, Annotation, AnnotationKind};
pub use scale::{dynamic_domain, fixed_domain, AxisDomain};
pub use view::{Nav, Page, ViewState};
pub use render::{Bar, Frame, FrameKind, Renderer, TextRenderer};
pub use controller::{Controller, PassOutcome, PassTicket};
