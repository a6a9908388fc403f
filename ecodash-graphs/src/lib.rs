//! Line chart rendering for the Ecodash dashboard.
//!
//! Charts are rasterized server-side into in-memory PNG bytes with the
//! plotters bitmap backend, so the dashboard page only ever deals with an
//! `<img>` URL and the export endpoint can reuse the exact same pipeline at
//! a different resolution.

pub mod renderer;
pub mod theme;

pub use renderer::{parse_hex_color, render_line_chart, render_placeholder, ChartOptions};
pub use theme::ChartTheme;
