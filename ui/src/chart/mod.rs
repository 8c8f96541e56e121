//! Chart cards: a query returns rows plus a backend-chosen chart type, drawn as SVG.

mod curve;
pub mod data;
mod polar;
pub mod render;
pub mod scale;
pub mod scene;
pub mod state;
mod view;

pub use data::{transform_rows, ChartRow, FieldValue, X_KEY_FIELD};
pub use render::{render, ChartKind, RenderedChart, COLORS};
pub use scene::ChartScene;
pub use state::ChartState;
pub use view::ChartCard;
