pub mod selection;
pub mod generation;
pub mod view;

pub use selection::{ActivityFilter, ChartKind, Selection, SortKey, TimeWindow, ITEMS_PER_PAGE};
pub use generation::RequestTracker;
pub use view::{step, Action, AppState, Effect, Panel, View};
