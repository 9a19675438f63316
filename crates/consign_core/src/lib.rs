//! Consign core: pure state machine and view-model helpers.
mod effect;
mod form;
mod msg;
mod record;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{FormField, ShipmentForm};
pub use msg::{Msg, PreviewContent};
pub use record::{SaveReceipt, ShipmentRecord};
pub use state::{AppState, DocKind, Generation, SaveStatus, StagedFile, STATUS_RESET_SECS};
pub use update::update;
pub use view_model::{AppViewModel, FieldView, FormPanelView, PreviewView, TabView};
