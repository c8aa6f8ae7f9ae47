mod state;
mod widget;
pub(crate) use self::state::{Hit, PickerState, PRESETS};
pub(crate) use self::widget::Calendar;
