use crate::core::node::FieldId;
use crate::core::value::Value;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PanelEvent {
    Opened {
        object_id: String,
    },
    Closed {
        object_id: String,
    },
    ValueCommitted {
        field: FieldId,
        value: Value,
    },
    ErrorShown {
        message: String,
    },
    ErrorCleared,
    VisibilityChanged {
        shown: Vec<FieldId>,
        hidden: Vec<FieldId>,
    },
    LinkTargetToggled {
        enabled: bool,
    },
    /// `target` is `None` when the current media surface was highlighted instead.
    TargetBlinked {
        target: Option<String>,
    },
    TooltipShown {
        name: String,
    },
    FieldsRefreshed,
    ObjectReplaced {
        object_id: String,
    },
}
