use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

/// Name of a manifest option, which doubles as the id of the field bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for FieldId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for FieldId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FieldId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for FieldId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Option names the popup editor treats specially.
pub mod names {
    pub const TYPE: &str = "type";
    pub const ICON: &str = "icon";
    pub const TRIANGLE: &str = "triangle";
    pub const FLIP: &str = "flip";
    pub const SOUND: &str = "sound";
    pub const FONT_COLOR: &str = "fontColor";
    pub const FONT_SIZE: &str = "fontSize";
    pub const FONT_PERCENTAGE: &str = "fontPercentage";
    pub const LINK_URL: &str = "linkUrl";
    pub const LINK_TARGET: &str = "linkTarget";
    pub const TARGET: &str = "target";
    pub const START: &str = "start";
    pub const END: &str = "end";

    pub const POPUP: &str = "popup";
}
