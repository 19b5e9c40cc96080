use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) enum ColorType {
    #[default]
    None,
    Red,
    Orange,
    Yellow,
    Gray,
    Purple,
    Beige,
    Blue,
    Green,
}

impl ColorType {
    pub(crate) fn is_none(self) -> bool {
        self == ColorType::None
    }
}
