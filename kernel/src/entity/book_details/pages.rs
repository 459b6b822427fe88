use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct NumberOfPages(i32);

impl NumberOfPages {
    pub fn new(pages: impl Into<i32>) -> Self {
        Self(pages.into())
    }
}
