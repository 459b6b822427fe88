use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct Publisher(String);

impl Publisher {
    pub fn new(publisher: impl Into<String>) -> Self {
        Self(publisher.into())
    }
}
